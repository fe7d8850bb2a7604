//! Entry-point source 3 (§4.3): `<script src="...">` values in `index.html`
//! files, resolved relative to the HTML file's own directory (the bundler
//! root), not the project root.

use once_cell::sync::Lazy;
use regex::Regex;

#[allow(clippy::unwrap_used)]
static SCRIPT_SRC_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"<script[^>]+src\s*=\s*["']([^"']+)["']"#).unwrap());

/// Extracts script roots from one `index.html` file's source, given the
/// HTML file's own project-relative directory.
pub fn script_roots_from_html(html_source: &str, html_dir: &str) -> Vec<String> {
    SCRIPT_SRC_RE
        .captures_iter(html_source)
        .filter_map(|caps| {
            let src = &caps[1];
            if src.starts_with("http://") || src.starts_with("https://") || src.starts_with("//") {
                return None;
            }
            Some(resolve_against(html_dir, src))
        })
        .collect()
}

fn resolve_against(html_dir: &str, src: &str) -> String {
    // An absolute path is resolved against the HTML file's directory (the
    // bundler root), not the project root (§4.3).
    let trimmed = src.trim_start_matches('/').trim_start_matches("./");
    if html_dir.is_empty() {
        trimmed.to_string()
    } else {
        format!("{html_dir}/{trimmed}")
    }
}
