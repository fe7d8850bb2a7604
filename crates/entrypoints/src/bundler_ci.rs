//! Entry-point source 4 (§4.3): declared entries in bundler/CI configs
//! (`webpack.config.*`'s `entry`, Vite's `rollupOptions.input`).

use once_cell::sync::Lazy;
use regex::Regex;

#[allow(clippy::unwrap_used)]
static ENTRY_FIELD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?:entry|input)\s*:\s*['"]([^'"]+)['"]"#).unwrap());

/// Extracts declared entry literals from a bundler config's source text,
/// resolved relative to the config file's own directory.
pub fn declared_entries(source: &str, config_dir: &str) -> Vec<String> {
    ENTRY_FIELD_RE
        .captures_iter(source)
        .map(|caps| {
            let rel = caps[1].trim_start_matches("./");
            if config_dir.is_empty() {
                rel.to_string()
            } else {
                format!("{config_dir}/{rel}")
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_webpack_entry_field() {
        let source = "module.exports = { entry: './src/index.js' };";
        let entries = declared_entries(source, "");
        assert_eq!(entries, vec!["src/index.js".to_string()]);
    }

    #[test]
    fn extracts_vite_rollup_input_field() {
        let source = "build: { rollupOptions: { input: './src/main.ts' } }";
        let entries = declared_entries(source, "apps/web");
        assert_eq!(entries, vec!["apps/web/src/main.ts".to_string()]);
    }
}
