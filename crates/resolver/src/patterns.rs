//! Build-to-source rewriting (§4.1, §4.2) and the script-command scraper
//! (§4.3 source 2).

use deadcode_core::patterns::{BUILD_DIRS, JS_SOURCE_EXTENSIONS};
use once_cell::sync::Lazy;
use regex::Regex;

#[allow(clippy::unwrap_used)]
static RUNNER_SCRIPT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:node|ts-node|tsx|babel-node|python|python3)\s+([./\w-]+\.(?:ts|tsx|js|jsx|mjs|cjs|py))").unwrap()
});

#[allow(clippy::unwrap_used)]
static BARE_SOURCE_PATH_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b((?:\./|src/|[\w-]+/)[\w./-]+\.(?:ts|tsx|js|jsx|mjs|cjs|py))\b").unwrap());

/// For a build-output target like `dist/foo.js` or `pkg/dist/thing.js`,
/// generates the symmetric source-form candidates: `src/foo.ts`, `src/foo`,
/// etc., handling nested build directories the same way (§4.1).
pub fn build_to_source_candidates(declared_path: &str) -> Vec<String> {
    let mut candidates = Vec::new();
    for build_dir in BUILD_DIRS {
        let marker = format!("/{build_dir}/");
        if let Some(idx) = declared_path.find(&marker) {
            let prefix = &declared_path[..idx];
            let suffix = &declared_path[idx + marker.len()..];
            let stem = strip_known_extension(suffix);
            for ext in JS_SOURCE_EXTENSIONS {
                candidates.push(format!("{prefix}/src/{stem}.{ext}"));
            }
            candidates.push(format!("{prefix}/src/{stem}"));
        } else if let Some(suffix) = declared_path.strip_prefix(&format!("{build_dir}/")) {
            let stem = strip_known_extension(suffix);
            for ext in JS_SOURCE_EXTENSIONS {
                candidates.push(format!("src/{stem}.{ext}"));
            }
            candidates.push(format!("src/{stem}"));
        }
    }
    candidates
}

/// Strips a known source extension from a path, leaving the rest untouched.
pub fn strip_known_extension(path: &str) -> String {
    for ext in JS_SOURCE_EXTENSIONS {
        if let Some(stem) = path.strip_suffix(&format!(".{ext}")) {
            return stem.to_string();
        }
    }
    path.to_string()
}

/// Finds the first literal source-extension path mentioned in a build
/// script's command line (§4.2: "the indexer consults the build script").
pub fn first_source_path_literal(script: &str) -> Option<String> {
    BARE_SOURCE_PATH_RE
        .captures(script)
        .map(|c| c[1].trim_start_matches("./").to_string())
}

/// Scans manifest `scripts` values for tokens matching a runner-plus-source
/// pattern or a bare relative path with a source extension (§4.3 source 2).
pub fn extract_script_roots(scripts: &serde_json::Map<String, serde_json::Value>, package_dir: &str) -> Vec<String> {
    let mut roots = Vec::new();
    for value in scripts.values() {
        let Some(command) = value.as_str() else {
            continue;
        };
        for caps in RUNNER_SCRIPT_RE.captures_iter(command) {
            let rel = caps[1].trim_start_matches("./");
            roots.push(join(package_dir, rel));
        }
        if let Some(rel) = BARE_SOURCE_PATH_RE.captures(command).map(|c| c[1].to_string()) {
            roots.push(join(package_dir, rel.trim_start_matches("./")));
        }
    }
    roots
}

fn join(dir: &str, rel: &str) -> String {
    if dir.is_empty() {
        rel.to_string()
    } else {
        format!("{dir}/{rel}")
    }
}
