//! Filesystem discovery: the one place in the workspace that walks the
//! project tree unconditionally (§5's discovery phase). Everything
//! downstream — resolver, entry-point detector, walker — works only against
//! the in-memory structures this phase and the parsing phase produce.

use deadcode_core::ScanConfig;
use regex::RegexSet;
use std::path::Path;
use walkdir::WalkDir;

const ALWAYS_EXCLUDED_DIRS: &[&str] = &[
    ".git",
    "node_modules",
    "vendor",
    "target",
    ".venv",
    "venv",
    "site-packages",
    "__pycache__",
    ".mypy_cache",
    "dist",
    "build",
    "out",
    "bin",
    "obj",
];

const SOURCE_EXTENSIONS: &[&str] = &[
    "ts", "tsx", "js", "jsx", "mjs", "cjs", "mts", "cts", "py", "java", "kt", "kts", "go", "rs", "cs",
];

/// Every file under `project_root` whose extension marks it as a source
/// file in one of the six supported languages, excluding dependency and
/// build-output directories (§1 Non-goals: never resolves into these) and
/// anything matching a configured `exclude` glob. Paths are project-relative
/// and forward-slash normalized.
pub fn discover_source_files(project_root: &Path, config: &ScanConfig) -> Vec<String> {
    let exclude = compile_excludes(&config.exclude);
    WalkDir::new(project_root)
        .into_iter()
        .filter_entry(|entry| {
            if entry.file_type().is_dir() {
                entry
                    .file_name()
                    .to_str()
                    .map(|name| !ALWAYS_EXCLUDED_DIRS.contains(&name))
                    .unwrap_or(true)
            } else {
                true
            }
        })
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .filter_map(|entry| rel_str(project_root, entry.path()))
        .filter(|rel| has_source_extension(rel))
        .filter(|rel| !exclude.is_match(rel))
        .collect()
}

/// Every file the ambient-config discovery phase needs raw text for:
/// `package.json`, `tsconfig*.json`, `vite.config.*`, `*.html`, and common
/// bundler/CI config filenames, keyed by project-relative path.
pub fn discover_config_files(project_root: &Path) -> Vec<String> {
    const NAMES: &[&str] = &[
        "package.json",
        "pnpm-workspace.yaml",
        "lerna.json",
        "nx.json",
        "workspace.json",
        "rush.json",
        "go.mod",
        "webpack.config.js",
        "webpack.config.ts",
        "rollup.config.js",
        "rollup.config.ts",
    ];
    WalkDir::new(project_root)
        .into_iter()
        .filter_entry(|entry| {
            if entry.file_type().is_dir() {
                entry
                    .file_name()
                    .to_str()
                    .map(|name| !ALWAYS_EXCLUDED_DIRS.contains(&name))
                    .unwrap_or(true)
            } else {
                true
            }
        })
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| {
            let file_name = entry.file_name().to_string_lossy();
            NAMES.contains(&file_name.as_ref())
                || file_name.starts_with("tsconfig")
                || file_name.starts_with("vite.config")
                || file_name.ends_with(".html")
        })
        .filter_map(|entry| rel_str(project_root, entry.path()))
        .collect()
}

fn has_source_extension(path: &str) -> bool {
    path.rsplit('.')
        .next()
        .map(|ext| SOURCE_EXTENSIONS.contains(&ext))
        .unwrap_or(false)
}

fn compile_excludes(patterns: &[String]) -> RegexSet {
    let translated: Vec<String> = patterns.iter().map(|p| glob_to_regex(p)).collect();
    RegexSet::new(translated).unwrap_or_else(|_| RegexSet::empty())
}

/// Minimal glob-to-regex translation covering `*`/`**`, sufficient for the
/// simple path-fragment excludes §6's configuration surface expects.
fn glob_to_regex(pattern: &str) -> String {
    let mut out = String::from("^");
    let mut chars = pattern.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '*' => {
                if chars.peek() == Some(&'*') {
                    chars.next();
                    out.push_str(".*");
                } else {
                    out.push_str("[^/]*");
                }
            }
            '.' | '(' | ')' | '+' | '?' | '^' | '$' | '|' | '[' | ']' | '{' | '}' | '\\' => {
                out.push('\\');
                out.push(c);
            }
            other => out.push(other),
        }
    }
    out.push('$');
    out
}

fn rel_str(root: &Path, path: &Path) -> Option<String> {
    path.strip_prefix(root)
        .ok()
        .map(|p| p.to_string_lossy().replace('\\', "/"))
}
