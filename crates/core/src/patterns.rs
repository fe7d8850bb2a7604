//! Shared regex tables (§9: "Anti-entry regex is a safety rail that applies
//! in multiple places"). Compiled once, reused by the resolver, the
//! entry-point detector, and the reachability walker.

use once_cell::sync::Lazy;
use regex::Regex;

/// Matches a path or name segment containing `dead`, `deprecated`, `legacy`,
/// `old`, or `unused`, case-insensitively. Applied in entry-point detection,
/// same-package expansion, and Rust `mod` following.
#[allow(clippy::unwrap_used)]
static ANTI_ENTRY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(^|[/_.-])(dead|deprecated|legacy|old|unused)([/_.-]|$)").unwrap());

/// True if `path` matches the anti-entry pattern anywhere in its components.
pub fn is_anti_entry(path: &str) -> bool {
    ANTI_ENTRY_RE.is_match(path)
}

/// Platform-specific suffixes tried during JS/TS extensionless resolution
/// (§4.5).
pub const PLATFORM_SUFFIXES: &[&str] = &[".ios", ".android", ".web", ".native", ".macos", ".windows"];

/// Source extensions tried, in order, when rewriting a build-directory target
/// back to its source form (§4.1, §4.2).
pub const JS_SOURCE_EXTENSIONS: &[&str] = &["ts", "tsx", "js", "jsx", "mts", "cts"];

/// Build-output directory names recognized by the build-to-source rewrite.
pub const BUILD_DIRS: &[&str] = &["dist", "lib", "build", "out"];

/// Fallback entry stems tried when a package's declared entry points nowhere
/// real (§4.2, §9 Open Question: kept fixed rather than configurable).
pub const FALLBACK_ENTRY_STEMS: &[&str] =
    &["src/index", "src/main", "src/entry-bundler", "src/entry"];
