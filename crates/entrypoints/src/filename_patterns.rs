//! Entry-point source 5 (§4.3): conventional entry-file naming patterns,
//! with the anti-entry override.

use deadcode_core::is_anti_entry;
use once_cell::sync::Lazy;
use regex::RegexSet;

/// One regex per convention family named in §4.3: framework router files,
/// serverless function files, test/benchmark/story files, monorepo package
/// entries, root `main.*`/`lib.*`/`mod.*`, migrations/seeds, plugin files,
/// Docusaurus theme/docs, Next.js routing roots, and worker files.
#[allow(clippy::unwrap_used)]
static ENTRY_PATTERNS: Lazy<RegexSet> = Lazy::new(|| {
    RegexSet::new([
        r"(^|/)pages/.*\.(tsx?|jsx?)$",
        r"(^|/)app/.*/page\.(tsx?|jsx?)$",
        r"(^|/)app/.*/layout\.(tsx?|jsx?)$",
        r"(^|/)api/.*\.(tsx?|jsx?)$",
        r"(^|/)functions/.*\.(js|ts|py|go)$",
        r"(^|/)netlify/functions/.*$",
        r"\.(test|spec)\.(tsx?|jsx?|py)$",
        r"(^|/)(test_|_test)\w*\.(py|go)$",
        r"(^|/)\w+_test\.go$",
        r"\.bench\.(tsx?|jsx?)$",
        r"(^|/)__tests__/.*$",
        r"\.stories\.(tsx?|jsx?)$",
        r"^main\.(ts|js|py|go|rs)$",
        r"^lib\.(ts|js|rs)$",
        r"^mod\.rs$",
        r"(^|/)migrations/.*\.(sql|py|js|ts)$",
        r"(^|/)seeds?/.*\.(js|ts|py)$",
        r"(^|/)plugins?/.*\.plugin\.(ts|js)$",
        r"(^|/)src/theme/.*$",
        r"(^|/)docs/.*\.(mdx?|md)$",
        r"(^|/)pages/_app\.(tsx?|jsx?)$",
        r"(^|/)pages/_document\.(tsx?|jsx?)$",
        r"(^|/)workers?/.*\.(ts|js)$",
        r"(^|/)\.worker\.(ts|js)$",
    ])
    .unwrap()
});

/// True if `path` matches a conventional entry pattern and is not itself
/// suppressed by the anti-entry override (§4.3, §9).
pub fn is_filename_convention_root(path: &str) -> bool {
    if is_anti_entry(path) {
        return false;
    }
    ENTRY_PATTERNS.is_match(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_nextjs_pages_router_file() {
        assert!(is_filename_convention_root("pages/index.tsx"));
    }

    #[test]
    fn matches_go_test_file() {
        assert!(is_filename_convention_root("pkg/foo_test.go"));
    }

    #[test]
    fn anti_entry_override_suppresses_an_otherwise_matching_path() {
        assert!(!is_filename_convention_root("pages/legacy/index.tsx"));
    }

    #[test]
    fn non_conventional_path_does_not_match() {
        assert!(!is_filename_convention_root("src/utils/helpers.ts"));
    }
}
