//! Entry-point source 9 (§4.3): directory-scanning auto-loaders. An index
//! file whose source contains a directory-require/readdir token marks all
//! its siblings as live.

use deadcode_core::ReverseIndex;
use once_cell::sync::Lazy;
use regex::RegexSet;

#[allow(clippy::unwrap_used)]
static AUTO_LOADER_TOKENS: Lazy<RegexSet> = Lazy::new(|| {
    RegexSet::new([
        r"require-?dir",
        r"require\.context\(",
        r"fs\.readdirSync\(\s*__dirname",
        r#"readdir\(\s*['"]\.['"]"#,
        r#"glob\(\s*['"]\./\*"#,
        r"importGlob\(",
    ])
    .unwrap()
});

/// True if `source` (an index file's content) contains a directory-scanning
/// auto-loader token.
pub fn is_directory_auto_loader(source: &str) -> bool {
    AUTO_LOADER_TOKENS.is_match(source)
}

/// All sibling files (same directory, excluding the index file itself) of
/// an auto-loading index file, as found in the reverse index.
pub fn siblings_of(index: &ReverseIndex, index_file_path: &str) -> Vec<String> {
    let dir = index_file_path.rfind('/').map(|i| &index_file_path[..i]).unwrap_or("");
    let prefix = if dir.is_empty() { String::new() } else { format!("{dir}/") };
    index
        .paths()
        .filter(|p| {
            p.as_str() != index_file_path
                && p.strip_prefix(&prefix).map(|rest| !rest.contains('/')).unwrap_or(false)
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use deadcode_core::{FileRecord, Language};

    #[test]
    fn detects_require_context_token() {
        assert!(is_directory_auto_loader("const ctx = require.context('./plugins', false);"));
    }

    #[test]
    fn plain_index_file_is_not_an_auto_loader() {
        assert!(!is_directory_auto_loader("export { default } from './widget';"));
    }

    #[test]
    fn siblings_excludes_the_index_file_and_nested_files() {
        let mut index = ReverseIndex::new();
        index.insert(FileRecord::empty("plugins/index.ts", Language::TypeScript));
        index.insert(FileRecord::empty("plugins/foo.ts", Language::TypeScript));
        index.insert(FileRecord::empty("plugins/nested/bar.ts", Language::TypeScript));
        let siblings = siblings_of(&index, "plugins/index.ts");
        assert_eq!(siblings, vec!["plugins/foo.ts".to_string()]);
    }
}
