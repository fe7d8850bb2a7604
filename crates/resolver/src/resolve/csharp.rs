//! C# resolution (§4.5): dotted namespaces are a path hint; direct matching
//! finds files under the corresponding directory.

use deadcode_core::{Import, ReverseIndex};

pub fn resolve(index: &ReverseIndex, import: &Import) -> Vec<String> {
    let namespace_path = import.module.replace('.', "/");

    let exact = format!("{namespace_path}.cs");
    if index.contains_path(&exact) {
        return vec![exact];
    }

    let prefix = format!("{namespace_path}/");
    let under_dir: Vec<String> = index
        .paths()
        .filter(|p| p.starts_with(&prefix) && p.ends_with(".cs"))
        .cloned()
        .collect();
    if !under_dir.is_empty() {
        return under_dir;
    }

    let by_basename = index.by_stem(&namespace_path);
    if !by_basename.is_empty() {
        return by_basename.to_vec();
    }

    Vec::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use deadcode_core::{FileRecord, ImportKind, Language};

    fn import(module: &str) -> Import {
        Import {
            module: module.to_string(),
            kind: ImportKind::CsharpUsing,
            name: None,
            is_glob: false,
            line: 1,
        }
    }

    #[test]
    fn resolves_dotted_namespace_to_matching_file() {
        let mut index = ReverseIndex::new();
        index.insert(FileRecord::empty("My/App/Services.cs", Language::CSharp));
        let result = resolve(&index, &import("My.App.Services"));
        assert_eq!(result, vec!["My/App/Services.cs".to_string()]);
    }

    #[test]
    fn resolves_namespace_to_all_files_under_directory() {
        let mut index = ReverseIndex::new();
        index.insert(FileRecord::empty("My/App/A.cs", Language::CSharp));
        index.insert(FileRecord::empty("My/App/B.cs", Language::CSharp));
        let result = resolve(&index, &import("My.App"));
        assert_eq!(result.len(), 2);
    }
}
