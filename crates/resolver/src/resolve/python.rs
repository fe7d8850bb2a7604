//! Python import resolution (§4.5).

use deadcode_core::{Import, ReverseIndex};

pub fn resolve(index: &ReverseIndex, from_file: &str, import: &Import) -> Vec<String> {
    let module = &import.module;

    if module.starts_with('.') {
        let dot_count = module.chars().take_while(|c| *c == '.').count();
        let remainder = &module[dot_count..];
        return resolve_relative(index, from_file, dot_count, remainder);
    }

    resolve_absolute(index, module)
}

fn resolve_relative(index: &ReverseIndex, from_file: &str, dot_count: usize, remainder: &str) -> Vec<String> {
    let mut dir_segments: Vec<&str> = dirname(from_file).split('/').filter(|s| !s.is_empty()).collect();
    // One leading dot means "this package"; each additional dot ascends one level.
    for _ in 1..dot_count {
        dir_segments.pop();
    }
    let base = dir_segments.join("/");
    if remainder.is_empty() {
        return module_candidates(index, &base);
    }
    let full = if base.is_empty() {
        remainder.replace('.', "/")
    } else {
        format!("{base}/{}", remainder.replace('.', "/"))
    };
    module_candidates(index, &full)
}

fn resolve_absolute(index: &ReverseIndex, module: &str) -> Vec<String> {
    let full_path = module.replace('.', "/");
    let hits = module_candidates(index, &full_path);
    if !hits.is_empty() {
        return hits;
    }

    // Progressively shorter prefixes: the last segment may be a symbol
    // rather than a submodule (`from lib.utils import capitalize`).
    let mut segments: Vec<&str> = module.split('.').collect();
    while segments.len() > 1 {
        segments.pop();
        let prefix_path = segments.join("/");
        let hits = module_candidates(index, &prefix_path);
        if !hits.is_empty() {
            return hits;
        }
    }
    Vec::new()
}

fn module_candidates(index: &ReverseIndex, path: &str) -> Vec<String> {
    let as_module = format!("{path}.py");
    if index.contains_path(&as_module) {
        return vec![as_module];
    }
    let as_package = format!("{path}/__init__.py");
    if index.contains_path(&as_package) {
        return vec![as_package];
    }
    Vec::new()
}

fn dirname(path: &str) -> &str {
    path.rfind('/').map(|i| &path[..i]).unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;
    use deadcode_core::{FileRecord, ImportKind, Language};

    fn import(module: &str) -> Import {
        Import {
            module: module.to_string(),
            kind: ImportKind::PythonDotted,
            name: None,
            is_glob: false,
            line: 1,
        }
    }

    #[test]
    fn resolves_dotted_absolute_module_to_package_init() {
        let mut index = ReverseIndex::new();
        index.insert(FileRecord::empty("a/b/c/__init__.py", Language::Python));
        let result = resolve(&index, "x.py", &import("a.b.c"));
        assert_eq!(result, vec!["a/b/c/__init__.py".to_string()]);
    }

    #[test]
    fn falls_back_to_shorter_prefix_when_last_segment_is_a_symbol() {
        let mut index = ReverseIndex::new();
        index.insert(FileRecord::empty("lib/utils.py", Language::Python));
        let result = resolve(&index, "x.py", &import("lib.utils.capitalize"));
        assert_eq!(result, vec!["lib/utils.py".to_string()]);
    }

    #[test]
    fn resolves_single_dot_relative_import_within_package() {
        let mut index = ReverseIndex::new();
        index.insert(FileRecord::empty("pkg/sibling.py", Language::Python));
        let result = resolve(&index, "pkg/main.py", &import(".sibling"));
        assert_eq!(result, vec!["pkg/sibling.py".to_string()]);
    }

    #[test]
    fn resolves_double_dot_ascending_relative_import() {
        let mut index = ReverseIndex::new();
        index.insert(FileRecord::empty("pkg/shared.py", Language::Python));
        let result = resolve(&index, "pkg/sub/main.py", &import("..shared"));
        assert_eq!(result, vec!["pkg/shared.py".to_string()]);
    }
}
