//! Go import resolution (§4.5): module-path-aware, then directory-segment
//! fallback, then a last-segment heuristic. Anti-entry matches are excluded
//! from every strategy's results.

use deadcode_core::{is_anti_entry, Import, ResolutionContext, ReverseIndex};

pub fn resolve(ctx: &ResolutionContext, index: &ReverseIndex, import: &Import) -> Vec<String> {
    let module = &import.module;

    if let Some(module_path) = &ctx.go_module_path {
        if let Some(rest) = module.strip_prefix(module_path.as_str()) {
            let package_dir = rest.trim_start_matches('/');
            let files = non_test_go_files_in_dir(index, package_dir);
            if !files.is_empty() {
                return files;
            }
        }
    }

    let mut segments: Vec<&str> = module.split('/').collect();
    while !segments.is_empty() {
        let dir = segments.join("/");
        let files = non_test_go_files_in_dir(index, &dir);
        if !files.is_empty() {
            return files;
        }
        segments.remove(0);
    }

    if let Some(last) = module.rsplit('/').next() {
        let files = non_test_go_files_in_dir(index, last);
        if !files.is_empty() {
            return files;
        }
    }

    Vec::new()
}

fn non_test_go_files_in_dir(index: &ReverseIndex, dir: &str) -> Vec<String> {
    let prefix = if dir.is_empty() { String::new() } else { format!("{dir}/") };
    index
        .paths()
        .filter(|path| {
            let Some(rest) = path.strip_prefix(&prefix) else {
                return false;
            };
            !rest.contains('/')
                && rest.ends_with(".go")
                && !rest.ends_with("_test.go")
                && !is_anti_entry(path)
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use deadcode_core::{FileRecord, ImportKind, Language};

    fn import(module: &str) -> Import {
        Import {
            module: module.to_string(),
            kind: ImportKind::Go,
            name: None,
            is_glob: false,
            line: 1,
        }
    }

    #[test]
    fn module_path_prefixed_import_returns_all_package_files() {
        let mut index = ReverseIndex::new();
        index.insert(FileRecord::empty("cmd/app/main.go", Language::Go));
        index.insert(FileRecord::empty("cmd/app/util.go", Language::Go));
        index.insert(FileRecord::empty("cmd/app/main_test.go", Language::Go));
        let mut ctx = ResolutionContext::new();
        ctx.go_module_path = Some("example.com/proj".to_string());
        let result = resolve(&ctx, &index, &import("example.com/proj/cmd/app"));
        assert_eq!(result.len(), 2);
        assert!(!result.iter().any(|p| p.ends_with("_test.go")));
    }

    #[test]
    fn anti_entry_package_files_are_excluded() {
        let mut index = ReverseIndex::new();
        index.insert(FileRecord::empty("cmd/legacy/old.go", Language::Go));
        let ctx = ResolutionContext::new();
        let result = resolve(&ctx, &index, &import("cmd/legacy"));
        assert!(result.is_empty());
    }
}
