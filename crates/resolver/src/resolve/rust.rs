//! Rust `use`/`mod` resolution (§4.5): `::` becomes `/`; try `path.rs`
//! then `path/mod.rs`.

use deadcode_core::{Import, ReverseIndex};

pub fn resolve(index: &ReverseIndex, import: &Import) -> Vec<String> {
    let path = normalize(&import.module);
    for candidate in [format!("{path}.rs"), format!("{path}/mod.rs")] {
        if index.contains_path(&candidate) {
            return vec![candidate];
        }
    }
    Vec::new()
}

fn normalize(module: &str) -> String {
    module
        .trim_start_matches("crate::")
        .trim_start_matches("self::")
        .trim_start_matches("super::")
        .replace("::", "/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use deadcode_core::{FileRecord, ImportKind, Language};

    fn import(module: &str) -> Import {
        Import {
            module: module.to_string(),
            kind: ImportKind::RustUse,
            name: None,
            is_glob: false,
            line: 1,
        }
    }

    #[test]
    fn resolves_double_colon_path_to_rs_file() {
        let mut index = ReverseIndex::new();
        index.insert(FileRecord::empty("util/helpers.rs", Language::Rust));
        let result = resolve(&index, &import("util::helpers"));
        assert_eq!(result, vec!["util/helpers.rs".to_string()]);
    }

    #[test]
    fn falls_back_to_mod_rs_for_directory_module() {
        let mut index = ReverseIndex::new();
        index.insert(FileRecord::empty("widgets/mod.rs", Language::Rust));
        let result = resolve(&index, &import("crate::widgets"));
        assert_eq!(result, vec!["widgets/mod.rs".to_string()]);
    }

    #[test]
    fn unresolved_module_yields_no_edges() {
        let index = ReverseIndex::new();
        assert!(resolve(&index, &import("external_crate::thing")).is_empty());
    }
}
