//! The resolver (§4.5, C5): a single dispatch function chosen by the
//! extension of `fromFile`, delegating to one per-language strategy module.

mod csharp;
mod go;
mod java;
mod javascript;
mod python;
mod rust;

use deadcode_core::{Import, ReverseIndex, ResolutionContext};

/// Resolves an import against the in-memory reverse index. Never touches the
/// filesystem (§3, §9) and is deterministic: identical context/index/input
/// always yields the same ordered result (§3 invariant 2).
pub fn resolve(
    ctx: &ResolutionContext,
    index: &ReverseIndex,
    from_file: &str,
    import: &Import,
) -> Vec<String> {
    match extension(from_file) {
        "ts" | "tsx" | "js" | "jsx" | "mjs" | "cjs" | "mts" | "cts" => {
            javascript::resolve(ctx, index, from_file, import)
        }
        "py" | "pyi" => python::resolve(index, from_file, import),
        "java" | "kt" | "kts" => java::resolve(ctx, index, import),
        "go" => go::resolve(ctx, index, import),
        "rs" => rust::resolve(index, import),
        "cs" => csharp::resolve(index, import),
        _ => Vec::new(),
    }
}

fn extension(path: &str) -> &str {
    path.rsplit('.').next().unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;
    use deadcode_core::{FileRecord, ImportKind, Language};

    #[test]
    fn dispatches_by_extension_to_rust_strategy() {
        let mut index = ReverseIndex::new();
        index.insert(FileRecord::empty("util.rs", Language::Rust));
        let ctx = ResolutionContext::new();
        let import = Import {
            module: "crate::util".to_string(),
            kind: ImportKind::RustUse,
            name: None,
            is_glob: false,
            line: 1,
        };
        let result = resolve(&ctx, &index, "src/main.rs", &import);
        assert_eq!(result, vec!["util.rs".to_string()]);
    }

    #[test]
    fn unknown_extension_resolves_to_nothing() {
        let ctx = ResolutionContext::new();
        let index = ReverseIndex::new();
        let import = Import {
            module: "whatever".to_string(),
            kind: ImportKind::RustUse,
            name: None,
            is_glob: false,
            line: 1,
        };
        assert!(resolve(&ctx, &index, "README.md", &import).is_empty());
    }
}
