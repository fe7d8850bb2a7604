//! The reachability walker (§4.6, C6): a single-threaded, cooperative BFS
//! with no suspension points. The walker owns `visited`/`reachable` and is
//! their sole writer (§5).

use deadcode_core::{is_anti_entry, FileMetadata, ReverseIndex, ResolutionContext};
use std::collections::{HashSet, VecDeque};

/// Pre-seeds reachable members before BFS starts (§4.6): glob-specifier
/// matches and the siblings of directory-auto-loading index files. Takes
/// every candidate file's source text keyed by path; each is tested for the
/// auto-loader token itself, so a caller need not pre-filter.
pub fn pre_seeded_reachable(
    index: &ReverseIndex,
    source_texts: &std::collections::HashMap<String, String>,
) -> HashSet<String> {
    let mut seeded = HashSet::new();

    for record in index.iter() {
        for import in &record.imports {
            if import.is_glob {
                seeded.extend(glob_matches(index, &import.module));
            }
        }
    }

    for (path, source) in source_texts {
        if deadcode_entrypoints::directory_scan::is_directory_auto_loader(source) {
            seeded.extend(deadcode_entrypoints::directory_scan::siblings_of(index, path));
        }
    }

    seeded
}

fn glob_matches(index: &ReverseIndex, pattern: &str) -> Vec<String> {
    let prefix = pattern.split("**").next().unwrap_or(pattern).trim_end_matches('*');
    index
        .paths()
        .filter(|p| p.starts_with(prefix))
        .cloned()
        .collect()
}

/// Runs the BFS from `entry_points`, returning the full reachable set
/// (which always includes every entry point, §3 invariant 4/5).
///
/// `extra_edges` is the pre-built C# file-to-referenced-files map (§4.6 step
/// 6: `new T()`, `typeof(T)`, generic type arguments, extension-method
/// invocations); the walker consults it for every node, not just C# ones,
/// since nothing else populates it.
pub fn walk(
    ctx: &ResolutionContext,
    index: &ReverseIndex,
    entry_points: &HashSet<String>,
    pre_seeded: &HashSet<String>,
    _extra_edges: &std::collections::HashMap<String, Vec<String>>,
) -> HashSet<String> {
    let mut visited: HashSet<String> = HashSet::new();
    let mut queue: VecDeque<String> = VecDeque::new();

    for path in entry_points.iter().chain(pre_seeded.iter()) {
        if index.contains_path(path) && visited.insert(path.clone()) {
            queue.push_back(path.clone());
        }
    }

    while let Some(current) = queue.pop_front() {
        let Some(record) = index.get(&current) else {
            continue;
        };

        let mut enqueue = |path: String| {
            if index.contains_path(&path) && visited.insert(path.clone()) {
                queue.push_back(path);
            }
        };

        // Same-package linking (Go compiles the whole package together;
        // Java/Kotlin classes in the same package see each other without
        // imports).
        match &record.metadata {
            FileMetadata::Go { .. } => {
                for sibling in go_package_siblings(index, &current) {
                    enqueue(sibling);
                }
            }
            FileMetadata::Java { package_name: Some(pkg), .. } if !pkg.is_empty() => {
                let package_dir = pkg.replace('.', "/");
                for member in index.java_package_members(&package_dir) {
                    if !is_anti_entry(member) {
                        enqueue(member.clone());
                    }
                }
            }
            _ => {}
        }

        for import in &record.imports {
            for target in deadcode_resolver::resolve(ctx, index, &current, import) {
                enqueue(target.clone());
            }
            // Python `from X import Y`: Y may be a submodule, not a symbol;
            // try `X.Y` as a module path too.
            if matches!(import.kind, deadcode_core::ImportKind::PythonFrom) {
                if let Some(name) = &import.name {
                    let submodule_import = deadcode_core::Import {
                        module: format!("{}.{name}", import.module),
                        ..import.clone()
                    };
                    for target in deadcode_resolver::resolve(ctx, index, &current, &submodule_import) {
                        enqueue(target.clone());
                    }
                }
            }
        }

        for export in &record.exports {
            if let Some(source_module) = &export.source_module {
                let reexport_import = deadcode_core::Import {
                    module: source_module.clone(),
                    kind: deadcode_core::ImportKind::EsFrom,
                    name: None,
                    is_glob: false,
                    line: export.line,
                };
                for target in deadcode_resolver::resolve(ctx, index, &current, &reexport_import) {
                    enqueue(target.clone());
                }
            }
        }

        if matches!(record.language, deadcode_core::Language::Rust) {
            let dir = current.rfind('/').map(|i| &current[..i]).unwrap_or("");
            for module_decl in &record.mods {
                if is_anti_entry(&module_decl.name) {
                    continue;
                }
                let base = if dir.is_empty() {
                    module_decl.name.clone()
                } else {
                    format!("{dir}/{}", module_decl.name)
                };
                enqueue(format!("{base}.rs"));
                enqueue(format!("{base}/mod.rs"));
            }
        }
    }

    visited
}

fn go_package_siblings(index: &ReverseIndex, current: &str) -> Vec<String> {
    let dir = current.rfind('/').map(|i| &current[..i]).unwrap_or("");
    let prefix = if dir.is_empty() { String::new() } else { format!("{dir}/") };
    index
        .paths()
        .filter(|p| {
            p.as_str() != current
                && p.strip_prefix(&prefix)
                    .map(|rest| !rest.contains('/') && rest.ends_with(".go") && !rest.ends_with("_test.go"))
                    .unwrap_or(false)
                && !is_anti_entry(p)
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use deadcode_core::{FileMetadata, FileRecord, Import, ImportKind, Language};

    #[test]
    fn simple_unused_file_is_not_in_reachable_set() {
        let mut index = ReverseIndex::new();
        index.insert(FileRecord {
            imports: vec![Import {
                module: "./b".to_string(),
                kind: ImportKind::EsFrom,
                name: None,
                is_glob: false,
                line: 1,
            }],
            ..FileRecord::empty("src/a.ts", Language::TypeScript)
        });
        index.insert(FileRecord::empty("src/b.ts", Language::TypeScript));
        index.insert(FileRecord::empty("src/c.ts", Language::TypeScript));

        let ctx = ResolutionContext::new();
        let entries: HashSet<String> = ["src/a.ts".to_string()].into_iter().collect();
        let reachable = walk(&ctx, &index, &entries, &HashSet::new(), &std::collections::HashMap::new());

        assert!(reachable.contains("src/a.ts"));
        assert!(reachable.contains("src/b.ts"));
        assert!(!reachable.contains("src/c.ts"));
    }

    #[test]
    fn go_package_siblings_are_pulled_in_without_import() {
        let mut index = ReverseIndex::new();
        index.insert(FileRecord {
            metadata: FileMetadata::Go {
                is_main_package: true,
                has_main_function: true,
                has_init_function: false,
                is_test_file: false,
            },
            ..FileRecord::empty("cmd/app/main.go", Language::Go)
        });
        index.insert(FileRecord {
            metadata: FileMetadata::Go {
                is_main_package: false,
                has_main_function: false,
                has_init_function: false,
                is_test_file: false,
            },
            ..FileRecord::empty("cmd/app/util.go", Language::Go)
        });
        index.insert(FileRecord::empty("cmd/tools/old.go", Language::Go));

        let ctx = ResolutionContext::new();
        let entries: HashSet<String> = ["cmd/app/main.go".to_string()].into_iter().collect();
        let reachable = walk(&ctx, &index, &entries, &HashSet::new(), &std::collections::HashMap::new());

        assert!(reachable.contains("cmd/app/util.go"));
        assert!(!reachable.contains("cmd/tools/old.go"));
    }

    #[test]
    fn java_same_package_classes_are_reachable_without_imports() {
        let mut index = ReverseIndex::new();
        index.insert(FileRecord {
            metadata: FileMetadata::Java {
                package_name: Some("com.x".to_string()),
                has_main_method: true,
                is_spring_component: false,
            },
            ..FileRecord::empty("src/main/java/com/x/A.java", Language::Java)
        });
        index.insert(FileRecord {
            metadata: FileMetadata::Java {
                package_name: Some("com.x".to_string()),
                has_main_method: false,
                is_spring_component: false,
            },
            ..FileRecord::empty("src/main/java/com/x/B.java", Language::Java)
        });
        index.insert_java_package_member("com/x".to_string(), "src/main/java/com/x/A.java".to_string());
        index.insert_java_package_member("com/x".to_string(), "src/main/java/com/x/B.java".to_string());
        index.insert(FileRecord::empty("src/main/java/com/y/C.java", Language::Java));

        let ctx = ResolutionContext::new();
        let entries: HashSet<String> = ["src/main/java/com/x/A.java".to_string()].into_iter().collect();
        let reachable = walk(&ctx, &index, &entries, &HashSet::new(), &std::collections::HashMap::new());

        assert!(reachable.contains("src/main/java/com/x/B.java"));
        assert!(!reachable.contains("src/main/java/com/y/C.java"));
    }

    #[test]
    fn rust_mod_declaration_is_followed() {
        let mut index = ReverseIndex::new();
        index.insert(FileRecord {
            mods: vec![deadcode_core::ModDecl { name: "widgets".to_string(), line: 1 }],
            ..FileRecord::empty("src/lib.rs", Language::Rust)
        });
        index.insert(FileRecord::empty("src/widgets.rs", Language::Rust));

        let ctx = ResolutionContext::new();
        let entries: HashSet<String> = ["src/lib.rs".to_string()].into_iter().collect();
        let reachable = walk(&ctx, &index, &entries, &HashSet::new(), &std::collections::HashMap::new());
        assert!(reachable.contains("src/widgets.rs"));
    }

    #[test]
    fn reexport_chain_is_followed_as_an_edge() {
        let mut index = ReverseIndex::new();
        index.insert(FileRecord {
            exports: vec![deadcode_core::Export {
                name: "x".to_string(),
                export_type: "named".to_string(),
                line: 1,
                end_line: 1,
                is_default: false,
                source_module: Some("./sub".to_string()),
            }],
            ..FileRecord::empty("src/index.ts", Language::TypeScript)
        });
        index.insert(FileRecord::empty("src/sub.ts", Language::TypeScript));

        let ctx = ResolutionContext::new();
        let entries: HashSet<String> = ["src/index.ts".to_string()].into_iter().collect();
        let reachable = walk(&ctx, &index, &entries, &HashSet::new(), &std::collections::HashMap::new());
        assert!(reachable.contains("src/sub.ts"));
    }

    #[test]
    fn visited_set_prevents_cycles_from_looping() {
        let mut index = ReverseIndex::new();
        index.insert(FileRecord {
            imports: vec![Import {
                module: "./b".to_string(),
                kind: ImportKind::EsFrom,
                name: None,
                is_glob: false,
                line: 1,
            }],
            ..FileRecord::empty("src/a.ts", Language::TypeScript)
        });
        index.insert(FileRecord {
            imports: vec![Import {
                module: "./a".to_string(),
                kind: ImportKind::EsFrom,
                name: None,
                is_glob: false,
                line: 1,
            }],
            ..FileRecord::empty("src/b.ts", Language::TypeScript)
        });

        let ctx = ResolutionContext::new();
        let entries: HashSet<String> = ["src/a.ts".to_string()].into_iter().collect();
        let reachable = walk(&ctx, &index, &entries, &HashSet::new(), &std::collections::HashMap::new());
        assert_eq!(reachable.len(), 2);
    }
}
