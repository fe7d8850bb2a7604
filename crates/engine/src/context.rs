//! Builds the [`ResolutionContext`] (C1/C2) from whatever config files
//! discovery found, before a single import is resolved.

use deadcode_core::ResolutionContext;
use deadcode_resolver::{discover_workspace_packages, index_package, DiscoveredPackage};
use std::collections::HashMap;
use std::path::Path;

/// Builds the resolution context: workspace package discovery/indexing,
/// tsconfig `extends` chains, Vite aliases, and the Go module path —
/// everything C1/C2 contribute before resolution or entry detection can run.
pub fn build_resolution_context(
    project_root: &Path,
    candidate_paths: &std::collections::HashSet<String>,
    config_sources: &HashMap<String, String>,
) -> ResolutionContext {
    let mut ctx = ResolutionContext::new();

    let root_manifest: serde_json::Value = config_sources
        .get("package.json")
        .and_then(|s| serde_json::from_str(s).ok())
        .unwrap_or(serde_json::json!({}));

    let mut discovered = discover_workspace_packages(project_root, &root_manifest);
    // The root manifest is a package too (`manifest_entries`'s "root and
    // per workspace package" union): `discover_workspace_packages` only
    // walks workspace-glob subdirectories, so the root itself is added here.
    if config_sources.contains_key("package.json") {
        discovered.push(DiscoveredPackage { dir: String::new(), manifest: root_manifest.clone() });
    }
    for pkg in &discovered {
        let name = pkg
            .manifest
            .get("name")
            .and_then(serde_json::Value::as_str)
            .unwrap_or(&pkg.dir)
            .to_string();
        let indexed = index_package(pkg, project_root, candidate_paths);
        ctx.workspace_packages.insert(name, indexed);
    }

    let mut package_dirs: Vec<String> = discovered.iter().map(|p| p.dir.clone()).collect();
    package_dirs.push(String::new());

    for dir in &package_dirs {
        for candidate in ["tsconfig.json", "tsconfig.base.json"] {
            let key = join(dir, candidate);
            if config_sources.contains_key(&key) {
                deadcode_resolver::alias::load_tsconfig_chain(
                    project_root,
                    &project_root.join(&key),
                    &mut ctx,
                    dir,
                );
                break;
            }
        }

        for (path, source) in config_sources {
            let file_name = path.rsplit('/').next().unwrap_or(path);
            let in_dir = path.rsplit_once('/').map(|(d, _)| d).unwrap_or("") == dir.as_str();
            if in_dir && file_name.starts_with("vite.config") {
                let table = deadcode_resolver::alias::extract_vite_aliases(source, dir);
                if !table.is_empty() {
                    ctx.package_aliases
                        .entry(dir.clone())
                        .and_modify(|existing| *existing = table.merge_over(existing))
                        .or_insert(table);
                }
            }
        }
    }

    if let Some(go_mod) = config_sources.get("go.mod") {
        ctx.go_module_path = go_mod
            .lines()
            .find_map(|line| line.strip_prefix("module ").map(|m| m.trim().to_string()));
    }

    ctx.java_source_roots = java_source_roots(candidate_paths);

    ctx
}

fn java_source_roots(candidate_paths: &std::collections::HashSet<String>) -> Vec<String> {
    let mut roots = std::collections::BTreeSet::new();
    for path in candidate_paths {
        for marker in ["src/main/java", "src/main/kotlin"] {
            if let Some(idx) = path.find(marker) {
                roots.insert(path[..idx + marker.len()].to_string());
            }
        }
    }
    roots.into_iter().collect()
}

fn join(dir: &str, name: &str) -> String {
    if dir.is_empty() {
        name.to_string()
    } else {
        format!("{dir}/{name}")
    }
}
