//! Workspace discovery (§4.1) and per-package indexing (§4.2, C2).

use deadcode_core::is_anti_entry;
use deadcode_core::{ResolutionContext, WorkspacePackage};
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;
use walkdir::WalkDir;

const MAX_GLOB_WALK_DEPTH: usize = 6;
const NX_CONVENTION_DIRS: &[&str] = &["apps", "libs", "packages", "tools", "services"];
const FALLBACK_WORKSPACE_DIRS: &[&str] = &["packages", "apps", "libs"];

/// A discovered package manifest, prior to indexing.
pub struct DiscoveredPackage {
    pub dir: String,
    pub manifest: Value,
}

/// Discovers workspace package directories per §4.1's ordered source list,
/// returning each directory's parsed `package.json` when present.
pub fn discover_workspace_packages(project_root: &Path, root_manifest: &Value) -> Vec<DiscoveredPackage> {
    let mut patterns: Vec<String> = Vec::new();

    if let Some(workspaces) = root_manifest.get("workspaces") {
        collect_workspaces_field(workspaces, &mut patterns);
    }

    if patterns.is_empty() {
        if let Some(pats) = read_pnpm_workspace_yaml(project_root) {
            patterns.extend(pats);
        }
    }

    if patterns.is_empty() {
        if let Some(pats) = read_lerna_json(project_root) {
            patterns.extend(pats);
        }
    }

    if patterns.is_empty() && (project_root.join("nx.json").exists() || project_root.join("workspace.json").exists()) {
        patterns.extend(NX_CONVENTION_DIRS.iter().map(|d| format!("{d}/*")));
    }

    if patterns.is_empty() {
        if let Some(pats) = read_rush_json(project_root) {
            patterns.extend(pats);
        }
    }

    if patterns.is_empty() {
        patterns.extend(FALLBACK_WORKSPACE_DIRS.iter().map(|d| format!("{d}/*")));
    }

    let mut dirs = expand_glob_patterns(project_root, &patterns);

    // Any top-level directory with its own tsconfig.json or manifest also
    // counts as a workspace package, independent of the glob patterns above.
    if let Ok(entries) = std::fs::read_dir(project_root) {
        for entry in entries.flatten() {
            let path = entry.path();
            if !path.is_dir() {
                continue;
            }
            if path.join("tsconfig.json").exists() || path.join("package.json").exists() {
                if let Some(rel) = rel_str(project_root, &path) {
                    dirs.insert(rel);
                }
            }
        }
    }

    let mut packages = Vec::new();
    for dir in dirs {
        let manifest_path = project_root.join(&dir).join("package.json");
        let Ok(raw) = std::fs::read_to_string(&manifest_path) else {
            continue;
        };
        let Ok(manifest) = serde_json::from_str(&raw) else {
            tracing::warn!(path = %manifest_path.display(), "failed to parse package manifest, skipping");
            continue;
        };
        packages.push(DiscoveredPackage { dir, manifest });
    }
    packages
}

fn collect_workspaces_field(workspaces: &Value, patterns: &mut Vec<String>) {
    match workspaces {
        Value::Array(items) => {
            for item in items {
                if let Some(s) = item.as_str() {
                    patterns.push(s.to_string());
                }
            }
        }
        Value::Object(obj) => {
            if let Some(Value::Array(items)) = obj.get("packages") {
                for item in items {
                    if let Some(s) = item.as_str() {
                        patterns.push(s.to_string());
                    }
                }
            }
        }
        _ => {}
    }
}

fn read_pnpm_workspace_yaml(project_root: &Path) -> Option<Vec<String>> {
    let path = project_root.join("pnpm-workspace.yaml");
    let raw = std::fs::read_to_string(path).ok()?;
    let parsed: serde_yaml::Value = serde_yaml::from_str(&raw).ok()?;
    let packages = parsed.get("packages")?.as_sequence()?;
    Some(
        packages
            .iter()
            .filter_map(|v| v.as_str().map(str::to_string))
            .collect(),
    )
}

fn read_lerna_json(project_root: &Path) -> Option<Vec<String>> {
    let path = project_root.join("lerna.json");
    let raw = std::fs::read_to_string(path).ok()?;
    let parsed: Value = serde_json::from_str(&raw).ok()?;
    let packages = parsed.get("packages")?.as_array()?;
    Some(
        packages
            .iter()
            .filter_map(|v| v.as_str().map(str::to_string))
            .collect(),
    )
}

fn read_rush_json(project_root: &Path) -> Option<Vec<String>> {
    let path = project_root.join("rush.json");
    let raw = std::fs::read_to_string(path).ok()?;
    let parsed: Value = serde_json::from_str(&raw).ok()?;
    let projects = parsed.get("projects")?.as_array()?;
    Some(
        projects
            .iter()
            .filter_map(|p| p.get("projectFolder").and_then(Value::as_str).map(str::to_string))
            .collect(),
    )
}

/// Expands glob-style patterns (`packages/*`) by walking the filesystem to a
/// depth bound, returning project-relative directory strings.
fn expand_glob_patterns(project_root: &Path, patterns: &[String]) -> std::collections::BTreeSet<String> {
    let mut results = std::collections::BTreeSet::new();
    for pattern in patterns {
        if let Some(prefix) = pattern.strip_suffix("/*") {
            let base = project_root.join(prefix);
            if !base.is_dir() {
                continue;
            }
            for entry in WalkDir::new(&base)
                .max_depth(1)
                .into_iter()
                .filter_map(Result::ok)
            {
                if entry.file_type().is_dir() && entry.path() != base {
                    if let Some(rel) = rel_str(project_root, entry.path()) {
                        results.insert(rel);
                    }
                }
            }
        } else {
            let base = project_root.join(pattern.trim_end_matches("/**"));
            for entry in WalkDir::new(&base)
                .max_depth(MAX_GLOB_WALK_DEPTH)
                .into_iter()
                .filter_map(Result::ok)
            {
                if entry.file_type().is_dir() && entry.path().join("package.json").exists() {
                    if let Some(rel) = rel_str(project_root, entry.path()) {
                        results.insert(rel);
                    }
                }
            }
        }
    }
    results
}

fn rel_str(root: &Path, path: &Path) -> Option<String> {
    path.strip_prefix(root)
        .ok()
        .map(|p| p.to_string_lossy().replace('\\', "/"))
}

/// Indexes a discovered package per §4.2: entry point by priority, exports
/// map, bin files.
pub fn index_package(
    pkg: &DiscoveredPackage,
    project_root: &Path,
    candidate_paths: &std::collections::HashSet<String>,
) -> WorkspacePackage {
    let manifest = &pkg.manifest;
    let name = manifest.get("name").and_then(Value::as_str).unwrap_or(&pkg.dir);

    let entry_point = resolve_entry_point(manifest, &pkg.dir, project_root, candidate_paths);
    let exports_map = resolve_exports_map(manifest, &pkg.dir);
    let bin_files = resolve_bin_files(manifest, &pkg.dir);
    let internal_dependencies = internal_deps(manifest);

    tracing::debug!(package = %name, entry = ?entry_point, "indexed workspace package");

    WorkspacePackage {
        dir: pkg.dir.clone(),
        entry_point,
        exports_map,
        bin_files,
        internal_dependencies,
    }
}

fn resolve_entry_point(
    manifest: &Value,
    dir: &str,
    project_root: &Path,
    candidate_paths: &std::collections::HashSet<String>,
) -> Option<String> {
    for key in ["source", "module", "main"] {
        if let Some(raw) = manifest.get(key).and_then(Value::as_str) {
            if let Some(found) = verify_or_rewrite(dir, raw, project_root, candidate_paths) {
                return Some(found);
            }
        }
    }
    if let Some(exports) = manifest.get("exports") {
        if let Some(dot) = exports.get(".") {
            if let Some(target) = pick_conditional_target(dot) {
                if let Some(found) = verify_or_rewrite(dir, &target, project_root, candidate_paths) {
                    return Some(found);
                }
            }
        } else if let Some(raw) = exports.as_str() {
            if let Some(found) = verify_or_rewrite(dir, raw, project_root, candidate_paths) {
                return Some(found);
            }
        }
    }

    // Build script literal-path scraping: pull the first source-extension
    // path literal out of the manifest's `build` script, if any.
    if let Some(build_script) = manifest.get("scripts").and_then(|s| s.get("build")).and_then(Value::as_str) {
        if let Some(path) = crate::patterns::first_source_path_literal(build_script) {
            let full = join_dir(dir, &path);
            if candidate_paths.contains(&full) {
                return Some(full);
            }
        }
    }

    for stem in deadcode_core::patterns::FALLBACK_ENTRY_STEMS {
        for ext in deadcode_core::patterns::JS_SOURCE_EXTENSIONS {
            let candidate = join_dir(dir, &format!("{stem}.{ext}"));
            if candidate_paths.contains(&candidate) {
                return Some(candidate);
            }
        }
    }
    None
}

/// Joins a package directory and a manifest-relative path, treating the
/// empty string (the project root's own package) as "no prefix" rather
/// than producing a leading slash.
fn join_dir(dir: &str, rest: &str) -> String {
    if dir.is_empty() {
        rest.to_string()
    } else {
        format!("{dir}/{rest}")
    }
}

fn verify_or_rewrite(
    dir: &str,
    raw: &str,
    _project_root: &Path,
    candidate_paths: &std::collections::HashSet<String>,
) -> Option<String> {
    let raw = raw.trim_start_matches("./");
    let declared = join_dir(dir, raw);
    if candidate_paths.contains(&declared) {
        return Some(declared);
    }
    for src_candidate in crate::patterns::build_to_source_candidates(&declared) {
        if candidate_paths.contains(&src_candidate) {
            return Some(src_candidate);
        }
    }
    None
}

fn pick_conditional_target(value: &Value) -> Option<String> {
    if let Some(s) = value.as_str() {
        return Some(s.to_string());
    }
    let obj = value.as_object()?;
    for key in ["code", "source", "import", "require", "module", "default"] {
        if key == "types" {
            continue;
        }
        if let Some(target) = obj.get(key).and_then(Value::as_str) {
            return Some(target.to_string());
        }
    }
    None
}

fn resolve_exports_map(manifest: &Value, dir: &str) -> HashMap<String, String> {
    let mut map = HashMap::new();
    let Some(exports) = manifest.get("exports").and_then(Value::as_object) else {
        return map;
    };
    for (subpath, target) in exports {
        if subpath == "." || subpath == "./package.json" {
            continue;
        }
        if let Some(resolved) = pick_conditional_target(target) {
            let resolved = resolved.trim_start_matches("./");
            let stem = crate::patterns::strip_known_extension(resolved);
            map.insert(subpath.clone(), join_dir(dir, &stem));
        }
    }
    map
}

fn resolve_bin_files(manifest: &Value, dir: &str) -> Vec<String> {
    let mut bins = Vec::new();
    match manifest.get("bin") {
        Some(Value::String(s)) => bins.push(join_dir(dir, s.trim_start_matches("./"))),
        Some(Value::Object(obj)) => {
            for v in obj.values() {
                if let Some(s) = v.as_str() {
                    bins.push(join_dir(dir, s.trim_start_matches("./")));
                }
            }
        }
        _ => {}
    }
    bins
}

fn internal_deps(manifest: &Value) -> Vec<String> {
    let mut deps = Vec::new();
    for field in ["dependencies", "devDependencies", "peerDependencies"] {
        if let Some(obj) = manifest.get(field).and_then(Value::as_object) {
            deps.extend(obj.keys().cloned());
        }
    }
    deps
}

/// Applies the monorepo abandoned-package rule (§4.3): a package's entry
/// point is only a root if another package depends on it, or it depends on
/// another internal package itself.
pub fn retain_non_abandoned_roots(ctx: &ResolutionContext) -> Vec<String> {
    let names: HashMap<&str, &WorkspacePackage> = ctx
        .workspace_packages
        .iter()
        .map(|(name, pkg)| (name.as_str(), pkg))
        .collect();

    let depended_on: std::collections::HashSet<&str> = ctx
        .workspace_packages
        .values()
        .flat_map(|pkg| pkg.internal_dependencies.iter().map(String::as_str))
        .filter(|dep| names.contains_key(dep))
        .collect();

    let mut roots = Vec::new();
    for (name, pkg) in &ctx.workspace_packages {
        let has_internal_deps = pkg
            .internal_dependencies
            .iter()
            .any(|dep| names.contains_key(dep.as_str()));
        if depended_on.contains(name.as_str()) || has_internal_deps {
            if let Some(entry) = &pkg.entry_point {
                if !is_anti_entry(entry) {
                    roots.push(entry.clone());
                }
            }
        }
    }
    roots
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn candidates(paths: &[&str]) -> std::collections::HashSet<String> {
        paths.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn entry_point_falls_back_from_dist_to_src_index() {
        let manifest = json!({ "main": "dist/index.js" });
        let pkg = DiscoveredPackage {
            dir: "packages/lib".to_string(),
            manifest,
        };
        let cands = candidates(&["packages/lib/src/index.ts"]);
        let resolved = index_package(&pkg, Path::new("/proj"), &cands);
        assert_eq!(resolved.entry_point.as_deref(), Some("packages/lib/src/index.ts"));
    }

    #[test]
    fn entry_point_for_the_root_package_has_no_leading_slash() {
        let manifest = json!({ "main": "src/index.ts" });
        let pkg = DiscoveredPackage { dir: String::new(), manifest };
        let cands = candidates(&["src/index.ts"]);
        let resolved = index_package(&pkg, Path::new("/proj"), &cands);
        assert_eq!(resolved.entry_point.as_deref(), Some("src/index.ts"));
    }

    #[test]
    fn exports_map_skips_dot_and_types_condition() {
        let manifest = json!({
            "exports": {
                ".": "./dist/index.js",
                "./sub": { "types": "./dist/sub.d.ts", "import": "./src/sub.ts" }
            }
        });
        let pkg = DiscoveredPackage {
            dir: "packages/lib".to_string(),
            manifest,
        };
        let map = resolve_exports_map(&pkg.manifest, &pkg.dir);
        assert_eq!(map.get("./sub").map(String::as_str), Some("packages/lib/src/sub"));
        assert!(!map.contains_key("."));
    }

    #[test]
    fn abandoned_package_entry_is_not_a_root() {
        let mut ctx = ResolutionContext::new();
        ctx.workspace_packages.insert(
            "legacy-thing".to_string(),
            WorkspacePackage {
                dir: "packages/legacy-thing".to_string(),
                entry_point: Some("packages/legacy-thing/src/index.ts".to_string()),
                exports_map: HashMap::new(),
                bin_files: vec![],
                internal_dependencies: vec![],
            },
        );
        let roots = retain_non_abandoned_roots(&ctx);
        assert!(roots.is_empty());
    }

    #[test]
    fn depended_on_package_entry_is_a_root() {
        let mut ctx = ResolutionContext::new();
        ctx.workspace_packages.insert(
            "lib".to_string(),
            WorkspacePackage {
                dir: "packages/lib".to_string(),
                entry_point: Some("packages/lib/src/index.ts".to_string()),
                exports_map: HashMap::new(),
                bin_files: vec![],
                internal_dependencies: vec![],
            },
        );
        ctx.workspace_packages.insert(
            "app".to_string(),
            WorkspacePackage {
                dir: "packages/app".to_string(),
                entry_point: Some("packages/app/src/main.ts".to_string()),
                exports_map: HashMap::new(),
                bin_files: vec![],
                internal_dependencies: vec!["lib".to_string()],
            },
        );
        let roots = retain_non_abandoned_roots(&ctx);
        assert!(roots.contains(&"packages/lib/src/index.ts".to_string()));
        assert!(roots.contains(&"packages/app/src/main.ts".to_string()));
    }
}
