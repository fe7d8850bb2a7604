//! JavaScript/TypeScript resolution (§4.5).

use deadcode_core::patterns::PLATFORM_SUFFIXES;
use deadcode_core::{Import, ResolutionContext, ReverseIndex};

pub fn resolve(ctx: &ResolutionContext, index: &ReverseIndex, from_file: &str, import: &Import) -> Vec<String> {
    let module = &import.module;
    let from_dir = dirname(from_file);

    if module == "." || module.starts_with("./") || module.starts_with("../") {
        return final_match(index, &join_relative(from_dir, module));
    }
    if let Some(rest) = module.strip_prefix('/') {
        if let Some(base_url) = ctx.base_url_for_dir(from_dir) {
            return final_match(index, &join(base_url, rest));
        }
        return Vec::new();
    }

    for candidate in bare_specifier_candidates(ctx, from_dir, module) {
        let hits = final_match(index, &candidate);
        if !hits.is_empty() {
            return hits;
        }
    }
    Vec::new()
}

/// Every target worth trying for a bare specifier, in priority order:
/// alias tables longest-prefix-first, workspace exports map, dist-to-src
/// rewrites, `dir/subpath` and `dir/src/subpath` fallbacks, then baseUrl.
fn bare_specifier_candidates(ctx: &ResolutionContext, from_dir: &str, module: &str) -> Vec<String> {
    let mut candidates = Vec::new();

    let aliases = ctx.aliases_for_dir(from_dir);
    if let Some((target_prefix, rest)) = aliases.resolve(module) {
        candidates.push(join(&target_prefix, rest));
    }

    for (name, pkg) in &ctx.workspace_packages {
        if module == name.as_str() {
            if let Some(entry) = &pkg.entry_point {
                candidates.push(entry.clone());
            }
            continue;
        }
        if let Some(subpath) = module.strip_prefix(&format!("{name}/")) {
            let export_key = format!("./{subpath}");
            if let Some(target) = pkg.exports_map.get(&export_key) {
                candidates.push(target.clone());
            }
            let joined = join(&pkg.dir, subpath);
            candidates.extend(crate::patterns::build_to_source_candidates(&joined));
            candidates.push(joined);
            candidates.push(join(&pkg.dir, &format!("src/{subpath}")));
        }
    }

    if let Some(base_url) = ctx.base_url_for_dir(from_dir) {
        candidates.push(join(base_url, module));
    }

    candidates
}

fn final_match(index: &ReverseIndex, target: &str) -> Vec<String> {
    if index.contains_path(target) {
        return vec![target.to_string()];
    }
    let stem_matches = index.by_stem(target);
    if !stem_matches.is_empty() {
        return stem_matches.to_vec();
    }
    let with_index = format!("{target}/index");
    let index_matches = index.by_stem(&with_index);
    if !index_matches.is_empty() {
        return index_matches.to_vec();
    }
    for suffix in PLATFORM_SUFFIXES {
        let suffixed = format!("{target}{suffix}");
        let matches = index.by_stem(&suffixed);
        if !matches.is_empty() {
            return matches.to_vec();
        }
    }
    Vec::new()
}

fn dirname(path: &str) -> &str {
    path.rfind('/').map(|i| &path[..i]).unwrap_or("")
}

fn join_relative(from_dir: &str, module: &str) -> String {
    let mut segments: Vec<&str> = if from_dir.is_empty() {
        Vec::new()
    } else {
        from_dir.split('/').collect()
    };
    for part in module.split('/') {
        match part {
            "." | "" => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }
    segments.join("/")
}

fn join(base: &str, rest: &str) -> String {
    let base = base.trim_end_matches('/');
    let rest = rest.trim_start_matches('/');
    if base.is_empty() {
        rest.to_string()
    } else if rest.is_empty() {
        base.to_string()
    } else {
        format!("{base}/{rest}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use deadcode_core::{AliasTable, FileRecord, ImportKind, Language};

    fn import(module: &str) -> Import {
        Import {
            module: module.to_string(),
            kind: ImportKind::EsFrom,
            name: None,
            is_glob: false,
            line: 1,
        }
    }

    #[test]
    fn resolves_relative_import_to_sibling_file() {
        let mut index = ReverseIndex::new();
        index.insert(FileRecord::empty("src/b.ts", Language::TypeScript));
        let ctx = ResolutionContext::new();
        let result = resolve(&ctx, &index, "src/a.ts", &import("./b"));
        assert_eq!(result, vec!["src/b.ts".to_string()]);
    }

    #[test]
    fn resolves_alias_prefix_longest_match_first() {
        let mut index = ReverseIndex::new();
        index.insert(FileRecord::empty("src/util.ts", Language::TypeScript));
        let mut ctx = ResolutionContext::new();
        ctx.global_aliases.insert("@/", "src/");
        let result = resolve(&ctx, &index, "src/app.ts", &import("@/util"));
        assert_eq!(result, vec!["src/util.ts".to_string()]);
    }

    #[test]
    fn unresolved_bare_specifier_is_treated_as_external() {
        let ctx = ResolutionContext::new();
        let index = ReverseIndex::new();
        assert!(resolve(&ctx, &index, "src/app.ts", &import("react")).is_empty());
    }

    #[test]
    fn falls_back_to_index_file_for_directory_import() {
        let mut index = ReverseIndex::new();
        index.insert(FileRecord::empty("src/widgets/index.ts", Language::TypeScript));
        let ctx = ResolutionContext::new();
        let result = resolve(&ctx, &index, "src/app.ts", &import("./widgets"));
        assert_eq!(result, vec!["src/widgets/index.ts".to_string()]);
    }

    #[test]
    fn workspace_package_name_resolves_via_entry_point() {
        let mut index = ReverseIndex::new();
        index.insert(FileRecord::empty("packages/lib/src/index.ts", Language::TypeScript));
        let mut ctx = ResolutionContext::new();
        ctx.workspace_packages.insert(
            "lib".to_string(),
            deadcode_core::WorkspacePackage {
                dir: "packages/lib".to_string(),
                entry_point: Some("packages/lib/src/index.ts".to_string()),
                exports_map: Default::default(),
                bin_files: vec![],
                internal_dependencies: vec![],
            },
        );
        let result = resolve(&ctx, &index, "packages/app/src/main.ts", &import("lib"));
        assert_eq!(result, vec!["packages/lib/src/index.ts".to_string()]);
    }

    #[test]
    fn package_alias_overrides_global_for_nested_dir() {
        let mut index = ReverseIndex::new();
        index.insert(FileRecord::empty("packages/app/src/util.ts", Language::TypeScript));
        let mut ctx = ResolutionContext::new();
        ctx.global_aliases.insert("@/", "src/");
        let mut pkg_table = AliasTable::new();
        pkg_table.insert("@/", "packages/app/src/");
        ctx.package_aliases.insert("packages/app".to_string(), pkg_table);
        let result = resolve(&ctx, &index, "packages/app/src/main.ts", &import("@/util"));
        assert_eq!(result, vec!["packages/app/src/util.ts".to_string()]);
    }
}
