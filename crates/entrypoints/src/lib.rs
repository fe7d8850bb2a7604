//! The entry-point detector (C3, §4.3): unions ten root-detection sources,
//! then applies the monorepo abandoned-package rule.

#![deny(warnings)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

pub mod bundler_ci;
pub mod decorators;
pub mod di_container;
pub mod directory_scan;
pub mod filename_patterns;
pub mod html;
pub mod manifest_entries;
pub mod metadata_hints;

use deadcode_core::{ReverseIndex, ScanConfig};
use regex::Regex;
use std::collections::{HashMap, HashSet};

/// All ten root-detection sources' output, plus the files that were
/// excluded by the monorepo abandoned-package rule from what would
/// otherwise have been roots.
pub struct EntryPointResult {
    pub roots: HashSet<String>,
    /// Roots a matching `dynamicPatterns` entry also applies to, kept
    /// separate so the reachability/classification stages can treat them as
    /// `possibly-live` rather than plain entry points when they are *not*
    /// actually reached any other way (§4.7, S6).
    pub dynamic_candidates: HashMap<String, String>,
}

/// Runs the detector over every candidate file plus whatever declarative
/// inputs the caller already extracted (HTML sources, bundler config
/// sources, raw file text for the DI-container scan).
///
/// The source-text maps supply file text for the sources that need to scan
/// content directly: `html_sources` (script tags), `bundler_config_sources`
/// (bundler/CI declared entries), `manifest_sources` (every `package.json`,
/// keyed by its own path, for `dynamic_package_fields`), and `source_texts`
/// (every candidate source file's text, for DI-container references and
/// directory auto-loaders, both of which live in application code rather
/// than config). Callers pass whatever subset they have discovered; a
/// source with no matching text in a map contributes nothing, per
/// §4.1/§4.3's "a missing config yields an empty contribution" failure
/// semantics.
pub fn detect_entry_points(
    ctx: &deadcode_core::ResolutionContext,
    index: &ReverseIndex,
    config: &ScanConfig,
    script_command_roots: &HashSet<String>,
    html_sources: &HashMap<String, String>,
    bundler_config_sources: &HashMap<String, String>,
    manifest_sources: &HashMap<String, String>,
    source_texts: &HashMap<String, String>,
) -> EntryPointResult {
    let mut roots: HashSet<String> = HashSet::new();

    // 1. Manifest entries.
    roots.extend(manifest_entries::manifest_roots(ctx));

    // 2. Script commands: scraped by deadcode-resolver's runner-pattern
    // scanner (`deadcode_resolver::patterns::extract_script_roots`) against
    // each package's raw manifest `scripts` object before this detector
    // runs, since that scan needs the unparsed manifest JSON this crate
    // does not otherwise see.
    roots.extend(script_command_roots.iter().cloned());

    // 3. HTML script tags.
    for (html_path, source) in html_sources {
        let html_dir = html_path.rfind('/').map(|i| &html_path[..i]).unwrap_or("");
        roots.extend(html::script_roots_from_html(source, html_dir));
    }

    // 4. Bundler/CI declared entries.
    for (config_path, source) in bundler_config_sources {
        let config_dir = config_path.rfind('/').map(|i| &config_path[..i]).unwrap_or("");
        roots.extend(bundler_ci::declared_entries(source, config_dir));
    }

    let decorator_names: HashSet<&str> = config.di_decorators.iter().map(String::as_str).collect();
    let container_patterns = di_container::compile_patterns(&config.di_container_patterns);

    let mut class_to_file: HashMap<&str, &str> = HashMap::new();
    for record in index.iter() {
        if let Some(class) = record.classes.first() {
            class_to_file.insert(class.name.as_str(), record.relative_path.as_str());
        }
    }

    for record in index.iter() {
        // 5. Filename convention.
        if filename_patterns::is_filename_convention_root(&record.relative_path) {
            roots.insert(record.relative_path.clone());
        }

        // 6. Parser-metadata hints.
        if metadata_hints::is_metadata_root(record) {
            roots.insert(record.relative_path.clone());
        }

        // 7. Decorator/annotation hints.
        if decorators::is_decorator_root(record, &decorator_names) {
            roots.insert(record.relative_path.clone());
        }
    }

    let mut dynamic_candidates = HashMap::new();
    let dynamic_regexes: Vec<Regex> = config
        .dynamic_patterns
        .iter()
        .filter_map(|p| Regex::new(p).ok())
        .collect();
    for record in index.iter() {
        for pattern in &dynamic_regexes {
            if pattern.is_match(&record.relative_path) {
                dynamic_candidates.insert(record.relative_path.clone(), pattern.as_str().to_string());
            }
        }
    }

    // 8 and 9 run over every candidate source file's text: DI-container
    // wiring and directory-require auto-loaders both live in application
    // code, not config.
    for (path, source) in source_texts {
        roots.extend(
            di_container::roots_from_container_references(source, &container_patterns, &class_to_file)
                .into_iter()
                .map(str::to_string),
        );
        if directory_scan::is_directory_auto_loader(source) {
            roots.extend(directory_scan::siblings_of(index, path));
        }
    }

    // 10. Configured dynamic-package-field roots: a manifest field like
    // `plugins` whose value is an array of file paths, resolved relative to
    // the declaring manifest's own directory (§6 configuration surface).
    if !config.dynamic_package_fields.is_empty() {
        for (manifest_path, source) in manifest_sources {
            let manifest_dir = manifest_path.rfind('/').map(|i| &manifest_path[..i]).unwrap_or("");
            let Ok(manifest) = serde_json::from_str::<serde_json::Value>(source) else {
                continue;
            };
            for field in &config.dynamic_package_fields {
                let Some(values) = manifest.get(field).and_then(serde_json::Value::as_array) else {
                    continue;
                };
                for value in values {
                    if let Some(path) = value.as_str() {
                        roots.insert(join_dir(manifest_dir, path));
                    }
                }
            }
        }
    }

    // Monorepo abandoned-package rule: a package's primary entry is only
    // kept as a root with bidirectional evidence of integration. The
    // project root's own package (dir == "") is never "abandoned" — there
    // is nothing else for it to be integrated with — so it is exempt.
    let manifest_entry_points: HashSet<String> = ctx
        .workspace_packages
        .values()
        .filter(|pkg| !pkg.dir.is_empty())
        .filter_map(|pkg| pkg.entry_point.clone())
        .collect();
    let non_abandoned: HashSet<String> = deadcode_resolver::retain_non_abandoned_roots(ctx).into_iter().collect();
    roots.retain(|r| !manifest_entry_points.contains(r) || non_abandoned.contains(r));

    EntryPointResult {
        roots,
        dynamic_candidates,
    }
}

/// Joins a manifest's own directory and a field value from that manifest,
/// treating the empty string (the project root's manifest) as "no prefix".
fn join_dir(dir: &str, rest: &str) -> String {
    if dir.is_empty() {
        rest.to_string()
    } else {
        format!("{dir}/{rest}")
    }
}

/// Built-in, always-on exclusion heuristics (§4): files that are
/// conservatively treated as excluded-generated rather than dead,
/// independent of and in addition to user-supplied `generatedPatterns`.
pub fn is_builtin_excluded(path: &str, generated_patterns: &[Regex]) -> bool {
    const BUILTIN_SUBSTRINGS: &[&str] = &[".d.ts", "__tests__/", "__mocks__/", "__fixtures__/"];
    if BUILTIN_SUBSTRINGS.iter().any(|s| path.contains(s)) {
        return true;
    }
    if path.rsplit('/').next().map(|n| n.contains(".config.")).unwrap_or(false) {
        return true;
    }
    generated_patterns.iter().any(|p| p.is_match(path))
}
