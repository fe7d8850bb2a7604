//! The public `scan()` entry point (§5): discovery → parsing → context
//! build → reachability → classification, with progress callbacks at every
//! phase boundary and a cooperative cancellation check between phases.

use deadcode_core::{
    CancellationToken, Error, FileRecord, Phase, ProgressCallback, ProgressEvent, Result, ScanConfig, ScanResult,
    Summary,
};
use rayon::prelude::*;
use std::collections::{HashMap, HashSet};
use std::path::Path;

/// The parser contract (§6): given a
/// file's relative path and raw bytes, return a parsed record, or a
/// `parse_failure` record if the content could not be understood. Never
/// panics; a parser that cannot recognize a file should return
/// `FileRecord::parse_failure`, not an error, since per-file parse failure
/// is a degraded-locally condition (§7), not a scan-ending one.
pub trait FileParser: Send + Sync {
    fn parse(&self, relative_path: &str, contents: &[u8]) -> FileRecord;
}

/// Runs a complete scan over `project_root`. `progress` and `cancellation`
/// are both optional observation points; a caller that doesn't need either
/// can pass `None`/a fresh, never-cancelled token.
pub fn scan(
    project_root: &Path,
    config: &ScanConfig,
    parser: &dyn FileParser,
    mut progress: Option<ProgressCallback<'_>>,
    cancellation: &CancellationToken,
) -> Result<ScanResult> {
    if !project_root.is_dir() {
        return Err(Error::InvalidProjectRoot(project_root.display().to_string()));
    }

    // --- Discovery ---
    let source_paths = crate::discovery::discover_source_files(project_root, config);
    let config_paths = crate::discovery::discover_config_files(project_root);
    emit(
        &mut progress,
        ProgressEvent::new(Phase::Discovery, source_paths.len(), source_paths.len(), "enumerated candidate files"),
    );
    if cancellation.is_cancelled() {
        return Ok(ScanResult::default());
    }

    let config_sources: HashMap<String, String> = config_paths
        .iter()
        .filter_map(|path| std::fs::read_to_string(project_root.join(path)).ok().map(|s| (path.clone(), s)))
        .collect();
    let html_sources: HashMap<String, String> = config_sources
        .iter()
        .filter(|(path, _)| path.ends_with(".html"))
        .map(|(path, src)| (path.clone(), src.clone()))
        .collect();

    // --- Parsing (§5: worker pool sized min(cores, max_parse_workers)) ---
    let workers = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
        .min(config.max_parse_workers.max(1));
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .build()
        .map_err(|e| Error::internal(e.to_string()))?;

    let chunk_size = config.progress_chunk_size.max(1);
    let total = source_paths.len();
    let mut records: Vec<FileRecord> = Vec::with_capacity(total);
    let mut stats: HashMap<String, deadcode_reachability::FileStat> = HashMap::new();
    // Kept for entry-point sources 8/9 (DI-container references, directory
    // auto-loaders), which scan application source text rather than config
    // files.
    let mut source_texts: HashMap<String, String> = HashMap::new();

    for (chunk_idx, chunk) in source_paths.chunks(chunk_size).enumerate() {
        if cancellation.is_cancelled() {
            return Ok(ScanResult::default());
        }
        let parsed: Vec<(FileRecord, deadcode_reachability::FileStat, String)> = pool.install(|| {
            chunk
                .par_iter()
                .map(|relative_path| {
                    let bytes = std::fs::read(project_root.join(relative_path)).unwrap_or_default();
                    let size_bytes = bytes.len() as u64;
                    let line_count = bytes.iter().filter(|b| **b == b'\n').count() + 1;
                    let text = String::from_utf8_lossy(&bytes).into_owned();
                    let record = parser.parse(relative_path, &bytes);
                    (record, deadcode_reachability::FileStat { size_bytes, line_count }, text)
                })
                .collect()
        });
        for (record, stat, text) in parsed {
            stats.insert(record.relative_path.clone(), stat);
            source_texts.insert(record.relative_path.clone(), text);
            records.push(record);
        }
        emit(
            &mut progress,
            ProgressEvent::new(Phase::Parsing, (chunk_idx + 1) * chunk_size, total, "parsed source files"),
        );
    }
    if cancellation.is_cancelled() {
        return Ok(ScanResult::default());
    }

    // --- Context build (C1/C2) ---
    let candidate_paths: HashSet<String> = source_paths.iter().cloned().collect();
    let ctx = crate::context::build_resolution_context(project_root, &candidate_paths, &config_sources);
    emit(
        &mut progress,
        ProgressEvent::new(Phase::ContextBuild, ctx.workspace_packages.len(), ctx.workspace_packages.len(), "built resolution context"),
    );
    if cancellation.is_cancelled() {
        return Ok(ScanResult::default());
    }

    let index = deadcode_resolver::build_reverse_index(records, &ctx.java_source_roots);

    // --- Entry-point detection (C3) ---
    let mut script_command_roots: HashSet<String> = HashSet::new();
    if let Some(root_manifest_src) = config_sources.get("package.json") {
        if let Ok(manifest) = serde_json::from_str::<serde_json::Value>(root_manifest_src) {
            if let Some(scripts) = manifest.get("scripts").and_then(serde_json::Value::as_object) {
                script_command_roots.extend(deadcode_resolver::patterns::extract_script_roots(scripts, ""));
            }
        }
    }
    let bundler_config_sources: HashMap<String, String> = config_sources
        .iter()
        .filter(|(path, _)| !path.ends_with(".html") && path.rsplit('/').next().map(|n| n != "package.json").unwrap_or(true))
        .map(|(path, src)| (path.clone(), src.clone()))
        .collect();
    let manifest_sources: HashMap<String, String> = config_sources
        .iter()
        .filter(|(path, _)| path.rsplit('/').next().map(|n| n == "package.json").unwrap_or(false))
        .map(|(path, src)| (path.clone(), src.clone()))
        .collect();

    let entry_result = deadcode_entrypoints::detect_entry_points(
        &ctx,
        &index,
        config,
        &script_command_roots,
        &html_sources,
        &bundler_config_sources,
        &manifest_sources,
        &source_texts,
    );

    // --- Reachability (C6) ---
    let pre_seeded = deadcode_reachability::pre_seeded_reachable(&index, &source_texts);
    let reachable = deadcode_reachability::walk(&ctx, &index, &entry_result.roots, &pre_seeded, &HashMap::new());
    emit(
        &mut progress,
        ProgressEvent::new(Phase::Reachability, reachable.len(), index.len(), "walked reachable set"),
    );
    if cancellation.is_cancelled() {
        return Ok(ScanResult::default());
    }

    // --- Classification (C7) ---
    let generated_regexes: Vec<regex::Regex> = config.generated_patterns.iter().filter_map(|p| regex::Regex::new(p).ok()).collect();
    let mut excluded_generated: Vec<String> = Vec::new();
    let mut eligible: Vec<&FileRecord> = Vec::new();
    for record in index.iter() {
        if entry_result.roots.contains(&record.relative_path) {
            continue;
        }
        if deadcode_entrypoints::is_builtin_excluded(&record.relative_path, &generated_regexes) {
            excluded_generated.push(record.relative_path.clone());
            continue;
        }
        eligible.push(record);
    }

    let reports = deadcode_reachability::classify(&eligible, &reachable, &entry_result.roots, &entry_result.dynamic_candidates, &stats);
    emit(
        &mut progress,
        ProgressEvent::new(Phase::Classification, reports.len(), eligible.len(), "classified dead files"),
    );

    let mut result = ScanResult {
        entry_points: entry_result.roots.iter().cloned().collect(),
        excluded_generated,
        ..ScanResult::default()
    };
    let mut total_dead_bytes = 0u64;
    for report in reports {
        total_dead_bytes += match report.verdict {
            deadcode_core::Verdict::Unreachable => report.size_bytes,
            _ => 0,
        };
        match report.verdict {
            deadcode_core::Verdict::Unreachable => result.fully_dead_files.push(report),
            deadcode_core::Verdict::PossiblyLive => result.skipped_dynamic.push(report),
            deadcode_core::Verdict::PartiallyUnreachable => result.partially_dead_files.push(report),
        }
    }

    result.summary = Summary {
        candidate_count: candidate_paths.len(),
        entry_point_count: result.entry_points.len(),
        reachable_count: reachable.len(),
        fully_dead_count: result.fully_dead_files.len(),
        partially_dead_count: result.partially_dead_files.len(),
        skipped_dynamic_count: result.skipped_dynamic.len(),
        excluded_generated_count: result.excluded_generated.len(),
        total_dead_bytes,
    };
    result.sort_deterministically();

    Ok(result)
}

fn emit(progress: &mut Option<ProgressCallback<'_>>, event: ProgressEvent) {
    tracing::info!(phase = event.phase.label(), percent = event.percent, "phase progress");
    if let Some(cb) = progress.as_mut() {
        cb(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use deadcode_core::{Import, ImportKind, Language};
    use std::fs;
    use tempfile::TempDir;

    struct LineImportParser;

    impl FileParser for LineImportParser {
        fn parse(&self, relative_path: &str, contents: &[u8]) -> FileRecord {
            let text = String::from_utf8_lossy(contents);
            let mut record = FileRecord::empty(relative_path, Language::TypeScript);
            for (line_no, line) in text.lines().enumerate() {
                if let Some(rest) = line.trim().strip_prefix("import ") {
                    if let Some(spec) = rest.split('"').nth(1) {
                        record.imports.push(Import {
                            module: spec.to_string(),
                            kind: ImportKind::EsFrom,
                            name: None,
                            is_glob: false,
                            line: line_no as u32 + 1,
                        });
                    }
                }
            }
            record
        }
    }

    #[test]
    fn scan_reports_an_unreferenced_file_as_dead() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("src")).unwrap();
        fs::write(root.join("src/index.ts"), "import \"./used\"\n").unwrap();
        fs::write(root.join("src/used.ts"), "").unwrap();
        fs::write(root.join("src/orphan.ts"), "").unwrap();
        fs::write(
            root.join("package.json"),
            r#"{ "name": "demo", "main": "src/index.ts" }"#,
        )
        .unwrap();

        let config = ScanConfig::default();
        let result = scan(root, &config, &LineImportParser, None, &CancellationToken::new()).unwrap();

        let dead_paths: Vec<&str> = result.fully_dead_files.iter().map(|r| r.path.as_str()).collect();
        assert!(dead_paths.contains(&"src/orphan.ts"));
        assert!(!dead_paths.contains(&"src/used.ts"));
    }

    #[test]
    fn invalid_project_root_is_an_error() {
        let config = ScanConfig::default();
        let result = scan(Path::new("/does/not/exist"), &config, &LineImportParser, None, &CancellationToken::new());
        assert!(result.is_err());
    }

    #[test]
    fn tsconfig_path_alias_resolves_import_across_the_whole_pipeline() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("src/lib")).unwrap();
        fs::write(root.join("src/app.ts"), "import \"@/lib/util\"\n").unwrap();
        fs::write(root.join("src/lib/util.ts"), "").unwrap();
        fs::write(root.join("src/orphan.ts"), "").unwrap();
        fs::write(
            root.join("tsconfig.json"),
            r#"{ "compilerOptions": { "baseUrl": ".", "paths": { "@/*": ["src/*"] } } }"#,
        )
        .unwrap();
        fs::write(root.join("package.json"), r#"{ "name": "demo", "main": "src/app.ts" }"#).unwrap();

        let config = ScanConfig::default();
        let result = scan(root, &config, &LineImportParser, None, &CancellationToken::new()).unwrap();

        let dead_paths: Vec<&str> = result.fully_dead_files.iter().map(|r| r.path.as_str()).collect();
        assert!(dead_paths.contains(&"src/orphan.ts"));
        assert!(!dead_paths.contains(&"src/lib/util.ts"));
    }

    #[test]
    fn workspace_package_main_redirects_dist_to_source_and_resolves_across_packages() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("packages/lib/src")).unwrap();
        fs::create_dir_all(root.join("packages/app/src")).unwrap();
        fs::write(root.join("package.json"), r#"{ "name": "mono", "workspaces": ["packages/*"] }"#).unwrap();
        fs::write(
            root.join("packages/lib/package.json"),
            r#"{ "name": "lib", "main": "dist/index.js" }"#,
        )
        .unwrap();
        fs::write(root.join("packages/lib/src/index.ts"), "").unwrap();
        fs::write(root.join("packages/lib/src/orphan.ts"), "").unwrap();
        fs::write(
            root.join("packages/app/package.json"),
            r#"{ "name": "app", "main": "src/main.ts", "dependencies": { "lib": "*" } }"#,
        )
        .unwrap();
        fs::write(root.join("packages/app/src/main.ts"), "import \"lib\"\n").unwrap();

        let config = ScanConfig::default();
        let result = scan(root, &config, &LineImportParser, None, &CancellationToken::new()).unwrap();

        let dead_paths: Vec<&str> = result.fully_dead_files.iter().map(|r| r.path.as_str()).collect();
        assert!(dead_paths.contains(&"packages/lib/src/orphan.ts"));
        assert!(!dead_paths.contains(&"packages/lib/src/index.ts"));
    }

    #[test]
    fn dynamic_pattern_match_yields_possibly_live_instead_of_dead() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("src/plugins")).unwrap();
        fs::write(root.join("src/index.ts"), "").unwrap();
        fs::write(root.join("src/plugins/audit.ts"), "").unwrap();
        fs::write(root.join("package.json"), r#"{ "name": "demo", "main": "src/index.ts" }"#).unwrap();

        let mut config = ScanConfig::default();
        config.dynamic_patterns = vec!["plugins/".to_string()];
        let result = scan(root, &config, &LineImportParser, None, &CancellationToken::new()).unwrap();

        let dead_paths: Vec<&str> = result.fully_dead_files.iter().map(|r| r.path.as_str()).collect();
        let possibly_live_paths: Vec<&str> = result.skipped_dynamic.iter().map(|r| r.path.as_str()).collect();
        assert!(!dead_paths.contains(&"src/plugins/audit.ts"));
        assert!(possibly_live_paths.contains(&"src/plugins/audit.ts"));
    }

    #[test]
    fn directory_auto_loader_token_in_application_source_keeps_siblings_alive() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("src/plugins")).unwrap();
        fs::write(root.join("src/index.ts"), "import \"./plugins\"\n").unwrap();
        fs::write(
            root.join("src/plugins/index.ts"),
            "const ctx = require.context('./', false);\n",
        )
        .unwrap();
        fs::write(root.join("src/plugins/audit.ts"), "").unwrap();
        fs::write(root.join("package.json"), r#"{ "name": "demo", "main": "src/index.ts" }"#).unwrap();

        let config = ScanConfig::default();
        let result = scan(root, &config, &LineImportParser, None, &CancellationToken::new()).unwrap();

        let dead_paths: Vec<&str> = result.fully_dead_files.iter().map(|r| r.path.as_str()).collect();
        assert!(!dead_paths.contains(&"src/plugins/audit.ts"));
    }

    #[test]
    fn dynamic_package_field_in_manifest_keeps_listed_file_alive() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("src/plugins")).unwrap();
        fs::write(root.join("src/index.ts"), "").unwrap();
        fs::write(root.join("src/plugins/audit.ts"), "").unwrap();
        fs::write(
            root.join("package.json"),
            r#"{ "name": "demo", "main": "src/index.ts", "plugins": ["src/plugins/audit.ts"] }"#,
        )
        .unwrap();

        let mut config = ScanConfig::default();
        config.dynamic_package_fields = vec!["plugins".to_string()];
        let result = scan(root, &config, &LineImportParser, None, &CancellationToken::new()).unwrap();

        let dead_paths: Vec<&str> = result.fully_dead_files.iter().map(|r| r.path.as_str()).collect();
        assert!(!dead_paths.contains(&"src/plugins/audit.ts"));
    }
}
