//! The verdict classifier (§4.7, C7): compares every candidate file against
//! the reachable set the walker produced and builds the evidence-bearing
//! report for each one that isn't.

use deadcode_core::{DeadFileReport, Evidence, FileRecord, Verdict};
use std::collections::{HashMap, HashSet};

/// Per-file size/line-count, stated separately from `FileRecord` since the
/// core's parser contract (§6) carries no filesystem metadata; the engine
/// stats each candidate file and passes the result in here.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileStat {
    pub size_bytes: u64,
    pub line_count: usize,
}

/// Classifies every candidate record not present in `reachable` (entry
/// points are never candidates; the caller is expected to have already
/// excluded them, along with anything `is_builtin_excluded`/generated).
///
/// `dynamic_candidates` maps a path to the dynamic-pattern string it matched
/// (§4.3 source 10 / §4.7 S6): a candidate present there is reported as
/// `PossiblyLive` instead of `Unreachable`.
pub fn classify(
    candidates: &[&FileRecord],
    reachable: &HashSet<String>,
    entry_points: &HashSet<String>,
    dynamic_candidates: &HashMap<String, String>,
    stats: &HashMap<String, FileStat>,
) -> Vec<DeadFileReport> {
    let live_entry_points: Vec<String> = {
        let mut v: Vec<String> = entry_points.iter().filter(|p| reachable.contains(*p)).cloned().collect();
        v.sort();
        v
    };

    candidates
        .iter()
        .filter(|record| !record.parse_failed)
        .filter(|record| !reachable.contains(&record.relative_path))
        .map(|record| {
            let stat = stats.get(&record.relative_path).copied().unwrap_or_default();
            let exports = record.exports.iter().map(|e| e.name.clone()).collect();

            let (verdict, matched_dynamic_pattern) = match dynamic_candidates.get(&record.relative_path) {
                Some(pattern) => (Verdict::PossiblyLive, Some(pattern.clone())),
                None => (Verdict::Unreachable, None),
            };

            DeadFileReport {
                path: record.relative_path.clone(),
                verdict,
                size_bytes: stat.size_bytes,
                line_count: stat.line_count,
                exports,
                evidence: Evidence {
                    entry_points_searched: entry_points.len(),
                    live_entry_points: live_entry_points.clone(),
                    matched_dynamic_pattern,
                },
            }
        })
        .collect()
}
