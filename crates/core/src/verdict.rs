//! Classification output (§4.7, §6): the verdict assigned to each dead file
//! and the overall result shape returned from a scan.

use serde::{Deserialize, Serialize};

/// One of the three verdicts a dead file can carry (§4.7).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Verdict {
    /// High confidence: not reachable, no dynamic pattern came close.
    Unreachable,
    /// Matched a dynamic-loading pattern closely but the pattern did not
    /// actually fire as a root.
    PossiblyLive,
    /// At least one export is imported elsewhere but the file as a whole is
    /// not reached. Reserved for future export-level analysis (§4.7); never
    /// produced by this implementation since export-level reachability is
    /// out of scope, but the variant is part of the public result shape.
    PartiallyUnreachable,
}

/// Evidence attached to a dead-file report, for a human to sanity-check a
/// verdict without re-running the tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Evidence {
    /// Number of entry points the walker searched from.
    pub entry_points_searched: usize,
    /// The entry points that were live at scan time (supplemental to the
    /// bare count required by §4.7, for audit trails).
    pub live_entry_points: Vec<String>,
    /// The dynamic pattern that matched closely but did not fire, present
    /// only for `PossiblyLive` verdicts.
    pub matched_dynamic_pattern: Option<String>,
}

/// A single dead (or possibly-live) file's report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeadFileReport {
    pub path: String,
    pub verdict: Verdict,
    pub size_bytes: u64,
    pub line_count: usize,
    pub exports: Vec<String>,
    pub evidence: Evidence,
}

/// Aggregate counts over a scan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Summary {
    pub candidate_count: usize,
    pub entry_point_count: usize,
    pub reachable_count: usize,
    pub fully_dead_count: usize,
    pub partially_dead_count: usize,
    pub skipped_dynamic_count: usize,
    pub excluded_generated_count: usize,
    pub total_dead_bytes: u64,
}

/// The complete result of a scan (§6: Result shape).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScanResult {
    pub fully_dead_files: Vec<DeadFileReport>,
    pub partially_dead_files: Vec<DeadFileReport>,
    pub skipped_dynamic: Vec<DeadFileReport>,
    pub excluded_generated: Vec<String>,
    pub entry_points: Vec<String>,
    pub summary: Summary,
}

impl ScanResult {
    /// Sort every verdict bucket per §5's ordering guarantee: descending
    /// size, lexical tiebreak on path.
    pub fn sort_deterministically(&mut self) {
        let sorter = |a: &DeadFileReport, b: &DeadFileReport| {
            b.size_bytes
                .cmp(&a.size_bytes)
                .then_with(|| a.path.cmp(&b.path))
        };
        self.fully_dead_files.sort_by(sorter);
        self.partially_dead_files.sort_by(sorter);
        self.skipped_dynamic.sort_by(sorter);
        self.excluded_generated.sort();
        self.entry_points.sort();
    }

    /// A stable fingerprint over the sorted result, used by tests to check
    /// §8 property 7 (two runs on an unchanged project are byte-identical).
    pub fn content_hash(&self) -> u64 {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        for report in &self.fully_dead_files {
            report.path.hash(&mut hasher);
            (report.verdict as u8 as u64).hash(&mut hasher);
        }
        for report in &self.partially_dead_files {
            report.path.hash(&mut hasher);
        }
        for report in &self.skipped_dynamic {
            report.path.hash(&mut hasher);
        }
        self.entry_points.hash(&mut hasher);
        self.excluded_generated.hash(&mut hasher);
        hasher.finish()
    }
}
