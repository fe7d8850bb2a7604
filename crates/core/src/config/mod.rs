//! Scan configuration (§6: "Configuration surface").
//!
//! Every field here is optional with a conservative default, so that an
//! empty configuration still produces a safe (recall-biased) scan.

mod defaults;
mod loading;


use serde::{Deserialize, Serialize};

/// Configuration surface from §6, all fields optional with conservative
/// defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Additional glob patterns subtracted from the candidate set.
    pub exclude: Vec<String>,
    /// Additional regexes that, when matched against a file path, force an
    /// `isDynamic=true` entry-point classification.
    pub dynamic_patterns: Vec<String>,
    /// Decorator/annotation names that, when found on a class, make the
    /// declaring file a root.
    pub di_decorators: Vec<String>,
    /// Regexes identifying DI container accesses whose following token is a
    /// class name.
    pub di_container_patterns: Vec<String>,
    /// Manifest field names under which file paths are treated as
    /// additional roots (e.g. a plugin manifest's `plugins` field).
    pub dynamic_package_fields: Vec<String>,
    /// Regexes and content markers that exclude files from the candidate
    /// set entirely (never classified as dead).
    pub generated_patterns: Vec<String>,
    /// When true, delegates entry-point detection to a collaborator that
    /// applies the same rules but exposes a unified extension API. This
    /// implementation's own detector always applies the §4.3 rules; the flag
    /// is honored as a no-op toggle recorded in the result for callers that
    /// layer a unified detector on top (see DESIGN.md).
    pub use_unified_entry_detector: bool,
    /// Size of the parsing worker pool (§5): `min(cores, N)`.
    pub max_parse_workers: usize,
    /// How many files the parsing stage processes before yielding a
    /// progress callback (§5: "the driver yields to the scheduler every N
    /// files").
    pub progress_chunk_size: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        ScanConfig {
            exclude: defaults::default_exclude(),
            dynamic_patterns: Vec::new(),
            di_decorators: defaults::default_di_decorators(),
            di_container_patterns: defaults::default_di_container_patterns(),
            dynamic_package_fields: defaults::default_dynamic_package_fields(),
            generated_patterns: Vec::new(),
            use_unified_entry_detector: false,
            max_parse_workers: defaults::default_max_parse_workers(),
            progress_chunk_size: defaults::default_progress_chunk_size(),
        }
    }
}
