//! Core data model, error type, configuration, and progress/cancellation
//! primitives for the dead-code analyzer.
//!
//! This crate carries no analysis logic of its own: it is the shared
//! vocabulary that `deadcode-resolver`, `deadcode-entrypoints`,
//! `deadcode-reachability`, and `deadcode-engine` all build on.

#![deny(warnings)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

pub mod config;
pub mod entities;
pub mod error;
pub mod patterns;
pub mod progress;
pub mod resolution_context;
pub mod reverse_index;
pub mod verdict;

pub use config::ScanConfig;
pub use entities::{
    Annotation, ClassInfo, Decorator, Export, FileMetadata, FileRecord, Import, ImportKind,
    Language, ModDecl,
};
pub use error::{Error, Result};
pub use patterns::is_anti_entry;
pub use progress::{CancellationToken, Phase, ProgressCallback, ProgressEvent};
pub use resolution_context::{AliasTable, ResolutionContext, WorkspacePackage};
pub use reverse_index::ReverseIndex;
pub use verdict::{DeadFileReport, Evidence, ScanResult, Summary, Verdict};

/// Version of the core library.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
