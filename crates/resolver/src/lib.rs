//! The resolver family (C1, C2, C4, C5): turns textual module specifiers
//! into concrete candidate files, and builds the lookup structures
//! `deadcode-reachability`'s walker depends on.
//!
//! Nothing in this crate touches the filesystem except alias/workspace
//! *extraction*, which runs once before a scan's reachability phase begins;
//! [`resolve::resolve`] itself only ever queries the in-memory
//! [`deadcode_core::ReverseIndex`].

#![deny(warnings)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

pub mod alias;
pub mod index;
pub mod patterns;
pub mod resolve;
pub mod workspace;

pub use index::build_reverse_index;
pub use resolve::resolve;
pub use workspace::{discover_workspace_packages, index_package, retain_non_abandoned_roots, DiscoveredPackage};
