//! Library interface for the `deadcode` CLI.
//!
//! [`ToyParser`] is a line-oriented, regex-based import/export scraper for a
//! handful of languages. It exists only so this workspace is runnable
//! end-to-end without an external parser; it is not a serious
//! implementation of any of the six languages' import syntax, and is not
//! the subject of this project (per-language parsing is an external
//! collaborator's job, out of scope here).

#![deny(warnings)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

pub mod toy_parser;

pub use toy_parser::ToyParser;
