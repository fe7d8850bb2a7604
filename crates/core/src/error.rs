use thiserror::Error;

/// Result type for deadcode operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for deadcode operations
///
/// Per the error-handling design, most failure modes (bad config files,
/// per-file parse failures, resolver misses) are degraded locally and never
/// surface as an `Err` from a scan. This type exists for the narrow set of
/// conditions a caller cannot proceed past.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O related errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// The project root does not exist or is not a directory
    #[error("Invalid project root: {0}")]
    InvalidProjectRoot(String),

    /// Invalid input passed to a public API
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Internal invariant violation (a bug, not a user-facing condition)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Error::InvalidInput(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Error::Internal(msg.into())
    }
}
