//! Error types for solarsort-history.

use thiserror::Error;

/// Result type for history generation.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while generating a history.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// An item cannot take part in comparisons (e.g. a NaN order key).
    #[error("invalid input at index {index}: {reason}")]
    InvalidInput { index: usize, reason: String },

    /// No algorithm is registered under the given name.
    #[error("unknown algorithm: {0}")]
    UnknownAlgorithm(String),
}
