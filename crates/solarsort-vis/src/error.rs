//! Error types for solarsort-vis.

use thiserror::Error;

/// Result type for replay operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while generating or replaying a history.
#[derive(Debug, Error)]
pub enum Error {
    /// History generation failed.
    #[error("history error: {0}")]
    History(#[from] solarsort_history::Error),

    /// A renderer could not play a transition.
    #[error("render error at step {step}: {reason}")]
    Render { step: usize, reason: String },

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
