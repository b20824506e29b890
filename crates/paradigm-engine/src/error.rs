//! Error types for engine operations

use thiserror::Error;

/// Errors that can occur while invoking a transformation engine
#[derive(Error, Debug)]
pub enum EngineError {
    /// Engine executable could not be found or started
    #[error("Engine unavailable: {0}")]
    Unavailable(String),

    /// IO error while talking to the engine process
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Engine ran but reported failure
    #[error("Engine failed (exit code {code:?}): {message}")]
    Failed {
        code: Option<i32>,
        message: String,
    },

    /// Engine produced output that is not valid UTF-8 text
    #[error("Engine produced invalid output: {0}")]
    InvalidOutput(String),
}

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;
