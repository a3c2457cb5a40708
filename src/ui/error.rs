//! UI error types

use thiserror::Error;

/// Errors that can occur in UI operations
#[derive(Debug, Error)]
pub enum UiError {
    /// The rendering backend reported a failure
    #[error("UI backend failure: {0}")]
    Backend(String),

    /// IO error during UI operations
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// The selector was entered with nothing to select
    #[error("Cannot show the ROM selector for an empty library")]
    EmptyCatalog,
}

/// Result type for UI operations
pub type Result<T> = std::result::Result<T, UiError>;
