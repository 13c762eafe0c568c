//! Editor error types

use thiserror::Error;

/// Errors that can occur while setting up the editor
#[derive(Error, Debug)]
pub enum EditorError {
    /// A rewrite or detection pattern failed to compile
    #[error("Pattern error: {0}")]
    Pattern(#[from] regex::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
