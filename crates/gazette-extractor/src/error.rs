//! Error types for the Extractor

use thiserror::Error;

/// Errors that can occur during extraction
///
/// Only `InvalidConfiguration` ever reaches the caller of a run. Every other
/// variant is raised by a single pass and recovered by the orchestrator.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExtractorError {
    /// Bad chunking, ranking or pass settings
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The completion provider returned an error
    #[error("Completion error: {0}")]
    Completion(String),

    /// The completion call exceeded its time limit
    #[error("Completion timed out after {0}s")]
    Timeout(u64),

    /// The response does not have the shape the pass asked for
    #[error("Invalid response format: {0}")]
    InvalidFormat(String),

    /// JSON parsing error
    #[error("JSON parse error: {0}")]
    JsonParse(String),

    /// A parsed payload could not be merged into the record
    #[error("Aggregation error: {0}")]
    Aggregation(String),
}

impl From<serde_json::Error> for ExtractorError {
    fn from(e: serde_json::Error) -> Self {
        ExtractorError::JsonParse(e.to_string())
    }
}

impl From<toml::de::Error> for ExtractorError {
    fn from(e: toml::de::Error) -> Self {
        ExtractorError::InvalidConfiguration(format!("Failed to parse TOML: {}", e))
    }
}
