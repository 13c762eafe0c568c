//! Trait definitions for external interactions
//!
//! These traits define the boundary between the pipeline and infrastructure.
//! Provider implementations live in `gazette-llm`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// One request to the text-completion capability
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionRequest {
    /// System instructions describing the task and output shape
    pub system: String,

    /// User content: the document context to work from
    pub user: String,

    /// Upper bound on generated tokens
    pub max_tokens: u32,

    /// Sampling temperature
    pub temperature: f32,
}

impl CompletionRequest {
    /// Create a request
    pub fn new(
        system: impl Into<String>,
        user: impl Into<String>,
        max_tokens: u32,
        temperature: f32,
    ) -> Self {
        Self {
            system: system.into(),
            user: user.into(),
            max_tokens,
            temperature,
        }
    }
}

/// Trait for language-model completion
///
/// Implemented by the infrastructure layer (gazette-llm). Implementations do
/// not retry; the caller bounds each call with its own timeout.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Error type for completion operations
    type Error: std::fmt::Display + Send;

    /// Generate a completion for the request
    async fn complete(&self, request: &CompletionRequest) -> Result<String, Self::Error>;

    /// Model name used for logging and output metadata
    fn model_name(&self) -> &str {
        "llm"
    }
}
