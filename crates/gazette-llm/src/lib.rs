//! Gazette LLM Provider Layer
//!
//! Pluggable completion providers behind the `CompletionProvider` trait from
//! `gazette-domain`.
//!
//! # Providers
//!
//! - `MockProvider`: Deterministic fake for testing
//! - `OpenAiProvider`: OpenAI-compatible chat completions API
//! - `OllamaProvider`: Local Ollama chat API
//!
//! # Examples
//!
//! ```
//! use gazette_llm::MockProvider;
//! use gazette_domain::{CompletionProvider, CompletionRequest};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let provider = MockProvider::new("Hello from LLM!");
//! let request = CompletionRequest::new("system", "user", 100, 0.3);
//! assert_eq!(provider.complete(&request).await.unwrap(), "Hello from LLM!");
//! # }
//! ```

#![warn(missing_docs)]

pub mod ollama;
pub mod openai;

use async_trait::async_trait;
use gazette_domain::{CompletionProvider, CompletionRequest};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use thiserror::Error;

pub use ollama::OllamaProvider;
pub use openai::OpenAiProvider;

/// Errors that can occur during LLM operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LlmError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// The provider did not answer in time
    #[error("Request timed out")]
    Timeout,

    /// Invalid response from LLM
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Model not available
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Generic error
    #[error("LLM error: {0}")]
    Other(String),
}

impl From<reqwest::Error> for LlmError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            LlmError::Timeout
        } else if e.is_decode() {
            LlmError::InvalidResponse(e.to_string())
        } else {
            LlmError::Communication(format!("Request failed: {}", e))
        }
    }
}

#[derive(Debug, Clone)]
enum Reply {
    Text(String),
    Error(LlmError),
    Delayed(Duration, String),
}

/// Mock LLM provider for deterministic testing
///
/// Returns pre-configured responses without making any network calls. Rules
/// match on a fragment of the request's system instructions; the first
/// matching rule wins, otherwise the default response is returned. Every
/// request is recorded for later inspection.
///
/// # Examples
///
/// ```
/// use gazette_llm::{LlmError, MockProvider};
/// use gazette_domain::{CompletionProvider, CompletionRequest};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let provider = MockProvider::default();
/// provider.add_response("summary", "A short summary.");
/// provider.add_error("highlights", LlmError::RateLimitExceeded);
///
/// let summary = CompletionRequest::new("Write a summary", "text", 100, 0.3);
/// assert_eq!(provider.complete(&summary).await.unwrap(), "A short summary.");
///
/// let highlights = CompletionRequest::new("List highlights", "text", 100, 0.3);
/// assert!(provider.complete(&highlights).await.is_err());
/// assert_eq!(provider.call_count(), 2);
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_response: String,
    rules: Arc<Mutex<Vec<(String, Reply)>>>,
    requests: Arc<Mutex<Vec<CompletionRequest>>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl MockProvider {
    /// Create a new MockProvider with a fixed response for all requests
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: response.into(),
            rules: Arc::new(Mutex::new(Vec::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Answer requests whose system instructions contain `fragment`
    pub fn add_response(&self, fragment: impl Into<String>, response: impl Into<String>) {
        lock(&self.rules).push((fragment.into(), Reply::Text(response.into())));
    }

    /// Fail requests whose system instructions contain `fragment`
    pub fn add_error(&self, fragment: impl Into<String>, error: LlmError) {
        lock(&self.rules).push((fragment.into(), Reply::Error(error)));
    }

    /// Answer matching requests only after `delay`
    pub fn add_delay(
        &self,
        fragment: impl Into<String>,
        delay: Duration,
        response: impl Into<String>,
    ) {
        lock(&self.rules).push((fragment.into(), Reply::Delayed(delay, response.into())));
    }

    /// Get the number of times complete was called
    pub fn call_count(&self) -> usize {
        lock(&self.requests).len()
    }

    /// Every request received so far, in order
    pub fn requests(&self) -> Vec<CompletionRequest> {
        lock(&self.requests).clone()
    }

    /// Forget recorded requests
    pub fn reset(&self) {
        lock(&self.requests).clear();
    }

    fn reply_for(&self, request: &CompletionRequest) -> Reply {
        lock(&self.rules)
            .iter()
            .find(|(fragment, _)| request.system.contains(fragment.as_str()))
            .map(|(_, reply)| reply.clone())
            .unwrap_or_else(|| Reply::Text(self.default_response.clone()))
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("Default mock response")
    }
}

#[async_trait]
impl CompletionProvider for MockProvider {
    type Error = LlmError;

    async fn complete(&self, request: &CompletionRequest) -> Result<String, Self::Error> {
        lock(&self.requests).push(request.clone());

        match self.reply_for(request) {
            Reply::Text(text) => Ok(text),
            Reply::Error(error) => Err(error),
            Reply::Delayed(delay, text) => {
                tokio::time::sleep(delay).await;
                Ok(text)
            }
        }
    }

    fn model_name(&self) -> &str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(system: &str) -> CompletionRequest {
        CompletionRequest::new(system, "context", 500, 0.4)
    }

    #[tokio::test]
    async fn test_mock_provider_default() {
        let provider = MockProvider::new("Test response");
        let result = provider.complete(&request("anything")).await;
        assert_eq!(result.unwrap(), "Test response");
    }

    #[tokio::test]
    async fn test_mock_provider_matches_fragment() {
        let provider = MockProvider::default();
        provider.add_response("hello", "world");
        provider.add_response("foo", "bar");

        assert_eq!(provider.complete(&request("say hello")).await.unwrap(), "world");
        assert_eq!(provider.complete(&request("foo!")).await.unwrap(), "bar");
        assert_eq!(
            provider.complete(&request("unknown")).await.unwrap(),
            "Default mock response"
        );
    }

    #[tokio::test]
    async fn test_mock_provider_first_rule_wins() {
        let provider = MockProvider::default();
        provider.add_response("pass", "first");
        provider.add_response("pass", "second");
        assert_eq!(provider.complete(&request("pass")).await.unwrap(), "first");
    }

    #[tokio::test]
    async fn test_mock_provider_records_requests() {
        let provider = MockProvider::new("ok");
        assert_eq!(provider.call_count(), 0);

        provider.complete(&request("one")).await.unwrap();
        provider
            .complete(&CompletionRequest::new("two", "ctx", 900, 0.5))
            .await
            .unwrap();

        let requests = provider.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[1].max_tokens, 900);
        assert_eq!(requests[1].temperature, 0.5);

        provider.reset();
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn test_mock_provider_error() {
        let provider = MockProvider::default();
        provider.add_error("bad", LlmError::RateLimitExceeded);

        let result = provider.complete(&request("bad prompt")).await;
        assert_eq!(result.unwrap_err(), LlmError::RateLimitExceeded);
    }

    #[tokio::test]
    async fn test_mock_provider_delay() {
        let provider = MockProvider::default();
        provider.add_delay("slow", Duration::from_millis(20), "eventually");

        let started = std::time::Instant::now();
        let result = provider.complete(&request("slow")).await.unwrap();
        assert_eq!(result, "eventually");
        assert!(started.elapsed() >= Duration::from_millis(20));
    }

    #[tokio::test]
    async fn test_mock_provider_clone_shares_state() {
        let provider1 = MockProvider::new("test");
        let provider2 = provider1.clone();

        provider1.complete(&request("x")).await.unwrap();
        assert_eq!(provider1.call_count(), 1);
        assert_eq!(provider2.call_count(), 1);
    }
}
