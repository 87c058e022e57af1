//! txnsift LLM Provider Layer
//!
//! Pluggable LLM provider implementations.
//!
//! # Architecture
//!
//! This crate provides implementations of the `CompletionProvider` trait
//! from `txnsift-domain`. Transport retries belong to the provider: a
//! returned error means the completion definitively failed for this request.
//!
//! # Providers
//!
//! - `MockProvider`: Deterministic mock for testing
//! - `OpenAiProvider`: OpenAI chat-completions API integration
//!
//! # Examples
//!
//! ```
//! use txnsift_llm::MockProvider;
//!
//! let provider = MockProvider::new(r#"{"date": "2021-12-31"}"#);
//! assert_eq!(provider.call_count(), 0);
//! ```

#![warn(missing_docs)]

pub mod openai;

use std::sync::{Arc, Mutex};
use thiserror::Error;
use txnsift_domain::CompletionProvider;

pub use openai::OpenAiProvider;

/// Errors that can occur during LLM operations
#[derive(Error, Debug)]
pub enum LlmError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Invalid response from the LLM API
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

/// Mock LLM provider for deterministic testing
///
/// Returns a pre-configured response (or error) without making any network
/// calls, and counts invocations so tests can assert retry and
/// short-circuit behavior.
///
/// # Examples
///
/// ```
/// use txnsift_llm::MockProvider;
///
/// let provider = MockProvider::new("fixed completion");
/// let failing = MockProvider::failing("connection refused");
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    response: String,
    error: Option<String>,
    call_count: Arc<Mutex<usize>>,
    last_prompt: Arc<Mutex<Option<String>>>,
}

impl MockProvider {
    /// Create a MockProvider returning a fixed response for every prompt
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
            error: None,
            call_count: Arc::new(Mutex::new(0)),
            last_prompt: Arc::new(Mutex::new(None)),
        }
    }

    /// Create a MockProvider that fails every completion
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            response: String::new(),
            error: Some(message.into()),
            call_count: Arc::new(Mutex::new(0)),
            last_prompt: Arc::new(Mutex::new(None)),
        }
    }

    /// Get the number of times `complete` was called
    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    /// Get the most recent prompt passed to `complete`
    pub fn last_prompt(&self) -> Option<String> {
        self.last_prompt.lock().unwrap().clone()
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("{}")
    }
}

impl CompletionProvider for MockProvider {
    type Error = LlmError;

    async fn complete(&self, prompt: &str) -> Result<String, Self::Error> {
        *self.call_count.lock().unwrap() += 1;
        *self.last_prompt.lock().unwrap() = Some(prompt.to_string());

        match &self.error {
            Some(message) => Err(LlmError::Communication(message.clone())),
            None => Ok(self.response.clone()),
        }
    }
}
