//! OpenAI Provider Implementation
//!
//! Provides integration with the OpenAI chat-completions API.
//!
//! # Features
//!
//! - Async HTTP communication via reqwest with a per-request timeout
//! - JSON-object response format and near-deterministic sampling
//! - Retry logic with exponential backoff on transport failures
//! - Terminal (non-retried) handling of client errors and malformed
//!   response bodies
//!
//! # Examples
//!
//! ```no_run
//! use txnsift_llm::OpenAiProvider;
//!
//! let provider = OpenAiProvider::new("sk-...");
//! ```

use crate::LlmError;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};
use txnsift_domain::CompletionProvider;

/// Default OpenAI API base URL
pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";

/// Default completion model
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo-1106";

/// Default timeout for a single completion request (20 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 20;

/// Default number of retry attempts
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Default sampling temperature (near-deterministic)
pub const DEFAULT_TEMPERATURE: f32 = 0.1;

/// Default output-token bound
pub const DEFAULT_MAX_TOKENS: u32 = 500;

/// OpenAI chat-completions provider
///
/// Sends the extraction prompt as a single user message with JSON-object
/// response format, so the model can only reply with a JSON document.
pub struct OpenAiProvider {
    api_base: String,
    api_key: String,
    model: String,
    client: reqwest::Client,
    max_retries: u32,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
    response_format: ResponseFormat,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: &'static str,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

impl OpenAiProvider {
    /// Create a new OpenAI provider with default model and limits
    ///
    /// # Parameters
    ///
    /// - `api_key`: OpenAI API key
    pub fn new(api_key: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .unwrap();

        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            client,
            max_retries: DEFAULT_MAX_RETRIES,
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }

    /// Override the completion model
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Override the API base URL (for proxies and test servers)
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Set the maximum number of retry attempts
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Override the per-request timeout
    ///
    /// A timed-out request counts as a transport failure and is retried
    /// like any other; callers sizing an overall deadline must budget for
    /// `max_retries` of these plus backoff.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.client = reqwest::Client::builder().timeout(timeout).build().unwrap();
        self
    }

    /// Generate a completion for the prompt
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - The API is unreachable or times out on every attempt
    /// - The model is not available
    /// - The response body cannot be decoded or carries no content
    pub async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        let url = format!("{}/chat/completions", self.api_base);

        let request_body = ChatCompletionRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            response_format: ResponseFormat {
                format_type: "json_object",
            },
        };

        // Retry loop with exponential backoff; only transport-level
        // failures are retried
        let mut attempts = 0;
        let mut last_error = None;

        while attempts < self.max_retries {
            match self
                .client
                .post(&url)
                .bearer_auth(&self.api_key)
                .json(&request_body)
                .send()
                .await
            {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        return match response.json::<ChatCompletionResponse>().await {
                            Ok(completion) => completion
                                .choices
                                .into_iter()
                                .next()
                                .and_then(|choice| choice.message.content)
                                .ok_or_else(|| {
                                    LlmError::InvalidResponse(
                                        "Completion carried no message content".to_string(),
                                    )
                                }),
                            Err(e) => Err(LlmError::InvalidResponse(format!(
                                "Failed to decode response: {}",
                                e
                            ))),
                        };
                    } else if status == reqwest::StatusCode::NOT_FOUND {
                        return Err(LlmError::ModelNotAvailable(self.model.clone()));
                    } else if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                        warn!("OpenAI rate limit hit, attempt {}", attempts + 1);
                        last_error = Some(LlmError::RateLimitExceeded);
                    } else if status.is_client_error() {
                        // Bad key or malformed request; retrying cannot help
                        let error_text = response
                            .text()
                            .await
                            .unwrap_or_else(|_| "Unknown error".to_string());
                        return Err(LlmError::Communication(format!(
                            "HTTP {}: {}",
                            status, error_text
                        )));
                    } else {
                        let error_text = response
                            .text()
                            .await
                            .unwrap_or_else(|_| "Unknown error".to_string());
                        last_error = Some(LlmError::Communication(format!(
                            "HTTP {}: {}",
                            status, error_text
                        )));
                    }
                }
                Err(e) => {
                    debug!("OpenAI request failed on attempt {}: {}", attempts + 1, e);
                    last_error = Some(LlmError::Communication(format!("Request failed: {}", e)));
                }
            }

            attempts += 1;
            if attempts < self.max_retries {
                // Exponential backoff: 1s, 2s, 4s, etc.
                let delay = Duration::from_secs(2u64.pow(attempts - 1));
                tokio::time::sleep(delay).await;
            }
        }

        Err(last_error
            .unwrap_or_else(|| LlmError::Communication("Max retries exceeded".to_string())))
    }
}

impl CompletionProvider for OpenAiProvider {
    type Error = LlmError;

    async fn complete(&self, prompt: &str) -> Result<String, Self::Error> {
        self.generate(prompt).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_defaults() {
        let provider = OpenAiProvider::new("sk-test");
        assert_eq!(provider.api_base, DEFAULT_API_BASE);
        assert_eq!(provider.model, DEFAULT_MODEL);
        assert_eq!(provider.max_retries, DEFAULT_MAX_RETRIES);
    }

    #[test]
    fn test_provider_overrides() {
        let provider = OpenAiProvider::new("sk-test")
            .with_model("gpt-4o-mini")
            .with_api_base("http://localhost:8080/v1")
            .with_max_retries(1);
        assert_eq!(provider.model, "gpt-4o-mini");
        assert_eq!(provider.api_base, "http://localhost:8080/v1");
        assert_eq!(provider.max_retries, 1);
    }

    #[test]
    fn test_request_body_shape() {
        let request = ChatCompletionRequest {
            model: DEFAULT_MODEL,
            messages: vec![ChatMessage {
                role: "user",
                content: "alert text",
            }],
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            response_format: ResponseFormat {
                format_type: "json_object",
            },
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], DEFAULT_MODEL);
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["response_format"]["type"], "json_object");
    }

    #[tokio::test]
    async fn test_timed_out_request_is_retried() {
        use std::sync::atomic::{AtomicUsize, Ordering};
        use std::sync::Arc;

        // Accepts connections but never responds, so every attempt hits
        // the per-request timeout
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let connections = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&connections);
        tokio::spawn(async move {
            let mut held = Vec::new();
            loop {
                let (stream, _) = listener.accept().await.unwrap();
                counter.fetch_add(1, Ordering::SeqCst);
                held.push(stream);
            }
        });

        let provider = OpenAiProvider::new("sk-test")
            .with_api_base(format!("http://{}/v1", addr))
            .with_timeout(Duration::from_millis(100))
            .with_max_retries(2);

        let result = provider.generate("test").await;
        assert!(matches!(result, Err(LlmError::Communication(_))));
        assert!(
            connections.load(Ordering::SeqCst) >= 2,
            "a timed-out attempt must be retried"
        );
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_communication_error() {
        // Unroutable port, single attempt to keep the test fast
        let provider = OpenAiProvider::new("sk-test")
            .with_api_base("http://127.0.0.1:1/v1")
            .with_max_retries(1);

        let result = provider.generate("test").await;
        match result {
            Err(LlmError::Communication(_)) => {}
            other => panic!("Expected Communication error, got {:?}", other.map(|_| ())),
        }
    }
}
