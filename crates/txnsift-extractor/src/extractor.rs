//! Core Extractor implementation

use crate::config::ExtractorConfig;
use crate::error::ExtractorError;
use crate::parser::parse_llm_response;
use crate::prompt::PromptBuilder;
use std::sync::Arc;
use tokio::time::timeout;
use tracing::{debug, info};
use txnsift_domain::{CompletionProvider, TransactionRecord};

/// The Extractor converts a normalized alert line into a validated record
///
/// Exactly one outbound completion call is made per invocation (the
/// provider may retry transport failures internally). No state is held
/// across invocations.
pub struct Extractor<P>
where
    P: CompletionProvider,
{
    provider: Arc<P>,
    config: ExtractorConfig,
}

impl<P> Extractor<P>
where
    P: CompletionProvider + 'static,
{
    /// Create a new Extractor
    pub fn new(provider: P, config: ExtractorConfig) -> Self {
        Self {
            provider: Arc::new(provider),
            config,
        }
    }

    /// Extract a transaction record from normalized alert text
    ///
    /// # Errors
    ///
    /// - [`ExtractorError::TextTooLong`] before any outbound call
    /// - [`ExtractorError::Timeout`] when the wall-clock deadline elapses
    /// - [`ExtractorError::Transport`] when the provider definitively fails
    /// - [`ExtractorError::JsonParse`] / [`ExtractorError::SchemaValidation`]
    ///   for malformed model output; never retried
    pub async fn extract(&self, alert_text: &str) -> Result<TransactionRecord, ExtractorError> {
        if alert_text.len() > self.config.max_text_length {
            return Err(ExtractorError::TextTooLong(
                alert_text.len(),
                self.config.max_text_length,
            ));
        }

        let prompt = PromptBuilder::new(alert_text).build();
        debug!("Prompt length: {} chars", prompt.len());

        let response = timeout(
            self.config.extraction_timeout(),
            self.provider.complete(&prompt),
        )
        .await
        .map_err(|_| ExtractorError::Timeout)?
        .map_err(|e| ExtractorError::Transport(e.to_string()))?;

        debug!("LLM response length: {} chars", response.len());

        let record = parse_llm_response(&response)?;

        info!(
            merchant = %record.merchant,
            category = %record.category,
            amount = %record.amount,
            "Extraction complete"
        );

        Ok(record)
    }
}
