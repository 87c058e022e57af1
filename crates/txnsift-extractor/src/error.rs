//! Error types for the Extractor

use thiserror::Error;

/// Errors that can occur during extraction
#[derive(Error, Debug)]
pub enum ExtractorError {
    /// Transport failure talking to the LLM provider (after its own
    /// bounded retries)
    #[error("LLM transport error: {0}")]
    Transport(String),

    /// The completion call exceeded the configured wall-clock deadline
    #[error("Extraction timeout")]
    Timeout,

    /// Alert text exceeds the maximum length
    #[error("Text too long: {0} chars (max: {1})")]
    TextTooLong(usize, usize),

    /// The model's response was not valid JSON
    #[error("JSON parse error: {0}")]
    JsonParse(String),

    /// The model's JSON does not satisfy the record schema
    #[error("Schema validation failed: {reason} (raw: {raw})")]
    SchemaValidation {
        /// What the response violated
        reason: String,
        /// The offending JSON, kept for diagnostics
        raw: String,
    },
}
