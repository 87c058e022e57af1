//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and
//! infrastructure. Implementations live in other crates (txnsift-llm,
//! txnsift-sinks); the webhook pipeline is generic over all three so tests
//! can substitute deterministic mocks.

use crate::record::{RecordId, TransactionRecord};
use std::fmt::Display;
use std::future::Future;

/// Trait for LLM completion operations
///
/// Implemented by the infrastructure layer (txnsift-llm). A provider is
/// expected to perform its own bounded transport retries; callers treat a
/// returned error as the definitive failure of the completion.
pub trait CompletionProvider: Send + Sync {
    /// Error type for completion operations
    type Error: Display + Send;

    /// Generate a text completion for the given prompt
    fn complete(
        &self,
        prompt: &str,
    ) -> impl Future<Output = Result<String, Self::Error>> + Send;
}

/// Trait for persisting validated transaction records
///
/// Implemented by the infrastructure layer (txnsift-sinks).
pub trait RecordStore: Send + Sync {
    /// Error type for store operations
    type Error: Display + Send;

    /// Insert one record under a freshly generated identifier
    fn insert(
        &self,
        id: RecordId,
        record: &TransactionRecord,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send;
}

/// Trait for announcing a persisted record
///
/// Implemented by the infrastructure layer (txnsift-sinks). Delivery is
/// best-effort: callers log failures and never escalate them, since the
/// record has already been persisted by the time a notification is sent.
pub trait Notifier: Send + Sync {
    /// Error type for notification operations
    type Error: Display + Send;

    /// Announce the record's merchant, category, and amount
    fn notify(
        &self,
        record: &TransactionRecord,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send;
}
