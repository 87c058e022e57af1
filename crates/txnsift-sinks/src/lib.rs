//! txnsift Sink Layer
//!
//! External collaborators a validated record is forwarded to:
//!
//! - [`AirtableStore`]: tabular persistence (implements
//!   [`RecordStore`](txnsift_domain::RecordStore))
//! - [`NtfyNotifier`]: best-effort push notification (implements
//!   [`Notifier`](txnsift_domain::Notifier))
//!
//! Persistence strictly precedes notification in the webhook pipeline;
//! that ordering is the caller's responsibility, not enforced here.
//!
//! The crate also ships [`MockStore`] and [`MockNotifier`], recording
//! doubles used by the server's integration tests.

#![warn(missing_docs)]

pub mod airtable;
pub mod ntfy;

use std::sync::{Arc, Mutex};
use thiserror::Error;
use txnsift_domain::{Notifier, RecordId, RecordStore, TransactionRecord};

pub use airtable::AirtableStore;
pub use ntfy::NtfyNotifier;

/// Errors from storage and notification collaborators
#[derive(Error, Debug)]
pub enum SinkError {
    /// Network-level failure reaching the collaborator
    #[error("Request failed: {0}")]
    Http(String),

    /// The collaborator rejected the request
    #[error("API error (HTTP {status}): {body}")]
    Api {
        /// HTTP status code returned
        status: u16,
        /// Error body text, if any
        body: String,
    },
}

impl From<reqwest::Error> for SinkError {
    fn from(e: reqwest::Error) -> Self {
        SinkError::Http(e.to_string())
    }
}

/// Recording mock store for tests
///
/// Captures every inserted record; optionally fails each insert so tests
/// can drive the persistence-failure path.
#[derive(Debug, Clone, Default)]
pub struct MockStore {
    fail: bool,
    inserts: Arc<Mutex<Vec<(RecordId, TransactionRecord)>>>,
}

impl MockStore {
    /// Create a store that accepts every insert
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that rejects every insert
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Records inserted so far
    pub fn inserts(&self) -> Vec<(RecordId, TransactionRecord)> {
        self.inserts.lock().unwrap().clone()
    }
}

impl RecordStore for MockStore {
    type Error = SinkError;

    async fn insert(&self, id: RecordId, record: &TransactionRecord) -> Result<(), Self::Error> {
        if self.fail {
            return Err(SinkError::Api {
                status: 503,
                body: "mock store unavailable".to_string(),
            });
        }
        self.inserts.lock().unwrap().push((id, record.clone()));
        Ok(())
    }
}

/// Recording mock notifier for tests
#[derive(Debug, Clone, Default)]
pub struct MockNotifier {
    fail: bool,
    notifications: Arc<Mutex<Vec<TransactionRecord>>>,
}

impl MockNotifier {
    /// Create a notifier that accepts every notification
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a notifier that fails every notification
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Records announced so far
    pub fn notifications(&self) -> Vec<TransactionRecord> {
        self.notifications.lock().unwrap().clone()
    }
}

impl Notifier for MockNotifier {
    type Error = SinkError;

    async fn notify(&self, record: &TransactionRecord) -> Result<(), Self::Error> {
        if self.fail {
            return Err(SinkError::Http("mock notifier unreachable".to_string()));
        }
        self.notifications.lock().unwrap().push(record.clone());
        Ok(())
    }
}
