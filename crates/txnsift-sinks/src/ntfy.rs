//! ntfy push-notification client
//!
//! Publishes a one-line summary of each persisted record to an ntfy topic
//! derived from the Airtable base identifier. Delivery is best-effort; the
//! webhook pipeline logs failures and moves on.

use crate::SinkError;
use std::time::Duration;
use tracing::debug;
use txnsift_domain::{Notifier, TransactionRecord};

/// Default ntfy server
pub const DEFAULT_NTFY_BASE: &str = "https://ntfy.sh";

/// Topic prefix; the configured base identifier is appended
pub const TOPIC_PREFIX: &str = "ai-txns-";

/// Timeout for a single publish request
const REQUEST_TIMEOUT_SECS: u64 = 10;

/// ntfy notification client
pub struct NtfyNotifier {
    ntfy_base: String,
    topic: String,
    click_url: String,
    enabled: bool,
    client: reqwest::Client,
}

impl NtfyNotifier {
    /// Create a notifier for the topic derived from `base_id`
    ///
    /// The `Click` action of each notification opens the destination table
    /// (`base_id`/`table_name`) in Airtable.
    pub fn new(base_id: impl Into<String>, table_name: impl Into<String>) -> Self {
        let base_id = base_id.into();
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .unwrap();

        Self {
            ntfy_base: DEFAULT_NTFY_BASE.to_string(),
            topic: format!("{}{}", TOPIC_PREFIX, base_id),
            click_url: format!("https://airtable.com/{}/{}", base_id, table_name.into()),
            enabled: true,
            client,
        }
    }

    /// Enable or disable delivery
    ///
    /// A disabled notifier succeeds without sending anything; used to
    /// suppress pushes from development environments.
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Override the ntfy server URL (for test servers)
    pub fn with_ntfy_base(mut self, ntfy_base: impl Into<String>) -> Self {
        self.ntfy_base = ntfy_base.into();
        self
    }

    /// The topic notifications are published to
    pub fn topic(&self) -> &str {
        &self.topic
    }

    fn message(record: &TransactionRecord) -> String {
        format!(
            "Saved txn at {} ({}) for {}",
            record.merchant, record.category, record.amount
        )
    }
}

impl Notifier for NtfyNotifier {
    type Error = SinkError;

    async fn notify(&self, record: &TransactionRecord) -> Result<(), Self::Error> {
        if !self.enabled {
            debug!("Notifications disabled, skipping");
            return Ok(());
        }

        let url = format!("{}/{}", self.ntfy_base, self.topic);
        let response = self
            .client
            .post(&url)
            .header("Click", self.click_url.as_str())
            .body(Self::message(record))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(SinkError::Api {
                status: status.as_u16(),
                body,
            });
        }

        debug!(topic = %self.topic, "Notification published");
        Ok(())
    }
}
