//! Airtable tabular-storage client
//!
//! Inserts one row per validated record into a configured base and table.
//! Column names match the destination table, including the spaced
//! "Merchant raw" column.

use crate::SinkError;
use serde::Serialize;
use std::time::Duration;
use tracing::info;
use txnsift_domain::{RecordId, RecordStore, TransactionRecord};

/// Default Airtable API base URL
pub const DEFAULT_API_BASE: &str = "https://api.airtable.com/v0";

/// Timeout for a single insert request
const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Airtable record-insert client
pub struct AirtableStore {
    api_base: String,
    api_key: String,
    base_id: String,
    table_name: String,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct CreateRecordsRequest<'a> {
    records: Vec<RecordEnvelope<'a>>,
    typecast: bool,
}

#[derive(Serialize)]
struct RecordEnvelope<'a> {
    fields: RecordFields<'a>,
}

#[derive(Serialize)]
struct RecordFields<'a> {
    #[serde(rename = "ID")]
    id: String,
    #[serde(rename = "Date")]
    date: &'a str,
    #[serde(rename = "Time")]
    time: &'a str,
    #[serde(rename = "Amount")]
    amount: &'a str,
    #[serde(rename = "Account")]
    account: &'a str,
    #[serde(rename = "Merchant")]
    merchant: &'a str,
    #[serde(rename = "Merchant raw")]
    merchant_raw: &'a str,
    #[serde(rename = "Category")]
    category: &'a str,
}

impl AirtableStore {
    /// Create a new store for the given base and table
    pub fn new(
        api_key: impl Into<String>,
        base_id: impl Into<String>,
        table_name: impl Into<String>,
    ) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .unwrap();

        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            api_key: api_key.into(),
            base_id: base_id.into(),
            table_name: table_name.into(),
            client,
        }
    }

    /// Override the API base URL (for proxies and test servers)
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// The base identifier this store writes to
    pub fn base_id(&self) -> &str {
        &self.base_id
    }

    /// The table name this store writes to
    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    fn insert_url(&self) -> String {
        format!("{}/{}/{}", self.api_base, self.base_id, self.table_name)
    }
}

impl RecordStore for AirtableStore {
    type Error = SinkError;

    async fn insert(&self, id: RecordId, record: &TransactionRecord) -> Result<(), Self::Error> {
        let body = CreateRecordsRequest {
            records: vec![RecordEnvelope {
                fields: RecordFields {
                    id: id.to_string(),
                    date: &record.date,
                    time: &record.time,
                    amount: &record.amount,
                    account: &record.account,
                    merchant: &record.merchant,
                    merchant_raw: &record.merchant_raw,
                    category: record.category.as_str(),
                },
            }],
            typecast: true,
        };

        let response = self
            .client
            .post(self.insert_url())
            .bearer_auth(&self.api_key)
            .json(&body)
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

        info!(%id, table = %self.table_name, "Saved record to Airtable");
        Ok(())
    }
}
