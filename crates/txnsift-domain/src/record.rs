//! Record module - the validated transaction record and its identifier

use crate::category::Category;
use std::fmt;

/// Unique identifier for a persisted record based on UUIDv7
///
/// UUIDv7 provides:
/// - Chronological sortability in the destination table
/// - 128-bit uniqueness with no coordination between requests
/// - RFC 9562-standard format with broad ecosystem support
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RecordId(u128);

impl RecordId {
    /// Generate a new UUIDv7-based RecordId
    ///
    /// # Examples
    ///
    /// ```
    /// use txnsift_domain::RecordId;
    ///
    /// let id = RecordId::new();
    /// assert!(id.value() > 0);
    /// ```
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7().as_u128())
    }

    /// Parse a RecordId from a UUID string
    pub fn from_string(s: &str) -> Result<Self, String> {
        uuid::Uuid::parse_str(s)
            .map(|u| Self(u.as_u128()))
            .map_err(|e| format!("Invalid UUID string: {}", e))
    }

    /// Get the raw u128 value
    pub fn value(&self) -> u128 {
        self.0
    }
}

impl Default for RecordId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", uuid::Uuid::from_u128(self.0))
    }
}

/// A validated credit-card transaction extracted from an alert email
///
/// Every field is a required, non-empty string except `category`, which is a
/// member of the closed [`Category`] set. Records are immutable once
/// constructed; the webhook pipeline only ever forwards them to sinks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionRecord {
    /// Calendar date in YYYY-MM-DD form
    pub date: String,

    /// Human-readable time, including a timezone abbreviation
    /// (e.g. "4:35 PM ET")
    pub time: String,

    /// Currency amount as printed, `$` plus decimal (e.g. "$12.34")
    pub amount: String,

    /// Account label, optionally with masked trailing digits
    /// (e.g. "Checking (...123)")
    pub account: String,

    /// Verbatim merchant string as it appears on the statement
    pub merchant_raw: String,

    /// Canonicalized, human-legible merchant name with store, location,
    /// and POS-provider noise stripped
    pub merchant: String,

    /// Budget category
    pub category: Category,
}

impl TransactionRecord {
    /// Check the record's field-level invariants
    ///
    /// `category` is guaranteed valid by construction; this verifies the six
    /// string fields are non-empty.
    pub fn validate(&self) -> Result<(), String> {
        let fields = [
            ("date", &self.date),
            ("time", &self.time),
            ("amount", &self.amount),
            ("account", &self.account),
            ("merchant_raw", &self.merchant_raw),
            ("merchant", &self.merchant),
        ];
        for (name, value) in fields {
            if value.is_empty() {
                return Err(format!("Field '{}' must be non-empty", name));
            }
        }
        Ok(())
    }
}
