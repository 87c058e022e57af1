//! txnsift Extractor
//!
//! Converts a normalized transaction-alert line into a validated
//! [`TransactionRecord`](txnsift_domain::TransactionRecord) using one LLM
//! completion call.
//!
//! # Architecture
//!
//! ```text
//! Normalized text → Prompt → LLM → JSON → Schema validation → Record
//! ```
//!
//! # Key Features
//!
//! - **Prompt contract**: field formats, the closed category set, and one
//!   worked example, with the alert text embedded between delimiters
//! - **Hard deadline**: the completion call is wrapped in a wall-clock
//!   timeout so a slow upstream cannot hold a request slot
//! - **Untrusted output**: the model's JSON is validated field by field;
//!   nothing reaches a sink unvalidated
//!
//! # Example Usage
//!
//! ```
//! use txnsift_extractor::{Extractor, ExtractorConfig};
//! use txnsift_llm::MockProvider;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let llm = MockProvider::new(
//!     r#"{"date": "2021-12-31", "time": "4:35 PM ET", "amount": "$1.00",
//!         "account": "Checking (...123)", "merchant_raw": "SQ* SWEET GREEN CHICAGO",
//!         "merchant": "Sweet Green", "category": "Food & Dining"}"#,
//! );
//! let extractor = Extractor::new(llm, ExtractorConfig::default());
//!
//! let record = extractor
//!     .extract("SQ* SWEET GREEN CHICAGO $1.00 on 12/31/21")
//!     .await?;
//! assert_eq!(record.merchant, "Sweet Green");
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod extractor;
mod parser;
mod prompt;

pub use config::ExtractorConfig;
pub use error::ExtractorError;
pub use extractor::Extractor;
pub use parser::parse_llm_response;
pub use prompt::PromptBuilder;
