//! txnsift Domain Layer
//!
//! This crate contains the core domain model for txnsift: the validated
//! transaction record, the closed budget-category enumeration, and the trait
//! interfaces that all other layers depend upon. It defines WHAT a persisted
//! transaction looks like; infrastructure crates decide HOW records are
//! extracted, stored, and announced.
//!
//! ## Key Concepts
//!
//! - **TransactionRecord**: the seven-field extraction target, immutable
//!   once validated
//! - **Category**: closed budget-category enumeration with an explicit
//!   `Other` fallback member
//! - **RecordId**: UUIDv7-based identifier generated per persisted record
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture:
//! - Pure domain logic only
//! - Infrastructure implementations live in other crates
//! - Trait definitions for all external interactions

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod category;
pub mod record;
pub mod traits;

// Re-exports for convenience
pub use category::Category;
pub use record::{RecordId, TransactionRecord};
pub use traits::{CompletionProvider, Notifier, RecordStore};
