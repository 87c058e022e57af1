//! txnsift Mail Layer
//!
//! Turns raw alert-email bodies into the single-line plain text the
//! extraction prompt embeds. Two concerns live here:
//!
//! - [`normalize`]: newline and whitespace collapsing, plus optional
//!   truncation at a known boilerplate trailer
//! - [`html`]: visible-text extraction from an untrusted HTML body
//!
//! Both are pure functions over strings; neither performs I/O.

#![warn(missing_docs)]

pub mod html;
pub mod normalize;

pub use html::html_to_text;
pub use normalize::{clean_text, Normalizer};
