//! Analyze request model.
//!
//! [`AnalyzeRequest`] describes what text to analyze and with which analyzer,
//! or with which ad-hoc chain of char filters, tokenizer and token filters.
//! Each of those components is a [`NameOrDefinition`].

pub mod definition;
pub mod request;

// Re-export commonly used types
pub use definition::{NameOrDefinition, Settings};
pub use request::{AnalyzeRequest, DEFAULT_ATTRIBUTES};
