//! # Sarissa Analyze
//!
//! Request construction for the Sarissa `_analyze` endpoint.
//!
//! ## Features
//!
//! - Query parameter binding with comma-separated list values
//! - Single-pass, token-driven parsing of JSON and YAML request bodies
//! - Tokenizers, token filters and char filters given by name or inline settings
//! - Body-over-parameter precedence per field, raw-text fallback for plain bodies
//! - Alias-tolerant field matching with an optional strict mode

pub mod analysis;
pub mod cli;
pub mod config;
pub mod error;
pub mod rest;
pub mod xcontent;

pub mod prelude {
    pub use crate::analysis::{AnalyzeRequest, NameOrDefinition, Settings};
    pub use crate::config::AnalyzeConfig;
    pub use crate::error::{AnalyzeError, Result};
    pub use crate::rest::{AnalyzeClient, RequestParams, RestAnalyzeAction, RestRequest};
    pub use crate::xcontent::XContentType;
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
