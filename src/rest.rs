//! REST layer for the `_analyze` endpoint.
//!
//! [`RestAnalyzeAction`] turns a [`RestRequest`] (query parameters plus an
//! optional body) into an [`AnalyzeRequest`](crate::analysis::AnalyzeRequest)
//! and hands it to an [`AnalyzeClient`].

pub mod analyze;
pub mod params;
pub mod request;

// Re-export commonly used types
pub use analyze::{
    AnalyzeClient, RestAnalyzeAction, build_from_content, fields, parse_body, request_from_params,
};
pub use params::RequestParams;
pub use request::RestRequest;
