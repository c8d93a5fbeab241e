//! Structured request content: content type resolution, the token cursor
//! used to walk a body, and alias-tolerant field-name matching.

pub mod content_type;
pub mod json;
pub mod parse_field;
pub mod parser;
pub mod yaml;

// Re-export commonly used types
pub use content_type::{XContentType, guess_body_content_type};
pub use parse_field::{ParseField, ParseFieldMatcher};
pub use json::{JsonTokenizer, SyntaxError};
pub use parser::{Event, EventSource, Scalar, StreamParser, Token, XContentParser};
pub use yaml::YamlEvents;
