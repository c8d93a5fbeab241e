//! Error types for analyze request construction.
//!
//! All errors are represented by the [`AnalyzeError`] enum. Shape and
//! validation problems found while reading a request body are reported as
//! [`AnalyzeError::Malformed`]; syntax errors from the body tokenizer are
//! reported as [`AnalyzeError::BodyParse`] with the tokenizer error kept as
//! the source. Both belong to the "bad request" category, see
//! [`AnalyzeError::is_bad_request`].
//!
//! # Examples
//!
//! ```
//! use sarissa_analyze::error::{AnalyzeError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(AnalyzeError::malformed("Malformed content, must start with an object"))
//! }
//!
//! let err = example_operation().unwrap_err();
//! assert!(err.is_bad_request());
//! ```

use std::io;

use thiserror::Error;

/// The main error type for analyze request operations.
#[derive(Error, Debug)]
pub enum AnalyzeError {
    /// The request content has an unsupported shape or an unknown field.
    #[error("{0}")]
    Malformed(String),

    /// The request body could not be read as a structured document.
    #[error("Failed to parse request body")]
    BodyParse {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// I/O errors (config files, CLI input)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors outside of body parsing
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML serialization errors outside of body parsing
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Failure reported by the analysis engine executing a request
    #[error("Engine error: {0}")]
    Engine(String),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),
}

/// Result type alias for operations that may fail with AnalyzeError.
pub type Result<T> = std::result::Result<T, AnalyzeError>;

impl AnalyzeError {
    /// Create a new malformed-content error.
    pub fn malformed<S: Into<String>>(msg: S) -> Self {
        AnalyzeError::Malformed(msg.into())
    }

    /// Wrap a tokenizer failure into a body parse error.
    pub fn body_parse<E>(source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        AnalyzeError::BodyParse {
            source: Box::new(source),
        }
    }

    /// Create a new engine error.
    pub fn engine<S: Into<String>>(msg: S) -> Self {
        AnalyzeError::Engine(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        AnalyzeError::Other(msg.into())
    }

    /// Create a new invalid config error.
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        AnalyzeError::Other(format!("Invalid configuration: {}", msg.into()))
    }

    /// Whether this error should be reported to the client as a bad request.
    pub fn is_bad_request(&self) -> bool {
        matches!(
            self,
            AnalyzeError::Malformed(_) | AnalyzeError::BodyParse { .. }
        )
    }
}
