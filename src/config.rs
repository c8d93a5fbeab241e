//! Configuration for analyze request construction.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AnalyzeError, Result};
use crate::xcontent::ParseFieldMatcher;

/// Configuration for [`RestAnalyzeAction`](crate::rest::RestAnalyzeAction).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzeConfig {
    /// Reject deprecated field spellings in request bodies instead of
    /// accepting them with a warning.
    pub strict_field_matching: bool,

    /// Attributes requested when neither the parameters nor the body name any.
    pub default_attributes: Vec<String>,

    /// Largest request body accepted, in bytes.
    pub max_body_bytes: usize,
}

impl Default for AnalyzeConfig {
    fn default() -> Self {
        Self {
            strict_field_matching: false,
            default_attributes: Vec::new(),
            max_body_bytes: 100 * 1024 * 1024, // 100MB
        }
    }
}

impl AnalyzeConfig {
    /// Load a configuration from a JSON file. Missing keys take their defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: AnalyzeConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the configuration for values that can never work.
    pub fn validate(&self) -> Result<()> {
        if self.max_body_bytes == 0 {
            return Err(AnalyzeError::invalid_config(
                "max_body_bytes must be greater than 0",
            ));
        }
        Ok(())
    }

    /// The field-name matcher this configuration asks for.
    pub fn parse_field_matcher(&self) -> ParseFieldMatcher {
        ParseFieldMatcher::new(self.strict_field_matching)
    }

    pub fn with_strict_field_matching(mut self, strict: bool) -> Self {
        self.strict_field_matching = strict;
        self
    }

    pub fn with_default_attributes(mut self, attributes: Vec<String>) -> Self {
        self.default_attributes = attributes;
        self
    }

    pub fn with_max_body_bytes(mut self, max_body_bytes: usize) -> Self {
        self.max_body_bytes = max_body_bytes;
        self
    }
}
