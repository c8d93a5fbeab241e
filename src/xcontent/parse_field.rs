//! Field-name matching that tolerates deprecated aliases.
//!
//! A [`ParseField`] names a recognized body field together with spellings
//! that are still accepted but deprecated. Each field additionally accepts
//! its camelCase form (`char_filter` as `charFilter`). A [`ParseFieldMatcher`]
//! decides what happens when a deprecated spelling is used: lenient matchers
//! log a warning and accept it, strict matchers reject the request.

use log::warn;

use crate::error::{AnalyzeError, Result};

/// A recognized field name and its deprecated spellings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseField {
    name: &'static str,
    deprecated_names: &'static [&'static str],
}

impl ParseField {
    pub const fn new(name: &'static str) -> Self {
        ParseField {
            name,
            deprecated_names: &[],
        }
    }

    pub const fn with_deprecated_names(mut self, names: &'static [&'static str]) -> Self {
        self.deprecated_names = names;
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Whether `field_name` is an accepted but deprecated spelling.
    fn is_deprecated_spelling(&self, field_name: &str) -> bool {
        self.deprecated_names.contains(&field_name)
            || (self.name.contains('_') && field_name == to_camel_case(self.name))
    }
}

/// Decides whether a field name from the input refers to a [`ParseField`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseFieldMatcher {
    strict: bool,
}

impl ParseFieldMatcher {
    /// Matcher that accepts deprecated spellings with a warning.
    pub const EMPTY: ParseFieldMatcher = ParseFieldMatcher { strict: false };

    /// Matcher that rejects deprecated spellings.
    pub const STRICT: ParseFieldMatcher = ParseFieldMatcher { strict: true };

    pub fn new(strict: bool) -> Self {
        ParseFieldMatcher { strict }
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    /// Match a field name against a recognized field.
    ///
    /// Returns an error only when a strict matcher sees a deprecated spelling.
    pub fn matches(&self, field_name: Option<&str>, field: &ParseField) -> Result<bool> {
        let Some(field_name) = field_name else {
            return Ok(false);
        };

        if field_name == field.name {
            return Ok(true);
        }

        if field.is_deprecated_spelling(field_name) {
            if self.strict {
                return Err(AnalyzeError::malformed(format!(
                    "Deprecated field [{field_name}] used, expected [{}] instead",
                    field.name
                )));
            }
            warn!(
                "Deprecated field [{field_name}] used, expected [{}] instead",
                field.name
            );
            return Ok(true);
        }

        Ok(false)
    }
}

/// Convert `snake_case` to `camelCase`.
fn to_camel_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper_next = false;
    for c in name.chars() {
        if c == '_' {
            upper_next = true;
        } else if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}
