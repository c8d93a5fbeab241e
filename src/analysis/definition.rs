//! Name-or-settings specification of a tokenizer, token filter or char filter.
//!
//! An analyze request may refer to an analysis component by its registered
//! name (`"lowercase"`) or describe an anonymous instance inline
//! (`{"type": "ngram", "min_gram": 2}`). [`NameOrDefinition`] captures exactly
//! one of the two; resolving it to a working component is left to the engine.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Inline configuration of an anonymous analysis component.
pub type Settings = Map<String, Value>;

/// A registered component name or an inline settings mapping.
///
/// Serializes as a bare string or an object, the same shapes a request body
/// uses to supply it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NameOrDefinition {
    /// A bare registered name.
    Name(String),
    /// Inline configuration for an unregistered instance.
    Settings(Settings),
}

impl NameOrDefinition {
    /// Refer to a registered component by name.
    pub fn from_name<S: Into<String>>(name: S) -> Self {
        NameOrDefinition::Name(name.into())
    }

    /// Describe an anonymous component by its settings.
    pub fn from_settings(settings: Settings) -> Self {
        NameOrDefinition::Settings(settings)
    }

    /// The registered name, if this is a name reference.
    pub fn name(&self) -> Option<&str> {
        match self {
            NameOrDefinition::Name(name) => Some(name),
            NameOrDefinition::Settings(_) => None,
        }
    }

    /// The inline settings, if this is an anonymous definition.
    pub fn settings(&self) -> Option<&Settings> {
        match self {
            NameOrDefinition::Name(_) => None,
            NameOrDefinition::Settings(settings) => Some(settings),
        }
    }

    pub fn is_name(&self) -> bool {
        matches!(self, NameOrDefinition::Name(_))
    }
}

impl From<&str> for NameOrDefinition {
    fn from(name: &str) -> Self {
        NameOrDefinition::from_name(name)
    }
}

impl From<String> for NameOrDefinition {
    fn from(name: String) -> Self {
        NameOrDefinition::from_name(name)
    }
}

impl From<Settings> for NameOrDefinition {
    fn from(settings: Settings) -> Self {
        NameOrDefinition::from_settings(settings)
    }
}

impl fmt::Display for NameOrDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NameOrDefinition::Name(name) => write!(f, "{name}"),
            NameOrDefinition::Settings(settings) => {
                // Anonymous definitions are shown by their type when they have one
                match settings.get("type").and_then(Value::as_str) {
                    Some(kind) => write!(f, "_anonymous_{kind}"),
                    None => write!(f, "_anonymous_"),
                }
            }
        }
    }
}
