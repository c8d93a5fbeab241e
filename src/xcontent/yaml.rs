//! YAML event source.
//!
//! `serde_yaml` drives a recording visitor over the document, so every
//! mapping entry is captured in input order (repeated keys included) before
//! the events are replayed to the parser.

use std::fmt;
use std::vec;

use serde::de::{self, DeserializeSeed, Deserializer, MapAccess, SeqAccess, Visitor};

use crate::error::{AnalyzeError, Result};
use crate::xcontent::parser::{Event, EventSource, Scalar};

/// [`EventSource`] over a YAML document.
pub struct YamlEvents {
    events: vec::IntoIter<Event>,
}

impl YamlEvents {
    pub fn from_slice(content: &[u8]) -> Result<Self> {
        let mut events = Vec::new();
        Recorder {
            events: &mut events,
        }
        .deserialize(serde_yaml::Deserializer::from_slice(content))
        .map_err(AnalyzeError::body_parse)?;

        Ok(YamlEvents {
            events: events.into_iter(),
        })
    }
}

impl EventSource for YamlEvents {
    fn next_event(&mut self) -> Result<Option<Event>> {
        Ok(self.events.next())
    }
}

/// Appends the events of one value.
struct Recorder<'e> {
    events: &'e mut Vec<Event>,
}

impl<'de> DeserializeSeed<'de> for Recorder<'_> {
    type Value = ();

    fn deserialize<D: Deserializer<'de>>(self, deserializer: D) -> std::result::Result<(), D::Error> {
        deserializer.deserialize_any(self)
    }
}

impl Recorder<'_> {
    fn scalar(self, scalar: Scalar) {
        self.events.push(Event::Value(scalar));
    }
}

impl<'de> Visitor<'de> for Recorder<'_> {
    type Value = ();

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a YAML value")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> std::result::Result<(), E> {
        self.scalar(Scalar::Bool(v));
        Ok(())
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<(), E> {
        self.scalar(Scalar::Number(v.to_string()));
        Ok(())
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<(), E> {
        self.scalar(Scalar::Number(v.to_string()));
        Ok(())
    }

    fn visit_i128<E: de::Error>(self, v: i128) -> std::result::Result<(), E> {
        self.scalar(Scalar::Number(v.to_string()));
        Ok(())
    }

    fn visit_u128<E: de::Error>(self, v: u128) -> std::result::Result<(), E> {
        self.scalar(Scalar::Number(v.to_string()));
        Ok(())
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> std::result::Result<(), E> {
        // .inf and .nan have no JSON number form
        if v.is_finite() {
            self.scalar(Scalar::Number(v.to_string()));
        } else {
            self.scalar(Scalar::String(v.to_string()));
        }
        Ok(())
    }

    fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<(), E> {
        self.scalar(Scalar::String(v.to_string()));
        Ok(())
    }

    fn visit_string<E: de::Error>(self, v: String) -> std::result::Result<(), E> {
        self.scalar(Scalar::String(v));
        Ok(())
    }

    fn visit_unit<E: de::Error>(self) -> std::result::Result<(), E> {
        self.scalar(Scalar::Null);
        Ok(())
    }

    fn visit_none<E: de::Error>(self) -> std::result::Result<(), E> {
        self.visit_unit()
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> std::result::Result<(), D::Error> {
        deserializer.deserialize_any(self)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> std::result::Result<(), A::Error> {
        self.events.push(Event::StartArray);
        while seq
            .next_element_seed(Recorder {
                events: &mut *self.events,
            })?
            .is_some()
        {}
        self.events.push(Event::EndArray);
        Ok(())
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> std::result::Result<(), A::Error> {
        self.events.push(Event::StartObject);
        while let Some(name) = map.next_key_seed(KeyName)? {
            self.events.push(Event::FieldName(name));
            map.next_value_seed(Recorder {
                events: &mut *self.events,
            })?;
        }
        self.events.push(Event::EndObject);
        Ok(())
    }
}

/// Reads a scalar mapping key as a field name.
struct KeyName;

impl<'de> DeserializeSeed<'de> for KeyName {
    type Value = String;

    fn deserialize<D: Deserializer<'de>>(self, deserializer: D) -> std::result::Result<String, D::Error> {
        deserializer.deserialize_any(self)
    }
}

impl<'de> Visitor<'de> for KeyName {
    type Value = String;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a scalar field name")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> std::result::Result<String, E> {
        Ok(v.to_string())
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<String, E> {
        Ok(v.to_string())
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<String, E> {
        Ok(v.to_string())
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> std::result::Result<String, E> {
        Ok(v.to_string())
    }

    fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<String, E> {
        Ok(v.to_string())
    }

    fn visit_string<E: de::Error>(self, v: String) -> std::result::Result<String, E> {
        Ok(v)
    }

    fn visit_unit<E: de::Error>(self) -> std::result::Result<String, E> {
        Ok("null".to_string())
    }
}
