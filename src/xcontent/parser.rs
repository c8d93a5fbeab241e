//! Pull-based token cursor over a structured document.
//!
//! [`XContentParser`] exposes a body as a flat, forward-only sequence of
//! [`Token`]s: callers pull one token at a time and read the current field
//! name or scalar text as they go. Every key of every object is delivered,
//! duplicates included, in input order.
//!
//! [`StreamParser`] implements the cursor on top of an [`EventSource`], the
//! format-specific tokenizer (see [`json`](super::json) and
//! [`yaml`](super::yaml)). Container nesting is tracked on explicit stacks,
//! so deeply nested input never recurses.

use std::fmt;

use serde_json::{Map, Number, Value};

use crate::error::{AnalyzeError, Result};

/// Kind of the token the cursor is positioned on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    StartObject,
    EndObject,
    StartArray,
    EndArray,
    FieldName,
    ValueString,
    ValueNumber,
    ValueBoolean,
    ValueNull,
}

impl Token {
    /// Whether this token is a scalar value.
    pub fn is_value(&self) -> bool {
        matches!(
            self,
            Token::ValueString | Token::ValueNumber | Token::ValueBoolean | Token::ValueNull
        )
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Token::StartObject => "START_OBJECT",
            Token::EndObject => "END_OBJECT",
            Token::StartArray => "START_ARRAY",
            Token::EndArray => "END_ARRAY",
            Token::FieldName => "FIELD_NAME",
            Token::ValueString => "VALUE_STRING",
            Token::ValueNumber => "VALUE_NUMBER",
            Token::ValueBoolean => "VALUE_BOOLEAN",
            Token::ValueNull => "VALUE_NULL",
        };
        f.write_str(name)
    }
}

/// A scalar value as it appeared in the input.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    String(String),
    /// Source text of the number, unchanged.
    Number(String),
    Bool(bool),
    Null,
}

/// One step of a tokenizer.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    StartObject,
    EndObject,
    StartArray,
    EndArray,
    FieldName(String),
    Value(Scalar),
}

impl Event {
    fn token(&self) -> Token {
        match self {
            Event::StartObject => Token::StartObject,
            Event::EndObject => Token::EndObject,
            Event::StartArray => Token::StartArray,
            Event::EndArray => Token::EndArray,
            Event::FieldName(_) => Token::FieldName,
            Event::Value(Scalar::String(_)) => Token::ValueString,
            Event::Value(Scalar::Number(_)) => Token::ValueNumber,
            Event::Value(Scalar::Bool(_)) => Token::ValueBoolean,
            Event::Value(Scalar::Null) => Token::ValueNull,
        }
    }
}

/// Format-specific producer of [`Event`]s.
pub trait EventSource {
    /// The next event, `None` once the document is complete.
    ///
    /// Malformed input is reported as [`AnalyzeError::BodyParse`].
    fn next_event(&mut self) -> Result<Option<Event>>;
}

/// Forward-only token cursor over a structured document.
pub trait XContentParser {
    /// Advance to the next token. `None` once the document is exhausted.
    fn next_token(&mut self) -> Result<Option<Token>>;

    /// The token the cursor is positioned on.
    fn current_token(&self) -> Option<Token>;

    /// Name of the field whose name or value the cursor is positioned on.
    fn current_name(&self) -> Option<&str>;

    /// Textual form of the current scalar value. Numbers keep their source text.
    fn text(&self) -> Result<String>;

    /// Whether the current value can be read as a boolean.
    fn is_boolean_value(&self) -> bool;

    /// The current value as a boolean.
    fn boolean_value(&self) -> Result<bool>;

    /// Consume the object the cursor is positioned on and return it as a
    /// mapping. Afterwards the cursor sits on the object's `EndObject`.
    fn map(&mut self) -> Result<Map<String, Value>>;
}

/// [`XContentParser`] driven by an [`EventSource`].
pub struct StreamParser<S> {
    source: S,
    current_token: Option<Token>,
    current_scalar: Option<Scalar>,
    current_name: Option<String>,
    // Field names of the enclosing containers, restored when one closes
    names: Vec<Option<String>>,
}

impl<S: EventSource> StreamParser<S> {
    pub fn new(source: S) -> Self {
        StreamParser {
            source,
            current_token: None,
            current_scalar: None,
            current_name: None,
            names: Vec::new(),
        }
    }
}

/// Partially built container while [`XContentParser::map`] copies an object.
enum Building {
    Object(Map<String, Value>, Option<String>),
    Array(Vec<Value>),
}

impl Building {
    /// Add a finished value; objects take it under the pending key.
    fn push(&mut self, value: Value) {
        match self {
            Building::Object(map, key) => {
                if let Some(key) = key.take() {
                    map.insert(key, value);
                }
            }
            Building::Array(items) => items.push(value),
        }
    }
}

impl<S: EventSource> XContentParser for StreamParser<S> {
    fn next_token(&mut self) -> Result<Option<Token>> {
        self.current_scalar = None;
        let Some(event) = self.source.next_event()? else {
            self.current_token = None;
            return Ok(None);
        };

        let token = event.token();
        match event {
            Event::StartObject | Event::StartArray => {
                self.names.push(self.current_name.clone());
            }
            Event::EndObject | Event::EndArray => {
                self.current_name = self.names.pop().flatten();
            }
            Event::FieldName(name) => self.current_name = Some(name),
            Event::Value(scalar) => self.current_scalar = Some(scalar),
        }

        self.current_token = Some(token);
        Ok(Some(token))
    }

    fn current_token(&self) -> Option<Token> {
        self.current_token
    }

    fn current_name(&self) -> Option<&str> {
        self.current_name.as_deref()
    }

    fn text(&self) -> Result<String> {
        match &self.current_scalar {
            Some(Scalar::String(text)) | Some(Scalar::Number(text)) => Ok(text.clone()),
            Some(Scalar::Bool(flag)) => Ok(flag.to_string()),
            _ => Err(AnalyzeError::malformed(format!(
                "Cannot read text from token [{}]",
                describe(self.current_token)
            ))),
        }
    }

    fn is_boolean_value(&self) -> bool {
        match &self.current_scalar {
            Some(Scalar::Bool(_)) => true,
            Some(Scalar::String(text)) => text == "true" || text == "false",
            _ => false,
        }
    }

    fn boolean_value(&self) -> Result<bool> {
        match &self.current_scalar {
            Some(Scalar::Bool(flag)) => Ok(*flag),
            Some(Scalar::String(text)) if text == "true" => Ok(true),
            Some(Scalar::String(text)) if text == "false" => Ok(false),
            _ => Err(AnalyzeError::malformed(format!(
                "Cannot read boolean from token [{}]",
                describe(self.current_token)
            ))),
        }
    }

    fn map(&mut self) -> Result<Map<String, Value>> {
        if self.current_token != Some(Token::StartObject) {
            return Err(AnalyzeError::malformed(format!(
                "Expected [START_OBJECT] but found [{}]",
                describe(self.current_token)
            )));
        }

        let mut stack = vec![Building::Object(Map::new(), None)];
        loop {
            let token = self.next_token()?.ok_or_else(|| {
                AnalyzeError::malformed("Malformed content, object is not closed")
            })?;

            let finished = match token {
                Token::StartObject => {
                    stack.push(Building::Object(Map::new(), None));
                    continue;
                }
                Token::StartArray => {
                    stack.push(Building::Array(Vec::new()));
                    continue;
                }
                Token::FieldName => {
                    if let Some(Building::Object(_, key)) = stack.last_mut() {
                        *key = self.current_name.clone();
                    }
                    continue;
                }
                Token::EndObject | Token::EndArray => match stack.pop() {
                    Some(Building::Object(map, _)) if stack.is_empty() => return Ok(map),
                    Some(Building::Object(map, _)) => Value::Object(map),
                    Some(Building::Array(items)) => Value::Array(items),
                    None => return Err(unbalanced()),
                },
                _ => scalar_value(self.current_scalar.take())?,
            };

            stack.last_mut().ok_or_else(unbalanced)?.push(finished);
        }
    }
}

fn unbalanced() -> AnalyzeError {
    AnalyzeError::malformed("Malformed content, unbalanced object")
}

fn scalar_value(scalar: Option<Scalar>) -> Result<Value> {
    Ok(match scalar {
        Some(Scalar::String(text)) => Value::String(text),
        // Integers beyond 64 bits become floats inside settings
        Some(Scalar::Number(text)) => {
            Value::Number(text.parse::<Number>().map_err(AnalyzeError::body_parse)?)
        }
        Some(Scalar::Bool(flag)) => Value::Bool(flag),
        Some(Scalar::Null) | None => Value::Null,
    })
}

fn describe(token: Option<Token>) -> String {
    token.map_or_else(|| "EOF".to_string(), |t| t.to_string())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    /// Replays a fixed list of events.
    struct Replay(std::vec::IntoIter<Event>);

    impl EventSource for Replay {
        fn next_event(&mut self) -> Result<Option<Event>> {
            Ok(self.0.next())
        }
    }

    fn parser(events: Vec<Event>) -> StreamParser<Replay> {
        StreamParser::new(Replay(events.into_iter()))
    }

    fn name(name: &str) -> Event {
        Event::FieldName(name.to_string())
    }

    fn string(text: &str) -> Event {
        Event::Value(Scalar::String(text.to_string()))
    }

    #[test]
    fn test_current_name_follows_fields() {
        let mut parser = parser(vec![
            Event::StartObject,
            name("outer"),
            Event::StartObject,
            name("inner"),
            Event::Value(Scalar::Number("1.50".to_string())),
            Event::EndObject,
            name("next"),
            string("x"),
            Event::EndObject,
        ]);

        parser.next_token().unwrap();
        parser.next_token().unwrap();
        assert_eq!(parser.current_name(), Some("outer"));
        parser.next_token().unwrap();
        parser.next_token().unwrap();
        assert_eq!(parser.current_name(), Some("inner"));
        assert_eq!(parser.next_token().unwrap(), Some(Token::ValueNumber));
        assert_eq!(parser.text().unwrap(), "1.50");
        parser.next_token().unwrap(); // END_OBJECT
        assert_eq!(parser.current_name(), Some("outer"));
        parser.next_token().unwrap();
        assert_eq!(parser.current_name(), Some("next"));
        parser.next_token().unwrap();
        assert_eq!(parser.text().unwrap(), "x");
        assert_eq!(parser.next_token().unwrap(), Some(Token::EndObject));
        assert_eq!(parser.next_token().unwrap(), None);
    }

    #[test]
    fn test_map_consumes_object() {
        let mut parser = parser(vec![
            Event::StartObject,
            name("tokenizer"),
            Event::StartObject,
            name("type"),
            string("ngram"),
            name("token_chars"),
            Event::StartArray,
            string("letter"),
            Event::StartObject,
            Event::EndObject,
            Event::EndArray,
            name("min_gram"),
            Event::Value(Scalar::Number("2".to_string())),
            Event::EndObject,
            name("after"),
            Event::Value(Scalar::Bool(true)),
            Event::EndObject,
        ]);

        parser.next_token().unwrap();
        parser.next_token().unwrap();
        assert_eq!(parser.next_token().unwrap(), Some(Token::StartObject));

        let settings = parser.map().unwrap();
        assert_eq!(
            Value::Object(settings),
            json!({"type": "ngram", "token_chars": ["letter", {}], "min_gram": 2})
        );
        assert_eq!(parser.current_token(), Some(Token::EndObject));
        assert_eq!(parser.current_name(), Some("tokenizer"));

        assert_eq!(parser.next_token().unwrap(), Some(Token::FieldName));
        assert_eq!(parser.current_name(), Some("after"));
        assert_eq!(parser.next_token().unwrap(), Some(Token::ValueBoolean));
        assert!(parser.boolean_value().unwrap());
    }

    #[test]
    fn test_map_requires_object() {
        let mut parser = parser(vec![Event::StartArray, string("a"), Event::EndArray]);
        parser.next_token().unwrap();
        assert!(parser.map().is_err());
    }

    #[test]
    fn test_map_unclosed_object() {
        let mut parser = parser(vec![Event::StartObject, name("type")]);
        parser.next_token().unwrap();
        assert!(parser.map().is_err());
    }

    #[test]
    fn test_boolean_values() {
        for (event, expected) in [
            (Event::Value(Scalar::Bool(true)), true),
            (string("false"), false),
        ] {
            let mut parser = parser(vec![event]);
            parser.next_token().unwrap();
            assert!(parser.is_boolean_value());
            assert_eq!(parser.boolean_value().unwrap(), expected);
        }

        for event in [
            string("yes"),
            Event::Value(Scalar::Number("1".to_string())),
            Event::Value(Scalar::Null),
        ] {
            let mut parser = parser(vec![event]);
            parser.next_token().unwrap();
            assert!(!parser.is_boolean_value());
            assert!(parser.boolean_value().is_err());
        }
    }

    #[test]
    fn test_null_has_no_text() {
        let mut parser = parser(vec![Event::Value(Scalar::Null)]);
        assert_eq!(parser.next_token().unwrap(), Some(Token::ValueNull));
        assert!(parser.text().is_err());
    }
}
