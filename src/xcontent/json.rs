//! Streaming JSON tokenizer.
//!
//! Emits one [`Event`] per call without materializing the document, so
//! duplicate keys are reported individually and numbers keep their exact
//! source text. Nesting is tracked on an explicit stack with no depth limit.

use thiserror::Error;

use crate::error::{AnalyzeError, Result};
use crate::xcontent::parser::{Event, EventSource, Scalar};

/// Malformed JSON, with the 1-based position where it was detected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message} at line {line} column {column}")]
pub struct SyntaxError {
    message: String,
    line: usize,
    column: usize,
}

impl SyntaxError {
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn column(&self) -> usize {
        self.column
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Container {
    Object,
    Array,
}

/// What the tokenizer accepts at its current position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Expect {
    Value,
    /// First key of an object, or `}`.
    KeyOrEnd,
    /// Key after a comma.
    Key,
    /// First element of an array, or `]`.
    ValueOrEnd,
    /// `,` or the closing bracket of the innermost container.
    CommaOrEnd,
    Done,
}

/// [`EventSource`] over a JSON byte slice.
pub struct JsonTokenizer<'a> {
    input: &'a [u8],
    pos: usize,
    stack: Vec<Container>,
    expect: Expect,
}

impl<'a> JsonTokenizer<'a> {
    pub fn new(input: &'a [u8]) -> Self {
        JsonTokenizer {
            input,
            pos: 0,
            stack: Vec::new(),
            expect: Expect::Value,
        }
    }

    fn error(&self, message: impl Into<String>) -> AnalyzeError {
        let consumed = &self.input[..self.pos.min(self.input.len())];
        let line = consumed.iter().filter(|&&b| b == b'\n').count() + 1;
        let line_start = consumed
            .iter()
            .rposition(|&b| b == b'\n')
            .map_or(0, |i| i + 1);
        AnalyzeError::body_parse(SyntaxError {
            message: message.into(),
            line,
            column: self.pos - line_start + 1,
        })
    }

    fn skip_whitespace(&mut self) {
        while let Some(b' ' | b'\t' | b'\n' | b'\r') = self.input.get(self.pos) {
            self.pos += 1;
        }
    }

    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    /// State after a complete value inside the current container.
    fn after_value(&self) -> Expect {
        if self.stack.is_empty() {
            Expect::Done
        } else {
            Expect::CommaOrEnd
        }
    }

    fn close(&mut self, container: Container) -> Result<Event> {
        if self.stack.pop() != Some(container) {
            return Err(self.error("mismatched closing bracket"));
        }
        self.pos += 1;
        self.expect = self.after_value();
        Ok(match container {
            Container::Object => Event::EndObject,
            Container::Array => Event::EndArray,
        })
    }

    fn value(&mut self) -> Result<Event> {
        let event = match self.peek() {
            Some(b'{') => {
                self.pos += 1;
                self.stack.push(Container::Object);
                self.expect = Expect::KeyOrEnd;
                return Ok(Event::StartObject);
            }
            Some(b'[') => {
                self.pos += 1;
                self.stack.push(Container::Array);
                self.expect = Expect::ValueOrEnd;
                return Ok(Event::StartArray);
            }
            Some(b'"') => Event::Value(Scalar::String(self.string()?)),
            Some(b'-' | b'0'..=b'9') => Event::Value(Scalar::Number(self.number()?)),
            Some(b't') => self.literal("true", Scalar::Bool(true))?,
            Some(b'f') => self.literal("false", Scalar::Bool(false))?,
            Some(b'n') => self.literal("null", Scalar::Null)?,
            Some(_) => return Err(self.error("expected value")),
            None => return Err(self.error("unexpected end of input")),
        };
        self.expect = self.after_value();
        Ok(event)
    }

    fn key(&mut self) -> Result<Event> {
        if self.peek() != Some(b'"') {
            return Err(self.error("expected string key"));
        }
        let name = self.string()?;
        self.skip_whitespace();
        if self.peek() != Some(b':') {
            return Err(self.error("expected ':' after object key"));
        }
        self.pos += 1;
        self.expect = Expect::Value;
        Ok(Event::FieldName(name))
    }

    fn literal(&mut self, word: &str, scalar: Scalar) -> Result<Event> {
        if !self.input[self.pos..].starts_with(word.as_bytes()) {
            return Err(self.error("expected value"));
        }
        self.pos += word.len();
        Ok(Event::Value(scalar))
    }

    /// Find the end of a quoted string and let serde_json decode its escapes.
    fn string(&mut self) -> Result<String> {
        let start = self.pos;
        self.pos += 1;
        loop {
            match self.peek() {
                Some(b'"') => break,
                Some(b'\\') => self.pos += 2,
                Some(0x00..=0x1f) => return Err(self.error("control character in string")),
                Some(_) => self.pos += 1,
                None => {
                    self.pos = self.input.len();
                    return Err(self.error("unterminated string"));
                }
            }
        }
        self.pos += 1;
        serde_json::from_slice::<String>(&self.input[start..self.pos]).map_err(|e| {
            self.pos = start;
            self.error(format!("invalid string ({e})"))
        })
    }

    /// Validate a number and return its source text.
    fn number(&mut self) -> Result<String> {
        let start = self.pos;
        if self.peek() == Some(b'-') {
            self.pos += 1;
        }
        match self.peek() {
            Some(b'0') => self.pos += 1,
            Some(b'1'..=b'9') => self.digits(),
            _ => return Err(self.error("invalid number")),
        }
        if self.peek() == Some(b'.') {
            self.pos += 1;
            if !matches!(self.peek(), Some(b'0'..=b'9')) {
                return Err(self.error("expected digit after decimal point"));
            }
            self.digits();
        }
        if let Some(b'e' | b'E') = self.peek() {
            self.pos += 1;
            if let Some(b'+' | b'-') = self.peek() {
                self.pos += 1;
            }
            if !matches!(self.peek(), Some(b'0'..=b'9')) {
                return Err(self.error("expected digit in exponent"));
            }
            self.digits();
        }
        // The slice is ASCII by construction
        Ok(String::from_utf8_lossy(&self.input[start..self.pos]).into_owned())
    }

    fn digits(&mut self) {
        while let Some(b'0'..=b'9') = self.peek() {
            self.pos += 1;
        }
    }
}

impl EventSource for JsonTokenizer<'_> {
    fn next_event(&mut self) -> Result<Option<Event>> {
        self.skip_whitespace();
        let byte = self.peek();

        let event = match (self.expect, byte) {
            (Expect::Done, None) => return Ok(None),
            (Expect::Done, Some(_)) => return Err(self.error("trailing characters")),
            (_, None) => return Err(self.error("unexpected end of input")),
            (Expect::KeyOrEnd, Some(b'}')) => self.close(Container::Object)?,
            (Expect::KeyOrEnd | Expect::Key, Some(_)) => self.key()?,
            (Expect::ValueOrEnd, Some(b']')) => self.close(Container::Array)?,
            (Expect::Value | Expect::ValueOrEnd, Some(_)) => self.value()?,
            (Expect::CommaOrEnd, Some(b',')) => {
                self.pos += 1;
                self.skip_whitespace();
                match self.stack.last() {
                    Some(Container::Object) => self.key()?,
                    _ => self.value()?,
                }
            }
            (Expect::CommaOrEnd, Some(b'}')) => self.close(Container::Object)?,
            (Expect::CommaOrEnd, Some(b']')) => self.close(Container::Array)?,
            (Expect::CommaOrEnd, Some(_)) => return Err(self.error("expected ',' or closing bracket")),
        };
        Ok(Some(event))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn events(input: &str) -> Result<Vec<Event>> {
        let mut tokenizer = JsonTokenizer::new(input.as_bytes());
        let mut events = Vec::new();
        while let Some(event) = tokenizer.next_event()? {
            events.push(event);
        }
        Ok(events)
    }

    fn syntax_error(input: &str) -> SyntaxError {
        let err = events(input).unwrap_err();
        assert!(err.is_bad_request());
        match err {
            AnalyzeError::BodyParse { source } => {
                source.downcast_ref::<SyntaxError>().unwrap().clone()
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    fn name(name: &str) -> Event {
        Event::FieldName(name.to_string())
    }

    fn number(text: &str) -> Event {
        Event::Value(Scalar::Number(text.to_string()))
    }

    #[test]
    fn test_object_events() {
        let events = events(r#" {"text": ["a\"b", 1.50, true, null], "explain": false, "x": {}} "#).unwrap();
        assert_eq!(
            events,
            vec![
                Event::StartObject,
                name("text"),
                Event::StartArray,
                Event::Value(Scalar::String("a\"b".to_string())),
                number("1.50"),
                Event::Value(Scalar::Bool(true)),
                Event::Value(Scalar::Null),
                Event::EndArray,
                name("explain"),
                Event::Value(Scalar::Bool(false)),
                name("x"),
                Event::StartObject,
                Event::EndObject,
                Event::EndObject,
            ]
        );
    }

    #[test]
    fn test_duplicate_keys_are_all_emitted() {
        let events = events(r#"{"explain": ["bad"], "explain": true}"#).unwrap();
        let names: Vec<_> = events
            .iter()
            .filter_map(|event| match event {
                Event::FieldName(name) => Some(name.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(names, ["explain", "explain"]);
    }

    #[test]
    fn test_numbers_keep_source_text() {
        let events = events("[1.50, 1e2, -0, 12345678901234567890123, 2E-3]").unwrap();
        assert_eq!(
            &events[1..6],
            &[
                number("1.50"),
                number("1e2"),
                number("-0"),
                number("12345678901234567890123"),
                number("2E-3"),
            ]
        );
    }

    #[test]
    fn test_scalar_root() {
        assert_eq!(
            events(r#""été""#).unwrap(),
            vec![Event::Value(Scalar::String("été".to_string()))]
        );
    }

    #[test]
    fn test_deep_nesting() {
        let depth = 10_000;
        let input = format!("{}{}", "[".repeat(depth), "]".repeat(depth));
        assert_eq!(events(&input).unwrap().len(), depth * 2);
    }

    #[test]
    fn test_syntax_errors() {
        for input in [
            r#"{"text": "a""#,
            r#"{"text" "a"}"#,
            r#"{"text": "a",}"#,
            r#"{text: "a"}"#,
            r#"["a" "b"]"#,
            r#"[1.]"#,
            r#"[01]"#,
            r#"[tru]"#,
            r#"{"a": 1]"#,
            r#"{} {}"#,
            "",
        ] {
            let err = syntax_error(input);
            assert!(err.line() >= 1, "{input}");
        }
    }

    #[test]
    fn test_error_position() {
        let err = syntax_error("{\n  \"text\": tru\n}");
        assert_eq!(err.message(), "expected value");
        assert_eq!(err.line(), 2);
        assert_eq!(err.column(), 11);
    }
}
