//! Structured content types accepted in request bodies.

use std::fmt;

use crate::error::Result;
use crate::xcontent::json::JsonTokenizer;
use crate::xcontent::parser::{StreamParser, XContentParser};
use crate::xcontent::yaml::YamlEvents;

/// A structured serialization a request body may be written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum XContentType {
    Json,
    Yaml,
}

impl XContentType {
    /// Resolve a declared media type such as `application/json; charset=UTF-8`.
    pub fn from_media_type(media_type: &str) -> Option<Self> {
        let essence = media_type
            .split(';')
            .next()
            .unwrap_or("")
            .trim()
            .to_ascii_lowercase();

        match essence.as_str() {
            "application/json" | "text/json" => Some(XContentType::Json),
            "application/yaml" | "application/x-yaml" | "text/yaml" => Some(XContentType::Yaml),
            s if s.starts_with("application/") && s.ends_with("+json") => Some(XContentType::Json),
            _ => None,
        }
    }

    /// Guess the content type from the first bytes of a body.
    pub fn sniff(content: &[u8]) -> Option<Self> {
        let start = content.iter().position(|b| !b.is_ascii_whitespace())?;
        let content = &content[start..];

        if content.starts_with(b"{") {
            Some(XContentType::Json)
        } else if content.starts_with(b"---") {
            Some(XContentType::Yaml)
        } else {
            None
        }
    }

    /// Create a token cursor over a body of this type.
    ///
    /// Syntax errors surface as [`AnalyzeError::BodyParse`](crate::error::AnalyzeError::BodyParse),
    /// from here for YAML and from [`XContentParser::next_token`] for JSON.
    pub fn create_parser<'a>(&self, content: &'a [u8]) -> Result<Box<dyn XContentParser + 'a>> {
        Ok(match self {
            XContentType::Json => Box::new(StreamParser::new(JsonTokenizer::new(content))),
            XContentType::Yaml => Box::new(StreamParser::new(YamlEvents::from_slice(content)?)),
        })
    }

    pub fn media_type(&self) -> &'static str {
        match self {
            XContentType::Json => "application/json",
            XContentType::Yaml => "application/yaml",
        }
    }
}

impl fmt::Display for XContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.media_type())
    }
}

/// Resolve the content type of a request body.
///
/// A recognized declared media type wins; otherwise the body is sniffed.
/// `None` means the body is not structured and should be taken as raw text.
pub fn guess_body_content_type(declared: Option<&str>, content: &[u8]) -> Option<XContentType> {
    declared
        .and_then(XContentType::from_media_type)
        .or_else(|| XContentType::sniff(content))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AnalyzeError;
    use crate::xcontent::parser::Token;

    #[test]
    fn test_from_media_type() {
        assert_eq!(
            XContentType::from_media_type("application/json"),
            Some(XContentType::Json)
        );
        assert_eq!(
            XContentType::from_media_type("Application/JSON; charset=UTF-8"),
            Some(XContentType::Json)
        );
        assert_eq!(
            XContentType::from_media_type("application/vnd.sarissa+json"),
            Some(XContentType::Json)
        );
        assert_eq!(
            XContentType::from_media_type("application/x-yaml"),
            Some(XContentType::Yaml)
        );
        assert_eq!(XContentType::from_media_type("text/plain"), None);
        assert_eq!(XContentType::from_media_type(""), None);
    }

    #[test]
    fn test_sniff() {
        assert_eq!(XContentType::sniff(b"  \n{\"text\": \"a\"}"), Some(XContentType::Json));
        assert_eq!(XContentType::sniff(b"---\ntext: a\n"), Some(XContentType::Yaml));
        assert_eq!(XContentType::sniff(b"just some words"), None);
        assert_eq!(XContentType::sniff(b"[1, 2]"), None);
        assert_eq!(XContentType::sniff(b"   "), None);
    }

    #[test]
    fn test_declared_type_wins() {
        assert_eq!(
            guess_body_content_type(Some("application/json"), b"[\"a\"]"),
            Some(XContentType::Json)
        );
        // Unrecognized declarations fall back to sniffing
        assert_eq!(
            guess_body_content_type(Some("text/plain"), b"{\"a\": 1}"),
            Some(XContentType::Json)
        );
        assert_eq!(guess_body_content_type(Some("text/plain"), b"hello"), None);
        assert_eq!(guess_body_content_type(None, b"hello"), None);
    }

    #[test]
    fn test_create_parser() {
        let mut parser = XContentType::Yaml
            .create_parser(b"---\nexplain: true\n")
            .unwrap();
        assert_eq!(parser.next_token().unwrap(), Some(Token::StartObject));
        assert_eq!(parser.next_token().unwrap(), Some(Token::FieldName));
        assert_eq!(parser.current_name(), Some("explain"));
        assert_eq!(parser.next_token().unwrap(), Some(Token::ValueBoolean));

        let mut parser = XContentType::Json.create_parser(b"{\"text\": ").unwrap();
        parser.next_token().unwrap();
        parser.next_token().unwrap();
        let err = parser.next_token().unwrap_err();
        assert!(matches!(err, AnalyzeError::BodyParse { .. }));
        assert_eq!(err.to_string(), "Failed to parse request body");
    }
}
