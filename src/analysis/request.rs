//! The analyze request handed to the analysis engine.

use serde::{Deserialize, Serialize};

use crate::analysis::definition::NameOrDefinition;

/// Attributes reported for each token when the request does not ask for any.
pub const DEFAULT_ATTRIBUTES: &[&str] = &[];

/// A request to run text through an analyzer, or through an ad-hoc chain of
/// char filters, a tokenizer and token filters.
///
/// This is a plain data holder. Setters taking a whole collection replace the
/// previous value; it never merges values from different sources and never
/// checks cross-field legality such as `field` together with `analyzer`.
/// That is up to the engine executing the request.
///
/// # Example
///
/// ```
/// use sarissa_analyze::analysis::request::AnalyzeRequest;
///
/// let mut request = AnalyzeRequest::with_index("books");
/// request.set_text(vec!["Quick Brown Foxes".to_string()]);
/// request.set_tokenizer("whitespace");
/// request.add_token_filter("lowercase");
///
/// assert_eq!(request.index(), Some("books"));
/// assert_eq!(request.token_filters().len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    index: Option<String>,
    text: Vec<String>,
    analyzer: Option<String>,
    field: Option<String>,
    tokenizer: Option<NameOrDefinition>,
    token_filters: Vec<NameOrDefinition>,
    char_filters: Vec<NameOrDefinition>,
    explain: bool,
    attributes: Vec<String>,
}

impl Default for AnalyzeRequest {
    fn default() -> Self {
        Self::new(None)
    }
}

impl AnalyzeRequest {
    /// Create an empty request, optionally scoped to an index.
    pub fn new(index: Option<String>) -> Self {
        AnalyzeRequest {
            index,
            text: Vec::new(),
            analyzer: None,
            field: None,
            tokenizer: None,
            token_filters: Vec::new(),
            char_filters: Vec::new(),
            explain: false,
            attributes: DEFAULT_ATTRIBUTES.iter().map(|a| a.to_string()).collect(),
        }
    }

    /// Create an empty request scoped to the given index.
    pub fn with_index<S: Into<String>>(index: S) -> Self {
        Self::new(Some(index.into()))
    }

    pub fn index(&self) -> Option<&str> {
        self.index.as_deref()
    }

    pub fn text(&self) -> &[String] {
        &self.text
    }

    /// Replace the texts to analyze.
    pub fn set_text(&mut self, text: Vec<String>) {
        self.text = text;
    }

    pub fn analyzer(&self) -> Option<&str> {
        self.analyzer.as_deref()
    }

    pub fn set_analyzer(&mut self, analyzer: Option<String>) {
        self.analyzer = analyzer;
    }

    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }

    pub fn set_field(&mut self, field: Option<String>) {
        self.field = field;
    }

    pub fn tokenizer(&self) -> Option<&NameOrDefinition> {
        self.tokenizer.as_ref()
    }

    /// Set the tokenizer by name or inline settings.
    pub fn set_tokenizer<T: Into<NameOrDefinition>>(&mut self, tokenizer: T) {
        self.tokenizer = Some(tokenizer.into());
    }

    pub fn token_filters(&self) -> &[NameOrDefinition] {
        &self.token_filters
    }

    /// Append a token filter; order determines the pipeline order.
    pub fn add_token_filter<T: Into<NameOrDefinition>>(&mut self, filter: T) {
        self.token_filters.push(filter.into());
    }

    /// Replace the whole token filter chain.
    pub fn set_token_filters(&mut self, filters: Vec<NameOrDefinition>) {
        self.token_filters = filters;
    }

    pub fn char_filters(&self) -> &[NameOrDefinition] {
        &self.char_filters
    }

    /// Append a char filter; order determines the pipeline order.
    pub fn add_char_filter<T: Into<NameOrDefinition>>(&mut self, filter: T) {
        self.char_filters.push(filter.into());
    }

    /// Replace the whole char filter chain.
    pub fn set_char_filters(&mut self, filters: Vec<NameOrDefinition>) {
        self.char_filters = filters;
    }

    pub fn explain(&self) -> bool {
        self.explain
    }

    pub fn set_explain(&mut self, explain: bool) {
        self.explain = explain;
    }

    pub fn attributes(&self) -> &[String] {
        &self.attributes
    }

    /// Replace the token attributes to report.
    pub fn set_attributes(&mut self, attributes: Vec<String>) {
        self.attributes = attributes;
    }
}
