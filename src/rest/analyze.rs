//! The `_analyze` REST handler.
//!
//! An [`AnalyzeRequest`] is assembled from two sources:
//!
//! 1. Query parameters (and the `{index}` path segment), always.
//! 2. The request body, when there is one. A structured body is parsed field
//!    by field and each field it names replaces what the parameters bound
//!    for that field. A body that is not structured is taken as the text to
//!    analyze, unless the parameters already supplied text.
//!
//! ```text
//! RestRequest ──► request_from_params ──► AnalyzeRequest
//!      │                                       ▲
//!      └── body ── structured? ── yes ──► build_from_content
//!                       └──────── no  ──► raw body as text
//! ```
//!
//! # Example
//!
//! ```
//! use sarissa_analyze::config::AnalyzeConfig;
//! use sarissa_analyze::rest::{RequestParams, RestAnalyzeAction, RestRequest};
//!
//! let action = RestAnalyzeAction::new(AnalyzeConfig::default());
//! let request = RestRequest::new(RequestParams::from_query_string("analyzer=standard"))
//!     .with_body(r#"{"text": ["a", "b"], "explain": true}"#);
//!
//! let analyze_request = action.prepare_request(&request).unwrap();
//! assert_eq!(analyze_request.text(), ["a", "b"]);
//! assert_eq!(analyze_request.analyzer(), Some("standard"));
//! assert!(analyze_request.explain());
//! ```

use log::debug;
use serde::Serialize;
use serde_json::Value;

use crate::analysis::definition::NameOrDefinition;
use crate::analysis::request::AnalyzeRequest;
use crate::config::AnalyzeConfig;
use crate::error::{AnalyzeError, Result};
use crate::rest::params::RequestParams;
use crate::rest::request::RestRequest;
use crate::xcontent::{
    ParseFieldMatcher, Token, XContentParser, XContentType, guess_body_content_type,
};

/// Recognized request body fields.
pub mod fields {
    use crate::xcontent::ParseField;

    pub const ANALYZER: ParseField = ParseField::new("analyzer");
    pub const TEXT: ParseField = ParseField::new("text");
    pub const FIELD: ParseField = ParseField::new("field");
    pub const TOKENIZER: ParseField = ParseField::new("tokenizer");
    pub const TOKEN_FILTERS: ParseField =
        ParseField::new("filter").with_deprecated_names(&["token_filters"]);
    pub const CHAR_FILTERS: ParseField =
        ParseField::new("char_filter").with_deprecated_names(&["char_filters"]);
    pub const EXPLAIN: ParseField = ParseField::new("explain");
    pub const ATTRIBUTES: ParseField = ParseField::new("attributes");
}

/// The analysis engine executing assembled requests.
pub trait AnalyzeClient {
    type Response: Serialize;

    fn analyze(&self, request: AnalyzeRequest) -> Result<Self::Response>;
}

/// Handler for `GET|POST /_analyze` and `GET|POST /{index}/_analyze`.
#[derive(Debug, Clone, Default)]
pub struct RestAnalyzeAction {
    config: AnalyzeConfig,
}

impl RestAnalyzeAction {
    /// Method and path pattern pairs this handler serves.
    pub const ROUTES: &'static [(&'static str, &'static str)] = &[
        ("GET", "/_analyze"),
        ("GET", "/{index}/_analyze"),
        ("POST", "/_analyze"),
        ("POST", "/{index}/_analyze"),
    ];

    pub fn new(config: AnalyzeConfig) -> Self {
        RestAnalyzeAction { config }
    }

    pub fn config(&self) -> &AnalyzeConfig {
        &self.config
    }

    /// Assemble the analyze request for one REST call.
    ///
    /// Any error means the whole call must be rejected; no partially built
    /// request is returned.
    pub fn prepare_request(&self, request: &RestRequest) -> Result<AnalyzeRequest> {
        let params = request.params();
        let mut analyze_request = request_from_params(params, &self.config);

        if request.has_content() {
            let content = request.content();
            if content.len() > self.config.max_body_bytes {
                return Err(AnalyzeError::malformed(format!(
                    "Request body of {} bytes exceeds the limit of {} bytes",
                    content.len(),
                    self.config.max_body_bytes
                )));
            }

            match guess_body_content_type(request.content_type(), content) {
                Some(content_type) => {
                    debug!("Parsing {content_type} analyze request body");
                    build_from_content(
                        content,
                        content_type,
                        &mut analyze_request,
                        self.config.parse_field_matcher(),
                    )?;
                }
                None => {
                    if analyze_request.text().is_empty() {
                        debug!("Using unstructured request body as text");
                        analyze_request.set_text(vec![request.content_utf8().into_owned()]);
                    }
                }
            }
        }

        let unused = params.unconsumed();
        if !unused.is_empty() {
            debug!("Ignoring unrecognized analyze parameters {unused:?}");
        }

        Ok(analyze_request)
    }

    /// Assemble the request, run it through `client` and return the
    /// response as a JSON document.
    pub fn handle<C: AnalyzeClient>(&self, request: &RestRequest, client: &C) -> Result<Value> {
        let analyze_request = self.prepare_request(request)?;
        let response = client.analyze(analyze_request)?;
        Ok(serde_json::to_value(&response)?)
    }
}

/// Bind query parameters into a new request.
///
/// Unknown parameters are ignored. `char_filter` values are added to the
/// token filters, not the char filters.
pub fn request_from_params(params: &RequestParams, config: &AnalyzeConfig) -> AnalyzeRequest {
    let texts = params.param_as_string_array_or_empty_if_all("text");

    let mut request = AnalyzeRequest::new(params.param("index").map(str::to_string));
    if !config.default_attributes.is_empty() {
        request.set_attributes(config.default_attributes.clone());
    }

    request.set_text(texts);
    request.set_analyzer(params.param("analyzer").map(str::to_string));
    request.set_field(params.param("field").map(str::to_string));
    if let Some(tokenizer) = params.param("tokenizer") {
        request.set_tokenizer(tokenizer);
    }
    for filter in params.param_as_string_array("filter", &[]) {
        request.add_token_filter(filter);
    }
    // char_filter parameters are read into the token filter list, not the char filter list
    for char_filter in params.param_as_string_array("char_filter", &[]) {
        request.add_token_filter(char_filter);
    }
    request.set_explain(params.param_as_boolean("explain", false));
    let attributes = params.param_as_string_array("attributes", request.attributes());
    request.set_attributes(attributes);

    request
}

/// Parse a structured body into `request`.
///
/// Fields present in the body replace the values already set on `request`.
/// On error `request` may have been partly updated and must be discarded.
pub fn build_from_content(
    content: &[u8],
    content_type: XContentType,
    request: &mut AnalyzeRequest,
    matcher: ParseFieldMatcher,
) -> Result<()> {
    let mut parser = content_type.create_parser(content)?;
    parse_body(parser.as_mut(), request, matcher)?;

    if parser.next_token()?.is_some() {
        return Err(AnalyzeError::malformed(
            "Malformed content, found extra data after parsing",
        ));
    }
    Ok(())
}

/// Walk the top-level object of a body, dispatching on the current field.
pub fn parse_body<P: XContentParser + ?Sized>(
    parser: &mut P,
    request: &mut AnalyzeRequest,
    matcher: ParseFieldMatcher,
) -> Result<()> {
    if parser.next_token()? != Some(Token::StartObject) {
        return Err(AnalyzeError::malformed(
            "Malformed content, must start with an object",
        ));
    }

    let mut current_field: Option<String> = None;
    loop {
        let token = match parser.next_token()? {
            Some(Token::EndObject) => break,
            Some(token) => token,
            None => {
                return Err(AnalyzeError::malformed(
                    "Malformed content, object is not closed",
                ));
            }
        };

        if token == Token::FieldName {
            current_field = parser.current_name().map(str::to_string);
            continue;
        }

        let name = current_field.as_deref();
        let field = name.unwrap_or_default();

        if matcher.matches(name, &fields::TEXT)? && token == Token::ValueString {
            request.set_text(vec![parser.text()?]);
        } else if matcher.matches(name, &fields::TEXT)? && token == Token::StartArray {
            let texts = read_scalar_array(parser, field, "text")?;
            request.set_text(texts);
        } else if matcher.matches(name, &fields::ANALYZER)? && token == Token::ValueString {
            request.set_analyzer(Some(parser.text()?));
        } else if matcher.matches(name, &fields::FIELD)? && token == Token::ValueString {
            request.set_field(Some(parser.text()?));
        } else if matcher.matches(name, &fields::TOKENIZER)? {
            match token {
                Token::ValueString => request.set_tokenizer(parser.text()?),
                Token::StartObject => request.set_tokenizer(parser.map()?),
                _ => {
                    return Err(AnalyzeError::malformed(format!(
                        "{field} should be tokenizer's name or setting"
                    )));
                }
            }
        } else if matcher.matches(name, &fields::TOKEN_FILTERS)? && token == Token::StartArray {
            let filters = read_definitions(parser, field, "filter's")?;
            request.set_token_filters(filters);
        } else if matcher.matches(name, &fields::CHAR_FILTERS)? && token == Token::StartArray {
            let filters = read_definitions(parser, field, "char filter's")?;
            request.set_char_filters(filters);
        } else if matcher.matches(name, &fields::EXPLAIN)? {
            if parser.is_boolean_value() {
                request.set_explain(parser.boolean_value()?);
            } else {
                return Err(AnalyzeError::malformed(format!(
                    "{field} must be either 'true' or 'false'"
                )));
            }
        } else if matcher.matches(name, &fields::ATTRIBUTES)? && token == Token::StartArray {
            let attributes = read_scalar_array(parser, field, "attribute name")?;
            request.set_attributes(attributes);
        } else {
            return Err(AnalyzeError::malformed(format!(
                "Unknown parameter [{field}] in request body or parameter is of the wrong type[{token}] "
            )));
        }
    }

    Ok(())
}

/// Read an array of non-null scalars as strings, up to its `EndArray`.
fn read_scalar_array<P: XContentParser + ?Sized>(
    parser: &mut P,
    field: &str,
    element: &str,
) -> Result<Vec<String>> {
    let mut values = Vec::new();
    loop {
        match parser.next_token()? {
            Some(Token::EndArray) => return Ok(values),
            Some(token) if token.is_value() && token != Token::ValueNull => {
                values.push(parser.text()?);
            }
            _ => {
                return Err(AnalyzeError::malformed(format!(
                    "{field} array element should only contain {element}"
                )));
            }
        }
    }
}

/// Read an array of names and settings objects, up to its `EndArray`.
fn read_definitions<P: XContentParser + ?Sized>(
    parser: &mut P,
    field: &str,
    kind: &str,
) -> Result<Vec<NameOrDefinition>> {
    let mut definitions = Vec::new();
    loop {
        match parser.next_token()? {
            Some(Token::EndArray) => return Ok(definitions),
            Some(Token::ValueString) => {
                definitions.push(NameOrDefinition::from_name(parser.text()?));
            }
            Some(Token::StartObject) => {
                definitions.push(NameOrDefinition::from_settings(parser.map()?));
            }
            _ => {
                return Err(AnalyzeError::malformed(format!(
                    "{field} array element should contain {kind} name or setting"
                )));
            }
        }
    }
}
