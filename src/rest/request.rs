//! An incoming REST call as seen by a handler.

use std::borrow::Cow;

use crate::rest::params::RequestParams;

/// Parameters, body and declared content type of one REST call.
#[derive(Debug, Clone, Default)]
pub struct RestRequest {
    params: RequestParams,
    body: Option<Vec<u8>>,
    content_type: Option<String>,
}

impl RestRequest {
    pub fn new(params: RequestParams) -> Self {
        RestRequest {
            params,
            body: None,
            content_type: None,
        }
    }

    /// Attach a body.
    pub fn with_body<B: Into<Vec<u8>>>(mut self, body: B) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Attach the media type declared for the body (`Content-Type`).
    pub fn with_content_type<S: Into<String>>(mut self, content_type: S) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub fn params(&self) -> &RequestParams {
        &self.params
    }

    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    /// Whether the call carries a non-empty body.
    pub fn has_content(&self) -> bool {
        self.body.as_ref().is_some_and(|body| !body.is_empty())
    }

    /// The body bytes; empty when there is no body.
    pub fn content(&self) -> &[u8] {
        self.body.as_deref().unwrap_or(&[])
    }

    /// The body decoded as UTF-8, replacing invalid sequences.
    pub fn content_utf8(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(self.content())
    }
}
