//! The response: status, headers, content, and a memoized encoded body.

use crate::application::Application;
use crate::content::Content;
use crate::encoder::{self, Encoder};
use crate::error::Error;
use crate::status::DEFAULT_STATUS;
use std::collections::HashMap;
use std::sync::Arc;

/// An outgoing response.
///
/// Carries the application-level content value and the ordered encoder list
/// that will serialize it. The encoded body is computed lazily by [`body`]
/// and memoized; replacing the content discards the memo.
///
/// [`body`]: Response::body
pub struct Response {
    app: Application,
    status: u16,
    headers: HashMap<String, String>,
    content: Content,
    encoders: Vec<Arc<dyn Encoder>>,
    body: Option<String>,
}

impl Response {
    /// A response with an explicit encoder list.
    pub fn new(app: Application, encoders: Vec<Arc<dyn Encoder>>) -> Self {
        Self {
            app,
            status: DEFAULT_STATUS,
            headers: HashMap::new(),
            content: Content::Empty,
            encoders,
            body: None,
        }
    }

    /// A JSON response using the default JSON encoder list.
    pub fn json(app: Application, content: impl Into<Content>) -> Self {
        Self::new(app, encoder::json_encoders())
            .with_header("Content-Type", "application/json")
            .with_content(content)
    }

    /// An HTML response using the default HTML encoder list.
    pub fn html(app: Application, content: impl Into<Content>) -> Self {
        Self::new(app, encoder::html_encoders(None))
            .with_header("Content-Type", "text/html")
            .with_content(content)
    }

    /// Set the content, builder-style.
    pub fn with_content(mut self, content: impl Into<Content>) -> Self {
        self.set_content(content.into());
        self
    }

    /// Set a header, builder-style. Replaces an existing value.
    pub fn with_header(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn app(&self) -> &Application {
        &self.app
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn set_status(&mut self, status: u16) {
        self.status = status;
    }

    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    pub fn content(&self) -> &Content {
        &self.content
    }

    /// Replace the content. Any memoized body no longer describes the
    /// response, so it is discarded.
    pub fn set_content(&mut self, content: Content) {
        self.content = content;
        self.body = None;
    }

    /// The encoded body.
    ///
    /// Encodes through the response's encoder list on first call and
    /// returns the memoized result afterwards. Encoding failures are
    /// reported to the application's loggers before being returned.
    pub fn body(&mut self) -> Result<&str, Error> {
        if let Some(ref body) = self.body {
            return Ok(body);
        }

        let encoded = match encoder::encode_through(&self.app, &self.content, &self.encoders) {
            Ok(encoded) => encoded,
            Err(err) => {
                self.app
                    .log_error(&format!("failed to encode response body: {err}"));
                return Err(err);
            }
        };

        Ok(&*self.body.insert(encoded))
    }
}

impl std::fmt::Debug for Response {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Response")
            .field("status", &self.status)
            .field("headers", &self.headers)
            .field("content", &self.content)
            .field("body", &self.body)
            .finish_non_exhaustive()
    }
}
