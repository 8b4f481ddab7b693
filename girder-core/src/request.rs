//! The incoming request abstraction.
//!
//! A [`Request`] wraps the raw pieces of an HTTP request (method, path,
//! query string, headers, raw body) and exposes them through the [`Value`]
//! container, so lookups never panic: a missing parameter comes back as an
//! error value the caller can inspect or surface.
//!
//! Body decoding is pluggable. The request resolves a [`BodyDecoder`] from
//! the application's container by name, so swapping the body format is a
//! wiring change, not a request change.

use crate::application::Application;
use crate::error::AppError;
use crate::value::{Map, Value};
use std::collections::HashMap;
use std::sync::Arc;

/// Container binding name for the request body decoder.
pub const BODY_DECODER: &str = "request.body_decoder";

/// HTTP request methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Head,
    Options,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
            Method::Patch => "PATCH",
            Method::Head => "HEAD",
            Method::Options => "OPTIONS",
        }
    }

    /// Parse a method token, case-insensitively.
    pub fn parse(token: &str) -> Option<Self> {
        match token.to_ascii_uppercase().as_str() {
            "GET" => Some(Method::Get),
            "POST" => Some(Method::Post),
            "PUT" => Some(Method::Put),
            "DELETE" => Some(Method::Delete),
            "PATCH" => Some(Method::Patch),
            "HEAD" => Some(Method::Head),
            "OPTIONS" => Some(Method::Options),
            _ => None,
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decodes a raw request body into a [`Value`].
#[derive(Clone)]
pub struct BodyDecoder {
    decode: Arc<dyn Fn(&str) -> Value + Send + Sync>,
}

impl BodyDecoder {
    pub fn new(decode: impl Fn(&str) -> Value + Send + Sync + 'static) -> Self {
        Self {
            decode: Arc::new(decode),
        }
    }

    /// A decoder for JSON bodies. An empty body decodes to the absent
    /// value; malformed JSON decodes to an error value.
    pub fn json() -> Self {
        Self::new(|raw| {
            if raw.trim().is_empty() {
                return Value::empty();
            }
            match serde_json::from_str::<serde_json::Value>(raw) {
                Ok(parsed) => Value::new(parsed),
                Err(err) => Value::error(AppError::new(format!("invalid request body: {err}"))),
            }
        })
    }

    pub fn decode(&self, raw: &str) -> Value {
        (self.decode)(raw)
    }
}

/// An incoming request.
pub struct Request {
    app: Application,
    method: Method,
    path: String,
    query_string: String,
    headers: HashMap<String, String>,
    content: String,
    route_params: Map,
    body: Option<Value>,
}

impl Request {
    /// A request for `uri`, which may carry a query string after `?`.
    pub fn new(app: Application, method: Method, uri: &str) -> Self {
        let (path, query_string) = match uri.split_once('?') {
            Some((path, query)) => (path.to_string(), query.to_string()),
            None => (uri.to_string(), String::new()),
        };
        Self {
            app,
            method,
            path,
            query_string,
            headers: HashMap::new(),
            content: String::new(),
            route_params: Map::new(),
            body: None,
        }
    }

    /// Set a header, builder-style.
    pub fn with_header(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Set the raw body, builder-style.
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    /// Set the route parameters extracted by the router, builder-style.
    pub fn with_route_params(mut self, params: Map) -> Self {
        self.route_params = params;
        self
    }

    pub fn app(&self) -> &Application {
        &self.app
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn query_string(&self) -> &str {
        &self.query_string
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    /// The raw, undecoded body.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Replace the raw body. Any memoized decoded body no longer matches,
    /// so it is discarded.
    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
        self.body = None;
    }

    /// A value from the decoded body, by key. An empty key yields the whole
    /// body. Decodes at most once per content; decoding problems and
    /// missing keys surface as error values.
    pub fn body(&mut self, key: &str) -> Value {
        if self.body.is_none() {
            self.body = Some(self.decode_body());
        }
        match &self.body {
            Some(decoded) => decoded.get(key),
            None => Value::empty(),
        }
    }

    /// A value from the body, or `fallback` when absent or erroneous.
    pub fn body_or(&mut self, key: &str, fallback: impl Into<Value>) -> Value {
        let value = self.body(key);
        if value.filled() { value } else { fallback.into() }
    }

    /// A route parameter, falling back to the query string.
    pub fn parameter(&self, key: &str) -> Value {
        if self.route_params.has(key) {
            return self.route_params.get(key);
        }
        self.query(key)
    }

    /// A route or query parameter, or `fallback` when absent.
    pub fn parameter_or(&self, key: &str, fallback: impl Into<Value>) -> Value {
        let value = self.parameter(key);
        if value.filled() { value } else { fallback.into() }
    }

    /// A query-string parameter.
    pub fn query(&self, key: &str) -> Value {
        Map::from_query(&self.query_string).get(key)
    }

    /// A query-string parameter, or `fallback` when absent.
    pub fn query_or(&self, key: &str, fallback: impl Into<Value>) -> Value {
        let value = self.query(key);
        if value.filled() { value } else { fallback.into() }
    }

    fn decode_body(&self) -> Value {
        match self.app.make::<BodyDecoder>(BODY_DECODER) {
            Ok(decoder) => decoder.decode(&self.content),
            Err(_) => Value::error(AppError::new("no request body decoder found")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app_with_json_decoder() -> Application {
        let app = Application::new();
        app.instance(BODY_DECODER, BodyDecoder::json());
        app
    }

    #[test]
    fn splits_uri_into_path_and_query() {
        let request = Request::new(Application::new(), Method::Get, "/users?page=2");
        assert_eq!(request.path(), "/users");
        assert_eq!(request.query("page").int().unwrap(), 2);
    }

    #[test]
    fn body_decodes_through_bound_decoder() {
        let mut request = Request::new(app_with_json_decoder(), Method::Post, "/users")
            .with_content(r#"{"name": "Ada"}"#);

        assert_eq!(request.body("name").string().unwrap(), "Ada");
        assert!(request.body("missing").is_error());
    }

    #[test]
    fn body_without_decoder_yields_error_value() {
        let mut request =
            Request::new(Application::new(), Method::Post, "/users").with_content("{}");
        let value = request.body("");
        assert_eq!(
            value.error_value().map(|e| e.message()),
            Some("no request body decoder found")
        );
    }

    #[test]
    fn set_content_discards_decoded_body() {
        let mut request = Request::new(app_with_json_decoder(), Method::Post, "/users")
            .with_content(r#"{"name": "Ada"}"#);
        assert_eq!(request.body("name").string().unwrap(), "Ada");

        request.set_content(r#"{"name": "Grace"}"#);
        assert_eq!(request.body("name").string().unwrap(), "Grace");
    }

    #[test]
    fn parameter_prefers_route_params_over_query() {
        let request = Request::new(Application::new(), Method::Get, "/users/7?id=9&sort=asc")
            .with_route_params(Map::from_pairs([("id", "7")]));

        assert_eq!(request.parameter("id").string().unwrap(), "7");
        assert_eq!(request.parameter("sort").string().unwrap(), "asc");
        assert_eq!(
            request.parameter_or("limit", 25i64).int().unwrap(),
            25
        );
    }

    #[test]
    fn malformed_json_body_is_an_error_value() {
        let mut request = Request::new(app_with_json_decoder(), Method::Post, "/users")
            .with_content("{not json");
        assert!(request.body("").is_error());
    }
}
