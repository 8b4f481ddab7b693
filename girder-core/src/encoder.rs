//! The encoder chain: content-negotiation core of the rendering pipeline.
//!
//! An [`Encoder`] is a capability: it reports whether it can handle a given
//! content value and, if so, serializes it. [`encode_through`] scans an
//! ordered, caller-supplied list and invokes the first encoder whose
//! predicate answers yes — list order is the only precedence signal, so
//! callers put specific encoders (error-to-HTML) before generic catch-alls
//! (string passthrough).
//!
//! Every encoder receives the full sibling list so that encoders holding
//! nested values can recurse through the same resolution process instead of
//! hardcoding a sibling (see [`ValueThrough`]).

use crate::application::Application;
use crate::content::Content;
use crate::error::Error;
use crate::value::Value;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

// ============================================================================
// Encoder Trait & Chain Resolver
// ============================================================================

/// Capability that serializes a content value to a string representation.
pub trait Encoder: Send + Sync {
    /// Whether this encoder can handle `content`. A pure predicate: no side
    /// effects, never fails.
    fn can_encode(&self, content: &Content) -> bool;

    /// Serialize `content`. Receives the application handle (for auxiliary
    /// services such as template paths) and the full encoder list (for
    /// recursion into nested values).
    fn encode(
        &self,
        app: &Application,
        content: &Content,
        encoders: &[Arc<dyn Encoder>],
    ) -> Result<String, Error>;

    /// The encoder's name, for diagnostics.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// Find the first encoder in `encoders` that can handle `content` and
/// invoke it.
///
/// Fails with [`Error::UnencodableContent`] naming the content's variant
/// when nothing matches; an unhandled content value is fatal for the
/// response and never silently becomes an empty body.
pub fn encode_through(
    app: &Application,
    content: &Content,
    encoders: &[Arc<dyn Encoder>],
) -> Result<String, Error> {
    for encoder in encoders {
        if encoder.can_encode(content) {
            debug!(
                encoder = encoder.name(),
                content = content.type_name(),
                "content encoder selected"
            );
            return encoder.encode(app, content, encoders);
        }
    }

    Err(Error::UnencodableContent(content.type_name().to_string()))
}

// ============================================================================
// JSON:API Envelope
// ============================================================================

/// The JSON:API version this framework speaks.
pub const JSON_API_VERSION: &str = "1.0";

/// Top-level JSON:API document: `jsonapi` metadata plus either `errors` or
/// `data`. The member order here is a wire contract; do not reorder fields.
#[derive(Debug, Clone, Serialize)]
pub struct JsonApiDocument {
    pub jsonapi: JsonApiVersion,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<JsonApiError>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

/// The `jsonapi` metadata object.
#[derive(Debug, Clone, Serialize)]
pub struct JsonApiVersion {
    pub version: &'static str,
}

/// A JSON:API error object.
#[derive(Debug, Clone, Serialize)]
pub struct JsonApiError {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<serde_json::Value>,
}

impl JsonApiDocument {
    /// An error document.
    pub fn errors(errors: Vec<JsonApiError>) -> Self {
        Self {
            jsonapi: JsonApiVersion {
                version: JSON_API_VERSION,
            },
            errors: Some(errors),
            data: None,
        }
    }

    /// A data document.
    pub fn data(data: serde_json::Value) -> Self {
        Self {
            jsonapi: JsonApiVersion {
                version: JSON_API_VERSION,
            },
            errors: None,
            data: Some(data),
        }
    }

    /// Compact serialization.
    pub fn to_json(&self) -> Result<String, Error> {
        serde_json::to_string(self).map_err(|err| Error::Serialization(err.to_string()))
    }
}

// ============================================================================
// HTML Encoders
// ============================================================================

/// String/HTML passthrough: strings pass unchanged, absent content encodes
/// to an empty body.
pub struct TextToHtml;

impl Encoder for TextToHtml {
    fn can_encode(&self, content: &Content) -> bool {
        matches!(content, Content::Text(_) | Content::Empty)
    }

    fn encode(
        &self,
        _app: &Application,
        content: &Content,
        _encoders: &[Arc<dyn Encoder>],
    ) -> Result<String, Error> {
        match content {
            Content::Empty => Ok(String::new()),
            Content::Text(text) => Ok(text.clone()),
            other => Err(Error::UnencodableContent(other.type_name().to_string())),
        }
    }
}

/// Delegates to a value's own [`crate::RenderHtml`] capability.
pub struct RenderToHtml;

impl Encoder for RenderToHtml {
    fn can_encode(&self, content: &Content) -> bool {
        matches!(content, Content::Render(_))
    }

    fn encode(
        &self,
        _app: &Application,
        content: &Content,
        _encoders: &[Arc<dyn Encoder>],
    ) -> Result<String, Error> {
        match content {
            Content::Render(render) => Ok(render.render_html()),
            other => Err(Error::UnencodableContent(other.type_name().to_string())),
        }
    }
}

const BUILTIN_ERROR_TEMPLATE: &str = "<!DOCTYPE html>\n<html>\n<head><title>{{title}}</title></head>\n<body><h1>{{title}}</h1></body>\n</html>\n";

/// Renders an error template bound to the error's message and context.
///
/// The template is a Handlebars source with `title`, `message`, `status`
/// and `context` available. Filtering sensitive detail is the decorator
/// chain's job; by the time an error reaches this encoder its message is
/// whatever the caller decided to surface.
pub struct ErrorToHtml {
    template_file: Option<PathBuf>,
}

impl ErrorToHtml {
    /// Render with the built-in error page.
    pub fn new() -> Self {
        Self {
            template_file: None,
        }
    }

    /// Render with a template file. A relative path is resolved against the
    /// application's `path.resources` binding when one exists.
    pub fn with_template(template_file: impl Into<PathBuf>) -> Self {
        Self {
            template_file: Some(template_file.into()),
        }
    }

    fn template_source(&self, app: &Application) -> Result<String, Error> {
        let Some(file) = &self.template_file else {
            return Ok(BUILTIN_ERROR_TEMPLATE.to_string());
        };

        let path = if file.is_absolute() {
            file.clone()
        } else {
            match app.path("path.resources") {
                Ok(base) => base.join(file),
                Err(_) => file.clone(),
            }
        };

        match std::fs::read_to_string(&path) {
            Ok(source) => Ok(source),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                Err(Error::MissingTemplate(path.display().to_string()))
            }
            Err(err) => Err(Error::Io(err)),
        }
    }
}

impl Default for ErrorToHtml {
    fn default() -> Self {
        Self::new()
    }
}

impl Encoder for ErrorToHtml {
    fn can_encode(&self, content: &Content) -> bool {
        matches!(content, Content::Error(_))
    }

    fn encode(
        &self,
        app: &Application,
        content: &Content,
        _encoders: &[Arc<dyn Encoder>],
    ) -> Result<String, Error> {
        let Content::Error(err) = content else {
            return Err(Error::UnencodableContent(content.type_name().to_string()));
        };

        let source = self.template_source(app)?;
        let data = serde_json::json!({
            "title": err.title(),
            "message": err.message(),
            "status": err.status_code(),
            "context": err.context_value(),
        });

        handlebars::Handlebars::new()
            .render_template(&source, &data)
            .map_err(|render_err| Error::Template(render_err.to_string()))
    }
}

// ============================================================================
// JSON Encoders
// ============================================================================

/// Raw JSON passthrough: strings are assumed to be serialized JSON already,
/// absent content encodes to an empty body.
pub struct JsonToJson;

impl Encoder for JsonToJson {
    fn can_encode(&self, content: &Content) -> bool {
        matches!(content, Content::Text(_) | Content::Empty)
    }

    fn encode(
        &self,
        _app: &Application,
        content: &Content,
        _encoders: &[Arc<dyn Encoder>],
    ) -> Result<String, Error> {
        match content {
            Content::Empty => Ok(String::new()),
            Content::Text(text) => Ok(text.clone()),
            other => Err(Error::UnencodableContent(other.type_name().to_string())),
        }
    }
}

/// Serializes structured records into the JSON:API data envelope.
pub struct DataToJson;

impl Encoder for DataToJson {
    fn can_encode(&self, content: &Content) -> bool {
        matches!(content, Content::Data(_))
    }

    fn encode(
        &self,
        _app: &Application,
        content: &Content,
        _encoders: &[Arc<dyn Encoder>],
    ) -> Result<String, Error> {
        match content {
            Content::Data(data) => JsonApiDocument::data(data.clone()).to_json(),
            other => Err(Error::UnencodableContent(other.type_name().to_string())),
        }
    }
}

/// Serializes an error value into the JSON:API error envelope:
/// `{"jsonapi":{"version":"1.0"},"errors":[{"title":"…"}]}`.
pub struct ErrorToJson;

impl Encoder for ErrorToJson {
    fn can_encode(&self, content: &Content) -> bool {
        matches!(content, Content::Error(_))
    }

    fn encode(
        &self,
        _app: &Application,
        content: &Content,
        _encoders: &[Arc<dyn Encoder>],
    ) -> Result<String, Error> {
        match content {
            Content::Error(err) => JsonApiDocument::errors(vec![JsonApiError {
                title: err.title(),
                status: None,
                detail: None,
                meta: err.context_value().cloned(),
            }])
            .to_json(),
            other => Err(Error::UnencodableContent(other.type_name().to_string())),
        }
    }
}

// ============================================================================
// Value Unwrapping
// ============================================================================

/// Unwraps a [`Value`] container and re-encodes the inner payload through
/// the same encoder list.
pub struct ValueThrough;

impl Encoder for ValueThrough {
    fn can_encode(&self, content: &Content) -> bool {
        matches!(content, Content::Value(_))
    }

    fn encode(
        &self,
        app: &Application,
        content: &Content,
        encoders: &[Arc<dyn Encoder>],
    ) -> Result<String, Error> {
        let Content::Value(value) = content else {
            return Err(Error::UnencodableContent(content.type_name().to_string()));
        };

        let inner = match value {
            Value::Empty => Content::Empty,
            Value::Json(json) => Content::Data(json.clone()),
            Value::Error(err) => Content::Error(err.clone()),
        };

        encode_through(app, &inner, encoders)
    }
}

// ============================================================================
// Default Encoder Lists
// ============================================================================

/// The default ordered encoder list for JSON responses.
pub fn json_encoders() -> Vec<Arc<dyn Encoder>> {
    vec![
        Arc::new(ErrorToJson),
        Arc::new(ValueThrough),
        Arc::new(DataToJson),
        Arc::new(JsonToJson),
    ]
}

/// The default ordered encoder list for HTML responses.
pub fn html_encoders(error_template: Option<PathBuf>) -> Vec<Arc<dyn Encoder>> {
    let error_encoder = match error_template {
        Some(template) => ErrorToHtml::with_template(template),
        None => ErrorToHtml::new(),
    };
    vec![
        Arc::new(error_encoder),
        Arc::new(RenderToHtml),
        Arc::new(ValueThrough),
        Arc::new(TextToHtml),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;

    #[test]
    fn json_api_error_envelope_shape() {
        let doc = JsonApiDocument::errors(vec![JsonApiError {
            title: "Invalid user id".to_string(),
            status: None,
            detail: None,
            meta: None,
        }]);

        assert_eq!(
            doc.to_json().unwrap(),
            r#"{"jsonapi":{"version":"1.0"},"errors":[{"title":"Invalid user id"}]}"#
        );
    }

    #[test]
    fn json_api_data_envelope_shape() {
        let doc = JsonApiDocument::data(serde_json::json!([{"id": 1}]));
        assert_eq!(
            doc.to_json().unwrap(),
            r#"{"jsonapi":{"version":"1.0"},"data":[{"id":1}]}"#
        );
    }

    #[test]
    fn text_passthrough_and_nil_identity() {
        let app = Application::new();
        let encoders = html_encoders(None);

        let body = encode_through(&app, &Content::from("<p>hi</p>"), &encoders).unwrap();
        assert_eq!(body, "<p>hi</p>");

        let body = encode_through(&app, &Content::Empty, &encoders).unwrap();
        assert_eq!(body, "");
    }

    #[test]
    fn builtin_error_page_contains_title() {
        let app = Application::new();
        let content = Content::from(AppError::new("page not found"));

        let body = encode_through(&app, &content, &html_encoders(None)).unwrap();
        assert!(body.contains("<h1>Page not found</h1>"));
    }

    #[test]
    fn error_title_is_capitalized_in_json() {
        let app = Application::new();
        let content = Content::from(AppError::new("invalid user id"));

        let body = encode_through(&app, &content, &json_encoders()).unwrap();
        assert_eq!(
            body,
            r#"{"jsonapi":{"version":"1.0"},"errors":[{"title":"Invalid user id"}]}"#
        );
    }

    #[test]
    fn error_context_lands_in_meta() {
        let app = Application::new();
        let content =
            Content::from(AppError::new("conflict").context(serde_json::json!({"id": 3})));

        let body = encode_through(&app, &content, &json_encoders()).unwrap();
        assert!(body.contains(r#""meta":{"id":3}"#));
    }

    #[test]
    fn value_container_recurses_through_sibling_list() {
        let app = Application::new();
        let content = Content::from(Value::new(serde_json::json!({"name": "girder"})));

        let body = encode_through(&app, &content, &json_encoders()).unwrap();
        assert_eq!(
            body,
            r#"{"jsonapi":{"version":"1.0"},"data":{"name":"girder"}}"#
        );
    }

    #[test]
    fn no_match_names_the_content_type() {
        let app = Application::new();
        let err = encode_through(&app, &Content::from("text"), &[]).unwrap_err();
        match err {
            Error::UnencodableContent(name) => assert_eq!(name, "Text"),
            other => panic!("unexpected error: {other}"),
        }
    }
}
