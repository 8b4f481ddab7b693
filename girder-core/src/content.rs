//! The content value a response wraps before encoding.
//!
//! Dispatch over content is a closed set of tagged variants plus one
//! extension point: the [`RenderHtml`] capability for values that know how
//! to render themselves. Encoders discover what they can handle by matching
//! on the variant, never by downcasting.

use crate::error::AppError;
use crate::value::Value;
use std::sync::Arc;

/// A value that renders itself as an HTML fragment.
pub trait RenderHtml: Send + Sync {
    fn render_html(&self) -> String;
}

/// The application-level payload a response carries before encoding.
#[derive(Clone)]
pub enum Content {
    /// No content; encodes to an empty body.
    Empty,
    /// A pre-rendered string, passed through unchanged.
    Text(String),
    /// Structured data, serialized by a data encoder.
    Data(serde_json::Value),
    /// An application error.
    Error(AppError),
    /// A value that renders itself as HTML.
    Render(Arc<dyn RenderHtml>),
    /// A Value container produced by request parsing.
    Value(Value),
}

impl Content {
    /// The variant name, used in diagnostics when no encoder matches.
    pub fn type_name(&self) -> &'static str {
        match self {
            Content::Empty => "Empty",
            Content::Text(_) => "Text",
            Content::Data(_) => "Data",
            Content::Error(_) => "Error",
            Content::Render(_) => "Render",
            Content::Value(_) => "Value",
        }
    }

    /// Whether this is the absent content.
    pub fn is_empty(&self) -> bool {
        matches!(self, Content::Empty)
    }

    /// The error, if this content is one.
    pub fn as_error(&self) -> Option<&AppError> {
        match self {
            Content::Error(err) => Some(err),
            _ => None,
        }
    }
}

impl std::fmt::Debug for Content {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Content::Empty => write!(f, "Empty"),
            Content::Text(s) => f.debug_tuple("Text").field(s).finish(),
            Content::Data(v) => f.debug_tuple("Data").field(v).finish(),
            Content::Error(e) => f.debug_tuple("Error").field(e).finish(),
            Content::Render(_) => write!(f, "Render(..)"),
            Content::Value(v) => f.debug_tuple("Value").field(v).finish(),
        }
    }
}

impl PartialEq for Content {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Content::Empty, Content::Empty) => true,
            (Content::Text(a), Content::Text(b)) => a == b,
            (Content::Data(a), Content::Data(b)) => a == b,
            (Content::Error(a), Content::Error(b)) => a == b,
            (Content::Render(a), Content::Render(b)) => Arc::ptr_eq(a, b),
            (Content::Value(a), Content::Value(b)) => a == b,
            _ => false,
        }
    }
}

impl From<&str> for Content {
    fn from(s: &str) -> Self {
        Content::Text(s.to_string())
    }
}

impl From<String> for Content {
    fn from(s: String) -> Self {
        Content::Text(s)
    }
}

impl From<serde_json::Value> for Content {
    fn from(value: serde_json::Value) -> Self {
        Content::Data(value)
    }
}

impl From<AppError> for Content {
    fn from(err: AppError) -> Self {
        Content::Error(err)
    }
}

impl From<Value> for Content {
    fn from(value: Value) -> Self {
        Content::Value(value)
    }
}

impl From<Arc<dyn RenderHtml>> for Content {
    fn from(render: Arc<dyn RenderHtml>) -> Self {
        Content::Render(render)
    }
}

impl From<()> for Content {
    fn from(_: ()) -> Self {
        Content::Empty
    }
}
