//! The response decorator chain.
//!
//! Decorators are ordered transformations applied to a response before its
//! body is encoded. Each one inspects the response and either returns it
//! unchanged or returns an adjusted version; a decorator that does not
//! apply is the identity. Unlike encoders, every decorator in the chain
//! runs, in order.

use crate::error::AppError;
use crate::response::Response;
use crate::status::is_server_error;
use std::sync::Arc;
use tracing::debug;

/// An ordered transformation of a response.
pub trait ResponseDecorator: Send + Sync {
    fn decorate(&self, response: Response) -> Response;

    /// The decorator's name, for diagnostics.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// Runs a list of decorators over a response, in order.
pub struct Handler {
    decorators: Vec<Arc<dyn ResponseDecorator>>,
}

impl Handler {
    pub fn new(decorators: Vec<Arc<dyn ResponseDecorator>>) -> Self {
        Self { decorators }
    }

    /// Apply every decorator, threading the response through the chain.
    pub fn decorate(&self, mut response: Response) -> Response {
        for decorator in &self.decorators {
            debug!(decorator = decorator.name(), "applying response decorator");
            response = decorator.decorate(response);
        }
        response
    }
}

/// Message that replaces internal error detail in production.
pub const SENSITIVE_ERROR_MESSAGE: &str = "An error has occurred";

/// Derives the response status from error content.
///
/// An explicit status on the error wins; otherwise the configured default
/// error status applies; otherwise the response keeps whatever status it
/// already has. Non-error content passes through untouched.
pub struct HttpStatusDecorator {
    error_default: Option<u16>,
}

impl HttpStatusDecorator {
    /// No configured fallback: only explicit error statuses apply.
    pub fn new() -> Self {
        Self {
            error_default: None,
        }
    }

    /// Fall back to `status` for errors that carry no explicit status.
    pub fn with_default(status: u16) -> Self {
        Self {
            error_default: Some(status),
        }
    }
}

impl Default for HttpStatusDecorator {
    fn default() -> Self {
        Self::new()
    }
}

impl ResponseDecorator for HttpStatusDecorator {
    fn decorate(&self, mut response: Response) -> Response {
        let Some(err) = response.content().as_error() else {
            return response;
        };

        match err.status_code().or(self.error_default) {
            Some(status) => {
                response.set_status(status);
                response
            }
            None => response,
        }
    }
}

/// Hides internal error detail when the application is not in debug mode.
///
/// In production the whole error is replaced with a generic one so that
/// nothing internal can leak through the message, the context, or the
/// error's own rendering. An error carrying an explicit non-5xx status was
/// written for the client and keeps its message. The replacement preserves
/// the explicit status so the status decorator still sees it.
pub struct FilterSensitiveError {
    debug: bool,
}

impl FilterSensitiveError {
    pub fn new(debug: bool) -> Self {
        Self { debug }
    }
}

impl ResponseDecorator for FilterSensitiveError {
    fn decorate(&self, mut response: Response) -> Response {
        if self.debug {
            return response;
        }

        let explicit_status = match response.content().as_error() {
            Some(err) => err.status_code(),
            None => return response,
        };

        if let Some(status) = explicit_status {
            if !is_server_error(status) {
                return response;
            }
        }

        debug!("replacing sensitive error content");
        let mut replacement = AppError::new(SENSITIVE_ERROR_MESSAGE);
        if let Some(status) = explicit_status {
            replacement = replacement.status(status);
        }
        response.set_content(replacement.into());
        response
    }
}
