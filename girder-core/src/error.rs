// Error types for the Girder framework

use thiserror::Error;

/// Faults of the framework core itself.
///
/// Application-level errors are not represented here; they travel through
/// the pipeline as [`AppError`] content and are legitimate data, not faults.
#[derive(Error, Debug)]
pub enum Error {
    #[error("no encoder can handle content of type {0}")]
    UnencodableContent(String),

    #[error("provider not found: {0}")]
    ProviderNotFound(String),

    #[error("instance not found: {0}")]
    InstanceNotFound(String),

    #[error("template not found: {0}")]
    MissingTemplate(String),

    #[error("template error: {0}")]
    Template(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("deserialization error: {0}")]
    Deserialization(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// An application-produced error value.
///
/// Carries a human-readable message, an optional explicit HTTP status, and
/// an optional structured context payload. An `AppError` is content: it
/// flows through the decorator and encoder chains as itself so that
/// error-aware decorators and encoders can recognize it. Only its message
/// is ever filtered (by environment), never its existence.
#[derive(Debug, Clone, PartialEq)]
pub struct AppError {
    message: String,
    status: Option<u16>,
    context: Option<serde_json::Value>,
}

impl AppError {
    /// Create an error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: None,
            context: None,
        }
    }

    /// Set an explicit HTTP status for this error.
    ///
    /// A non-5xx status marks the message as deliberately user-facing; the
    /// production filter leaves such messages intact.
    pub fn status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    /// Attach a structured context payload.
    pub fn context(mut self, context: serde_json::Value) -> Self {
        self.context = Some(context);
        self
    }

    /// The raw message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The explicit status, if one was set.
    pub fn status_code(&self) -> Option<u16> {
        self.status
    }

    /// The context payload, if one was attached.
    pub fn context_value(&self) -> Option<&serde_json::Value> {
        self.context.as_ref()
    }

    /// The message with its first letter uppercased, for presentation.
    pub fn title(&self) -> String {
        capitalize(&self.message)
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for AppError {}

/// Uppercase the first character of `s`.
pub(crate) fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_error_builder() {
        let err = AppError::new("invalid user id")
            .status(404)
            .context(serde_json::json!({"id": 42}));

        assert_eq!(err.message(), "invalid user id");
        assert_eq!(err.status_code(), Some(404));
        assert_eq!(err.context_value(), Some(&serde_json::json!({"id": 42})));
    }

    #[test]
    fn title_uppercases_first_letter() {
        assert_eq!(AppError::new("incorrect credentials").title(), "Incorrect credentials");
        assert_eq!(AppError::new("").title(), "");
    }

    #[test]
    fn capitalize_handles_multibyte() {
        assert_eq!(capitalize("état invalide"), "État invalide");
    }
}
