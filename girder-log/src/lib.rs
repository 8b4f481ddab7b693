//! Girder Logging Subsystem
//!
//! Provides syslog-severity logging for the Girder framework. Loggers are
//! plain values implementing the [`Logger`] trait; a [`StackLogger`] fans a
//! message out to an explicitly constructed list of logger handles. There is
//! no global registry: whoever owns the pipeline owns its loggers.
//!
//! # Usage
//!
//! ```rust
//! use girder_log::{FileLogger, Logger, Severity, StackLogger};
//! use std::sync::Arc;
//!
//! let stack = StackLogger::new(vec![
//!     Arc::new(FileLogger::new("/tmp/girder.log", Severity::Debug)),
//! ]);
//! stack.error("database connection lost");
//! ```
//!
//! # Environment Variables
//!
//! - `GIRDER_LOG_LEVEL=emergency|alert|critical|error|warning|notice|info|debug`
//!   sets the default minimum severity for loggers built with
//!   [`Severity::from_env`].

use once_cell::sync::Lazy;
use std::env;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::Mutex;

// ============================================================================
// Severity
// ============================================================================

/// Message severity, ordered as in RFC 5424 (lower is more severe).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum Severity {
    /// The system is unusable
    Emergency = 0,
    /// A condition that should be corrected immediately
    Alert = 1,
    /// Critical conditions
    Critical = 2,
    /// Error conditions
    Error = 3,
    /// Warning conditions
    Warning = 4,
    /// Normal but significant conditions
    Notice = 5,
    /// Informational messages
    Info = 6,
    /// Messages normally only useful when debugging
    Debug = 7,
}

impl Severity {
    /// Parse a severity from its lowercase keyword.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "emerg" | "emergency" => Some(Severity::Emergency),
            "alert" => Some(Severity::Alert),
            "crit" | "critical" => Some(Severity::Critical),
            "err" | "error" => Some(Severity::Error),
            "warn" | "warning" => Some(Severity::Warning),
            "notice" => Some(Severity::Notice),
            "info" => Some(Severity::Info),
            "debug" => Some(Severity::Debug),
            _ => None,
        }
    }

    /// Syslog keyword for this severity.
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Emergency => "EMERGENCY",
            Severity::Alert => "ALERT",
            Severity::Critical => "CRITICAL",
            Severity::Error => "ERROR",
            Severity::Warning => "WARNING",
            Severity::Notice => "NOTICE",
            Severity::Info => "INFO",
            Severity::Debug => "DEBUG",
        }
    }

    /// Minimum severity from `GIRDER_LOG_LEVEL`, defaulting to `Debug`.
    pub fn from_env() -> Self {
        *ENV_LEVEL
    }
}

static ENV_LEVEL: Lazy<Severity> = Lazy::new(|| {
    env::var("GIRDER_LOG_LEVEL")
        .ok()
        .and_then(|value| Severity::parse(&value))
        .unwrap_or(Severity::Debug)
});

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// Logger Trait
// ============================================================================

/// A destination for log messages.
///
/// Implementations decide where a message goes; severity gating is the
/// implementation's responsibility so that a stack can hold loggers with
/// different thresholds.
pub trait Logger: Send + Sync {
    /// Log a plain message.
    fn log(&self, severity: Severity, message: &str);

    /// Log a message with a structured context payload.
    fn log_with(&self, severity: Severity, message: &str, context: &serde_json::Value) {
        self.log(severity, &format!("{} {}", message, context));
    }

    /// Log that the system is unusable.
    fn emergency(&self, message: &str) {
        self.log(Severity::Emergency, message);
    }

    /// Log a condition that should be corrected immediately.
    fn alert(&self, message: &str) {
        self.log(Severity::Alert, message);
    }

    /// Log a critical condition.
    fn critical(&self, message: &str) {
        self.log(Severity::Critical, message);
    }

    /// Log an error condition.
    fn error(&self, message: &str) {
        self.log(Severity::Error, message);
    }

    /// Log a warning condition.
    fn warning(&self, message: &str) {
        self.log(Severity::Warning, message);
    }

    /// Log a normal but significant condition.
    fn notice(&self, message: &str) {
        self.log(Severity::Notice, message);
    }

    /// Log an informational message.
    fn info(&self, message: &str) {
        self.log(Severity::Info, message);
    }

    /// Log a debug message.
    fn debug(&self, message: &str) {
        self.log(Severity::Debug, message);
    }
}

// ============================================================================
// Stack Logger
// ============================================================================

/// Fans each message out to an explicit list of logger handles.
///
/// The list is supplied at construction and never changes afterwards, so a
/// stack can be shared read-only across concurrently handled requests.
pub struct StackLogger {
    loggers: Vec<Arc<dyn Logger>>,
}

impl StackLogger {
    /// Create a stack over the given logger handles.
    pub fn new(loggers: Vec<Arc<dyn Logger>>) -> Self {
        Self { loggers }
    }

    /// Number of loggers in the stack.
    pub fn len(&self) -> usize {
        self.loggers.len()
    }

    /// Whether the stack holds no loggers.
    pub fn is_empty(&self) -> bool {
        self.loggers.is_empty()
    }
}

impl Logger for StackLogger {
    fn log(&self, severity: Severity, message: &str) {
        for logger in &self.loggers {
            logger.log(severity, message);
        }
    }

    fn log_with(&self, severity: Severity, message: &str, context: &serde_json::Value) {
        for logger in &self.loggers {
            logger.log_with(severity, message, context);
        }
    }
}

// ============================================================================
// File Logger
// ============================================================================

/// Appends timestamped lines to a file.
pub struct FileLogger {
    path: PathBuf,
    min_level: Severity,
    // Serializes appends from concurrent requests sharing this logger.
    lock: Mutex<()>,
}

impl FileLogger {
    /// Create a file logger writing to `path`, dropping messages less severe
    /// than `min_level`.
    pub fn new(path: impl AsRef<Path>, min_level: Severity) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            min_level,
            lock: Mutex::new(()),
        }
    }

    fn write_line(&self, line: &str) {
        let _guard = self.lock.lock();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path);
        match file {
            Ok(mut file) => {
                if let Err(err) = writeln!(file, "{}", line) {
                    log::warn!("file logger failed to write {}: {}", self.path.display(), err);
                }
            }
            Err(err) => {
                log::warn!("file logger failed to open {}: {}", self.path.display(), err);
            }
        }
    }
}

impl Logger for FileLogger {
    fn log(&self, severity: Severity, message: &str) {
        if severity > self.min_level {
            return;
        }
        let timestamp = chrono::Utc::now().to_rfc3339();
        self.write_line(&format!("{} [{}] {}", timestamp, severity, message));
    }

    fn log_with(&self, severity: Severity, message: &str, context: &serde_json::Value) {
        self.log(severity, &format!("{} {}", message, context));
    }
}

// ============================================================================
// Slack Logger
// ============================================================================

/// Posts messages to a Slack incoming-webhook URL.
///
/// Intended for high-severity notifications; set `min_level` accordingly so
/// routine messages do not hit the webhook.
pub struct SlackLogger {
    webhook_url: String,
    min_level: Severity,
    client: reqwest::blocking::Client,
}

#[derive(serde::Serialize)]
struct SlackRequestBody<'a> {
    text: &'a str,
}

impl SlackLogger {
    /// Create a Slack logger posting to `webhook_url`.
    pub fn new(webhook_url: impl Into<String>, min_level: Severity) -> Self {
        Self {
            webhook_url: webhook_url.into(),
            min_level,
            client: reqwest::blocking::Client::new(),
        }
    }

    fn post(&self, text: &str) {
        let body = SlackRequestBody { text };
        let result = self
            .client
            .post(&self.webhook_url)
            .json(&body)
            .send()
            .and_then(|response| response.error_for_status());
        if let Err(err) = result {
            log::warn!("slack logger failed to post notification: {}", err);
        }
    }
}

impl Logger for SlackLogger {
    fn log(&self, severity: Severity, message: &str) {
        if severity > self.min_level {
            return;
        }
        self.post(&format!("{}: {}", severity, message));
    }

    fn log_with(&self, severity: Severity, message: &str, context: &serde_json::Value) {
        if severity > self.min_level {
            return;
        }
        self.post(&format!("{}: {}\n{}", severity, message, context));
    }
}

// ============================================================================
// Tests
// ============================================================================
