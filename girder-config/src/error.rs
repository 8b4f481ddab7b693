// Configuration error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config key not found: {0}")]
    Missing(String),

    #[error("config key {key} has the wrong type: expected {expected}")]
    Type { key: String, expected: &'static str },

    #[error("failed to parse config file {path}: {message}")]
    Parse { path: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
