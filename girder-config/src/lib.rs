//! Configuration management for the Girder web framework.
//!
//! Configuration is a flat map from dot-separated keys to JSON values,
//! filled from TOML files, prefixed environment variables, and explicit
//! `set` calls. Later sources override earlier ones, so the conventional
//! boot order is file first, then environment, then overrides.

pub mod app_config;
pub mod env;
pub mod error;

pub use app_config::AppConfig;
pub use env::{EnvLoader, load_dotenv};
pub use error::{ConfigError, Result};

use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, RwLock};
use tracing::debug;

/// The configuration store.
///
/// Cloning is cheap; clones share the same underlying map.
#[derive(Clone, Default)]
pub struct ConfigManager {
    values: Arc<RwLock<HashMap<String, serde_json::Value>>>,
}

impl ConfigManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a single key.
    pub fn set(&self, key: impl Into<String>, value: impl Into<serde_json::Value>) {
        let mut values = self.values.write().unwrap();
        values.insert(key.into(), value.into());
    }

    /// Whether a key is present.
    pub fn has(&self, key: &str) -> bool {
        let values = self.values.read().unwrap();
        values.contains_key(key)
    }

    /// Get a key, deserialized into the requested type.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<T> {
        let values = self.values.read().unwrap();
        let value = values
            .get(key)
            .ok_or_else(|| ConfigError::Missing(key.to_string()))?;
        serde_json::from_value(value.clone()).map_err(|_| ConfigError::Type {
            key: key.to_string(),
            expected: std::any::type_name::<T>(),
        })
    }

    /// Get a key, falling back to `default` when absent or mistyped.
    pub fn get_or<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        self.get(key).unwrap_or(default)
    }

    /// Get a string value. Scalars are stringified.
    pub fn get_string(&self, key: &str) -> Result<String> {
        let values = self.values.read().unwrap();
        match values.get(key) {
            Some(serde_json::Value::String(s)) => Ok(s.clone()),
            Some(serde_json::Value::Number(n)) => Ok(n.to_string()),
            Some(serde_json::Value::Bool(b)) => Ok(b.to_string()),
            Some(_) => Err(ConfigError::Type {
                key: key.to_string(),
                expected: "string",
            }),
            None => Err(ConfigError::Missing(key.to_string())),
        }
    }

    /// Get an integer value. Numeric strings are parsed, so environment
    /// sourced entries work without casting.
    pub fn get_int(&self, key: &str) -> Result<i64> {
        let values = self.values.read().unwrap();
        match values.get(key) {
            Some(serde_json::Value::Number(n)) => n.as_i64().ok_or(ConfigError::Type {
                key: key.to_string(),
                expected: "integer",
            }),
            Some(serde_json::Value::String(s)) => s.parse().map_err(|_| ConfigError::Type {
                key: key.to_string(),
                expected: "integer",
            }),
            Some(_) => Err(ConfigError::Type {
                key: key.to_string(),
                expected: "integer",
            }),
            None => Err(ConfigError::Missing(key.to_string())),
        }
    }

    /// Get a boolean value. The strings `"true"`/`"false"` and `"1"`/`"0"`
    /// are accepted.
    pub fn get_bool(&self, key: &str) -> Result<bool> {
        let values = self.values.read().unwrap();
        match values.get(key) {
            Some(serde_json::Value::Bool(b)) => Ok(*b),
            Some(serde_json::Value::String(s)) => match s.as_str() {
                "true" | "1" => Ok(true),
                "false" | "0" => Ok(false),
                _ => Err(ConfigError::Type {
                    key: key.to_string(),
                    expected: "boolean",
                }),
            },
            Some(_) => Err(ConfigError::Type {
                key: key.to_string(),
                expected: "boolean",
            }),
            None => Err(ConfigError::Missing(key.to_string())),
        }
    }

    /// Load a TOML file. Nested tables flatten into dot-separated keys;
    /// entries override existing ones.
    pub fn load_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)?;
        let parsed: toml::Value = toml::from_str(&source).map_err(|err| ConfigError::Parse {
            path: path.display().to_string(),
            message: err.to_string(),
        })?;

        let mut entries = HashMap::new();
        flatten_toml("", &parsed, &mut entries);
        let count = entries.len();

        let mut values = self.values.write().unwrap();
        values.extend(entries);
        debug!(path = %path.display(), count, "loaded config file");
        Ok(())
    }

    /// Load prefixed environment variables; entries override existing ones.
    pub fn load_env(&self, prefix: &str) {
        let entries = EnvLoader::new(prefix).load();
        let count = entries.len();

        let mut values = self.values.write().unwrap();
        values.extend(entries);
        debug!(prefix, count, "loaded config from environment");
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        let values = self.values.read().unwrap();
        values.len()
    }

    /// Whether the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn flatten_toml(prefix: &str, value: &toml::Value, out: &mut HashMap<String, serde_json::Value>) {
    match value {
        toml::Value::Table(table) => {
            for (key, nested) in table {
                let full = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                flatten_toml(&full, nested, out);
            }
        }
        other => {
            if let Ok(json) = serde_json::to_value(other.clone()) {
                out.insert(prefix.to_string(), json);
            }
        }
    }
}
