//! Environment variable loading.
//!
//! Variables carrying a configured prefix are mapped into config keys:
//! the prefix is stripped, the name is lowercased, and a double underscore
//! becomes a dot. `GIRDER_APP__DEBUG=true` lands under `app.debug`.

use std::collections::HashMap;

/// Maps prefixed environment variables into config entries.
pub struct EnvLoader {
    prefix: String,
}

impl EnvLoader {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Read matching variables from the process environment.
    pub fn load(&self) -> HashMap<String, serde_json::Value> {
        self.map(std::env::vars())
    }

    fn map(
        &self,
        vars: impl Iterator<Item = (String, String)>,
    ) -> HashMap<String, serde_json::Value> {
        let mut entries = HashMap::new();
        for (name, value) in vars {
            let Some(stripped) = name.strip_prefix(&self.prefix) else {
                continue;
            };
            let key = stripped.to_ascii_lowercase().replace("__", ".");
            if key.is_empty() {
                continue;
            }
            entries.insert(key, serde_json::Value::String(value));
        }
        entries
    }
}

/// Load a `.env` file into the process environment if one exists. A
/// missing file is not an error; variables already set keep their values.
pub fn load_dotenv() {
    let _ = dotenvy::dotenv();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_prefixed_variables() {
        let loader = EnvLoader::new("GIRDER_");
        let entries = loader.map(
            vec![
                ("GIRDER_APP__NAME".to_string(), "girder".to_string()),
                ("GIRDER_APP__DEBUG".to_string(), "true".to_string()),
                ("PATH".to_string(), "/usr/bin".to_string()),
            ]
            .into_iter(),
        );

        assert_eq!(entries["app.name"], "girder");
        assert_eq!(entries["app.debug"], "true");
        assert!(!entries.contains_key("path"));
        assert_eq!(entries.len(), 2);
    }
}
