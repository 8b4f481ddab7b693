//! Typed view of the application-level settings.

use crate::ConfigManager;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// The settings the framework core reads at boot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application name, used in diagnostics.
    pub name: String,
    /// Debug mode: when true, error detail passes through to responses.
    pub debug: bool,
    /// Status applied to error responses whose error carries no explicit
    /// status. `None` leaves such responses at their current status.
    pub default_error_status: Option<u16>,
    /// Root of the application directory tree.
    pub base_path: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            name: "girder".to_string(),
            debug: false,
            default_error_status: Some(500),
            base_path: PathBuf::from("."),
        }
    }
}

impl AppConfig {
    /// Assemble from a config store, falling back to defaults per field.
    pub fn from_manager(config: &ConfigManager) -> Self {
        let defaults = Self::default();
        Self {
            name: config
                .get_string("app.name")
                .unwrap_or(defaults.name),
            debug: config.get_bool("app.debug").unwrap_or(defaults.debug),
            default_error_status: config
                .get_int("app.default_error_status")
                .ok()
                .map(|status| status as u16)
                .or(defaults.default_error_status),
            base_path: config
                .get_string("app.base_path")
                .map(PathBuf::from)
                .unwrap_or(defaults.base_path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_production_safe() {
        let config = AppConfig::default();
        assert!(!config.debug);
        assert_eq!(config.default_error_status, Some(500));
    }

    #[test]
    fn reads_fields_from_the_store() {
        let manager = ConfigManager::new();
        manager.set("app.name", "billing");
        manager.set("app.debug", "true");
        manager.set("app.default_error_status", 503);
        manager.set("app.base_path", "/srv/billing");

        let config = AppConfig::from_manager(&manager);
        assert_eq!(config.name, "billing");
        assert!(config.debug);
        assert_eq!(config.default_error_status, Some(503));
        assert_eq!(config.base_path, PathBuf::from("/srv/billing"));
    }
}
