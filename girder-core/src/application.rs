// Application handle: container ownership, path bindings, logger stack

use crate::container::Container;
use crate::error::Error;
use crate::traits::Provider;
use girder_log::{Logger, Severity};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// The application/context handle passed down the call chain.
///
/// Owns the service container and the explicitly constructed list of logger
/// handles. Cloning is cheap; clones share the same container and loggers,
/// so one application can be handed to every concurrently handled request.
#[derive(Clone)]
pub struct Application {
    container: Container,
    loggers: Vec<Arc<dyn Logger>>,
}

impl Application {
    pub fn new() -> Self {
        Self {
            container: Container::new(),
            loggers: Vec::new(),
        }
    }

    /// Attach the logger handles this application reports through.
    pub fn with_loggers(mut self, loggers: Vec<Arc<dyn Logger>>) -> Self {
        self.loggers = loggers;
        self
    }

    /// The service container.
    pub fn container(&self) -> &Container {
        &self.container
    }

    /// Resolve a named instance from the container.
    pub fn make<T: Provider>(&self, name: &str) -> Result<Arc<T>, Error> {
        self.container.make(name)
    }

    /// Bind a value under a name in the container.
    pub fn instance<T: Provider>(&self, name: impl Into<String>, value: T) {
        self.container.instance(name, value);
    }

    /// Bind the framework paths in the container, rooted at `base`.
    pub fn bind_paths(&self, base: &Path) {
        self.instance("path.base", base.to_path_buf());
        self.instance("path.app", base.join("app"));
        self.instance("path.bootstrap", base.join("bootstrap"));
        self.instance("path.config", base.join("config"));
        self.instance("path.database", base.join("database"));
        self.instance("path.public", base.join("public"));
        self.instance("path.resources", base.join("resources"));
        self.instance("path.lang", base.join("resources").join("lang"));
        self.instance("path.storage", base.join("storage"));
    }

    /// Resolve one of the bound framework paths.
    pub fn path(&self, name: &str) -> Result<Arc<PathBuf>, Error> {
        self.make::<PathBuf>(name)
    }

    /// Report a message to every attached logger.
    pub fn log(&self, severity: Severity, message: &str) {
        for logger in &self.loggers {
            logger.log(severity, message);
        }
    }

    /// Report an error condition to every attached logger.
    pub fn log_error(&self, message: &str) {
        self.log(Severity::Error, message);
    }
}

impl Default for Application {
    fn default() -> Self {
        Self::new()
    }
}
