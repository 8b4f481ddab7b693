// Dependency injection container

use crate::error::Error;
use crate::traits::Provider;
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tracing::{debug, trace};

/// The dependency injection container.
///
/// Holds typed providers (resolved by type) and named instances (resolved
/// by name). The rendering pipeline only depends on the named half — the
/// resolve-by-name operation encoders and requests use to fetch auxiliary
/// services — but both halves share one container so application wiring
/// stays in one place.
#[derive(Clone)]
pub struct Container {
    providers: Arc<RwLock<HashMap<TypeId, Arc<dyn Any + Send + Sync>>>>,
    instances: Arc<RwLock<HashMap<String, Arc<dyn Any + Send + Sync>>>>,
}

impl Container {
    pub fn new() -> Self {
        debug!("creating new DI container");
        Self {
            providers: Arc::new(RwLock::new(HashMap::new())),
            instances: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Register a provider instance by type.
    pub fn register<T: Provider>(&self, instance: T) {
        let type_name = std::any::type_name::<T>();

        let mut providers = self.providers.write().unwrap();
        providers.insert(TypeId::of::<T>(), Arc::new(instance));

        debug!(provider = type_name, "provider registered in container");
    }

    /// Resolve a provider by type.
    pub fn resolve<T: Provider>(&self) -> Result<Arc<T>, Error> {
        let type_name = std::any::type_name::<T>();

        trace!(provider = type_name, "resolving provider");
        let providers = self.providers.read().unwrap();

        providers
            .get(&TypeId::of::<T>())
            .and_then(|any| any.clone().downcast::<T>().ok())
            .ok_or_else(|| Error::ProviderNotFound(type_name.to_string()))
    }

    /// Check whether a provider is registered.
    pub fn has<T: Provider>(&self) -> bool {
        let providers = self.providers.read().unwrap();
        providers.contains_key(&TypeId::of::<T>())
    }

    /// Bind a value under a name.
    pub fn instance<T: Provider>(&self, name: impl Into<String>, value: T) {
        let name = name.into();
        trace!(name = %name, "binding named instance");

        let mut instances = self.instances.write().unwrap();
        instances.insert(name, Arc::new(value));
    }

    /// Resolve a named instance, downcast to the expected type.
    pub fn make<T: Provider>(&self, name: &str) -> Result<Arc<T>, Error> {
        trace!(name = %name, "resolving named instance");
        let instances = self.instances.read().unwrap();

        instances
            .get(name)
            .and_then(|any| any.clone().downcast::<T>().ok())
            .ok_or_else(|| Error::InstanceNotFound(name.to_string()))
    }

    /// Check whether a named instance is bound.
    pub fn bound(&self, name: &str) -> bool {
        let instances = self.instances.read().unwrap();
        instances.contains_key(name)
    }

    /// Clear all providers and named instances.
    pub fn clear(&self) {
        let mut providers = self.providers.write().unwrap();
        let mut instances = self.instances.write().unwrap();
        let count = providers.len() + instances.len();
        providers.clear();
        instances.clear();

        debug!(binding_count = count, "cleared container");
    }
}

impl Default for Container {
    fn default() -> Self {
        Self::new()
    }
}
