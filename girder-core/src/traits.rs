// Core traits for the Girder framework

/// Trait for types that can be registered with the DI container.
///
/// Blanket-implemented: any `Send + Sync + 'static` value qualifies.
pub trait Provider: Send + Sync + 'static {}

impl<T: Send + Sync + 'static> Provider for T {}
