#[path = "router/builder.rs"]
mod builder;

use std::sync::Arc;

use crate::compat::Namespace;
use crate::config::RouterConfig;
use crate::error::RouterError;
use crate::loader::{BuiltinSource, Loader};
use crate::provider::{AsyncHandle, Handle, Options, ProviderId, ProviderModule, ServiceName};
use crate::providers;
use crate::registry::Registry;

pub use builder::RouterBuilder;

/// The single entry point for opening services.
///
/// Dispatch is lookup, then load, then construct: an unknown name fails
/// before anything is loaded, an absent provider fails with its install
/// hint, and provider errors are returned untouched.
pub struct Router {
    registry: Registry,
    loader: Loader,
    namespace: Namespace,
}

impl Router {
    pub fn builder() -> RouterBuilder {
        RouterBuilder::new()
    }

    /// Router over the bundled providers with default settings.
    pub fn new() -> Result<Self, RouterError> {
        Self::from_config(&RouterConfig::default())
    }

    pub fn from_config(config: &RouterConfig) -> Result<Self, RouterError> {
        let mut source = BuiltinSource::new();
        let mut builder = Router::builder().manifests(providers::manifests());
        for (id, provider) in &config.providers {
            if !provider.enabled {
                source = source.disable(id.clone());
            }
            if let Some(hint) = &provider.install_hint {
                builder = builder.install_hint(id.clone(), hint.clone());
            }
        }
        builder.source(source).primary(config.primary.clone()).build()
    }

    /// Opens a blocking handle for `service`.
    pub fn create(&self, service: &str, options: &Options) -> Result<Box<dyn Handle>, RouterError> {
        let (name, module) = self.dispatch(service)?;
        let handle = module.make_sync_handle(&name, options)?;
        Ok(handle)
    }

    /// Opens an async handle for `service`.
    ///
    /// The first request for a provider loads it synchronously, blocking the
    /// calling worker until initialization finishes.
    pub async fn create_async(
        &self,
        service: &str,
        options: &Options,
    ) -> Result<Box<dyn AsyncHandle>, RouterError> {
        let (name, module) = self.dispatch(service)?;
        let handle = module.make_async_handle(&name, options).await?;
        Ok(handle)
    }

    /// Returns the provider owning `service` without loading it.
    pub fn resolve(&self, service: &str) -> Result<&ProviderId, RouterError> {
        self.registry.lookup(service)
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn loader(&self) -> &Loader {
        &self.loader
    }

    /// Legacy flat namespace bound to the primary provider.
    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    fn dispatch(&self, service: &str) -> Result<(ServiceName, Arc<dyn ProviderModule>), RouterError> {
        let provider_id = self.registry.lookup(service)?;
        let name = ServiceName::new(service)?;
        log::debug!("routing '{name}' to provider '{provider_id}'");
        let module = self.loader.load(provider_id)?;
        Ok((name, module))
    }
}
