use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::sync::Arc;

use crate::error::LoadError;
use crate::provider::{ProviderId, ProviderModule};

/// Locates a provider module by its id and initializes it.
pub trait ModuleSource: Send + Sync {
    fn open(&self, id: &ProviderId) -> Result<Arc<dyn ProviderModule>, LoadError>;
}

type Factory = Arc<dyn Fn() -> Result<Arc<dyn ProviderModule>, LoadError> + Send + Sync>;

/// Registration table of module factories, filled in at configuration time.
#[derive(Default, Clone)]
pub struct StaticSource {
    factories: HashMap<String, Factory>,
}

impl StaticSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a factory invoked on the first load of `id`.
    pub fn with<F>(mut self, id: impl Into<String>, factory: F) -> Self
    where
        F: Fn() -> Result<Arc<dyn ProviderModule>, LoadError> + Send + Sync + 'static,
    {
        self.factories.insert(id.into(), Arc::new(factory));
        self
    }

    /// Adds an already constructed module.
    pub fn with_module(self, id: impl Into<String>, module: Arc<dyn ProviderModule>) -> Self {
        self.with(id, move || Ok(module.clone()))
    }
}

impl ModuleSource for StaticSource {
    fn open(&self, id: &ProviderId) -> Result<Arc<dyn ProviderModule>, LoadError> {
        match self.factories.get(id.as_str()) {
            Some(factory) => factory(),
            None => Err(LoadError::NotInstalled),
        }
    }
}

impl fmt::Debug for StaticSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.factories.keys()).finish()
    }
}

/// Providers compiled into this crate through cargo features.
#[derive(Debug, Default, Clone)]
pub struct BuiltinSource {
    disabled: BTreeSet<String>,
}

impl BuiltinSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Treats `id` as not installed even when it is compiled in.
    pub fn disable(mut self, id: impl Into<String>) -> Self {
        self.disabled.insert(id.into());
        self
    }
}

impl ModuleSource for BuiltinSource {
    fn open(&self, id: &ProviderId) -> Result<Arc<dyn ProviderModule>, LoadError> {
        if self.disabled.contains(id.as_str()) {
            return Err(LoadError::NotInstalled);
        }
        crate::providers::open(id.as_str())
    }
}

impl<T: ModuleSource + ?Sized> ModuleSource for Box<T> {
    fn open(&self, id: &ProviderId) -> Result<Arc<dyn ProviderModule>, LoadError> {
        (**self).open(id)
    }
}

impl<T: ModuleSource + ?Sized> ModuleSource for Arc<T> {
    fn open(&self, id: &ProviderId) -> Result<Arc<dyn ProviderModule>, LoadError> {
        (**self).open(id)
    }
}
