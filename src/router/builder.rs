use std::collections::BTreeMap;

use super::Router;
use crate::compat::Namespace;
use crate::error::RouterError;
use crate::loader::{BuiltinSource, Loader, ModuleSource, StaticSource};
use crate::provider::{ProviderId, ProviderManifest};
use crate::providers;
use crate::registry::Registry;

struct Registration {
    id: String,
    services: Vec<String>,
    install_hint: String,
}

/// Builder for [`Router`].
///
/// Registrations happen in insertion order; the first registered provider is
/// the primary one unless [`primary`](RouterBuilder::primary) says otherwise.
pub struct RouterBuilder {
    registrations: Vec<Registration>,
    hint_overrides: BTreeMap<String, String>,
    source: Option<Box<dyn ModuleSource>>,
    primary: Option<String>,
}

impl Default for RouterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RouterBuilder {
    pub fn new() -> Self {
        Self {
            registrations: Vec::new(),
            hint_overrides: BTreeMap::new(),
            source: None,
            primary: None,
        }
    }

    /// Registers every bundled provider manifest and loads from the compiled-in providers.
    pub fn builtin(self) -> Self {
        self.manifests(providers::manifests())
            .source(BuiltinSource::new())
    }

    pub fn manifest(self, manifest: &ProviderManifest) -> Self {
        self.provider(manifest.id, manifest.service_names(), manifest.install_hint)
    }

    pub fn manifests<'a, I>(mut self, manifests: I) -> Self
    where
        I: IntoIterator<Item = &'a ProviderManifest>,
    {
        for manifest in manifests {
            self = self.manifest(manifest);
        }
        self
    }

    /// Registers a provider claiming `services`.
    pub fn provider<I, S>(
        mut self,
        id: impl Into<String>,
        services: I,
        install_hint: impl Into<String>,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.registrations.push(Registration {
            id: id.into(),
            services: services.into_iter().map(Into::into).collect(),
            install_hint: install_hint.into(),
        });
        self
    }

    /// Replaces the bundled install hint of provider `id`.
    pub fn install_hint(mut self, id: impl Into<String>, hint: impl Into<String>) -> Self {
        self.hint_overrides.insert(id.into(), hint.into());
        self
    }

    pub fn source(mut self, source: impl ModuleSource + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Sets the provider whose symbols back the legacy namespace.
    pub fn primary(mut self, id: impl Into<String>) -> Self {
        self.primary = Some(id.into());
        self
    }

    /// Builds the registry, the loader and binds the legacy namespace.
    ///
    /// Fails with `DuplicateServiceBinding` on conflicting registrations and
    /// with `PrimaryProviderMissing` when the primary provider cannot be loaded.
    pub fn build(self) -> Result<Router, RouterError> {
        let primary = self
            .primary
            .or_else(|| self.registrations.first().map(|r| r.id.clone()))
            .ok_or_else(|| RouterError::Config("no providers registered".to_string()))?;
        let primary = ProviderId::new(primary)?;

        let mut builder = Registry::builder();
        for registration in self.registrations {
            let hint = self
                .hint_overrides
                .get(&registration.id)
                .cloned()
                .unwrap_or(registration.install_hint);
            builder = builder.register(&registration.id, &registration.services, hint)?;
        }
        let registry = builder.build();

        let source = self
            .source
            .unwrap_or_else(|| Box::new(StaticSource::new()));
        let loader = Loader::new(source, &registry);
        let namespace = Namespace::bind(&loader, &primary)?;

        log::debug!(
            "router ready: {} service(s), primary '{primary}'",
            registry.len()
        );
        Ok(Router {
            registry,
            loader,
            namespace,
        })
    }
}
