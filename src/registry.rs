#[path = "registry/suggest.rs"]
mod suggest;

use std::collections::BTreeMap;

use crate::error::{RouterError, Suggestion};
use crate::provider::{ProviderId, ProviderManifest, ServiceName};

/// Registration metadata kept for every known provider.
#[derive(Debug, Clone)]
pub struct ProviderEntry {
    pub id: ProviderId,
    pub install_hint: String,
    pub services: Vec<ServiceName>,
}

/// Immutable mapping from service name to the provider that owns it.
///
/// Built once with [`RegistryBuilder`]; read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    services: BTreeMap<ServiceName, ProviderId>,
    providers: BTreeMap<ProviderId, ProviderEntry>,
}

impl Registry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Registers every manifest in order.
    pub fn from_manifests<'a, I>(manifests: I) -> Result<Self, RouterError>
    where
        I: IntoIterator<Item = &'a ProviderManifest>,
    {
        manifests
            .into_iter()
            .try_fold(Self::builder(), |builder, manifest| {
                builder.register(manifest.id, manifest.service_names(), manifest.install_hint)
            })
            .map(RegistryBuilder::build)
    }

    /// Returns the provider owning `service`.
    ///
    /// Unknown names carry the closest registered service as a suggestion.
    pub fn lookup(&self, service: &str) -> Result<&ProviderId, RouterError> {
        if service.is_empty() {
            return Err(RouterError::InvalidName(
                "service name cannot be empty".to_string(),
            ));
        }
        self.services
            .get(service)
            .ok_or_else(|| RouterError::UnknownService {
                service: service.to_string(),
                suggestion: suggest::closest(service, &self.services).map(
                    |(service, provider_id)| Suggestion {
                        service: service.clone(),
                        provider_id: provider_id.clone(),
                    },
                ),
            })
    }

    pub fn provider(&self, id: &str) -> Option<&ProviderEntry> {
        self.providers.get(id)
    }

    pub fn install_hint(&self, id: &str) -> Option<&str> {
        self.providers.get(id).map(|entry| entry.install_hint.as_str())
    }

    pub fn providers(&self) -> impl Iterator<Item = &ProviderEntry> {
        self.providers.values()
    }

    pub fn services(&self) -> impl Iterator<Item = (&ServiceName, &ProviderId)> {
        self.services.iter()
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}

/// Builder pattern for [`Registry`]. A failed registration consumes the
/// builder, so a partially built registry is never observable.
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    registry: Registry,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims `services` for `provider_id`.
    ///
    /// Fails with `DuplicateServiceBinding` if another provider already owns
    /// one of the names. Registering the same pair twice is a no-op.
    pub fn register<I, S>(
        mut self,
        provider_id: &str,
        services: I,
        install_hint: impl Into<String>,
    ) -> Result<Self, RouterError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let id = ProviderId::new(provider_id)?;
        let mut claimed = Vec::new();
        for service in services {
            let name = ServiceName::new(service.as_ref())?;
            match self.registry.services.get(&name) {
                Some(owner) if owner == &id => continue,
                Some(owner) => {
                    return Err(RouterError::DuplicateServiceBinding {
                        service: name,
                        existing: owner.clone(),
                        conflicting: id,
                    })
                }
                None => {}
            }
            if claimed.contains(&name) {
                continue;
            }
            claimed.push(name);
        }

        log::debug!("registering provider '{id}' with {} service(s)", claimed.len());
        for name in &claimed {
            self.registry.services.insert(name.clone(), id.clone());
        }
        let entry = self
            .registry
            .providers
            .entry(id.clone())
            .or_insert_with(|| ProviderEntry {
                id,
                install_hint: String::new(),
                services: Vec::new(),
            });
        entry.install_hint = install_hint.into();
        entry.services.extend(claimed);
        Ok(self)
    }

    /// Builds the final Registry.
    pub fn build(self) -> Registry {
        self.registry
    }
}

#[cfg(test)]
#[path = "registry/tests.rs"]
mod tests;
