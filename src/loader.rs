#[path = "loader/state.rs"]
mod state;

#[path = "loader/source.rs"]
mod source;

use std::any::Any;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::{LoadError, ProviderUnavailable};
use crate::provider::{ProviderId, ProviderModule, PROVIDER_ABI_VERSION};
use crate::registry::Registry;

pub use source::{BuiltinSource, ModuleSource, StaticSource};
pub use state::LoadStatus;

use state::{LoadState, Slot};

struct Expected {
    install_hint: String,
    services: BTreeSet<String>,
}

/// Turns provider ids into live module instances, at most once per id.
///
/// A single mutex guards every slot and is held across the load itself, so
/// concurrent first requests for one provider trigger exactly one attempt and
/// all observe the same outcome. Failures are cached and never retried; a
/// panic during initialization counts as a failure.
pub struct Loader {
    source: Box<dyn ModuleSource>,
    expected: BTreeMap<ProviderId, Expected>,
    slots: Mutex<HashMap<ProviderId, Slot>>,
}

impl Loader {
    /// Creates a loader whose install hints and declared services come from `registry`.
    pub fn new(source: impl ModuleSource + 'static, registry: &Registry) -> Self {
        let expected = registry
            .providers()
            .map(|entry| {
                (
                    entry.id.clone(),
                    Expected {
                        install_hint: entry.install_hint.clone(),
                        services: entry
                            .services
                            .iter()
                            .map(|s| s.as_str().to_string())
                            .collect(),
                    },
                )
            })
            .collect();
        Self {
            source: Box::new(source),
            expected,
            slots: Mutex::new(HashMap::new()),
        }
    }

    pub fn load(&self, id: &ProviderId) -> Result<Arc<dyn ProviderModule>, ProviderUnavailable> {
        let mut slots = self.slots.lock();
        let slot = slots.entry(id.clone()).or_default();
        match &slot.state {
            LoadState::Loaded(module) => return Ok(module.clone()),
            LoadState::Failed(err) => return Err(err.clone()),
            LoadState::NotAttempted => {}
        }

        slot.attempts += 1;
        log::debug!("loading provider module '{id}'");
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| self.open_checked(id)))
            .unwrap_or_else(|payload| Err(LoadError::Init(panic_message(payload.as_ref()))));
        match outcome {
            Ok(module) => {
                log::info!("provider module '{id}' loaded");
                slot.state = LoadState::Loaded(module.clone());
                Ok(module)
            }
            Err(reason) => {
                log::warn!("provider module '{id}' failed to load: {reason}");
                let err = ProviderUnavailable {
                    provider_id: id.clone(),
                    install_hint: self.install_hint(id),
                    reason,
                };
                slot.state = LoadState::Failed(err.clone());
                Err(err)
            }
        }
    }

    pub fn status(&self, id: &ProviderId) -> LoadStatus {
        self.slots
            .lock()
            .get(id)
            .map(|slot| slot.state.status())
            .unwrap_or(LoadStatus::NotAttempted)
    }

    /// Number of underlying load attempts made for `id`; never more than one.
    pub fn attempts(&self, id: &ProviderId) -> usize {
        self.slots
            .lock()
            .get(id)
            .map(|slot| slot.attempts)
            .unwrap_or(0)
    }

    pub fn install_hint(&self, id: &ProviderId) -> String {
        self.expected
            .get(id)
            .map(|e| e.install_hint.clone())
            .unwrap_or_else(|| default_install_hint(id.as_str()))
    }

    fn open_checked(&self, id: &ProviderId) -> Result<Arc<dyn ProviderModule>, LoadError> {
        let module = self.source.open(id)?;
        if module.id() != id {
            return Err(LoadError::IdMismatch {
                expected: id.to_string(),
                found: module.id().to_string(),
            });
        }
        let found = module.abi_version();
        if found != PROVIDER_ABI_VERSION {
            return Err(LoadError::IncompatibleVersion {
                expected: PROVIDER_ABI_VERSION,
                found,
            });
        }
        if let Some(expected) = self.expected.get(id) {
            for service in module.services() {
                if !expected.services.contains(service) {
                    log::warn!(
                        "provider '{id}' offers '{service}', which its manifest does not list"
                    );
                }
            }
        }
        Ok(module)
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    let detail = payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("unknown cause");
    format!("initialization panicked: {detail}")
}

/// Hint used when a provider was registered without one.
pub fn default_install_hint(id: &str) -> String {
    format!("install the '{id}' capability package to use this service")
}
