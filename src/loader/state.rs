use std::fmt;
use std::sync::Arc;

use crate::error::ProviderUnavailable;
use crate::provider::ProviderModule;

/// Load progress of one provider. Only moves forward.
#[derive(Clone)]
pub(super) enum LoadState {
    NotAttempted,
    Loaded(Arc<dyn ProviderModule>),
    Failed(ProviderUnavailable),
}

impl LoadState {
    pub(super) fn status(&self) -> LoadStatus {
        match self {
            LoadState::NotAttempted => LoadStatus::NotAttempted,
            LoadState::Loaded(_) => LoadStatus::Loaded,
            LoadState::Failed(err) => LoadStatus::Failed(err.clone()),
        }
    }
}

impl fmt::Debug for LoadState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadState::NotAttempted => f.write_str("NotAttempted"),
            LoadState::Loaded(module) => write!(f, "Loaded({})", module.id()),
            LoadState::Failed(err) => f.debug_tuple("Failed").field(err).finish(),
        }
    }
}

/// Snapshot of a provider's load state, for introspection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    NotAttempted,
    Loaded,
    Failed(ProviderUnavailable),
}

impl fmt::Display for LoadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadStatus::NotAttempted => f.write_str("not loaded"),
            LoadStatus::Loaded => f.write_str("loaded"),
            LoadStatus::Failed(err) => write!(f, "unavailable ({})", err.reason),
        }
    }
}

#[derive(Debug)]
pub(super) struct Slot {
    pub(super) state: LoadState,
    pub(super) attempts: usize,
}

impl Default for Slot {
    fn default() -> Self {
        Self {
            state: LoadState::NotAttempted,
            attempts: 0,
        }
    }
}
