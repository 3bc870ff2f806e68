//! Built-in provider modules.
//!
//! Every manifest is always compiled in so the registry knows which provider
//! owns a service even when that provider's cargo feature is off. Only the
//! constructors are feature gated.

#[path = "providers/primary.rs"]
pub mod primary;

#[path = "providers/database.rs"]
pub mod database;

#[path = "providers/cloud.rs"]
pub mod cloud;

#[path = "providers/advanced.rs"]
pub mod advanced;

use std::sync::Arc;

use crate::error::LoadError;
use crate::provider::{ProviderManifest, ProviderModule};

/// Manifests of all known providers, primary first.
pub fn manifests() -> &'static [ProviderManifest] {
    static MANIFESTS: [ProviderManifest; 4] = [
        primary::MANIFEST,
        database::MANIFEST,
        cloud::MANIFEST,
        advanced::MANIFEST,
    ];
    &MANIFESTS
}

/// Initializes the compiled-in provider named `id`.
pub(crate) fn open(id: &str) -> Result<Arc<dyn ProviderModule>, LoadError> {
    match id {
        #[cfg(feature = "core")]
        primary::ID => primary::init(),
        #[cfg(feature = "database")]
        database::ID => database::init(),
        #[cfg(feature = "cloud")]
        cloud::ID => cloud::init(),
        #[cfg(feature = "advanced")]
        advanced::ID => advanced::init(),
        _ => Err(LoadError::NotInstalled),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Registry;

    #[test]
    fn bundled_manifests_do_not_overlap() {
        let registry = Registry::from_manifests(manifests()).unwrap();
        assert_eq!(registry.lookup("redis").unwrap(), database::ID);
        assert_eq!(registry.lookup("dropbox").unwrap(), cloud::ID);
        assert_eq!(registry.lookup("cacache").unwrap(), advanced::ID);
        assert_eq!(registry.lookup("s3").unwrap(), primary::ID);
    }

    #[test]
    fn unknown_module_is_not_installed() {
        assert_eq!(open("quantum").err(), Some(LoadError::NotInstalled));
    }

    #[cfg(feature = "core")]
    #[test]
    fn core_publishes_shared_symbols() {
        let module = open(primary::ID).ok().unwrap();
        let exports = module.exports().unwrap();
        assert!(exports.get::<Vec<crate::shared::ErrorKind>>(primary::symbols::EXCEPTIONS).is_some());
        assert!(exports.get::<&str>(primary::symbols::VERSION).is_some());
    }
}
