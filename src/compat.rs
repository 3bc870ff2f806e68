//! Legacy flat namespace.
//!
//! Shared symbols used to live in one flat namespace. They are now owned by
//! the primary provider, and this module keeps the old paths working: the
//! static re-exports below cover the Rust types, and [`Namespace`] serves the
//! primary provider's published [`SymbolTable`] under the legacy names.

use std::sync::Arc;

use crate::error::RouterError;
use crate::loader::Loader;
use crate::provider::{ProviderId, Symbol, SymbolTable};
use crate::providers::primary::symbols;
use crate::shared::ErrorKind;

/// Legacy `exceptions` path.
pub mod exceptions {
    pub use crate::providers::primary::ErrorKind;
    pub use crate::providers::primary::ServiceError as Error;
}

/// Legacy top-level types.
pub mod types {
    pub use crate::providers::primary::{Capability, Entry, EntryMode, Metadata, Options};
}

pub use exceptions::{Error, ErrorKind as ExceptionKind};
pub use types::{Capability, Entry, EntryMode, Metadata, Options};

/// Symbols of the primary provider, bound once at startup.
#[derive(Debug, Clone)]
pub struct Namespace {
    provider_id: ProviderId,
    exports: Arc<SymbolTable>,
}

impl Namespace {
    /// Loads `primary` and binds its exports.
    ///
    /// Fails fast with `PrimaryProviderMissing` when the provider cannot be
    /// loaded or publishes nothing.
    pub fn bind(loader: &Loader, primary: &ProviderId) -> Result<Self, RouterError> {
        let module = loader
            .load(primary)
            .map_err(|err| RouterError::PrimaryProviderMissing {
                provider_id: primary.clone(),
                install_hint: err.install_hint,
                reason: Some(err.reason),
            })?;
        let exports = module
            .exports()
            .ok_or_else(|| RouterError::PrimaryProviderMissing {
                provider_id: primary.clone(),
                install_hint: format!("provider '{primary}' does not publish shared symbols"),
                reason: None,
            })?;
        log::debug!(
            "bound {} shared symbol(s) from '{primary}'",
            exports.len()
        );
        Ok(Self {
            provider_id: primary.clone(),
            exports,
        })
    }

    pub fn provider_id(&self) -> &ProviderId {
        &self.provider_id
    }

    /// The table as published by the provider; shared, not copied.
    pub fn exports(&self) -> &Arc<SymbolTable> {
        &self.exports
    }

    pub fn symbol(&self, name: &str) -> Option<&Symbol> {
        self.exports.get_raw(name)
    }

    pub fn get<T: std::any::Any + Send + Sync>(&self, name: &str) -> Option<Arc<T>> {
        self.exports.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.exports.names()
    }

    /// Resolves a legacy exception name such as `"NotFound"`.
    pub fn exception(&self, legacy_name: &str) -> Option<ErrorKind> {
        self.get::<Vec<ErrorKind>>(symbols::EXCEPTIONS)?
            .iter()
            .copied()
            .find(|kind| kind.legacy_name() == legacy_name)
    }

    pub fn version(&self) -> Option<&'static str> {
        self.get::<&'static str>(symbols::VERSION).map(|v| *v)
    }
}

#[cfg(test)]
mod tests {
    use std::any::TypeId;

    use super::*;
    use crate::error::LoadError;
    use crate::loader::StaticSource;
    use crate::provider::{ServiceSpec, TableProvider};
    use crate::registry::Registry;
    use crate::providers::primary;
    use crate::shared::{self, Capability as SharedCapability};

    static SPECS: &[ServiceSpec] = &[ServiceSpec::new("memory", SharedCapability::FULL)];

    fn registry() -> Registry {
        Registry::builder()
            .register("core", ["memory"], "install core")
            .unwrap()
            .build()
    }

    fn core_id() -> ProviderId {
        ProviderId::new("core").unwrap()
    }

    fn publishing_loader() -> Loader {
        let table = SymbolTable::new()
            .with(symbols::EXCEPTIONS, ErrorKind::ALL.to_vec())
            .with(symbols::METADATA, shared::Metadata::new(shared::EntryMode::Unknown))
            .with(symbols::VERSION, "9.9.9");
        let module = TableProvider::new(core_id(), SPECS).with_exports(table);
        Loader::new(
            StaticSource::new().with_module("core", Arc::new(module)),
            &registry(),
        )
    }

    #[test]
    fn legacy_paths_name_the_same_types() {
        assert_eq!(TypeId::of::<exceptions::Error>(), TypeId::of::<shared::ServiceError>());
        assert_eq!(TypeId::of::<types::Capability>(), TypeId::of::<shared::Capability>());
        assert_eq!(TypeId::of::<ExceptionKind>(), TypeId::of::<shared::ErrorKind>());
        assert_eq!(TypeId::of::<types::Metadata>(), TypeId::of::<shared::Metadata>());
        assert_eq!(TypeId::of::<types::Entry>(), TypeId::of::<shared::Entry>());
    }

    #[test]
    fn legacy_paths_match_primary_provider_paths() {
        assert_eq!(TypeId::of::<exceptions::Error>(), TypeId::of::<primary::ServiceError>());
        assert_eq!(TypeId::of::<exceptions::ErrorKind>(), TypeId::of::<primary::ErrorKind>());
        assert_eq!(TypeId::of::<types::Capability>(), TypeId::of::<primary::Capability>());
        assert_eq!(TypeId::of::<types::EntryMode>(), TypeId::of::<primary::EntryMode>());
        assert_eq!(TypeId::of::<types::Metadata>(), TypeId::of::<primary::Metadata>());
        assert_eq!(TypeId::of::<types::Entry>(), TypeId::of::<primary::Entry>());
        assert_eq!(TypeId::of::<types::Options>(), TypeId::of::<primary::Options>());
    }

    #[test]
    fn republished_symbols_are_identical() {
        let loader = publishing_loader();
        let ns = Namespace::bind(&loader, &core_id()).unwrap();
        let own = loader.load(&core_id()).ok().unwrap().exports().unwrap();

        assert!(Arc::ptr_eq(ns.exports(), &own));
        let via_shim = ns.symbol(symbols::EXCEPTIONS).unwrap();
        let via_owner = own.get_raw(symbols::EXCEPTIONS).unwrap();
        assert!(Arc::ptr_eq(via_shim, via_owner));
        assert_eq!(ns.exception("NotFound"), Some(ErrorKind::NotFound));
        assert_eq!(ns.exception("Nope"), None);
        assert_eq!(ns.version(), Some("9.9.9"));
        let metadata = ns.get::<types::Metadata>(symbols::METADATA).unwrap();
        let own_metadata = own.get::<shared::Metadata>(symbols::METADATA).unwrap();
        assert!(Arc::ptr_eq(&metadata, &own_metadata));
    }

    #[test]
    fn missing_primary_fails_fast() {
        let loader = Loader::new(StaticSource::new(), &registry());
        let err = Namespace::bind(&loader, &core_id()).unwrap_err();
        assert_eq!(
            err,
            RouterError::PrimaryProviderMissing {
                provider_id: core_id(),
                install_hint: "install core".to_string(),
                reason: Some(LoadError::NotInstalled),
            }
        );
    }

    #[test]
    fn primary_without_exports_is_missing() {
        let loader = Loader::new(
            StaticSource::new().with_module("core", Arc::new(TableProvider::new(core_id(), SPECS))),
            &registry(),
        );
        assert!(matches!(
            Namespace::bind(&loader, &core_id()),
            Err(RouterError::PrimaryProviderMissing { reason: None, .. })
        ));
    }

    #[test]
    fn failing_primary_init_is_missing() {
        let loader = Loader::new(
            StaticSource::new().with("core", || Err(LoadError::Init("boom".to_string()))),
            &registry(),
        );
        assert!(matches!(
            Namespace::bind(&loader, &core_id()),
            Err(RouterError::PrimaryProviderMissing {
                reason: Some(LoadError::Init(_)),
                ..
            })
        ));
    }
}
