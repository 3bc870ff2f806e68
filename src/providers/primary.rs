//! The primary provider: general purpose object stores and local services.
//!
//! Besides its services it publishes the shared symbol table that
//! [`compat::Namespace`](crate::compat::Namespace) re-exposes.

#[cfg(feature = "core")]
use std::sync::Arc;

use crate::provider::{ProviderManifest, ServiceSpec};
#[cfg(feature = "core")]
use crate::{
    error::LoadError,
    provider::{ProviderId, ProviderModule, SymbolTable, TableProvider},
};

pub use crate::provider::Options;
pub use crate::shared::{Capability, Entry, EntryMode, ErrorKind, Metadata, ServiceError};

pub const ID: &str = "core";

/// Names under which the shared symbols are published.
pub mod symbols {
    pub const EXCEPTIONS: &str = "exceptions";
    pub const CAPABILITY: &str = "Capability";
    pub const ENTRY_MODE: &str = "EntryMode";
    pub const METADATA: &str = "Metadata";
    pub const ENTRY: &str = "Entry";
    pub const VERSION: &str = "version";
}

const SERVICES: &[ServiceSpec] = &[
    ServiceSpec::new("azblob", Capability::OBJECT_STORE)
        .required(&["container"])
        .secrets(&["account_key", "sas_token"]),
    ServiceSpec::new("azdls", Capability::FULL)
        .required(&["filesystem"])
        .secrets(&["account_key"]),
    ServiceSpec::new("cos", Capability::OBJECT_STORE)
        .required(&["bucket"])
        .secrets(&["secret_key"]),
    ServiceSpec::new("fs", Capability::FULL)
        .required(&["root"])
        .probe_dir("root"),
    ServiceSpec::new("gcs", Capability::OBJECT_STORE)
        .required(&["bucket"])
        .secrets(&["credential"]),
    ServiceSpec::new("ghac", Capability::KEY_VALUE).secrets(&["runtime_token"]),
    ServiceSpec::new("http", Capability::READ_ONLY)
        .required(&["endpoint"])
        .secrets(&["password", "token"]),
    ServiceSpec::new("ipmfs", Capability::FULL),
    ServiceSpec::new("memory", Capability::FULL),
    ServiceSpec::new("obs", Capability::OBJECT_STORE)
        .required(&["bucket", "endpoint"])
        .secrets(&["secret_access_key"]),
    ServiceSpec::new("oss", Capability::OBJECT_STORE)
        .required(&["bucket", "endpoint"])
        .secrets(&["access_key_secret"]),
    ServiceSpec::new("s3", Capability::OBJECT_STORE)
        .required(&["bucket"])
        .secrets(&["secret_access_key", "session_token"]),
    ServiceSpec::new("webdav", Capability::FULL)
        .required(&["endpoint"])
        .secrets(&["password", "token"]),
    ServiceSpec::new("webhdfs", Capability::FULL)
        .required(&["endpoint"])
        .secrets(&["delegation"]),
];

pub const MANIFEST: ProviderManifest = ProviderManifest {
    id: ID,
    install_hint: "install the 'core' capability package (cargo feature `core`); it is required by every other provider",
    services: SERVICES,
};

#[cfg(feature = "core")]
pub fn init() -> Result<Arc<dyn ProviderModule>, LoadError> {
    let id = ProviderId::new(ID).map_err(|err| LoadError::Init(err.to_string()))?;
    Ok(Arc::new(TableProvider::new(id, SERVICES).with_exports(exports())))
}

#[cfg(feature = "core")]
fn exports() -> SymbolTable {
    SymbolTable::new()
        .with(symbols::EXCEPTIONS, ErrorKind::ALL.to_vec())
        .with(symbols::CAPABILITY, Capability::FULL)
        .with(
            symbols::ENTRY_MODE,
            vec![EntryMode::File, EntryMode::Dir, EntryMode::Unknown],
        )
        .with(symbols::METADATA, Metadata::new(EntryMode::Unknown))
        .with(symbols::ENTRY, Entry::new("/", Metadata::new(EntryMode::Dir)))
        .with(symbols::VERSION, env!("CARGO_PKG_VERSION"))
}
