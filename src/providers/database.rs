//! SQL, NoSQL, cache and embedded key/value stores.

#[cfg(feature = "database")]
use std::sync::Arc;

use crate::provider::{ProviderManifest, ServiceSpec};
use crate::shared::Capability;
#[cfg(feature = "database")]
use crate::{
    error::LoadError,
    provider::{ProviderId, ProviderModule, TableProvider},
};

pub const ID: &str = "database";

const SERVICES: &[ServiceSpec] = &[
    ServiceSpec::new("mysql", Capability::KEY_VALUE)
        .required(&["connection_string", "table"])
        .secrets(&["connection_string"]),
    ServiceSpec::new("postgresql", Capability::KEY_VALUE)
        .required(&["connection_string", "table"])
        .secrets(&["connection_string"]),
    ServiceSpec::new("sqlite", Capability::KEY_VALUE).required(&["connection_string", "table"]),
    ServiceSpec::new("mongodb", Capability::KEY_VALUE)
        .required(&["connection_string", "database", "collection"])
        .secrets(&["connection_string"]),
    ServiceSpec::new("gridfs", Capability::KEY_VALUE)
        .required(&["connection_string", "database", "bucket"])
        .secrets(&["connection_string"]),
    ServiceSpec::new("redis", Capability::KEY_VALUE)
        .required(&["endpoint"])
        .secrets(&["password"]),
    ServiceSpec::new("memcached", Capability::KEY_VALUE)
        .required(&["endpoint"])
        .secrets(&["password"]),
    ServiceSpec::new("sled", Capability::KEY_VALUE).required(&["datadir"]),
    ServiceSpec::new("redb", Capability::KEY_VALUE).required(&["datadir", "table"]),
    ServiceSpec::new("persy", Capability::KEY_VALUE).required(&["datafile", "segment", "index"]),
];

pub const MANIFEST: ProviderManifest = ProviderManifest {
    id: ID,
    install_hint: "install the 'database' capability package (cargo feature `database`) to use this service",
    services: SERVICES,
};

#[cfg(feature = "database")]
pub fn init() -> Result<Arc<dyn ProviderModule>, LoadError> {
    let id = ProviderId::new(ID).map_err(|err| LoadError::Init(err.to_string()))?;
    Ok(Arc::new(TableProvider::new(id, SERVICES)))
}
