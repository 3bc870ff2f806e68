//! Specialized file systems and local caches.

#[cfg(feature = "advanced")]
use std::sync::Arc;

use crate::provider::{ProviderManifest, ServiceSpec};
use crate::shared::Capability;
#[cfg(feature = "advanced")]
use crate::{
    error::LoadError,
    provider::{ProviderId, ProviderModule, TableProvider},
};

pub const ID: &str = "advanced";

const SERVICES: &[ServiceSpec] = &[
    ServiceSpec::new("azfile", Capability::FULL)
        .required(&["endpoint", "share_name"])
        .secrets(&["account_key", "sas_token"]),
    ServiceSpec::new("monoiofs", Capability::FULL)
        .required(&["root"])
        .probe_dir("root"),
    ServiceSpec::new("mini-moka", Capability::KEY_VALUE),
    ServiceSpec::new("cacache", Capability::KEY_VALUE)
        .required(&["datadir"])
        .probe_dir("datadir"),
];

pub const MANIFEST: ProviderManifest = ProviderManifest {
    id: ID,
    install_hint: "install the 'advanced' capability package (cargo feature `advanced`) to use this service",
    services: SERVICES,
};

#[cfg(feature = "advanced")]
pub fn init() -> Result<Arc<dyn ProviderModule>, LoadError> {
    let id = ProviderId::new(ID).map_err(|err| LoadError::Init(err.to_string()))?;
    Ok(Arc::new(TableProvider::new(id, SERVICES)))
}
