//! Personal cloud drives, hosted object stores and developer platforms.

#[cfg(feature = "cloud")]
use std::sync::Arc;

use crate::provider::{ProviderManifest, ServiceSpec};
use crate::shared::Capability;
#[cfg(feature = "cloud")]
use crate::{
    error::LoadError,
    provider::{ProviderId, ProviderModule, TableProvider},
};

pub const ID: &str = "cloud";

const SERVICES: &[ServiceSpec] = &[
    ServiceSpec::new("aliyun-drive", Capability::FULL)
        .required(&["client_id", "refresh_token"])
        .secrets(&["client_secret", "refresh_token"]),
    ServiceSpec::new("dropbox", Capability::FULL)
        .required(&["access_token"])
        .secrets(&["access_token", "refresh_token", "client_secret"]),
    ServiceSpec::new("onedrive", Capability::FULL)
        .required(&["access_token"])
        .secrets(&["access_token"]),
    ServiceSpec::new("gdrive", Capability::FULL)
        .required(&["access_token"])
        .secrets(&["access_token", "refresh_token", "client_secret"]),
    ServiceSpec::new("yandex-disk", Capability::FULL)
        .required(&["access_token"])
        .secrets(&["access_token"]),
    ServiceSpec::new("b2", Capability::OBJECT_STORE)
        .required(&["bucket", "bucket_id", "application_key_id"])
        .secrets(&["application_key"]),
    ServiceSpec::new("swift", Capability::OBJECT_STORE)
        .required(&["endpoint", "container"])
        .secrets(&["token"]),
    ServiceSpec::new("upyun", Capability::OBJECT_STORE)
        .required(&["bucket", "operator"])
        .secrets(&["password"]),
    ServiceSpec::new("huggingface", Capability::READ_ONLY)
        .required(&["repo_id"])
        .secrets(&["token"]),
    ServiceSpec::new("seafile", Capability::FULL)
        .required(&["endpoint", "repo_name", "username"])
        .secrets(&["password"]),
    ServiceSpec::new("ipfs", Capability::READ_ONLY).required(&["endpoint"]),
    ServiceSpec::new("koofr", Capability::FULL)
        .required(&["endpoint", "email"])
        .secrets(&["password"]),
    ServiceSpec::new("moka", Capability::KEY_VALUE),
    ServiceSpec::new("dashmap", Capability::KEY_VALUE),
    ServiceSpec::new("vercel-artifacts", Capability::KEY_VALUE)
        .required(&["access_token"])
        .secrets(&["access_token"]),
    ServiceSpec::new("alluxio", Capability::FULL).required(&["endpoint"]),
];

pub const MANIFEST: ProviderManifest = ProviderManifest {
    id: ID,
    install_hint: "install the 'cloud' capability package (cargo feature `cloud`) to use this service",
    services: SERVICES,
};

#[cfg(feature = "cloud")]
pub fn init() -> Result<Arc<dyn ProviderModule>, LoadError> {
    let id = ProviderId::new(ID).map_err(|err| LoadError::Init(err.to_string()))?;
    Ok(Arc::new(TableProvider::new(id, SERVICES)))
}
