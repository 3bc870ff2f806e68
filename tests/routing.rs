#![cfg(feature = "core")]

use std::sync::Arc;

use capability_router::compat::{self, exceptions};
use capability_router::providers::primary::symbols;
use capability_router::{
    Capability, ErrorKind, Metadata, Options, ProviderId, Router, RouterConfig, RouterError,
    ServiceError,
};

fn router() -> Router {
    Router::new().expect("builtin router")
}

#[test]
fn fs_service_opens_through_builtin_router() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().to_string_lossy().to_string();
    let handle = router()
        .create("fs", &Options::new().with("root", root))
        .unwrap();
    assert_eq!(handle.service_name(), "fs");
    assert_eq!(handle.provider_id(), "core");
    assert!(handle.check().is_ok());
}

#[test]
fn fs_check_reports_missing_root() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("gone").to_string_lossy().to_string();
    let handle = router()
        .create("fs", &Options::new().with("root", root))
        .unwrap();
    assert_eq!(handle.check().unwrap_err().kind, ErrorKind::NotFound);
}

#[tokio::test]
async fn memory_service_opens_async() {
    let handle = router()
        .create_async("memory", &Options::new())
        .await
        .unwrap();
    assert_eq!(handle.capability(), Capability::FULL);
    assert!(handle.check().await.is_ok());
}

#[test]
fn unknown_service_names_closest_match() {
    let err = router().create("dropbx", &Options::new()).unwrap_err();
    assert_eq!(
        err.to_string(),
        "unknown service 'dropbx'; did you mean 'dropbox' (provided by 'cloud')?"
    );
}

#[test]
fn shim_republishes_primary_symbols() {
    let router = router();
    let core = ProviderId::new("core").unwrap();
    let module = router.loader().load(&core).ok().unwrap();
    let own = module.exports().unwrap();
    assert!(Arc::ptr_eq(router.namespace().exports(), &own));
    assert_eq!(
        router.namespace().version(),
        Some(env!("CARGO_PKG_VERSION"))
    );
    assert!(router.namespace().names().any(|n| n == symbols::ENTRY_MODE));
    let metadata = router
        .namespace()
        .get::<compat::Metadata>(symbols::METADATA)
        .unwrap();
    assert!(Arc::ptr_eq(
        &metadata,
        &own.get::<Metadata>(symbols::METADATA).unwrap()
    ));
    let root = router.namespace().get::<compat::Entry>(symbols::ENTRY).unwrap();
    assert!(root.metadata.is_dir());

    let legacy: exceptions::Error = ServiceError::new(ErrorKind::NotFound, "x");
    assert_eq!(legacy.kind, compat::ExceptionKind::NotFound);
}

#[cfg(feature = "database")]
#[test]
fn redis_opens_when_database_is_enabled() {
    let opts = Options::new()
        .with("endpoint", "redis://127.0.0.1:6379")
        .with("password", "secret");
    let handle = router().create("redis", &opts).unwrap();
    assert_eq!(handle.provider_id(), "database");
    assert!(!format!("{handle:?}").contains("secret\""));
}

#[test]
fn disabled_database_is_unavailable() {
    let mut config = RouterConfig::default();
    config
        .providers
        .entry("database".to_string())
        .or_default()
        .enabled = false;
    let router = Router::from_config(&config).unwrap();
    let err = router
        .create("redis", &Options::new().with("endpoint", "redis://h"))
        .unwrap_err();
    let RouterError::ProviderUnavailable(err) = err else {
        panic!("expected ProviderUnavailable, got {err:?}");
    };
    assert_eq!(err.provider_id, "database");
    assert!(err
        .install_hint
        .starts_with("install the 'database' capability package"));
}

#[test]
fn disabled_primary_fails_fast() {
    let mut config = RouterConfig::default();
    config.providers.entry("core".to_string()).or_default().enabled = false;
    assert!(matches!(
        Router::from_config(&config),
        Err(RouterError::PrimaryProviderMissing { .. })
    ));
}
