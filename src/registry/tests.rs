use proptest::collection::btree_set;
use proptest::prelude::*;
use rstest::rstest;

use super::*;

fn sample() -> Registry {
    Registry::builder()
        .register("core", ["fs", "memory", "s3"], "core hint")
        .unwrap()
        .register("database", ["redis", "mysql"], "database hint")
        .unwrap()
        .register("cloud", ["dropbox"], "cloud hint")
        .unwrap()
        .build()
}

#[rstest]
#[case("fs", "core")]
#[case("s3", "core")]
#[case("redis", "database")]
#[case("dropbox", "cloud")]
fn lookup_returns_owner(#[case] service: &str, #[case] provider: &str) {
    let registry = sample();
    assert_eq!(registry.lookup(service).unwrap(), provider);
}

#[test]
fn conflicting_claim_names_both_providers() {
    let err = Registry::builder()
        .register("core", ["fs", "redis"], "")
        .unwrap()
        .register("database", ["mysql", "redis"], "")
        .unwrap_err();
    match err {
        RouterError::DuplicateServiceBinding {
            service,
            existing,
            conflicting,
        } => {
            assert_eq!(service, "redis");
            assert_eq!(existing, "core");
            assert_eq!(conflicting, "database");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn failed_registration_claims_nothing() {
    let builder = Registry::builder().register("core", ["fs"], "").unwrap();
    assert!(builder.register("database", ["redis", "fs"], "").is_err());
}

#[test]
fn unknown_service_without_close_match() {
    let err = sample().lookup("nonexistent-service").unwrap_err();
    assert!(matches!(
        err,
        RouterError::UnknownService { ref service, suggestion: None } if service == "nonexistent-service"
    ));
}

#[rstest]
#[case("rediss", "redis", "database")]
#[case("dropbx", "dropbox", "cloud")]
fn unknown_service_suggests_closest(
    #[case] query: &str,
    #[case] expected: &str,
    #[case] provider: &str,
) {
    let err = sample().lookup(query).unwrap_err();
    let RouterError::UnknownService {
        suggestion: Some(suggestion),
        ..
    } = err
    else {
        panic!("expected a suggestion for {query}: {err:?}");
    };
    assert_eq!(suggestion.service, expected);
    assert_eq!(suggestion.provider_id, provider);
}

#[test]
fn lookup_is_case_sensitive() {
    assert!(sample().lookup("FS").is_err());
}

#[test]
fn empty_lookup_is_invalid() {
    assert!(matches!(
        sample().lookup(""),
        Err(RouterError::InvalidName(_))
    ));
}

#[test]
fn install_hints_are_kept_verbatim() {
    let registry = sample();
    assert_eq!(registry.install_hint("database"), Some("database hint"));
    assert_eq!(registry.provider("cloud").unwrap().services.len(), 1);
}

proptest! {
    #[test]
    fn disjoint_sets_always_register(
        a in btree_set("[a-z]{1,8}", 1..8),
        b in btree_set("[A-Z]{1,8}", 1..8),
    ) {
        let registry = Registry::builder()
            .register("lower", &a, "")
            .unwrap()
            .register("upper", &b, "")
            .unwrap()
            .build();
        for name in &a {
            prop_assert_eq!(registry.lookup(name).unwrap().as_str(), "lower");
        }
        for name in &b {
            prop_assert_eq!(registry.lookup(name).unwrap().as_str(), "upper");
        }
    }

    #[test]
    fn overlapping_sets_always_conflict(
        a in btree_set("[a-z]{1,8}", 1..8),
        extra in btree_set("[a-z]{1,8}", 0..4),
        pick in any::<prop::sample::Index>(),
    ) {
        let shared = pick.get(&a.iter().collect::<Vec<_>>()).to_string();
        let mut b = extra.clone();
        b.insert(shared.clone());
        let result = Registry::builder()
            .register("first", &a, "")
            .unwrap()
            .register("second", &b, "");
        let is_duplicate = matches!(
            result,
            Err(RouterError::DuplicateServiceBinding { .. })
        );
        prop_assert!(is_duplicate);
    }
}
