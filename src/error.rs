use thiserror::Error;

use crate::provider::{ProviderId, ServiceName};
use crate::shared::ServiceError;

/// Error types that can occur when routing a service request.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RouterError {
    /// Two providers claim the same service name
    #[error(
        "service '{service}' is claimed by both '{existing}' and '{conflicting}'"
    )]
    DuplicateServiceBinding {
        service: ServiceName,
        existing: ProviderId,
        conflicting: ProviderId,
    },
    /// No registered provider claims the service name
    #[error("unknown service '{service}'{}", suggestion_suffix(.suggestion))]
    UnknownService {
        service: String,
        suggestion: Option<Suggestion>,
    },
    /// The owning provider module could not be loaded
    #[error(transparent)]
    ProviderUnavailable(#[from] ProviderUnavailable),
    /// The provider publishing the shared symbols could not be loaded
    #[error(
        "primary provider '{provider_id}' is missing{}: {install_hint}",
        reason_suffix(.reason)
    )]
    PrimaryProviderMissing {
        provider_id: ProviderId,
        install_hint: String,
        /// Load failure behind the miss; `None` when the provider loaded but
        /// publishes no shared symbols.
        reason: Option<LoadError>,
    },
    /// Empty service name or provider id
    #[error("invalid name: {0}")]
    InvalidName(String),
    /// Configuration could not be read or parsed
    #[error("config error: {0}")]
    Config(String),
    /// Errors returned by the provider itself, surfaced verbatim
    #[error(transparent)]
    Service(#[from] ServiceError),
}

/// Closest known service for a name nobody registered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    pub service: ServiceName,
    pub provider_id: ProviderId,
}

fn suggestion_suffix(suggestion: &Option<Suggestion>) -> String {
    match suggestion {
        Some(s) => format!(
            "; did you mean '{}' (provided by '{}')?",
            s.service, s.provider_id
        ),
        None => String::new(),
    }
}

fn reason_suffix(reason: &Option<LoadError>) -> String {
    match reason {
        Some(reason) => format!(" ({reason})"),
        None => String::new(),
    }
}

/// A provider module failed to load. Cached per provider for the process lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("provider '{provider_id}' is unavailable ({reason}): {install_hint}")]
pub struct ProviderUnavailable {
    pub provider_id: ProviderId,
    pub install_hint: String,
    pub reason: LoadError,
}

/// Why a provider module could not be turned into a live instance.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    #[error("module is not installed")]
    NotInstalled,
    #[error("initialization failed: {0}")]
    Init(String),
    #[error("incompatible module version: expected {expected}, found {found}")]
    IncompatibleVersion { expected: u32, found: u32 },
    #[error("module identifies itself as '{found}', expected '{expected}'")]
    IdMismatch { expected: String, found: String },
}

impl From<toml::de::Error> for RouterError {
    fn from(err: toml::de::Error) -> Self {
        RouterError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, RouterError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::ErrorKind;

    #[test]
    fn unknown_service_mentions_suggestion() {
        let err = RouterError::UnknownService {
            service: "rediss".to_string(),
            suggestion: Some(Suggestion {
                service: ServiceName::new("redis").unwrap(),
                provider_id: ProviderId::new("database").unwrap(),
            }),
        };
        assert_eq!(
            err.to_string(),
            "unknown service 'rediss'; did you mean 'redis' (provided by 'database')?"
        );
    }

    #[test]
    fn primary_missing_names_load_failure() {
        let err = RouterError::PrimaryProviderMissing {
            provider_id: ProviderId::new("core").unwrap(),
            install_hint: "install core".to_string(),
            reason: Some(LoadError::IncompatibleVersion {
                expected: 1,
                found: 2,
            }),
        };
        assert_eq!(
            err.to_string(),
            "primary provider 'core' is missing (incompatible module version: expected 1, found 2): install core"
        );
    }

    #[test]
    fn service_errors_pass_through_verbatim() {
        let inner = ServiceError::new(ErrorKind::ConfigInvalid, "bucket is required");
        let err: RouterError = inner.clone().into();
        assert_eq!(err.to_string(), inner.to_string());
        assert!(matches!(err, RouterError::Service(e) if e == inner));
    }
}
