use std::collections::BTreeMap;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use secrecy::SecretString;

use super::id::{ProviderId, ServiceName};
use crate::shared::{Capability, ErrorKind, ServiceError};

/// An open, blocking capability instance returned by [`Router::create`](crate::Router::create).
///
/// Owned by the caller; the router keeps no reference to it.
pub trait Handle: Send + Sync + fmt::Debug {
    /// Service the provider constructed this handle for.
    fn service_name(&self) -> &ServiceName;

    fn provider_id(&self) -> &ProviderId;

    fn capability(&self) -> Capability;

    /// Cheap liveness probe of the underlying service.
    fn check(&self) -> Result<(), ServiceError> {
        Ok(())
    }
}

/// Async counterpart of [`Handle`], returned by [`Router::create_async`](crate::Router::create_async).
#[async_trait]
pub trait AsyncHandle: Send + Sync + fmt::Debug {
    fn service_name(&self) -> &ServiceName;

    fn provider_id(&self) -> &ProviderId;

    fn capability(&self) -> Capability;

    async fn check(&self) -> Result<(), ServiceError> {
        Ok(())
    }
}

/// Handle produced by the built-in table-driven providers.
///
/// Secret option values are kept as [`SecretString`] and never show up in `Debug` output.
#[derive(Debug)]
pub struct ConfiguredHandle {
    service: ServiceName,
    provider: ProviderId,
    capability: Capability,
    settings: BTreeMap<String, String>,
    secrets: BTreeMap<String, SecretString>,
    probe: Probe,
}

#[derive(Debug)]
enum Probe {
    None,
    LocalDir(PathBuf),
}

impl ConfiguredHandle {
    pub fn new(service: ServiceName, provider: ProviderId, capability: Capability) -> Self {
        Self {
            service,
            provider,
            capability,
            settings: BTreeMap::new(),
            secrets: BTreeMap::new(),
            probe: Probe::None,
        }
    }

    pub fn setting(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.settings.insert(key.into(), value.into());
        self
    }

    pub fn secret(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.secrets
            .insert(key.into(), SecretString::new(value.into()));
        self
    }

    /// Makes `check` verify that `dir` exists and is a directory.
    pub fn probe_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.probe = Probe::LocalDir(dir.into());
        self
    }

    pub fn get_setting(&self, key: &str) -> Option<&str> {
        self.settings.get(key).map(String::as_str)
    }

    pub fn get_secret(&self, key: &str) -> Option<&SecretString> {
        self.secrets.get(key)
    }

    fn dir_error(&self, dir: &Path, err: io::Error) -> ServiceError {
        let kind = match err.kind() {
            io::ErrorKind::NotFound => ErrorKind::NotFound,
            io::ErrorKind::PermissionDenied => ErrorKind::PermissionDenied,
            _ => ErrorKind::Unexpected,
        };
        ServiceError::new(kind, err.to_string())
            .with_context("service", self.service.as_str())
            .with_context("path", dir.display().to_string())
    }

    fn not_a_dir(&self, dir: &Path) -> ServiceError {
        ServiceError::new(ErrorKind::NotADirectory, "root is not a directory")
            .with_context("service", self.service.as_str())
            .with_context("path", dir.display().to_string())
    }
}

impl Handle for ConfiguredHandle {
    fn service_name(&self) -> &ServiceName {
        &self.service
    }

    fn provider_id(&self) -> &ProviderId {
        &self.provider
    }

    fn capability(&self) -> Capability {
        self.capability
    }

    fn check(&self) -> Result<(), ServiceError> {
        match &self.probe {
            Probe::None => Ok(()),
            Probe::LocalDir(dir) => {
                let meta = std::fs::metadata(dir).map_err(|err| self.dir_error(dir, err))?;
                if meta.is_dir() {
                    Ok(())
                } else {
                    Err(self.not_a_dir(dir))
                }
            }
        }
    }
}

#[async_trait]
impl AsyncHandle for ConfiguredHandle {
    fn service_name(&self) -> &ServiceName {
        &self.service
    }

    fn provider_id(&self) -> &ProviderId {
        &self.provider
    }

    fn capability(&self) -> Capability {
        self.capability
    }

    async fn check(&self) -> Result<(), ServiceError> {
        match &self.probe {
            Probe::None => Ok(()),
            Probe::LocalDir(dir) => {
                let meta = tokio::fs::metadata(dir)
                    .await
                    .map_err(|err| self.dir_error(dir, err))?;
                if meta.is_dir() {
                    Ok(())
                } else {
                    Err(self.not_a_dir(dir))
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use secrecy::ExposeSecret;

    use super::*;

    fn handle() -> ConfiguredHandle {
        ConfiguredHandle::new(
            ServiceName::new("dropbox").unwrap(),
            ProviderId::new("cloud").unwrap(),
            Capability::FULL,
        )
    }

    #[test]
    fn secrets_are_redacted_in_debug() {
        let h = handle().secret("access_token", "hunter2");
        assert!(!format!("{h:?}").contains("hunter2"));
        assert_eq!(
            h.get_secret("access_token").map(|s| s.expose_secret().as_str()),
            Some("hunter2")
        );
    }

    #[test]
    fn probe_reports_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        let h = handle().probe_dir(&missing);
        let err = Handle::check(&h).unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn async_probe_accepts_directory() {
        let dir = tempfile::tempdir().unwrap();
        let h = handle().probe_dir(dir.path());
        assert!(AsyncHandle::check(&h).await.is_ok());
    }

    #[tokio::test]
    async fn async_probe_rejects_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let h = handle().probe_dir(file.path());
        let err = AsyncHandle::check(&h).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotADirectory);
    }
}
