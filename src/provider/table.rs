use std::sync::Arc;

use async_trait::async_trait;

use super::handle::{AsyncHandle, ConfiguredHandle, Handle};
use super::id::{ProviderId, ServiceName};
use super::options::Options;
use super::symbols::SymbolTable;
use super::traits::ProviderModule;
use crate::shared::{Capability, ErrorKind, ServiceError};

/// Declares one service of a table-driven provider.
#[derive(Debug, Clone, Copy)]
pub struct ServiceSpec {
    pub name: &'static str,
    /// Option keys that must be present and non-empty
    pub required: &'static [&'static str],
    /// Option keys whose values are credentials
    pub secrets: &'static [&'static str],
    /// Option key naming a local directory that `check` should probe
    pub probe_dir: Option<&'static str>,
    pub capability: Capability,
}

impl ServiceSpec {
    pub const fn new(name: &'static str, capability: Capability) -> Self {
        Self {
            name,
            required: &[],
            secrets: &[],
            probe_dir: None,
            capability,
        }
    }

    pub const fn required(mut self, keys: &'static [&'static str]) -> Self {
        self.required = keys;
        self
    }

    pub const fn secrets(mut self, keys: &'static [&'static str]) -> Self {
        self.secrets = keys;
        self
    }

    pub const fn probe_dir(mut self, key: &'static str) -> Self {
        self.probe_dir = Some(key);
        self
    }
}

/// A provider whose services are fully described by a [`ServiceSpec`] table.
pub struct TableProvider {
    id: ProviderId,
    specs: &'static [ServiceSpec],
    exports: Option<Arc<SymbolTable>>,
}

impl TableProvider {
    pub fn new(id: ProviderId, specs: &'static [ServiceSpec]) -> Self {
        Self {
            id,
            specs,
            exports: None,
        }
    }

    pub fn with_exports(mut self, exports: SymbolTable) -> Self {
        self.exports = Some(Arc::new(exports));
        self
    }

    fn spec(&self, service: &ServiceName) -> Result<&ServiceSpec, ServiceError> {
        self.specs
            .iter()
            .find(|spec| spec.name == service.as_str())
            .ok_or_else(|| {
                ServiceError::new(
                    ErrorKind::Unsupported,
                    format!("service '{service}' is not provided here"),
                )
                .with_context("provider", self.id.as_str())
            })
    }

    fn configure(
        &self,
        service: &ServiceName,
        options: &Options,
    ) -> Result<ConfiguredHandle, ServiceError> {
        let spec = self.spec(service)?;
        for key in spec.required {
            options.require(service.as_str(), key)?;
        }

        let mut handle = ConfiguredHandle::new(service.clone(), self.id.clone(), spec.capability);
        for (key, value) in options.iter() {
            handle = if spec.secrets.iter().any(|secret| *secret == key) {
                handle.secret(key, value)
            } else {
                handle.setting(key, value)
            };
        }
        if let Some(dir) = spec.probe_dir.and_then(|key| options.get(key)) {
            handle = handle.probe_dir(dir);
        }
        log::debug!(
            "{} configured '{}' with {} option(s)",
            self.id,
            service,
            options.len()
        );
        Ok(handle)
    }
}

#[async_trait]
impl ProviderModule for TableProvider {
    fn id(&self) -> &ProviderId {
        &self.id
    }

    fn services(&self) -> Vec<&str> {
        self.specs.iter().map(|spec| spec.name).collect()
    }

    fn make_sync_handle(
        &self,
        service: &ServiceName,
        options: &Options,
    ) -> Result<Box<dyn Handle>, ServiceError> {
        Ok(Box::new(self.configure(service, options)?))
    }

    async fn make_async_handle(
        &self,
        service: &ServiceName,
        options: &Options,
    ) -> Result<Box<dyn AsyncHandle>, ServiceError> {
        Ok(Box::new(self.configure(service, options)?))
    }

    fn exports(&self) -> Option<Arc<SymbolTable>> {
        self.exports.clone()
    }
}

#[cfg(test)]
mod tests {
    use secrecy::ExposeSecret;

    use super::*;

    static SPECS: &[ServiceSpec] = &[
        ServiceSpec::new("memory", Capability::FULL),
        ServiceSpec::new("s3", Capability::OBJECT_STORE)
            .required(&["bucket"])
            .secrets(&["secret_access_key"]),
    ];

    fn provider() -> TableProvider {
        TableProvider::new(ProviderId::new("core").unwrap(), SPECS)
    }

    fn name(s: &str) -> ServiceName {
        ServiceName::new(s).unwrap()
    }

    #[test]
    fn missing_required_option_is_config_invalid() {
        let err = provider()
            .make_sync_handle(&name("s3"), &Options::new())
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::ConfigInvalid);
        assert!(err.message.contains("bucket"));
    }

    #[test]
    fn undeclared_service_is_unsupported() {
        let err = provider()
            .make_sync_handle(&name("redis"), &Options::new())
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unsupported);
    }

    #[tokio::test]
    async fn async_handle_keeps_secrets_apart() {
        let opts = Options::new()
            .with("bucket", "data")
            .with("secret_access_key", "shh");
        let handle = provider()
            .configure(&name("s3"), &opts)
            .unwrap();
        assert_eq!(handle.get_setting("bucket"), Some("data"));
        assert_eq!(handle.get_setting("secret_access_key"), None);
        assert_eq!(
            handle
                .get_secret("secret_access_key")
                .map(|s| s.expose_secret().as_str()),
            Some("shh")
        );

        let handle = provider().make_async_handle(&name("s3"), &opts).await.unwrap();
        assert_eq!(handle.service_name(), "s3");
        assert_eq!(handle.capability(), Capability::OBJECT_STORE);
    }
}
