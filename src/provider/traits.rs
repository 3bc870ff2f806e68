use std::sync::Arc;

use async_trait::async_trait;

use super::handle::{AsyncHandle, Handle};
use super::id::{ProviderId, ServiceName};
use super::options::Options;
use super::symbols::SymbolTable;
use crate::shared::ServiceError;

/// Interface version every provider module must report to be loadable.
pub const PROVIDER_ABI_VERSION: u32 = 1;

/// An independently enabled unit that constructs handles for the services it owns.
///
/// Provider modules never reference each other; the router only talks to them
/// through this trait.
#[async_trait]
pub trait ProviderModule: Send + Sync {
    fn id(&self) -> &ProviderId;

    fn abi_version(&self) -> u32 {
        PROVIDER_ABI_VERSION
    }

    /// Service names this module can satisfy.
    fn services(&self) -> Vec<&str>;

    fn make_sync_handle(
        &self,
        service: &ServiceName,
        options: &Options,
    ) -> Result<Box<dyn Handle>, ServiceError>;

    async fn make_async_handle(
        &self,
        service: &ServiceName,
        options: &Options,
    ) -> Result<Box<dyn AsyncHandle>, ServiceError>;

    /// Shared symbols this module publishes, if it is a primary provider.
    fn exports(&self) -> Option<Arc<SymbolTable>> {
        None
    }
}
