//! Capability router: one entry point for opening named services whose
//! implementations live in independently enabled provider modules.
//!
//! ```no_run
//! use capability_router::{Options, Router};
//!
//! # fn main() -> Result<(), capability_router::RouterError> {
//! let router = Router::new()?;
//! let handle = router.create("fs", &Options::new().with("root", "/tmp"))?;
//! assert_eq!(handle.service_name(), "fs");
//! # Ok(())
//! # }
//! ```
//!
//! Requests flow through the [`Registry`] (service name to provider id), the
//! [`Loader`] (provider id to a live module, loaded at most once), and finally
//! the provider's own constructor.

pub mod compat;
pub mod config;
pub mod error;
pub mod loader;
pub mod provider;
pub mod providers;
pub mod registry;
pub mod router;
pub mod shared;

pub use config::RouterConfig;
pub use error::{LoadError, ProviderUnavailable, RouterError, Suggestion};
pub use loader::{BuiltinSource, LoadStatus, Loader, ModuleSource, StaticSource};
pub use provider::{
    AsyncHandle, Handle, Options, ProviderId, ProviderModule, ServiceName,
};
pub use registry::{Registry, RegistryBuilder};
pub use router::{Router, RouterBuilder};
pub use shared::{Capability, Entry, EntryMode, ErrorKind, Metadata, ServiceError};
