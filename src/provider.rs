#[path = "provider/id.rs"]
mod id;

#[path = "provider/options.rs"]
mod options;

#[path = "provider/handle.rs"]
mod handle;

#[path = "provider/symbols.rs"]
mod symbols;

#[path = "provider/traits.rs"]
mod traits;

#[path = "provider/table.rs"]
mod table;

#[path = "provider/manifest.rs"]
mod manifest;

pub use handle::{AsyncHandle, ConfiguredHandle, Handle};
pub use id::{ProviderId, ServiceName};
pub use manifest::ProviderManifest;
pub use options::Options;
pub use symbols::{Symbol, SymbolTable};
pub use table::{ServiceSpec, TableProvider};
pub use traits::{ProviderModule, PROVIDER_ABI_VERSION};
