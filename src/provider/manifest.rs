use super::table::ServiceSpec;

/// Static registration metadata for a provider, bundled whether or not the
/// provider itself is compiled in.
#[derive(Debug, Clone, Copy)]
pub struct ProviderManifest {
    pub id: &'static str,
    pub install_hint: &'static str,
    pub services: &'static [ServiceSpec],
}

impl ProviderManifest {
    pub fn service_names(&self) -> impl Iterator<Item = &'static str> {
        self.services.iter().map(|spec| spec.name)
    }
}
