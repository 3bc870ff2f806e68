use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// A published value, shared by reference between its owner and every re-export.
pub type Symbol = Arc<dyn Any + Send + Sync>;

/// Named symbols a provider publishes for others to re-expose.
#[derive(Clone, Default)]
pub struct SymbolTable {
    symbols: BTreeMap<String, Symbol>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with<T: Any + Send + Sync>(mut self, name: impl Into<String>, value: T) -> Self {
        self.symbols.insert(name.into(), Arc::new(value));
        self
    }

    pub fn get_raw(&self, name: &str) -> Option<&Symbol> {
        self.symbols.get(name)
    }

    /// Returns the symbol if it exists and has type `T`.
    pub fn get<T: Any + Send + Sync>(&self, name: &str) -> Option<Arc<T>> {
        self.symbols
            .get(name)
            .cloned()
            .and_then(|symbol| symbol.downcast::<T>().ok())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.symbols.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

impl fmt::Debug for SymbolTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.symbols.keys()).finish()
    }
}
