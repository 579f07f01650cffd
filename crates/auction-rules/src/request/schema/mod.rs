//! Request schema functions: named matcher extractors resolved from the
//! registry at configuration-load time.

pub mod imp;
pub mod request;

use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::error::RulesError;

use super::RequestSchemaFunction;

pub use imp::{AdUnitCode, ImpId, MediaType};
pub use request::{Bundle, Channel, DataCenter, DeviceCountry, Domain};

/// Registry of named schema-function capabilities.
pub struct SchemaFunctionRegistry {
    functions: FxHashMap<String, Arc<RequestSchemaFunction>>,
}

impl SchemaFunctionRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self {
            functions: FxHashMap::default(),
        }
    }

    /// The registry with every built-in function registered.
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry.register("deviceCountry", Arc::new(DeviceCountry));
        registry.register("domain", Arc::new(Domain));
        registry.register("bundle", Arc::new(Bundle));
        registry.register("channel", Arc::new(Channel));
        registry.register("dataCenter", Arc::new(DataCenter));
        registry.register("impId", Arc::new(ImpId));
        registry.register("adUnitCode", Arc::new(AdUnitCode));
        registry.register("mediaType", Arc::new(MediaType));
        registry
    }

    /// Register a function under a name, replacing any previous entry.
    pub fn register(&mut self, name: impl Into<String>, function: Arc<RequestSchemaFunction>) {
        self.functions.insert(name.into(), function);
    }

    /// Resolve a function by name.
    pub fn get(&self, name: &str) -> Result<Arc<RequestSchemaFunction>, RulesError> {
        self.functions
            .get(name)
            .cloned()
            .ok_or_else(|| RulesError::UnknownSchemaFunction(name.to_string()))
    }
}

impl Default for SchemaFunctionRegistry {
    fn default() -> Self {
        Self::standard()
    }
}
