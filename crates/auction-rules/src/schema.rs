//! Schema: the ordered registry of matcher-extraction bindings.
//!
//! Binding order defines positional correspondence with tree levels and
//! must match the order used when the tree was built.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::error::RulesError;

/// Sentinel matcher substituted when a schema function extracts nothing.
///
/// By convention only: a function that legitimately extracts the string
/// `"undefined"` is indistinguishable from an absent extraction and will
/// match tree entries keyed on it. Preserved as-is from the original
/// engine behavior.
pub const UNDEFINED: &str = "undefined";

/// Arguments handed to a schema function for one extraction.
pub struct SchemaFunctionArguments<'a, T, C> {
    pub value: &'a T,
    pub config: &'a serde_json::Value,
    pub context: &'a C,
}

/// A named, pluggable matcher extractor.
///
/// Implementations must be fast, synchronous, side-effect-free reads;
/// there is no suspension point here by contract.
pub trait SchemaFunction<T, C>: Send + Sync {
    /// Extract a matcher from the value, or `None` when the value carries
    /// nothing for this binding.
    fn extract(&self, args: &SchemaFunctionArguments<'_, T, C>) -> Option<String>;
}

/// One schema binding: a unique name, the extractor capability, and its
/// opaque per-binding configuration.
pub struct SchemaBinding<T, C> {
    name: String,
    function: Arc<dyn SchemaFunction<T, C>>,
    config: serde_json::Value,
}

impl<T, C> SchemaBinding<T, C> {
    pub fn new(
        name: impl Into<String>,
        function: Arc<dyn SchemaFunction<T, C>>,
        config: serde_json::Value,
    ) -> Self {
        Self {
            name: name.into(),
            function,
            config,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// The extraction output: the positional matcher vector plus the per-name
/// results map carried into action diagnostics.
#[derive(Debug)]
pub struct Extraction {
    pub matchers: Vec<String>,
    pub results: BTreeMap<String, String>,
}

/// An ordered, named set of schema bindings. Immutable after construction.
pub struct Schema<T, C> {
    bindings: Vec<SchemaBinding<T, C>>,
}

impl<T, C> Schema<T, C> {
    /// Build a schema from ordered bindings.
    ///
    /// Fails on an empty binding list or a duplicate binding name.
    pub fn new(bindings: Vec<SchemaBinding<T, C>>) -> Result<Self, RulesError> {
        if bindings.is_empty() {
            return Err(RulesError::EmptySchema);
        }
        let mut seen = std::collections::HashSet::new();
        for binding in &bindings {
            if !seen.insert(binding.name.as_str()) {
                return Err(RulesError::DuplicateBinding(binding.name.clone()));
            }
        }
        Ok(Self { bindings })
    }

    /// Number of bindings, equal to the tree depth this schema pairs with.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Binding names in schema order.
    pub fn binding_names(&self) -> impl Iterator<Item = &str> {
        self.bindings.iter().map(|b| b.name.as_str())
    }

    /// Extract the matcher vector for a value.
    ///
    /// Each binding is invoked in schema order; absent or empty
    /// extractions are substituted with [`UNDEFINED`].
    pub fn extract(&self, value: &T, context: &C) -> Extraction {
        let mut matchers = Vec::with_capacity(self.bindings.len());
        let mut results = BTreeMap::new();

        for binding in &self.bindings {
            let args = SchemaFunctionArguments {
                value,
                config: &binding.config,
                context,
            };
            let matcher = match binding.function.extract(&args) {
                Some(extracted) if !extracted.is_empty() => extracted,
                _ => UNDEFINED.to_string(),
            };
            results.insert(binding.name.clone(), matcher.clone());
            matchers.push(matcher);
        }

        Extraction { matchers, results }
    }
}

impl<T, C> std::fmt::Debug for Schema<T, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Schema")
            .field("bindings", &self.binding_names().collect::<Vec<_>>())
            .finish()
    }
}
