//! Request action functions: named transformation capabilities resolved
//! from the registry at configuration-load time.

pub mod filter;
pub mod floor;
pub mod reject;
pub mod tag;

use std::sync::Arc;

use rustc_hash::FxHashMap;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use crate::action::InfrastructureArguments;
use crate::error::RulesError;
use crate::request::context::RequestRuleContext;
use crate::result::AnalyticsTag;

use super::RequestActionFunction;

pub use filter::{ExcludeBidders, IncludeBidders};
pub use floor::SetBidFloor;
pub use reject::RejectRequest;
pub use tag::LogAnalyticsTag;

/// Registry of named action-function capabilities.
pub struct ActionFunctionRegistry {
    functions: FxHashMap<String, Arc<RequestActionFunction>>,
}

impl ActionFunctionRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self {
            functions: FxHashMap::default(),
        }
    }

    /// The registry with every built-in function registered.
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry.register("excludeBidders", Arc::new(ExcludeBidders));
        registry.register("includeBidders", Arc::new(IncludeBidders));
        registry.register("setBidFloor", Arc::new(SetBidFloor));
        registry.register("rejectRequest", Arc::new(RejectRequest));
        registry.register("logAnalyticsTag", Arc::new(LogAnalyticsTag));
        registry
    }

    /// Register a function under a name, replacing any previous entry.
    pub fn register(&mut self, name: impl Into<String>, function: Arc<RequestActionFunction>) {
        self.functions.insert(name.into(), function);
    }

    /// Resolve a function by name.
    pub fn get(&self, name: &str) -> Result<Arc<RequestActionFunction>, RulesError> {
        self.functions
            .get(name)
            .cloned()
            .ok_or_else(|| RulesError::UnknownActionFunction(name.to_string()))
    }
}

impl Default for ActionFunctionRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

/// Parse an action config at build time, mapping failures to
/// [`RulesError::InvalidFunctionConfig`].
fn validate_config_as<T: DeserializeOwned>(function: &str, config: &Value) -> Result<T, RulesError> {
    if config.is_null() {
        return Err(RulesError::invalid_config(function, "configuration is required"));
    }
    serde_json::from_value(config.clone())
        .map_err(|e| RulesError::invalid_config(function, e.to_string()))
}

/// Parse an action config at apply time. Build-time validation makes a
/// failure here unreachable for registry-built rules; hand-built rules
/// get an error diagnostics entry instead of a transformation.
fn parse_apply_config<T: DeserializeOwned>(function: &str, config: &Value) -> Result<T, AnalyticsTag> {
    serde_json::from_value(config.clone())
        .map_err(|e| AnalyticsTag::error(function, json!({ "error": e.to_string() })))
}

/// The base diagnostics payload shared by every action tag.
fn tag_values(
    function: &str,
    infra: &InfrastructureArguments<'_, RequestRuleContext>,
    analytics_value: Option<&str>,
) -> serde_json::Map<String, Value> {
    let mut values = serde_json::Map::new();
    if let Some(key) = infra.analytics_key {
        values.insert("analyticsKey".into(), json!(key));
    }
    if let Some(analytics_value) = analytics_value {
        values.insert("analyticsValue".into(), json!(analytics_value));
    }
    values.insert("modelVersion".into(), json!(infra.model_version));
    values.insert("firedCondition".into(), json!(infra.fired_condition));
    values.insert("actionFunction".into(), json!(function));
    values
}
