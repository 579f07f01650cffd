//! Configuration type definitions for rule models, schemas, and actions.
//!
//! Field names follow the camelCase convention of the ad-server config
//! JSON these files are exported from.

use serde::{Deserialize, Serialize};

/// Top-level rule configuration: an ordered list of rule models, applied
/// to each request in sequence.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RulesConfig {
    #[serde(default)]
    pub models: Vec<ModelConfig>,
}

/// One configured rule model: an ordered schema, the matcher-keyed rule
/// entries, and the analytics identity of the model.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelConfig {
    /// Key under which this model's activity is reported to analytics.
    /// Absent means the model's actions emit no analytics tags.
    #[serde(default)]
    pub analytics_key: Option<String>,

    /// Version label of the rule data, carried into diagnostics.
    pub version: String,

    /// Ordered schema bindings; order defines the tree level per binding.
    pub schema: Vec<SchemaBindingConfig>,

    /// Rule entries keyed by ordered matcher sequences.
    pub rules: Vec<RuleEntryConfig>,
}

/// One schema binding: the function name and its opaque arguments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaBindingConfig {
    pub function: String,
    #[serde(default)]
    pub args: serde_json::Value,
}

/// One rule entry: the matcher sequence (one value per schema binding,
/// `*` for wildcard), an optional condition label, and the actions to
/// apply on a match.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleEntryConfig {
    pub matchers: Vec<String>,
    /// Why-it-fired label for diagnostics; defaults to the joined
    /// matcher sequence.
    #[serde(default)]
    pub condition: Option<String>,
    pub actions: Vec<ActionEntryConfig>,
}

impl RuleEntryConfig {
    /// The condition label, derived from the matchers when not set.
    pub fn condition_label(&self) -> String {
        self.condition
            .clone()
            .unwrap_or_else(|| self.matchers.join("|"))
    }
}

/// One configured action: the function name and its opaque arguments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionEntryConfig {
    pub function: String,
    #[serde(default)]
    pub args: serde_json::Value,
}
