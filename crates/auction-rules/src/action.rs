//! Actions: the transformation capabilities applied when a rule fires.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::error::RulesError;
use crate::result::RuleResult;

/// Read-only per-match diagnostics handed to every action of a fired rule.
///
/// Built once per successful tree match from the extraction results and
/// the resolved tree keys; never feeds back into matching.
pub struct InfrastructureArguments<'a, C> {
    pub context: &'a C,
    /// Raw extraction result per schema binding name.
    pub schema_results: &'a BTreeMap<String, String>,
    /// Resolved tree key per schema binding name (wildcard where taken).
    pub schema_matches: &'a BTreeMap<String, String>,
    /// Condition label of the rule that fired.
    pub fired_condition: &'a str,
    pub analytics_key: Option<&'a str>,
    pub model_version: &'a str,
}

/// Arguments for one action application.
pub struct ActionArguments<'a, T, C> {
    /// The current value snapshot; the action owns it and may transform it.
    pub value: T,
    /// Opaque per-action configuration.
    pub config: &'a serde_json::Value,
    pub infra: &'a InfrastructureArguments<'a, C>,
}

/// A named, pluggable transformation capability.
///
/// May transform the value, emit diagnostics tags, and signal rejection
/// with a reason code. Rejection is an expected data value, never an
/// error path.
pub trait ActionFunction<T, C>: Send + Sync {
    fn apply(&self, args: ActionArguments<'_, T, C>) -> RuleResult<T>;

    /// Validate the opaque per-action configuration at rule-build time.
    fn validate_config(&self, config: &serde_json::Value) -> Result<(), RulesError> {
        let _ = config;
        Ok(())
    }
}

/// One configured action: the capability plus its opaque configuration.
pub struct Action<T, C> {
    name: String,
    function: Arc<dyn ActionFunction<T, C>>,
    config: serde_json::Value,
}

impl<T, C> Action<T, C> {
    pub fn new(
        name: impl Into<String>,
        function: Arc<dyn ActionFunction<T, C>>,
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

    /// Apply this action to the current value.
    pub fn apply(&self, value: T, infra: &InfrastructureArguments<'_, C>) -> RuleResult<T> {
        self.function.apply(ActionArguments {
            value,
            config: &self.config,
            infra,
        })
    }
}

impl<T, C> std::fmt::Debug for Action<T, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Action").field("name", &self.name).finish()
    }
}

/// The leaf payload of the decision tree: a condition label (why the rule
/// fired, for diagnostics) plus the ordered actions to apply.
pub struct RuleConfig<T, C> {
    pub condition: String,
    pub actions: Vec<Action<T, C>>,
}

impl<T, C> RuleConfig<T, C> {
    pub fn new(condition: impl Into<String>, actions: Vec<Action<T, C>>) -> Self {
        Self {
            condition: condition.into(),
            actions,
        }
    }
}

impl<T, C> std::fmt::Debug for RuleConfig<T, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleConfig")
            .field("condition", &self.condition)
            .field("actions", &self.actions)
            .finish()
    }
}
