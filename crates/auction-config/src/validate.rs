//! Configuration validation logic.
//!
//! Structural checks only: function-name resolution against the
//! registries happens when the rules are built.

use crate::RulesConfig;
use crate::loader::ConfigError;

pub fn validate_config(config: &RulesConfig) -> Result<(), ConfigError> {
    for (index, model) in config.models.iter().enumerate() {
        if model.version.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "models[{index}].version is empty"
            )));
        }
        if model.schema.is_empty() {
            return Err(ConfigError::Validation(format!(
                "models[{index}].schema is empty"
            )));
        }

        let mut seen = std::collections::HashSet::new();
        for binding in &model.schema {
            if binding.function.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "models[{index}]: schema binding with empty function name"
                )));
            }
            if !seen.insert(binding.function.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "models[{index}]: duplicate schema binding '{}'",
                    binding.function
                )));
            }
        }

        for rule in &model.rules {
            if rule.matchers.len() != model.schema.len() {
                return Err(ConfigError::Validation(format!(
                    "models[{index}]: rule '{}' has {} matchers, schema has {}",
                    rule.condition_label(),
                    rule.matchers.len(),
                    model.schema.len()
                )));
            }
            if rule.actions.is_empty() {
                return Err(ConfigError::Validation(format!(
                    "models[{index}]: rule '{}' has no actions",
                    rule.condition_label()
                )));
            }
            for action in &rule.actions {
                if action.function.trim().is_empty() {
                    return Err(ConfigError::Validation(format!(
                        "models[{index}]: rule '{}' has an action with empty function name",
                        rule.condition_label()
                    )));
                }
            }
        }
    }
    Ok(())
}
