//! Error types for the rule engine.
//!
//! All of these are configuration-time errors: a request-time lookup that
//! finds no rule is a normal outcome and is never surfaced as an error.

use thiserror::Error;

/// Errors that can occur while building rules from configuration.
#[derive(Error, Debug)]
pub enum RulesError {
    #[error("unknown schema function: {0}")]
    UnknownSchemaFunction(String),

    #[error("unknown action function: {0}")]
    UnknownActionFunction(String),

    #[error("schema has no bindings")]
    EmptySchema,

    #[error("duplicate schema binding: {0}")]
    DuplicateBinding(String),

    #[error("rule '{condition}' has {actual} matchers, schema has {expected}")]
    ArityMismatch {
        condition: String,
        expected: usize,
        actual: usize,
    },

    #[error("duplicate rule for matchers: {0}")]
    DuplicateRule(String),

    #[error("invalid config for '{function}': {message}")]
    InvalidFunctionConfig { function: String, message: String },
}

impl RulesError {
    /// Shorthand for a function-config validation failure.
    pub fn invalid_config(function: &str, message: impl Into<String>) -> Self {
        RulesError::InvalidFunctionConfig {
            function: function.to_string(),
            message: message.into(),
        }
    }
}
