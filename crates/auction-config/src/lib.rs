//! Rule configuration loading and validation for auction-rs.
//!
//! Consumes rule-model files in JSON (with comments), YAML, or TOML and
//! performs the structural checks that do not need the function
//! registries. Building the executable rules from a loaded config is the
//! host's job (see the `auction-rs` crate's `build` module).

pub mod loader;
pub mod types;
pub mod validate;

pub use loader::{ConfigError, load_config};
pub use types::{
    ActionEntryConfig, ModelConfig, RuleEntryConfig, RulesConfig, SchemaBindingConfig,
};
pub use validate::validate_config;
