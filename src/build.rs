//! Bridge between auction-config and auction-rules.
//!
//! Resolves configured function names against the registries, validates
//! per-action configs, and compiles each model into a processing rule.

use std::sync::Arc;

use auction_config::{ModelConfig, RulesConfig};
use auction_openrtb::BidRequest;
use auction_rules::RuleSet;
use auction_rules::action::{Action, RuleConfig};
use auction_rules::error::RulesError;
use auction_rules::request::context::RequestRuleContext;
use auction_rules::request::{
    ActionFunctionRegistry, RequestRule, RequestRuleFactory, SchemaFunctionRegistry,
};
use auction_rules::schema::{Schema, SchemaBinding};
use auction_rules::tree::RuleTree;
use tracing::info;

/// The set of built rules for bid requests.
pub type RequestRuleSet = RuleSet<BidRequest, RequestRuleContext>;

/// The function registries rules are resolved against.
pub struct Registries {
    pub schema: SchemaFunctionRegistry,
    pub action: ActionFunctionRegistry,
}

impl Registries {
    /// Registries with every built-in function.
    pub fn standard() -> Self {
        Self {
            schema: SchemaFunctionRegistry::standard(),
            action: ActionFunctionRegistry::standard(),
        }
    }
}

impl Default for Registries {
    fn default() -> Self {
        Self::standard()
    }
}

/// Compile a loaded configuration into a rule set.
///
/// With `dry_run` set, models are built as matching-only rules that
/// report what would fire without applying actions.
pub fn build_rules(
    config: &RulesConfig,
    registries: &Registries,
    dry_run: bool,
) -> Result<RequestRuleSet, RulesError> {
    let mut rules: Vec<Arc<RequestRule>> = Vec::with_capacity(config.models.len());
    for model in &config.models {
        rules.push(build_model(model, registries, dry_run)?);
    }
    Ok(RuleSet::new(rules))
}

fn build_model(
    model: &ModelConfig,
    registries: &Registries,
    dry_run: bool,
) -> Result<Arc<RequestRule>, RulesError> {
    let bindings = model
        .schema
        .iter()
        .map(|binding| {
            Ok(SchemaBinding::new(
                binding.function.as_str(),
                registries.schema.get(&binding.function)?,
                binding.args.clone(),
            ))
        })
        .collect::<Result<Vec<_>, RulesError>>()?;
    let schema = Schema::new(bindings)?;

    let mut tree = RuleTree::new(schema.len());
    for entry in &model.rules {
        let mut actions = Vec::with_capacity(entry.actions.len());
        for action in &entry.actions {
            let function = registries.action.get(&action.function)?;
            function.validate_config(&action.args)?;
            actions.push(Action::new(
                action.function.as_str(),
                function,
                action.args.clone(),
            ));
        }
        tree.insert(
            &entry.matchers,
            RuleConfig::new(entry.condition_label(), actions),
        )?;
    }

    info!(
        version = %model.version,
        schema = schema.len(),
        rules = tree.len(),
        dry_run,
        "compiled rule model"
    );

    if dry_run {
        RequestRuleFactory::create_matching(
            schema,
            tree,
            model.analytics_key.clone(),
            model.version.clone(),
        )
    } else {
        RequestRuleFactory::create(
            schema,
            tree,
            model.analytics_key.clone(),
            model.version.clone(),
        )
    }
}
