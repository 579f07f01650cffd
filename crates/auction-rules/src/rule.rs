//! Whole-request rule evaluation: matcher extraction, tree lookup, and
//! the action fold.

use std::collections::BTreeMap;

use tracing::debug;

use crate::action::{InfrastructureArguments, RuleConfig};
use crate::error::RulesError;
use crate::result::{AnalyticsTag, RuleResult};
use crate::schema::Schema;
use crate::tree::RuleTree;

/// A configured rule: a pure transformation from a value (plus evaluation
/// context) to a [`RuleResult`].
///
/// Send + Sync, designed to be shared via `Arc<dyn Rule<T, C>>` across
/// unboundedly many concurrent requests.
pub trait Rule<T, C>: Send + Sync {
    fn process(&self, value: T, context: &C) -> RuleResult<T>;
}

/// Extraction + lookup machinery shared verbatim by the conditional and
/// matching-only variants.
struct MatchCore<T, C> {
    schema: Schema<T, C>,
    tree: RuleTree<RuleConfig<T, C>>,
    analytics_key: Option<String>,
    model_version: String,
}

/// A successful match: the leaf payload plus the diagnostics maps.
struct Matched<'a, T, C> {
    rule_config: &'a RuleConfig<T, C>,
    schema_results: BTreeMap<String, String>,
    schema_matches: BTreeMap<String, String>,
}

impl<T, C> MatchCore<T, C> {
    fn new(
        schema: Schema<T, C>,
        tree: RuleTree<RuleConfig<T, C>>,
        analytics_key: Option<String>,
        model_version: String,
    ) -> Result<Self, RulesError> {
        if tree.depth() != schema.len() {
            return Err(RulesError::ArityMismatch {
                condition: "<tree>".to_string(),
                expected: schema.len(),
                actual: tree.depth(),
            });
        }
        Ok(Self {
            schema,
            tree,
            analytics_key,
            model_version,
        })
    }

    /// Extract matchers and look them up. `None` means no rule matched,
    /// which is an expected outcome, not an error.
    fn matched(&self, value: &T, context: &C) -> Option<Matched<'_, T, C>> {
        let extraction = self.schema.extract(value, context);
        let lookup = self.tree.lookup(&extraction.matchers)?;

        let schema_matches = self
            .schema
            .binding_names()
            .map(str::to_string)
            .zip(lookup.matches)
            .collect();

        Some(Matched {
            rule_config: lookup.value,
            schema_results: extraction.results,
            schema_matches,
        })
    }

    fn infra<'a>(&'a self, matched: &'a Matched<'a, T, C>, context: &'a C)
        -> InfrastructureArguments<'a, C> {
        InfrastructureArguments {
            context,
            schema_results: &matched.schema_results,
            schema_matches: &matched.schema_matches,
            fired_condition: &matched.rule_config.condition,
            analytics_key: self.analytics_key.as_deref(),
            model_version: &self.model_version,
        }
    }
}

/// The action-applying rule: on a match, folds the matched actions over
/// the value in declared order.
pub struct ConditionalRule<T, C> {
    core: MatchCore<T, C>,
}

impl<T, C> ConditionalRule<T, C> {
    /// Build from a schema and a tree of the same arity.
    pub fn new(
        schema: Schema<T, C>,
        tree: RuleTree<RuleConfig<T, C>>,
        analytics_key: Option<String>,
        model_version: String,
    ) -> Result<Self, RulesError> {
        Ok(Self {
            core: MatchCore::new(schema, tree, analytics_key, model_version)?,
        })
    }
}

impl<T: Clone, C> Rule<T, C> for ConditionalRule<T, C> {
    fn process(&self, value: T, context: &C) -> RuleResult<T> {
        let Some(matched) = self.core.matched(&value, context) else {
            return RuleResult::unaltered(value);
        };
        debug!(
            condition = %matched.rule_config.condition,
            model_version = %self.core.model_version,
            "rule fired"
        );

        let infra = self.core.infra(&matched, context);

        // Iterative fold over the action list. Every action runs even
        // after an earlier one rejects; sticky merge then discards the
        // late results. Only the per-impression fold short-circuits.
        let mut acc = RuleResult::unaltered(value);
        for action in &matched.rule_config.actions {
            let result = action.apply(acc.value().clone(), &infra);
            acc = acc.merge_with(result);
        }
        acc
    }
}

/// The matching-only (dry-run) rule: shares extraction and lookup with
/// [`ConditionalRule`] exactly, and reports what would fire instead of
/// applying actions.
pub struct MatchingRule<T, C> {
    core: MatchCore<T, C>,
}

impl<T, C> MatchingRule<T, C> {
    pub fn new(
        schema: Schema<T, C>,
        tree: RuleTree<RuleConfig<T, C>>,
        analytics_key: Option<String>,
        model_version: String,
    ) -> Result<Self, RulesError> {
        Ok(Self {
            core: MatchCore::new(schema, tree, analytics_key, model_version)?,
        })
    }
}

impl<T, C> Rule<T, C> for MatchingRule<T, C> {
    fn process(&self, value: T, context: &C) -> RuleResult<T> {
        let Some(matched) = self.core.matched(&value, context) else {
            return RuleResult::unaltered(value);
        };

        let values = serde_json::json!({
            "firedCondition": matched.rule_config.condition,
            "schemaResults": matched.schema_results,
            "schemaMatches": matched.schema_matches,
            "analyticsKey": self.core.analytics_key,
            "modelVersion": self.core.model_version,
        });
        RuleResult::with_tags(value, vec![AnalyticsTag::success("ruleMatch", values, Vec::new())])
    }
}
