//! Rule factory: decides, once per configured policy, whether a rule
//! needs per-impression wrapping.

use std::sync::Arc;

use auction_openrtb::BidRequest;

use crate::action::RuleConfig;
use crate::error::RulesError;
use crate::rule::{ConditionalRule, MatchingRule};
use crate::schema::Schema;
use crate::tree::RuleTree;

use super::RequestRule;
use super::context::RequestRuleContext;
use super::per_imp::PerImpressionRule;

/// Schema-function names that are only meaningful at impression scope.
/// A schema using any of them gets the per-impression wrapper.
pub const PER_IMP_SCHEMA_FUNCTIONS: &[&str] = &["impId", "adUnitCode", "mediaType"];

type RequestSchema = Schema<BidRequest, RequestRuleContext>;
type RequestTree = RuleTree<RuleConfig<BidRequest, RequestRuleContext>>;

/// Builds processing rules from a schema and a rule tree.
///
/// The wrapping decision depends only on the schema's binding names; it
/// is made here, at configuration-load time, and never varies per
/// request.
pub struct RequestRuleFactory;

impl RequestRuleFactory {
    /// Build the action-applying rule for a configured policy.
    pub fn create(
        schema: RequestSchema,
        tree: RequestTree,
        analytics_key: Option<String>,
        model_version: String,
    ) -> Result<Arc<RequestRule>, RulesError> {
        let per_imp = Self::needs_per_imp(&schema);
        let rule: Arc<RequestRule> =
            Arc::new(ConditionalRule::new(schema, tree, analytics_key, model_version)?);
        Ok(if per_imp {
            Arc::new(PerImpressionRule::fail_fast(rule))
        } else {
            rule
        })
    }

    /// Build the matching-only (dry-run) rule for a configured policy.
    pub fn create_matching(
        schema: RequestSchema,
        tree: RequestTree,
        analytics_key: Option<String>,
        model_version: String,
    ) -> Result<Arc<RequestRule>, RulesError> {
        let per_imp = Self::needs_per_imp(&schema);
        let rule: Arc<RequestRule> =
            Arc::new(MatchingRule::new(schema, tree, analytics_key, model_version)?);
        Ok(if per_imp {
            Arc::new(PerImpressionRule::exhaustive(rule))
        } else {
            rule
        })
    }

    fn needs_per_imp(schema: &RequestSchema) -> bool {
        schema
            .binding_names()
            .any(|name| PER_IMP_SCHEMA_FUNCTIONS.contains(&name))
    }
}
