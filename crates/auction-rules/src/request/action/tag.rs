//! Diagnostics-only action: records that the rule fired without touching
//! the request.

use auction_openrtb::BidRequest;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::action::{ActionArguments, ActionFunction};
use crate::error::RulesError;
use crate::request::context::RequestRuleContext;
use crate::result::{AnalyticsTag, RuleResult};

use super::tag_values;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LogAnalyticsTagConfig {
    #[serde(default)]
    analytics_value: Option<String>,
}

/// Emits an analytics tag carrying the full match diagnostics: the fired
/// condition, the per-binding extraction results and resolved tree keys,
/// and the rule's analytics key and model version.
pub struct LogAnalyticsTag;

impl ActionFunction<BidRequest, RequestRuleContext> for LogAnalyticsTag {
    fn apply(&self, args: ActionArguments<'_, BidRequest, RequestRuleContext>) -> RuleResult<BidRequest> {
        // Config is optional for this action.
        let config: LogAnalyticsTagConfig = if args.config.is_null() {
            LogAnalyticsTagConfig::default()
        } else {
            serde_json::from_value(args.config.clone()).unwrap_or_default()
        };

        let mut values =
            tag_values("logAnalyticsTag", args.infra, config.analytics_value.as_deref());
        values.insert("schemaResults".into(), json!(args.infra.schema_results));
        values.insert("schemaMatches".into(), json!(args.infra.schema_matches));

        let applied_to = match args.infra.context.granularity.imp_id() {
            Some(imp_id) => vec![imp_id.to_string()],
            None => Vec::new(),
        };
        let tag = AnalyticsTag::success("logAnalyticsTag", Value::Object(values), applied_to);
        RuleResult::with_tags(args.value, vec![tag])
    }

    fn validate_config(&self, config: &Value) -> Result<(), RulesError> {
        if config.is_null() {
            return Ok(());
        }
        serde_json::from_value::<LogAnalyticsTagConfig>(config.clone())
            .map(|_| ())
            .map_err(|e| RulesError::invalid_config("logAnalyticsTag", e.to_string()))
    }
}
