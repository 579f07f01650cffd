//! Unconditional rejection action.

use auction_openrtb::BidRequest;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::action::{ActionArguments, ActionFunction};
use crate::error::RulesError;
use crate::request::context::RequestRuleContext;
use crate::result::{AnalyticsTag, RejectionReason, RuleResult};

use super::{parse_apply_config, tag_values, validate_config_as};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RejectRequestConfig {
    /// Seat-non-bid status code reported downstream.
    code: u16,
    #[serde(default)]
    analytics_value: Option<String>,
}

/// Rejects the request with the configured reason code. The value
/// snapshot is retained on the result.
pub struct RejectRequest;

impl ActionFunction<BidRequest, RequestRuleContext> for RejectRequest {
    fn apply(&self, args: ActionArguments<'_, BidRequest, RequestRuleContext>) -> RuleResult<BidRequest> {
        let config: RejectRequestConfig = match parse_apply_config("rejectRequest", args.config) {
            Ok(config) => config,
            Err(tag) => return RuleResult::with_tags(args.value, vec![tag]),
        };

        let mut tags = Vec::new();
        if args.infra.analytics_key.is_some() {
            let mut values =
                tag_values("rejectRequest", args.infra, config.analytics_value.as_deref());
            values.insert("code".into(), json!(config.code));
            tags.push(AnalyticsTag::success("rejectRequest", Value::Object(values), Vec::new()));
        }
        RuleResult::rejected(args.value, RejectionReason(config.code), tags)
    }

    fn validate_config(&self, config: &Value) -> Result<(), RulesError> {
        validate_config_as::<RejectRequestConfig>("rejectRequest", config).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::sync::Arc;

    use super::*;
    use crate::action::InfrastructureArguments;
    use crate::request::context::{AuctionContext, Granularity};

    fn apply(config: Value, analytics_key: Option<&str>) -> RuleResult<BidRequest> {
        let context = RequestRuleContext::new(
            Arc::new(AuctionContext::default()),
            Granularity::Request,
            "dc",
        );
        let empty = BTreeMap::new();
        let infra = InfrastructureArguments {
            context: &context,
            schema_results: &empty,
            schema_matches: &empty,
            fired_condition: "cond",
            analytics_key,
            model_version: "v1",
        };
        RejectRequest.apply(ActionArguments {
            value: BidRequest {
                id: "r".into(),
                ..Default::default()
            },
            config: &config,
            infra: &infra,
        })
    }

    #[test]
    fn rejects_with_configured_code() {
        let result = apply(json!({"code": 1}), None);
        assert!(result.is_reject());
        assert_eq!(result.rejection(), Some(RejectionReason(1)));
        assert_eq!(result.value().id, "r");
    }

    #[test]
    fn emits_tag_with_analytics_key() {
        let result = apply(json!({"code": 7, "analyticsValue": "why"}), Some("key"));
        let tag = &result.tags()[0];
        assert_eq!(tag.activity, "rejectRequest");
        assert_eq!(tag.values["code"], json!(7));
        assert_eq!(tag.values["analyticsValue"], "why");
    }

    #[test]
    fn validate_requires_code() {
        assert!(RejectRequest.validate_config(&json!({})).is_err());
        assert!(RejectRequest.validate_config(&Value::Null).is_err());
        assert!(RejectRequest.validate_config(&json!({"code": 1})).is_ok());
    }
}
