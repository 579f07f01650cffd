//! Bid-floor action: sets a price floor on the scoped impressions.

use auction_openrtb::BidRequest;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::action::{ActionArguments, ActionFunction};
use crate::error::RulesError;
use crate::request::context::RequestRuleContext;
use crate::result::{AnalyticsTag, RuleResult};

use super::{parse_apply_config, tag_values, validate_config_as};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SetBidFloorConfig {
    floor: f64,
    #[serde(default)]
    currency: Option<String>,
    #[serde(default)]
    analytics_value: Option<String>,
}

/// Sets `imp.bidfloor` (and optionally `imp.bidfloorcur`) on the scoped
/// impressions.
pub struct SetBidFloor;

impl ActionFunction<BidRequest, RequestRuleContext> for SetBidFloor {
    fn apply(&self, args: ActionArguments<'_, BidRequest, RequestRuleContext>) -> RuleResult<BidRequest> {
        let config: SetBidFloorConfig = match parse_apply_config("setBidFloor", args.config) {
            Ok(config) => config,
            Err(tag) => return RuleResult::with_tags(args.value, vec![tag]),
        };

        let scoped = args.infra.context.scoped_imp_ids(&args.value);
        if scoped.is_empty() {
            return RuleResult::unaltered(args.value);
        }

        let mut request = args.value;
        for imp in request.imp.iter_mut() {
            if !scoped.contains(&imp.id) {
                continue;
            }
            imp.bidfloor = Some(config.floor);
            if let Some(currency) = &config.currency {
                imp.bidfloorcur = Some(currency.clone());
            }
        }

        let mut tags = Vec::new();
        if args.infra.analytics_key.is_some() {
            let mut values =
                tag_values("setBidFloor", args.infra, config.analytics_value.as_deref());
            values.insert("floor".into(), json!(config.floor));
            if let Some(currency) = &config.currency {
                values.insert("currency".into(), json!(currency));
            }
            tags.push(AnalyticsTag::success("setBidFloor", Value::Object(values), scoped));
        }
        RuleResult::updated(request, tags)
    }

    fn validate_config(&self, config: &Value) -> Result<(), RulesError> {
        let parsed: SetBidFloorConfig = validate_config_as("setBidFloor", config)?;
        if !parsed.floor.is_finite() || parsed.floor < 0.0 {
            return Err(RulesError::invalid_config(
                "setBidFloor",
                "'floor' must be a non-negative number",
            ));
        }
        Ok(())
    }
}
