//! Bidder filtering actions: exclude or retain configured bidders on the
//! scoped impressions.

use std::collections::BTreeSet;

use auction_openrtb::BidRequest;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::action::{ActionArguments, ActionFunction};
use crate::error::RulesError;
use crate::request::context::RequestRuleContext;
use crate::result::{AnalyticsTag, RejectionReason, RuleResult};

use super::{parse_apply_config, tag_values, validate_config_as};

/// OpenRTB seat-non-bid status "Request Blocked - General", used when the
/// config does not name a code.
const REQUEST_BLOCKED_GENERAL: u16 = 200;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FilterBiddersConfig {
    bidders: Vec<String>,
    #[serde(default)]
    seat_non_bid: Option<u16>,
    #[serde(default)]
    analytics_value: Option<String>,
}

#[derive(Clone, Copy)]
enum FilterMode {
    Exclude,
    Include,
}

fn validate(function: &str, config: &Value) -> Result<(), RulesError> {
    let parsed: FilterBiddersConfig = validate_config_as(function, config)?;
    if parsed.bidders.is_empty() {
        return Err(RulesError::invalid_config(function, "'bidders' must not be empty"));
    }
    Ok(())
}

fn filter_bidders(
    mode: FilterMode,
    function: &str,
    args: ActionArguments<'_, BidRequest, RequestRuleContext>,
) -> RuleResult<BidRequest> {
    let config: FilterBiddersConfig = match parse_apply_config(function, args.config) {
        Ok(config) => config,
        Err(tag) => return RuleResult::with_tags(args.value, vec![tag]),
    };

    let scoped = args.infra.context.scoped_imp_ids(&args.value);
    let mut request = args.value;

    let keep = |bidder: &str| {
        let listed = config.bidders.iter().any(|name| name == bidder);
        match mode {
            FilterMode::Exclude => !listed,
            FilterMode::Include => listed,
        }
    };

    let mut removed: BTreeSet<String> = BTreeSet::new();
    let mut affected: Vec<String> = Vec::new();
    let mut emptied: Vec<String> = Vec::new();

    for imp in request.imp.iter_mut() {
        if !scoped.contains(&imp.id) {
            continue;
        }
        let Some(prebid) = imp.ext.as_mut().and_then(|ext| ext.prebid.as_mut()) else {
            continue;
        };
        let removed_here: Vec<String> = prebid
            .bidder
            .keys()
            .filter(|bidder| !keep(bidder.as_str()))
            .cloned()
            .collect();
        if removed_here.is_empty() {
            continue;
        }
        for bidder in &removed_here {
            prebid.bidder.remove(bidder);
        }
        if prebid.bidder.is_empty() {
            emptied.push(imp.id.clone());
        }
        removed.extend(removed_here);
        affected.push(imp.id.clone());
    }

    if removed.is_empty() {
        return RuleResult::unaltered(request);
    }

    // Impressions left without any bidder are discarded entirely.
    request.imp.retain(|imp| !emptied.contains(&imp.id));

    let mut tags = Vec::new();
    if args.infra.analytics_key.is_some() {
        let mut values = tag_values(function, args.infra, config.analytics_value.as_deref());
        values.insert("biddersRemoved".into(), json!(removed));
        if let Some(code) = config.seat_non_bid {
            values.insert("seatNonBid".into(), json!(code));
        }
        tags.push(AnalyticsTag::success(function, Value::Object(values), affected));
    }

    if request.imp.is_empty() {
        let reason = RejectionReason(config.seat_non_bid.unwrap_or(REQUEST_BLOCKED_GENERAL));
        return RuleResult::rejected(request, reason, tags);
    }
    RuleResult::updated(request, tags)
}

/// Removes the configured bidders from the scoped impressions.
pub struct ExcludeBidders;

impl ActionFunction<BidRequest, RequestRuleContext> for ExcludeBidders {
    fn apply(&self, args: ActionArguments<'_, BidRequest, RequestRuleContext>) -> RuleResult<BidRequest> {
        filter_bidders(FilterMode::Exclude, "excludeBidders", args)
    }

    fn validate_config(&self, config: &Value) -> Result<(), RulesError> {
        validate("excludeBidders", config)
    }
}

/// Retains only the configured bidders on the scoped impressions.
pub struct IncludeBidders;

impl ActionFunction<BidRequest, RequestRuleContext> for IncludeBidders {
    fn apply(&self, args: ActionArguments<'_, BidRequest, RequestRuleContext>) -> RuleResult<BidRequest> {
        filter_bidders(FilterMode::Include, "includeBidders", args)
    }

    fn validate_config(&self, config: &Value) -> Result<(), RulesError> {
        validate("includeBidders", config)
    }
}
