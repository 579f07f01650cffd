//! End-to-end engine scenarios: registry-built rules applied to real
//! bid requests.

use std::sync::Arc;

use auction_openrtb::{Banner, BidRequest, Device, Geo, Imp};
use auction_rules::action::{Action, RuleConfig};
use auction_rules::request::action::ActionFunctionRegistry;
use auction_rules::request::context::RequestRuleContext;
use auction_rules::request::schema::SchemaFunctionRegistry;
use auction_rules::request::{AuctionContext, Granularity, RequestRuleFactory};
use auction_rules::result::{RejectionReason, RuleResult};
use auction_rules::rule::Rule;
use auction_rules::schema::{Schema, SchemaBinding};
use auction_rules::tree::RuleTree;
use serde_json::{Value, json};

fn schema_of(names: &[&str]) -> Schema<BidRequest, RequestRuleContext> {
    let registry = SchemaFunctionRegistry::standard();
    Schema::new(
        names
            .iter()
            .map(|name| SchemaBinding::new(*name, registry.get(name).unwrap(), Value::Null))
            .collect(),
    )
    .unwrap()
}

fn action_of(function: &str, config: Value) -> Action<BidRequest, RequestRuleContext> {
    let registry = ActionFunctionRegistry::standard();
    Action::new(function, registry.get(function).unwrap(), config)
}

fn context() -> RequestRuleContext {
    RequestRuleContext::new(
        Arc::new(AuctionContext::default()),
        Granularity::Request,
        "us-east-1",
    )
}

fn imp(id: &str) -> Imp {
    Imp {
        id: id.into(),
        banner: Some(Banner::default()),
        ..Default::default()
    }
}

/// Per-impression floor targeting: the matched impression gets the floor,
/// the other is untouched, nothing is rejected.
#[test]
fn per_impression_floor_applies_to_matched_imp_only() {
    let mut tree = RuleTree::new(1);
    tree.insert(
        &["123".to_string()],
        RuleConfig::new(
            "imp-123",
            vec![action_of("setBidFloor", json!({"floor": 1.5}))],
        ),
    )
    .unwrap();

    let rule =
        RequestRuleFactory::create(schema_of(&["impId"]), tree, None, "v1".into()).unwrap();

    let request = BidRequest {
        id: "r".into(),
        imp: vec![imp("123"), imp("456")],
        ..Default::default()
    };
    let result = rule.process(request, &context());

    assert!(!result.is_reject());
    assert!(result.altered());
    let value = result.value();
    assert_eq!(value.imp[0].bidfloor, Some(1.5));
    assert_eq!(value.imp[1].bidfloor, None);
}

/// Wildcard rejection: any country value hits the wildcard entry and the
/// request is rejected with the configured code.
#[test]
fn wildcard_rule_rejects_any_country() {
    let mut tree = RuleTree::new(1);
    tree.insert(
        &["*".to_string()],
        RuleConfig::new(
            "all-countries",
            vec![action_of("rejectRequest", json!({"code": 1}))],
        ),
    )
    .unwrap();

    let rule = RequestRuleFactory::create(schema_of(&["deviceCountry"]), tree, None, "v1".into())
        .unwrap();

    let request = BidRequest {
        id: "r".into(),
        device: Some(Device {
            geo: Some(Geo {
                country: Some("NLD".into()),
            }),
            ..Default::default()
        }),
        ..Default::default()
    };
    let result = rule.process(request, &context());

    assert!(result.is_reject());
    assert_eq!(result.rejection(), Some(RejectionReason(1)));
}

/// No matching entry: the result is exactly the unaltered original.
#[test]
fn unmatched_request_passes_through_unaltered() {
    let mut tree = RuleTree::new(1);
    tree.insert(
        &["USA".to_string()],
        RuleConfig::new(
            "usa-only",
            vec![action_of("rejectRequest", json!({"code": 1}))],
        ),
    )
    .unwrap();

    let rule = RequestRuleFactory::create(schema_of(&["deviceCountry"]), tree, None, "v1".into())
        .unwrap();

    // No device at all: the matcher extracts the undefined sentinel,
    // which has no entry and no wildcard to fall back to.
    let request = BidRequest {
        id: "r".into(),
        imp: vec![imp("1")],
        ..Default::default()
    };
    let result = rule.process(request.clone(), &context());

    assert_eq!(result, RuleResult::unaltered(request));
}

/// Multi-level schema with bidder filtering through the per-impression
/// wrapper: a banner impression in scope loses a bidder, a video one
/// does not.
#[test]
fn media_type_scoped_bidder_exclusion() {
    use auction_openrtb::{ImpExt, ImpExtPrebid, Video};

    let mut tree = RuleTree::new(2);
    tree.insert(
        &["*".to_string(), "banner".to_string()],
        RuleConfig::new(
            "banner-any-country",
            vec![action_of(
                "excludeBidders",
                json!({"bidders": ["bidderA"], "analyticsValue": "no-banner-a"}),
            )],
        ),
    )
    .unwrap();

    let rule = RequestRuleFactory::create(
        schema_of(&["deviceCountry", "mediaType"]),
        tree,
        Some("model-a".into()),
        "v3".into(),
    )
    .unwrap();

    let bidders = |names: &[&str]| ImpExt {
        prebid: Some(ImpExtPrebid {
            bidder: names
                .iter()
                .map(|n| (n.to_string(), json!({})))
                .collect(),
        }),
        ..Default::default()
    };
    let request = BidRequest {
        id: "r".into(),
        imp: vec![
            Imp {
                id: "imp-banner".into(),
                banner: Some(Banner::default()),
                ext: Some(bidders(&["bidderA", "bidderB"])),
                ..Default::default()
            },
            Imp {
                id: "imp-video".into(),
                video: Some(Video::default()),
                ext: Some(bidders(&["bidderA"])),
                ..Default::default()
            },
        ],
        ..Default::default()
    };

    let result = rule.process(request, &context());

    assert!(!result.is_reject());
    let value = result.value();
    assert_eq!(value.imp[0].bidder_names(), vec!["bidderB"]);
    assert_eq!(value.imp[1].bidder_names(), vec!["bidderA"]);

    // Analytics key was configured, so the exclusion tagged itself.
    assert_eq!(result.tags().len(), 1);
    assert_eq!(result.tags()[0].applied_to, vec!["imp-banner"]);
    assert_eq!(result.tags()[0].values["analyticsValue"], "no-banner-a");
}

/// A rejection on an earlier impression keeps later impressions from
/// being evaluated at all, and the reason survives the merge.
#[test]
fn per_impression_rejection_is_sticky_across_imps() {
    let mut tree = RuleTree::new(1);
    tree.insert(
        &["bad".to_string()],
        RuleConfig::new(
            "reject-bad-imp",
            vec![action_of("rejectRequest", json!({"code": 42}))],
        ),
    )
    .unwrap();
    let rule =
        RequestRuleFactory::create(schema_of(&["impId"]), tree, None, "v1".into()).unwrap();

    let request = BidRequest {
        id: "r".into(),
        imp: vec![imp("good"), imp("bad"), imp("also-good")],
        ..Default::default()
    };
    let result = rule.process(request, &context());

    assert!(result.is_reject());
    assert_eq!(result.rejection(), Some(RejectionReason(42)));
}
