//! Rule matching and transformation engine for auction-rs.
//!
//! Takes a typed bid request plus a tree of configured conditions and
//! actions, extracts a vector of string matchers from the request, looks
//! the vector up in a decision tree with per-level wildcard fallback, and
//! folds the matched actions over the request. A per-impression variant
//! repeats the whole sequence once per impression with progressive edits
//! and fail-fast rejection.
//!
//! # Architecture
//!
//! - **Schema**: ordered, named matcher extractors ([`schema::Schema`])
//! - **Tree**: immutable wildcard trie ([`tree::RuleTree`])
//! - **Result**: sticky-failure result monoid ([`result::RuleResult`])
//! - **Rules**: whole-request orchestrators ([`rule::ConditionalRule`],
//!   [`rule::MatchingRule`]) and the per-impression wrapper
//!   ([`request::PerImpressionRule`])
//! - **Factory**: configuration-time wrapping decision
//!   ([`request::RequestRuleFactory`])
//!
//! All components are synchronous, pure transformations; built rules are
//! immutable and shared lock-free across concurrent requests.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use auction_openrtb::BidRequest;
//! use auction_rules::Rule;
//! use auction_rules::action::{Action, RuleConfig};
//! use auction_rules::request::schema::SchemaFunctionRegistry;
//! use auction_rules::request::action::ActionFunctionRegistry;
//! use auction_rules::request::{AuctionContext, Granularity, RequestRuleFactory};
//! use auction_rules::request::context::RequestRuleContext;
//! use auction_rules::schema::{Schema, SchemaBinding};
//! use auction_rules::tree::RuleTree;
//! use serde_json::{Value, json};
//!
//! let schemas = SchemaFunctionRegistry::standard();
//! let actions = ActionFunctionRegistry::standard();
//!
//! let schema = Schema::new(vec![SchemaBinding::new(
//!     "deviceCountry",
//!     schemas.get("deviceCountry").unwrap(),
//!     Value::Null,
//! )])
//! .unwrap();
//!
//! let mut tree = RuleTree::new(1);
//! tree.insert(
//!     &["*".to_string()],
//!     RuleConfig::new(
//!         "any-country",
//!         vec![Action::new(
//!             "setBidFloor",
//!             actions.get("setBidFloor").unwrap(),
//!             json!({"floor": 0.5}),
//!         )],
//!     ),
//! )
//! .unwrap();
//!
//! let rule = RequestRuleFactory::create(schema, tree, None, "v1".into()).unwrap();
//!
//! let context = RequestRuleContext::new(
//!     Arc::new(AuctionContext::default()),
//!     Granularity::Request,
//!     "us-east-1",
//! );
//! let result = rule.process(BidRequest::default(), &context);
//! assert!(!result.is_reject());
//! ```

pub mod action;
pub mod error;
pub mod hot;
pub mod request;
pub mod result;
pub mod rule;
pub mod schema;
pub mod set;
pub mod tree;

pub use error::RulesError;
pub use hot::HotRuleSet;
pub use result::{AnalyticsTag, RejectionReason, RuleResult, TagStatus};
pub use rule::{ConditionalRule, MatchingRule, Rule};
pub use set::RuleSet;
pub use tree::{RuleTree, WILDCARD};
pub use schema::UNDEFINED;
