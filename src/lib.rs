//! # auction-rs
//!
//! Rule-based bid-request processing for ad auctions.
//!
//! Incoming bid requests are evaluated against externally supplied,
//! updatable business rules that transform, tag, or reject parts of a
//! request before it reaches downstream bidding logic.
//!
//! ## Crates
//!
//! - [`auction_rules`] - The rule matching and transformation engine
//! - [`auction_openrtb`] - Slim typed OpenRTB request model
//! - [`auction_config`] - Rule configuration loading and validation

pub use auction_config as config;
pub use auction_openrtb as openrtb;
pub use auction_rules as rules;

pub mod build;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use auction_config::{RulesConfig, load_config, validate_config};
    pub use auction_rules::request::context::RequestRuleContext;
    pub use auction_rules::request::{AuctionContext, Granularity};
    pub use auction_rules::{HotRuleSet, RuleResult, RuleSet};

    pub use crate::build::{Registries, RequestRuleSet, build_rules};
}
