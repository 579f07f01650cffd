//! Request-granularity layer: contexts, per-impression wrapping, the rule
//! factory, and the built-in schema/action function registries for
//! OpenRTB bid requests.

pub mod action;
pub mod context;
pub mod factory;
pub mod per_imp;
pub mod schema;

use auction_openrtb::BidRequest;

use crate::action::ActionFunction;
use crate::rule::Rule;
use crate::schema::SchemaFunction;

use context::RequestRuleContext;

/// A rule over bid requests.
pub type RequestRule = dyn Rule<BidRequest, RequestRuleContext>;

/// A schema function over bid requests.
pub type RequestSchemaFunction = dyn SchemaFunction<BidRequest, RequestRuleContext>;

/// An action function over bid requests.
pub type RequestActionFunction = dyn ActionFunction<BidRequest, RequestRuleContext>;

pub use action::ActionFunctionRegistry;
pub use context::{AuctionContext, Granularity};
pub use factory::RequestRuleFactory;
pub use per_imp::PerImpressionRule;
pub use schema::SchemaFunctionRegistry;
