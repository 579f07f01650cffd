//! Evaluation context for request-granularity rules.

use std::sync::Arc;

use auction_openrtb::BidRequest;

/// Host-owned auction state handed through to schema and action
/// functions. The engine never inspects it beyond passing it along.
#[derive(Debug, Clone, Default)]
pub struct AuctionContext {
    /// Publisher account the request belongs to.
    pub account_id: Option<String>,
}

/// The scope of one rule evaluation: the whole request, or a single
/// impression within it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Granularity {
    Request,
    Imp(String),
}

impl Granularity {
    /// The impression id, when impression-scoped.
    pub fn imp_id(&self) -> Option<&str> {
        match self {
            Granularity::Imp(id) => Some(id),
            Granularity::Request => None,
        }
    }
}

/// Per-evaluation context. Rebuilt, never mutated, for each impression
/// when iterating a multi-impression request.
#[derive(Debug, Clone)]
pub struct RequestRuleContext {
    pub auction: Arc<AuctionContext>,
    pub granularity: Granularity,
    /// Datacenter the request is being served from.
    pub datacenter: String,
}

impl RequestRuleContext {
    pub fn new(
        auction: Arc<AuctionContext>,
        granularity: Granularity,
        datacenter: impl Into<String>,
    ) -> Self {
        Self {
            auction,
            granularity,
            datacenter: datacenter.into(),
        }
    }

    /// The same context rebuilt at impression scope.
    pub fn for_imp(&self, imp_id: impl Into<String>) -> Self {
        Self {
            auction: self.auction.clone(),
            granularity: Granularity::Imp(imp_id.into()),
            datacenter: self.datacenter.clone(),
        }
    }

    /// The impression ids an action at this granularity applies to: every
    /// impression at request scope, the single (still-present) impression
    /// at impression scope.
    pub fn scoped_imp_ids(&self, request: &BidRequest) -> Vec<String> {
        match &self.granularity {
            Granularity::Request => request.imp_ids(),
            Granularity::Imp(id) => match request.find_imp(id) {
                Some(imp) => vec![imp.id.clone()],
                None => Vec::new(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use auction_openrtb::Imp;

    fn request() -> BidRequest {
        BidRequest {
            id: "r".into(),
            imp: vec![
                Imp {
                    id: "imp-1".into(),
                    ..Default::default()
                },
                Imp {
                    id: "imp-2".into(),
                    ..Default::default()
                },
            ],
            ..Default::default()
        }
    }

    fn context(granularity: Granularity) -> RequestRuleContext {
        RequestRuleContext::new(Arc::new(AuctionContext::default()), granularity, "dc-east")
    }

    #[test]
    fn for_imp_rebuilds_at_impression_scope() {
        let ctx = context(Granularity::Request);
        let imp_ctx = ctx.for_imp("imp-2");
        assert_eq!(imp_ctx.granularity, Granularity::Imp("imp-2".into()));
        assert_eq!(imp_ctx.datacenter, "dc-east");
        assert!(Arc::ptr_eq(&ctx.auction, &imp_ctx.auction));
    }

    #[test]
    fn request_scope_covers_all_imps() {
        let ctx = context(Granularity::Request);
        assert_eq!(ctx.scoped_imp_ids(&request()), vec!["imp-1", "imp-2"]);
    }

    #[test]
    fn imp_scope_covers_one_imp() {
        let ctx = context(Granularity::Imp("imp-2".into()));
        assert_eq!(ctx.scoped_imp_ids(&request()), vec!["imp-2"]);
    }

    #[test]
    fn imp_scope_of_dropped_imp_covers_nothing() {
        let ctx = context(Granularity::Imp("gone".into()));
        assert!(ctx.scoped_imp_ids(&request()).is_empty());
    }
}
