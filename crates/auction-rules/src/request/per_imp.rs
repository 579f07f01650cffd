//! Per-impression rule wrapping.
//!
//! Some schema bindings are only meaningful at the scope of one
//! impression (e.g. the requested ad format). The wrapper reruns the
//! whole-request rule once per impression with a rebuilt context, folding
//! results across impressions in list order.

use std::sync::Arc;

use auction_openrtb::BidRequest;

use crate::result::RuleResult;
use crate::rule::Rule;

use super::RequestRule;
use super::context::RequestRuleContext;

/// Wraps a whole-request rule and applies it once per impression.
///
/// Impressions are processed strictly in list order; each iteration sees
/// the request as edited by the previous ones. The fail-fast variant
/// stops iterating as soon as the accumulator is rejected (remaining
/// impressions are neither matched nor extracted); the exhaustive variant
/// always visits every impression to collect full diagnostics.
pub struct PerImpressionRule {
    inner: Arc<RequestRule>,
    short_circuit: bool,
}

impl PerImpressionRule {
    /// The action-applying variant: stops at the first rejection.
    pub fn fail_fast(inner: Arc<RequestRule>) -> Self {
        Self {
            inner,
            short_circuit: true,
        }
    }

    /// The matching-only variant: visits every impression.
    pub fn exhaustive(inner: Arc<RequestRule>) -> Self {
        Self {
            inner,
            short_circuit: false,
        }
    }
}

impl Rule<BidRequest, RequestRuleContext> for PerImpressionRule {
    fn process(&self, request: BidRequest, context: &RequestRuleContext) -> RuleResult<BidRequest> {
        // Iterate the impression ids as they were on entry; an impression
        // dropped by an earlier iteration simply extracts nothing.
        let imp_ids = request.imp_ids();

        let mut acc = RuleResult::unaltered(request);
        for imp_id in imp_ids {
            let imp_context = context.for_imp(imp_id);
            let result = self.inner.process(acc.value().clone(), &imp_context);
            acc = acc.merge_with(result);
            if self.short_circuit && acc.is_reject() {
                break;
            }
        }
        acc
    }
}
