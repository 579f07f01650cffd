//! Ordered collections of built rules.

use std::sync::Arc;

use crate::result::RuleResult;
use crate::rule::Rule;

/// An ordered set of built rules, folded over a request in sequence.
///
/// Each rule sees the value produced by the previous one; evaluation
/// stops at the first rejection (later rules would be discarded by the
/// sticky merge anyway).
pub struct RuleSet<T, C> {
    rules: Vec<Arc<dyn Rule<T, C>>>,
}

impl<T, C> RuleSet<T, C> {
    pub fn new(rules: Vec<Arc<dyn Rule<T, C>>>) -> Self {
        Self { rules }
    }

    /// An empty set; processing is the identity.
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl<T: Clone, C> RuleSet<T, C> {
    pub fn process(&self, value: T, context: &C) -> RuleResult<T> {
        let mut acc = RuleResult::unaltered(value);
        for rule in &self.rules {
            let result = rule.process(acc.value().clone(), context);
            acc = acc.merge_with(result);
            if acc.is_reject() {
                break;
            }
        }
        acc
    }
}

impl<T, C> std::fmt::Debug for RuleSet<T, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleSet")
            .field("rules", &self.rules.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::{RejectionReason, RuleResult};

    struct AddOne;

    impl Rule<i64, ()> for AddOne {
        fn process(&self, value: i64, _context: &()) -> RuleResult<i64> {
            RuleResult::updated(value + 1, Vec::new())
        }
    }

    struct RejectAll;

    impl Rule<i64, ()> for RejectAll {
        fn process(&self, value: i64, _context: &()) -> RuleResult<i64> {
            RuleResult::rejected(value, RejectionReason(2), Vec::new())
        }
    }

    #[test]
    fn folds_rules_in_order() {
        let set = RuleSet::new(vec![
            Arc::new(AddOne) as Arc<dyn Rule<i64, ()>>,
            Arc::new(AddOne),
        ]);
        let result = set.process(0, &());
        assert_eq!(*result.value(), 2);
        assert!(result.altered());
    }

    #[test]
    fn stops_at_first_rejection() {
        let set = RuleSet::new(vec![
            Arc::new(RejectAll) as Arc<dyn Rule<i64, ()>>,
            Arc::new(AddOne),
        ]);
        let result = set.process(0, &());
        assert!(result.is_reject());
        assert_eq!(*result.value(), 0);
    }

    #[test]
    fn empty_set_is_identity() {
        let set: RuleSet<i64, ()> = RuleSet::empty();
        let result = set.process(41, &());
        assert_eq!(result, RuleResult::unaltered(41));
    }
}
