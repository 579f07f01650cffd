//! Hot-reloadable rule sets.
//!
//! Business rules are supplied externally and updated while the server
//! runs. `HotRuleSet` wraps a [`RuleSet`] in `ArcSwap` for lock-free
//! reads and atomic replacement; request-path loads are wait-free.

use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::result::RuleResult;
use crate::set::RuleSet;

/// A hot-reloadable wrapper around [`RuleSet`].
pub struct HotRuleSet<T, C> {
    inner: ArcSwap<RuleSet<T, C>>,
}

impl<T, C> HotRuleSet<T, C> {
    /// Create with an initial rule set.
    pub fn new(rules: RuleSet<T, C>) -> Self {
        Self {
            inner: ArcSwap::new(Arc::new(rules)),
        }
    }

    /// Atomically replace the rule set with a newly built one.
    pub fn update(&self, rules: RuleSet<T, C>) {
        self.inner.store(Arc::new(rules));
    }

    /// Number of rules in the current set.
    pub fn len(&self) -> usize {
        self.inner.load().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.load().is_empty()
    }
}

impl<T: Clone, C> HotRuleSet<T, C> {
    /// Process a request against the current rules.
    ///
    /// The result is owned, so the caller holds no borrow on the swapped
    /// set after this returns.
    pub fn process(&self, value: T, context: &C) -> RuleResult<T> {
        let rules = self.inner.load();
        rules.process(value, context)
    }
}

impl<T, C> std::fmt::Debug for HotRuleSet<T, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HotRuleSet")
            .field("inner", &*self.inner.load())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::Rule;

    struct Scale(i64);

    impl Rule<i64, ()> for Scale {
        fn process(&self, value: i64, _context: &()) -> RuleResult<i64> {
            RuleResult::updated(value * self.0, Vec::new())
        }
    }

    #[test]
    fn update_swaps_rules_atomically() {
        let hot = HotRuleSet::new(RuleSet::new(vec![
            Arc::new(Scale(2)) as Arc<dyn Rule<i64, ()>>,
        ]));
        assert_eq!(*hot.process(10, &()).value(), 20);

        hot.update(RuleSet::new(vec![
            Arc::new(Scale(3)) as Arc<dyn Rule<i64, ()>>,
        ]));
        assert_eq!(*hot.process(10, &()).value(), 30);
        assert_eq!(hot.len(), 1);
    }

    #[test]
    fn empty_set_passes_through() {
        let hot: HotRuleSet<i64, ()> = HotRuleSet::new(RuleSet::empty());
        let result = hot.process(5, &());
        assert!(!result.altered());
        assert!(hot.is_empty());
    }
}
