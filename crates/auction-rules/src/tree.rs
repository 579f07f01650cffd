//! Decision tree keyed by ordered matcher sequences.
//!
//! One tree level per schema binding. Lookup descends exact-first with a
//! wildcard fallback per level and records the key actually taken.

use rustc_hash::FxHashMap;

use crate::error::RulesError;

/// Reserved key that matches any matcher value at its level when no exact
/// entry exists.
pub const WILDCARD: &str = "*";

struct Node<T> {
    children: FxHashMap<String, Node<T>>,
    value: Option<T>,
}

impl<T> Node<T> {
    fn new() -> Self {
        Self {
            children: FxHashMap::default(),
            value: None,
        }
    }
}

/// A successful lookup: the leaf payload plus the key used at each level
/// (the exact matcher value, or [`WILDCARD`] where the fallback was taken).
#[derive(Debug)]
pub struct LookupResult<'a, T> {
    pub value: &'a T,
    pub matches: Vec<String>,
}

/// An immutable decision tree over ordered matcher vectors.
///
/// Built once at configuration time via [`RuleTree::insert`]; all request-
/// path access goes through `&self` and is safe for unbounded concurrent
/// reads without locking.
pub struct RuleTree<T> {
    root: Node<T>,
    depth: usize,
}

impl<T> RuleTree<T> {
    /// Create an empty tree expecting matcher vectors of length `depth`.
    pub fn new(depth: usize) -> Self {
        Self {
            root: Node::new(),
            depth,
        }
    }

    /// Number of levels, equal to the schema binding count.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Insert a leaf at the path given by `keys`.
    ///
    /// Fails on arity mismatch or when the exact path already carries a
    /// value; both indicate broken configuration.
    pub fn insert(&mut self, keys: &[String], value: T) -> Result<(), RulesError> {
        if keys.len() != self.depth {
            return Err(RulesError::ArityMismatch {
                condition: keys.join("|"),
                expected: self.depth,
                actual: keys.len(),
            });
        }

        let mut node = &mut self.root;
        for key in keys {
            node = node.children.entry(key.clone()).or_insert_with(Node::new);
        }
        if node.value.is_some() {
            return Err(RulesError::DuplicateRule(keys.join("|")));
        }
        node.value = Some(value);
        Ok(())
    }

    /// Look up a matcher vector.
    ///
    /// At each level the exact matcher value is tried first, then the
    /// wildcard key. The descent is greedy with no backtracking: once a
    /// branch is taken at a level it is never abandoned, even if it
    /// dead-ends deeper. A final node without a value is a miss.
    pub fn lookup(&self, matchers: &[String]) -> Option<LookupResult<'_, T>> {
        let mut node = &self.root;
        let mut matches = Vec::with_capacity(matchers.len());

        for matcher in matchers {
            let (key, child) = match node.children.get_key_value(matcher.as_str()) {
                Some(entry) => entry,
                None => node.children.get_key_value(WILDCARD)?,
            };
            matches.push(key.clone());
            node = child;
        }

        let value = node.value.as_ref()?;
        Some(LookupResult { value, matches })
    }

    /// Number of leaves in the tree.
    pub fn len(&self) -> usize {
        fn count<T>(node: &Node<T>) -> usize {
            usize::from(node.value.is_some())
                + node.children.values().map(count).sum::<usize>()
        }
        count(&self.root)
    }

    /// Returns true if the tree has no leaves.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T> std::fmt::Debug for RuleTree<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleTree")
            .field("depth", &self.depth)
            .field("leaves", &self.len())
            .finish()
    }
}
