//! Rule evaluation results and their combination.
//!
//! `RuleResult` is the accumulator folded over action applications and
//! per-impression iterations. Combination is associative with sticky
//! rejection: once a result is rejected, merging keeps the left-hand side
//! unchanged, reason code and diagnostics included.

use serde::Serialize;

/// Why a request was rejected, as an OpenRTB seat-non-bid status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RejectionReason(pub u16);

impl std::fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Outcome status of a diagnostics entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TagStatus {
    Success,
    Error,
}

/// One diagnostics entry emitted during rule evaluation: which capability
/// produced it, an opaque value payload, and the impression ids it applied
/// to (empty for whole-request scope).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsTag {
    pub activity: String,
    pub status: TagStatus,
    pub values: serde_json::Value,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub applied_to: Vec<String>,
}

impl AnalyticsTag {
    /// A successful activity entry.
    pub fn success(
        activity: impl Into<String>,
        values: serde_json::Value,
        applied_to: Vec<String>,
    ) -> Self {
        Self {
            activity: activity.into(),
            status: TagStatus::Success,
            values,
            applied_to,
        }
    }

    /// An error entry.
    pub fn error(activity: impl Into<String>, values: serde_json::Value) -> Self {
        Self {
            activity: activity.into(),
            status: TagStatus::Error,
            values,
            applied_to: Vec::new(),
        }
    }
}

/// The result of evaluating a rule (or one action, or one impression
/// iteration) against a value of type `V`.
///
/// Never mutated in place: every combination produces a new result. The
/// value snapshot is always present, rejected or not; rejection does not
/// erase the payload, and the caller decides what a rejected value means.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleResult<V> {
    value: V,
    altered: bool,
    rejection: Option<RejectionReason>,
    tags: Vec<AnalyticsTag>,
}

impl<V> RuleResult<V> {
    /// The identity result: unchanged value, not rejected, no diagnostics.
    pub fn unaltered(value: V) -> Self {
        Self {
            value,
            altered: false,
            rejection: None,
            tags: Vec::new(),
        }
    }

    /// A transformed value with its diagnostics.
    pub fn updated(value: V, tags: Vec<AnalyticsTag>) -> Self {
        Self {
            value,
            altered: true,
            rejection: None,
            tags,
        }
    }

    /// An unchanged value carrying diagnostics (e.g. dry-run reporting).
    pub fn with_tags(value: V, tags: Vec<AnalyticsTag>) -> Self {
        Self {
            value,
            altered: false,
            rejection: None,
            tags,
        }
    }

    /// A rejected result. The value snapshot is retained.
    pub fn rejected(value: V, reason: RejectionReason, tags: Vec<AnalyticsTag>) -> Self {
        Self {
            value,
            altered: true,
            rejection: Some(reason),
            tags,
        }
    }

    /// Associative combine with sticky rejection.
    ///
    /// `rejected(a).merge_with(b) == rejected(a)` for any `b`: the right-
    /// hand side's value, alteration flag and diagnostics are all
    /// discarded. Otherwise the later value wins, `altered` is the logical
    /// OR, and diagnostics concatenate in emission order.
    pub fn merge_with(self, other: RuleResult<V>) -> RuleResult<V> {
        if self.rejection.is_some() {
            return self;
        }
        let mut tags = self.tags;
        tags.extend(other.tags);
        RuleResult {
            value: other.value,
            altered: self.altered || other.altered,
            rejection: other.rejection,
            tags,
        }
    }

    /// True iff the aggregated state is currently a reject.
    pub fn is_reject(&self) -> bool {
        self.rejection.is_some()
    }

    /// The rejection reason, if rejected.
    pub fn rejection(&self) -> Option<RejectionReason> {
        self.rejection
    }

    /// True if any stage reported a transformation.
    pub fn altered(&self) -> bool {
        self.altered
    }

    /// The current value snapshot, rejected or not.
    pub fn value(&self) -> &V {
        &self.value
    }

    /// Consume the result, returning the value snapshot.
    pub fn into_value(self) -> V {
        self.value
    }

    /// Diagnostics entries in emission order.
    pub fn tags(&self) -> &[AnalyticsTag] {
        &self.tags
    }
}
