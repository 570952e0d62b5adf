//! Rank key and the rule trait.

use crate::patient::Patient;
use std::cmp::Ordering;

/// Lexicographic rank of a patient. Smaller is served sooner.
///
/// Priority components are stored negated so that every field
/// compares ascending. `booking_time` uses IEEE total ordering, so a
/// key is always comparable, even for non-finite timestamps.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RankKey {
    /// `-(severity + appointment boost)`.
    pub clinical: i64,

    /// `-urgency`.
    pub urgency: i64,

    /// `-age_priority` (0 or -1).
    pub age: i64,

    /// Booking time in seconds since the Unix epoch.
    pub booking_time: f64,

    /// Admission id; final tie-break.
    pub id: u64,
}

impl Ord for RankKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.clinical
            .cmp(&other.clinical)
            .then(self.urgency.cmp(&other.urgency))
            .then(self.age.cmp(&other.age))
            .then(self.booking_time.total_cmp(&other.booking_time))
            .then(self.id.cmp(&other.id))
    }
}

impl PartialOrd for RankKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for RankKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for RankKey {}

/// A rule that ranks patients.
///
/// Implementations must be pure: the key may depend only on the
/// patient's current attributes. The queue calls the rule once on
/// admission and again for every patient on [`list_snapshot`].
///
/// # Examples
///
/// ```
/// use u_triage::patient::Patient;
/// use u_triage::rank::{PriorityRule, RankKey, TriageRule};
///
/// // Ignores appointment type entirely.
/// struct SeverityOnly;
///
/// impl PriorityRule for SeverityOnly {
///     fn name(&self) -> &str { "SeverityOnly" }
///     fn rank(&self, p: &Patient) -> RankKey {
///         RankKey { clinical: -(p.severity as i64), ..TriageRule.rank(p) }
///     }
/// }
/// ```
///
/// [`list_snapshot`]: crate::queue::TriageQueue::list_snapshot
pub trait PriorityRule: Send + Sync {
    /// Returns the name of this rule.
    fn name(&self) -> &str;

    /// Computes the rank key for a patient. Lower keys are served first.
    fn rank(&self, patient: &Patient) -> RankKey;
}
