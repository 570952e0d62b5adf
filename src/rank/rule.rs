//! The clinic triage rule.

use super::types::{PriorityRule, RankKey};
use crate::patient::Patient;

/// Returns 1 for pediatric (`age < 12`) or elderly (`age >= 60`)
/// patients, 0 otherwise.
pub fn age_priority(age: i32) -> i64 {
    if (12..60).contains(&age) {
        0
    } else {
        1
    }
}

/// Default clinic rule: severity plus appointment boost, then urgency,
/// then the pediatric/elderly flag, then booking time, then id.
///
/// # Examples
///
/// ```
/// use u_triage::patient::Patient;
/// use u_triage::rank::{PriorityRule, TriageRule};
///
/// let walk_in = Patient::new(1, "Kavi", 8, 3, 8, "walk-in", 0.0);
/// let emergency = Patient::new(2, "Sana", 30, 4, 9, "EMERGENCY", 5.0);
///
/// assert!(TriageRule.rank(&emergency) < TriageRule.rank(&walk_in));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct TriageRule;

impl PriorityRule for TriageRule {
    fn name(&self) -> &str {
        "Triage"
    }

    fn rank(&self, patient: &Patient) -> RankKey {
        let boost = patient.appointment_kind().boost();
        RankKey {
            clinical: -(patient.severity as i64 + boost),
            urgency: -(patient.urgency as i64),
            age: -age_priority(patient.age),
            booking_time: patient.booking_time,
            id: patient.id,
        }
    }
}
