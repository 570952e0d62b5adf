//! Composite priority ranking.
//!
//! A [`PriorityRule`] maps a patient to a [`RankKey`]. Keys compare
//! lexicographically and the smallest key is served first. The clinic
//! rule, [`TriageRule`], orders by:
//!
//! 1. severity plus appointment boost (higher first)
//! 2. urgency (higher first)
//! 3. pediatric/elderly flag (flagged first)
//! 4. booking time (earlier first)
//! 5. patient id (lower first)
//!
//! The id component makes the order total: two patients with distinct
//! ids never produce equal keys.

mod rule;
mod types;

pub use rule::{age_priority, TriageRule};
pub use types::{PriorityRule, RankKey};
