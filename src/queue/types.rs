//! Heap entries and queue statistics.

use crate::patient::Patient;
use crate::rank::RankKey;
use std::cmp::Ordering;

/// A patient paired with the rank key captured at insertion.
#[derive(Debug, Clone)]
pub(super) struct Entry {
    pub(super) key: RankKey,
    pub(super) patient: Patient,
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for Entry {}

/// Point-in-time view of a queue, taken under one lock acquisition.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QueueStats {
    pub size: usize,
    pub next: Option<Patient>,
}
