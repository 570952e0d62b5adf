//! Lock-protected binary heap.

use super::types::{Entry, QueueStats};
use crate::patient::{now_seconds, sample_admissions, Admission, Patient};
use crate::rank::{PriorityRule, TriageRule};
use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Debug, Default)]
struct QueueState {
    heap: BinaryHeap<Reverse<Entry>>,
    last_id: u64,
}

/// Concurrency-safe priority queue of patients.
///
/// Share it between threads with an `Arc`; all methods take `&self`.
///
/// # Examples
///
/// ```
/// use u_triage::patient::Admission;
/// use u_triage::queue::TriageQueue;
///
/// let queue = TriageQueue::new();
/// queue.admit(Admission::new("Maya", 50, 1, 3));
/// queue.admit(Admission::new("Sana", 30, 4, 9).with_appointment_type("emergency"));
///
/// assert_eq!(queue.size(), 2);
/// assert_eq!(queue.pop_next().unwrap().name, "Sana");
/// assert_eq!(queue.pop_next().unwrap().name, "Maya");
/// assert!(queue.pop_next().is_none());
/// ```
#[derive(Debug)]
pub struct TriageQueue<R = TriageRule> {
    rule: R,
    state: Mutex<QueueState>,
}

impl TriageQueue<TriageRule> {
    /// Creates an empty queue ranked by the clinic [`TriageRule`].
    pub fn new() -> Self {
        Self::with_rule(TriageRule)
    }
}

impl Default for TriageQueue<TriageRule> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: PriorityRule> TriageQueue<R> {
    /// Creates an empty queue ranked by a custom rule.
    pub fn with_rule(rule: R) -> Self {
        Self {
            rule,
            state: Mutex::new(QueueState::default()),
        }
    }

    /// Returns the rule used for ranking.
    pub fn rule(&self) -> &R {
        &self.rule
    }

    // Every operation leaves the heap consistent before it can panic,
    // so a poisoned lock still guards valid state.
    fn lock(&self) -> MutexGuard<'_, QueueState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Admits a patient and returns a copy of the stored record.
    ///
    /// Ids start at 1 and increase by one per admission. Without an
    /// explicit booking time the wall clock is used. Attribute ranges
    /// are not checked here; see [`Admission::validate`].
    pub fn admit(&self, admission: Admission) -> Patient {
        let booking_time = admission.booking_time.unwrap_or_else(now_seconds);

        let mut state = self.lock();
        state.last_id += 1;
        let patient = Patient {
            id: state.last_id,
            name: admission.name,
            age: admission.age,
            severity: admission.severity,
            urgency: admission.urgency,
            appointment_type: admission.appointment_type,
            notes: admission.notes,
            booking_time,
        };
        let key = self.rule.rank(&patient);
        state.heap.push(Reverse(Entry {
            key,
            patient: patient.clone(),
        }));
        log::debug!(
            "admitted patient {} ({}), queue size {}",
            patient.id,
            patient.name,
            state.heap.len()
        );
        patient
    }

    /// Removes and returns the highest-priority patient, or `None` if
    /// the queue is empty.
    pub fn pop_next(&self) -> Option<Patient> {
        let Reverse(entry) = self.lock().heap.pop()?;
        log::debug!("serving patient {} ({})", entry.patient.id, entry.patient.name);
        Some(entry.patient)
    }

    /// Returns the highest-priority patient without removing it.
    pub fn peek_next(&self) -> Option<Patient> {
        self.lock()
            .heap
            .peek()
            .map(|Reverse(entry)| entry.patient.clone())
    }

    /// Returns every waiting patient in serving order.
    ///
    /// Ranks are recomputed from current attributes with the queue's
    /// rule. The heap itself is left untouched.
    pub fn list_snapshot(&self) -> Vec<Patient> {
        let state = self.lock();
        let mut ranked: Vec<_> = state
            .heap
            .iter()
            .map(|Reverse(entry)| (self.rule.rank(&entry.patient), &entry.patient))
            .collect();
        ranked.sort_by(|a, b| a.0.cmp(&b.0));
        ranked.into_iter().map(|(_, p)| p.clone()).collect()
    }

    pub fn size(&self) -> usize {
        self.lock().heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().heap.is_empty()
    }

    /// Size and next patient, read under a single lock.
    pub fn stats(&self) -> QueueStats {
        let state = self.lock();
        QueueStats {
            size: state.heap.len(),
            next: state.heap.peek().map(|Reverse(e)| e.patient.clone()),
        }
    }

    /// Empties the queue and resets numbering; the next admission gets
    /// id 1.
    pub fn clear(&self) {
        let mut state = self.lock();
        let dropped = state.heap.len();
        state.heap.clear();
        state.last_id = 0;
        log::info!("queue cleared ({dropped} patients dropped)");
    }

    /// Clears the queue and admits the demo roster from
    /// [`sample_admissions`]. Returns the admitted patients.
    pub fn load_samples(&self) -> Vec<Patient> {
        self.clear();
        sample_admissions()
            .into_iter()
            .map(|admission| self.admit(admission))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rank::RankKey;
    use proptest::prelude::*;
    use std::collections::HashSet;
    use std::sync::Arc;
    use std::thread;

    fn admission(name: &str, age: i32, sev: i32, urg: i32, appt: &str, t: f64) -> Admission {
        Admission::new(name, age, sev, urg)
            .with_appointment_type(appt)
            .with_booking_time(t)
    }

    fn drain(queue: &TriageQueue) -> Vec<Patient> {
        std::iter::from_fn(|| queue.pop_next()).collect()
    }

    #[test]
    fn test_clinic_scenario_order() {
        let queue = TriageQueue::new();
        queue.admit(admission("Rohit", 65, 2, 6, "appointment", 100.0));
        queue.admit(admission("Sana", 30, 4, 9, "emergency", 101.0));
        queue.admit(admission("Kavi", 8, 3, 8, "walk-in", 102.0));

        // Kavi and Rohit both score 3; urgency 8 beats 6
        let order: Vec<u64> = drain(&queue).iter().map(|p| p.id).collect();
        assert_eq!(order, vec![2, 3, 1]);
    }

    #[test]
    fn test_ids_start_at_one_and_increase() {
        let queue = TriageQueue::new();
        let a = queue.admit(Admission::new("A", 30, 1, 1));
        let b = queue.admit(Admission::new("B", 30, 1, 1));
        assert_eq!((a.id, b.id), (1, 2));
    }

    #[test]
    fn test_clear_resets_counter() {
        let queue = TriageQueue::new();
        queue.admit(Admission::new("A", 30, 1, 1));
        queue.admit(Admission::new("B", 30, 1, 1));
        queue.clear();
        assert_eq!(queue.size(), 0);
        assert_eq!(queue.admit(Admission::new("C", 30, 1, 1)).id, 1);
    }

    #[test]
    fn test_pop_does_not_reuse_ids() {
        let queue = TriageQueue::new();
        queue.admit(Admission::new("A", 30, 1, 1));
        queue.pop_next();
        assert_eq!(queue.admit(Admission::new("B", 30, 1, 1)).id, 2);
    }

    #[test]
    fn test_empty_queue_returns_none() {
        let queue = TriageQueue::new();
        queue.admit(Admission::new("A", 30, 1, 1));
        queue.clear();
        assert!(queue.pop_next().is_none());
        assert!(queue.peek_next().is_none());
        assert!(queue.is_empty());
        assert_eq!(queue.stats(), QueueStats { size: 0, next: None });
    }

    #[test]
    fn test_peek_does_not_remove() {
        let queue = TriageQueue::new();
        queue.admit(admission("Maya", 50, 1, 3, "walk-in", 0.0));
        queue.admit(admission("Priya", 25, 4, 10, "appointment", 1.0));
        let peeked = queue.peek_next().unwrap();
        assert_eq!(peeked.name, "Priya");
        assert_eq!(queue.size(), 2);
        assert_eq!(queue.pop_next().unwrap(), peeked);
    }

    #[test]
    fn test_booking_time_defaults_to_now() {
        let queue = TriageQueue::new();
        let before = now_seconds();
        let p = queue.admit(Admission::new("A", 30, 1, 1));
        let after = now_seconds();
        assert!(p.booking_time >= before && p.booking_time <= after);
    }

    #[test]
    fn test_explicit_booking_time_kept() {
        let queue = TriageQueue::new();
        let p = queue.admit(Admission::new("A", 30, 1, 1).with_booking_time(42.5));
        assert!((p.booking_time - 42.5).abs() < 1e-10);
    }

    #[test]
    fn test_earlier_booking_wins_on_clinical_tie() {
        let queue = TriageQueue::new();
        queue.admit(admission("Late", 30, 2, 5, "walk-in", 200.0));
        queue.admit(admission("Early", 30, 2, 5, "walk-in", 100.0));
        assert_eq!(queue.pop_next().unwrap().name, "Early");
    }

    #[test]
    fn test_identical_attributes_fall_back_to_id() {
        let queue = TriageQueue::new();
        for name in ["first", "second", "third"] {
            queue.admit(admission(name, 30, 2, 5, "walk-in", 100.0));
        }
        let names: Vec<String> = drain(&queue).into_iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_snapshot_is_ordered_and_idempotent() {
        let queue = TriageQueue::new();
        queue.load_samples();
        let first = queue.list_snapshot();
        let second = queue.list_snapshot();
        assert_eq!(first, second);
        assert_eq!(first.len(), 6);
        assert_eq!(queue.size(), 6);
        for w in first.windows(2) {
            assert!(w[0].rank_key() < w[1].rank_key());
        }
        // snapshot order matches pop order
        assert_eq!(first, drain(&queue));
    }

    #[test]
    fn test_load_samples_replaces_contents() {
        let queue = TriageQueue::new();
        queue.admit(Admission::new("Stale", 30, 1, 1));
        let loaded = queue.load_samples();
        assert_eq!(loaded.len(), 6);
        assert_eq!(loaded[0].id, 1);
        assert_eq!(loaded[0].name, "Rohit");
        assert!(queue.list_snapshot().iter().all(|p| p.name != "Stale"));
        // Sana (4 + 2) is first
        assert_eq!(queue.stats().next.unwrap().name, "Sana");
    }

    #[test]
    fn test_custom_rule() {
        // youngest first, id as tie-break
        struct Youngest;
        impl PriorityRule for Youngest {
            fn name(&self) -> &str {
                "Youngest"
            }
            fn rank(&self, p: &Patient) -> RankKey {
                RankKey {
                    clinical: p.age as i64,
                    urgency: 0,
                    age: 0,
                    booking_time: 0.0,
                    id: p.id,
                }
            }
        }

        let queue = TriageQueue::with_rule(Youngest);
        queue.admit(admission("Old", 80, 4, 10, "emergency", 0.0));
        queue.admit(admission("Young", 5, 1, 1, "walk-in", 0.0));
        assert_eq!(queue.rule().name(), "Youngest");
        assert_eq!(queue.pop_next().unwrap().name, "Young");
    }

    #[test]
    fn test_concurrent_admissions_get_distinct_ids() {
        let queue = Arc::new(TriageQueue::new());
        let threads = 8;
        let per_thread = 50;

        let handles: Vec<_> = (0..threads)
            .map(|t| {
                let queue = Arc::clone(&queue);
                thread::spawn(move || {
                    (0..per_thread)
                        .map(|i| {
                            queue
                                .admit(Admission::new(format!("T{t}-{i}"), 30, 1 + i % 4, 5))
                                .id
                        })
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let mut ids: Vec<u64> = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect();
        ids.sort_unstable();

        let n = (threads * per_thread) as u64;
        assert_eq!(ids, (1..=n).collect::<Vec<_>>());
        assert_eq!(queue.size(), n as usize);
    }

    #[test]
    fn test_concurrent_admit_and_pop() {
        let queue = Arc::new(TriageQueue::new());
        let producer = {
            let queue = Arc::clone(&queue);
            thread::spawn(move || {
                for i in 0..200 {
                    queue.admit(Admission::new(format!("P{i}"), 30, 1 + i % 4, 5));
                }
            })
        };
        let consumer = {
            let queue = Arc::clone(&queue);
            thread::spawn(move || {
                let mut served = HashSet::new();
                for _ in 0..200 {
                    if let Some(p) = queue.pop_next() {
                        served.insert(p.id);
                    }
                }
                served
            })
        };

        producer.join().unwrap();
        let served = consumer.join().unwrap();
        let remaining: HashSet<u64> = drain(&queue).into_iter().map(|p| p.id).collect();

        assert!(served.is_disjoint(&remaining));
        assert_eq!(served.len() + remaining.len(), 200);
    }

    fn arb_admission() -> impl Strategy<Value = Admission> {
        (
            0i32..=130,
            1i32..=4,
            1i32..=10,
            prop::sample::select(vec!["walk-in", "appointment", "emergency", "other"]),
            // few distinct timestamps so later keys get exercised
            0u8..4,
        )
            .prop_map(|(age, sev, urg, appt, t)| {
                Admission::new("p", age, sev, urg)
                    .with_appointment_type(appt)
                    .with_booking_time(t as f64)
            })
    }

    proptest! {
        #[test]
        fn prop_pop_order_matches_full_sort(admissions in prop::collection::vec(arb_admission(), 0..60)) {
            let queue = TriageQueue::new();
            let mut expected: Vec<Patient> = admissions
                .into_iter()
                .map(|a| queue.admit(a))
                .collect();
            expected.sort_by_key(|p| p.rank_key());

            let popped = drain(&queue);
            prop_assert_eq!(popped, expected);
        }

        #[test]
        fn prop_rank_keys_unique(admissions in prop::collection::vec(arb_admission(), 0..60)) {
            let queue = TriageQueue::new();
            let patients: Vec<Patient> = admissions.into_iter().map(|a| queue.admit(a)).collect();
            for (i, p) in patients.iter().enumerate() {
                for q in &patients[i + 1..] {
                    prop_assert_ne!(p.rank_key(), q.rank_key());
                }
            }
        }

        #[test]
        fn prop_interleaved_pops_stay_sorted(
            admissions in prop::collection::vec(arb_admission(), 1..40),
            pop_every in 2usize..5,
        ) {
            let queue = TriageQueue::new();
            let mut pending: Vec<Patient> = Vec::new();
            for (i, a) in admissions.into_iter().enumerate() {
                pending.push(queue.admit(a));
                if i % pop_every == 0 {
                    pending.sort_by_key(|p| p.rank_key());
                    let expected = pending.remove(0);
                    prop_assert_eq!(queue.pop_next(), Some(expected));
                }
            }
            prop_assert_eq!(queue.size(), pending.len());
        }
    }
}
