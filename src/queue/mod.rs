//! Thread-safe triage queue.
//!
//! [`TriageQueue`] keeps admitted patients in rank order behind a single
//! mutex. Every operation takes the lock for its whole duration, so no
//! caller can observe a half-updated heap.
//!
//! # Ordering under mutation
//!
//! The heap orders entries by the rank key captured at admission. The
//! queue owns its patients and hands out clones, so attributes cannot
//! change after insertion and the captured key stays accurate until the
//! entry is popped.

mod heap;
mod types;

pub use heap::TriageQueue;
pub use types::QueueStats;
