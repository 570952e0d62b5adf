//! Simulation records, progress, and results.

use crate::patient::Patient;
use std::error::Error;

/// Stage of a simulation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SimPhase {
    /// Synthetic arrivals are being admitted.
    Generating,
    /// Servers are draining the queue.
    Servicing,
    /// Terminal.
    Done,
}

/// Progress update passed to a callback after each admission and each
/// service event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub phase: SimPhase,
    pub completed: usize,
    pub total: usize,
}

/// Return type of progress callbacks. Errors are logged and ignored.
pub type ProgressResult = Result<(), Box<dyn Error + Send + Sync>>;

/// A served patient and how long they waited.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ServiceRecord {
    pub patient: Patient,
    /// Whole seconds between booking and the start of service.
    pub wait_seconds: u64,
}

/// Result of a simulation run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimResult {
    /// Service records in serving order.
    pub records: Vec<ServiceRecord>,

    /// Number of patients generated.
    pub generated: usize,

    /// Seed actually used (drawn from entropy when none was configured).
    pub seed: u64,

    /// Simulation start, epoch seconds.
    pub base_time: f64,

    /// Simulated clock after the last service.
    pub final_clock: f64,
}

impl SimResult {
    pub fn served(&self) -> usize {
        self.records.len()
    }

    /// Aggregate wait-time statistics.
    pub fn summary(&self) -> SimSummary {
        let served = self.records.len();
        let total_wait: u64 = self.records.iter().map(|r| r.wait_seconds).sum();
        SimSummary {
            served,
            mean_wait: if served == 0 {
                0.0
            } else {
                total_wait as f64 / served as f64
            },
            max_wait: self.records.iter().map(|r| r.wait_seconds).max().unwrap_or(0),
            makespan: self.final_clock - self.base_time,
        }
    }
}

/// Throughput and wait-time summary of a run.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimSummary {
    pub served: usize,
    pub mean_wait: f64,
    pub max_wait: u64,
    /// Simulated seconds from start until the last service finished.
    pub makespan: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: u64, wait: u64) -> ServiceRecord {
        ServiceRecord {
            patient: Patient::new(id, format!("P{id}"), 30, 2, 5, "walk-in", 0.0),
            wait_seconds: wait,
        }
    }

    #[test]
    fn test_summary() {
        let result = SimResult {
            records: vec![record(1, 0), record(2, 4), record(3, 11)],
            generated: 3,
            seed: 7,
            base_time: 100.0,
            final_clock: 118.0,
        };
        let s = result.summary();
        assert_eq!(s.served, 3);
        assert_eq!(s.max_wait, 11);
        assert!((s.mean_wait - 5.0).abs() < 1e-10);
        assert!((s.makespan - 18.0).abs() < 1e-10);
    }

    #[test]
    fn test_summary_empty() {
        let result = SimResult {
            records: Vec::new(),
            generated: 0,
            seed: 0,
            base_time: 0.0,
            final_clock: 0.0,
        };
        let s = result.summary();
        assert_eq!(s.served, 0);
        assert_eq!(s.max_wait, 0);
        assert_eq!(s.mean_wait, 0.0);
    }
}
