//! Error types for admission, export, and simulation.
//!
//! An empty queue is not an error: [`TriageQueue::pop_next`] and
//! [`TriageQueue::peek_next`] return `None` instead.
//!
//! [`TriageQueue::pop_next`]: crate::queue::TriageQueue::pop_next
//! [`TriageQueue::peek_next`]: crate::queue::TriageQueue::peek_next

use thiserror::Error;

/// Rejected admission input, raised by [`Admission::validate`].
///
/// The queue never raises this itself; range checks belong to the
/// caller that collects the input.
///
/// [`Admission::validate`]: crate::patient::Admission::validate
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdmissionError {
    #[error("patient name must not be empty")]
    EmptyName,

    #[error("age must be within 0..=130, got {0}")]
    AgeOutOfRange(i32),

    #[error("severity must be within 1..=4, got {0}")]
    SeverityOutOfRange(i32),

    #[error("urgency must be within 1..=10, got {0}")]
    UrgencyOutOfRange(i32),
}

/// Failure while writing a CSV export.
///
/// Exports are not atomic: a failure may leave a truncated file behind.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("invalid export configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to write CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error during export: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure of a simulation run.
#[derive(Debug, Error)]
pub enum SimError {
    #[error("invalid simulation configuration: {0}")]
    InvalidConfig(String),

    #[error("simulation export failed: {0}")]
    Export(#[from] ExportError),

    #[error("a simulation is already running on this worker")]
    Busy,

    #[error("failed to spawn simulation worker: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("simulation worker panicked: {0}")]
    WorkerPanicked(String),
}
