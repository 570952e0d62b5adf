//! Clinic triage queue with composite priority ranking.
//!
//! Patients are served by clinical priority rather than arrival order:
//!
//! - **Rank**: a pure rule mapping a patient to a totally ordered key
//!   (severity plus appointment boost, urgency, pediatric/elderly flag,
//!   booking time, id).
//! - **Queue**: a mutex-protected binary heap supporting admission,
//!   serving, peeking, ordered snapshots and reset from any thread.
//! - **Simulation**: a seeded discrete-event driver that generates
//!   synthetic arrivals, drains them through parallel servers and
//!   records each patient's wait.
//! - **Export**: CSV writers for queue snapshots and service records.
//!
//! # Example
//!
//! ```
//! use u_triage::patient::Admission;
//! use u_triage::queue::TriageQueue;
//!
//! let queue = TriageQueue::new();
//! queue.admit(Admission::new("Rohit", 65, 2, 6).with_appointment_type("appointment"));
//! queue.admit(Admission::new("Sana", 30, 4, 9).with_appointment_type("emergency"));
//! queue.admit(Admission::new("Kavi", 8, 3, 8));
//!
//! let order: Vec<String> = queue.list_snapshot().into_iter().map(|p| p.name).collect();
//! assert_eq!(order, ["Sana", "Kavi", "Rohit"]);
//! ```
//!
//! # Features
//!
//! - `serde`: `Serialize`/`Deserialize` for records and configs.
//! - `parallel`: run simulation replications on the rayon thread pool.
//!
//! The crate logs through the `log` facade and never installs a logger.

pub mod error;
pub mod export;
pub mod patient;
pub mod queue;
pub mod rank;
pub mod sim;

pub use error::{AdmissionError, ExportError, SimError};
