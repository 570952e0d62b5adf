//! Discrete-event triage simulation.
//!
//! A run moves through three phases:
//!
//! 1. **Generating**: synthetic patients with randomized attributes and
//!    non-decreasing arrival times are admitted into a private queue.
//! 2. **Servicing**: `servers` doctors take turns popping the next
//!    patient; each service records the patient's wait and advances the
//!    simulated clock by a random service duration.
//! 3. **Done**: the queue is empty or every generated patient was served.
//!
//! Runs never touch a live clinic queue. A fixed seed and base time make
//! the whole run reproducible.

mod config;
mod runner;
mod types;
mod worker;

pub use config::SimConfig;
pub use runner::{SimOutcome, SimRunner};
pub use types::{Progress, ProgressResult, ServiceRecord, SimPhase, SimResult, SimSummary};
pub use worker::{SimHandle, SimWorker};
