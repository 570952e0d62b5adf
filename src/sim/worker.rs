//! Background simulation worker.

use super::config::SimConfig;
use super::runner::{SimOutcome, SimRunner};
use super::types::{Progress, ProgressResult};
use crate::error::SimError;
use crate::export::ExportConfig;
use std::any::Any;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

/// Runs simulations on a dedicated thread, one at a time.
///
/// A run cannot be aborted once started. Dropping the returned
/// [`SimHandle`] detaches it; the worker still becomes idle when the
/// run ends, whether it succeeds, fails, or panics.
///
/// # Examples
///
/// ```
/// use u_triage::export::ExportConfig;
/// use u_triage::sim::{SimConfig, SimWorker};
///
/// let dir = std::env::temp_dir();
/// let worker = SimWorker::new();
/// let handle = worker
///     .spawn(
///         SimConfig::default().with_arrivals(5).with_seed(1),
///         ExportConfig::default().with_directory(&dir).with_simulation_file("doc_sim.csv"),
///         |_| Ok(()),
///     )
///     .unwrap();
/// let outcome = handle.join().unwrap();
/// assert_eq!(outcome.result.served(), 5);
/// assert!(!worker.is_busy());
/// # std::fs::remove_file(outcome.path).ok();
/// ```
#[derive(Debug, Clone, Default)]
pub struct SimWorker {
    busy: Arc<AtomicBool>,
}

/// Clears the busy flag when dropped, including during unwinding.
struct BusyGuard(Arc<AtomicBool>);

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl SimWorker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a run is in progress.
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Starts a simulation-and-export run on a new thread.
    ///
    /// Returns [`SimError::Busy`] if a previous run has not finished.
    pub fn spawn<F>(
        &self,
        config: SimConfig,
        export: ExportConfig,
        progress: F,
    ) -> Result<SimHandle, SimError>
    where
        F: FnMut(Progress) -> ProgressResult + Send + 'static,
    {
        if self
            .busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(SimError::Busy);
        }
        // If spawning fails the closure is dropped and the guard with it.
        let guard = BusyGuard(Arc::clone(&self.busy));

        let handle = thread::Builder::new()
            .name("triage-sim".into())
            .spawn(move || {
                let _guard = guard;
                let outcome = SimRunner::run_and_export(&config, &export, progress);
                if let Err(e) = &outcome {
                    log::error!("simulation failed: {e}");
                }
                outcome
            })?;

        Ok(SimHandle { handle })
    }
}

/// Handle to a running simulation.
#[derive(Debug)]
pub struct SimHandle {
    handle: JoinHandle<Result<SimOutcome, SimError>>,
}

impl SimHandle {
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Waits for the run to end. A panic on the worker thread is
    /// reported as [`SimError::WorkerPanicked`].
    pub fn join(self) -> Result<SimOutcome, SimError> {
        self.handle
            .join()
            .unwrap_or_else(|payload| Err(SimError::WorkerPanicked(panic_message(payload))))
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
