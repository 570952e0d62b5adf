//! Discrete-event simulation loop.

use super::config::SimConfig;
use super::types::{Progress, ProgressResult, ServiceRecord, SimPhase, SimResult};
use crate::error::SimError;
use crate::export::{export_service_record, ExportConfig};
use crate::patient::{now_seconds, Admission, AppointmentType};
use crate::queue::TriageQueue;
use rand::distr::weighted::WeightedIndex;
use rand::distr::Distribution;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::panic::{self, AssertUnwindSafe};
use std::path::PathBuf;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

const SEVERITY_LEVELS: [i32; 4] = [1, 2, 3, 4];

/// A finished run together with the location of its CSV export.
#[derive(Debug, Clone)]
pub struct SimOutcome {
    pub path: PathBuf,
    pub result: SimResult,
}

/// Executes triage simulations.
///
/// Each run admits synthetic patients into its own private
/// [`TriageQueue`], then drains it through `servers` doctors taking
/// turns within a round. Servers are simulated one after another, so a
/// seeded run is fully reproducible.
///
/// # Usage
///
/// ```
/// use u_triage::sim::{SimConfig, SimRunner};
///
/// let config = SimConfig::default()
///     .with_arrivals(10)
///     .with_servers(1)
///     .with_seed(7)
///     .with_base_time(0.0);
/// let result = SimRunner::run(&config).unwrap();
/// assert_eq!(result.served(), 10);
/// ```
pub struct SimRunner;

impl SimRunner {
    /// Runs a simulation without progress reporting.
    pub fn run(config: &SimConfig) -> Result<SimResult, SimError> {
        Self::run_with_progress(config, |_| Ok(()))
    }

    /// Runs a simulation, reporting progress after every admission and
    /// every service event.
    ///
    /// Callback errors and panics are logged and otherwise ignored.
    pub fn run_with_progress<F>(config: &SimConfig, mut progress: F) -> Result<SimResult, SimError>
    where
        F: FnMut(Progress) -> ProgressResult,
    {
        config.validate().map_err(SimError::InvalidConfig)?;

        let severity_dist = WeightedIndex::new(config.severity_weights)
            .map_err(|e| SimError::InvalidConfig(format!("severity_weights: {e}")))?;
        let appointment_dist = WeightedIndex::new(config.appointment_weights)
            .map_err(|e| SimError::InvalidConfig(format!("appointment_weights: {e}")))?;

        let seed = config.seed.unwrap_or_else(rand::random);
        let mut rng = StdRng::seed_from_u64(seed);
        let base_time = config.base_time.unwrap_or_else(now_seconds);
        let total = config.arrivals;

        log::info!(
            "simulation started: {} arrivals, {} servers, seed {}",
            total,
            config.servers,
            seed
        );

        // Generating
        let queue = TriageQueue::new();
        let (interval_min, interval_max) = config.arrival_interval;
        let mut arrival = base_time;
        for i in 0..total {
            if i > 0 {
                arrival += rng.random_range(interval_min..=interval_max) as f64;
            }
            let age = rng.random_range(1..=90);
            let severity = SEVERITY_LEVELS[severity_dist.sample(&mut rng)];
            let urgency = rng.random_range(1..=10);
            let kind = AppointmentType::ALL[appointment_dist.sample(&mut rng)];

            queue.admit(
                Admission::new(format!("P{}", i + 1), age, severity, urgency)
                    .with_appointment_type(kind.as_str())
                    .with_booking_time(arrival),
            );
            notify(&mut progress, SimPhase::Generating, i + 1, total);
        }
        let generated = queue.size();
        if generated != total {
            log::warn!("generated {generated} patients, expected {total}");
        }

        // Servicing
        let (service_min, service_max) = config.service_duration;
        let mut clock = base_time;
        let mut records = Vec::with_capacity(total);
        'service: while !queue.is_empty() {
            for _ in 0..config.servers {
                let Some(patient) = queue.pop_next() else {
                    break;
                };
                let wait_seconds = (clock - patient.booking_time).max(0.0).floor() as u64;
                log::trace!("patient {} waited {}s", patient.id, wait_seconds);
                records.push(ServiceRecord {
                    patient,
                    wait_seconds,
                });
                clock += rng.random_range(service_min..=service_max) as f64;
                notify(&mut progress, SimPhase::Servicing, records.len(), total);

                if records.len() >= total {
                    break 'service;
                }
            }
        }

        notify(&mut progress, SimPhase::Done, records.len(), total);
        log::info!("simulation finished: {} patients served", records.len());

        Ok(SimResult {
            records,
            generated,
            seed,
            base_time,
            final_clock: clock,
        })
    }

    /// Runs a simulation and writes its service record to
    /// `export.simulation_file` inside the export directory.
    pub fn run_and_export<F>(
        config: &SimConfig,
        export: &ExportConfig,
        progress: F,
    ) -> Result<SimOutcome, SimError>
    where
        F: FnMut(Progress) -> ProgressResult,
    {
        export.validate()?;
        let result = Self::run_with_progress(config, progress)?;
        let path = export_service_record(&result.records, export.simulation_path())?;
        Ok(SimOutcome { path, result })
    }

    /// Runs one independent replication per seed.
    ///
    /// Replications run in parallel with the `parallel` feature.
    pub fn run_replications(config: &SimConfig, seeds: &[u64]) -> Vec<Result<SimResult, SimError>> {
        #[cfg(feature = "parallel")]
        let iter = seeds.par_iter();
        #[cfg(not(feature = "parallel"))]
        let iter = seeds.iter();

        iter.map(|&seed| Self::run(&config.clone().with_seed(seed)))
            .collect()
    }
}

fn notify<F>(progress: &mut F, phase: SimPhase, completed: usize, total: usize)
where
    F: FnMut(Progress) -> ProgressResult,
{
    let update = Progress {
        phase,
        completed,
        total,
    };
    match panic::catch_unwind(AssertUnwindSafe(|| progress(update))) {
        Ok(Ok(())) => {}
        Ok(Err(e)) => log::debug!("progress callback failed: {e}"),
        Err(_) => log::debug!("progress callback panicked"),
    }
}
