//! Simulation configuration.

/// Configuration for a triage simulation run.
///
/// # Defaults
///
/// ```
/// use u_triage::sim::SimConfig;
///
/// let config = SimConfig::default();
/// assert_eq!(config.arrivals, 30);
/// assert_eq!(config.servers, 2);
/// assert_eq!(config.arrival_interval, (1, 4));
/// assert_eq!(config.service_duration, (3, 8));
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_triage::sim::SimConfig;
///
/// let config = SimConfig::default()
///     .with_arrivals(100)
///     .with_servers(3)
///     .with_arrival_interval(2, 6)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimConfig {
    /// Number of synthetic patients to generate.
    pub arrivals: usize,

    /// Number of servers (doctors) drained per round.
    pub servers: usize,

    /// Inclusive range, in whole seconds, between consecutive arrivals.
    pub arrival_interval: (u64, u64),

    /// Inclusive range, in whole seconds, of one service.
    pub service_duration: (u64, u64),

    /// Relative weights of severity levels 1, 2, 3, 4.
    pub severity_weights: [u32; 4],

    /// Relative weights of walk-in, appointment, emergency.
    pub appointment_weights: [u32; 3],

    /// Random seed for reproducibility. `None` draws a fresh seed.
    pub seed: Option<u64>,

    /// Simulation start in epoch seconds. `None` uses the wall clock.
    ///
    /// Fix this together with `seed` to get identical records across
    /// runs, including booking times.
    pub base_time: Option<f64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            arrivals: 30,
            servers: 2,
            arrival_interval: (1, 4),
            service_duration: (3, 8),
            severity_weights: [40, 30, 20, 10],
            appointment_weights: [60, 30, 10],
            seed: None,
            base_time: None,
        }
    }
}

impl SimConfig {
    pub fn with_arrivals(mut self, n: usize) -> Self {
        self.arrivals = n;
        self
    }

    pub fn with_servers(mut self, n: usize) -> Self {
        self.servers = n;
        self
    }

    pub fn with_arrival_interval(mut self, min: u64, max: u64) -> Self {
        self.arrival_interval = (min, max);
        self
    }

    pub fn with_service_duration(mut self, min: u64, max: u64) -> Self {
        self.service_duration = (min, max);
        self
    }

    pub fn with_severity_weights(mut self, weights: [u32; 4]) -> Self {
        self.severity_weights = weights;
        self
    }

    pub fn with_appointment_weights(mut self, weights: [u32; 3]) -> Self {
        self.appointment_weights = weights;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_base_time(mut self, t: f64) -> Self {
        self.base_time = Some(t);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.arrivals == 0 {
            return Err("arrivals must be positive".into());
        }
        if self.servers == 0 {
            return Err("servers must be positive".into());
        }
        let (lo, hi) = self.arrival_interval;
        if lo > hi {
            return Err(format!("arrival_interval min {lo} exceeds max {hi}"));
        }
        let (lo, hi) = self.service_duration;
        if lo > hi {
            return Err(format!("service_duration min {lo} exceeds max {hi}"));
        }
        if self.severity_weights.iter().all(|&w| w == 0) {
            return Err("severity_weights must not all be zero".into());
        }
        if self.appointment_weights.iter().all(|&w| w == 0) {
            return Err("appointment_weights must not all be zero".into());
        }
        if let Some(t) = self.base_time {
            if !t.is_finite() {
                return Err(format!("base_time must be finite, got {t}"));
            }
        }
        Ok(())
    }
}
