//! Configuration settings for the MILP solver.

use std::env;

use simplex_core::SimplexSettings;

/// MILP solver settings.
#[derive(Debug, Clone)]
pub struct MipSettings {
    // === Search ===
    /// Number of worker threads draining the node queue.
    pub workers: usize,

    /// Integer feasibility tolerance.
    /// A variable is considered integer if |x - round(x)| <= int_feas_tol.
    pub int_feas_tol: f64,

    // === Solver settings ===
    /// Settings for every LP relaxation (root and nodes).
    pub lp: SimplexSettings,

    // === Output ===
    /// Log node outcomes and incumbent updates.
    pub verbose: bool,

    /// Log frequency (progress line every N evaluated nodes).
    pub log_freq: u64,
}

impl Default for MipSettings {
    fn default() -> Self {
        Self {
            workers: 5,
            int_feas_tol: 1e-7,
            lp: SimplexSettings::default(),
            verbose: false,
            log_freq: 100,
        }
    }
}

impl MipSettings {
    /// Create settings with verbose output enabled.
    pub fn verbose() -> Self {
        Self {
            verbose: true,
            log_freq: 1,
            ..Self::default()
        }
    }

    /// Defaults overridden by `SIMPLEX_MIP_WORKERS` and `SIMPLEX_MIP_VERBOSE`.
    ///
    /// The LP settings are read with [`SimplexSettings::from_env`].
    pub fn from_env() -> Self {
        let mut settings = Self {
            lp: SimplexSettings::from_env(),
            ..Self::default()
        };

        if let Some(workers) = env::var("SIMPLEX_MIP_WORKERS")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .filter(|&v| v > 0)
        {
            settings.workers = workers;
        }

        if let Ok(v) = env::var("SIMPLEX_MIP_VERBOSE") {
            settings.verbose = v != "0" && v.to_lowercase() != "false";
        }

        settings
    }

    /// Set the number of worker threads.
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Set the integer feasibility tolerance.
    pub fn with_int_feas_tol(mut self, tol: f64) -> Self {
        self.int_feas_tol = tol;
        self
    }

    /// Set the LP relaxation settings.
    pub fn with_lp(mut self, lp: SimplexSettings) -> Self {
        self.lp = lp;
        self
    }
}
