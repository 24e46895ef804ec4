//! Configuration settings for the simplex engine.

use std::env;

/// Simplex solver settings.
#[derive(Debug, Clone)]
pub struct SimplexSettings {
    /// Maximum pivots per phase before giving up with `IterationLimit`.
    pub max_iter: usize,

    /// Optimality tolerance: reduced costs are rounded up at this
    /// resolution before the `>= 0` test.
    pub optimality_tol: f64,

    /// Resolution at which the phase-one objective is rounded toward zero
    /// when deciding feasibility.
    pub phase_one_tol: f64,

    /// A basic value below `-feasibility_tol` marks the problem infeasible.
    pub feasibility_tol: f64,

    /// Smallest column entry the ratio test accepts as a pivot. A column
    /// with no entry above it is unbounded.
    pub pivot_tol: f64,

    /// Emit the per-iteration tableau trace through `log`.
    pub verbose: bool,
}

impl Default for SimplexSettings {
    fn default() -> Self {
        Self {
            max_iter: 10_000,
            optimality_tol: 1e-10,
            phase_one_tol: 1e-5,
            feasibility_tol: 1e-9,
            pivot_tol: 1e-9,
            verbose: false,
        }
    }
}

impl SimplexSettings {
    /// Create settings with verbose output enabled.
    pub fn verbose() -> Self {
        Self {
            verbose: true,
            ..Self::default()
        }
    }

    /// Defaults overridden by `SIMPLEX_VERBOSE` and `SIMPLEX_MAX_ITER`.
    pub fn from_env() -> Self {
        let mut settings = Self::default();

        if let Ok(v) = env::var("SIMPLEX_VERBOSE") {
            settings.verbose = v != "0" && v.to_lowercase() != "false";
        }

        if let Some(max_iter) = env::var("SIMPLEX_MAX_ITER")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .filter(|&v| v > 0)
        {
            settings.max_iter = max_iter;
        }

        settings
    }

    /// Set the iteration cap.
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Set the optimality tolerance.
    pub fn with_optimality_tol(mut self, tol: f64) -> Self {
        self.optimality_tol = tol;
        self
    }

    /// Set the pivot tolerance.
    pub fn with_pivot_tol(mut self, tol: f64) -> Self {
        self.pivot_tol = tol;
        self
    }
}
