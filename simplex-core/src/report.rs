//! Reporting strategies for the simplex engine.
//!
//! The engine calls a [`Reporter`] at fixed points of the algorithm. The
//! pivoting logic never depends on which reporter is installed.

use log::{debug, info, Level};

use crate::engine::Phase;
use crate::solution::{LpSolution, LpStatus};
use crate::tableau::Tableau;

/// Observer of simplex progress. Every hook defaults to a no-op.
pub trait Reporter {
    /// A phase is about to iterate from this tableau.
    fn phase_started(&self, _phase: Phase, _tableau: &Tableau) {}

    /// A pivot was performed.
    fn iteration(&self, _phase: Phase, _iteration: usize, _tableau: &Tableau, _objective: f64) {}

    /// Phase one finished with the given rounded auxiliary value.
    fn phase_one_finished(&self, _feasible: bool, _auxiliary_value: f64) {}

    /// The solve is complete.
    fn finished(&self, _tableau: &Tableau, _solution: &LpSolution) {}
}

/// Reporter that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentReporter;

impl Reporter for SilentReporter {}

/// Reporter that traces the tableau through the `log` facade.
///
/// Tableaux go out at `debug`, verdicts at `info`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogReporter;

impl LogReporter {
    fn enabled(&self) -> bool {
        log::log_enabled!(Level::Debug)
    }
}

impl Reporter for LogReporter {
    fn phase_started(&self, phase: Phase, tableau: &Tableau) {
        if phase == Phase::One {
            info!("two-phase method required, starting phase one");
        }
        if self.enabled() {
            debug!("initial tableau for {}:\n{}", phase, tableau);
        }
    }

    fn iteration(&self, phase: Phase, iteration: usize, tableau: &Tableau, objective: f64) {
        if !self.enabled() {
            return;
        }
        if phase == Phase::One {
            debug!(
                "{} iteration {}: auxiliary objective {}, objective {}\n{}",
                phase,
                iteration,
                tableau.auxiliary_value(),
                objective,
                tableau
            );
        } else {
            debug!("{} iteration {}: objective {}\n{}", phase, iteration, objective, tableau);
        }
    }

    fn phase_one_finished(&self, feasible: bool, auxiliary_value: f64) {
        if feasible {
            info!("end of phase one (auxiliary objective {}), starting phase two", auxiliary_value);
        } else {
            info!("end of phase one: auxiliary objective {} is not zero, problem has no solution", auxiliary_value);
        }
    }

    fn finished(&self, tableau: &Tableau, solution: &LpSolution) {
        match solution.status {
            LpStatus::Optimal => {
                if self.enabled() {
                    debug!("final tableau:\n{}", tableau);
                }
                info!(
                    "optimal value {} after {} iterations",
                    solution.objective_value, solution.iterations
                );
            }
            LpStatus::Unbounded => info!("unbounded solution"),
            LpStatus::Infeasible => info!("problem has no solution"),
            LpStatus::IterationLimit => {
                info!("stopped after {} iterations without reaching optimality", solution.iterations)
            }
        }
    }
}

/// Reporter matching a verbosity flag.
pub fn reporter_for(verbose: bool) -> &'static dyn Reporter {
    if verbose {
        &LogReporter
    } else {
        &SilentReporter
    }
}
