//! LP solve status and result.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::tableau::BasisEntry;

/// Terminal status of a simplex run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LpStatus {
    /// Optimal basis found.
    Optimal,

    /// The ratio test found no leaving row.
    Unbounded,

    /// Phase one did not reach zero, or a basic value went negative.
    Infeasible,

    /// Pivot cap reached before any terminal condition.
    IterationLimit,
}

impl LpStatus {
    /// Returns true if the solution values are meaningful.
    pub fn is_optimal(&self) -> bool {
        matches!(self, LpStatus::Optimal)
    }
}

impl fmt::Display for LpStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LpStatus::Optimal => write!(f, "Optimal"),
            LpStatus::Unbounded => write!(f, "Unbounded"),
            LpStatus::Infeasible => write!(f, "Infeasible"),
            LpStatus::IterationLimit => write!(f, "Iteration Limit"),
        }
    }
}

/// Result of one LP solve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LpSolution {
    /// Solve status.
    pub status: LpStatus,

    /// Objective value in the caller's sense (meaningful when optimal).
    pub objective_value: f64,

    /// Final basis, one entry per constraint row.
    pub basis: Vec<BasisEntry>,

    /// Values of the canonical decision variables.
    pub x: Vec<f64>,

    /// Pivots performed across both phases.
    pub iterations: usize,
}
