//! MILP solution types.

use std::fmt;

use serde::{Deserialize, Serialize};
use simplex_core::util::is_integral;
use simplex_core::Sense;

use super::RetiredNode;

/// Status of the MILP solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MilpStatus {
    /// Best integral solution found; the tree was searched to exhaustion.
    Optimal,

    /// The root relaxation is infeasible, or no node produced an integral
    /// solution.
    Infeasible,

    /// The root relaxation is unbounded.
    Unbounded,
}

impl MilpStatus {
    /// Returns true if a feasible solution was found.
    pub fn has_solution(&self) -> bool {
        matches!(self, MilpStatus::Optimal)
    }
}

impl fmt::Display for MilpStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MilpStatus::Optimal => write!(f, "Optimal"),
            MilpStatus::Infeasible => write!(f, "Infeasible"),
            MilpStatus::Unbounded => write!(f, "Unbounded"),
        }
    }
}

/// Complete MILP solution with the search log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MilpSolution {
    /// Solve status.
    pub status: MilpStatus,

    /// Objective value of the best integral solution.
    pub objective_value: Option<f64>,

    /// Best integral assignment of the canonical variables (empty without one).
    pub x: Vec<f64>,

    /// Every retired node, sorted by id.
    pub search_log: Vec<RetiredNode>,

    /// Number of LP relaxations attempted, root included.
    pub nodes_evaluated: u64,

    /// Number of times incumbent was updated.
    pub incumbent_updates: u64,

    /// Accepted incumbent values in acceptance order.
    pub incumbent_trace: Vec<f64>,
}

impl Default for MilpSolution {
    fn default() -> Self {
        Self {
            status: MilpStatus::Infeasible,
            objective_value: None,
            x: Vec::new(),
            search_log: Vec::new(),
            nodes_evaluated: 0,
            incumbent_updates: 0,
            incumbent_trace: Vec::new(),
        }
    }
}

impl MilpSolution {
    /// Create a solution without an integral assignment.
    pub fn without_solution(status: MilpStatus, search_log: Vec<RetiredNode>) -> Self {
        Self {
            status,
            nodes_evaluated: search_log.len() as u64,
            search_log,
            ..Default::default()
        }
    }
}

/// The pair of incumbent comparisons, fixed once per search.
///
/// `should_update(incumbent, value)` is inclusive, `should_prune(value,
/// incumbent)` is exclusive.
#[derive(Debug, Clone, Copy)]
pub struct Comparator {
    sense: Sense,
    update: fn(f64, f64) -> bool,
    prune: fn(f64, f64) -> bool,
}

impl Comparator {
    /// Comparator for the optimization direction.
    pub fn new(sense: Sense) -> Self {
        match sense {
            Sense::Maximize => Self {
                sense,
                update: |incumbent, value| incumbent <= value,
                prune: |value, incumbent| value < incumbent,
            },
            Sense::Minimize => Self {
                sense,
                update: |incumbent, value| incumbent >= value,
                prune: |value, incumbent| value > incumbent,
            },
        }
    }

    /// Optimization direction.
    pub fn sense(&self) -> Sense {
        self.sense
    }

    /// An integral solution with `value` may replace `incumbent`.
    #[inline]
    pub fn should_update(&self, incumbent: f64, value: f64) -> bool {
        (self.update)(incumbent, value)
    }

    /// A node with relaxation `value` cannot beat `incumbent`.
    #[inline]
    pub fn should_prune(&self, value: f64, incumbent: f64) -> bool {
        (self.prune)(value, incumbent)
    }

    /// Starting incumbent value that every feasible value improves on.
    pub fn worst(&self) -> f64 {
        match self.sense {
            Sense::Maximize => f64::NEG_INFINITY,
            Sense::Minimize => f64::INFINITY,
        }
    }
}

/// Tracks the best known integral solution (incumbent).
#[derive(Debug, Clone)]
pub struct IncumbentTracker {
    /// Current best solution (if any).
    pub solution: Option<Vec<f64>>,

    /// Objective value of incumbent.
    /// Starts at the direction's worst value.
    pub obj_val: f64,

    /// Number of times incumbent was updated.
    pub update_count: u64,

    /// Accepted values, oldest first.
    pub trace: Vec<f64>,
}

impl IncumbentTracker {
    /// Create a tracker seeded with the comparator's worst value.
    pub fn new(comparator: &Comparator) -> Self {
        Self {
            solution: None,
            obj_val: comparator.worst(),
            update_count: 0,
            trace: Vec::new(),
        }
    }

    /// Check if we have an incumbent.
    pub fn has_incumbent(&self) -> bool {
        self.solution.is_some()
    }

    /// True when the incumbent value is a finite whole number.
    pub fn value_is_integral(&self, tol: f64) -> bool {
        is_integral(self.obj_val, tol)
    }

    /// Try to update incumbent with a new integral solution.
    ///
    /// Returns true if the incumbent was replaced.
    pub fn update(&mut self, x: &[f64], obj: f64, comparator: &Comparator) -> bool {
        if !comparator.should_update(self.obj_val, obj) {
            return false;
        }
        self.solution = Some(x.to_vec());
        self.obj_val = obj;
        self.update_count += 1;
        self.trace.push(obj);
        true
    }
}
