//! Branching variable selection.

use simplex_core::util::is_integral;

use super::BranchBound;

/// A branching decision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BranchDecision {
    /// Variable to branch on.
    pub var: usize,

    /// Current (fractional) value.
    pub value: f64,

    /// Bound for the "down" child (x <= floor(value)).
    pub down_branch: BranchBound,

    /// Bound for the "up" child (x >= floor(value) + 1).
    pub up_branch: BranchBound,
}

impl BranchDecision {
    /// Branch on `var` at its current `value`.
    pub fn new(var: usize, value: f64) -> Self {
        Self {
            var,
            value,
            down_branch: BranchBound::down(var, value),
            up_branch: BranchBound::up(var, value),
        }
    }
}

/// Pick the first canonical variable that is not integral within `tol`.
///
/// Returns `None` when the assignment is integer feasible.
pub fn select_branching(x: &[f64], tol: f64) -> Option<BranchDecision> {
    x.iter()
        .position(|&v| !is_integral(v, tol))
        .map(|var| BranchDecision::new(var, x[var]))
}
