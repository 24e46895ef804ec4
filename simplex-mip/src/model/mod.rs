//! Solution and search-log types for the MILP solver.

mod retired;
mod solution;

pub use retired::{NodeClass, RetiredNode};
pub use solution::{Comparator, IncumbentTracker, MilpSolution, MilpStatus};
