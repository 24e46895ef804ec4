//! Concurrent branch-and-bound for mixed-integer linear programs.
//!
//! The first `num_vars` columns of an [`LpProblem`] are the integer
//! variables. Each node of the search is an independent standard-form
//! snapshot that adds one bound row (with its own slack column) to its
//! parent; relaxations are solved with [`simplex_core`].
//!
//! # Example
//!
//! ```
//! use simplex_core::{LpProblem, Sense};
//! use simplex_mip::{solve_milp, MilpStatus, MipSettings};
//!
//! // max 5x + 4y  s.t.  6x + 4y <= 24, x + 2y <= 6, x, y integer
//! let prob = LpProblem::new(
//!     vec![vec![6.0, 4.0, 1.0, 0.0], vec![1.0, 2.0, 0.0, 1.0]],
//!     vec![24.0, 6.0],
//!     vec![5.0, 4.0, 0.0, 0.0],
//!     Sense::Maximize,
//!     2,
//! );
//!
//! let sol = solve_milp(&prob, &MipSettings::default())?;
//! assert_eq!(sol.status, MilpStatus::Optimal);
//! assert_eq!(sol.objective_value.map(f64::round), Some(20.0));
//! # Ok::<(), simplex_mip::MipError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod model;
pub mod search;
pub mod settings;

pub use error::{MipError, MipResult};
pub use model::{MilpSolution, MilpStatus, NodeClass, RetiredNode};
pub use search::{BranchAndBound, BranchBound, BranchSide};
pub use settings::MipSettings;

use simplex_core::LpProblem;

/// Solve a mixed-integer linear program.
///
/// Statuses other than `Optimal` are values, not errors. An `Err` means the
/// problem is malformed, the root relaxation could not be set up, or a
/// worker thread failed.
pub fn solve_milp(problem: &LpProblem, settings: &MipSettings) -> MipResult<MilpSolution> {
    problem.validate().map_err(MipError::InvalidProblem)?;
    BranchAndBound::new(problem, settings.clone()).solve()
}
