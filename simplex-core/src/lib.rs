//! Dense tableau simplex with a two-phase start.
//!
//! This crate solves linear programs given in standard form, where every
//! constraint row already carries its slack column:
//!
//! ```text
//! maximize / minimize   c^T x
//! subject to            A x = b,  x >= 0
//! ```
//!
//! # Algorithm
//!
//! - Rows with a surplus column (`>=`) or without any slack (`=`) receive an
//!   artificial variable ([`prepare`]), and the solve starts with **phase
//!   one**, which minimizes the sum of artificials.
//! - Once phase one reaches zero the artificial columns are dropped and
//!   **phase two** pivots on the real objective.
//! - Entering column: most negative reduced cost. Leaving row: minimum ratio.
//!   Both scans keep the *last* candidate on ties.
//!
//! # Example
//!
//! ```
//! use simplex_core::{solve_lp, LpProblem, LpStatus, Sense, SimplexSettings};
//!
//! // max 3x + 5y  s.t.  x <= 4, 2y <= 12, 3x + 2y <= 18
//! let prob = LpProblem::new(
//!     vec![
//!         vec![1.0, 0.0, 1.0, 0.0, 0.0],
//!         vec![0.0, 2.0, 0.0, 1.0, 0.0],
//!         vec![3.0, 2.0, 0.0, 0.0, 1.0],
//!     ],
//!     vec![4.0, 12.0, 18.0],
//!     vec![3.0, 5.0, 0.0, 0.0, 0.0],
//!     Sense::Maximize,
//!     2,
//! );
//!
//! let sol = solve_lp(&prob, &SimplexSettings::default())?;
//! assert_eq!(sol.status, LpStatus::Optimal);
//! assert!((sol.objective_value - 36.0).abs() < 1e-9);
//! # Ok::<(), simplex_core::SimplexError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::too_many_arguments)]

pub mod engine;
pub mod error;
pub mod prepare;
pub mod problem;
pub mod report;
pub mod settings;
pub mod solution;
pub mod tableau;
pub mod util;

pub use engine::{Phase, SimplexEngine};
pub use error::{SimplexError, SimplexResult};
pub use prepare::{add_artificial_columns, prepare, Preparation};
pub use problem::{LpProblem, Sense};
pub use report::{reporter_for, LogReporter, Reporter, SilentReporter};
pub use settings::SimplexSettings;
pub use solution::{LpSolution, LpStatus};
pub use tableau::{BasisEntry, Tableau};

/// Solve one LP relaxation.
///
/// Infeasible and unbounded problems are reported through
/// [`LpSolution::status`]; an `Err` means the input could not be turned into
/// a tableau with a full starting basis.
pub fn solve_lp(problem: &LpProblem, settings: &SimplexSettings) -> SimplexResult<LpSolution> {
    let engine = SimplexEngine::from_problem(problem, settings.clone())?;
    Ok(engine.solve(reporter_for(settings.verbose)))
}
