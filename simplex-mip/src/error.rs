//! Error types for the MILP solver.

use simplex_core::SimplexError;
use thiserror::Error;

/// Errors that can occur during MILP solving.
///
/// Infeasible or unbounded problems are not errors; they are reported
/// through [`crate::MilpStatus`].
#[derive(Error, Debug)]
pub enum MipError {
    /// Problem validation failed
    #[error("Invalid problem: {0}")]
    InvalidProblem(String),

    /// The root relaxation could not be set up
    #[error("Simplex error: {0}")]
    Simplex(#[from] SimplexError),

    /// Internal solver error (worker spawn failure or worker panic)
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Result type for MILP operations.
pub type MipResult<T> = Result<T, MipError>;
