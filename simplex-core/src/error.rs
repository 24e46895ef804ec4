//! Error types for the simplex engine.

use thiserror::Error;

/// Errors that abort a solve attempt.
///
/// Infeasibility and unboundedness are not errors; they are reported through
/// [`LpStatus`](crate::LpStatus).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimplexError {
    /// Problem dimensions are inconsistent or empty.
    #[error("Invalid problem: {0}")]
    InvalidProblem(String),

    /// Fewer basic columns could be seeded than there are constraint rows.
    #[error("Insufficient basis: found {found} basic columns for {required} rows, check the input")]
    InsufficientBasis {
        /// Basic columns found while seeding.
        found: usize,
        /// Number of constraint rows.
        required: usize,
    },

    /// Two rows were seeded with the same basic column.
    #[error("Column {column} is basic in more than one row")]
    DuplicateBasis {
        /// Offending column index.
        column: usize,
    },
}

/// Result type for simplex operations.
pub type SimplexResult<T> = Result<T, SimplexError>;
