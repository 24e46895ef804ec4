//! Problem data structures and validation.
//!
//! The engine works on LPs already brought to standard form:
//!
//! ```text
//! maximize / minimize   c^T x
//! subject to            A x = b
//!                       x >= 0
//! ```
//!
//! where the columns of A are the canonical decision variables followed by
//! the slack columns (coefficient +1 for a `<=` row, -1 for a `>=` row, none
//! for an equality row).

use std::fmt;

use serde::{Deserialize, Serialize};

/// Optimization direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sense {
    /// Maximize the objective.
    Maximize,
    /// Minimize the objective.
    Minimize,
}

impl Sense {
    /// Returns true for [`Sense::Maximize`].
    pub fn is_maximize(self) -> bool {
        matches!(self, Sense::Maximize)
    }

    /// Sign applied to the cost vector to obtain the tableau objective row.
    ///
    /// The row is kept in `z - c^T x = 0` form for maximization, so costs are
    /// negated; a minimization is solved as the maximization of `-c^T x`.
    pub fn row_sign(self) -> f64 {
        match self {
            Sense::Maximize => -1.0,
            Sense::Minimize => 1.0,
        }
    }
}

impl fmt::Display for Sense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sense::Maximize => write!(f, "max"),
            Sense::Minimize => write!(f, "min"),
        }
    }
}

/// Linear program in standard form.
///
/// # Dimensions
///
/// - `m`: number of constraints (rows of `matrix`, length of `rhs`)
/// - `n`: number of columns (row length of `matrix`, length of `objective`)
/// - `num_vars`: canonical decision variables, the first `num_vars` columns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LpProblem {
    /// Dense constraint matrix, one `Vec` per row.
    pub matrix: Vec<Vec<f64>>,

    /// Right-hand side per row.
    pub rhs: Vec<f64>,

    /// Cost coefficient per column (slack columns are normally 0).
    pub objective: Vec<f64>,

    /// Optimization direction.
    pub sense: Sense,

    /// Number of canonical decision variables.
    pub num_vars: usize,
}

impl LpProblem {
    /// Create a problem from its parts.
    pub fn new(
        matrix: Vec<Vec<f64>>,
        rhs: Vec<f64>,
        objective: Vec<f64>,
        sense: Sense,
        num_vars: usize,
    ) -> Self {
        Self {
            matrix,
            rhs,
            objective,
            sense,
            num_vars,
        }
    }

    /// Number of constraint rows (m).
    pub fn num_rows(&self) -> usize {
        self.matrix.len()
    }

    /// Number of columns including slacks (n).
    pub fn num_cols(&self) -> usize {
        self.objective.len()
    }

    /// Validate dimensions.
    pub fn validate(&self) -> Result<(), String> {
        let m = self.num_rows();
        let n = self.num_cols();

        if m == 0 {
            return Err("problem has no constraint rows".to_string());
        }
        if n == 0 {
            return Err("problem has no columns".to_string());
        }
        if self.rhs.len() != m {
            return Err(format!("rhs has length {}, expected {}", self.rhs.len(), m));
        }
        for (i, row) in self.matrix.iter().enumerate() {
            if row.len() != n {
                return Err(format!("row {} has {} entries, expected {}", i, row.len(), n));
            }
        }
        if self.num_vars > n {
            return Err(format!(
                "num_vars is {}, but the problem only has {} columns",
                self.num_vars, n
            ));
        }
        let non_finite = self
            .matrix
            .iter()
            .flatten()
            .chain(&self.rhs)
            .chain(&self.objective)
            .any(|v| !v.is_finite());
        if non_finite {
            return Err("problem data contains NaN or infinite values".to_string());
        }

        Ok(())
    }
}
