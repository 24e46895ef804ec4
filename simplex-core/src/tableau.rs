//! Dense simplex tableau and its pivoting rules.
//!
//! The objective rows are stored in `z - c^T x = 0` form, so the tableau is
//! optimal once no reduced cost is negative. During phase one an auxiliary
//! row drives the search while the real row is carried along through every
//! pivot.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{SimplexError, SimplexResult};
use crate::util::ceil_at;

/// Basic variable of one constraint row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BasisEntry {
    /// Column index of the basic variable.
    pub column: usize,

    /// Current value of the basic variable (the row's RHS).
    pub value: f64,
}

/// Mutable tableau state of one LP.
#[derive(Debug, Clone)]
pub struct Tableau {
    /// Constraint coefficients (m × n).
    a: Vec<Vec<f64>>,

    /// Right-hand side (m).
    b: Vec<f64>,

    /// Real objective row (n).
    c: Vec<f64>,

    /// Auxiliary objective row, present only during phase one.
    c_aux: Option<Vec<f64>>,

    /// One entry per row.
    basis: Vec<BasisEntry>,

    /// Running value of the real objective (maximization form).
    obj_value: f64,

    /// Running value of the auxiliary objective.
    aux_value: f64,
}

impl Tableau {
    /// Build a tableau with an empty basis.
    ///
    /// `c` must already be the objective row (see [`Sense::row_sign`](crate::Sense::row_sign)).
    pub fn new(a: Vec<Vec<f64>>, b: Vec<f64>, c: Vec<f64>) -> Self {
        Self {
            a,
            b,
            c,
            c_aux: None,
            basis: Vec::new(),
            obj_value: 0.0,
            aux_value: 0.0,
        }
    }

    /// Number of constraint rows.
    pub fn num_rows(&self) -> usize {
        self.a.len()
    }

    /// Number of columns currently in the tableau.
    pub fn num_cols(&self) -> usize {
        self.c.len()
    }

    /// Current basis, one entry per row.
    pub fn basis(&self) -> &[BasisEntry] {
        &self.basis
    }

    /// Constraint rows.
    pub fn rows(&self) -> &[Vec<f64>] {
        &self.a
    }

    /// Right-hand side.
    pub fn rhs(&self) -> &[f64] {
        &self.b
    }

    /// Real objective row.
    pub fn objective(&self) -> &[f64] {
        &self.c
    }

    /// Auxiliary objective row, if phase one is active.
    pub fn auxiliary(&self) -> Option<&[f64]> {
        self.c_aux.as_deref()
    }

    /// Running objective value in maximization form.
    pub fn objective_value(&self) -> f64 {
        self.obj_value
    }

    /// Running phase-one objective value.
    pub fn auxiliary_value(&self) -> f64 {
        self.aux_value
    }

    /// The row that currently selects pivots.
    fn active_objective(&self) -> &[f64] {
        self.c_aux.as_deref().unwrap_or(&self.c)
    }

    /// Seed the basis with zero-cost columns at or after `num_vars`,
    /// assigned to rows in order.
    pub fn seed_basis_from_objective(&mut self, num_vars: usize) -> SimplexResult<()> {
        let m = self.num_rows();
        let columns: Vec<usize> = (num_vars..self.num_cols())
            .filter(|&j| self.c[j] == 0.0)
            .take(m)
            .collect();

        if columns.len() < m {
            return Err(SimplexError::InsufficientBasis {
                found: columns.len(),
                required: m,
            });
        }

        self.basis = columns
            .into_iter()
            .zip(&self.b)
            .map(|(column, &value)| BasisEntry { column, value })
            .collect();

        Ok(())
    }

    /// Seed the basis with the first unit slack or artificial entry of
    /// every row.
    pub fn seed_basis_from_unit_columns(&mut self, num_vars: usize) -> SimplexResult<()> {
        let m = self.num_rows();
        let n = self.num_cols();
        let mut basis = Vec::with_capacity(m);

        for (row, &value) in self.a.iter().zip(&self.b) {
            if let Some(column) = (num_vars..n).find(|&j| row[j] == 1.0) {
                if basis.iter().any(|e: &BasisEntry| e.column == column) {
                    return Err(SimplexError::DuplicateBasis { column });
                }
                basis.push(BasisEntry { column, value });
            }
        }

        if basis.len() < m {
            return Err(SimplexError::InsufficientBasis {
                found: basis.len(),
                required: m,
            });
        }

        self.basis = basis;
        Ok(())
    }

    /// Install the phase-one objective and bring it to canonical form.
    ///
    /// Artificial columns are the last `num_artificial` columns and cost 1;
    /// every row in `artificial_rows` is subtracted from the auxiliary row.
    pub fn start_phase_one(&mut self, num_artificial: usize, artificial_rows: &[usize]) {
        let n = self.num_cols();
        let mut aux = vec![0.0; n - num_artificial];
        aux.resize(n, 1.0);

        for &r in artificial_rows {
            for (v, &a) in aux.iter_mut().zip(&self.a[r]) {
                *v -= a;
            }
            self.aux_value -= self.b[r];
        }

        self.c_aux = Some(aux);
    }

    /// Leave phase one: drop the auxiliary row and the trailing
    /// `num_artificial` columns.
    ///
    /// An artificial still basic at (near) zero is first pivoted out on the
    /// first real column of its row with an entry above `pivot_tol`.
    /// Otherwise phase two could move it off zero once its column is gone.
    /// A row with no such entry is redundant and keeps its artificial.
    pub fn drop_artificial(&mut self, num_artificial: usize, pivot_tol: f64) {
        let n = self.num_cols() - num_artificial;

        for row in 0..self.basis.len() {
            if self.basis[row].column < n {
                continue;
            }
            if let Some(col) = (0..n).find(|&j| self.a[row][j].abs() > pivot_tol) {
                // the leaving value is near zero; the feasibility check does not apply
                self.pivot(row, col, f64::INFINITY);
            }
        }

        self.c_aux = None;
        self.c.truncate(n);
        for row in &mut self.a {
            row.truncate(n);
        }
    }

    /// True when every reduced cost of the active row, rounded up at `tol`,
    /// is nonnegative.
    pub fn is_optimal(&self, tol: f64) -> bool {
        self.active_objective().iter().all(|&c| ceil_at(c, tol) >= 0.0)
    }

    /// Column with the most negative reduced cost.
    ///
    /// Ties go to the last such column scanned (`<=` comparison).
    pub fn entering_column(&self) -> usize {
        let obj = self.active_objective();
        let mut best = 0;
        let mut min = obj[0];

        for (j, &c) in obj.iter().enumerate().skip(1) {
            if c <= min {
                min = c;
                best = j;
            }
        }

        best
    }

    /// Minimum-ratio row for `col`, or `None` if no row has a coefficient
    /// above `pivot_tol` there (unbounded).
    ///
    /// Ties go to the last such row scanned (`<=` comparison).
    pub fn leaving_row(&self, col: usize, pivot_tol: f64) -> Option<usize> {
        let mut best = None;
        let mut min = f64::MAX;

        for (i, (row, &b)) in self.a.iter().zip(&self.b).enumerate() {
            let coef = row[col];
            if coef > pivot_tol {
                let ratio = b / coef;
                if ratio <= min {
                    min = ratio;
                    best = Some(i);
                }
            }
        }

        best
    }

    /// Exchange the basic variable of `row` for column `col`.
    ///
    /// Returns false when a basic value drops below `-feasibility_tol`, which
    /// marks the problem infeasible.
    pub fn pivot(&mut self, row: usize, col: usize, feasibility_tol: f64) -> bool {
        let pivot = self.a[row][col];
        let step = self.b[row] / pivot;

        if let Some(aux) = &self.c_aux {
            self.aux_value -= aux[col] * step;
        }
        self.obj_value -= self.c[col] * step;

        let mut pivot_row = std::mem::take(&mut self.a[row]);
        if (pivot - 1.0).abs() > f64::EPSILON {
            for v in &mut pivot_row {
                *v /= pivot;
            }
        }
        self.b[row] /= pivot;
        let pivot_rhs = self.b[row];
        self.basis[row] = BasisEntry {
            column: col,
            value: pivot_rhs,
        };

        let mut feasible = true;
        for i in 0..self.a.len() {
            if i == row {
                continue;
            }

            let mult = self.a[i][col];
            if mult == 0.0 {
                if self.b[i] < -feasibility_tol {
                    feasible = false;
                }
                continue;
            }

            self.b[i] -= mult * pivot_rhs;
            if self.b[i] < -feasibility_tol {
                feasible = false;
            }
            self.basis[i].value = self.b[i];

            for (v, &p) in self.a[i].iter_mut().zip(&pivot_row) {
                *v -= mult * p;
            }
        }

        eliminate(&mut self.c, col, &pivot_row);
        if let Some(aux) = self.c_aux.as_mut() {
            eliminate(aux, col, &pivot_row);
        }

        self.a[row] = pivot_row;
        feasible
    }

    /// Values of the first `num_vars` columns read off the basis.
    /// Non-basic variables are 0.
    pub fn canonical_solution(&self, num_vars: usize) -> Vec<f64> {
        let mut x = vec![0.0; num_vars];
        for entry in &self.basis {
            if entry.column < num_vars {
                x[entry.column] = entry.value;
            }
        }
        x
    }
}

/// `obj -= obj[col] * pivot_row`, skipped when the multiplier is zero.
fn eliminate(obj: &mut [f64], col: usize, pivot_row: &[f64]) {
    let mult = obj[col];
    if mult == 0.0 {
        return;
    }
    for (v, &p) in obj.iter_mut().zip(pivot_row) {
        *v -= mult * p;
    }
}

fn write_row(f: &mut fmt::Formatter<'_>, values: &[f64]) -> fmt::Result {
    for v in values {
        write!(f, "{} | ", v)?;
    }
    writeln!(f)
}

impl fmt::Display for Tableau {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "A:")?;
        for row in &self.a {
            write_row(f, row)?;
        }
        writeln!(f, "B:")?;
        write_row(f, &self.b)?;
        writeln!(f, "C:")?;
        write_row(f, &self.c)?;
        if let Some(aux) = &self.c_aux {
            writeln!(f, "C auxiliary:")?;
            write_row(f, aux)?;
        }
        writeln!(f, "Basis:")?;
        for entry in &self.basis {
            writeln!(f, "x{} = {}", entry.column + 1, entry.value)?;
        }
        Ok(())
    }
}
