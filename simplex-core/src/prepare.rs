//! Detection of rows that need an artificial variable.
//!
//! A row whose slack column has a negative coefficient is a `>=` constraint,
//! and a row with no `1` among the slack columns is an equality. Neither
//! offers a slack that can start in the basis, so both get an artificial
//! column and the solve runs in two phases.

use serde::{Deserialize, Serialize};

/// Outcome of row classification.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preparation {
    /// Rows that receive an artificial column, in ascending order.
    pub artificial_rows: Vec<usize>,

    /// Whether phase one has to run before the real objective.
    pub needs_two_phase: bool,
}

impl Preparation {
    /// Number of artificial columns to append.
    pub fn num_artificial(&self) -> usize {
        self.artificial_rows.len()
    }
}

/// Classify the rows of a standard-form matrix.
///
/// Columns at or after `num_vars` are slack columns.
pub fn prepare(matrix: &[Vec<f64>], num_vars: usize) -> Preparation {
    let mut prep = Preparation::default();

    for (i, row) in matrix.iter().enumerate() {
        let slacks = row.get(num_vars..).unwrap_or(&[]);
        let has_surplus = slacks.iter().any(|&a| a < 0.0);
        let has_unit_slack = slacks.iter().any(|&a| a == 1.0);

        if has_surplus || !has_unit_slack {
            prep.artificial_rows.push(i);
            prep.needs_two_phase = true;
        }
    }

    prep
}

/// Append one artificial column per flagged row.
///
/// The new column holds 1 in its row and 0 elsewhere; its objective entry is 0.
pub fn add_artificial_columns(
    matrix: &mut [Vec<f64>],
    objective: &mut Vec<f64>,
    prep: &Preparation,
) {
    for &flagged in &prep.artificial_rows {
        for (i, row) in matrix.iter_mut().enumerate() {
            row.push(if i == flagged { 1.0 } else { 0.0 });
        }
        objective.push(0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_slack_rows() {
        // x + y + s1 = 4, x + s2 = 2
        let a = vec![vec![1.0, 1.0, 1.0, 0.0], vec![1.0, 0.0, 0.0, 1.0]];
        let prep = prepare(&a, 2);
        assert!(!prep.needs_two_phase);
        assert!(prep.artificial_rows.is_empty());
        assert_eq!(prep.num_artificial(), 0);
    }

    #[test]
    fn test_surplus_and_equality_rows() {
        // row 0: <=, row 1: >=, row 2: equality
        let a = vec![
            vec![1.0, 1.0, 1.0, 0.0],
            vec![1.0, 0.0, 0.0, -1.0],
            vec![0.0, 1.0, 0.0, 0.0],
        ];
        let prep = prepare(&a, 2);
        assert!(prep.needs_two_phase);
        assert_eq!(prep.artificial_rows, vec![1, 2]);
    }

    #[test]
    fn test_canonical_ones_do_not_count_as_slack() {
        // A 1 in a canonical column is not a slack.
        let a = vec![vec![1.0, 1.0, 0.0]];
        let prep = prepare(&a, 2);
        assert_eq!(prep.artificial_rows, vec![0]);
    }

    #[test]
    fn test_add_artificial_columns() {
        let mut a = vec![vec![1.0, 1.0], vec![2.0, -1.0], vec![0.0, 0.0]];
        let mut c = vec![3.0, 0.0];
        let prep = Preparation {
            artificial_rows: vec![1, 2],
            needs_two_phase: true,
        };

        add_artificial_columns(&mut a, &mut c, &prep);

        assert_eq!(a[0], vec![1.0, 1.0, 0.0, 0.0]);
        assert_eq!(a[1], vec![2.0, -1.0, 1.0, 0.0]);
        assert_eq!(a[2], vec![0.0, 0.0, 0.0, 1.0]);
        assert_eq!(c, vec![3.0, 0.0, 0.0, 0.0]);
    }
}
