//! Sub-problem snapshots.
//!
//! Every node owns a private copy of the standard-form data it was built
//! from, *before* artificial columns are added. Solving a node clones the
//! snapshot into a fresh engine, so the snapshot itself is never mutated.

use std::fmt;

use serde::{Deserialize, Serialize};
use simplex_core::{
    add_artificial_columns, prepare, LpProblem, Preparation, Sense, SimplexEngine, SimplexResult,
    SimplexSettings,
};

/// Which side of a fractional value a child keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BranchSide {
    /// `x <= floor(v)`, new slack column `+1`.
    Down,
    /// `x >= floor(v) + 1`, new surplus column `-1`.
    Up,
}

/// The bound a branching step adds to a child.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BranchBound {
    /// Canonical variable index.
    pub var: usize,

    /// Direction of the bound.
    pub side: BranchSide,

    /// Right-hand side of the new row.
    pub bound: f64,
}

impl BranchBound {
    /// Create a "down" branch: x <= floor(value).
    pub fn down(var: usize, value: f64) -> Self {
        Self {
            var,
            side: BranchSide::Down,
            bound: value.floor(),
        }
    }

    /// Create an "up" branch: x >= floor(value) + 1.
    pub fn up(var: usize, value: f64) -> Self {
        Self {
            var,
            side: BranchSide::Up,
            bound: value.floor() + 1.0,
        }
    }

    /// Coefficient of the new slack column.
    pub fn slack_coefficient(&self) -> f64 {
        match self.side {
            BranchSide::Down => 1.0,
            BranchSide::Up => -1.0,
        }
    }
}

impl fmt::Display for BranchBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.side {
            BranchSide::Down => write!(f, "x{} <= {}", self.var + 1, self.bound),
            BranchSide::Up => write!(f, "x{} >= {}", self.var + 1, self.bound),
        }
    }
}

/// A node of the search tree together with its LP data.
#[derive(Debug, Clone)]
pub struct SubProblem {
    /// Unique node identifier.
    pub id: u64,

    /// Parent node ID (None for root).
    pub parent_id: Option<u64>,

    /// Depth in the tree (0 for root).
    pub depth: usize,

    /// Bound added when this node was created (None for root).
    pub branch: Option<BranchBound>,

    matrix: Vec<Vec<f64>>,
    rhs: Vec<f64>,
    objective: Vec<f64>,
    preparation: Preparation,
}

impl SubProblem {
    /// Snapshot of the root problem. The root always has id 1.
    pub fn root(problem: &LpProblem) -> Self {
        Self {
            id: 1,
            parent_id: None,
            depth: 0,
            branch: None,
            preparation: prepare(&problem.matrix, problem.num_vars),
            matrix: problem.matrix.clone(),
            rhs: problem.rhs.clone(),
            objective: problem.objective.clone(),
        }
    }

    /// Create a child node with one extra row and slack column.
    ///
    /// The child's data is copied from this snapshot; `self` is untouched.
    pub fn child(&self, id: u64, branch: BranchBound, num_vars: usize) -> Self {
        let cols = self.objective.len();

        let mut matrix: Vec<Vec<f64>> = self
            .matrix
            .iter()
            .map(|row| {
                let mut row = row.clone();
                row.push(0.0);
                row
            })
            .collect();

        let mut new_row = vec![0.0; cols + 1];
        new_row[branch.var] = 1.0;
        new_row[cols] = branch.slack_coefficient();
        matrix.push(new_row);

        let mut rhs = self.rhs.clone();
        rhs.push(branch.bound);

        let mut objective = self.objective.clone();
        objective.push(0.0);

        Self {
            id,
            parent_id: Some(self.id),
            depth: self.depth + 1,
            branch: Some(branch),
            preparation: prepare(&matrix, num_vars),
            matrix,
            rhs,
            objective,
        }
    }

    /// Rows and columns of the snapshot (without artificial columns).
    pub fn shape(&self) -> (usize, usize) {
        (self.matrix.len(), self.objective.len())
    }

    /// Rows that receive an artificial column when this node is solved.
    pub fn preparation(&self) -> &Preparation {
        &self.preparation
    }

    /// Build a fresh engine over a copy of this snapshot.
    pub fn engine(
        &self,
        sense: Sense,
        num_vars: usize,
        settings: &SimplexSettings,
    ) -> SimplexResult<SimplexEngine> {
        let mut matrix = self.matrix.clone();
        let mut objective = self.objective.clone();
        add_artificial_columns(&mut matrix, &mut objective, &self.preparation);

        SimplexEngine::new(
            matrix,
            self.rhs.clone(),
            objective,
            sense,
            &self.preparation,
            num_vars,
            settings.clone(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use simplex_core::{LpStatus, SilentReporter};

    // max 5x + 4y  s.t.  6x + 4y <= 24, x + 2y <= 6
    fn problem() -> LpProblem {
        LpProblem::new(
            vec![vec![6.0, 4.0, 1.0, 0.0], vec![1.0, 2.0, 0.0, 1.0]],
            vec![24.0, 6.0],
            vec![5.0, 4.0, 0.0, 0.0],
            Sense::Maximize,
            2,
        )
    }

    #[test]
    fn test_root_node() {
        let root = SubProblem::root(&problem());
        assert_eq!(root.id, 1);
        assert!(root.parent_id.is_none());
        assert_eq!(root.depth, 0);
        assert!(root.branch.is_none());
        assert_eq!(root.shape(), (2, 4));
        assert!(!root.preparation().needs_two_phase);
    }

    #[test]
    fn test_bound_values() {
        let down = BranchBound::down(0, 2.7);
        assert_eq!(down.bound, 2.0);
        assert_eq!(down.slack_coefficient(), 1.0);
        assert_eq!(down.to_string(), "x1 <= 2");

        let up = BranchBound::up(1, 2.7);
        assert_eq!(up.bound, 3.0);
        assert_eq!(up.slack_coefficient(), -1.0);
        assert_eq!(up.to_string(), "x2 >= 3");
    }

    #[test]
    fn test_child_appends_row_and_column() {
        let root = SubProblem::root(&problem());
        let down = root.child(2, BranchBound::down(1, 1.5), 2);
        let up = root.child(3, BranchBound::up(1, 1.5), 2);

        assert_eq!(down.parent_id, Some(1));
        assert_eq!(down.depth, 1);
        assert_eq!(down.shape(), (3, 5));
        assert_eq!(down.matrix[2], vec![0.0, 1.0, 0.0, 0.0, 1.0]);
        assert_eq!(down.rhs[2], 1.0);
        assert_eq!(down.matrix[0][4], 0.0);
        assert!(!down.preparation().needs_two_phase);

        assert_eq!(up.matrix[2], vec![0.0, 1.0, 0.0, 0.0, -1.0]);
        assert_eq!(up.rhs[2], 2.0);
        assert_eq!(up.preparation().artificial_rows, vec![2]);

        // parent snapshot unchanged
        assert_eq!(root.shape(), (2, 4));
    }

    #[test]
    fn test_engine_does_not_touch_snapshot() {
        let root = SubProblem::root(&problem());
        let up = root.child(3, BranchBound::up(1, 1.5), 2);

        let engine = up
            .engine(Sense::Maximize, 2, &SimplexSettings::default())
            .unwrap();
        assert_eq!(engine.tableau().num_cols(), 6);
        assert_eq!(up.shape(), (3, 5));

        // y >= 2 leaves x <= 2 through x + 2y <= 6
        let sol = engine.solve(&SilentReporter);
        assert_eq!(sol.status, LpStatus::Optimal);
        assert!((sol.objective_value - 18.0).abs() < 1e-9);
    }
}
