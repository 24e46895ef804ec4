//! Search log entries.

use std::fmt;

use serde::{Deserialize, Serialize};
use simplex_core::{BasisEntry, LpSolution, LpStatus};

use crate::search::{BranchBound, SubProblem};

/// Final classification of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeClass {
    /// Relaxation infeasible, unbounded or out of iterations.
    PrunedInfeasible,

    /// Relaxation cannot beat the incumbent, or an integral solution that
    /// lost the update comparison.
    PrunedWorse,

    /// Integral solution that became the incumbent.
    PrunedIntegerImproved,

    /// Fractional solution; two children were enqueued.
    Split,

    /// Engine construction failed; the branch was dropped.
    Abandoned,
}

impl fmt::Display for NodeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            NodeClass::PrunedInfeasible => "pruned: infeasible or unbounded",
            NodeClass::PrunedWorse => "pruned: worse than incumbent",
            NodeClass::PrunedIntegerImproved => "pruned: integral and improves incumbent",
            NodeClass::Split => "split",
            NodeClass::Abandoned => "abandoned",
        };
        f.write_str(s)
    }
}

/// A node whose classification is final.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetiredNode {
    /// Node identifier.
    pub id: u64,

    /// Parent node ID (None for root).
    pub parent_id: Option<u64>,

    /// Depth in the tree (0 for root).
    pub depth: usize,

    /// Bound that created this node (None for root).
    pub branch: Option<BranchBound>,

    /// Classification.
    pub class: NodeClass,

    /// Ids of the down and up children, for split nodes.
    pub children: Option<(u64, u64)>,

    /// Status of the relaxation (None when it was never solved).
    pub lp_status: Option<LpStatus>,

    /// Relaxation objective value in the caller's sense (None when it was
    /// never solved).
    pub objective_value: Option<f64>,

    /// Final basis of the relaxation.
    pub basis: Vec<BasisEntry>,

    /// Canonical assignment of the relaxation.
    pub x: Vec<f64>,
}

impl RetiredNode {
    /// Record an evaluated node.
    pub fn evaluated(node: &SubProblem, class: NodeClass, solution: LpSolution) -> Self {
        Self {
            id: node.id,
            parent_id: node.parent_id,
            depth: node.depth,
            branch: node.branch,
            class,
            children: None,
            lp_status: Some(solution.status),
            objective_value: Some(solution.objective_value),
            basis: solution.basis,
            x: solution.x,
        }
    }

    /// Record a node whose relaxation could not be set up.
    pub fn abandoned(node: &SubProblem) -> Self {
        Self {
            id: node.id,
            parent_id: node.parent_id,
            depth: node.depth,
            branch: node.branch,
            class: NodeClass::Abandoned,
            children: None,
            lp_status: None,
            objective_value: None,
            basis: Vec::new(),
            x: Vec::new(),
        }
    }

    /// Attach the ids of a split node's children.
    pub fn with_children(mut self, down: u64, up: u64) -> Self {
        self.children = Some((down, up));
        self
    }
}
