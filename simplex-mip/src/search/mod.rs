//! Concurrent branch-and-bound search.

mod branching;
mod context;
mod node;
mod queue;
mod tree;

pub use branching::{select_branching, BranchDecision};
pub use context::{Decision, SearchContext};
pub use node::{BranchBound, BranchSide, SubProblem};
pub use queue::WorkQueue;
pub use tree::BranchAndBound;
