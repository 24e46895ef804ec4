//! State shared by the branch-and-bound workers.
//!
//! Each piece of shared state has its own lock: the queue, the in-flight
//! counter, the id allocator, the incumbent and the retired-node list. No
//! code path holds two of them at once.

use std::sync::{Mutex, MutexGuard, PoisonError};

use log::info;
use simplex_core::util::truncate_toward_zero;
use simplex_core::LpSolution;

use super::{select_branching, BranchDecision, SubProblem, WorkQueue};
use crate::model::{Comparator, IncumbentTracker, NodeClass, RetiredNode};
use crate::settings::MipSettings;

/// Lock a mutex, recovering the guard if another worker panicked.
///
/// Every guarded value is consistent between statements, so a poisoned
/// lock still holds usable state.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Outcome of the incumbent comparison for one node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Decision {
    /// The node is retired with this class.
    Retire(NodeClass),

    /// The node is fractional and must be split.
    Split(BranchDecision),
}

/// Shared state of one search.
pub struct SearchContext {
    /// Pending sub-problems.
    pub queue: WorkQueue,

    in_flight: Mutex<usize>,
    next_id: Mutex<u64>,
    incumbent: Mutex<IncumbentTracker>,
    retired: Mutex<Vec<RetiredNode>>,

    comparator: Comparator,
    num_vars: usize,
    settings: MipSettings,
}

impl SearchContext {
    /// Fresh context. The root owns id 1.
    pub fn new(comparator: Comparator, num_vars: usize, settings: MipSettings) -> Self {
        Self {
            queue: WorkQueue::new(),
            in_flight: Mutex::new(0),
            next_id: Mutex::new(1),
            incumbent: Mutex::new(IncumbentTracker::new(&comparator)),
            retired: Mutex::new(Vec::new()),
            comparator,
            num_vars,
            settings,
        }
    }

    /// Number of canonical variables.
    pub fn num_vars(&self) -> usize {
        self.num_vars
    }

    /// Reserve the ids of the next two children.
    pub fn next_pair(&self) -> (u64, u64) {
        let mut next = lock(&self.next_id);
        let ids = (*next + 1, *next + 2);
        *next += 2;
        ids
    }

    /// Classify a solved node and update the incumbent if it qualifies.
    ///
    /// The comparison and the update happen under one lock.
    pub fn decide(&self, node_id: u64, solution: &LpSolution) -> Decision {
        if !solution.status.is_optimal() {
            return Decision::Retire(NodeClass::PrunedInfeasible);
        }

        let tol = self.settings.int_feas_tol;
        let value = solution.objective_value;
        let mut incumbent = lock(&self.incumbent);

        let bound = if incumbent.value_is_integral(tol) {
            truncate_toward_zero(value)
        } else {
            value
        };
        if self.comparator.should_prune(bound, incumbent.obj_val) {
            return Decision::Retire(NodeClass::PrunedWorse);
        }

        match select_branching(&solution.x, tol) {
            Some(decision) => Decision::Split(decision),
            None => {
                if incumbent.update(&solution.x, value, &self.comparator) {
                    if self.settings.verbose {
                        info!("New incumbent: obj={} from node {}", value, node_id);
                    }
                    Decision::Retire(NodeClass::PrunedIntegerImproved)
                } else {
                    Decision::Retire(NodeClass::PrunedWorse)
                }
            }
        }
    }

    /// Build both children of `node` with freshly minted ids.
    pub fn split(&self, node: &SubProblem, decision: &BranchDecision) -> (SubProblem, SubProblem) {
        let (down_id, up_id) = self.next_pair();
        let down = node.child(down_id, decision.down_branch, self.num_vars);
        let up = node.child(up_id, decision.up_branch, self.num_vars);
        (down, up)
    }

    /// Count two more nodes in flight, then release them into the queue.
    pub fn enqueue_children(&self, down: SubProblem, up: SubProblem) {
        *lock(&self.in_flight) += 2;
        self.queue.push_pair(down, up);
    }

    /// One popped node is fully handled. The last one finishes the search.
    pub fn node_finished(&self) {
        let mut in_flight = lock(&self.in_flight);
        *in_flight = in_flight.saturating_sub(1);
        if *in_flight == 0 {
            drop(in_flight);
            self.queue.finish();
        }
    }

    /// Stop the search early; waiting workers wake and exit.
    pub fn abort(&self) {
        self.queue.finish();
    }

    /// Append a node to the search log.
    pub fn retire(&self, entry: RetiredNode) {
        let (id, class, children) = (entry.id, entry.class, entry.children);
        let mut retired = lock(&self.retired);
        retired.push(entry);
        let evaluated = retired.len() as u64;
        drop(retired);

        if self.settings.verbose {
            match children {
                Some((down, up)) => info!("node {} split into {} and {}", id, down, up),
                None => info!("node {} {}", id, class),
            }
            if self.settings.log_freq > 0 && evaluated % self.settings.log_freq == 0 {
                let incumbent = {
                    let tracker = lock(&self.incumbent);
                    if tracker.has_incumbent() {
                        tracker.obj_val.to_string()
                    } else {
                        "none".to_string()
                    }
                };
                info!(
                    "{} nodes evaluated, {} queued ({} added, {} popped), incumbent {}",
                    evaluated,
                    self.queue.len(),
                    self.queue.total_added(),
                    self.queue.total_popped(),
                    incumbent
                );
            }
        }
    }

    /// Hand out the incumbent and the search log, sorted by id.
    pub fn into_parts(self) -> (IncumbentTracker, Vec<RetiredNode>) {
        let incumbent = self
            .incumbent
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner);
        let mut retired = self
            .retired
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner);
        retired.sort_by_key(|n| n.id);
        (incumbent, retired)
    }
}
