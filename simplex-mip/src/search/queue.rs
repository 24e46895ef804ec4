//! Shared FIFO of pending sub-problems.
//!
//! Workers block in [`WorkQueue::pop`] while the queue is empty and the
//! search is not finished. Pushes and [`WorkQueue::finish`] wake every
//! waiter.

use std::collections::VecDeque;
use std::sync::{Condvar, Mutex};

use super::context::lock;
use super::SubProblem;

struct QueueState {
    nodes: VecDeque<SubProblem>,
    done: bool,

    /// Count of nodes added.
    nodes_added: u64,

    /// Count of nodes popped.
    nodes_popped: u64,
}

/// Blocking FIFO queue for B&B nodes.
pub struct WorkQueue {
    state: Mutex<QueueState>,
    ready: Condvar,
}

impl Default for WorkQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl WorkQueue {
    /// Create an empty, unfinished queue.
    pub fn new() -> Self {
        Self {
            state: Mutex::new(QueueState {
                nodes: VecDeque::new(),
                done: false,
                nodes_added: 0,
                nodes_popped: 0,
            }),
            ready: Condvar::new(),
        }
    }

    /// Enqueue the two children of a split, down child first.
    pub fn push_pair(&self, down: SubProblem, up: SubProblem) {
        let mut state = lock(&self.state);
        state.nodes.push_back(down);
        state.nodes.push_back(up);
        state.nodes_added += 2;
        drop(state);

        self.ready.notify_all();
    }

    /// Take the oldest node, waiting while the queue is empty.
    ///
    /// Returns `None` once the search is finished.
    pub fn pop(&self) -> Option<SubProblem> {
        let mut state = lock(&self.state);
        loop {
            if state.done {
                return None;
            }
            if let Some(node) = state.nodes.pop_front() {
                state.nodes_popped += 1;
                return Some(node);
            }
            state = self
                .ready
                .wait(state)
                .unwrap_or_else(std::sync::PoisonError::into_inner);
        }
    }

    /// Mark the search finished and wake every waiting worker.
    pub fn finish(&self) {
        lock(&self.state).done = true;
        self.ready.notify_all();
    }

    /// Check if the search was marked finished.
    pub fn is_finished(&self) -> bool {
        lock(&self.state).done
    }

    /// Get the number of nodes waiting.
    pub fn len(&self) -> usize {
        lock(&self.state).nodes.len()
    }

    /// Check if the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get the total number of nodes added.
    pub fn total_added(&self) -> u64 {
        lock(&self.state).nodes_added
    }

    /// Get the total number of nodes popped.
    pub fn total_popped(&self) -> u64 {
        lock(&self.state).nodes_popped
    }
}
