//! Branch-and-bound coordinator.
//!
//! The root relaxation is solved on the calling thread. If it is fractional
//! its two children seed the queue and a fixed pool of scoped worker threads
//! drains it: pop a node, solve it privately, decide under the incumbent
//! lock, and either retire the node or enqueue its children. The search
//! ends when no node is queued or being processed.

use std::thread;

use log::{error, info, warn};
use simplex_core::{reporter_for, LpProblem, LpSolution, LpStatus};

use super::context::{Decision, SearchContext};
use super::SubProblem;
use crate::error::{MipError, MipResult};
use crate::model::{Comparator, MilpSolution, MilpStatus, NodeClass, RetiredNode};
use crate::settings::MipSettings;

/// Branch-and-bound tree controller.
pub struct BranchAndBound<'a> {
    problem: &'a LpProblem,
    settings: MipSettings,
}

/// Aborts the search when a worker unwinds, so its siblings stop waiting.
struct AbortOnPanic<'a>(&'a SearchContext);

impl Drop for AbortOnPanic<'_> {
    fn drop(&mut self) {
        if thread::panicking() {
            self.0.abort();
        }
    }
}

impl<'a> BranchAndBound<'a> {
    /// Create a controller over a standard-form problem whose first
    /// `num_vars` columns are integer.
    pub fn new(problem: &'a LpProblem, settings: MipSettings) -> Self {
        Self { problem, settings }
    }

    /// Run the search to exhaustion.
    pub fn solve(&self) -> MipResult<MilpSolution> {
        let ctx = SearchContext::new(
            Comparator::new(self.problem.sense),
            self.problem.num_vars,
            self.settings.clone(),
        );

        let root = SubProblem::root(self.problem);
        let engine = root.engine(self.problem.sense, self.problem.num_vars, &self.settings.lp)?;
        let relaxation = engine.solve(reporter_for(self.settings.lp.verbose));
        let root_status = relaxation.status;

        match self.evaluate(&ctx, &root, relaxation) {
            NodeClass::Split => self.run_workers(&ctx)?,
            NodeClass::PrunedInfeasible => {
                let status = match root_status {
                    LpStatus::Unbounded => MilpStatus::Unbounded,
                    _ => MilpStatus::Infeasible,
                };
                if self.settings.verbose {
                    info!("root relaxation {}: no solution or unbounded", root_status);
                }
                let (_, search_log) = ctx.into_parts();
                return Ok(MilpSolution::without_solution(status, search_log));
            }
            _ => {}
        }

        let solution = Self::finalize(ctx);
        if self.settings.verbose {
            if solution.status.has_solution() {
                info!(
                    "search finished: {} obj={:?} after {} nodes, {} incumbent updates",
                    solution.status,
                    solution.objective_value,
                    solution.nodes_evaluated,
                    solution.incumbent_updates
                );
            } else {
                info!(
                    "search finished: {} after {} nodes",
                    solution.status,
                    solution.nodes_evaluated
                );
            }
        }
        Ok(solution)
    }

    /// Collect the incumbent and the search log.
    fn finalize(ctx: SearchContext) -> MilpSolution {
        let (incumbent, search_log) = ctx.into_parts();
        let nodes_evaluated = search_log.len() as u64;

        match incumbent.solution {
            Some(x) => MilpSolution {
                status: MilpStatus::Optimal,
                objective_value: Some(incumbent.obj_val),
                x,
                search_log,
                nodes_evaluated,
                incumbent_updates: incumbent.update_count,
                incumbent_trace: incumbent.trace,
            },
            None => MilpSolution::without_solution(MilpStatus::Infeasible, search_log),
        }
    }

    /// Spawn the worker pool and wait for every worker.
    fn run_workers(&self, ctx: &SearchContext) -> MipResult<()> {
        let workers = self.settings.workers.max(1);

        thread::scope(|scope| {
            let mut handles = Vec::with_capacity(workers);
            let mut spawn_error = None;

            for i in 0..workers {
                let spawned = thread::Builder::new()
                    .name(format!("bnb-worker-{}", i))
                    .spawn_scoped(scope, move || self.worker_loop(ctx));
                match spawned {
                    Ok(handle) => handles.push(handle),
                    Err(e) => {
                        spawn_error = Some(MipError::InternalError(format!(
                            "failed to spawn worker {}: {}",
                            i, e
                        )));
                        ctx.abort();
                        break;
                    }
                }
            }

            let panicked = handles
                .into_iter()
                .map(|h| h.join())
                .filter(Result::is_err)
                .count();

            if let Some(e) = spawn_error {
                return Err(e);
            }
            if panicked > 0 {
                return Err(MipError::InternalError(format!(
                    "{} worker thread(s) panicked",
                    panicked
                )));
            }
            if !ctx.queue.is_empty() {
                return Err(MipError::InternalError(format!(
                    "search stopped with {} nodes still queued",
                    ctx.queue.len()
                )));
            }
            Ok(())
        })
    }

    fn worker_loop(&self, ctx: &SearchContext) {
        let _guard = AbortOnPanic(ctx);

        while let Some(node) = ctx.queue.pop() {
            self.process(ctx, node);
            ctx.node_finished();
        }
    }

    /// Solve one queued node and act on the decision.
    fn process(&self, ctx: &SearchContext, node: SubProblem) {
        let engine = match node.engine(self.problem.sense, ctx.num_vars(), &self.settings.lp) {
            Ok(engine) => engine,
            Err(e) => {
                let (rows, cols) = node.shape();
                error!(
                    "node {}: {} ({} x {} matrix), branch abandoned",
                    node.id, e, rows, cols
                );
                ctx.retire(RetiredNode::abandoned(&node));
                return;
            }
        };

        let relaxation = engine.solve(reporter_for(self.settings.lp.verbose));
        self.evaluate(ctx, &node, relaxation);
    }

    /// Classify a solved node, retire it and enqueue its children if split.
    fn evaluate(&self, ctx: &SearchContext, node: &SubProblem, relaxation: LpSolution) -> NodeClass {
        if relaxation.status == LpStatus::IterationLimit {
            warn!(
                "node {}: relaxation stopped after {} iterations, pruned",
                node.id, relaxation.iterations
            );
        }

        match ctx.decide(node.id, &relaxation) {
            Decision::Retire(class) => {
                ctx.retire(RetiredNode::evaluated(node, class, relaxation));
                class
            }
            Decision::Split(decision) => {
                let (down, up) = ctx.split(node, &decision);
                ctx.retire(
                    RetiredNode::evaluated(node, NodeClass::Split, relaxation)
                        .with_children(down.id, up.id),
                );
                ctx.enqueue_children(down, up);
                NodeClass::Split
            }
        }
    }
}
