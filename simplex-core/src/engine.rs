//! Simplex driver: basis seeding, the two-phase procedure and the pivot loop.

use std::fmt;

use crate::error::{SimplexError, SimplexResult};
use crate::prepare::{add_artificial_columns, prepare, Preparation};
use crate::problem::{LpProblem, Sense};
use crate::report::Reporter;
use crate::settings::SimplexSettings;
use crate::solution::{LpSolution, LpStatus};
use crate::tableau::Tableau;
use crate::util::round_toward_zero;

/// Which objective currently drives the pivots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Minimizing the sum of artificial variables.
    One,
    /// Optimizing the real objective.
    Two,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::One => write!(f, "phase one"),
            Phase::Two => write!(f, "phase two"),
        }
    }
}

/// One LP instance and the state needed to solve it.
///
/// The tableau is consumed by [`SimplexEngine::solve`]; callers that need the
/// input afterwards keep their own copy.
#[derive(Debug, Clone)]
pub struct SimplexEngine {
    tableau: Tableau,
    sense: Sense,
    num_vars: usize,
    num_artificial: usize,
    phase: Phase,
    settings: SimplexSettings,
    iterations: usize,
}

impl SimplexEngine {
    /// Build an engine from a matrix that already carries its artificial
    /// columns (see [`add_artificial_columns`]).
    ///
    /// `objective` holds the caller's cost coefficients; the objective row is
    /// derived from `sense`. Fails when no full basis can be seeded.
    pub fn new(
        matrix: Vec<Vec<f64>>,
        rhs: Vec<f64>,
        objective: Vec<f64>,
        sense: Sense,
        preparation: &Preparation,
        num_vars: usize,
        settings: SimplexSettings,
    ) -> SimplexResult<Self> {
        let m = matrix.len();
        let n = objective.len();
        let num_artificial = preparation.num_artificial();

        if m == 0 || n == 0 {
            return Err(SimplexError::InvalidProblem("empty tableau".to_string()));
        }
        if rhs.len() != m {
            return Err(SimplexError::InvalidProblem(format!(
                "rhs has length {}, expected {}",
                rhs.len(),
                m
            )));
        }
        if let Some(i) = matrix.iter().position(|row| row.len() != n) {
            return Err(SimplexError::InvalidProblem(format!(
                "row {} has {} entries, expected {}",
                i,
                matrix[i].len(),
                n
            )));
        }
        if num_vars + num_artificial > n {
            return Err(SimplexError::InvalidProblem(format!(
                "{} canonical and {} artificial columns exceed {} columns",
                num_vars, num_artificial, n
            )));
        }

        let row_sign = sense.row_sign();
        let c = objective
            .iter()
            .map(|&v| if v == 0.0 { 0.0 } else { v * row_sign })
            .collect();

        let mut tableau = Tableau::new(matrix, rhs, c);

        let phase = if preparation.needs_two_phase {
            tableau.seed_basis_from_unit_columns(num_vars)?;
            tableau.start_phase_one(num_artificial, &preparation.artificial_rows);
            Phase::One
        } else {
            tableau.seed_basis_from_objective(num_vars)?;
            Phase::Two
        };

        Ok(Self {
            tableau,
            sense,
            num_vars,
            num_artificial,
            phase,
            settings,
            iterations: 0,
        })
    }

    /// Prepare a standard-form problem (artificial columns included) and
    /// build its engine.
    pub fn from_problem(problem: &LpProblem, settings: SimplexSettings) -> SimplexResult<Self> {
        problem.validate().map_err(SimplexError::InvalidProblem)?;

        let preparation = prepare(&problem.matrix, problem.num_vars);
        let mut matrix = problem.matrix.clone();
        let mut objective = problem.objective.clone();
        add_artificial_columns(&mut matrix, &mut objective, &preparation);

        Self::new(
            matrix,
            problem.rhs.clone(),
            objective,
            problem.sense,
            &preparation,
            problem.num_vars,
            settings,
        )
    }

    /// Current tableau.
    pub fn tableau(&self) -> &Tableau {
        &self.tableau
    }

    /// Phase the engine will start (or continue) in.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Optimization direction.
    pub fn sense(&self) -> Sense {
        self.sense
    }

    /// Run the simplex method to a terminal status.
    pub fn solve(mut self, reporter: &dyn Reporter) -> LpSolution {
        let mut status = None;

        if self.phase == Phase::One {
            status = self.run_phase_one(reporter);
        }

        let status = match status {
            Some(status) => status,
            None => {
                reporter.phase_started(Phase::Two, &self.tableau);
                self.iterate(Phase::Two, reporter)
            }
        };

        let solution = LpSolution {
            status,
            objective_value: self.reported_value(),
            basis: self.tableau.basis().to_vec(),
            x: self.tableau.canonical_solution(self.num_vars),
            iterations: self.iterations,
        };

        reporter.finished(&self.tableau, &solution);
        solution
    }

    /// Phase one. Returns a terminal status when phase two must not run.
    fn run_phase_one(&mut self, reporter: &dyn Reporter) -> Option<LpStatus> {
        reporter.phase_started(Phase::One, &self.tableau);

        let status = self.iterate(Phase::One, reporter);
        let residual =
            round_toward_zero(self.tableau.auxiliary_value(), self.settings.phase_one_tol);

        match status {
            LpStatus::IterationLimit => Some(status),
            LpStatus::Optimal if residual == 0.0 => {
                reporter.phase_one_finished(true, residual);
                self.tableau.drop_artificial(self.num_artificial, self.settings.pivot_tol);
                self.phase = Phase::Two;
                None
            }
            _ => {
                reporter.phase_one_finished(false, residual);
                Some(LpStatus::Infeasible)
            }
        }
    }

    /// Pivot until optimal, unbounded, infeasible or out of iterations.
    fn iterate(&mut self, phase: Phase, reporter: &dyn Reporter) -> LpStatus {
        let mut iteration = 0;

        loop {
            if self.tableau.is_optimal(self.settings.optimality_tol) {
                return LpStatus::Optimal;
            }
            if iteration >= self.settings.max_iter {
                return LpStatus::IterationLimit;
            }

            let col = self.tableau.entering_column();
            let Some(row) = self.tableau.leaving_row(col, self.settings.pivot_tol) else {
                return LpStatus::Unbounded;
            };

            let feasible = self.tableau.pivot(row, col, self.settings.feasibility_tol);
            iteration += 1;
            self.iterations += 1;

            if !feasible {
                return LpStatus::Infeasible;
            }

            reporter.iteration(phase, iteration, &self.tableau, self.reported_value());
        }
    }

    /// Objective value in the caller's sense.
    fn reported_value(&self) -> f64 {
        let value = self.tableau.objective_value();
        if self.sense == Sense::Minimize && value != 0.0 {
            -value
        } else {
            value
        }
    }
}
