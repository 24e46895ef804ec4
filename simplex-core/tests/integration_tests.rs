//! End-to-end tests for the tableau simplex.
//!
//! Problems are given in standard form with slack/surplus columns already
//! present; artificial columns are added by the solver.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use simplex_core::{
    solve_lp, LpProblem, LpStatus, Phase, Sense, SimplexEngine, SimplexError, SimplexSettings,
    SilentReporter,
};

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-6,
        "expected {}, got {}",
        expected,
        actual
    );
}

#[test]
fn test_textbook_maximization() {
    // max 3x + 5y  s.t.  x <= 4, 2y <= 12, 3x + 2y <= 18
    let prob = LpProblem::new(
        vec![
            vec![1.0, 0.0, 1.0, 0.0, 0.0],
            vec![0.0, 2.0, 0.0, 1.0, 0.0],
            vec![3.0, 2.0, 0.0, 0.0, 1.0],
        ],
        vec![4.0, 12.0, 18.0],
        vec![3.0, 5.0, 0.0, 0.0, 0.0],
        Sense::Maximize,
        2,
    );

    let sol = solve_lp(&prob, &SimplexSettings::default()).unwrap();

    assert_eq!(sol.status, LpStatus::Optimal);
    assert_close(sol.objective_value, 36.0);
    assert_close(sol.x[0], 2.0);
    assert_close(sol.x[1], 6.0);

    // one basis entry per row, all columns distinct
    assert_eq!(sol.basis.len(), 3);
    let mut cols: Vec<usize> = sol.basis.iter().map(|e| e.column).collect();
    cols.sort_unstable();
    cols.dedup();
    assert_eq!(cols.len(), 3);
}

#[test]
fn test_two_phase_minimization() {
    // min 2x + 3y  s.t.  x + y >= 4, x + 3y >= 6, x <= 3
    let prob = LpProblem::new(
        vec![
            vec![1.0, 1.0, -1.0, 0.0, 0.0],
            vec![1.0, 3.0, 0.0, -1.0, 0.0],
            vec![1.0, 0.0, 0.0, 0.0, 1.0],
        ],
        vec![4.0, 6.0, 3.0],
        vec![2.0, 3.0, 0.0, 0.0, 0.0],
        Sense::Minimize,
        2,
    );

    let engine = SimplexEngine::from_problem(&prob, SimplexSettings::default()).unwrap();
    assert_eq!(engine.phase(), Phase::One);
    assert_eq!(engine.tableau().num_cols(), 7);

    let sol = engine.solve(&SilentReporter);

    assert_eq!(sol.status, LpStatus::Optimal);
    assert_close(sol.objective_value, 9.0);
    assert_close(sol.x[0], 3.0);
    assert_close(sol.x[1], 1.0);
}

#[test]
fn test_diet_problem() {
    // min 0.6x + y  s.t.  10x + 4y >= 20, 5x + 5y >= 20, 2x + 6y >= 12
    let prob = LpProblem::new(
        vec![
            vec![10.0, 4.0, -1.0, 0.0, 0.0],
            vec![5.0, 5.0, 0.0, -1.0, 0.0],
            vec![2.0, 6.0, 0.0, 0.0, -1.0],
        ],
        vec![20.0, 20.0, 12.0],
        vec![0.6, 1.0, 0.0, 0.0, 0.0],
        Sense::Minimize,
        2,
    );

    let sol = solve_lp(&prob, &SimplexSettings::default()).unwrap();

    assert_eq!(sol.status, LpStatus::Optimal);
    assert_close(sol.objective_value, 2.8);
    assert_close(sol.x[0], 3.0);
    assert_close(sol.x[1], 1.0);
}

#[test]
fn test_equality_row_without_slack() {
    // max x + y  s.t.  x + 2y = 4, x <= 3
    let prob = LpProblem::new(
        vec![vec![1.0, 2.0, 0.0], vec![1.0, 0.0, 1.0]],
        vec![4.0, 3.0],
        vec![1.0, 1.0, 0.0],
        Sense::Maximize,
        2,
    );

    let sol = solve_lp(&prob, &SimplexSettings::default()).unwrap();

    assert_eq!(sol.status, LpStatus::Optimal);
    assert_close(sol.objective_value, 3.5);
    assert_close(sol.x[0], 3.0);
    assert_close(sol.x[1], 0.5);
}

#[test]
fn test_degenerate_phase_one_with_round_off() {
    // min 9x + 4y  s.t.  6x + 5y >= 14, 6x + 2y >= 19, x <= 3, y >= 1, x >= 3
    // Phase one leaves an artificial basic at round-off level and offers a
    // 1e-16 entry to the ratio test.
    let matrix = vec![
        vec![6.0, 5.0, -1.0, 0.0, 0.0, 0.0, 0.0],
        vec![6.0, 2.0, 0.0, -1.0, 0.0, 0.0, 0.0],
        vec![1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0],
        vec![0.0, 1.0, 0.0, 0.0, 0.0, -1.0, 0.0],
        vec![1.0, 0.0, 0.0, 0.0, 0.0, 0.0, -1.0],
    ];
    let rhs = vec![14.0, 19.0, 3.0, 1.0, 3.0];
    let prob = LpProblem::new(
        matrix.clone(),
        rhs.clone(),
        vec![9.0, 4.0, 0.0, 0.0, 0.0, 0.0, 0.0],
        Sense::Minimize,
        2,
    );

    let sol = solve_lp(&prob, &SimplexSettings::default()).unwrap();

    assert_eq!(sol.status, LpStatus::Optimal);
    assert_close(sol.objective_value, 31.0);
    assert_close(sol.x[0], 3.0);
    assert_close(sol.x[1], 1.0);

    // the basis reproduces every row
    let mut z = vec![0.0; 7];
    for entry in &sol.basis {
        if entry.column < z.len() {
            z[entry.column] = entry.value;
        }
    }
    for (row, &b) in matrix.iter().zip(&rhs) {
        let lhs: f64 = row.iter().zip(&z).map(|(a, v)| a * v).sum();
        assert_close(lhs, b);
    }
    assert!(z.iter().all(|&v| v >= -1e-9), "{:?}", z);
}

#[test]
fn test_contradictory_equalities_are_infeasible() {
    // x + y = 2 and x + y = 3
    let prob = LpProblem::new(
        vec![vec![1.0, 1.0], vec![1.0, 1.0]],
        vec![2.0, 3.0],
        vec![1.0, 1.0],
        Sense::Maximize,
        2,
    );

    let sol = solve_lp(&prob, &SimplexSettings::default()).unwrap();
    assert_eq!(sol.status, LpStatus::Infeasible);
}

#[test]
fn test_unbounded_column() {
    // max x + y  s.t.  x - y <= 1
    let prob = LpProblem::new(
        vec![vec![1.0, -1.0, 1.0]],
        vec![1.0],
        vec![1.0, 1.0, 0.0],
        Sense::Maximize,
        2,
    );

    let sol = solve_lp(&prob, &SimplexSettings::default()).unwrap();
    assert_eq!(sol.status, LpStatus::Unbounded);
    assert!(sol.iterations < 10);
}

#[test]
fn test_minimum_at_origin() {
    let prob = LpProblem::new(
        vec![vec![1.0, 1.0, 1.0]],
        vec![5.0],
        vec![2.0, 1.0, 0.0],
        Sense::Minimize,
        2,
    );

    let sol = solve_lp(&prob, &SimplexSettings::default()).unwrap();
    assert_eq!(sol.status, LpStatus::Optimal);
    assert_eq!(sol.objective_value, 0.0);
    assert_eq!(sol.x, vec![0.0, 0.0]);
    assert_eq!(sol.iterations, 0);
}

#[test]
fn test_invalid_problem_rejected() {
    let prob = LpProblem::new(
        vec![vec![1.0, 1.0, 1.0]],
        vec![5.0, 1.0],
        vec![2.0, 1.0, 0.0],
        Sense::Minimize,
        2,
    );

    let err = solve_lp(&prob, &SimplexSettings::default()).unwrap_err();
    assert!(matches!(err, SimplexError::InvalidProblem(_)));
}

#[test]
fn test_problem_from_json() {
    let json = r#"{
        "matrix": [[1.0, 0.0, 1.0, 0.0, 0.0],
                   [0.0, 2.0, 0.0, 1.0, 0.0],
                   [3.0, 2.0, 0.0, 0.0, 1.0]],
        "rhs": [4.0, 12.0, 18.0],
        "objective": [3.0, 5.0, 0.0, 0.0, 0.0],
        "sense": "Maximize",
        "num_vars": 2
    }"#;
    let prob: LpProblem = serde_json::from_str(json).unwrap();

    let sol = solve_lp(&prob, &SimplexSettings::default()).unwrap();
    assert_close(sol.objective_value, 36.0);
}

/// Best objective over the vertices of a two-variable `<=` polytope.
fn brute_force_max(rows: &[[f64; 2]], rhs: &[f64], cost: [f64; 2]) -> f64 {
    let mut lines: Vec<([f64; 2], f64)> = rows.iter().copied().zip(rhs.iter().copied()).collect();
    lines.push(([1.0, 0.0], 0.0));
    lines.push(([0.0, 1.0], 0.0));

    let mut best = 0.0_f64;
    for p in 0..lines.len() {
        for q in (p + 1)..lines.len() {
            let ([a1, b1], r1) = lines[p];
            let ([a2, b2], r2) = lines[q];
            let det = a1 * b2 - a2 * b1;
            if det.abs() < 1e-12 {
                continue;
            }
            let x = (r1 * b2 - r2 * b1) / det;
            let y = (a1 * r2 - a2 * r1) / det;
            if x < -1e-9 || y < -1e-9 {
                continue;
            }
            let feasible = rows
                .iter()
                .zip(rhs)
                .all(|(row, &b)| row[0] * x + row[1] * y <= b + 1e-9);
            if feasible {
                best = best.max(cost[0] * x + cost[1] * y);
            }
        }
    }
    best
}

#[test]
fn test_random_packing_lps_match_vertex_enumeration() {
    let mut rng = ChaCha8Rng::seed_from_u64(42);

    for _ in 0..200 {
        let m = rng.gen_range(2..=4);
        let rows: Vec<[f64; 2]> = (0..m)
            .map(|_| [rng.gen_range(1..10) as f64, rng.gen_range(1..10) as f64])
            .collect();
        let rhs: Vec<f64> = (0..m).map(|_| rng.gen_range(10..=50) as f64).collect();
        let cost = [rng.gen_range(1..10) as f64, rng.gen_range(1..10) as f64];

        let matrix = rows
            .iter()
            .enumerate()
            .map(|(i, r)| {
                let mut row = vec![r[0], r[1]];
                row.extend((0..m).map(|j| if i == j { 1.0 } else { 0.0 }));
                row
            })
            .collect();
        let mut objective = vec![cost[0], cost[1]];
        objective.extend(std::iter::repeat(0.0).take(m));

        let prob = LpProblem::new(matrix, rhs.clone(), objective, Sense::Maximize, 2);
        let sol = solve_lp(&prob, &SimplexSettings::default()).unwrap();

        assert_eq!(sol.status, LpStatus::Optimal);
        assert_close(sol.objective_value, brute_force_max(&rows, &rhs, cost));

        for (row, &b) in rows.iter().zip(&rhs) {
            assert!(row[0] * sol.x[0] + row[1] * sol.x[1] <= b + 1e-6);
        }
    }
}

/// Least objective over the vertices of a two-variable `>=` polyhedron.
fn brute_force_min(rows: &[[f64; 2]], rhs: &[f64], cost: [f64; 2]) -> f64 {
    let mut lines: Vec<([f64; 2], f64)> = rows.iter().copied().zip(rhs.iter().copied()).collect();
    lines.push(([1.0, 0.0], 0.0));
    lines.push(([0.0, 1.0], 0.0));

    let mut best = f64::INFINITY;
    for p in 0..lines.len() {
        for q in (p + 1)..lines.len() {
            let ([a1, b1], r1) = lines[p];
            let ([a2, b2], r2) = lines[q];
            let det = a1 * b2 - a2 * b1;
            if det.abs() < 1e-12 {
                continue;
            }
            let x = (r1 * b2 - r2 * b1) / det;
            let y = (a1 * r2 - a2 * r1) / det;
            if x < -1e-9 || y < -1e-9 {
                continue;
            }
            let feasible = rows
                .iter()
                .zip(rhs)
                .all(|(row, &b)| row[0] * x + row[1] * y >= b - 1e-9);
            if feasible {
                best = best.min(cost[0] * x + cost[1] * y);
            }
        }
    }
    best
}

#[test]
fn test_random_covering_lps_match_vertex_enumeration() {
    let mut rng = ChaCha8Rng::seed_from_u64(7);

    for _ in 0..200 {
        let m = rng.gen_range(2..=4);
        let rows: Vec<[f64; 2]> = (0..m)
            .map(|_| [rng.gen_range(1..10) as f64, rng.gen_range(1..10) as f64])
            .collect();
        let rhs: Vec<f64> = (0..m).map(|_| rng.gen_range(10..=50) as f64).collect();
        let cost = [rng.gen_range(1..10) as f64, rng.gen_range(1..10) as f64];

        // surplus columns force a phase-one start
        let matrix = rows
            .iter()
            .enumerate()
            .map(|(i, r)| {
                let mut row = vec![r[0], r[1]];
                row.extend((0..m).map(|j| if i == j { -1.0 } else { 0.0 }));
                row
            })
            .collect();
        let mut objective = vec![cost[0], cost[1]];
        objective.extend(std::iter::repeat(0.0).take(m));

        let prob = LpProblem::new(matrix, rhs.clone(), objective, Sense::Minimize, 2);
        let sol = solve_lp(&prob, &SimplexSettings::default()).unwrap();

        assert_eq!(sol.status, LpStatus::Optimal, "{:?} >= {:?}", rows, rhs);
        assert_close(sol.objective_value, brute_force_min(&rows, &rhs, cost));

        assert!(sol.x.iter().all(|&v| v >= -1e-9));
        for (row, &b) in rows.iter().zip(&rhs) {
            assert!(row[0] * sol.x[0] + row[1] * sol.x[1] >= b - 1e-6);
        }
    }
}
