//! Loop failures driven by a scripted oracle.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tourforge_config::{SolverConfig, TieBreak};
use tourforge_core::{ErrorKind, TourForgeError};
use tourforge_milp::SolveStatus;
use tourforge_solver::{
    CountingEventListener, CuttingPlaneSolver, IterationRecord, SolveEventListener,
    TimeTermination,
};
use tourforge_test::{two_triangles, ScriptedOracle};

const TRIANGLES: [usize; 6] = [1, 2, 0, 4, 5, 3];
const TOUR: [usize; 6] = [1, 2, 3, 4, 5, 0];

#[test]
fn test_scripted_run_records_history() {
    let oracle = ScriptedOracle::new()
        .then_successors(TRIANGLES.to_vec(), 6.0)
        .then_successors(TOUR.to_vec(), 24.0);
    let mut solver = CuttingPlaneSolver::new(oracle);
    let solution = solver.solve(&two_triangles()).unwrap();

    assert_eq!(solution.iterations, 1);
    assert_eq!(solution.solve_count, 2);
    assert_eq!(solution.cuts_added, 2);
    assert_eq!(solution.tour.nodes(), &[0, 1, 2, 3, 4, 5]);
    assert_eq!(solution.length, 24.0);
    assert_eq!(solution.objective_value, 24.0);
    assert_eq!(
        solution.history,
        vec![
            IterationRecord {
                iteration: 1,
                cuts_added: 2,
                objective_value: 6.0,
                subtour_count: 2,
                subtour_sizes: vec![3, 3],
            },
            IterationRecord {
                iteration: 2,
                cuts_added: 2,
                objective_value: 24.0,
                subtour_count: 1,
                subtour_sizes: vec![6],
            },
        ]
    );
    // 12 degree constraints, then 2 cuts.
    assert_eq!(solver.oracle().constraint_counts(), &[12, 14]);
}

#[test]
fn test_infeasible_on_first_call() {
    let oracle = ScriptedOracle::new().then_status(SolveStatus::Infeasible);
    let err = CuttingPlaneSolver::new(oracle)
        .solve(&two_triangles())
        .unwrap_err();

    assert!(matches!(err, TourForgeError::SolverInfeasible { .. }));
    assert_eq!(err.kind(), ErrorKind::ProvenInfeasible);
    let snapshot = err.snapshot().unwrap();
    assert_eq!(snapshot.iterations, 0);
    assert_eq!(snapshot.last_objective, None);
}

#[test]
fn test_infeasible_after_cuts_keeps_progress() {
    let oracle = ScriptedOracle::new()
        .then_successors(TRIANGLES.to_vec(), 6.0)
        .then_status(SolveStatus::Infeasible);
    let err = CuttingPlaneSolver::new(oracle)
        .solve(&two_triangles())
        .unwrap_err();

    let snapshot = err.snapshot().unwrap();
    assert_eq!(snapshot.iterations, 1);
    assert_eq!(snapshot.cuts_added, 2);
    assert_eq!(snapshot.last_objective, Some(6.0));
}

#[test]
fn test_unbounded_and_solver_error() {
    let err = CuttingPlaneSolver::new(ScriptedOracle::new().then_status(SolveStatus::Unbounded))
        .solve(&two_triangles())
        .unwrap_err();
    assert!(matches!(err, TourForgeError::SolverUnbounded { .. }));
    assert_eq!(err.kind(), ErrorKind::SolverFailure);

    let err = CuttingPlaneSolver::new(ScriptedOracle::new().then_status(SolveStatus::SolverError))
        .solve(&two_triangles())
        .unwrap_err();
    match err {
        TourForgeError::SolverError { message, .. } => assert_eq!(message, "scripted solver error"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_fractional_solution_is_an_anomaly() {
    let mut values = vec![vec![0.0; 6]; 6];
    for (i, &j) in TOUR.iter().enumerate() {
        values[i][j] = 1.0;
    }
    values[2][3] = 0.5;
    values[2][0] = 0.5;

    let oracle = ScriptedOracle::new().then_arcs(values, 20.0);
    let err = CuttingPlaneSolver::new(oracle)
        .solve(&two_triangles())
        .unwrap_err();
    match &err {
        TourForgeError::SubtourDetectionAnomaly { node, .. } => assert_eq!(*node, 2),
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(err.kind(), ErrorKind::SolverFailure);
    assert_eq!(err.snapshot().unwrap().last_objective, Some(20.0));
}

#[test]
fn test_strict_tie_break() {
    let mut values = vec![vec![0.0; 6]; 6];
    for (i, &j) in TOUR.iter().enumerate() {
        values[i][j] = 1.0;
    }
    values[0][2] = 1.0;

    let config = SolverConfig::new().with_tie_break(TieBreak::Strict);
    let oracle = ScriptedOracle::new().then_arcs(values.clone(), 25.0);
    let err = CuttingPlaneSolver::new(oracle)
        .with_config(config)
        .solve(&two_triangles())
        .unwrap_err();
    assert!(matches!(
        err,
        TourForgeError::SubtourDetectionAnomaly { node: 0, .. }
    ));

    // The default policy follows the lowest index and accepts the tour.
    let oracle = ScriptedOracle::new().then_arcs(values, 25.0);
    let solution = CuttingPlaneSolver::new(oracle)
        .solve(&two_triangles())
        .unwrap();
    assert_eq!(solution.tour.nodes(), &[0, 1, 2, 3, 4, 5]);
}

#[test]
fn test_iteration_limit() {
    let oracle = ScriptedOracle::new().then_successors(TRIANGLES.to_vec(), 6.0);
    let mut solver = CuttingPlaneSolver::new(oracle)
        .with_config(SolverConfig::new().with_iteration_limit(3));
    let err = solver.solve(&two_triangles()).unwrap_err();

    match &err {
        TourForgeError::IterationLimitExceeded { limit, snapshot } => {
            assert_eq!(*limit, 3);
            assert_eq!(snapshot.iterations, 3);
            assert_eq!(snapshot.cuts_added, 6);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(err.kind(), ErrorKind::SafetyLimit);
    // The model produced by the last allowed round is still solved.
    assert_eq!(solver.oracle().calls(), 4);
}

#[test]
fn test_cancelled_before_first_call() {
    let oracle = ScriptedOracle::new().then_successors(TOUR.to_vec(), 24.0);
    let mut solver = CuttingPlaneSolver::new(oracle);
    solver.cancel_flag().store(true, Ordering::SeqCst);

    let err = solver.solve(&two_triangles()).unwrap_err();
    assert!(matches!(err, TourForgeError::Cancelled { .. }));
    assert_eq!(solver.oracle().calls(), 0);
}

#[derive(Debug)]
struct CancelAfterFirstIteration {
    flag: Arc<AtomicBool>,
}

impl SolveEventListener for CancelAfterFirstIteration {
    fn on_iteration(&self, _record: &IterationRecord) {
        self.flag.store(true, Ordering::SeqCst);
    }
}

#[test]
fn test_cancelled_between_iterations() {
    let oracle = ScriptedOracle::new().then_successors(TRIANGLES.to_vec(), 6.0);
    let solver = CuttingPlaneSolver::new(oracle);
    let listener = Arc::new(CancelAfterFirstIteration {
        flag: solver.cancel_flag(),
    });
    let mut solver = solver.with_listener(listener);

    let err = solver.solve(&two_triangles()).unwrap_err();
    match &err {
        TourForgeError::Cancelled { snapshot } => {
            assert_eq!(snapshot.iterations, 1);
            assert_eq!(snapshot.cuts_added, 2);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(solver.oracle().calls(), 1);
}

#[test]
fn test_zero_time_limit() {
    let oracle = ScriptedOracle::new().then_successors(TOUR.to_vec(), 24.0);
    let mut solver =
        CuttingPlaneSolver::new(oracle).with_termination(TimeTermination::new(Duration::ZERO));

    let err = solver.solve(&two_triangles()).unwrap_err();
    assert!(matches!(
        err,
        TourForgeError::TimeLimitExceeded { limit, .. } if limit == Duration::ZERO
    ));
    assert_eq!(solver.oracle().calls(), 0);
}

#[test]
fn test_events_are_fired() {
    let counter = Arc::new(CountingEventListener::new());
    let oracle = ScriptedOracle::new()
        .then_successors(TRIANGLES.to_vec(), 6.0)
        .then_successors(TOUR.to_vec(), 24.0);
    let mut solver = CuttingPlaneSolver::new(oracle).with_listener(counter.clone());
    solver.solve(&two_triangles()).unwrap();

    assert_eq!(counter.solving_started_count(), 1);
    assert_eq!(counter.iteration_count(), 2);
    assert_eq!(counter.cuts_added_count(), 1);
    assert_eq!(counter.solved_count(), 1);
    assert_eq!(counter.failed_count(), 0);

    counter.reset();
    let mut solver = CuttingPlaneSolver::new(ScriptedOracle::new().then_status(SolveStatus::Infeasible))
        .with_listener(counter.clone());
    assert!(solver.solve(&two_triangles()).is_err());
    assert_eq!(counter.failed_count(), 1);
    assert_eq!(counter.solved_count(), 0);
}
