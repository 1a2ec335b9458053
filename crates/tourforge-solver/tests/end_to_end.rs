//! End-to-end solves with the bundled microlp oracle.

use tourforge_core::{Instance, Tour};
use tourforge_milp::MicrolpOracle;
use tourforge_solver::CuttingPlaneSolver;
use tourforge_test::{brute_force_optimum, seeded_random_instance, two_triangles, unit_square};

fn solve(instance: &Instance) -> tourforge_solver::TourSolution {
    CuttingPlaneSolver::new(MicrolpOracle::new())
        .solve(instance)
        .expect("instance should solve")
}

fn assert_is_tour(tour: &Tour, n: usize) {
    assert_eq!(tour.len(), n);
    assert_eq!(tour.nodes()[0], 0);
    let mut seen = vec![false; n];
    for &node in tour.nodes() {
        assert!(!seen[node], "node {} visited twice", node);
        seen[node] = true;
    }
}

#[test]
fn test_unit_square() {
    let instance = unit_square();
    let solution = solve(&instance);

    assert_is_tour(&solution.tour, 4);
    assert!((solution.length - 4.0).abs() < 1e-6);
    assert!((solution.objective_value - solution.length).abs() < 1e-6);
    let expected = Tour::from_cycle(&[0, 1, 2, 3], 4).unwrap();
    assert!(solution.tour.is_equivalent(&expected));
    assert_eq!(solution.solve_count, solution.iterations + 1);
    assert_eq!(solution.history.len() as u64, solution.solve_count);
}

#[test]
fn test_two_triangles_needs_cuts() {
    let instance = two_triangles();
    let solution = solve(&instance);

    let first = &solution.history[0];
    assert_eq!(first.iteration, 1);
    assert_eq!(first.subtour_count, 2);
    assert_eq!(first.subtour_sizes, vec![3, 3]);
    assert!((first.objective_value - 6.0).abs() < 1e-6);

    assert!(solution.iterations >= 1);
    assert!(solution.cuts_added >= 2);
    assert_is_tour(&solution.tour, 6);
    assert!((solution.length - 24.0).abs() < 1e-6);

    let last = solution.history.last().unwrap();
    assert_eq!(last.subtour_sizes, vec![6]);
    assert_eq!(last.cuts_added, solution.cuts_added);
}

#[test]
fn test_objective_is_monotone() {
    let solution = solve(&two_triangles());
    assert!(solution.is_objective_monotone(1e-6));
    for (k, record) in solution.history.iter().enumerate() {
        assert_eq!(record.iteration, k as u64 + 1);
    }
}

#[test]
fn test_random_instances_match_brute_force() {
    for seed in [1, 2, 3] {
        let instance = seeded_random_instance(6, seed);
        let solution = solve(&instance);
        let optimum = brute_force_optimum(&instance);

        assert_is_tour(&solution.tour, 6);
        assert!(
            (solution.length - optimum).abs() < 1e-6 * optimum.max(1.0),
            "seed {}: got {}, optimum {}",
            seed,
            solution.length,
            optimum
        );
        assert!(solution.is_objective_monotone(1e-6));
    }
}

#[test]
fn test_asymmetric_instance() {
    // Cheap clockwise, expensive counter-clockwise.
    let instance = Instance::from_rows(&[
        vec![0.0, 1.0, 9.0],
        vec![9.0, 0.0, 1.0],
        vec![1.0, 9.0, 0.0],
    ])
    .unwrap();
    let solution = solve(&instance);
    assert_eq!(solution.tour.nodes(), &[0, 1, 2]);
    assert!((solution.length - 3.0).abs() < 1e-6);
}

#[test]
fn test_two_nodes() {
    let instance = Instance::from_rows(&[vec![0.0, 5.0], vec![3.0, 0.0]]).unwrap();
    let solution = solve(&instance);
    assert_eq!(solution.tour.nodes(), &[0, 1]);
    assert!((solution.length - 8.0).abs() < 1e-6);
    assert_eq!(solution.iterations, 0);
}

#[test]
fn test_display_report() {
    let solution = solve(&two_triangles());
    let report = solution.to_string();
    assert!(report.starts_with("Iterations      Cuts added      Objective value"));
    assert!(report.contains("Number of cuts added before optimal solution was proven:"));
    assert!(report.trim_end().ends_with("-> 0"));
}
