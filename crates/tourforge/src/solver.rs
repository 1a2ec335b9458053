//! One-call entry points using the bundled oracle.

use std::path::Path;

use tourforge_config::SolverConfig;
use tourforge_core::{Instance, Result};
use tourforge_milp::MicrolpOracle;
use tourforge_solver::{CuttingPlaneSolver, TourSolution};

/// Solves `instance` with the configuration in `solver.toml`, if present.
///
/// A missing or unreadable `solver.toml` falls back to the defaults.
pub fn solve_tour(instance: &Instance) -> Result<TourSolution> {
    let config = SolverConfig::load("solver.toml").unwrap_or_default();
    solve_tour_with_config(instance, config)
}

/// Solves `instance` with an explicit configuration.
pub fn solve_tour_with_config(instance: &Instance, config: SolverConfig) -> Result<TourSolution> {
    #[cfg(feature = "console")]
    crate::console::init();

    CuttingPlaneSolver::new(MicrolpOracle::new())
        .with_config(config)
        .solve(instance)
}

/// Reads a JSON instance file and solves it.
///
/// See [`Instance::from_json_file`] for the accepted format.
pub fn solve_file(path: impl AsRef<Path>) -> Result<TourSolution> {
    let instance = Instance::from_json_file(path)?;
    solve_tour(&instance)
}
