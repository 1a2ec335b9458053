//! The accepted tour and its diagnostics.

use std::fmt;
use std::time::Duration;

use tourforge_core::{DistanceMatrix, Tour};

use crate::stats::{IterationRecord, SolveStats};

/// Result of a successful solve.
#[derive(Debug, Clone)]
pub struct TourSolution {
    /// The accepted cycle, starting at the root.
    pub tour: Tour,
    /// Sum of the tour's arc distances, closing arc included.
    pub length: f64,
    /// Objective value of the final oracle solution.
    pub objective_value: f64,
    /// Cutting rounds performed.
    pub iterations: u64,
    /// Oracle calls, always `iterations + 1`.
    pub solve_count: u64,
    /// Subtour elimination constraints added.
    pub cuts_added: u64,
    /// Wall-clock time of the whole run.
    pub elapsed: Duration,
    /// One record per oracle call.
    pub history: Vec<IterationRecord>,
    pub stats: SolveStats,
}

impl TourSolution {
    /// Assembles the report for `tour`, computing its length from `distances`.
    pub fn new(
        tour: Tour,
        distances: &DistanceMatrix,
        objective_value: f64,
        stats: SolveStats,
        history: Vec<IterationRecord>,
        elapsed: Duration,
    ) -> Self {
        let length = tour.length(distances);
        Self {
            tour,
            length,
            objective_value,
            iterations: stats.cut_rounds,
            solve_count: stats.oracle_calls,
            cuts_added: stats.cuts_added,
            elapsed,
            history,
            stats,
        }
    }

    /// Node sequence starting at the root.
    pub fn nodes(&self) -> &[usize] {
        self.tour.nodes()
    }

    /// Returns true if the objective never decreased from one oracle call to
    /// the next, within `tolerance`.
    pub fn is_objective_monotone(&self, tolerance: f64) -> bool {
        self.history
            .windows(2)
            .all(|w| w[1].objective_value >= w[0].objective_value - tolerance)
    }

    /// The closing lines of the report without the iteration table.
    pub fn summary(&self) -> SolutionSummary<'_> {
        SolutionSummary(self)
    }
}

/// Timing, cut count, objective and tour of a [`TourSolution`].
pub struct SolutionSummary<'a>(&'a TourSolution);

impl fmt::Display for SolutionSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let solution = self.0;
        writeln!(
            f,
            "Solution process took {:.6} seconds",
            solution.elapsed.as_secs_f64()
        )?;
        writeln!(
            f,
            "Number of cuts added before optimal solution was proven: {}",
            solution.cuts_added
        )?;
        writeln!(f, "Objective function value = {:.4}", solution.objective_value)?;
        writeln!(f, "Tour length = {:.4}", solution.length)?;
        write!(f, "Optimal tour is {}", solution.tour)
    }
}

impl fmt::Display for TourSolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{: >10} {: >15} {: >20}",
            "Iterations", "Cuts added", "Objective value"
        )?;
        for record in self.history.iter().filter(|r| !r.is_final()) {
            writeln!(
                f,
                "{: >10} {: >15} {: >20.4}",
                record.iteration, record.cuts_added, record.objective_value
            )?;
        }
        write!(f, "{}", self.summary())
    }
}
