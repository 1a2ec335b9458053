//! TourForge - an exact TSP solver in Rust
//!
//! Solves the asymmetric or symmetric traveling salesman problem to proven
//! optimality by lazily adding subtour elimination cuts to an assignment
//! model.
//!
//! # Example
//!
//! ```rust
//! use tourforge::prelude::*;
//!
//! let instance = Instance::from_points(vec![
//!     Point::new(0.0, 0.0),
//!     Point::new(0.0, 1.0),
//!     Point::new(1.0, 1.0),
//!     Point::new(1.0, 0.0),
//! ])
//! .unwrap();
//!
//! let solution = solve_tour(&instance).unwrap();
//! assert!((solution.length - 4.0).abs() < 1e-6);
//! ```

// Problem data
pub use tourforge_core::{
    DistanceMatrix, ErrorKind, Instance, Point, Result, SolveSnapshot, Tour, TourForgeError,
};

// Configuration
pub use tourforge_config::{EnvironmentMode, SolverConfig, TerminationConfig, TieBreak};

// Oracle seam
pub use tourforge_milp::{MicrolpOracle, MilpOracle, Model, OracleResponse, SolveStatus};

// Solver
pub use tourforge_solver::{
    CountingEventListener, CuttingPlaneSolver, ExternalTermination, IterationRecord,
    LoggingEventListener, SolveEventListener, TimeTermination, TourSolution,
};

#[cfg(feature = "console")]
pub mod console;

mod solver;
pub use solver::{solve_file, solve_tour, solve_tour_with_config};

pub mod prelude {
    pub use super::{solve_file, solve_tour, solve_tour_with_config};
    pub use super::{CuttingPlaneSolver, MicrolpOracle, SolverConfig, TourSolution};
    pub use super::{Instance, Point, Tour, TourForgeError};
}
