//! TourForge Solver Engine
//!
//! This crate provides the exact cutting-plane TSP solver:
//! - Assignment formulation with degree constraints ([`formulation`])
//! - Subtour detection over arc solutions ([`detector`])
//! - Subtour elimination cut synthesis ([`cuts`])
//! - The solve loop with its safety bounds ([`solver`], [`termination`])
//! - Run state, diagnostics and the final report ([`scope`], [`stats`], [`report`])
//! - Event hooks for monitoring ([`event`])

pub mod cuts;
pub mod detector;
pub mod event;
pub mod formulation;
pub mod report;
pub mod scope;
pub mod solver;
pub mod stats;
pub mod subtour;
pub mod termination;

pub use cuts::{generate_cuts, subtour_elimination_cut};
pub use detector::{AnomalyReason, DetectionAnomaly, SubtourDetector};
pub use event::{CountingEventListener, LoggingEventListener, SolveEventListener, SolveEventSupport};
pub use formulation::{ArcVariables, TspFormulation};
pub use report::{SolutionSummary, TourSolution};
pub use scope::SolveScope;
pub use solver::CuttingPlaneSolver;
pub use stats::{IterationRecord, SolveStats};
pub use subtour::{is_single_tour, ArcValues, Subtour};
pub use termination::{ExternalTermination, Termination, TerminationCause, TimeTermination};
pub use tourforge_config::TieBreak;
