//! Error types for TourForge

use std::fmt;
use std::time::Duration;

use thiserror::Error;

/// State of the cutting-plane loop at the moment a run aborted.
///
/// Every loop failure carries one of these so callers can report how far the
/// run got before it stopped.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SolveSnapshot {
    /// Completed cutting rounds.
    pub iterations: u64,
    /// Subtour elimination constraints added so far.
    pub cuts_added: u64,
    /// Objective value of the most recent oracle solution, if any.
    pub last_objective: Option<f64>,
}

impl fmt::Display for SolveSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "after {} iterations, {} cuts",
            self.iterations, self.cuts_added
        )?;
        if let Some(obj) = self.last_objective {
            write!(f, ", last objective {:.4}", obj)?;
        }
        Ok(())
    }
}

/// Main error type for TourForge operations
#[derive(Debug, Error)]
pub enum TourForgeError {
    /// Problem data is inconsistent; raised before any solve attempt.
    #[error("Malformed instance: {0}")]
    MalformedInstance(String),

    /// Invalid solver configuration value.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The oracle proved the current (possibly cut-augmented) model infeasible.
    #[error("Model is infeasible ({snapshot})")]
    SolverInfeasible { snapshot: SolveSnapshot },

    /// The oracle reported an unbounded objective.
    #[error("Model is unbounded ({snapshot})")]
    SolverUnbounded { snapshot: SolveSnapshot },

    /// The oracle failed for a reason unrelated to the model's feasibility.
    #[error("Solver failure: {message} ({snapshot})")]
    SolverError {
        message: String,
        snapshot: SolveSnapshot,
    },

    /// Arc values could not be decomposed into cycles deterministically.
    #[error("Subtour detection anomaly at node {node}: {reason} ({snapshot})")]
    SubtourDetectionAnomaly {
        node: usize,
        reason: String,
        snapshot: SolveSnapshot,
    },

    /// The configured iteration bound was reached without a single tour.
    #[error("Iteration limit of {limit} exceeded ({snapshot})")]
    IterationLimitExceeded { limit: u64, snapshot: SolveSnapshot },

    /// The configured wall-clock bound was reached without a single tour.
    #[error("Time limit of {limit:?} exceeded ({snapshot})")]
    TimeLimitExceeded {
        limit: Duration,
        snapshot: SolveSnapshot,
    },

    /// The run was cancelled through its external flag.
    #[error("Solve was cancelled ({snapshot})")]
    Cancelled { snapshot: SolveSnapshot },
}

/// Coarse classification of a [`TourForgeError`] for user-facing reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The input data or configuration was rejected.
    InvalidInput,
    /// The problem is provably infeasible.
    ProvenInfeasible,
    /// The solver or the solution it produced could not be used.
    SolverFailure,
    /// A configured safety bound stopped the run.
    SafetyLimit,
}

impl TourForgeError {
    /// Classifies this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MalformedInstance(_) | Self::Config(_) => ErrorKind::InvalidInput,
            Self::SolverInfeasible { .. } => ErrorKind::ProvenInfeasible,
            Self::SolverUnbounded { .. }
            | Self::SolverError { .. }
            | Self::SubtourDetectionAnomaly { .. } => ErrorKind::SolverFailure,
            Self::IterationLimitExceeded { .. }
            | Self::TimeLimitExceeded { .. }
            | Self::Cancelled { .. } => ErrorKind::SafetyLimit,
        }
    }

    /// Returns the loop snapshot attached to this error, if it came from a solve.
    pub fn snapshot(&self) -> Option<&SolveSnapshot> {
        match self {
            Self::MalformedInstance(_) | Self::Config(_) => None,
            Self::SolverInfeasible { snapshot }
            | Self::SolverUnbounded { snapshot }
            | Self::SolverError { snapshot, .. }
            | Self::SubtourDetectionAnomaly { snapshot, .. }
            | Self::IterationLimitExceeded { snapshot, .. }
            | Self::TimeLimitExceeded { snapshot, .. }
            | Self::Cancelled { snapshot } => Some(snapshot),
        }
    }
}

/// Result type alias for TourForge operations
pub type Result<T> = std::result::Result<T, TourForgeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_distinguishes_user_visible_classes() {
        let snapshot = SolveSnapshot::default();
        assert_eq!(
            TourForgeError::SolverInfeasible { snapshot }.kind(),
            ErrorKind::ProvenInfeasible
        );
        assert_eq!(
            TourForgeError::SolverError {
                message: "lu failed".into(),
                snapshot
            }
            .kind(),
            ErrorKind::SolverFailure
        );
        assert_eq!(
            TourForgeError::IterationLimitExceeded { limit: 5, snapshot }.kind(),
            ErrorKind::SafetyLimit
        );
        assert_eq!(
            TourForgeError::MalformedInstance("x".into()).kind(),
            ErrorKind::InvalidInput
        );
    }

    #[test]
    fn test_snapshot_display() {
        let snapshot = SolveSnapshot {
            iterations: 3,
            cuts_added: 7,
            last_objective: Some(12.5),
        };
        let err = TourForgeError::Cancelled { snapshot };
        assert_eq!(
            err.to_string(),
            "Solve was cancelled (after 3 iterations, 7 cuts, last objective 12.5000)"
        );
        assert_eq!(err.snapshot(), Some(&snapshot));
    }

    #[test]
    fn test_malformed_has_no_snapshot() {
        let err = TourForgeError::MalformedInstance("not square".into());
        assert!(err.snapshot().is_none());
        assert_eq!(err.to_string(), "Malformed instance: not square");
    }
}
