//! Wall-clock and external stop conditions for the solve loop.
//!
//! Terminations are polled before every oracle call. The iteration bound is
//! not a termination: it is enforced when a round is about to add cuts, so
//! the model produced by the last allowed round is still solved.

mod external;
mod time;

use std::fmt::Debug;
use std::time::Duration;

use tourforge_core::{SolveSnapshot, TourForgeError};

use crate::scope::SolveScope;

pub use external::ExternalTermination;
pub use time::TimeTermination;

/// Decides whether the solve loop must stop before its next oracle call.
pub trait Termination: Send + Debug {
    /// Returns true if solving should stop.
    fn is_terminated(&self, scope: &SolveScope) -> bool;

    /// What stopped the run, used to build the reported error.
    fn cause(&self) -> TerminationCause;
}

/// Why a termination fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationCause {
    TimeLimit(Duration),
    Cancelled,
}

impl TerminationCause {
    pub fn into_error(self, snapshot: SolveSnapshot) -> TourForgeError {
        match self {
            TerminationCause::TimeLimit(limit) => {
                TourForgeError::TimeLimitExceeded { limit, snapshot }
            }
            TerminationCause::Cancelled => TourForgeError::Cancelled { snapshot },
        }
    }
}

#[cfg(test)]
mod tests;
