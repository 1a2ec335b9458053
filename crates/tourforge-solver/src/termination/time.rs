//! Time-based termination.

use std::time::Duration;

use super::{Termination, TerminationCause};
use crate::scope::SolveScope;

/// Terminates once the run has been going for longer than a limit.
///
/// # Example
///
/// ```
/// use tourforge_solver::TimeTermination;
///
/// let term = TimeTermination::seconds(30);
/// let term = TimeTermination::millis(500);
/// ```
#[derive(Debug, Clone)]
pub struct TimeTermination {
    limit: Duration,
}

impl TimeTermination {
    pub fn new(limit: Duration) -> Self {
        Self { limit }
    }

    pub fn millis(ms: u64) -> Self {
        Self::new(Duration::from_millis(ms))
    }

    pub fn seconds(secs: u64) -> Self {
        Self::new(Duration::from_secs(secs))
    }

    pub fn limit(&self) -> Duration {
        self.limit
    }
}

impl Termination for TimeTermination {
    fn is_terminated(&self, scope: &SolveScope) -> bool {
        scope.elapsed() >= self.limit
    }

    fn cause(&self) -> TerminationCause {
        TerminationCause::TimeLimit(self.limit)
    }
}
