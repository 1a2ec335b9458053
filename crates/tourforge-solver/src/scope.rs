//! Loop state of one solve run.

use std::time::{Duration, Instant};

use tourforge_core::SolveSnapshot;

use crate::stats::{IterationRecord, SolveStats};
use crate::subtour::Subtour;

/// Mutable state threaded through the cutting-plane loop.
///
/// The clock starts when the scope is created.
#[derive(Debug, Clone)]
pub struct SolveScope {
    start: Instant,
    stats: SolveStats,
    last_objective: Option<f64>,
    history: Vec<IterationRecord>,
}

impl Default for SolveScope {
    fn default() -> Self {
        Self::new()
    }
}

impl SolveScope {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
            stats: SolveStats::default(),
            last_objective: None,
            history: Vec::new(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Completed cutting rounds.
    pub fn iterations(&self) -> u64 {
        self.stats.cut_rounds
    }

    pub fn cuts_added(&self) -> u64 {
        self.stats.cuts_added
    }

    pub fn oracle_calls(&self) -> u64 {
        self.stats.oracle_calls
    }

    pub fn last_objective(&self) -> Option<f64> {
        self.last_objective
    }

    pub fn stats(&self) -> &SolveStats {
        &self.stats
    }

    pub fn history(&self) -> &[IterationRecord] {
        &self.history
    }

    pub fn record_oracle_call(&mut self, took: Duration) {
        self.stats.record_oracle_call(took);
    }

    pub fn record_objective(&mut self, objective: f64) {
        self.last_objective = Some(objective);
    }

    pub fn record_cut_round(&mut self, cuts: usize) {
        self.stats.record_cut_round(cuts);
    }

    /// Appends the history record for the latest oracle call.
    pub fn record_iteration(&mut self, objective_value: f64, subtours: &[Subtour]) -> &IterationRecord {
        let index = self.history.len();
        self.history.push(IterationRecord {
            iteration: self.stats.oracle_calls,
            cuts_added: self.stats.cuts_added,
            objective_value,
            subtour_count: subtours.len(),
            subtour_sizes: subtours.iter().map(Subtour::len).collect(),
        });
        &self.history[index]
    }

    /// Diagnostic state attached to loop errors.
    pub fn snapshot(&self) -> SolveSnapshot {
        SolveSnapshot {
            iterations: self.iterations(),
            cuts_added: self.cuts_added(),
            last_objective: self.last_objective,
        }
    }

    /// Consumes the scope, returning its statistics and history.
    pub fn into_parts(self) -> (SolveStats, Vec<IterationRecord>) {
        (self.stats, self.history)
    }
}
