//! Solve statistics and per-iteration history.

use std::time::Duration;

/// One oracle call of the cutting-plane loop.
///
/// Records are kept in call order, so `history[k].iteration == k + 1`.
#[derive(Debug, Clone, PartialEq)]
pub struct IterationRecord {
    /// 1-based index of the oracle call.
    pub iteration: u64,
    /// Cuts in the model once this iteration finished, including any it added.
    pub cuts_added: u64,
    /// Objective value returned by the oracle.
    pub objective_value: f64,
    /// Cycles found in the oracle's solution.
    pub subtour_count: usize,
    /// Cycle lengths in detection order.
    pub subtour_sizes: Vec<usize>,
}

impl IterationRecord {
    /// Returns true if this iteration produced a single Hamiltonian cycle.
    pub fn is_final(&self) -> bool {
        self.subtour_count == 1
    }
}

/// Counters for one solve run.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use tourforge_solver::stats::SolveStats;
///
/// let mut stats = SolveStats::default();
/// stats.record_oracle_call(Duration::from_millis(4));
/// stats.record_cut_round(2);
/// stats.record_oracle_call(Duration::from_millis(6));
///
/// assert_eq!(stats.oracle_calls, 2);
/// assert_eq!(stats.cut_rounds, 1);
/// assert_eq!(stats.cuts_added, 2);
/// assert_eq!(stats.oracle_time, Duration::from_millis(10));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SolveStats {
    /// Oracle invocations, successful or not.
    pub oracle_calls: u64,
    /// Rounds that added cuts.
    pub cut_rounds: u64,
    /// Subtour elimination constraints added.
    pub cuts_added: u64,
    /// Time spent inside the oracle.
    pub oracle_time: Duration,
}

impl SolveStats {
    pub fn record_oracle_call(&mut self, took: Duration) {
        self.oracle_calls += 1;
        self.oracle_time += took;
    }

    pub fn record_cut_round(&mut self, cuts: usize) {
        self.cut_rounds += 1;
        self.cuts_added += cuts as u64;
    }

    /// Share of `total` spent in the oracle, in `[0, 1]`.
    pub fn oracle_share(&self, total: Duration) -> f64 {
        let secs = total.as_secs_f64();
        if secs > 0.0 {
            (self.oracle_time.as_secs_f64() / secs).min(1.0)
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_oracle_share_handles_zero_total() {
        let stats = SolveStats::default();
        assert_eq!(stats.oracle_share(Duration::ZERO), 0.0);
    }

    #[test]
    fn test_oracle_share() {
        let mut stats = SolveStats::default();
        stats.record_oracle_call(Duration::from_millis(250));
        assert!((stats.oracle_share(Duration::from_secs(1)) - 0.25).abs() < 1e-9);
    }
}
