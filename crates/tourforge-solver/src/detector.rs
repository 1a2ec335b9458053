//! Decomposition of an arc solution into cycles.

use thiserror::Error;
use tracing::warn;

use tourforge_config::TieBreak;
use tourforge_core::{arc_selection_threshold, Instance, SolveSnapshot, TourForgeError};

use crate::subtour::{ArcValues, Subtour};

/// Why an arc solution could not be walked.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnomalyReason {
    /// No outgoing arc reaches the selection threshold.
    #[error("no outgoing arc selected (largest value {best_value:.6})")]
    NoSelectedArc { best_value: f64 },

    /// Several outgoing arcs reach the threshold and ties are not allowed.
    #[error("ambiguous successor among {candidates:?}")]
    AmbiguousSuccessor { candidates: Vec<usize> },

    /// The walk stepped onto a visited node other than its start.
    #[error("walk re-entered node {target} before closing its cycle")]
    Reentry { target: usize },
}

/// A failed decomposition, located at the node where the walk stopped.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("node {node}: {reason}")]
pub struct DetectionAnomaly {
    pub node: usize,
    pub reason: AnomalyReason,
}

impl DetectionAnomaly {
    /// Converts into the loop error, attaching the run state.
    pub fn into_error(self, snapshot: SolveSnapshot) -> TourForgeError {
        TourForgeError::SubtourDetectionAnomaly {
            node: self.node,
            reason: self.reason.to_string(),
            snapshot,
        }
    }
}

/// Walks successor arcs to split an arc solution into disjoint cycles.
///
/// An arc `i → j` counts as selected when its value is at least
/// `1 - tolerance`. Walks start at the root, then at the smallest node not
/// yet visited, so the output order is deterministic: the root's cycle comes
/// first and each cycle lists nodes in walking order.
///
/// # Examples
///
/// ```
/// use tourforge_solver::{ArcValues, SubtourDetector};
///
/// let arcs = ArcValues::from_successors(&[1, 0, 3, 2]);
/// let subtours = SubtourDetector::default().detect(&arcs).unwrap();
/// assert_eq!(subtours.len(), 2);
/// assert_eq!(subtours[0].nodes(), &[0, 1]);
/// assert_eq!(subtours[1].nodes(), &[2, 3]);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SubtourDetector {
    threshold: f64,
    tie_break: TieBreak,
}

impl Default for SubtourDetector {
    fn default() -> Self {
        Self::new(tourforge_core::INTEGRALITY_TOLERANCE)
    }
}

impl SubtourDetector {
    pub fn new(tolerance: f64) -> Self {
        Self {
            threshold: arc_selection_threshold(tolerance),
            tie_break: TieBreak::default(),
        }
    }

    pub fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Lists every cycle in `arcs`, root cycle first.
    pub fn detect(&self, arcs: &ArcValues) -> Result<Vec<Subtour>, DetectionAnomaly> {
        let n = arcs.node_count();
        let mut visited = vec![false; n];
        let mut subtours = Vec::new();
        let mut cursor = Instance::ROOT;

        loop {
            while cursor < n && visited[cursor] {
                cursor += 1;
            }
            if cursor == n {
                break;
            }

            let start = cursor;
            let mut cycle = vec![start];
            visited[start] = true;
            let mut current = start;

            loop {
                let next = self.successor(arcs, current)?;
                if next == start {
                    break;
                }
                if visited[next] {
                    return Err(DetectionAnomaly {
                        node: current,
                        reason: AnomalyReason::Reentry { target: next },
                    });
                }
                visited[next] = true;
                cycle.push(next);
                current = next;
            }

            subtours.push(Subtour::new(cycle));
        }

        Ok(subtours)
    }

    fn successor(&self, arcs: &ArcValues, node: usize) -> Result<usize, DetectionAnomaly> {
        let row = arcs.row(node);
        let candidates: Vec<usize> = row
            .iter()
            .enumerate()
            .filter(|&(j, &v)| j != node && v >= self.threshold)
            .map(|(j, _)| j)
            .collect();

        match candidates.len() {
            0 => {
                let best_value = row
                    .iter()
                    .enumerate()
                    .filter(|&(j, _)| j != node)
                    .map(|(_, &v)| v)
                    .fold(f64::NEG_INFINITY, f64::max);
                Err(DetectionAnomaly {
                    node,
                    reason: AnomalyReason::NoSelectedArc { best_value },
                })
            }
            1 => Ok(candidates[0]),
            _ => match self.tie_break {
                TieBreak::LowestIndex => {
                    warn!(
                        event = "successor_tie",
                        node,
                        candidates = ?candidates,
                        chosen = candidates[0],
                    );
                    Ok(candidates[0])
                }
                TieBreak::Strict => Err(DetectionAnomaly {
                    node,
                    reason: AnomalyReason::AmbiguousSuccessor { candidates },
                }),
            },
        }
    }
}
