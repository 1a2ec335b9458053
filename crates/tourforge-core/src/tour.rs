//! Accepted Hamiltonian cycles.

use std::fmt;

use crate::error::{Result, TourForgeError};
use crate::instance::Instance;
use crate::matrix::DistanceMatrix;

/// A single cycle through every node, stored starting at the root.
///
/// The closing edge back to the root is implicit: `nodes()` holds each node
/// exactly once and `closed_sequence()` repeats the root at the end.
///
/// # Examples
///
/// ```
/// use tourforge_core::Tour;
///
/// let tour = Tour::from_cycle(&[2, 3, 0, 1], 4).unwrap();
/// assert_eq!(tour.nodes(), &[0, 1, 2, 3]);
/// assert_eq!(tour.closed_sequence(), vec![0, 1, 2, 3, 0]);
/// assert_eq!(tour.to_string(), "0 -> 1 -> 2 -> 3 -> 0");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tour {
    nodes: Vec<usize>,
}

impl Tour {
    /// Builds a tour from a cycle over all `node_count` nodes, rotating it so
    /// it starts at the root.
    ///
    /// Fails unless `cycle` is a permutation of `0..node_count`.
    pub fn from_cycle(cycle: &[usize], node_count: usize) -> Result<Self> {
        if cycle.len() != node_count {
            return Err(TourForgeError::MalformedInstance(format!(
                "cycle visits {} nodes, expected {}",
                cycle.len(),
                node_count
            )));
        }
        let mut seen = vec![false; node_count];
        for &node in cycle {
            if node >= node_count || seen[node] {
                return Err(TourForgeError::MalformedInstance(format!(
                    "cycle is not a permutation: node {} repeated or out of range",
                    node
                )));
            }
            seen[node] = true;
        }
        let start = cycle
            .iter()
            .position(|&node| node == Instance::ROOT)
            .unwrap_or(0);
        let mut nodes = Vec::with_capacity(node_count);
        nodes.extend_from_slice(&cycle[start..]);
        nodes.extend_from_slice(&cycle[..start]);
        Ok(Self { nodes })
    }

    /// Builds a tour by following a successor array from the root.
    ///
    /// `successors[i]` is the node visited after `i`.
    pub fn from_successors(successors: &[usize]) -> Result<Self> {
        let n = successors.len();
        let mut cycle = Vec::with_capacity(n);
        let mut current = Instance::ROOT;
        for _ in 0..n {
            cycle.push(current);
            current = *successors.get(current).ok_or_else(|| {
                TourForgeError::MalformedInstance(format!("successor {} out of range", current))
            })?;
        }
        if current != Instance::ROOT {
            return Err(TourForgeError::MalformedInstance(
                "successors do not close a single cycle through the root".to_string(),
            ));
        }
        Self::from_cycle(&cycle, n)
    }

    /// Nodes in visiting order, starting at the root.
    pub fn nodes(&self) -> &[usize] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nodes in visiting order with the root repeated at the end.
    pub fn closed_sequence(&self) -> Vec<usize> {
        let mut seq = self.nodes.clone();
        if let Some(&first) = self.nodes.first() {
            seq.push(first);
        }
        seq
    }

    /// Iterates the arcs `(from, to)` of the tour, including the closing arc.
    pub fn arcs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let n = self.nodes.len();
        (0..n).map(move |k| (self.nodes[k], self.nodes[(k + 1) % n]))
    }

    /// Total length: sum of consecutive distances plus the closing edge.
    pub fn length(&self, distances: &DistanceMatrix) -> f64 {
        self.arcs().map(|(from, to)| distances.get(from, to)).sum()
    }

    /// Returns `true` if `other` describes the same cycle, in either direction.
    pub fn is_equivalent(&self, other: &Tour) -> bool {
        if self.nodes == other.nodes {
            return true;
        }
        if self.nodes.len() != other.nodes.len() || other.nodes.is_empty() {
            return false;
        }
        let mut reversed = other.nodes.clone();
        reversed[1..].reverse();
        self.nodes == reversed
    }
}

impl fmt::Display for Tour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .closed_sequence()
            .iter()
            .map(|n| n.to_string())
            .collect();
        write!(f, "{}", parts.join(" -> "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cycle_rejects_repeat() {
        assert!(Tour::from_cycle(&[0, 1, 1], 3).is_err());
        assert!(Tour::from_cycle(&[0, 1], 3).is_err());
        assert!(Tour::from_cycle(&[0, 1, 5], 3).is_err());
    }

    #[test]
    fn test_from_successors() {
        // 0 -> 2 -> 1 -> 3 -> 0
        let tour = Tour::from_successors(&[2, 3, 1, 0]).unwrap();
        assert_eq!(tour.nodes(), &[0, 2, 1, 3]);
    }

    #[test]
    fn test_from_successors_two_cycles() {
        // 0 <-> 1 and 2 <-> 3
        assert!(Tour::from_successors(&[1, 0, 3, 2]).is_err());
    }

    #[test]
    fn test_length_includes_closing_edge() {
        let mut dm = DistanceMatrix::new(3);
        dm.set(0, 1, 1.0);
        dm.set(1, 2, 2.0);
        dm.set(2, 0, 4.0);
        let tour = Tour::from_cycle(&[0, 1, 2], 3).unwrap();
        assert_eq!(tour.length(&dm), 7.0);
        assert_eq!(tour.arcs().collect::<Vec<_>>(), vec![(0, 1), (1, 2), (2, 0)]);
    }

    #[test]
    fn test_equivalence_up_to_reflection() {
        let a = Tour::from_cycle(&[0, 1, 2, 3], 4).unwrap();
        let b = Tour::from_cycle(&[2, 1, 0, 3], 4).unwrap();
        let c = Tour::from_cycle(&[0, 2, 1, 3], 4).unwrap();
        assert_eq!(b.nodes(), &[0, 3, 2, 1]);
        assert!(a.is_equivalent(&b));
        assert!(!a.is_equivalent(&c));
    }
}
