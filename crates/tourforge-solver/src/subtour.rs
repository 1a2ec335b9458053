//! Arc solutions and the cycles found in them.

use std::fmt;

/// Values of every arc variable `x[i][j]` in one oracle solution.
///
/// Stored as a dense n×n row-major grid; the diagonal is always 0.
#[derive(Debug, Clone, PartialEq)]
pub struct ArcValues {
    n: usize,
    data: Vec<f64>,
}

impl ArcValues {
    /// All-zero values for `n` nodes.
    pub fn zeros(n: usize) -> Self {
        Self {
            n,
            data: vec![0.0; n * n],
        }
    }

    /// Values where exactly the arcs `i → successors[i]` are selected.
    ///
    /// # Examples
    ///
    /// ```
    /// use tourforge_solver::ArcValues;
    ///
    /// let arcs = ArcValues::from_successors(&[1, 2, 0]);
    /// assert_eq!(arcs.get(0, 1), 1.0);
    /// assert_eq!(arcs.get(1, 0), 0.0);
    /// ```
    pub fn from_successors(successors: &[usize]) -> Self {
        let mut arcs = Self::zeros(successors.len());
        for (i, &j) in successors.iter().enumerate() {
            arcs.set(i, j, 1.0);
        }
        arcs
    }

    pub fn node_count(&self) -> usize {
        self.n
    }

    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.n + to]
    }

    /// Sets the value of arc `from → to`; diagonal writes are ignored.
    pub fn set(&mut self, from: usize, to: usize, value: f64) {
        if from != to {
            self.data[from * self.n + to] = value;
        }
    }

    /// Outgoing values of `from`, indexed by destination.
    pub fn row(&self, from: usize) -> &[f64] {
        &self.data[from * self.n..(from + 1) * self.n]
    }
}

/// A cycle found in an arc solution, in walking order.
///
/// Holds at least two nodes; the closing arc back to the first node is
/// implicit.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Subtour {
    nodes: Vec<usize>,
}

impl Subtour {
    pub fn new(nodes: Vec<usize>) -> Self {
        debug_assert!(nodes.len() >= 2, "a subtour visits at least two nodes");
        Self { nodes }
    }

    pub fn nodes(&self) -> &[usize] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, node: usize) -> bool {
        self.nodes.contains(&node)
    }

    /// Iterates the arcs of the cycle, including the closing arc.
    pub fn arcs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let k = self.nodes.len();
        (0..k).map(move |p| (self.nodes[p], self.nodes[(p + 1) % k]))
    }

    /// Node set in ascending order.
    pub fn sorted_nodes(&self) -> Vec<usize> {
        let mut nodes = self.nodes.clone();
        nodes.sort_unstable();
        nodes
    }
}

impl fmt::Display for Subtour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for node in &self.nodes {
            write!(f, "{} -> ", node)?;
        }
        match self.nodes.first() {
            Some(first) => write!(f, "{}", first),
            None => Ok(()),
        }
    }
}

/// Returns `true` if `subtours` is one cycle through all `node_count` nodes.
pub fn is_single_tour(subtours: &[Subtour], node_count: usize) -> bool {
    subtours.len() == 1 && subtours[0].len() == node_count
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagonal_is_never_set() {
        let mut arcs = ArcValues::zeros(3);
        arcs.set(1, 1, 1.0);
        assert_eq!(arcs.get(1, 1), 0.0);
        arcs.set(1, 2, 0.5);
        assert_eq!(arcs.row(1), &[0.0, 0.0, 0.5]);
    }

    #[test]
    fn test_subtour_arcs_close_the_cycle() {
        let subtour = Subtour::new(vec![3, 5, 4]);
        assert_eq!(
            subtour.arcs().collect::<Vec<_>>(),
            vec![(3, 5), (5, 4), (4, 3)]
        );
        assert_eq!(subtour.sorted_nodes(), vec![3, 4, 5]);
        assert_eq!(subtour.to_string(), "3 -> 5 -> 4 -> 3");
    }

    #[test]
    fn test_is_single_tour() {
        let full = vec![Subtour::new(vec![0, 2, 1])];
        assert!(is_single_tour(&full, 3));
        assert!(!is_single_tour(&full, 4));

        let split = vec![Subtour::new(vec![0, 1]), Subtour::new(vec![2, 3])];
        assert!(!is_single_tour(&split, 4));
    }
}
