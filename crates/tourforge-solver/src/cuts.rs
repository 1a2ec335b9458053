//! Subtour elimination constraints.

use tourforge_milp::{Comparison, Constraint, ConstraintOrigin, LinearExpr};

use crate::formulation::ArcVariables;
use crate::subtour::Subtour;

/// Builds `Σ_{i,j ∈ S, i≠j} x[i,j] ≤ |S| - 1` for the node set of `subtour`.
///
/// The constraint covers every arc inside the set, not only the arcs the
/// subtour walked, so it also excludes every other cycle on the same nodes.
pub fn subtour_elimination_cut(subtour: &Subtour, arcs: &ArcVariables, round: u64) -> Constraint {
    let support = subtour.sorted_nodes();
    let expr = LinearExpr::sum(
        support
            .iter()
            .flat_map(|&i| support.iter().filter_map(move |&j| arcs.get(i, j))),
    );
    Constraint {
        expr,
        cmp: Comparison::Le,
        rhs: (support.len() - 1) as f64,
        origin: ConstraintOrigin::cut(round, support),
    }
}

/// One cut per detected subtour, in detection order.
pub fn generate_cuts(subtours: &[Subtour], arcs: &ArcVariables, round: u64) -> Vec<Constraint> {
    subtours
        .iter()
        .map(|s| subtour_elimination_cut(s, arcs, round))
        .collect()
}
