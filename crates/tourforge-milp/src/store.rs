//! Append-only constraint arena.

use std::fmt;

use crate::model::{Comparison, LinearExpr};

/// Index of a constraint within its [`ConstraintStore`].
///
/// Ids stay valid for the lifetime of the store because records are never
/// removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ConstraintId(usize);

impl ConstraintId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Where a constraint came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConstraintOrigin {
    /// Built with the initial formulation. `family` names the constraint
    /// group and `index` the member within it.
    Formulation { family: &'static str, index: usize },
    /// Added by cutting round `round` over the node subset `support`.
    Cut { round: u64, support: Vec<usize> },
}

impl ConstraintOrigin {
    pub fn formulation(family: &'static str, index: usize) -> Self {
        ConstraintOrigin::Formulation { family, index }
    }

    pub fn cut(round: u64, support: Vec<usize>) -> Self {
        ConstraintOrigin::Cut { round, support }
    }

    pub fn is_cut(&self) -> bool {
        matches!(self, ConstraintOrigin::Cut { .. })
    }
}

impl fmt::Display for ConstraintOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstraintOrigin::Formulation { family, index } => write!(f, "{}[{}]", family, index),
            ConstraintOrigin::Cut { round, support } => {
                write!(f, "cut#{} over {:?}", round, support)
            }
        }
    }
}

/// A linear constraint `expr cmp rhs` with its origin.
#[derive(Debug, Clone, PartialEq)]
pub struct Constraint {
    pub expr: LinearExpr,
    pub cmp: Comparison,
    pub rhs: f64,
    pub origin: ConstraintOrigin,
}

impl Constraint {
    /// Returns `true` if `values` satisfy the constraint within `tolerance`.
    pub fn is_satisfied(&self, values: &[f64], tolerance: f64) -> bool {
        let lhs = self.expr.evaluate(values);
        match self.cmp {
            Comparison::Eq => (lhs - self.rhs).abs() <= tolerance,
            Comparison::Le => lhs <= self.rhs + tolerance,
            Comparison::Ge => lhs >= self.rhs - tolerance,
        }
    }
}

/// Append-only collection of constraints addressed by [`ConstraintId`].
///
/// # Examples
///
/// ```
/// use tourforge_milp::{Comparison, Constraint, ConstraintOrigin, ConstraintStore, LinearExpr};
///
/// let mut store = ConstraintStore::new();
/// let id = store.push(Constraint {
///     expr: LinearExpr::new(),
///     cmp: Comparison::Le,
///     rhs: 1.0,
///     origin: ConstraintOrigin::cut(1, vec![0, 1]),
/// });
/// assert_eq!(store.len(), 1);
/// assert_eq!(store.cut_count(), 1);
/// assert!(store.get(id).origin.is_cut());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConstraintStore {
    records: Vec<Constraint>,
}

impl ConstraintStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a constraint and returns its id.
    pub fn push(&mut self, constraint: Constraint) -> ConstraintId {
        let id = ConstraintId(self.records.len());
        self.records.push(constraint);
        id
    }

    /// Returns the constraint with the given id.
    ///
    /// # Panics
    ///
    /// Panics if the id came from a different store.
    pub fn get(&self, id: ConstraintId) -> &Constraint {
        &self.records[id.0]
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterates records in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (ConstraintId, &Constraint)> + '_ {
        self.records
            .iter()
            .enumerate()
            .map(|(i, c)| (ConstraintId(i), c))
    }

    /// Iterates only the lazily added cuts.
    pub fn cuts(&self) -> impl Iterator<Item = (ConstraintId, &Constraint)> + '_ {
        self.iter().filter(|(_, c)| c.origin.is_cut())
    }

    /// Number of lazily added cuts.
    pub fn cut_count(&self) -> usize {
        self.records.iter().filter(|c| c.origin.is_cut()).count()
    }
}
