//! Variables, linear expressions, and the model handed to an oracle.

use std::fmt;

use crate::store::{Constraint, ConstraintId, ConstraintOrigin, ConstraintStore};

/// Index of a decision variable within its [`Model`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VarId(usize);

impl VarId {
    /// Position of the variable in the model's addition sequence.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for VarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// Domain of a decision variable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VarDomain {
    /// 0 or 1.
    Binary,
    /// Integer within inclusive bounds.
    Integer { min: i32, max: i32 },
    /// Real within inclusive bounds; use infinities for free sides.
    Continuous { min: f64, max: f64 },
}

impl VarDomain {
    pub fn is_integral(&self) -> bool {
        !matches!(self, VarDomain::Continuous { .. })
    }
}

/// A declared decision variable.
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    pub name: String,
    pub domain: VarDomain,
}

/// Optimization direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Sense {
    #[default]
    Minimize,
    Maximize,
}

/// Relation between the left- and right-hand side of a constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Eq,
    Le,
    Ge,
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Comparison::Eq => "=",
            Comparison::Le => "<=",
            Comparison::Ge => ">=",
        };
        f.write_str(s)
    }
}

/// A sum of variables multiplied by constant coefficients.
///
/// Terms are kept sorted by variable. Adding a variable that is already
/// present accumulates its coefficient, so every variable appears at most once.
///
/// # Examples
///
/// ```
/// use tourforge_milp::{LinearExpr, Model, VarDomain};
///
/// let mut model = Model::new();
/// let x = model.add_var("x", VarDomain::Binary);
/// let y = model.add_var("y", VarDomain::Binary);
///
/// let mut expr = LinearExpr::new();
/// expr.add(x, 1.0);
/// expr.add(y, 2.0);
/// expr.add(x, 0.5);
/// assert_eq!(expr.len(), 2);
/// assert_eq!(expr.evaluate(&[1.0, 1.0]), 3.5);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinearExpr {
    terms: Vec<(VarId, f64)>,
}

impl LinearExpr {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `coeff * var` to the expression.
    pub fn add(&mut self, var: VarId, coeff: f64) {
        if self.terms.last().map_or(true, |&(last, _)| last < var) {
            self.terms.push((var, coeff));
            return;
        }
        match self.terms.binary_search_by_key(&var, |&(v, _)| v) {
            Ok(pos) => self.terms[pos].1 += coeff,
            Err(pos) => self.terms.insert(pos, (var, coeff)),
        }
    }

    /// Sum of the given variables, each with coefficient 1.
    pub fn sum(vars: impl IntoIterator<Item = VarId>) -> Self {
        vars.into_iter().map(|v| (v, 1.0)).collect()
    }

    pub fn terms(&self) -> &[(VarId, f64)] {
        &self.terms
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Value of the expression under an assignment indexed by [`VarId::index`].
    pub fn evaluate(&self, values: &[f64]) -> f64 {
        self.terms
            .iter()
            .map(|&(v, c)| c * values.get(v.index()).copied().unwrap_or(0.0))
            .sum()
    }
}

impl FromIterator<(VarId, f64)> for LinearExpr {
    fn from_iter<I: IntoIterator<Item = (VarId, f64)>>(iter: I) -> Self {
        let mut expr = LinearExpr::new();
        for (var, coeff) in iter {
            expr.add(var, coeff);
        }
        expr
    }
}

/// A mixed-integer linear program: variables, objective, constraints.
///
/// The constraint store is append-only. The model is built once and then
/// grows as cuts are added; it is never rebuilt from scratch.
#[derive(Debug, Clone, Default)]
pub struct Model {
    variables: Vec<Variable>,
    sense: Sense,
    objective: LinearExpr,
    constraints: ConstraintStore,
}

impl Model {
    /// Creates an empty minimization model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a decision variable.
    pub fn add_var(&mut self, name: impl Into<String>, domain: VarDomain) -> VarId {
        let id = VarId(self.variables.len());
        self.variables.push(Variable {
            name: name.into(),
            domain,
        });
        id
    }

    /// Replaces the objective.
    pub fn set_objective(&mut self, sense: Sense, objective: LinearExpr) {
        self.sense = sense;
        self.objective = objective;
    }

    /// Appends a constraint and returns its id.
    pub fn add_constraint(
        &mut self,
        expr: LinearExpr,
        cmp: Comparison,
        rhs: f64,
        origin: ConstraintOrigin,
    ) -> ConstraintId {
        self.constraints.push(Constraint {
            expr,
            cmp,
            rhs,
            origin,
        })
    }

    /// Appends an already built constraint.
    pub fn push_constraint(&mut self, constraint: Constraint) -> ConstraintId {
        self.constraints.push(constraint)
    }

    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    pub fn variable(&self, var: VarId) -> &Variable {
        &self.variables[var.index()]
    }

    pub fn num_vars(&self) -> usize {
        self.variables.len()
    }

    pub fn sense(&self) -> Sense {
        self.sense
    }

    pub fn objective(&self) -> &LinearExpr {
        &self.objective
    }

    pub fn constraints(&self) -> &ConstraintStore {
        &self.constraints
    }

    /// Returns the ids of constraints violated by `values` beyond `tolerance`.
    pub fn violated_constraints(&self, values: &[f64], tolerance: f64) -> Vec<ConstraintId> {
        self.constraints
            .iter()
            .filter(|(_, c)| !c.is_satisfied(values, tolerance))
            .map(|(id, _)| id)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_var_sequence() {
        let mut model = Model::new();
        let a = model.add_var("a", VarDomain::Binary);
        let b = model.add_var(
            "b",
            VarDomain::Continuous {
                min: 0.0,
                max: f64::INFINITY,
            },
        );
        assert_eq!(a.index(), 0);
        assert_eq!(b.index(), 1);
        assert_eq!(model.num_vars(), 2);
        assert_eq!(model.variable(b).name, "b");
        assert!(model.variable(a).domain.is_integral());
        assert!(!model.variable(b).domain.is_integral());
    }

    #[test]
    fn test_sum_expression() {
        let mut model = Model::new();
        let vars: Vec<VarId> = (0..3)
            .map(|i| model.add_var(format!("x{}", i), VarDomain::Binary))
            .collect();
        let expr = LinearExpr::sum(vars.iter().copied());
        assert_eq!(expr.len(), 3);
        assert_eq!(expr.evaluate(&[1.0, 0.0, 1.0]), 2.0);
    }

    #[test]
    fn test_terms_stay_sorted_and_merged() {
        let mut model = Model::new();
        let vars: Vec<VarId> = (0..4)
            .map(|i| model.add_var(format!("x{}", i), VarDomain::Binary))
            .collect();
        let expr: LinearExpr = [
            (vars[2], 1.0),
            (vars[0], 2.0),
            (vars[3], 1.0),
            (vars[2], 0.5),
            (vars[1], 4.0),
            (vars[0], 1.0),
        ]
        .into_iter()
        .collect();
        assert_eq!(
            expr.terms(),
            &[(vars[0], 3.0), (vars[1], 4.0), (vars[2], 1.5), (vars[3], 1.0)]
        );
    }

    #[test]
    fn test_violated_constraints() {
        let mut model = Model::new();
        let x = model.add_var("x", VarDomain::Binary);
        let y = model.add_var("y", VarDomain::Binary);
        let le = model.add_constraint(
            LinearExpr::sum([x, y]),
            Comparison::Le,
            1.0,
            ConstraintOrigin::formulation("pack", 0),
        );
        let eq = model.add_constraint(
            LinearExpr::sum([x]),
            Comparison::Eq,
            1.0,
            ConstraintOrigin::formulation("fix", 0),
        );

        assert!(model.violated_constraints(&[1.0, 0.0], 1e-9).is_empty());
        assert_eq!(model.violated_constraints(&[1.0, 1.0], 1e-9), vec![le]);
        assert_eq!(model.violated_constraints(&[0.0, 1.0], 1e-9), vec![eq]);
    }

    #[test]
    fn test_comparison_display() {
        assert_eq!(Comparison::Le.to_string(), "<=");
        assert_eq!(VarId(4).to_string(), "v4");
    }
}
