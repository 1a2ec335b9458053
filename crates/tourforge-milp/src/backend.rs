//! Oracle backed by the pure-Rust `microlp` branch-and-bound solver.

use microlp::{ComparisonOp, OptimizationDirection, Problem};
use tracing::{debug, trace};

use crate::model::{Comparison, Model, Sense, VarDomain};
use crate::oracle::{MilpOracle, OracleResponse, SolveStatus};

/// [`MilpOracle`] implementation over [`microlp::Problem`].
///
/// Every call translates the whole model; microlp keeps no state between
/// calls, so the oracle is a pure function of its input.
///
/// # Examples
///
/// ```
/// use tourforge_milp::{
///     Comparison, ConstraintOrigin, LinearExpr, MicrolpOracle, MilpOracle, Model, Sense,
///     SolveStatus, VarDomain,
/// };
///
/// let mut model = Model::new();
/// let x = model.add_var("x", VarDomain::Binary);
/// let y = model.add_var("y", VarDomain::Binary);
/// model.set_objective(Sense::Maximize, [(x, 3.0), (y, 2.0)].into_iter().collect());
/// model.add_constraint(
///     LinearExpr::sum([x, y]),
///     Comparison::Le,
///     1.0,
///     ConstraintOrigin::formulation("pick_one", 0),
/// );
///
/// let response = MicrolpOracle::new().solve(&model);
/// assert_eq!(response.status, SolveStatus::Optimal);
/// assert!((response.objective_value - 3.0).abs() < 1e-6);
/// assert!(response.value(x) > 0.5);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct MicrolpOracle;

impl MicrolpOracle {
    pub fn new() -> Self {
        Self
    }

    fn build_problem(model: &Model) -> (Problem, Vec<microlp::Variable>) {
        let direction = match model.sense() {
            Sense::Minimize => OptimizationDirection::Minimize,
            Sense::Maximize => OptimizationDirection::Maximize,
        };
        let mut problem = Problem::new(direction);

        let mut obj_coeffs = vec![0.0; model.num_vars()];
        for &(var, coeff) in model.objective().terms() {
            obj_coeffs[var.index()] += coeff;
        }

        let vars: Vec<microlp::Variable> = model
            .variables()
            .iter()
            .zip(&obj_coeffs)
            .map(|(v, &c)| match v.domain {
                VarDomain::Binary => problem.add_binary_var(c),
                VarDomain::Integer { min, max } => problem.add_integer_var(c, (min, max)),
                VarDomain::Continuous { min, max } => problem.add_var(c, (min, max)),
            })
            .collect();

        for (_, constraint) in model.constraints().iter() {
            let op = match constraint.cmp {
                Comparison::Eq => ComparisonOp::Eq,
                Comparison::Le => ComparisonOp::Le,
                Comparison::Ge => ComparisonOp::Ge,
            };
            let terms: Vec<(microlp::Variable, f64)> = constraint
                .expr
                .terms()
                .iter()
                .map(|&(v, c)| (vars[v.index()], c))
                .collect();
            problem.add_constraint(terms, op, constraint.rhs);
        }

        (problem, vars)
    }
}

impl MilpOracle for MicrolpOracle {
    fn name(&self) -> &'static str {
        "microlp"
    }

    fn solve(&mut self, model: &Model) -> OracleResponse {
        let (problem, vars) = Self::build_problem(model);
        debug!(
            event = "oracle_call",
            backend = "microlp",
            variables = model.num_vars() as u64,
            constraints = model.constraints().len() as u64,
        );

        match problem.solve() {
            Ok(solution) => {
                let values: Vec<f64> = vars.iter().map(|&v| solution[v]).collect();
                let objective = solution.objective();
                trace!(event = "oracle_optimal", objective);
                OracleResponse::optimal(values, objective)
            }
            Err(microlp::Error::Infeasible) => {
                OracleResponse::failed(SolveStatus::Infeasible, "problem is infeasible")
            }
            Err(microlp::Error::Unbounded) => {
                OracleResponse::failed(SolveStatus::Unbounded, "problem is unbounded")
            }
            Err(err) => OracleResponse::failed(SolveStatus::SolverError, err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::LinearExpr;
    use crate::store::ConstraintOrigin;

    #[test]
    fn test_binary_minimization() {
        let mut model = Model::new();
        let a = model.add_var("a", VarDomain::Binary);
        let b = model.add_var("b", VarDomain::Binary);
        let c = model.add_var("c", VarDomain::Binary);
        model.set_objective(
            Sense::Minimize,
            [(a, 4.0), (b, 1.0), (c, 2.0)].into_iter().collect(),
        );
        model.add_constraint(
            LinearExpr::sum([a, b, c]),
            Comparison::Eq,
            2.0,
            ConstraintOrigin::formulation("choose_two", 0),
        );

        let response = MicrolpOracle::new().solve(&model);
        assert!(response.is_optimal());
        assert!((response.objective_value - 3.0).abs() < 1e-6);
        assert!(response.value(a) < 0.5);
        assert!(response.value(b) > 0.5);
        assert!(response.value(c) > 0.5);
    }

    #[test]
    fn test_infeasible() {
        let mut model = Model::new();
        let a = model.add_var("a", VarDomain::Binary);
        model.set_objective(Sense::Minimize, LinearExpr::sum([a]));
        model.add_constraint(
            LinearExpr::sum([a]),
            Comparison::Ge,
            2.0,
            ConstraintOrigin::formulation("impossible", 0),
        );

        let response = MicrolpOracle::new().solve(&model);
        assert_eq!(response.status, SolveStatus::Infeasible);
        assert!(response.values.is_empty());
    }

    #[test]
    fn test_unbounded() {
        let mut model = Model::new();
        let x = model.add_var(
            "x",
            VarDomain::Continuous {
                min: 0.0,
                max: f64::INFINITY,
            },
        );
        model.set_objective(Sense::Maximize, LinearExpr::sum([x]));
        model.add_constraint(
            LinearExpr::sum([x]),
            Comparison::Ge,
            1.0,
            ConstraintOrigin::formulation("floor", 0),
        );

        let response = MicrolpOracle::new().solve(&model);
        assert_eq!(response.status, SolveStatus::Unbounded);
    }

    #[test]
    fn test_adding_a_cut_tightens_the_optimum() {
        let mut model = Model::new();
        let vars: Vec<_> = (0..3)
            .map(|i| model.add_var(format!("x{}", i), VarDomain::Binary))
            .collect();
        model.set_objective(
            Sense::Maximize,
            vars.iter().map(|&v| (v, 1.0)).collect(),
        );
        model.add_constraint(
            LinearExpr::sum(vars.iter().copied()),
            Comparison::Le,
            3.0,
            ConstraintOrigin::formulation("capacity", 0),
        );
        let mut oracle = MicrolpOracle::new();
        let before = oracle.solve(&model);
        assert!((before.objective_value - 3.0).abs() < 1e-6);

        model.add_constraint(
            LinearExpr::sum(vars.iter().copied()),
            Comparison::Le,
            2.0,
            ConstraintOrigin::cut(1, vec![0, 1, 2]),
        );
        let after = oracle.solve(&model);
        assert!((after.objective_value - 2.0).abs() < 1e-6);
    }
}
