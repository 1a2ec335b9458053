//! The solver oracle contract.

use std::fmt::{self, Debug};

use crate::model::{Model, VarId};

/// Outcome class of an oracle call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveStatus {
    /// An optimal assignment was found.
    Optimal,
    /// No assignment satisfies the constraints.
    Infeasible,
    /// The objective is unbounded in the optimization direction.
    Unbounded,
    /// The solver failed for a reason unrelated to the model's feasibility.
    SolverError,
}

impl fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SolveStatus::Optimal => "optimal",
            SolveStatus::Infeasible => "infeasible",
            SolveStatus::Unbounded => "unbounded",
            SolveStatus::SolverError => "solver error",
        };
        f.write_str(s)
    }
}

/// What an oracle returns: status, variable values, objective value.
///
/// `values` is indexed by [`VarId::index`] and is empty unless the status is
/// [`SolveStatus::Optimal`]. Values of integral variables are near-integral
/// but not guaranteed to be exact.
#[derive(Debug, Clone, PartialEq)]
pub struct OracleResponse {
    pub status: SolveStatus,
    pub values: Vec<f64>,
    pub objective_value: f64,
    /// Backend-specific detail for non-optimal outcomes.
    pub message: Option<String>,
}

impl OracleResponse {
    /// An optimal response.
    pub fn optimal(values: Vec<f64>, objective_value: f64) -> Self {
        Self {
            status: SolveStatus::Optimal,
            values,
            objective_value,
            message: None,
        }
    }

    /// A response without a usable assignment.
    pub fn failed(status: SolveStatus, message: impl Into<String>) -> Self {
        Self {
            status,
            values: Vec::new(),
            objective_value: f64::NAN,
            message: Some(message.into()),
        }
    }

    pub fn is_optimal(&self) -> bool {
        self.status == SolveStatus::Optimal
    }

    /// Value of `var`, or 0 if the response carries no assignment for it.
    pub fn value(&self, var: VarId) -> f64 {
        self.values.get(var.index()).copied().unwrap_or(0.0)
    }
}

/// A black-box mixed-integer solver.
///
/// The cutting-plane loop treats implementations as pure functions of the
/// model they are given; any internal state (warm starts, caches) must not
/// change the answer for the same model.
pub trait MilpOracle: Debug {
    /// Short backend name used in log events.
    fn name(&self) -> &'static str;

    /// Solves `model` to optimality or reports why it could not.
    fn solve(&mut self, model: &Model) -> OracleResponse;
}

impl<O: MilpOracle + ?Sized> MilpOracle for &mut O {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn solve(&mut self, model: &Model) -> OracleResponse {
        (**self).solve(model)
    }
}

impl<O: MilpOracle + ?Sized> MilpOracle for Box<O> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn solve(&mut self, model: &Model) -> OracleResponse {
        (**self).solve(model)
    }
}
