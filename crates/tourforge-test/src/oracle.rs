//! A scripted [`MilpOracle`] for driving the solve loop deterministically.

use tourforge_milp::{MilpOracle, Model, OracleResponse, SolveStatus};

/// One scripted oracle answer.
#[derive(Debug, Clone, PartialEq)]
pub enum ScriptStep {
    /// Optimal; exactly the arcs `i → successors[i]` are set to 1.
    Successors { successors: Vec<usize>, objective: f64 },
    /// Optimal; arc `i → j` takes `values[i][j]`.
    Arcs { values: Vec<Vec<f64>>, objective: f64 },
    /// A non-optimal status with no assignment.
    Status(SolveStatus),
}

/// Replays a fixed list of answers, one per call.
///
/// Values are mapped onto the model through variable names of the form
/// `x[i,j]`; other variables are left at 0. Once the script is exhausted the
/// last step repeats.
///
/// # Example
///
/// ```
/// use tourforge_milp::{MilpOracle, Model, VarDomain};
/// use tourforge_test::ScriptedOracle;
///
/// let mut model = Model::new();
/// let x01 = model.add_var("x[0,1]", VarDomain::Binary);
/// let x10 = model.add_var("x[1,0]", VarDomain::Binary);
///
/// let mut oracle = ScriptedOracle::new().then_successors(vec![1, 0], 2.0);
/// let response = oracle.solve(&model);
/// assert_eq!(response.value(x01), 1.0);
/// assert_eq!(response.value(x10), 1.0);
/// assert_eq!(oracle.calls(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScriptedOracle {
    steps: Vec<ScriptStep>,
    calls: usize,
    constraint_counts: Vec<usize>,
}

impl ScriptedOracle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn then(mut self, step: ScriptStep) -> Self {
        self.steps.push(step);
        self
    }

    pub fn then_successors(self, successors: Vec<usize>, objective: f64) -> Self {
        self.then(ScriptStep::Successors {
            successors,
            objective,
        })
    }

    pub fn then_arcs(self, values: Vec<Vec<f64>>, objective: f64) -> Self {
        self.then(ScriptStep::Arcs { values, objective })
    }

    pub fn then_status(self, status: SolveStatus) -> Self {
        self.then(ScriptStep::Status(status))
    }

    /// Number of `solve` calls so far.
    pub fn calls(&self) -> usize {
        self.calls
    }

    /// Constraint count of the model seen by each call.
    pub fn constraint_counts(&self) -> &[usize] {
        &self.constraint_counts
    }

    fn step(&self) -> Option<&ScriptStep> {
        self.steps
            .get(self.calls)
            .or_else(|| self.steps.last())
    }
}

fn parse_arc(name: &str) -> Option<(usize, usize)> {
    let inner = name.strip_prefix("x[")?.strip_suffix(']')?;
    let (i, j) = inner.split_once(',')?;
    Some((i.trim().parse().ok()?, j.trim().parse().ok()?))
}

fn assign(model: &Model, value: impl Fn(usize, usize) -> f64) -> Vec<f64> {
    model
        .variables()
        .iter()
        .map(|v| parse_arc(&v.name).map_or(0.0, |(i, j)| value(i, j)))
        .collect()
}

impl MilpOracle for ScriptedOracle {
    fn name(&self) -> &'static str {
        "scripted"
    }

    fn solve(&mut self, model: &Model) -> OracleResponse {
        let response = match self.step() {
            Some(ScriptStep::Successors {
                successors,
                objective,
            }) => {
                let values = assign(model, |i, j| {
                    if successors.get(i) == Some(&j) {
                        1.0
                    } else {
                        0.0
                    }
                });
                OracleResponse::optimal(values, *objective)
            }
            Some(ScriptStep::Arcs { values, objective }) => {
                let values = assign(model, |i, j| {
                    values
                        .get(i)
                        .and_then(|row| row.get(j))
                        .copied()
                        .unwrap_or(0.0)
                });
                OracleResponse::optimal(values, *objective)
            }
            Some(ScriptStep::Status(status)) => {
                OracleResponse::failed(*status, format!("scripted {}", status))
            }
            None => OracleResponse::failed(SolveStatus::SolverError, "script is empty"),
        };
        self.calls += 1;
        self.constraint_counts.push(model.constraints().len());
        response
    }
}
