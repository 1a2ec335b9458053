//! Assignment formulation of the TSP.
//!
//! One binary variable `x[i,j]` per ordered pair of distinct nodes, the
//! objective `Σ d(i,j)·x[i,j]`, and one out-degree and one in-degree equality
//! per node. Subtour elimination is left to the cutting loop.

use tourforge_core::Instance;
use tourforge_milp::{
    Comparison, ConstraintOrigin, LinearExpr, Model, OracleResponse, Sense, VarDomain, VarId,
};

use crate::subtour::ArcValues;

/// Constraint family of the per-node out-degree equalities.
pub const OUT_DEGREE: &str = "out_degree";
/// Constraint family of the per-node in-degree equalities.
pub const IN_DEGREE: &str = "in_degree";

/// Maps ordered node pairs to their arc variables.
///
/// Self-loops have no variable.
#[derive(Debug, Clone)]
pub struct ArcVariables {
    n: usize,
    vars: Vec<Option<VarId>>,
}

impl ArcVariables {
    fn new(n: usize) -> Self {
        Self {
            n,
            vars: vec![None; n * n],
        }
    }

    pub fn node_count(&self) -> usize {
        self.n
    }

    /// Variable of arc `from → to`, or `None` on the diagonal.
    pub fn get(&self, from: usize, to: usize) -> Option<VarId> {
        self.vars[from * self.n + to]
    }

    /// Iterates `(from, to, var)` for every arc.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, VarId)> + '_ {
        self.vars
            .iter()
            .enumerate()
            .filter_map(move |(k, v)| v.map(|var| (k / self.n, k % self.n, var)))
    }

    /// Reads the arc values out of an oracle response.
    pub fn values(&self, response: &OracleResponse) -> ArcValues {
        let mut arcs = ArcValues::zeros(self.n);
        for (i, j, var) in self.iter() {
            arcs.set(i, j, response.value(var));
        }
        arcs
    }
}

/// The TSP model together with its arc variable index.
#[derive(Debug, Clone)]
pub struct TspFormulation {
    model: Model,
    arcs: ArcVariables,
}

impl TspFormulation {
    /// Builds the degree-constrained assignment model for `instance`.
    ///
    /// # Examples
    ///
    /// ```
    /// use tourforge_core::Instance;
    /// use tourforge_solver::TspFormulation;
    ///
    /// let instance = Instance::from_rows(&[
    ///     vec![0.0, 1.0, 2.0],
    ///     vec![1.0, 0.0, 1.0],
    ///     vec![2.0, 1.0, 0.0],
    /// ])
    /// .unwrap();
    /// let formulation = TspFormulation::build(&instance);
    /// assert_eq!(formulation.model().num_vars(), 6);
    /// assert_eq!(formulation.model().constraints().len(), 6);
    /// assert!(formulation.arcs().get(1, 1).is_none());
    /// ```
    pub fn build(instance: &Instance) -> Self {
        let n = instance.node_count();
        let mut model = Model::new();
        let mut arcs = ArcVariables::new(n);

        for i in 0..n {
            for j in 0..n {
                if i != j {
                    let var = model.add_var(format!("x[{},{}]", i, j), VarDomain::Binary);
                    arcs.vars[i * n + j] = Some(var);
                }
            }
        }

        let objective: LinearExpr = arcs
            .iter()
            .map(|(i, j, var)| (var, instance.distance(i, j)))
            .collect();
        model.set_objective(Sense::Minimize, objective);

        for i in 0..n {
            let out_arcs = LinearExpr::sum((0..n).filter_map(|j| arcs.get(i, j)));
            model.add_constraint(
                out_arcs,
                Comparison::Eq,
                1.0,
                ConstraintOrigin::formulation(OUT_DEGREE, i),
            );
        }
        for j in 0..n {
            let in_arcs = LinearExpr::sum((0..n).filter_map(|i| arcs.get(i, j)));
            model.add_constraint(
                in_arcs,
                Comparison::Eq,
                1.0,
                ConstraintOrigin::formulation(IN_DEGREE, j),
            );
        }

        Self { model, arcs }
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    /// Mutable access for appending cuts.
    pub fn model_mut(&mut self) -> &mut Model {
        &mut self.model
    }

    pub fn arcs(&self) -> &ArcVariables {
        &self.arcs
    }
}
