//! The cutting-plane solve loop.

use std::fmt::Debug;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, trace};

use tourforge_config::SolverConfig;
use tourforge_core::tolerance::is_integral;
use tourforge_core::{Instance, Result, Tour, TourForgeError};
use tourforge_milp::{ConstraintOrigin, MilpOracle, OracleResponse, SolveStatus};

use crate::cuts::generate_cuts;
use crate::detector::SubtourDetector;
use crate::event::{SolveEventListener, SolveEventSupport};
use crate::formulation::TspFormulation;
use crate::report::TourSolution;
use crate::scope::SolveScope;
use crate::subtour::{is_single_tour, Subtour};
use crate::termination::{ExternalTermination, Termination, TerminationCause, TimeTermination};

/// Exact TSP solver that adds subtour elimination cuts until the oracle
/// returns a single Hamiltonian cycle.
///
/// Each run builds the assignment model once, then alternates oracle calls
/// with cutting rounds. A round adds one cut per detected cycle. The run
/// stops with an error when the oracle fails, when the arc values cannot be
/// decomposed, or when a safety bound fires:
///
/// - the iteration limit, checked before a round adds cuts
/// - the time limit and the cancel flag, checked before every oracle call
///
/// # Example
///
/// ```
/// use tourforge_core::{Instance, Point};
/// use tourforge_milp::MicrolpOracle;
/// use tourforge_solver::CuttingPlaneSolver;
///
/// let instance = Instance::from_points(vec![
///     Point::new(0.0, 0.0),
///     Point::new(0.0, 1.0),
///     Point::new(1.0, 1.0),
///     Point::new(1.0, 0.0),
/// ])
/// .unwrap();
///
/// let mut solver = CuttingPlaneSolver::new(MicrolpOracle::new());
/// let solution = solver.solve(&instance).unwrap();
/// assert!((solution.length - 4.0).abs() < 1e-6);
/// assert_eq!(solution.tour.nodes()[0], 0);
/// ```
pub struct CuttingPlaneSolver<O> {
    oracle: O,
    config: SolverConfig,
    terminations: Vec<Box<dyn Termination>>,
    cancel_flag: Arc<AtomicBool>,
    events: SolveEventSupport,
}

impl<O: Debug> Debug for CuttingPlaneSolver<O> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CuttingPlaneSolver")
            .field("oracle", &self.oracle)
            .field("config", &self.config)
            .field("terminations", &self.terminations)
            .field("events", &self.events)
            .finish()
    }
}

impl<O: MilpOracle> CuttingPlaneSolver<O> {
    /// Creates a solver with the default configuration.
    pub fn new(oracle: O) -> Self {
        Self {
            oracle,
            config: SolverConfig::default(),
            terminations: Vec::new(),
            cancel_flag: Arc::new(AtomicBool::new(false)),
            events: SolveEventSupport::new(),
        }
    }

    /// Sets configuration.
    pub fn with_config(mut self, config: SolverConfig) -> Self {
        self.config = config;
        self
    }

    /// Adds a stop condition polled before every oracle call.
    pub fn with_termination<T: Termination + 'static>(mut self, termination: T) -> Self {
        self.terminations.push(Box::new(termination));
        self
    }

    /// Registers an event listener.
    pub fn with_listener(mut self, listener: Arc<dyn SolveEventListener>) -> Self {
        self.events.add_listener(listener);
        self
    }

    /// Returns the configuration.
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    /// Shared flag that cancels the run when set.
    ///
    /// The flag is never cleared by the solver; a set flag cancels every
    /// subsequent run before its first oracle call.
    pub fn cancel_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancel_flag)
    }

    /// Requests cancellation of the current run.
    ///
    /// Thread-safe through [`cancel_flag`](Self::cancel_flag).
    pub fn terminate_early(&self) {
        self.cancel_flag.store(true, Ordering::SeqCst);
    }

    /// Solves `instance` to optimality.
    ///
    /// # Errors
    ///
    /// Returns the error variant matching the reason the loop stopped; every
    /// variant raised inside the loop carries a snapshot of its progress.
    pub fn solve(&mut self, instance: &Instance) -> Result<TourSolution> {
        let result = self.run(instance);
        if let Err(err) = &result {
            info!(event = "solve_failed", error = %err, kind = ?err.kind());
            self.events.fire_failed(err);
        }
        result
    }

    fn run(&mut self, instance: &Instance) -> Result<TourSolution> {
        self.config.validate()?;

        let n = instance.node_count();
        let tolerance = self.config.tolerance();
        let iteration_limit = self.config.iteration_limit();
        let asserted = self.config.environment_mode.is_asserted();
        let detector = SubtourDetector::new(tolerance).with_tie_break(self.config.tie_break);

        let mut run_terminations: Vec<Box<dyn Termination>> =
            vec![Box::new(ExternalTermination::new(self.cancel_flag()))];
        if let Some(limit) = self.config.time_limit() {
            run_terminations.push(Box::new(TimeTermination::new(limit)));
        }

        let mut formulation = TspFormulation::build(instance);
        let mut scope = SolveScope::new();

        info!(
            event = "solve_start",
            nodes = n,
            arcs = formulation.model().num_vars(),
            degree_constraints = formulation.model().constraints().len(),
            oracle = self.oracle.name(),
            iteration_limit,
        );
        self.events.fire_solving_started(instance);

        loop {
            if let Some(cause) = self.check_termination(&run_terminations, &scope) {
                return Err(cause.into_error(scope.snapshot()));
            }

            let started = Instant::now();
            let response = self.oracle.solve(formulation.model());
            scope.record_oracle_call(started.elapsed());
            check_status(&response, &scope)?;

            let objective = response.objective_value;
            scope.record_objective(objective);
            if asserted {
                assert_solution(&formulation, &response, tolerance, &scope)?;
            }

            let arcs = formulation.arcs().values(&response);
            let subtours = detector
                .detect(&arcs)
                .map_err(|anomaly| anomaly.into_error(scope.snapshot()))?;
            for subtour in &subtours {
                trace!(
                    event = "subtour",
                    solve = scope.oracle_calls(),
                    size = subtour.len(),
                    nodes = ?subtour.nodes(),
                );
            }

            if is_single_tour(&subtours, n) {
                let record = scope.record_iteration(objective, &subtours);
                self.events.fire_iteration(record);

                let tour = accept_cycle(&subtours[0], n, &scope)?;
                let elapsed = scope.elapsed();
                let (stats, history) = scope.into_parts();
                let solution = TourSolution::new(
                    tour,
                    instance.distances(),
                    objective,
                    stats,
                    history,
                    elapsed,
                );
                info!(
                    event = "solve_end",
                    iterations = solution.iterations,
                    cuts = solution.cuts_added,
                    length = solution.length,
                    objective,
                    duration_ms = elapsed.as_millis() as u64,
                );
                self.events.fire_solved(&solution);
                return Ok(solution);
            }

            if scope.iterations() >= iteration_limit {
                return Err(TourForgeError::IterationLimitExceeded {
                    limit: iteration_limit,
                    snapshot: scope.snapshot(),
                });
            }

            let round = scope.iterations() + 1;
            let cuts = generate_cuts(&subtours, formulation.arcs(), round);
            let count = cuts.len();
            for cut in cuts {
                formulation.model_mut().push_constraint(cut);
            }
            scope.record_cut_round(count);
            debug!(
                event = "cuts_added",
                round,
                cuts = count,
                total_constraints = formulation.model().constraints().len(),
            );
            self.events.fire_cuts_added(round, &subtours);

            info!(
                event = "iteration",
                iteration = round,
                cuts_added = scope.cuts_added(),
                subtours = subtours.len(),
                objective,
            );
            let record = scope.record_iteration(objective, &subtours);
            self.events.fire_iteration(record);
        }
    }

    fn check_termination(
        &self,
        run_terminations: &[Box<dyn Termination>],
        scope: &SolveScope,
    ) -> Option<TerminationCause> {
        run_terminations
            .iter()
            .chain(self.terminations.iter())
            .find(|t| t.is_terminated(scope))
            .map(|t| t.cause())
    }
}

fn check_status(response: &OracleResponse, scope: &SolveScope) -> Result<()> {
    let snapshot = scope.snapshot();
    match response.status {
        SolveStatus::Optimal => Ok(()),
        SolveStatus::Infeasible => Err(TourForgeError::SolverInfeasible { snapshot }),
        SolveStatus::Unbounded => Err(TourForgeError::SolverUnbounded { snapshot }),
        SolveStatus::SolverError => Err(TourForgeError::SolverError {
            message: response
                .message
                .clone()
                .unwrap_or_else(|| "oracle reported an error".to_string()),
            snapshot,
        }),
    }
}

/// Turns the detected root cycle into a tour. A cycle that is not a
/// permutation of the nodes is a detector inconsistency, not bad input.
fn accept_cycle(cycle: &Subtour, node_count: usize, scope: &SolveScope) -> Result<Tour> {
    Tour::from_cycle(cycle.nodes(), node_count).map_err(|err| {
        TourForgeError::SubtourDetectionAnomaly {
            node: cycle.nodes().first().copied().unwrap_or(Instance::ROOT),
            reason: err.to_string(),
            snapshot: scope.snapshot(),
        }
    })
}

/// Checks an oracle solution against every constraint and the integrality of
/// every arc value.
fn assert_solution(
    formulation: &TspFormulation,
    response: &OracleResponse,
    tolerance: f64,
    scope: &SolveScope,
) -> Result<()> {
    if let Some((from, _, var)) = formulation
        .arcs()
        .iter()
        .find(|&(_, _, var)| !is_integral(response.value(var), tolerance))
    {
        return Err(TourForgeError::SubtourDetectionAnomaly {
            node: from,
            reason: format!(
                "arc variable {} has fractional value {}",
                formulation.model().variable(var).name,
                response.value(var)
            ),
            snapshot: scope.snapshot(),
        });
    }

    let model = formulation.model();
    if let Some(&id) = model
        .violated_constraints(&response.values, tolerance)
        .first()
    {
        let origin = &model.constraints().get(id).origin;
        let node = match origin {
            ConstraintOrigin::Formulation { index, .. } => *index,
            ConstraintOrigin::Cut { support, .. } => support.first().copied().unwrap_or(0),
        };
        return Err(TourForgeError::SubtourDetectionAnomaly {
            node,
            reason: format!("oracle solution violates {}", origin),
            snapshot: scope.snapshot(),
        });
    }

    Ok(())
}
