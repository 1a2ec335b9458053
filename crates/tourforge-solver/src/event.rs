//! Event hooks for monitoring a solve run.
//!
//! Listeners are notified synchronously, in registration order, at each
//! stage of the cutting-plane loop:
//!
//! - **Started**: the formulation is built and the first oracle call follows
//! - **Iteration**: an oracle solution was decomposed into cycles
//! - **Cuts added**: a round appended elimination constraints
//! - **Solved / Failed**: the run ended with a tour or an error
//!
//! # Usage
//!
//! ```
//! use std::sync::Arc;
//! use tourforge_solver::{CountingEventListener, SolveEventSupport};
//!
//! let counter = Arc::new(CountingEventListener::new());
//! let mut support = SolveEventSupport::new();
//! support.add_listener(counter.clone());
//! assert_eq!(support.listener_count(), 1);
//! ```

use std::fmt::Debug;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tracing::{debug, info, warn};

use tourforge_core::{Instance, TourForgeError};

use crate::report::TourSolution;
use crate::stats::IterationRecord;
use crate::subtour::Subtour;

/// Listener for solve lifecycle events.
///
/// Every method has an empty default, so implementors only override what
/// they need.
pub trait SolveEventListener: Send + Sync + Debug {
    /// Called once the model is built, before the first oracle call.
    fn on_solving_started(&self, _instance: &Instance) {}

    /// Called after each oracle solution is decomposed.
    fn on_iteration(&self, _record: &IterationRecord) {}

    /// Called when round `round` adds one cut per entry of `subtours`.
    fn on_cuts_added(&self, _round: u64, _subtours: &[Subtour]) {}

    /// Called when a single tour is accepted.
    fn on_solved(&self, _solution: &TourSolution) {}

    /// Called when the run ends with an error.
    fn on_failed(&self, _error: &TourForgeError) {}
}

/// Broadcasts solve events to registered listeners.
#[derive(Default)]
pub struct SolveEventSupport {
    listeners: Vec<Arc<dyn SolveEventListener>>,
}

impl SolveEventSupport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_listener(&mut self, listener: Arc<dyn SolveEventListener>) {
        self.listeners.push(listener);
    }

    pub fn clear_listeners(&mut self) {
        self.listeners.clear();
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn has_listeners(&self) -> bool {
        !self.listeners.is_empty()
    }

    pub fn fire_solving_started(&self, instance: &Instance) {
        for listener in &self.listeners {
            listener.on_solving_started(instance);
        }
    }

    pub fn fire_iteration(&self, record: &IterationRecord) {
        for listener in &self.listeners {
            listener.on_iteration(record);
        }
    }

    pub fn fire_cuts_added(&self, round: u64, subtours: &[Subtour]) {
        for listener in &self.listeners {
            listener.on_cuts_added(round, subtours);
        }
    }

    pub fn fire_solved(&self, solution: &TourSolution) {
        for listener in &self.listeners {
            listener.on_solved(solution);
        }
    }

    pub fn fire_failed(&self, error: &TourForgeError) {
        for listener in &self.listeners {
            listener.on_failed(error);
        }
    }
}

impl Debug for SolveEventSupport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SolveEventSupport")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

/// Emits every event as a `tracing` event under the `tourforge::event` target.
#[derive(Debug, Clone, Default)]
pub struct LoggingEventListener {
    label: Option<String>,
}

impl LoggingEventListener {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tags every event with `label`, e.g. an instance name.
    pub fn with_label(label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
        }
    }

    fn label(&self) -> &str {
        self.label.as_deref().unwrap_or("")
    }
}

impl SolveEventListener for LoggingEventListener {
    fn on_solving_started(&self, instance: &Instance) {
        info!(
            target: "tourforge::event",
            label = self.label(),
            nodes = instance.node_count(),
            "solving started"
        );
    }

    fn on_iteration(&self, record: &IterationRecord) {
        debug!(
            target: "tourforge::event",
            label = self.label(),
            iteration = record.iteration,
            objective = record.objective_value,
            subtours = record.subtour_count,
            "iteration"
        );
    }

    fn on_cuts_added(&self, round: u64, subtours: &[Subtour]) {
        debug!(
            target: "tourforge::event",
            label = self.label(),
            round,
            cuts = subtours.len(),
            "cuts added"
        );
    }

    fn on_solved(&self, solution: &TourSolution) {
        info!(
            target: "tourforge::event",
            label = self.label(),
            length = solution.length,
            iterations = solution.iterations,
            "solved"
        );
    }

    fn on_failed(&self, error: &TourForgeError) {
        warn!(
            target: "tourforge::event",
            label = self.label(),
            error = %error,
            "solve failed"
        );
    }
}

/// Counts event occurrences.
///
/// Useful in tests and for coarse statistics.
#[derive(Debug, Default)]
pub struct CountingEventListener {
    solving_started_count: AtomicUsize,
    iteration_count: AtomicUsize,
    cuts_added_count: AtomicUsize,
    solved_count: AtomicUsize,
    failed_count: AtomicUsize,
}

impl CountingEventListener {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn solving_started_count(&self) -> usize {
        self.solving_started_count.load(Ordering::SeqCst)
    }

    pub fn iteration_count(&self) -> usize {
        self.iteration_count.load(Ordering::SeqCst)
    }

    /// Number of cut rounds reported, not the number of cuts.
    pub fn cuts_added_count(&self) -> usize {
        self.cuts_added_count.load(Ordering::SeqCst)
    }

    pub fn solved_count(&self) -> usize {
        self.solved_count.load(Ordering::SeqCst)
    }

    pub fn failed_count(&self) -> usize {
        self.failed_count.load(Ordering::SeqCst)
    }

    /// Resets all counters to zero.
    pub fn reset(&self) {
        self.solving_started_count.store(0, Ordering::SeqCst);
        self.iteration_count.store(0, Ordering::SeqCst);
        self.cuts_added_count.store(0, Ordering::SeqCst);
        self.solved_count.store(0, Ordering::SeqCst);
        self.failed_count.store(0, Ordering::SeqCst);
    }
}

impl SolveEventListener for CountingEventListener {
    fn on_solving_started(&self, _instance: &Instance) {
        self.solving_started_count.fetch_add(1, Ordering::SeqCst);
    }

    fn on_iteration(&self, _record: &IterationRecord) {
        self.iteration_count.fetch_add(1, Ordering::SeqCst);
    }

    fn on_cuts_added(&self, _round: u64, _subtours: &[Subtour]) {
        self.cuts_added_count.fetch_add(1, Ordering::SeqCst);
    }

    fn on_solved(&self, _solution: &TourSolution) {
        self.solved_count.fetch_add(1, Ordering::SeqCst);
    }

    fn on_failed(&self, _error: &TourForgeError) {
        self.failed_count.fetch_add(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
