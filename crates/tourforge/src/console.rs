//! Colorful console output for the cutting-plane loop.
//!
//! Provides a custom `tracing` layer that prints the iteration table as the
//! solver emits its events. Auto-initialized when the `console` feature is
//! enabled.

use owo_colors::OwoColorize;
use std::io::{self, Write};
use std::sync::OnceLock;
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::Context;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: OnceLock<()> = OnceLock::new();

/// Initializes the solver console output.
///
/// Safe to call multiple times - only the first call has effect. Leaves an
/// already installed global subscriber in place.
pub fn init() {
    INIT.get_or_init(|| {
        print_banner();

        let filter = EnvFilter::builder()
            .with_default_directive(LevelFilter::INFO.into())
            .from_env_lossy();

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(TourConsoleLayer)
            .try_init();
    });
}

fn print_banner() {
    let version_line = format!(
        "TourForge v{} - exact TSP by subtour elimination",
        env!("CARGO_PKG_VERSION")
    );

    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{}", version_line.bright_cyan().bold());
    let _ = stdout.flush();
}

/// A tracing layer that renders solver events as the iteration table.
pub struct TourConsoleLayer;

impl<S: Subscriber> Layer<S> for TourConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        if !metadata.target().starts_with("tourforge_solver") {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let output = format_solver_event(&visitor);
        if !output.is_empty() {
            let _ = writeln!(io::stdout(), "{}", output);
        }
    }
}

#[derive(Default)]
struct EventVisitor {
    event: Option<String>,
    nodes: Option<u64>,
    arcs: Option<u64>,
    oracle: Option<String>,
    iteration: Option<u64>,
    iterations: Option<u64>,
    cuts_added: Option<u64>,
    cuts: Option<u64>,
    subtours: Option<u64>,
    objective: Option<f64>,
    length: Option<f64>,
    duration_ms: Option<u64>,
    error: Option<String>,
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let s = format!("{:?}", value);
        match field.name() {
            "event" => self.event = Some(s.trim_matches('"').to_string()),
            "oracle" => self.oracle = Some(s.trim_matches('"').to_string()),
            "error" => self.error = Some(s),
            _ => {}
        }
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        match field.name() {
            "nodes" => self.nodes = Some(value),
            "arcs" => self.arcs = Some(value),
            "iteration" => self.iteration = Some(value),
            "iterations" => self.iterations = Some(value),
            "cuts_added" => self.cuts_added = Some(value),
            "cuts" => self.cuts = Some(value),
            "subtours" => self.subtours = Some(value),
            "duration_ms" => self.duration_ms = Some(value),
            _ => {}
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record_u64(field, value as u64);
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        match field.name() {
            "objective" => self.objective = Some(value),
            "length" => self.length = Some(value),
            _ => {}
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "event" => self.event = Some(value.to_string()),
            "oracle" => self.oracle = Some(value.to_string()),
            "error" => self.error = Some(value.to_string()),
            _ => {}
        }
    }
}

fn format_solver_event(v: &EventVisitor) -> String {
    match v.event.as_deref().unwrap_or("") {
        "solve_start" => format_solve_start(v),
        "iteration" => format_iteration(v),
        "solve_end" => format_solve_end(v),
        "solve_failed" => format_solve_failed(v),
        _ => String::new(),
    }
}

fn format_solve_start(v: &EventVisitor) -> String {
    format!(
        "{} {} nodes, {} arc variables, oracle {}\n{}",
        "Solving".bright_green().bold(),
        v.nodes.unwrap_or(0).bright_yellow(),
        v.arcs.unwrap_or(0).bright_yellow(),
        v.oracle.as_deref().unwrap_or("unknown").bright_magenta(),
        format!(
            "{: >10} {: >15} {: >20} {: >10}",
            "Iterations", "Cuts added", "Objective value", "Subtours"
        )
        .white()
        .bold()
    )
}

fn format_iteration(v: &EventVisitor) -> String {
    format!(
        "{: >10} {: >15} {: >20.4} {: >10}",
        v.iteration.unwrap_or(0),
        v.cuts_added.unwrap_or(0),
        v.objective.unwrap_or(f64::NAN),
        v.subtours.unwrap_or(0)
    )
}

fn format_solve_end(v: &EventVisitor) -> String {
    format!(
        "{} in {} after {} iterations, {} cuts, tour length {}",
        "Optimal tour found".bright_green().bold(),
        format_duration_ms(v.duration_ms.unwrap_or(0)).yellow(),
        v.iterations.unwrap_or(0),
        v.cuts.unwrap_or(0),
        format!("{:.4}", v.length.unwrap_or(f64::NAN)).bright_magenta()
    )
}

fn format_solve_failed(v: &EventVisitor) -> String {
    format!(
        "{} {}",
        "Solve failed:".bright_red().bold(),
        v.error.as_deref().unwrap_or("unknown error")
    )
}

fn format_duration_ms(ms: u64) -> String {
    if ms < 1000 {
        format!("{}ms", ms)
    } else if ms < 60_000 {
        format!("{:.2}s", ms as f64 / 1000.0)
    } else {
        let mins = ms / 60_000;
        let secs = (ms % 60_000) / 1000;
        format!("{}m {}s", mins, secs)
    }
}
