//! Shared test fixtures for TourForge crates.
//!
//! This crate provides instances and an oracle test double. It does NOT
//! depend on `tourforge-solver` so the solver can use it as a dev-dependency.
//!
//! - [`instances`] - Small instances with known optimal tours, seeded random
//!   instances and a brute-force reference solver
//! - [`oracle`] - [`ScriptedOracle`], a [`MilpOracle`](tourforge_milp::MilpOracle)
//!   that replays a fixed sequence of answers
//!
//! # Usage
//!
//! ```toml
//! [dev-dependencies]
//! tourforge-test = { workspace = true }
//! ```

pub mod instances;
pub mod oracle;

pub use instances::{brute_force_optimum, seeded_random_instance, two_triangles, unit_square};
pub use oracle::{ScriptStep, ScriptedOracle};
