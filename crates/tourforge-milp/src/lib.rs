//! TourForge MILP - the seam between TourForge and integer-program solvers
//!
//! This crate provides:
//! - [`Model`]: variables, a linear objective, and an append-only
//!   [`ConstraintStore`] whose records are addressed by [`ConstraintId`]
//! - [`MilpOracle`]: the black-box solver contract, returning an
//!   [`OracleResponse`] with a [`SolveStatus`]
//! - [`MicrolpOracle`]: the bundled pure-Rust backend

pub mod backend;
pub mod model;
pub mod oracle;
pub mod store;

pub use backend::MicrolpOracle;
pub use model::{Comparison, LinearExpr, Model, Sense, VarDomain, VarId, Variable};
pub use oracle::{MilpOracle, OracleResponse, SolveStatus};
pub use store::{Constraint, ConstraintId, ConstraintOrigin, ConstraintStore};
