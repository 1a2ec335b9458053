//! TourForge Core - problem data and shared policy for exact tour solving
//!
//! This crate provides the fundamental types used by every TourForge crate:
//! - [`Instance`] and [`DistanceMatrix`] describing a routing problem
//! - [`Tour`] for accepted Hamiltonian cycles
//! - Numeric tolerance constants shared by the oracle and the detector
//! - The [`TourForgeError`] taxonomy with its diagnostic [`SolveSnapshot`]

pub mod error;
pub mod instance;
pub mod matrix;
pub mod tolerance;
pub mod tour;

pub use error::{ErrorKind, Result, SolveSnapshot, TourForgeError};
pub use instance::{Instance, Point};
pub use matrix::DistanceMatrix;
pub use tolerance::{arc_selection_threshold, ARC_SELECTION_THRESHOLD, INTEGRALITY_TOLERANCE};
pub use tour::Tour;
