//! Core types for the Tessel automata engine.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! n-dimensional [`Grid`] that carries automaton state, the
//! [`SimulatedClock`] advanced by stochastic rules, the [`ParameterSet`]
//! used to reconfigure rules at runtime, and the error types shared by
//! every other crate in the workspace.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod clock;
pub mod error;
pub mod grid;
pub mod params;

pub use clock::SimulatedClock;
pub use error::{RuleError, ShapeError, StepError};
pub use grid::{Coord, Grid, Shape};
pub use params::{override_param, ParameterSet};
