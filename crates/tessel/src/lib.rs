//! Tessel: grid and network cellular automata.
//!
//! This is the facade crate that re-exports the public API of the Tessel
//! sub-crates and adds ready-made [`models`].
//!
//! # Quick start
//!
//! ```rust
//! use tessel::prelude::*;
//!
//! // Rule 90 on a 31-cell ring, starting from a single live cell.
//! let mut ca = tessel::models::wolfram(31, &[90], true, 0).unwrap();
//! assert_eq!(ca.state().count_eq(1.0), 1);
//!
//! let history: Vec<Grid<f64>> = ca.run(15).collect::<Result<_, _>>().unwrap();
//! assert_eq!(history.len(), 16);
//! assert_eq!(ca.generation(), 15);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `tessel-core` | `Grid`, `Shape`, clock, parameters, errors |
//! | [`space`] | `tessel-space` | Neighborhoods, boundaries, topologies, adjacency |
//! | [`rule`] | `tessel-rule` | `Rule` trait, domains, `RuleManager` |
//! | [`rules`] | `tessel-rules` | Library rules and the Gillespie stepper |
//! | [`engine`] | `tessel-engine` | Lattice and network automata, data collection |
//! | [`models`] | this crate | Preconfigured automata |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Grids, shapes, simulated time, parameters and errors (`tessel-core`).
pub use tessel_core as types;

/// Neighborhoods, boundaries and adjacency (`tessel-space`).
///
/// [`space::Topology`] turns a lattice state into a [`space::NeighborSet`];
/// [`space::Adjacency`] describes a network.
pub use tessel_space as space;

/// The [`rule::Rule`] trait and its pipeline (`tessel-rule`).
pub use tessel_rule as rule;

/// Library rules (`tessel-rules`).
pub use tessel_rules as rules;

/// Automata and data collection (`tessel-engine`).
pub use tessel_engine as engine;

pub mod models;

pub use tessel_engine::{create_lattice, create_network};

/// Common imports for typical Tessel usage.
///
/// ```rust
/// use tessel::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use tessel_core::{Grid, ParameterSet, Shape, SimulatedClock};

    // Errors
    pub use tessel_core::{RuleError, ShapeError, StepError};
    pub use tessel_engine::{ConfigError, InitError};

    // Space
    pub use tessel_space::{Adjacency, Boundary, NeighborSet, Neighborhood};

    // Rules
    pub use tessel_rule::{Lattice, Network, Rule, StepContext};
    pub use tessel_rules::{
        Applause, BriansBrain, ForestFire, GameOfLife, LogisticHarvest, Migration, Sirc, Wolfram,
    };

    // Engine
    pub use tessel_engine::{
        create_lattice, create_network, DataCollector, LatticeAutomaton, LatticeConfig,
        NetworkAutomaton, NetworkConfig, Reducer, Table,
    };

    pub use crate::models::ModelError;
}
