//! Lattice and network automata for the Tessel engine.
//!
//! - [`LatticeAutomaton`]: synchronous 1D/2D/3D cellular automata
//! - [`NetworkAutomaton`]: compartment counts on a network, typically
//!   driven by stochastic rules that advance a simulated clock
//! - [`DataCollector`]: per-step reductions of lattice runs into a [`Table`]
//!
//! [`create_lattice`] and [`create_network`] cover the common cases;
//! [`LatticeConfig`] and [`NetworkConfig`] expose every option.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod collect;
pub mod config;
pub mod lattice;
pub mod network;

pub use collect::{DataCollector, Reducer, Reduction, Table};
pub use config::{ConfigError, InitError, LatticeConfig, NetworkConfig};
pub use lattice::{LatticeAutomaton, Run};
pub use network::{NetworkAutomaton, StepRecord};

use tessel_space::{Adjacency, Boundary, Neighborhood};

/// A lattice automaton with seed 0 and outside value 0.
pub fn create_lattice(
    dims: &[usize],
    neighborhood: Neighborhood,
    boundary: Boundary,
) -> Result<LatticeAutomaton, ConfigError> {
    LatticeAutomaton::new(LatticeConfig::new(dims, neighborhood, boundary))
}

/// A network automaton with seed 0.
pub fn create_network(
    adjacency: Adjacency,
    num_compartments: usize,
) -> Result<NetworkAutomaton, ConfigError> {
    NetworkAutomaton::new(NetworkConfig::new(adjacency, num_compartments))
}
