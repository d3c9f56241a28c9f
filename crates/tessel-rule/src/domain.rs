//! The two kinds of automaton a rule can run on.

use tessel_core::Grid;
use tessel_space::{Adjacency, NeighborSet};

/// Ties a state type to the spatial environment rules read alongside it.
///
/// Implemented by the zero-sized markers [`Lattice`] and [`Network`].
pub trait Domain: 'static {
    /// The automaton state a rule transforms.
    type State: Clone + Send;
    /// Read-only spatial context for one step.
    type Env: Send + Sync;
}

/// Lattice automata: real-valued cells, neighbors by named direction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Lattice;

impl Domain for Lattice {
    type State = Grid<f64>;
    type Env = NeighborSet;
}

/// Network automata: a `compartments × nodes` matrix of non-negative
/// counts over the nodes of an adjacency matrix. Column `j` is node `j`'s
/// population by compartment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Network;

impl Domain for Network {
    type State = Grid<u64>;
    type Env = Adjacency;
}
