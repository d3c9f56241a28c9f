//! Benchmark profiles for the Tessel automata engine.
//!
//! - [`life_profile`]: 100x100 toroidal Game of Life (10K cells)
//! - [`harvest_profile`]: 100x100 toroidal logistic harvest with a protected area
//! - [`ring_network`]: SIRC network on an `n`-node ring, one infected node

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use tessel_engine::{LatticeAutomaton, LatticeConfig, NetworkAutomaton, NetworkConfig};
use tessel_rules::sirc::COMPARTMENTS;
use tessel_rules::{GameOfLife, HarvestConfig, LogisticHarvest, Sirc};
use tessel_space::{Adjacency, Boundary, Neighborhood};

/// 100x100 toroidal Moore lattice running Life from a 50% random start.
pub fn life_profile(seed: u64) -> LatticeAutomaton {
    let config = LatticeConfig::new([100, 100], Neighborhood::Moore, Boundary::Toroidal)
        .with_seed(seed);
    let mut ca = LatticeAutomaton::new(config).unwrap();
    ca.set_rule(Box::new(GameOfLife));
    ca.initialize_random_binary(0.5).unwrap();
    ca
}

/// 100x100 toroidal Von Neumann lattice running logistic harvest with
/// 10% of the cells protected.
pub fn harvest_profile(seed: u64) -> LatticeAutomaton {
    let config = LatticeConfig::new([100, 100], Neighborhood::VonNeumann, Boundary::Toroidal)
        .with_seed(seed);
    let rule = LogisticHarvest::new(HarvestConfig {
        percent_protected: 0.1,
        ..HarvestConfig::default()
    })
    .unwrap();
    let mut ca = LatticeAutomaton::new(config).unwrap();
    ca.set_rule(Box::new(rule));
    ca.initialize_random().unwrap();
    ca
}

/// SIRC on an `n`-node ring. Every node holds 1000 susceptibles and
/// node 0 also holds 10 infectious.
pub fn ring_network(n: usize, seed: u64) -> NetworkAutomaton {
    let edges: Vec<(usize, usize)> = (0..n).map(|j| (j, (j + 1) % n)).collect();
    let adjacency = Adjacency::from_edges(n, &edges).unwrap();
    let mut network =
        NetworkAutomaton::new(NetworkConfig::new(adjacency, COMPARTMENTS).with_seed(seed))
            .unwrap();
    network.set_rule(Box::new(Sirc::default()));
    for j in 0..n {
        network.initialize_node(j, &[1000, 0, 0, 0]).unwrap();
    }
    network.initialize_node(0, &[1000, 10, 0, 0]).unwrap();
    network
}
