//! End-to-end SIRC runs on small networks.

use proptest::prelude::*;
use tessel_engine::{create_network, NetworkAutomaton, NetworkConfig};
use tessel_rules::sirc::{CARRIER, INFECTIOUS};
use tessel_rules::{Migration, Sirc};
use tessel_space::Adjacency;

fn ring(nodes: usize) -> Adjacency {
    let edges: Vec<(usize, usize)> = (0..nodes).map(|j| (j, (j + 1) % nodes)).collect();
    Adjacency::from_edges(nodes, &edges).unwrap()
}

#[test]
fn single_node_epidemic_dies_out() {
    let mut n = create_network(Adjacency::from_edges(1, &[]).unwrap(), 4).unwrap();
    n.set_rule(Box::new(Sirc::default()));
    n.initialize_node(0, &[30, 2, 0, 0]).unwrap();

    let records = n.run_collect(10_000).unwrap();
    assert!(!records.is_empty());
    let last = records.last().unwrap();
    assert_eq!(last.totals[INFECTIOUS], 0);
    assert_eq!(last.totals[CARRIER], 0);
    assert_eq!(last.totals.iter().sum::<u64>(), 32);
    assert_eq!(last.time, n.time());
}

#[test]
fn clock_strictly_increases_while_active() {
    let config = NetworkConfig::new(ring(5), 4).with_seed(17);
    let mut n = NetworkAutomaton::new(config).unwrap();
    n.set_rule(Box::new(Sirc::default()));
    for j in 0..5 {
        n.initialize_node(j, &[40, 3, 0, 1]).unwrap();
    }
    let records = n.run_collect(200).unwrap();
    let mut previous = 0.0;
    for r in &records {
        assert!(r.dt > 0.0);
        assert!(r.time > previous);
        assert!((r.time - previous - r.dt).abs() < 1e-9);
        previous = r.time;
    }
}

#[test]
fn migration_spreads_infection_between_nodes() {
    let config = NetworkConfig::new(ring(4), 4).with_seed(1);
    let mut n = NetworkAutomaton::new(config).unwrap();
    n.set_rule(Box::new(Migration::default()));
    n.initialize_node(0, &[0, 100, 0, 0]).unwrap();
    n.evolve().unwrap();
    let infected = n.state().as_slice()[INFECTIOUS * 4..(INFECTIOUS + 1) * 4].to_vec();
    assert_eq!(infected, vec![90, 5, 0, 5]);
}

#[test]
fn same_seed_same_epidemic() {
    let run = || {
        let config = NetworkConfig::new(ring(6), 4).with_seed(8);
        let mut n = NetworkAutomaton::new(config).unwrap();
        n.set_rule(Box::new(Sirc::default()));
        n.add_rule(Box::new(Migration::default()));
        n.initialize_node(2, &[60, 4, 0, 0]).unwrap();
        n.initialize_node(4, &[60, 0, 0, 0]).unwrap();
        n.run_collect(300).unwrap()
    };
    assert_eq!(run(), run());
}

proptest! {
    #[test]
    fn run_collect_terminates_and_conserves(
        s in 0u64..40,
        i in 0u64..6,
        c in 0u64..6,
        seed in any::<u64>(),
        max_steps in 1usize..300,
    ) {
        let config = NetworkConfig::new(ring(3), 4).with_seed(seed);
        let mut n = NetworkAutomaton::new(config).unwrap();
        n.set_rule(Box::new(Sirc::default()));
        n.initialize_node(0, &[s, i, 0, c]).unwrap();
        let records = n.run_collect(max_steps).unwrap();
        prop_assert!(records.len() <= max_steps);
        for r in &records {
            prop_assert_eq!(r.totals.iter().sum::<u64>(), s + i + c);
        }
        if records.len() < max_steps {
            let totals = n.totals();
            prop_assert_eq!(totals[INFECTIOUS] + totals[CARRIER], 0);
        }
    }
}
