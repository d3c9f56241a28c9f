//! Library rules composed through a `RuleManager`.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tessel_core::{ParameterSet, SimulatedClock, StepError};
use tessel_rule::{Lattice, Network, RuleManager, StepContext};
use tessel_rules::{GameOfLife, Migration, MigrationConfig, Sirc, Wolfram};
use tessel_space::{Adjacency, Boundary, NeighborProvider, Neighborhood, Topology};
use tessel_test_utils::{compartments, grid2d, line};

#[test]
fn sirc_then_migration_conserves_population() {
    let ring = Adjacency::from_edges(3, &[(0, 1), (1, 2), (2, 0)]).unwrap();
    let mut state = compartments(&[&[100, 80, 60], &[5, 0, 0], &[0, 0, 0], &[0, 0, 0]]);
    let total: u64 = state.iter().sum();

    let mut manager = RuleManager::<Network>::new();
    manager.add(Box::new(Sirc::default()));
    manager.add(Box::new(Migration::new(MigrationConfig { rate: 0.2 }).unwrap()));

    let mut rng = ChaCha8Rng::seed_from_u64(2024);
    let mut clock = SimulatedClock::new();
    let mut last = 0.0;
    for generation in 0..50 {
        let mut ctx = StepContext::new(&ring, &mut rng, &mut clock, generation);
        state = manager.apply(&state, &mut ctx).unwrap();
        assert_eq!(state.iter().sum::<u64>(), total);
        assert!(clock.now() >= last);
        last = clock.now();
    }
}

#[test]
fn parameter_broadcast_reaches_only_matching_rules() {
    let mut manager = RuleManager::<Network>::new();
    manager.add(Box::new(Sirc::default()));
    manager.add(Box::new(Migration::default()));
    let mut params = ParameterSet::new();
    params.insert("rate".into(), 0.5);
    params.insert("beta".into(), 1.0);
    manager.update_parameters(&params).unwrap();

    params.insert("rate".into(), 2.0);
    match manager.update_parameters(&params) {
        Err(StepError::RuleFailed { name, .. }) => assert_eq!(name, "migration"),
        other => panic!("expected migration to reject rate, got {other:?}"),
    }
}

#[test]
fn wolfram_rules_chain() {
    // Rule 204 is identity, so 204 followed by 0 equals 0 alone.
    let state = line(&[1.0, 0.0, 1.0, 1.0]);
    let topo = Topology::new(state.shape().clone(), Neighborhood::Line, Boundary::Toroidal).unwrap();
    let env = topo.neighbors(&state).unwrap();
    let mut manager = RuleManager::<Lattice>::new();
    manager.add(Box::new(Wolfram::new(204).unwrap()));
    manager.add(Box::new(Wolfram::new(0).unwrap()));
    let mut rng = ChaCha8Rng::seed_from_u64(0);
    let mut clock = SimulatedClock::new();
    let out = manager
        .apply(&state, &mut StepContext::new(&env, &mut rng, &mut clock, 0))
        .unwrap();
    assert_eq!(out.as_slice(), &[0.0; 4]);
}

#[test]
fn life_glider_moves_on_a_torus() {
    #[rustfmt::skip]
    let mut state = grid2d(6, 6, &[
        0.0, 1.0, 0.0, 0.0, 0.0, 0.0,
        0.0, 0.0, 1.0, 0.0, 0.0, 0.0,
        1.0, 1.0, 1.0, 0.0, 0.0, 0.0,
        0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
        0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
        0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
    ]);
    let topo = Topology::new(state.shape().clone(), Neighborhood::Moore, Boundary::Toroidal).unwrap();
    let mut manager = RuleManager::<Lattice>::new();
    manager.set(Box::new(GameOfLife));
    let mut rng = ChaCha8Rng::seed_from_u64(0);
    let mut clock = SimulatedClock::new();
    let start = state.clone();
    // Four generations shift a glider one cell down and one right.
    for g in 0..4 {
        let env = topo.neighbors(&state).unwrap();
        state = manager
            .apply(&state, &mut StepContext::new(&env, &mut rng, &mut clock, g))
            .unwrap();
    }
    assert_eq!(state.count_eq(1.0), 5);
    for r in 0..6 {
        for c in 0..6 {
            let moved = state[((r + 1) % 6) * 6 + (c + 1) % 6];
            assert_eq!(moved, start[r * 6 + c], "cell ({r}, {c})");
        }
    }
}
