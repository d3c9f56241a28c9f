//! End-to-end lattice runs with library rules.

use proptest::prelude::*;
use tessel_core::StepError;
use tessel_engine::{create_lattice, DataCollector, LatticeAutomaton, LatticeConfig, Reducer};
use tessel_rules::{Applause, BriansBrain, ForestFire, GameOfLife, HarvestConfig, LogisticHarvest, Wolfram};
use tessel_space::{Boundary, Neighborhood};
use tessel_test_utils::grid2d;

#[test]
fn harvest_on_a_torus_never_goes_negative() {
    let config = LatticeConfig::new([10, 10], Neighborhood::VonNeumann, Boundary::Toroidal)
        .with_seed(99);
    let mut ca = LatticeAutomaton::new(config).unwrap();
    ca.set_rule(Box::new(LogisticHarvest::new(HarvestConfig::default()).unwrap()));
    ca.initialize_random().unwrap();
    for state in ca.run(100) {
        let state = state.unwrap();
        assert!(state.iter().all(|&v| v >= 0.0 && v.is_finite()));
    }
    assert_eq!(ca.generation(), 100);
}

#[test]
fn life_block_is_stable_through_the_engine() {
    let mut ca = create_lattice(&[4, 4], Neighborhood::Moore, Boundary::Toroidal).unwrap();
    ca.set_rule(Box::new(GameOfLife));
    ca.initialize_from_indices(&[[1usize, 1], [1, 2], [2, 1], [2, 2]]).unwrap();
    let start = ca.state().clone();
    for state in ca.run(4) {
        assert_eq!(state.unwrap(), start);
    }
}

#[test]
fn wolfram_rule_0_and_204() {
    let mut ca = create_lattice(&[8], Neighborhood::Line, Boundary::Bounded).unwrap();
    ca.initialize_from_indices(&[[0usize], [3], [7]]).unwrap();
    let start = ca.state().clone();

    ca.set_rule(Box::new(Wolfram::new(204).unwrap()));
    assert_eq!(ca.evolve().unwrap(), &start);

    ca.set_rule(Box::new(Wolfram::new(0).unwrap()));
    assert_eq!(ca.evolve().unwrap().count_eq(0.0), 8);
}

#[test]
fn wolfram_rejects_a_three_dimensional_lattice() {
    let mut ca = create_lattice(&[2, 2, 2], Neighborhood::Moore3D, Boundary::Toroidal).unwrap();
    ca.set_rule(Box::new(Wolfram::new(30).unwrap()));
    ca.initialize_zero().unwrap();
    assert!(matches!(ca.evolve(), Err(StepError::RuleFailed { .. })));
}

#[test]
fn life_on_a_cube() {
    let mut ca = create_lattice(&[3, 3, 3], Neighborhood::Moore3D, Boundary::Bounded).unwrap();
    ca.set_rule(Box::new(GameOfLife));
    ca.initialize_from_indices(&[[1usize, 1, 1]]).unwrap();
    assert_eq!(ca.neighbors().unwrap().len(), 26);
    assert_eq!(ca.evolve().unwrap().count_eq(1.0), 0);
}

#[test]
fn collector_tracks_forest_fire_counts() {
    let config =
        LatticeConfig::new([12, 12], Neighborhood::Moore, Boundary::Toroidal).with_seed(5);
    let mut ca = LatticeAutomaton::new(config).unwrap();
    ca.set_rule(Box::new(ForestFire::default()));
    ca.initialize_random_int(0, 3).unwrap();
    let collector = DataCollector::new()
        .with("trees", Reducer::custom(|g| g.count_eq(1.0) as f64))
        .with("burning", Reducer::custom(|g| g.count_eq(2.0) as f64))
        .with("max", Reducer::Max)
        .with("snapshot", Reducer::Entire);
    let table = ca.run_collect(20, collector).unwrap();
    assert_eq!(table.len(), 21);
    let trees = table.scalars("trees").unwrap();
    let burning = table.scalars("burning").unwrap();
    for (t, b) in trees.iter().zip(&burning) {
        assert!(t + b <= 144.0);
    }
    assert!(table.scalars("max").unwrap().iter().all(|&m| m <= 2.0));
    let last = table.column("snapshot").unwrap()[20].as_array().unwrap().clone();
    assert_eq!(&last, ca.state());
}

#[test]
fn brians_brain_stays_in_three_states() {
    let mut ca = create_lattice(&[10, 10], Neighborhood::Moore, Boundary::Toroidal).unwrap();
    ca.set_rule(Box::new(BriansBrain));
    ca.initialize_random_int(0, 3).unwrap();
    for state in ca.run(10) {
        assert!(state.unwrap().iter().all(|&v| v == 0.0 || v == 1.0 || v == 2.0));
    }
}

#[test]
fn run_collect_propagates_step_errors() {
    let mut ca = create_lattice(&[3, 3], Neighborhood::Moore, Boundary::Toroidal).unwrap();
    ca.initialize_from(grid2d(3, 3, &[0.0; 9])).unwrap();
    let err = ca
        .run_collect(3, DataCollector::new().with("sum", Reducer::Sum))
        .unwrap_err();
    assert_eq!(err, StepError::EmptyPipeline);
}

proptest! {
    #[test]
    fn applause_keeps_cells_binary(seed in any::<u64>(), ratio in 0.0f64..=1.0) {
        let config = LatticeConfig::new([6, 6], Neighborhood::Moore, Boundary::Toroidal)
            .with_seed(seed);
        let mut ca = LatticeAutomaton::new(config).unwrap();
        ca.set_rule(Box::new(Applause::default()));
        ca.initialize_random_binary(ratio).unwrap();
        for state in ca.run(5) {
            let state = state.unwrap();
            prop_assert!(state.iter().all(|&v| v == 0.0 || v == 1.0));
        }
    }
}
