//! Preset models driven through the facade.

use proptest::prelude::*;
use tessel::models;
use tessel::prelude::*;

#[test]
fn rule_90_draws_a_sierpinski_row() {
    let mut ca = models::wolfram(9, &[90], true, 0).unwrap();
    let rows: Vec<Grid<f64>> = ca.run(2).collect::<Result<_, _>>().unwrap();
    assert_eq!(rows[1].as_slice(), &[0.0, 0.0, 0.0, 1.0, 0.0, 1.0, 0.0, 0.0, 0.0]);
    assert_eq!(rows[2].as_slice(), &[0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0]);
}

#[test]
fn mpa_protected_area_collects_mean_density() {
    let mut ca = models::mpa([10, 10], 0.25, true, 3).unwrap();
    let table = ca
        .run_collect(25, DataCollector::new().with("mean", Reducer::Mean))
        .unwrap();
    let means = table.scalars("mean").unwrap();
    assert_eq!(means.len(), 26);
    assert!(means.iter().all(|&m| (0.0..=1.0).contains(&m)));
}

#[test]
fn sirc_preset_runs_to_extinction() {
    let adjacency = Adjacency::from_edges(4, &[(0, 1), (1, 2), (2, 3), (3, 0)]).unwrap();
    let mut network = models::sirc(adjacency, 11).unwrap();
    network.add_rule(Box::new(Migration::default()));
    network.initialize_node(0, &[50, 5, 0, 0]).unwrap();
    network.initialize_node(2, &[50, 0, 0, 0]).unwrap();

    let records = network.run_collect(100_000).unwrap();
    let last = records.last().unwrap();
    assert_eq!(last.totals[1] + last.totals[3], 0);
    assert_eq!(last.totals.iter().sum::<u64>(), 105);
}

#[test]
fn parameters_reach_preset_rules() {
    let mut ca = models::forest_fire([5, 5], true, 0).unwrap();
    let mut params = ParameterSet::new();
    params.insert("grow".into(), 0.0);
    params.insert("ignite".into(), 0.0);
    ca.update_rule_parameters(&params).unwrap();
    let start = ca.state().clone();
    assert_eq!(ca.evolve().unwrap(), &start);
}

proptest! {
    #[test]
    fn life_preset_is_deterministic(seed in any::<u64>()) {
        let run = || {
            let mut ca = models::game_of_life([8, 8], true, seed).unwrap();
            ca.run(5).collect::<Result<Vec<_>, _>>().unwrap()
        };
        prop_assert_eq!(run(), run());
    }
}
