//! Rule library for Tessel automata.
//!
//! Lattice rules (`Rule<Lattice>`):
//!
//! - [`Wolfram`]: elementary 1D binary rules 0..=255
//! - [`GameOfLife`]: Conway's B3/S23
//! - [`BriansBrain`]: dead / dying / firing
//! - [`ForestFire`]: empty / tree / burning with spontaneous growth and ignition
//! - [`LogisticHarvest`]: diffusion, logistic growth and harvest with a protected area
//! - [`Applause`]: global-field clapping model
//!
//! Network rules (`Rule<Network>`):
//!
//! - [`Sirc`]: SIRC epidemic dynamics via the [`gillespie`] stepper
//! - [`Migration`]: deterministic diffusion of compartment counts along edges
//!
//! Every probabilistic rule draws from the automaton's seeded RNG in
//! row-major cell order, so runs are reproducible from a seed.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod applause;
pub mod brians;
pub mod forest_fire;
pub mod gillespie;
pub mod harvest;
pub mod life;
pub mod migration;
pub mod sirc;
pub mod wolfram;

mod validate;

pub use applause::{Applause, ApplauseConfig};
pub use brians::BriansBrain;
pub use forest_fire::{ForestFire, ForestFireConfig};
pub use gillespie::{DegenerateTransition, Reaction, ReactionSystem, StochasticStepper};
pub use harvest::{HarvestConfig, LogisticHarvest};
pub use life::GameOfLife;
pub use migration::{Migration, MigrationConfig};
pub use sirc::{Sirc, SircConfig};
pub use wolfram::Wolfram;

#[cfg(test)]
pub(crate) mod testing {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use tessel_core::{Grid, RuleError, SimulatedClock};
    use tessel_rule::{Lattice, Rule, StepContext};
    use tessel_space::{Boundary, NeighborProvider, Neighborhood, Topology};

    /// One application of `rule` with neighbors from a fresh topology.
    pub(crate) fn apply(
        rule: &mut dyn Rule<Lattice>,
        state: &Grid<f64>,
        neighborhood: Neighborhood,
        boundary: Boundary,
        seed: u64,
    ) -> Result<Grid<f64>, RuleError> {
        let topo = Topology::new(state.shape().clone(), neighborhood, boundary).unwrap();
        let env = topo.neighbors(state).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut clock = SimulatedClock::new();
        let mut ctx = StepContext::new(&env, &mut rng, &mut clock, 0);
        rule.apply(state, &mut ctx)
    }
}
