//! Preconfigured automata.
//!
//! Every preset builds the automaton, installs its rule and initializes
//! the state, so the result is ready to [`evolve`]. All randomness,
//! including the initial state, comes from `seed`.
//!
//! [`evolve`]: tessel_engine::LatticeAutomaton::evolve

use std::fmt;

use log::debug;
use tessel_core::RuleError;
use tessel_engine::{
    ConfigError, InitError, LatticeAutomaton, LatticeConfig, NetworkAutomaton, NetworkConfig,
};
use tessel_rules::{
    Applause, BriansBrain, ForestFire, GameOfLife, HarvestConfig, LogisticHarvest, Sirc, Wolfram,
};
use tessel_space::{Adjacency, Boundary, Neighborhood};

/// Errors from building a preset model.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelError {
    /// The lattice or network description is invalid.
    Config(ConfigError),
    /// A rule rejected its configuration.
    Rule(RuleError),
    /// The initial state could not be generated.
    Init(InitError),
    /// [`wolfram`] was given no rule numbers.
    NoRules,
}

impl fmt::Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "invalid model configuration: {e}"),
            Self::Rule(e) => write!(f, "invalid model rule: {e}"),
            Self::Init(e) => write!(f, "model initialization failed: {e}"),
            Self::NoRules => write!(f, "at least one rule number is required"),
        }
    }
}

impl std::error::Error for ModelError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Rule(e) => Some(e),
            Self::Init(e) => Some(e),
            Self::NoRules => None,
        }
    }
}

impl From<ConfigError> for ModelError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<RuleError> for ModelError {
    fn from(e: RuleError) -> Self {
        Self::Rule(e)
    }
}

impl From<InitError> for ModelError {
    fn from(e: InitError) -> Self {
        Self::Init(e)
    }
}

fn boundary(toroidal: bool) -> Boundary {
    if toroidal {
        Boundary::Toroidal
    } else {
        Boundary::Bounded
    }
}

fn lattice(
    dims: &[usize],
    neighborhood: Neighborhood,
    toroidal: bool,
    seed: u64,
) -> Result<LatticeAutomaton, ModelError> {
    let config = LatticeConfig::new(dims, neighborhood, boundary(toroidal)).with_seed(seed);
    Ok(LatticeAutomaton::new(config)?)
}

/// One or more elementary rules on an `n`-cell line, applied in order
/// each generation, starting from a single live cell at `n / 2`.
pub fn wolfram(
    n: usize,
    rule_numbers: &[u32],
    toroidal: bool,
    seed: u64,
) -> Result<LatticeAutomaton, ModelError> {
    if rule_numbers.is_empty() {
        return Err(ModelError::NoRules);
    }
    let mut ca = lattice(&[n], Neighborhood::Line, toroidal, seed)?;
    for &number in rule_numbers {
        ca.add_rule(Box::new(Wolfram::new(number)?));
    }
    ca.initialize_from_indices([[n / 2]])?;
    debug!("wolfram model {rule_numbers:?} on {n} cells");
    Ok(ca)
}

/// Conway's Life on a Moore lattice, each cell alive with probability 0.5.
pub fn game_of_life(
    dims: [usize; 2],
    toroidal: bool,
    seed: u64,
) -> Result<LatticeAutomaton, ModelError> {
    let mut ca = lattice(&dims, Neighborhood::Moore, toroidal, seed)?;
    ca.set_rule(Box::new(GameOfLife));
    ca.initialize_random_binary(0.5)?;
    Ok(ca)
}

/// Brian's Brain on a Moore lattice, cells uniform over `{0, 1, 2}`.
pub fn brians_brain(
    dims: [usize; 2],
    toroidal: bool,
    seed: u64,
) -> Result<LatticeAutomaton, ModelError> {
    let mut ca = lattice(&dims, Neighborhood::Moore, toroidal, seed)?;
    ca.set_rule(Box::new(BriansBrain));
    ca.initialize_random_int(0, 3)?;
    Ok(ca)
}

/// Audience applause on a toroidal Moore lattice with default
/// parameters; 90% of the audience starts clapping.
pub fn applause(dims: [usize; 2], seed: u64) -> Result<LatticeAutomaton, ModelError> {
    let mut ca = lattice(&dims, Neighborhood::Moore, true, seed)?;
    ca.set_rule(Box::new(Applause::default()));
    ca.initialize_random_binary(0.9)?;
    Ok(ca)
}

/// Forest fire on a Moore lattice with default probabilities; half the
/// cells start as trees and none are burning.
pub fn forest_fire(
    dims: [usize; 2],
    toroidal: bool,
    seed: u64,
) -> Result<LatticeAutomaton, ModelError> {
    let mut ca = lattice(&dims, Neighborhood::Moore, toroidal, seed)?;
    ca.set_rule(Box::new(ForestFire::default()));
    ca.initialize_random_binary(0.5)?;
    Ok(ca)
}

/// Logistic growth with diffusion and harvesting on a Von Neumann
/// lattice. `percent_mpa` of the cells form a protected square in the
/// corner. Densities start uniform in `[0, 1)`.
pub fn mpa(
    dims: [usize; 2],
    percent_mpa: f64,
    toroidal: bool,
    seed: u64,
) -> Result<LatticeAutomaton, ModelError> {
    let config = HarvestConfig {
        percent_protected: percent_mpa,
        ..HarvestConfig::default()
    };
    let rule = LogisticHarvest::new(config)?;
    let mut ca = lattice(&dims, Neighborhood::VonNeumann, toroidal, seed)?;
    ca.set_rule(Box::new(rule));
    ca.initialize_random()?;
    Ok(ca)
}

/// The SIRC epidemic on `adjacency` with default rates. Every count
/// starts at zero; seed infections with
/// [`initialize_node`](NetworkAutomaton::initialize_node).
pub fn sirc(adjacency: Adjacency, seed: u64) -> Result<NetworkAutomaton, ModelError> {
    let config = NetworkConfig::new(adjacency, tessel_rules::sirc::COMPARTMENTS).with_seed(seed);
    let mut network = NetworkAutomaton::new(config)?;
    network.set_rule(Box::new(Sirc::default()));
    network.initialize_zero();
    Ok(network)
}
