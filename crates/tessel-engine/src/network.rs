//! Network automata over compartment counts.
//!
//! [`NetworkAutomaton`] owns a `compartments × nodes` count matrix, an
//! [`Adjacency`], a rule pipeline, a seeded RNG and the simulated clock
//! that stochastic rules advance. Column `j` of the state is node `j`'s
//! population by compartment.

use log::{debug, trace, warn};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use tessel_core::{Grid, ParameterSet, Shape, ShapeError, SimulatedClock, StepError};
use tessel_rule::{Network, Rule, RuleManager, StepContext};
use tessel_rules::sirc::{CARRIER, COMPARTMENTS, INFECTIOUS};
use tessel_space::Adjacency;

use crate::config::{ConfigError, InitError, NetworkConfig};

// Compile-time assertion: NetworkAutomaton is Send.
const _: () = {
    #[allow(dead_code)]
    fn assert_send<T: Send>() {}
    #[allow(dead_code)]
    fn check() {
        assert_send::<NetworkAutomaton>();
    }
};

/// Aggregate populations after one step of a network run.
#[derive(Clone, Debug, PartialEq)]
pub struct StepRecord {
    /// Population of each compartment summed over all nodes.
    pub totals: Vec<u64>,
    /// Simulated time after the step.
    pub time: f64,
    /// Simulated time the step took.
    pub dt: f64,
}

/// A compartmental automaton on an arbitrary network.
pub struct NetworkAutomaton {
    adjacency: Adjacency,
    state: Grid<u64>,
    rules: RuleManager<Network>,
    rng: ChaCha8Rng,
    seed: u64,
    clock: SimulatedClock,
    generation: u64,
    ready: bool,
}

impl NetworkAutomaton {
    /// Build an automaton from a validated configuration.
    pub fn new(config: NetworkConfig) -> Result<Self, ConfigError> {
        let shape = config.state_shape()?;
        debug!(
            "network automaton: {} nodes, {} compartments, seed {}",
            config.adjacency.node_count(),
            config.compartments,
            config.seed
        );
        Ok(Self {
            adjacency: config.adjacency,
            state: Grid::zeros(shape),
            rules: RuleManager::new(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            seed: config.seed,
            clock: SimulatedClock::new(),
            generation: 0,
            ready: false,
        })
    }

    // ── Accessors ────────────────────────────────────────────────

    /// Current `compartments × nodes` matrix.
    pub fn state(&self) -> &Grid<u64> {
        &self.state
    }

    /// The coupling between nodes.
    pub fn adjacency(&self) -> &Adjacency {
        &self.adjacency
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.adjacency.node_count()
    }

    /// Compartments per node.
    pub fn compartments(&self) -> usize {
        self.state.shape().dims()[0]
    }

    /// Current simulated time.
    pub fn time(&self) -> f64 {
        self.clock.now()
    }

    /// Steps completed since the last initialization.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether an `initialize_*` call has been made.
    pub fn is_initialized(&self) -> bool {
        self.ready
    }

    /// The configured RNG seed.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// The rule pipeline.
    pub fn rules(&self) -> &RuleManager<Network> {
        &self.rules
    }

    /// Population of each compartment summed over all nodes.
    pub fn totals(&self) -> Vec<u64> {
        let nodes = self.node_count();
        self.state
            .as_slice()
            .chunks(nodes)
            .map(|row| row.iter().sum())
            .collect()
    }

    // ── Rules ────────────────────────────────────────────────────

    /// Replace the pipeline with a single rule.
    pub fn set_rule(&mut self, rule: Box<dyn Rule<Network>>) {
        self.rules.set(rule);
    }

    /// Append a rule to the pipeline.
    pub fn add_rule(&mut self, rule: Box<dyn Rule<Network>>) {
        self.rules.add(rule);
    }

    /// Remove every rule.
    pub fn reset_rules(&mut self) {
        self.rules.reset();
    }

    /// Broadcast parameter overrides to every rule.
    pub fn update_rule_parameters(&mut self, params: &ParameterSet) -> Result<(), StepError> {
        self.rules.update_parameters(params)
    }

    // ── Initialization ───────────────────────────────────────────

    /// Every count `0`.
    pub fn initialize_zero(&mut self) {
        let shape = self.state.shape().clone();
        self.install(Grid::zeros(shape));
    }

    /// Overwrite one node's population, leaving the others as they are.
    pub fn initialize_node(&mut self, node: usize, counts: &[u64]) -> Result<(), InitError> {
        let mut state = self.state.clone();
        state.set_column(node, counts)?;
        self.install(state);
        Ok(())
    }

    /// A caller-supplied `compartments × nodes` matrix.
    pub fn initialize_from(&mut self, state: Grid<u64>) -> Result<(), InitError> {
        if state.shape() != self.state.shape() {
            return Err(InitError::DimensionMismatch {
                expected: self.state.shape().clone(),
                got: state.shape().clone(),
            });
        }
        self.install(state);
        Ok(())
    }

    fn install(&mut self, state: Grid<u64>) {
        self.state = state;
        self.generation = 0;
        self.clock.reset();
        self.ready = true;
    }

    // ── Stepping ─────────────────────────────────────────────────

    /// Apply the rule pipeline once and return the new state.
    ///
    /// On error the state, clock and generation are unchanged.
    pub fn evolve(&mut self) -> Result<&Grid<u64>, StepError> {
        if !self.ready {
            return Err(StepError::Uninitialized);
        }
        if self.rules.is_empty() {
            warn!("evolve called with an empty rule pipeline");
            return Err(StepError::EmptyPipeline);
        }
        let mut clock = self.clock;
        let next = {
            let mut ctx =
                StepContext::new(&self.adjacency, &mut self.rng, &mut clock, self.generation);
            self.rules.apply(&self.state, &mut ctx)?
        };
        if next.shape() != self.state.shape() {
            return Err(StepError::Shape(ShapeError::ShapeMismatch {
                expected: self.state.shape().clone(),
                got: next.shape().clone(),
            }));
        }
        self.state = next;
        self.clock = clock;
        self.generation += 1;
        trace!(
            "network generation {} at t = {}",
            self.generation,
            self.clock.now()
        );
        Ok(&self.state)
    }

    /// Evolve until `stop` holds for the current state or `max_steps`
    /// steps have run, recording totals after each step.
    ///
    /// `stop` is checked before every step, so a state that already
    /// satisfies it yields an empty series.
    pub fn run_until(
        &mut self,
        max_steps: usize,
        mut stop: impl FnMut(&Grid<u64>) -> bool,
    ) -> Result<Vec<StepRecord>, StepError> {
        if !self.ready {
            return Err(StepError::Uninitialized);
        }
        let mut records = Vec::new();
        for _ in 0..max_steps {
            if stop(&self.state) {
                break;
            }
            let before = self.clock.now();
            self.evolve()?;
            records.push(StepRecord {
                totals: self.totals(),
                time: self.clock.now(),
                dt: self.clock.now() - before,
            });
        }
        debug!(
            "network run finished after {} step(s) at t = {}",
            records.len(),
            self.clock.now()
        );
        Ok(records)
    }

    /// Run an SIRC-layout automaton until the infection dies out
    /// (no infectious or carrier individuals anywhere) or `max_steps`.
    ///
    /// Requires at least four compartments.
    pub fn run_collect(&mut self, max_steps: usize) -> Result<Vec<StepRecord>, StepError> {
        let compartments = self.compartments();
        if compartments < COMPARTMENTS {
            return Err(StepError::IncompatibleState {
                reason: format!(
                    "run_collect needs at least {COMPARTMENTS} compartments (S, I, R, C), got {compartments}"
                ),
            });
        }
        let nodes = self.node_count();
        self.run_until(max_steps, |state| {
            let cells = state.as_slice();
            [INFECTIOUS, CARRIER]
                .iter()
                .all(|&c| cells[c * nodes..(c + 1) * nodes].iter().all(|&v| v == 0))
        })
    }

    /// Shape of the state matrix.
    pub fn shape(&self) -> &Shape {
        self.state.shape()
    }
}
