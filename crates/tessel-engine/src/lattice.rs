//! Synchronous lattice automata.
//!
//! [`LatticeAutomaton`] owns a state array, a [`NeighborProvider`], a
//! rule pipeline and a seeded RNG. Every [`evolve()`](LatticeAutomaton::evolve)
//! reads neighbors from the current state, folds it through the rules and
//! replaces it with the result.
//!
//! # Lifecycle
//!
//! An automaton starts uninitialized; any `initialize_*` call makes it
//! ready. Stepping an uninitialized automaton returns
//! [`StepError::Uninitialized`].
//!
//! # Ownership model
//!
//! `LatticeAutomaton` is [`Send`]. All mutating methods take `&mut self`,
//! and [`evolve()`](LatticeAutomaton::evolve) returns a reference that
//! borrows from `self`, so the borrow checker prevents stepping while a
//! state reference is held.

use log::{debug, trace, warn};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use tessel_core::{Grid, ParameterSet, Shape, ShapeError, SimulatedClock, StepError};
use tessel_rule::{Lattice, Rule, RuleManager, StepContext};
use tessel_space::{NeighborProvider, NeighborSet};

use crate::collect::{DataCollector, Table};
use crate::config::{ConfigError, InitError, LatticeConfig};

// Compile-time assertion: LatticeAutomaton is Send.
const _: () = {
    #[allow(dead_code)]
    fn assert_send<T: Send>() {}
    #[allow(dead_code)]
    fn check() {
        assert_send::<LatticeAutomaton>();
    }
};

/// A 1D, 2D or 3D cellular automaton with real-valued cells.
///
/// # Examples
///
/// ```
/// use tessel_engine::{LatticeAutomaton, LatticeConfig};
/// use tessel_rules::Wolfram;
/// use tessel_space::{Boundary, Neighborhood};
///
/// let config = LatticeConfig::new([5], Neighborhood::Line, Boundary::Toroidal);
/// let mut ca = LatticeAutomaton::new(config).unwrap();
/// ca.set_rule(Box::new(Wolfram::new(90).unwrap()));
/// ca.initialize_from_indices(&[[2usize]]).unwrap();
///
/// let next = ca.evolve().unwrap();
/// assert_eq!(next.as_slice(), &[0.0, 1.0, 0.0, 1.0, 0.0]);
/// ```
pub struct LatticeAutomaton {
    provider: Box<dyn NeighborProvider>,
    state: Grid<f64>,
    neighbors: Option<NeighborSet>,
    rules: RuleManager<Lattice>,
    rng: ChaCha8Rng,
    seed: u64,
    clock: SimulatedClock,
    generation: u64,
    ready: bool,
}

impl std::fmt::Debug for LatticeAutomaton {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LatticeAutomaton")
            .field("rules", &self.rules)
            .field("seed", &self.seed)
            .field("generation", &self.generation)
            .field("ready", &self.ready)
            .finish_non_exhaustive()
    }
}

impl LatticeAutomaton {
    /// Build an automaton from a validated configuration.
    pub fn new(config: LatticeConfig) -> Result<Self, ConfigError> {
        let topology = config.topology()?;
        debug!(
            "lattice automaton: shape {}, {:?} neighborhood, {:?} boundary, seed {}",
            topology.shape(),
            topology.neighborhood(),
            topology.boundary(),
            config.seed
        );
        Ok(Self::with_provider(Box::new(topology), config.seed))
    }

    /// Build an automaton around any neighbor provider.
    pub fn with_provider(provider: Box<dyn NeighborProvider>, seed: u64) -> Self {
        let state = Grid::zeros(provider.shape().clone());
        Self {
            provider,
            state,
            neighbors: None,
            rules: RuleManager::new(),
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
            clock: SimulatedClock::new(),
            generation: 0,
            ready: false,
        }
    }

    // ── Accessors ────────────────────────────────────────────────

    /// Lattice shape.
    pub fn shape(&self) -> &Shape {
        self.provider.shape()
    }

    /// Current state.
    pub fn state(&self) -> &Grid<f64> {
        &self.state
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
    pub fn rules(&self) -> &RuleManager<Lattice> {
        &self.rules
    }

    /// Neighbor arrays for the current state, computed if stale.
    pub fn neighbors(&mut self) -> Result<&NeighborSet, StepError> {
        if !self.ready {
            return Err(StepError::Uninitialized);
        }
        let neighbors = match self.neighbors.take() {
            Some(n) => n,
            None => self.provider.neighbors(&self.state)?,
        };
        Ok(self.neighbors.insert(neighbors))
    }

    // ── Rules ────────────────────────────────────────────────────

    /// Replace the pipeline with a single rule.
    pub fn set_rule(&mut self, rule: Box<dyn Rule<Lattice>>) {
        self.rules.set(rule);
    }

    /// Append a rule to the pipeline.
    pub fn add_rule(&mut self, rule: Box<dyn Rule<Lattice>>) {
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

    /// Every cell `0`.
    pub fn initialize_zero(&mut self) -> Result<(), InitError> {
        let state = Grid::zeros(self.shape().clone());
        self.install(state)
    }

    /// Every cell uniform in `[0, 1)`.
    pub fn initialize_random(&mut self) -> Result<(), InitError> {
        let rng = &mut self.rng;
        let state = Grid::from_fn(self.provider.shape().clone(), |_| rng.random::<f64>());
        self.install(state)
    }

    /// Every cell `1` with probability `ratio`, else `0`.
    pub fn initialize_random_binary(&mut self, ratio: f64) -> Result<(), InitError> {
        if !(0.0..=1.0).contains(&ratio) {
            return Err(InitError::InvalidRatio { value: ratio });
        }
        let rng = &mut self.rng;
        let state = Grid::from_fn(self.provider.shape().clone(), |_| {
            if rng.random::<f64>() < ratio {
                1.0
            } else {
                0.0
            }
        });
        self.install(state)
    }

    /// Listed cells `1`, the rest `0`.
    ///
    /// Fails without touching the state if any coordinate has the wrong
    /// arity or lies outside the lattice.
    pub fn initialize_from_indices<I, C>(&mut self, indices: I) -> Result<(), InitError>
    where
        I: IntoIterator<Item = C>,
        C: AsRef<[usize]>,
    {
        let mut state = Grid::zeros(self.shape().clone());
        for coord in indices {
            state.set(coord.as_ref(), 1.0)?;
        }
        self.install(state)
    }

    /// Every cell a uniform integer in `[min, max)`.
    pub fn initialize_random_int(&mut self, min: i64, max: i64) -> Result<(), InitError> {
        if min >= max {
            return Err(InitError::EmptyRange { min, max });
        }
        let rng = &mut self.rng;
        let state = Grid::from_fn(self.provider.shape().clone(), |_| {
            rng.random_range(min..max) as f64
        });
        self.install(state)
    }

    /// A caller-supplied state of the lattice's shape.
    pub fn initialize_from(&mut self, state: Grid<f64>) -> Result<(), InitError> {
        if state.shape() != self.shape() {
            return Err(InitError::DimensionMismatch {
                expected: self.shape().clone(),
                got: state.shape().clone(),
            });
        }
        self.install(state)
    }

    fn install(&mut self, state: Grid<f64>) -> Result<(), InitError> {
        let neighbors = self.provider.neighbors(&state)?;
        self.state = state;
        self.neighbors = Some(neighbors);
        self.generation = 0;
        self.clock.reset();
        self.ready = true;
        Ok(())
    }

    // ── Stepping ─────────────────────────────────────────────────

    /// Advance one generation and return the new state.
    ///
    /// On error the state, generation and neighbor cache are unchanged.
    pub fn evolve(&mut self) -> Result<&Grid<f64>, StepError> {
        if !self.ready {
            return Err(StepError::Uninitialized);
        }
        if self.rules.is_empty() {
            warn!("evolve called with an empty rule pipeline");
            return Err(StepError::EmptyPipeline);
        }
        let neighbors = match self.neighbors.take() {
            Some(n) => n,
            None => self.provider.neighbors(&self.state)?,
        };

        let result = {
            let mut ctx =
                StepContext::new(&neighbors, &mut self.rng, &mut self.clock, self.generation);
            self.rules.apply(&self.state, &mut ctx)
        };
        let next = match result {
            Ok(next) if next.shape() == self.state.shape() => next,
            Ok(next) => {
                self.neighbors = Some(neighbors);
                return Err(StepError::Shape(ShapeError::ShapeMismatch {
                    expected: self.state.shape().clone(),
                    got: next.shape().clone(),
                }));
            }
            Err(e) => {
                self.neighbors = Some(neighbors);
                return Err(e);
            }
        };

        self.state = next;
        self.generation += 1;
        trace!("lattice generation {}", self.generation);
        Ok(&self.state)
    }

    /// Lazily yield the current state followed by `steps` evolved states.
    ///
    /// The iterator stops after yielding the first error.
    pub fn run(&mut self, steps: usize) -> Run<'_> {
        Run {
            automaton: self,
            remaining: steps,
            started: false,
            done: false,
        }
    }

    /// Drive [`run`](Self::run) and record every state in `collector`.
    pub fn run_collect(
        &mut self,
        steps: usize,
        mut collector: DataCollector,
    ) -> Result<Table, StepError> {
        for state in self.run(steps) {
            collector.record(&state?);
        }
        Ok(collector.into_table())
    }
}

/// Iterator returned by [`LatticeAutomaton::run`].
pub struct Run<'a> {
    automaton: &'a mut LatticeAutomaton,
    remaining: usize,
    started: bool,
    done: bool,
}

impl Iterator for Run<'_> {
    type Item = Result<Grid<f64>, StepError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        if !self.started {
            self.started = true;
            if !self.automaton.ready {
                self.done = true;
                return Some(Err(StepError::Uninitialized));
            }
            return Some(Ok(self.automaton.state.clone()));
        }
        if self.remaining == 0 {
            self.done = true;
            return None;
        }
        self.remaining -= 1;
        match self.automaton.evolve() {
            Ok(state) => Some(Ok(state.clone())),
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.done {
            (0, Some(0))
        } else {
            let upper = self.remaining + usize::from(!self.started);
            (0, Some(upper))
        }
    }
}
