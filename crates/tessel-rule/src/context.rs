//! Execution context passed to rules during a step.

use crate::domain::Domain;
use rand_chacha::ChaCha8Rng;
use tessel_core::SimulatedClock;

/// Everything a rule may read or advance besides the state itself.
///
/// The environment is shared read-only across the whole pipeline. The
/// random source and the clock are owned by the automaton and lent
/// mutably, so one seed reproduces an entire run.
pub struct StepContext<'a, K: Domain> {
    env: &'a K::Env,
    rng: &'a mut ChaCha8Rng,
    clock: &'a mut SimulatedClock,
    generation: u64,
}

impl<'a, K: Domain> StepContext<'a, K> {
    /// Construct a context.
    ///
    /// Typically called by the automaton, not by rules directly.
    pub fn new(
        env: &'a K::Env,
        rng: &'a mut ChaCha8Rng,
        clock: &'a mut SimulatedClock,
        generation: u64,
    ) -> Self {
        Self {
            env,
            rng,
            clock,
            generation,
        }
    }

    /// Neighbor arrays (lattice) or adjacency matrix (network).
    pub fn env(&self) -> &'a K::Env {
        self.env
    }

    /// The automaton's seeded random source.
    pub fn rng(&mut self) -> &mut ChaCha8Rng {
        self.rng
    }

    /// Simulated time. Lattice automata never advance it themselves.
    pub fn clock(&mut self) -> &mut SimulatedClock {
        self.clock
    }

    /// Both mutable resources at once, for samplers that draw random
    /// numbers and advance time in the same call.
    pub fn rng_and_clock(&mut self) -> (&mut ChaCha8Rng, &mut SimulatedClock) {
        (&mut *self.rng, &mut *self.clock)
    }

    /// Number of completed steps before this one.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}
