//! Per-node stochastic simulation (Gillespie / kinetic Monte Carlo).
//!
//! A [`ReactionSystem`] describes the reactions available to one node's
//! population: a propensity for each, and a stoichiometry row giving the
//! change to every compartment when it fires. [`StochasticStepper::step`]
//! fires one sampled reaction at every active node and advances the
//! simulated clock by a single exponential waiting time whose rate is the
//! sum of all node propensities.
//!
//! A node whose propensities sum to zero has nothing that can happen to
//! it. It is reported internally as a [`DegenerateTransition`] and left
//! unchanged; this is never an error for the caller.

use log::trace;
use rand::distr::weighted::WeightedIndex;
use rand::distr::{Distribution, Open01};
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use smallvec::SmallVec;
use std::borrow::Cow;
use std::error::Error;
use std::fmt;
use tessel_core::{Grid, RuleError, SimulatedClock};

/// One reaction channel: a name and the per-compartment change it causes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reaction {
    name: Cow<'static, str>,
    delta: SmallVec<[i64; 4]>,
}

impl Reaction {
    /// Create a reaction from its stoichiometry row.
    pub fn new(name: impl Into<Cow<'static, str>>, delta: &[i64]) -> Self {
        Self {
            name: name.into(),
            delta: SmallVec::from_slice(delta),
        }
    }

    /// Reaction name, e.g. `"S->I"`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Change applied to each compartment when the reaction fires.
    pub fn delta(&self) -> &[i64] {
        &self.delta
    }

    /// Whether the reaction conserves the total population.
    pub fn is_conservative(&self) -> bool {
        self.delta.iter().sum::<i64>() == 0
    }
}

/// A set of reactions acting on one node's compartment counts.
pub trait ReactionSystem {
    /// Number of compartments each node carries.
    fn compartments(&self) -> usize;

    /// Reactions in propensity order.
    fn reactions(&self) -> &[Reaction];

    /// Write one propensity per reaction into `out` for a node whose
    /// population is `counts`.
    ///
    /// `out` has `reactions().len()` slots. Values must be finite and
    /// non-negative.
    fn propensities(&self, counts: &[u64], out: &mut [f64]);
}

/// A node had no reaction with positive propensity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DegenerateTransition {
    /// The inactive node.
    pub node: usize,
}

impl fmt::Display for DegenerateTransition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node {} has zero total propensity", self.node)
    }
}

impl Error for DegenerateTransition {}

/// Summary of one [`StochasticStepper::step`] call.
#[derive(Clone, Debug, PartialEq)]
pub struct StepOutcome {
    /// The population after firing.
    pub state: Grid<u64>,
    /// Time advanced; zero when every node was degenerate.
    pub dt: f64,
    /// Nodes at which a reaction fired.
    pub fired: usize,
    /// Nodes skipped as degenerate.
    pub skipped: usize,
}

/// Drives a [`ReactionSystem`] over a `compartments × nodes` count matrix.
///
/// Keeps scratch buffers between calls so repeated steps do not allocate
/// per node.
#[derive(Clone, Debug, Default)]
pub struct StochasticStepper {
    counts: Vec<u64>,
    propensities: Vec<f64>,
}

impl StochasticStepper {
    /// A stepper with empty scratch buffers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire one reaction at every active node and advance `clock`.
    ///
    /// Nodes are visited in column order; each draws one categorical
    /// sample, then a single `U ∈ (0, 1)` sets `dt = -ln(U) / total_rate`.
    pub fn step<S: ReactionSystem + ?Sized>(
        &mut self,
        system: &S,
        state: &Grid<u64>,
        rng: &mut ChaCha8Rng,
        clock: &mut SimulatedClock,
    ) -> Result<StepOutcome, RuleError> {
        let compartments = system.compartments();
        let reactions = system.reactions();
        let dims = state.shape().dims();
        if dims.len() != 2 || dims[0] != compartments {
            return Err(RuleError::IncompatibleState {
                rule: "gillespie".to_string(),
                reason: format!(
                    "expected a {compartments} x nodes count matrix, got shape {}",
                    state.shape()
                ),
            });
        }
        if let Some(r) = reactions.iter().find(|r| r.delta().len() != compartments) {
            return Err(RuleError::ExecutionFailed {
                reason: format!(
                    "reaction '{}' has {} stoichiometry entries for {compartments} compartments",
                    r.name(),
                    r.delta().len()
                ),
            });
        }

        let mut next = state.clone();
        let mut total_rate = 0.0;
        let mut fired = 0;
        let mut skipped = 0;
        for node in 0..dims[1] {
            self.load_node(state, node, reactions.len())?;
            system.propensities(&self.counts, &mut self.propensities);
            self.check_propensities(reactions, node)?;

            match self.choose(node, rng) {
                Ok(choice) => {
                    let reaction = &reactions[choice];
                    apply_delta(&mut next, node, reaction)?;
                    total_rate += self.propensities.iter().sum::<f64>();
                    fired += 1;
                }
                Err(degenerate) => {
                    trace!("skipping {degenerate}");
                    skipped += 1;
                }
            }
        }

        let dt = if total_rate > 0.0 {
            let u: f64 = rng.sample(Open01);
            -u.ln() / total_rate
        } else {
            0.0
        };
        clock.advance(dt)?;
        Ok(StepOutcome {
            state: next,
            dt,
            fired,
            skipped,
        })
    }

    fn load_node(
        &mut self,
        state: &Grid<u64>,
        node: usize,
        reactions: usize,
    ) -> Result<(), RuleError> {
        self.counts = state.column(node).ok_or_else(|| RuleError::ExecutionFailed {
            reason: format!("node {node} is out of range"),
        })?;
        self.propensities.clear();
        self.propensities.resize(reactions, 0.0);
        Ok(())
    }

    fn check_propensities(&self, reactions: &[Reaction], node: usize) -> Result<(), RuleError> {
        for (r, &p) in reactions.iter().zip(&self.propensities) {
            if !p.is_finite() || p < 0.0 {
                return Err(RuleError::ExecutionFailed {
                    reason: format!(
                        "reaction '{}' at node {node} has invalid propensity {p}",
                        r.name()
                    ),
                });
            }
        }
        Ok(())
    }

    /// Sample a reaction index proportionally to the current propensities.
    fn choose(&self, node: usize, rng: &mut ChaCha8Rng) -> Result<usize, DegenerateTransition> {
        let total: f64 = self.propensities.iter().sum();
        if total <= 0.0 {
            return Err(DegenerateTransition { node });
        }
        let dist =
            WeightedIndex::new(&self.propensities).map_err(|_| DegenerateTransition { node })?;
        Ok(dist.sample(rng))
    }
}

fn apply_delta(state: &mut Grid<u64>, node: usize, reaction: &Reaction) -> Result<(), RuleError> {
    let nodes = state.shape().dims()[1];
    for (c, &d) in reaction.delta().iter().enumerate() {
        let slot = &mut state.as_mut_slice()[c * nodes + node];
        *slot = slot
            .checked_add_signed(d)
            .ok_or_else(|| RuleError::ExecutionFailed {
                reason: format!(
                    "reaction '{}' would drive compartment {c} at node {node} out of range",
                    reaction.name()
                ),
            })?;
    }
    Ok(())
}
