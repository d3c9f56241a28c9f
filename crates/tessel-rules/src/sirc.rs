//! SIRC epidemic dynamics: Susceptible, Infectious, Recovered, Carrier.
//!
//! Compartment rows, in order: `S = 0`, `I = 1`, `R = 2`, `C = 3`.
//!
//! | Reaction | Propensity                    | Change         |
//! |----------|-------------------------------|----------------|
//! | S → I    | `β · (I + (1 − q)·C) / N · S` | `[-1, 1, 0, 0]` |
//! | I → C    | `α · I`                       | `[0, -1, 0, 1]` |
//! | I → R    | `(1 − α) · γ_i · I`           | `[0, -1, 1, 0]` |
//! | C → R    | `γ_c · C`                     | `[0, 0, 1, -1]` |
//!
//! `N = S + I + R + C`; an empty node has every propensity zero.

use crate::gillespie::{Reaction, ReactionSystem, StochasticStepper};
use crate::validate;
use log::trace;
use tessel_core::{override_param, Grid, ParameterSet, RuleError};
use tessel_rule::{Network, Rule, StepContext};

const NAME: &str = "sirc";

/// Row of the susceptible compartment.
pub const SUSCEPTIBLE: usize = 0;
/// Row of the infectious compartment.
pub const INFECTIOUS: usize = 1;
/// Row of the recovered compartment.
pub const RECOVERED: usize = 2;
/// Row of the carrier compartment.
pub const CARRIER: usize = 3;
/// Number of SIRC compartments.
pub const COMPARTMENTS: usize = 4;

/// Rates for [`Sirc`].
///
/// Parameter names: `alpha`, `beta`, `gamma_c`, `gamma_i`, `q`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SircConfig {
    /// Fraction of infections that become carriers, in `[0, 1]`. Default `0.17`.
    pub alpha: f64,
    /// Transmission rate. Default `0.36`.
    pub beta: f64,
    /// Carrier recovery rate. Default `0.87`.
    pub gamma_c: f64,
    /// Infectious recovery rate. Default `0.03`.
    pub gamma_i: f64,
    /// Reduction in carrier infectiousness, in `[0, 1]`. Default `0.1`.
    pub q: f64,
}

impl Default for SircConfig {
    fn default() -> Self {
        Self {
            alpha: 0.17,
            beta: 0.36,
            gamma_c: 0.87,
            gamma_i: 0.03,
            q: 0.1,
        }
    }
}

impl SircConfig {
    /// Check fractions are in `[0, 1]` and rates are finite and non-negative.
    pub fn validate(&self) -> Result<(), RuleError> {
        validate::probability(NAME, "alpha", self.alpha)?;
        validate::probability(NAME, "q", self.q)?;
        validate::non_negative(NAME, "beta", self.beta)?;
        validate::non_negative(NAME, "gamma_c", self.gamma_c)?;
        validate::non_negative(NAME, "gamma_i", self.gamma_i)
    }

    /// Copy of `self` with recognized keys from `params` applied.
    pub fn apply(&self, params: &ParameterSet) -> Self {
        let mut next = *self;
        override_param(params, "alpha", &mut next.alpha);
        override_param(params, "beta", &mut next.beta);
        override_param(params, "gamma_c", &mut next.gamma_c);
        override_param(params, "gamma_i", &mut next.gamma_i);
        override_param(params, "q", &mut next.q);
        next
    }
}

/// Stochastic SIRC rule for network automata.
///
/// Each step fires one reaction at every node with a positive total
/// propensity and advances the automaton's clock.
#[derive(Clone, Debug)]
pub struct Sirc {
    config: SircConfig,
    reactions: Vec<Reaction>,
    stepper: StochasticStepper,
}

impl Default for Sirc {
    fn default() -> Self {
        Self::with_valid(SircConfig::default())
    }
}

impl Sirc {
    /// Create a rule, validating `config`.
    pub fn new(config: SircConfig) -> Result<Self, RuleError> {
        config.validate()?;
        Ok(Self::with_valid(config))
    }

    fn with_valid(config: SircConfig) -> Self {
        Self {
            config,
            reactions: vec![
                Reaction::new("S->I", &[-1, 1, 0, 0]),
                Reaction::new("I->C", &[0, -1, 0, 1]),
                Reaction::new("I->R", &[0, -1, 1, 0]),
                Reaction::new("C->R", &[0, 0, 1, -1]),
            ],
            stepper: StochasticStepper::new(),
        }
    }

    /// Current configuration.
    pub fn config(&self) -> &SircConfig {
        &self.config
    }
}

impl ReactionSystem for Sirc {
    fn compartments(&self) -> usize {
        COMPARTMENTS
    }

    fn reactions(&self) -> &[Reaction] {
        &self.reactions
    }

    fn propensities(&self, counts: &[u64], out: &mut [f64]) {
        let [s, i, r, c] = [
            counts[SUSCEPTIBLE] as f64,
            counts[INFECTIOUS] as f64,
            counts[RECOVERED] as f64,
            counts[CARRIER] as f64,
        ];
        let n = s + i + r + c;
        if n == 0.0 {
            out.fill(0.0);
            return;
        }
        let SircConfig {
            alpha,
            beta,
            gamma_c,
            gamma_i,
            q,
        } = self.config;
        out[0] = beta * (i + (1.0 - q) * c) / n * s;
        out[1] = alpha * i;
        out[2] = (1.0 - alpha) * gamma_i * i;
        out[3] = gamma_c * c;
    }
}

impl Rule<Network> for Sirc {
    fn name(&self) -> &str {
        NAME
    }

    fn update_parameters(&mut self, params: &ParameterSet) -> Result<(), RuleError> {
        let next = self.config.apply(params);
        next.validate()?;
        self.config = next;
        Ok(())
    }

    fn apply(
        &mut self,
        current: &Grid<u64>,
        ctx: &mut StepContext<'_, Network>,
    ) -> Result<Grid<u64>, RuleError> {
        let dims = current.shape().dims();
        if dims.len() != 2 || dims[0] != COMPARTMENTS {
            return Err(RuleError::IncompatibleState {
                rule: NAME.to_string(),
                reason: format!(
                    "needs a {COMPARTMENTS} x nodes count matrix, got shape {}",
                    current.shape()
                ),
            });
        }
        // The stepper borrows `self` as the reaction system.
        let mut stepper = std::mem::take(&mut self.stepper);
        let generation = ctx.generation();
        let outcome = {
            let (rng, clock) = ctx.rng_and_clock();
            stepper.step(&*self, current, rng, clock)
        };
        self.stepper = stepper;
        let outcome = outcome?;
        trace!(
            "sirc generation {generation}: {} fired, {} idle, dt = {}",
            outcome.fired,
            outcome.skipped,
            outcome.dt
        );
        Ok(outcome.state)
    }
}
