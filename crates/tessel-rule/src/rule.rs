//! The [`Rule`] trait.

use crate::context::StepContext;
use crate::domain::Domain;
use tessel_core::{ParameterSet, RuleError};

/// A transition function from one automaton state to the next.
///
/// # Contract
///
/// - `apply()` returns a new state of the same shape as `current`.
/// - All randomness comes from `ctx.rng()`, so a seeded automaton
///   replays identically.
/// - A rule that returns `Err` must leave itself reusable; the automaton
///   discards the step and keeps its previous state.
///
/// # Object safety
///
/// This trait is object-safe; a [`RuleManager`](crate::RuleManager)
/// stores rules as `Vec<Box<dyn Rule<K>>>`.
///
/// # Examples
///
/// A lattice rule that flips every binary cell:
///
/// ```
/// use tessel_core::{Grid, RuleError};
/// use tessel_rule::{Lattice, Rule, StepContext};
///
/// struct Invert;
///
/// impl Rule<Lattice> for Invert {
///     fn name(&self) -> &str { "invert" }
///
///     fn apply(
///         &mut self,
///         current: &Grid<f64>,
///         _ctx: &mut StepContext<'_, Lattice>,
///     ) -> Result<Grid<f64>, RuleError> {
///         Ok(current.map(|&v| 1.0 - v))
///     }
/// }
///
/// assert_eq!(Invert.name(), "invert");
/// ```
pub trait Rule<K: Domain>: Send + 'static {
    /// Human-readable name for error reporting and logging.
    fn name(&self) -> &str;

    /// Apply any recognized keys from `params`, ignoring the rest.
    ///
    /// Called on every rule in a pipeline when parameters are broadcast.
    /// Must validate the resulting configuration and leave the rule
    /// unchanged on error. Default: accept and ignore everything.
    fn update_parameters(&mut self, _params: &ParameterSet) -> Result<(), RuleError> {
        Ok(())
    }

    /// Compute the next state from `current`.
    fn apply(
        &mut self,
        current: &K::State,
        ctx: &mut StepContext<'_, K>,
    ) -> Result<K::State, RuleError>;
}
