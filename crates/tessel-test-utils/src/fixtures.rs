//! Reusable rule fixtures.
//!
//! - [`IdentityRule`]: returns the state unchanged.
//! - [`ConstRule`]: fills every lattice cell with a constant.
//! - [`FailingRule`]: fails deterministically after N calls.
//! - [`CountingRule`]: identity that counts its calls through a shared handle.

use std::marker::PhantomData;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tessel_core::{Grid, ParameterSet, RuleError};
use tessel_rule::{Domain, Lattice, Rule, StepContext};

/// Returns a copy of its input. Works in either domain.
pub struct IdentityRule<K> {
    pub name: String,
    _domain: PhantomData<fn() -> K>,
}

impl<K> IdentityRule<K> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            _domain: PhantomData,
        }
    }
}

impl<K: Domain> Rule<K> for IdentityRule<K> {
    fn name(&self) -> &str {
        &self.name
    }

    fn apply(
        &mut self,
        current: &K::State,
        _ctx: &mut StepContext<'_, K>,
    ) -> Result<K::State, RuleError> {
        Ok(current.clone())
    }
}

/// Writes a constant to every lattice cell.
///
/// Recognizes the parameter `value`.
pub struct ConstRule {
    pub name: String,
    pub value: f64,
}

impl ConstRule {
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

impl Rule<Lattice> for ConstRule {
    fn name(&self) -> &str {
        &self.name
    }

    fn update_parameters(&mut self, params: &ParameterSet) -> Result<(), RuleError> {
        if let Some(&v) = params.get("value") {
            if !v.is_finite() {
                return Err(RuleError::invalid_parameter(&self.name, "value", "must be finite"));
            }
            self.value = v;
        }
        Ok(())
    }

    fn apply(
        &mut self,
        current: &Grid<f64>,
        _ctx: &mut StepContext<'_, Lattice>,
    ) -> Result<Grid<f64>, RuleError> {
        Ok(Grid::filled(current.shape().clone(), self.value))
    }
}

/// Succeeds `succeed_count` times (as identity), then fails every call.
pub struct FailingRule<K> {
    pub name: String,
    pub succeed_count: usize,
    calls: usize,
    _domain: PhantomData<fn() -> K>,
}

impl<K> FailingRule<K> {
    pub fn new(name: impl Into<String>, succeed_count: usize) -> Self {
        Self {
            name: name.into(),
            succeed_count,
            calls: 0,
            _domain: PhantomData,
        }
    }

    /// How many times `apply()` has been called.
    pub fn calls(&self) -> usize {
        self.calls
    }
}

impl<K: Domain> Rule<K> for FailingRule<K> {
    fn name(&self) -> &str {
        &self.name
    }

    fn apply(
        &mut self,
        current: &K::State,
        _ctx: &mut StepContext<'_, K>,
    ) -> Result<K::State, RuleError> {
        let n = self.calls;
        self.calls += 1;
        if n >= self.succeed_count {
            return Err(RuleError::ExecutionFailed {
                reason: format!(
                    "deliberate failure after {} successful calls",
                    self.succeed_count
                ),
            });
        }
        Ok(current.clone())
    }
}

/// Identity rule whose call count is observable after it has been boxed
/// into a pipeline.
pub struct CountingRule<K> {
    calls: Arc<AtomicUsize>,
    _domain: PhantomData<fn() -> K>,
}

impl<K> CountingRule<K> {
    /// The rule and a handle reading its call count.
    pub fn new() -> (Self, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        (
            Self {
                calls: Arc::clone(&calls),
                _domain: PhantomData,
            },
            calls,
        )
    }
}

impl<K: Domain> Rule<K> for CountingRule<K> {
    fn name(&self) -> &str {
        "counting"
    }

    fn apply(
        &mut self,
        current: &K::State,
        _ctx: &mut StepContext<'_, K>,
    ) -> Result<K::State, RuleError> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        Ok(current.clone())
    }
}
