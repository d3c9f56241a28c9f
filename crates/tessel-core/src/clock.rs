//! Simulated continuous time for stochastic evolution.

use crate::error::RuleError;

/// A monotonically non-decreasing simulated-time accumulator.
///
/// Owned by a network automaton and advanced by stochastic rules through
/// their step context. Lattice automata advance in discrete generations
/// and never touch it.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SimulatedClock {
    now: f64,
}

impl SimulatedClock {
    /// A clock at time zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current simulated time.
    pub fn now(&self) -> f64 {
        self.now
    }

    /// Advance by `dt`, returning the new time.
    ///
    /// Rejects negative or non-finite increments so the clock can never
    /// run backwards or become NaN.
    pub fn advance(&mut self, dt: f64) -> Result<f64, RuleError> {
        if !dt.is_finite() || dt < 0.0 {
            return Err(RuleError::InvalidTimeStep { value: dt });
        }
        self.now += dt;
        Ok(self.now)
    }

    /// Rewind to time zero.
    pub fn reset(&mut self) {
        self.now = 0.0;
    }
}
