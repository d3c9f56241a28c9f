//! Audience applause model driven by the global fraction of clappers.

use crate::validate;
use rand::Rng;
use tessel_core::{override_param, Grid, ParameterSet, RuleError};
use tessel_rule::{Lattice, Rule, StepContext};

const NAME: &str = "applause";

/// Parameters for [`Applause`].
///
/// Parameter names: `a`, `b`, `alpha`, `beta`. All must be finite and
/// non-negative.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ApplauseConfig {
    /// Base rate of starting to clap. Default `0.5`.
    pub a: f64,
    /// Base rate of stopping. Default `0.3`.
    pub b: f64,
    /// Peer-pressure gain on starting. Default `1`.
    pub alpha: f64,
    /// Peer-pressure damping on stopping. Default `5`.
    pub beta: f64,
}

impl Default for ApplauseConfig {
    fn default() -> Self {
        Self {
            a: 0.5,
            b: 0.3,
            alpha: 1.0,
            beta: 5.0,
        }
    }
}

impl ApplauseConfig {
    /// Check every field is finite and non-negative.
    pub fn validate(&self) -> Result<(), RuleError> {
        validate::non_negative(NAME, "a", self.a)?;
        validate::non_negative(NAME, "b", self.b)?;
        validate::non_negative(NAME, "alpha", self.alpha)?;
        validate::non_negative(NAME, "beta", self.beta)
    }

    /// Copy of `self` with recognized keys from `params` applied.
    pub fn apply(&self, params: &ParameterSet) -> Self {
        let mut next = *self;
        override_param(params, "a", &mut next.a);
        override_param(params, "b", &mut next.b);
        override_param(params, "alpha", &mut next.alpha);
        override_param(params, "beta", &mut next.beta);
        next
    }

    /// `(p_start, p_stop)` for a clapping fraction `f`, clamped to `[0, 1]`.
    pub fn probabilities(&self, f: f64) -> (f64, f64) {
        let start = self.a * self.alpha * f;
        let stop = self.b / (1.0 + self.beta * f);
        (start.clamp(0.0, 1.0), stop.clamp(0.0, 1.0))
    }
}

/// Binary rule where `1` is clapping.
///
/// With `f = ones / (cells - 1)` (or `ones` for a single cell), a quiet
/// cell starts with probability `a * alpha * f` and a clapping cell
/// stops with probability `b / (1 + beta * f)`. Neighbors are not read.
/// Two independent uniform draws are taken per cell in row-major order.
#[derive(Clone, Debug, Default)]
pub struct Applause {
    config: ApplauseConfig,
}

impl Applause {
    /// Create a rule, validating `config`.
    pub fn new(config: ApplauseConfig) -> Result<Self, RuleError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Current configuration.
    pub fn config(&self) -> &ApplauseConfig {
        &self.config
    }
}

fn clapping_fraction(state: &Grid<f64>) -> f64 {
    let ones = state.count_eq(1.0) as f64;
    match state.len() {
        0 | 1 => ones,
        n => ones / (n - 1) as f64,
    }
}

impl Rule<Lattice> for Applause {
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
        current: &Grid<f64>,
        ctx: &mut StepContext<'_, Lattice>,
    ) -> Result<Grid<f64>, RuleError> {
        let (start, stop) = self.config.probabilities(clapping_fraction(current));
        let rng = ctx.rng();
        Ok(Grid::from_fn(current.shape().clone(), |i| {
            let u_start: f64 = rng.random();
            let u_stop: f64 = rng.random();
            match current[i] {
                v if v == 0.0 && u_start < start => 1.0,
                v if v == 1.0 && u_stop < stop => 0.0,
                v => v,
            }
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::apply;
    use tessel_space::{Boundary, Neighborhood};
    use tessel_test_utils::grid2d;

    #[test]
    fn fraction_excludes_self() {
        assert_eq!(clapping_fraction(&grid2d(1, 5, &[1.0, 1.0, 0.0, 0.0, 0.0])), 0.5);
        assert_eq!(clapping_fraction(&grid2d(1, 1, &[1.0])), 1.0);
    }

    #[test]
    fn probabilities_are_clamped() {
        let c = ApplauseConfig {
            a: 3.0,
            alpha: 2.0,
            b: 4.0,
            beta: 0.0,
        };
        assert_eq!(c.probabilities(1.0), (1.0, 1.0));
        assert_eq!(ApplauseConfig::default().probabilities(0.0), (0.0, 0.3));
    }

    #[test]
    fn silent_room_stays_silent() {
        let state = grid2d(4, 4, &[0.0; 16]);
        let out = apply(&mut Applause::default(), &state, Neighborhood::Moore, Boundary::Toroidal, 5)
            .unwrap();
        assert_eq!(out.count_eq(1.0), 0);
    }

    #[test]
    fn certain_flips() {
        let mut rule = Applause::new(ApplauseConfig {
            a: 10.0,
            b: 10.0,
            alpha: 1.0,
            beta: 0.0,
        })
        .unwrap();
        let state = grid2d(1, 3, &[0.0, 1.0, 1.0]);
        let out = apply(&mut rule, &state, Neighborhood::Moore, Boundary::Toroidal, 9).unwrap();
        assert_eq!(out.as_slice(), &[1.0, 0.0, 0.0]);
    }

    #[test]
    fn rejects_negative_rates() {
        let mut rule = Applause::default();
        let mut params = ParameterSet::new();
        params.insert("b".into(), -0.3);
        assert!(rule.update_parameters(&params).is_err());
        assert_eq!(rule.config().b, 0.3);
    }
}
