//! Forest-fire model with spontaneous growth and lightning.

use crate::validate;
use rand::Rng;
use tessel_core::{override_param, Grid, ParameterSet, RuleError};
use tessel_rule::{Lattice, Rule, StepContext};

const EMPTY: f64 = 0.0;
const TREE: f64 = 1.0;
const BURNING: f64 = 2.0;

/// Probabilities for [`ForestFire`].
///
/// Parameter names: `grow`, `ignite`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ForestFireConfig {
    /// Chance an empty cell grows a tree each step. Default `0.01`.
    pub grow: f64,
    /// Chance a tree ignites spontaneously each step. Default `0.01`.
    pub ignite: f64,
}

impl Default for ForestFireConfig {
    fn default() -> Self {
        Self {
            grow: 0.01,
            ignite: 0.01,
        }
    }
}

impl ForestFireConfig {
    /// Check both values are probabilities.
    pub fn validate(&self) -> Result<(), RuleError> {
        validate::probability("forest_fire", "grow", self.grow)?;
        validate::probability("forest_fire", "ignite", self.ignite)
    }

    /// Copy of `self` with recognized keys from `params` applied.
    pub fn apply(&self, params: &ParameterSet) -> Self {
        let mut next = *self;
        override_param(params, "grow", &mut next.grow);
        override_param(params, "ignite", &mut next.ignite);
        next
    }
}

/// Three-state rule: `0` empty, `1` tree, `2` burning.
///
/// Empty cells grow a tree with probability `grow`. Trees catch fire if
/// any neighbor is burning, or spontaneously with probability `ignite`.
/// Burning cells become empty. Other values are left unchanged.
///
/// Two uniform draws are taken for every cell in row-major order, so the
/// random stream does not depend on the state.
#[derive(Clone, Debug, Default)]
pub struct ForestFire {
    config: ForestFireConfig,
}

impl ForestFire {
    /// Create a rule, validating `config`.
    pub fn new(config: ForestFireConfig) -> Result<Self, RuleError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Current configuration.
    pub fn config(&self) -> &ForestFireConfig {
        &self.config
    }
}

impl Rule<Lattice> for ForestFire {
    fn name(&self) -> &str {
        "forest_fire"
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
        let near_fire = ctx.env().any_equal(BURNING);
        let ForestFireConfig { grow, ignite } = self.config;
        let rng = ctx.rng();
        Ok(Grid::from_fn(current.shape().clone(), |i| {
            let u_grow: f64 = rng.random();
            let u_ignite: f64 = rng.random();
            match current[i] {
                v if v == EMPTY => {
                    if u_grow < grow {
                        TREE
                    } else {
                        EMPTY
                    }
                }
                v if v == TREE => {
                    if near_fire[i] || u_ignite < ignite {
                        BURNING
                    } else {
                        TREE
                    }
                }
                v if v == BURNING => EMPTY,
                v => v,
            }
        }))
    }
}
