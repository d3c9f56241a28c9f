//! Logistic growth with diffusion and harvest over a marine area with an
//! optional protected zone.
//!
//! Each step, per cell:
//!
//! ```text
//! alpha = D * dt
//! x'    = x * (1 - k * alpha) + alpha * sum(neighbors)   // diffusion, k = #directions
//! g     = x' / (x' + (1 - x') * exp(-dt))                 // logistic growth
//! h     = gammafield * dt * x'^beta                       // harvest
//! next  = max(g - h, 0)
//! ```
//!
//! `gammafield` is `gamma` everywhere except a protected hypercube at the
//! origin, where it is zero.

use crate::validate;
use tessel_core::{override_param, Grid, ParameterSet, RuleError, Shape};
use tessel_rule::{Lattice, Rule, StepContext};

const NAME: &str = "logistic_harvest";

/// Parameters for [`LogisticHarvest`].
///
/// Parameter names: `dt`, `beta`, `D`, `gamma`, `percent_mpa`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HarvestConfig {
    /// Time step. Must be positive. Default `0.01`.
    pub dt: f64,
    /// Harvest exponent; above 1 is catastrophic, below 1 sustainable.
    /// Must be positive. Default `1`.
    pub beta: f64,
    /// Diffusion rate `D`. Default `25`.
    pub diffusion: f64,
    /// Harvest-to-growth ratio outside the protected zone. Default `1`.
    pub gamma: f64,
    /// Fraction of the lattice that is protected, in `[0, 1]`. Default `0`.
    pub percent_protected: f64,
}

impl Default for HarvestConfig {
    fn default() -> Self {
        Self {
            dt: 0.01,
            beta: 1.0,
            diffusion: 25.0,
            gamma: 1.0,
            percent_protected: 0.0,
        }
    }
}

impl HarvestConfig {
    /// Check every field is in range.
    ///
    /// Diffusion stability depends on the neighborhood and is checked
    /// when the rule is applied.
    pub fn validate(&self) -> Result<(), RuleError> {
        validate::positive(NAME, "dt", self.dt)?;
        validate::positive(NAME, "beta", self.beta)?;
        validate::non_negative(NAME, "D", self.diffusion)?;
        validate::non_negative(NAME, "gamma", self.gamma)?;
        validate::probability(NAME, "percent_mpa", self.percent_protected)
    }

    /// Copy of `self` with recognized keys from `params` applied.
    pub fn apply(&self, params: &ParameterSet) -> Self {
        let mut next = *self;
        override_param(params, "dt", &mut next.dt);
        override_param(params, "beta", &mut next.beta);
        override_param(params, "D", &mut next.diffusion);
        override_param(params, "gamma", &mut next.gamma);
        override_param(params, "percent_mpa", &mut next.percent_protected);
        next
    }

    /// `D * dt`.
    pub fn alpha(&self) -> f64 {
        self.diffusion * self.dt
    }

    /// Side length of the protected hypercube for `shape`:
    /// `floor((cells * percent)^(1 / ndim))`, capped by each axis.
    pub fn protected_side(&self, shape: &Shape) -> usize {
        if self.percent_protected == 0.0 {
            return 0;
        }
        let cells = shape.cell_count() as f64;
        let side = (cells * self.percent_protected)
            .powf(1.0 / shape.ndim() as f64)
            .floor() as usize;
        shape.dims().iter().fold(side, |s, &d| s.min(d))
    }
}

/// Diffusion, logistic growth and harvest of a continuous density.
#[derive(Clone, Debug, Default)]
pub struct LogisticHarvest {
    config: HarvestConfig,
}

impl LogisticHarvest {
    /// Create a rule, validating `config`.
    pub fn new(config: HarvestConfig) -> Result<Self, RuleError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Current configuration.
    pub fn config(&self) -> &HarvestConfig {
        &self.config
    }

    /// Harvest coefficient for every cell of `shape`.
    pub fn gamma_field(&self, shape: &Shape) -> Grid<f64> {
        let side = self.config.protected_side(shape);
        let gamma = self.config.gamma;
        Grid::from_fn(shape.clone(), |i| {
            if side > 0 && shape.coord_of(i).iter().all(|&c| c < side) {
                0.0
            } else {
                gamma
            }
        })
    }
}

impl Rule<Lattice> for LogisticHarvest {
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
        let neighbors = ctx.env();
        let k = neighbors.len() as f64;
        let HarvestConfig { dt, beta, .. } = self.config;
        let alpha = self.config.alpha();
        if k * alpha > 1.0 {
            return Err(RuleError::invalid_parameter(
                NAME,
                "D",
                format!(
                    "diffusion is unstable: {k} directions * D * dt = {} > 1",
                    k * alpha
                ),
            ));
        }

        let sums = neighbors.sums();
        let gamma = self.gamma_field(current.shape());
        let decay = (-dt).exp();
        Ok(Grid::from_fn(current.shape().clone(), |i| {
            let x = current[i] * (1.0 - k * alpha) + alpha * sums[i];
            let grown = x / (x + (1.0 - x) * decay);
            let harvest = gamma[i] * dt * x.powf(beta);
            (grown - harvest).max(0.0)
        }))
    }
}
