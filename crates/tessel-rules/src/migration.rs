//! Deterministic migration of compartment counts along network edges.

use crate::validate;
use tessel_core::{override_param, Grid, ParameterSet, RuleError};
use tessel_rule::{Network, Rule, StepContext};

const NAME: &str = "migration";

/// Parameters for [`Migration`].
///
/// Parameter name: `rate`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MigrationConfig {
    /// Fraction of each compartment that leaves a node per step, in
    /// `[0, 1]`. Default `0.1`.
    pub rate: f64,
}

impl Default for MigrationConfig {
    fn default() -> Self {
        Self { rate: 0.1 }
    }
}

impl MigrationConfig {
    /// Check `rate` is a fraction.
    pub fn validate(&self) -> Result<(), RuleError> {
        validate::probability(NAME, "rate", self.rate)
    }

    /// Copy of `self` with recognized keys from `params` applied.
    pub fn apply(&self, params: &ParameterSet) -> Self {
        let mut next = *self;
        override_param(params, "rate", &mut next.rate);
        next
    }
}

/// Each node sends `floor(rate * count / degree)` of every compartment to
/// each of its neighbours.
///
/// Totals per compartment are conserved and isolated nodes keep their
/// population. Outflows are computed from the pre-step counts, so the
/// result does not depend on node order.
#[derive(Clone, Debug, Default)]
pub struct Migration {
    config: MigrationConfig,
}

impl Migration {
    /// Create a rule, validating `config`.
    pub fn new(config: MigrationConfig) -> Result<Self, RuleError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Current configuration.
    pub fn config(&self) -> &MigrationConfig {
        &self.config
    }
}

impl Rule<Network> for Migration {
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
        let adjacency = ctx.env();
        let &[compartments, nodes] = current.shape().dims() else {
            return Err(RuleError::IncompatibleState {
                rule: NAME.to_string(),
                reason: format!("needs a 2D count matrix, got shape {}", current.shape()),
            });
        };
        if adjacency.node_count() != nodes {
            return Err(RuleError::IncompatibleState {
                rule: NAME.to_string(),
                reason: format!(
                    "state has {nodes} nodes, adjacency has {}",
                    adjacency.node_count()
                ),
            });
        }

        let mut next = current.clone();
        let cells = next.as_mut_slice();
        for j in 0..nodes {
            let degree = adjacency.degree(j);
            if degree == 0 {
                continue;
            }
            for c in 0..compartments {
                let count = current[c * nodes + j];
                let per_neighbour = (self.config.rate * count as f64 / degree as f64).floor() as u64;
                if per_neighbour == 0 {
                    continue;
                }
                let outflow = per_neighbour * degree as u64;
                cells[c * nodes + j] = cells[c * nodes + j].checked_sub(outflow).ok_or_else(|| {
                    RuleError::ExecutionFailed {
                        reason: format!("node {j} cannot send {outflow} from compartment {c}"),
                    }
                })?;
                for k in adjacency.neighbours(j) {
                    cells[c * nodes + k] += per_neighbour;
                }
            }
        }
        Ok(next)
    }
}
