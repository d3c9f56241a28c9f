//! Brian's Brain.

use tessel_core::{Grid, RuleError};
use tessel_rule::{Lattice, Rule, StepContext};

const DEAD: f64 = 0.0;
const DYING: f64 = 1.0;
const FIRING: f64 = 2.0;

/// Three-state rule: `0` dead, `1` dying, `2` firing.
///
/// A dead cell fires when exactly two neighbors are firing; a firing
/// cell starts dying; a dying cell dies. Any other value becomes dead.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BriansBrain;

impl Rule<Lattice> for BriansBrain {
    fn name(&self) -> &str {
        "brians_brain"
    }

    fn apply(
        &mut self,
        current: &Grid<f64>,
        ctx: &mut StepContext<'_, Lattice>,
    ) -> Result<Grid<f64>, RuleError> {
        let firing = ctx.env().counts_equal(FIRING);
        Ok(Grid::from_fn(current.shape().clone(), |i| {
            let v = current[i];
            if v == DEAD && firing[i] == 2 {
                FIRING
            } else if v == FIRING {
                DYING
            } else {
                DEAD
            }
        }))
    }
}
