//! Wolfram elementary cellular automata.
//!
//! A rule number in `0..=255` is read as eight pattern bits. Bit `i`
//! set means the neighborhood pattern `(left, current, right)` equal to
//! the binary digits of `i` (left most significant) produces a live
//! cell. Exactly one pattern matches each binary cell.

use crate::validate;
use tessel_core::{Grid, ParameterSet, RuleError};
use tessel_rule::{Lattice, Rule, StepContext};

/// Elementary 1D binary rule.
///
/// Cells hold `0.0` or `1.0`. A cell whose neighborhood contains any
/// other value matches no pattern and becomes `0.0`.
///
/// Recognizes the parameter `rule_number`.
///
/// # Examples
///
/// ```
/// use tessel_rules::Wolfram;
///
/// assert!(Wolfram::new(30).is_ok());
/// assert!(Wolfram::new(256).is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Wolfram {
    number: u8,
}

impl Wolfram {
    /// Create a rule.
    ///
    /// Returns `Err(RuleError::InvalidRuleNumber)` if `number > 255`.
    pub fn new(number: u32) -> Result<Self, RuleError> {
        let number =
            u8::try_from(number).map_err(|_| RuleError::InvalidRuleNumber { value: number })?;
        Ok(Self { number })
    }

    /// The rule number.
    pub fn number(&self) -> u8 {
        self.number
    }

    /// Output for one neighborhood; `0.0` if any input is not binary.
    fn output(&self, left: f64, current: f64, right: f64) -> f64 {
        match (bit(left), bit(current), bit(right)) {
            (Some(l), Some(c), Some(r)) => {
                let pattern = (l << 2) | (c << 1) | r;
                f64::from((self.number >> pattern) & 1)
            }
            _ => 0.0,
        }
    }
}

fn bit(v: f64) -> Option<u8> {
    if v == 0.0 {
        Some(0)
    } else if v == 1.0 {
        Some(1)
    } else {
        None
    }
}

impl Rule<Lattice> for Wolfram {
    fn name(&self) -> &str {
        "wolfram"
    }

    fn update_parameters(&mut self, params: &ParameterSet) -> Result<(), RuleError> {
        let Some(&v) = params.get("rule_number") else {
            return Ok(());
        };
        validate::non_negative(self.name(), "rule_number", v)?;
        if v.fract() != 0.0 {
            return Err(RuleError::invalid_parameter(
                self.name(),
                "rule_number",
                format!("must be an integer, got {v}"),
            ));
        }
        *self = Self::new(v.min(f64::from(u32::MAX)) as u32)?;
        Ok(())
    }

    fn apply(
        &mut self,
        current: &Grid<f64>,
        ctx: &mut StepContext<'_, Lattice>,
    ) -> Result<Grid<f64>, RuleError> {
        let neighbors = ctx.env();
        let (Some(left), Some(right)) = (neighbors.get("left"), neighbors.get("right")) else {
            return Err(RuleError::IncompatibleState {
                rule: self.name().to_string(),
                reason: "needs 'left' and 'right' neighbors".to_string(),
            });
        };
        if current.shape().ndim() != 1 {
            return Err(RuleError::IncompatibleState {
                rule: self.name().to_string(),
                reason: format!("needs a 1D lattice, got shape {}", current.shape()),
            });
        }
        let out = Grid::from_fn(current.shape().clone(), |i| {
            self.output(left[i], current[i], right[i])
        });
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::apply;
    use proptest::prelude::*;
    use tessel_space::{Boundary, Neighborhood};
    use tessel_test_utils::{grid2d, line};

    fn step(number: u32, values: &[f64], boundary: Boundary) -> Grid<f64> {
        let mut rule = Wolfram::new(number).unwrap();
        apply(&mut rule, &line(values), Neighborhood::Line, boundary, 0).unwrap()
    }

    #[test]
    fn rejects_numbers_above_255() {
        assert_eq!(
            Wolfram::new(300),
            Err(RuleError::InvalidRuleNumber { value: 300 })
        );
        assert_eq!(Wolfram::new(255).unwrap().number(), 255);
    }

    #[test]
    fn rule_0_kills_everything() {
        let out = step(0, &[1.0, 1.0, 0.0, 1.0], Boundary::Toroidal);
        assert_eq!(out.as_slice(), &[0.0; 4]);
    }

    #[test]
    fn rule_90_is_xor_of_neighbors() {
        let out = step(90, &[0.0, 0.0, 1.0, 0.0, 0.0], Boundary::Bounded);
        assert_eq!(out.as_slice(), &[0.0, 1.0, 0.0, 1.0, 0.0]);
    }

    #[test]
    fn rule_30_single_seed() {
        // 001 -> 1, 010 -> 1, 100 -> 1 under rule 30.
        let out = step(30, &[0.0, 0.0, 1.0, 0.0, 0.0], Boundary::Toroidal);
        assert_eq!(out.as_slice(), &[0.0, 1.0, 1.0, 1.0, 0.0]);
    }

    #[test]
    fn non_binary_cells_match_no_pattern() {
        let out = step(255, &[1.0, 2.0, 1.0], Boundary::Toroidal);
        assert_eq!(out.as_slice(), &[0.0, 0.0, 0.0]);
    }

    #[test]
    fn rejects_2d_lattice() {
        let mut rule = Wolfram::new(30).unwrap();
        let state = grid2d(2, 2, &[0.0, 1.0, 1.0, 0.0]);
        let err = apply(&mut rule, &state, Neighborhood::Moore, Boundary::Toroidal, 0).unwrap_err();
        assert!(matches!(err, RuleError::IncompatibleState { .. }));
    }

    #[test]
    fn rule_number_parameter() {
        let mut rule = Wolfram::new(30).unwrap();
        let mut params = ParameterSet::new();
        params.insert("rule_number".into(), 110.0);
        rule.update_parameters(&params).unwrap();
        assert_eq!(rule.number(), 110);

        params.insert("rule_number".into(), 256.0);
        assert_eq!(
            rule.update_parameters(&params),
            Err(RuleError::InvalidRuleNumber { value: 256 })
        );
        params.insert("rule_number".into(), 1.5);
        assert!(rule.update_parameters(&params).is_err());
        assert_eq!(rule.number(), 110);
    }

    proptest! {
        #[test]
        fn rule_204_is_identity(bits in prop::collection::vec(0u8..2, 1..32)) {
            let values: Vec<f64> = bits.iter().map(|&b| f64::from(b)).collect();
            let out = step(204, &values, Boundary::Toroidal);
            prop_assert_eq!(out.as_slice(), values.as_slice());
        }
    }
}
