//! Error types for the Tessel automata engine.
//!
//! Organized by subsystem: array shape and initialization data
//! ([`ShapeError`]), individual rule configuration and execution
//! ([`RuleError`]), and whole-step evolution ([`StepError`]).

use crate::grid::{Coord, Shape};
use std::error::Error;
use std::fmt;

/// Initialization data or an array is incompatible with a declared shape.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ShapeError {
    /// A shape was declared with no axes.
    EmptyShape,
    /// An axis of the shape has length zero.
    ZeroLengthAxis {
        /// Index of the offending axis.
        axis: usize,
    },
    /// A coordinate lies outside the shape.
    IndexOutOfBounds {
        /// The offending coordinate.
        coord: Coord,
        /// The shape it was checked against.
        shape: Shape,
    },
    /// A coordinate has the wrong number of components.
    ArityMismatch {
        /// Number of axes in the shape.
        expected: usize,
        /// Number of components supplied.
        got: usize,
    },
    /// A flat buffer length disagrees with the shape's cell count.
    LengthMismatch {
        /// Cell count implied by the shape.
        expected: usize,
        /// Length of the supplied buffer.
        got: usize,
    },
    /// Two arrays that must share a shape do not.
    ShapeMismatch {
        /// The required shape.
        expected: Shape,
        /// The shape that was supplied.
        got: Shape,
    },
}

impl fmt::Display for ShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyShape => write!(f, "shape must have at least one axis"),
            Self::ZeroLengthAxis { axis } => write!(f, "axis {axis} has length zero"),
            Self::IndexOutOfBounds { coord, shape } => {
                write!(f, "index {:?} out of bounds for shape {shape}", coord.as_slice())
            }
            Self::ArityMismatch { expected, got } => {
                write!(f, "expected a {expected}D index, got {got}D")
            }
            Self::LengthMismatch { expected, got } => {
                write!(f, "buffer has {got} elements, shape requires {expected}")
            }
            Self::ShapeMismatch { expected, got } => {
                write!(f, "shape mismatch: expected {expected}, got {got}")
            }
        }
    }
}

impl Error for ShapeError {}

/// Errors from rule construction, reconfiguration, or execution.
#[derive(Clone, Debug, PartialEq)]
pub enum RuleError {
    /// A Wolfram rule number outside `[0, 255]`.
    InvalidRuleNumber {
        /// The rejected number.
        value: u32,
    },
    /// A rule parameter failed validation.
    InvalidParameter {
        /// Name of the rule that owns the parameter.
        rule: String,
        /// Parameter name.
        name: String,
        /// What is wrong with the value.
        reason: String,
    },
    /// The state handed to the rule does not have the layout it needs.
    IncompatibleState {
        /// Name of the rule.
        rule: String,
        /// Description of the mismatch.
        reason: String,
    },
    /// A simulated-time increment was negative or not finite.
    InvalidTimeStep {
        /// The rejected increment.
        value: f64,
    },
    /// The rule's transition function failed.
    ExecutionFailed {
        /// Human-readable description of the failure.
        reason: String,
    },
}

impl fmt::Display for RuleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRuleNumber { value } => {
                write!(f, "rule number {value} is outside [0, 255]")
            }
            Self::InvalidParameter { rule, name, reason } => {
                write!(f, "rule '{rule}': invalid parameter '{name}': {reason}")
            }
            Self::IncompatibleState { rule, reason } => {
                write!(f, "rule '{rule}': incompatible state: {reason}")
            }
            Self::InvalidTimeStep { value } => {
                write!(f, "time step must be finite and non-negative, got {value}")
            }
            Self::ExecutionFailed { reason } => write!(f, "execution failed: {reason}"),
        }
    }
}

impl Error for RuleError {}

impl RuleError {
    /// Shorthand for [`RuleError::InvalidParameter`].
    pub fn invalid_parameter(
        rule: impl Into<String>,
        name: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidParameter {
            rule: rule.into(),
            name: name.into(),
            reason: reason.into(),
        }
    }
}

/// Errors from a single `evolve()` call.
///
/// A failed step never publishes a partial state: the automaton keeps
/// the state it had before the call.
#[derive(Clone, Debug, PartialEq)]
pub enum StepError {
    /// `evolve()` was called with no rule configured.
    EmptyPipeline,
    /// `evolve()` was called before any `initialize_*` call.
    Uninitialized,
    /// A rule in the pipeline returned an error.
    RuleFailed {
        /// Name of the failing rule.
        name: String,
        /// The underlying rule error.
        reason: RuleError,
    },
    /// Neighbor computation rejected the current state.
    Shape(ShapeError),
    /// The automaton's state layout does not support the requested run.
    IncompatibleState {
        /// Description of the mismatch.
        reason: String,
    },
}

impl fmt::Display for StepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyPipeline => write!(f, "rule pipeline is empty"),
            Self::Uninitialized => write!(f, "automaton has not been initialized"),
            Self::RuleFailed { name, reason } => write!(f, "rule '{name}' failed: {reason}"),
            Self::Shape(e) => write!(f, "neighbor computation failed: {e}"),
            Self::IncompatibleState { reason } => write!(f, "incompatible state: {reason}"),
        }
    }
}

impl Error for StepError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::RuleFailed { reason, .. } => Some(reason),
            Self::Shape(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ShapeError> for StepError {
    fn from(e: ShapeError) -> Self {
        Self::Shape(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smallvec::smallvec;

    #[test]
    fn rule_failed_exposes_source() {
        let err = StepError::RuleFailed {
            name: "wolfram".into(),
            reason: RuleError::ExecutionFailed {
                reason: "boom".into(),
            },
        };
        assert!(err.source().is_some());
        assert_eq!(
            err.to_string(),
            "rule 'wolfram' failed: execution failed: boom"
        );
    }

    #[test]
    fn index_out_of_bounds_display() {
        let shape = Shape::new([3, 4]).unwrap();
        let err = ShapeError::IndexOutOfBounds {
            coord: smallvec![5, 0],
            shape,
        };
        assert_eq!(err.to_string(), "index [5, 0] out of bounds for shape (3, 4)");
    }

    #[test]
    fn empty_pipeline_has_no_source() {
        assert!(StepError::EmptyPipeline.source().is_none());
    }
}
