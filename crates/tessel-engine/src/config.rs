//! Automaton configuration, validation, and error types.
//!
//! [`LatticeConfig`] and [`NetworkConfig`] are the inputs to
//! [`LatticeAutomaton::new`](crate::LatticeAutomaton::new) and
//! [`NetworkAutomaton::new`](crate::NetworkAutomaton::new).
//! [`validate()`](LatticeConfig::validate) checks every structural
//! invariant up front so a constructed automaton is always usable.

use std::error::Error;
use std::fmt;

use tessel_core::{Shape, ShapeError};
use tessel_space::{Adjacency, Boundary, Neighborhood, SpaceError, Topology};

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected while validating an automaton configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// The lattice shape is malformed.
    Shape(ShapeError),
    /// Topology construction failed.
    Space(SpaceError),
    /// The neighborhood needs a different number of axes than the shape has.
    DimensionMismatch {
        /// Axes the neighborhood is defined on.
        expected: usize,
        /// Axes in the configured shape.
        got: usize,
    },
    /// A network automaton was configured with no compartments.
    ZeroCompartments,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Shape(e) => write!(f, "shape: {e}"),
            Self::Space(e) => write!(f, "space: {e}"),
            Self::DimensionMismatch { expected, got } => {
                write!(f, "neighborhood needs a {expected}D shape, got {got}D")
            }
            Self::ZeroCompartments => write!(f, "network needs at least one compartment"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Shape(e) => Some(e),
            Self::Space(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ShapeError> for ConfigError {
    fn from(e: ShapeError) -> Self {
        Self::Shape(e)
    }
}

impl From<SpaceError> for ConfigError {
    fn from(e: SpaceError) -> Self {
        match e {
            SpaceError::DimensionMismatch { neighborhood, ndim } => Self::DimensionMismatch {
                expected: neighborhood.ndim(),
                got: ndim,
            },
            SpaceError::Shape(e) => Self::Shape(e),
            other => Self::Space(other),
        }
    }
}

// ── InitError ──────────────────────────────────────────────────────

/// Errors from `initialize_*` calls. The automaton's state is unchanged.
#[derive(Debug, Clone, PartialEq)]
pub enum InitError {
    /// An index or buffer does not fit the automaton's shape.
    Shape(ShapeError),
    /// A caller-supplied array has the wrong shape.
    DimensionMismatch {
        /// The automaton's shape.
        expected: Shape,
        /// The supplied array's shape.
        got: Shape,
    },
    /// A live-cell ratio outside `[0, 1]`.
    InvalidRatio {
        /// The rejected ratio.
        value: f64,
    },
    /// `initialize_random_int` was given `min >= max`.
    EmptyRange {
        /// Inclusive lower bound.
        min: i64,
        /// Exclusive upper bound.
        max: i64,
    },
}

impl fmt::Display for InitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Shape(e) => write!(f, "{e}"),
            Self::DimensionMismatch { expected, got } => {
                write!(f, "initial state has shape {got}, automaton has {expected}")
            }
            Self::InvalidRatio { value } => write!(f, "ratio must be in [0, 1], got {value}"),
            Self::EmptyRange { min, max } => write!(f, "integer range [{min}, {max}) is empty"),
        }
    }
}

impl Error for InitError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Shape(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ShapeError> for InitError {
    fn from(e: ShapeError) -> Self {
        Self::Shape(e)
    }
}

// ── LatticeConfig ──────────────────────────────────────────────────

/// Everything needed to build a [`LatticeAutomaton`](crate::LatticeAutomaton).
#[derive(Clone, Debug, PartialEq)]
pub struct LatticeConfig {
    /// Extent along each axis.
    pub dims: Vec<usize>,
    /// Which cells count as neighbors.
    pub neighborhood: Neighborhood,
    /// Edge policy.
    pub boundary: Boundary,
    /// Value read beyond a bounded edge. Default: 0.
    pub outside_value: f64,
    /// RNG seed for initialization and probabilistic rules. Default: 0.
    pub seed: u64,
}

impl LatticeConfig {
    /// A configuration with outside value 0 and seed 0.
    pub fn new(dims: impl Into<Vec<usize>>, neighborhood: Neighborhood, boundary: Boundary) -> Self {
        Self {
            dims: dims.into(),
            neighborhood,
            boundary,
            outside_value: 0.0,
            seed: 0,
        }
    }

    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the value read beyond a bounded edge.
    pub fn with_outside_value(mut self, value: f64) -> Self {
        self.outside_value = value;
        self
    }

    /// Check every structural invariant.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.topology().map(|_| ())
    }

    /// The validated topology this configuration describes.
    pub fn topology(&self) -> Result<Topology, ConfigError> {
        let shape = Shape::new(&self.dims)?;
        let topology = Topology::new(shape, self.neighborhood, self.boundary)?
            .with_outside_value(self.outside_value)?;
        Ok(topology)
    }
}

// ── NetworkConfig ──────────────────────────────────────────────────

/// Everything needed to build a [`NetworkAutomaton`](crate::NetworkAutomaton).
#[derive(Clone, Debug, PartialEq)]
pub struct NetworkConfig {
    /// Node coupling. Its node count fixes the state's column count.
    pub adjacency: Adjacency,
    /// Compartments per node (rows of the state matrix).
    pub compartments: usize,
    /// RNG seed for stochastic rules. Default: 0.
    pub seed: u64,
}

impl NetworkConfig {
    /// A configuration with seed 0.
    pub fn new(adjacency: Adjacency, compartments: usize) -> Self {
        Self {
            adjacency,
            compartments,
            seed: 0,
        }
    }

    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Check every structural invariant.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.compartments == 0 {
            return Err(ConfigError::ZeroCompartments);
        }
        Ok(())
    }

    /// Shape of the `compartments × nodes` state matrix.
    pub fn state_shape(&self) -> Result<Shape, ConfigError> {
        self.validate()?;
        Ok(Shape::new([self.compartments, self.adjacency.node_count()])?)
    }
}
