//! Error types for topology and adjacency construction.

use crate::neighborhood::Neighborhood;
use tessel_core::ShapeError;
use std::fmt;

/// Errors arising from topology or adjacency construction.
#[derive(Debug, Clone, PartialEq)]
pub enum SpaceError {
    /// The shape is malformed.
    Shape(ShapeError),
    /// The neighborhood kind needs a different number of axes.
    DimensionMismatch {
        /// The requested neighborhood.
        neighborhood: Neighborhood,
        /// Axes in the supplied shape.
        ndim: usize,
    },
    /// The bounded-lattice outside value is NaN or infinite.
    InvalidOutsideValue {
        /// The rejected value.
        value: f64,
    },
    /// An adjacency description has no nodes.
    EmptyNetwork,
    /// An adjacency matrix row has the wrong length.
    NonSquareAdjacency {
        /// Number of rows (= nodes).
        nodes: usize,
        /// Index of the offending row.
        row: usize,
        /// Its length.
        len: usize,
    },
    /// An adjacency weight is negative or not finite, or an edge names a
    /// node that does not exist.
    InvalidEdge {
        /// Source node.
        from: usize,
        /// Target node.
        to: usize,
        /// Why the edge was rejected.
        reason: String,
    },
}

impl fmt::Display for SpaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Shape(e) => write!(f, "{e}"),
            Self::DimensionMismatch { neighborhood, ndim } => write!(
                f,
                "{neighborhood:?} neighborhood needs a {}D shape, got {ndim}D",
                neighborhood.ndim()
            ),
            Self::InvalidOutsideValue { value } => {
                write!(f, "outside value must be finite, got {value}")
            }
            Self::EmptyNetwork => write!(f, "network must have at least one node"),
            Self::NonSquareAdjacency { nodes, row, len } => write!(
                f,
                "adjacency matrix is not square: row {row} has {len} entries, expected {nodes}"
            ),
            Self::InvalidEdge { from, to, reason } => {
                write!(f, "invalid edge {from} -> {to}: {reason}")
            }
        }
    }
}

impl std::error::Error for SpaceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Shape(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ShapeError> for SpaceError {
    fn from(e: ShapeError) -> Self {
        Self::Shape(e)
    }
}
