//! The [`NeighborProvider`] trait and its lattice implementation,
//! [`Topology`].

use crate::boundary::Boundary;
use crate::error::SpaceError;
use crate::neighborhood::{Direction, Neighborhood};
use crate::neighbors::NeighborSet;
use smallvec::SmallVec;
use tessel_core::{Grid, Shape, ShapeError};

/// Produces the neighbor context a lattice rule reads.
///
/// Implementations must be pure: the same state always yields the same
/// [`NeighborSet`], and computing it never mutates anything.
///
/// `Send + Sync` lets an automaton holding a `Box<dyn NeighborProvider>`
/// move between threads.
pub trait NeighborProvider: Send + Sync + 'static {
    /// Shape of the states this provider accepts.
    fn shape(&self) -> &Shape;

    /// Directions produced, in order.
    fn directions(&self) -> &[Direction];

    /// Compute every neighbor array for `state`.
    ///
    /// Returns `Err(ShapeError::ShapeMismatch)` if `state` does not have
    /// [`shape()`](Self::shape).
    fn neighbors(&self, state: &Grid<f64>) -> Result<NeighborSet, ShapeError>;
}

/// A lattice shape together with a neighborhood kind and boundary policy.
///
/// One value covers every neighborhood × boundary combination; the
/// neighbor arrays are computed by a single offset-resolution routine.
///
/// # Examples
///
/// ```
/// use tessel_core::{Grid, Shape};
/// use tessel_space::{Boundary, NeighborProvider, Neighborhood, Topology};
///
/// let shape = Shape::new([4]).unwrap();
/// let topo = Topology::new(shape.clone(), Neighborhood::Line, Boundary::Bounded).unwrap();
/// let state = Grid::from_vec(shape, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
///
/// let n = topo.neighbors(&state).unwrap();
/// assert_eq!(n.get("left").unwrap().as_slice(), &[0.0, 1.0, 2.0, 3.0]);
/// assert_eq!(n.get("right").unwrap().as_slice(), &[2.0, 3.0, 4.0, 0.0]);
/// ```
#[derive(Clone, Debug)]
pub struct Topology {
    shape: Shape,
    neighborhood: Neighborhood,
    boundary: Boundary,
    outside: f64,
    directions: Vec<Direction>,
}

impl Topology {
    /// Create a topology with an outside value of `0.0`.
    ///
    /// Returns `Err(SpaceError::DimensionMismatch)` if the shape's number
    /// of axes differs from [`Neighborhood::ndim`].
    pub fn new(
        shape: Shape,
        neighborhood: Neighborhood,
        boundary: Boundary,
    ) -> Result<Self, SpaceError> {
        if shape.ndim() != neighborhood.ndim() {
            return Err(SpaceError::DimensionMismatch {
                neighborhood,
                ndim: shape.ndim(),
            });
        }
        Ok(Self {
            shape,
            neighborhood,
            boundary,
            outside: 0.0,
            directions: neighborhood.directions(),
        })
    }

    /// Set the value read by neighbors beyond a bounded edge.
    ///
    /// Ignored by toroidal topologies.
    pub fn with_outside_value(mut self, value: f64) -> Result<Self, SpaceError> {
        if !value.is_finite() {
            return Err(SpaceError::InvalidOutsideValue { value });
        }
        self.outside = value;
        Ok(self)
    }

    /// Neighborhood kind.
    pub fn neighborhood(&self) -> Neighborhood {
        self.neighborhood
    }

    /// Boundary policy.
    pub fn boundary(&self) -> Boundary {
        self.boundary
    }

    /// Value read beyond a bounded edge.
    pub fn outside_value(&self) -> f64 {
        self.outside
    }

    /// Flat index of the neighbor of `cell` in `direction`, or `None` if it
    /// lies beyond a bounded edge.
    pub fn neighbor_index(&self, cell: &[usize], direction: &Direction) -> Option<usize> {
        let dims = self.shape.dims();
        let mut index = 0;
        for ((&c, &d), &off) in cell.iter().zip(dims).zip(direction.offset()) {
            let resolved = self.boundary.resolve_axis(c as isize + off, d)?;
            index = index * d + resolved;
        }
        Some(index)
    }
}

impl NeighborProvider for Topology {
    fn shape(&self) -> &Shape {
        &self.shape
    }

    fn directions(&self) -> &[Direction] {
        &self.directions
    }

    fn neighbors(&self, state: &Grid<f64>) -> Result<NeighborSet, ShapeError> {
        if state.shape() != &self.shape {
            return Err(ShapeError::ShapeMismatch {
                expected: self.shape.clone(),
                got: state.shape().clone(),
            });
        }
        let cells = state.as_slice();
        let dims = self.shape.dims();
        let mut set = NeighborSet::new(self.shape.clone());

        for direction in &self.directions {
            let mut out = Vec::with_capacity(cells.len());
            // Row-major odometer over cell coordinates.
            let mut coord: SmallVec<[usize; 3]> = SmallVec::from_elem(0, dims.len());
            for _ in 0..cells.len() {
                let value = match self.neighbor_index(&coord, direction) {
                    Some(j) => cells[j],
                    None => self.outside,
                };
                out.push(value);
                for axis in (0..dims.len()).rev() {
                    coord[axis] += 1;
                    if coord[axis] < dims[axis] {
                        break;
                    }
                    coord[axis] = 0;
                }
            }
            set.insert(direction.name(), Grid::from_vec(self.shape.clone(), out)?)?;
        }
        Ok(set)
    }
}
