//! Named neighbor arrays aligned with a state array.

use indexmap::IndexMap;
use tessel_core::{Grid, Shape, ShapeError};

/// For each named direction, the value of that neighbor at every cell.
///
/// Every array shares the state's shape: `set.get("left")[i]` is the
/// left neighbor of cell `i`. Iteration follows the topology's direction
/// order.
#[derive(Clone, Debug, PartialEq)]
pub struct NeighborSet {
    shape: Shape,
    arrays: IndexMap<String, Grid<f64>>,
}

impl NeighborSet {
    /// An empty set for states of the given shape.
    pub fn new(shape: Shape) -> Self {
        Self {
            shape,
            arrays: IndexMap::new(),
        }
    }

    /// Add (or replace) the array for a direction.
    ///
    /// Returns `Err(ShapeError::ShapeMismatch)` if the array's shape
    /// differs from the set's.
    pub fn insert(&mut self, name: impl Into<String>, array: Grid<f64>) -> Result<(), ShapeError> {
        if array.shape() != &self.shape {
            return Err(ShapeError::ShapeMismatch {
                expected: self.shape.clone(),
                got: array.shape().clone(),
            });
        }
        self.arrays.insert(name.into(), array);
        Ok(())
    }

    /// Shape shared by every array.
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Neighbor array for a direction.
    pub fn get(&self, name: &str) -> Option<&Grid<f64>> {
        self.arrays.get(name)
    }

    /// Number of directions.
    pub fn len(&self) -> usize {
        self.arrays.len()
    }

    /// Whether the set has no directions.
    pub fn is_empty(&self) -> bool {
        self.arrays.is_empty()
    }

    /// Direction names in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.arrays.keys().map(String::as_str)
    }

    /// `(name, array)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Grid<f64>)> {
        self.arrays.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Per-cell sum of all neighbor values.
    pub fn sums(&self) -> Vec<f64> {
        let mut out = vec![0.0; self.shape.cell_count()];
        for array in self.arrays.values() {
            for (acc, v) in out.iter_mut().zip(array.iter()) {
                *acc += v;
            }
        }
        out
    }

    /// Per-cell number of neighbors whose value equals `value`.
    pub fn counts_equal(&self, value: f64) -> Vec<u32> {
        let mut out = vec![0u32; self.shape.cell_count()];
        for array in self.arrays.values() {
            for (acc, &v) in out.iter_mut().zip(array.iter()) {
                if v == value {
                    *acc += 1;
                }
            }
        }
        out
    }

    /// Per-cell flag: does any neighbor equal `value`?
    pub fn any_equal(&self, value: f64) -> Vec<bool> {
        self.counts_equal(value).into_iter().map(|c| c > 0).collect()
    }
}
