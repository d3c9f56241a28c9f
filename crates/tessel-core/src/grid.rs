//! Row-major n-dimensional arrays.
//!
//! [`Grid`] is the state container for every automaton: `Grid<f64>` for
//! lattice cells, `Grid<u64>` for compartment counts. Its [`Shape`] is
//! fixed at construction.

use crate::error::ShapeError;
use smallvec::SmallVec;
use std::fmt;
use std::ops::{Index, IndexMut};

/// A multi-dimensional cell index, one component per axis.
///
/// Lattices have at most three axes, so coordinates stay inline.
pub type Coord = SmallVec<[usize; 3]>;

/// The extent of a [`Grid`] along each axis.
///
/// Construction rejects shapes with no axes or with a zero-length axis,
/// so every valid shape has at least one cell.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Shape {
    dims: SmallVec<[usize; 3]>,
}

impl Shape {
    /// Create a shape from its axis lengths.
    ///
    /// Returns `Err(ShapeError::EmptyShape)` for zero axes and
    /// `Err(ShapeError::ZeroLengthAxis)` if any axis has length 0.
    pub fn new(dims: impl AsRef<[usize]>) -> Result<Self, ShapeError> {
        let dims = dims.as_ref();
        if dims.is_empty() {
            return Err(ShapeError::EmptyShape);
        }
        if let Some(axis) = dims.iter().position(|&d| d == 0) {
            return Err(ShapeError::ZeroLengthAxis { axis });
        }
        Ok(Self {
            dims: SmallVec::from_slice(dims),
        })
    }

    /// Number of axes.
    pub fn ndim(&self) -> usize {
        self.dims.len()
    }

    /// Axis lengths.
    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    /// Total number of cells.
    pub fn cell_count(&self) -> usize {
        self.dims.iter().product()
    }

    /// Row-major flat index of `coord`.
    pub fn flat_index(&self, coord: &[usize]) -> Result<usize, ShapeError> {
        if coord.len() != self.dims.len() {
            return Err(ShapeError::ArityMismatch {
                expected: self.dims.len(),
                got: coord.len(),
            });
        }
        let mut index = 0;
        for (&c, &d) in coord.iter().zip(self.dims.iter()) {
            if c >= d {
                return Err(ShapeError::IndexOutOfBounds {
                    coord: SmallVec::from_slice(coord),
                    shape: self.clone(),
                });
            }
            index = index * d + c;
        }
        Ok(index)
    }

    /// Inverse of [`flat_index`](Self::flat_index) for `index < cell_count()`.
    pub fn coord_of(&self, mut index: usize) -> Coord {
        let mut coord: Coord = SmallVec::from_elem(0, self.dims.len());
        for axis in (0..self.dims.len()).rev() {
            coord[axis] = index % self.dims[axis];
            index /= self.dims[axis];
        }
        coord
    }

    /// Row-major stride of each axis.
    pub fn strides(&self) -> SmallVec<[usize; 3]> {
        let mut strides: SmallVec<[usize; 3]> = SmallVec::from_elem(1, self.dims.len());
        for axis in (0..self.dims.len().saturating_sub(1)).rev() {
            strides[axis] = strides[axis + 1] * self.dims[axis + 1];
        }
        strides
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, d) in self.dims.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{d}")?;
        }
        write!(f, ")")
    }
}

/// A row-major n-dimensional array with a fixed [`Shape`].
#[derive(Clone, Debug, PartialEq)]
pub struct Grid<T> {
    shape: Shape,
    data: Vec<T>,
}

impl<T: Clone> Grid<T> {
    /// A grid with every cell set to `value`.
    pub fn filled(shape: Shape, value: T) -> Self {
        let data = vec![value; shape.cell_count()];
        Self { shape, data }
    }

    /// Wrap a flat row-major buffer.
    pub fn from_vec(shape: Shape, data: Vec<T>) -> Result<Self, ShapeError> {
        if data.len() != shape.cell_count() {
            return Err(ShapeError::LengthMismatch {
                expected: shape.cell_count(),
                got: data.len(),
            });
        }
        Ok(Self { shape, data })
    }

    /// Build a grid by calling `f` with each flat index in order.
    pub fn from_fn(shape: Shape, f: impl FnMut(usize) -> T) -> Self {
        let data = (0..shape.cell_count()).map(f).collect();
        Self { shape, data }
    }

    /// Element-wise map into a new grid of the same shape.
    pub fn map<U>(&self, f: impl FnMut(&T) -> U) -> Grid<U> {
        Grid {
            shape: self.shape.clone(),
            data: self.data.iter().map(f).collect(),
        }
    }

    /// The values of column `col` of a 2D grid, top to bottom.
    ///
    /// Returns `None` unless the grid is 2D and `col` is in range.
    pub fn column(&self, col: usize) -> Option<Vec<T>> {
        let [rows, cols] = self.shape.dims() else {
            return None;
        };
        if col >= *cols {
            return None;
        }
        Some((0..*rows).map(|r| self.data[r * cols + col].clone()).collect())
    }

    /// Overwrite column `col` of a 2D grid.
    pub fn set_column(&mut self, col: usize, values: &[T]) -> Result<(), ShapeError> {
        let &[rows, cols] = self.shape.dims() else {
            return Err(ShapeError::ArityMismatch {
                expected: 2,
                got: self.shape.ndim(),
            });
        };
        if col >= cols {
            return Err(ShapeError::IndexOutOfBounds {
                coord: SmallVec::from_slice(&[0, col]),
                shape: self.shape.clone(),
            });
        }
        if values.len() != rows {
            return Err(ShapeError::LengthMismatch {
                expected: rows,
                got: values.len(),
            });
        }
        for (r, v) in values.iter().enumerate() {
            self.data[r * cols + col] = v.clone();
        }
        Ok(())
    }
}

impl<T: Clone + Default> Grid<T> {
    /// A grid of default values (zeros for numeric cells).
    pub fn zeros(shape: Shape) -> Self {
        Self::filled(shape, T::default())
    }
}

impl<T> Grid<T> {
    /// The grid's shape.
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Always returns `false`: shapes have at least one cell.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Cells in row-major order.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Mutable cells in row-major order.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Consume the grid, returning the flat buffer.
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Iterate over cells in row-major order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }

    /// Cell at a multi-dimensional index, or `None` if out of bounds.
    pub fn get(&self, coord: &[usize]) -> Option<&T> {
        let i = self.shape.flat_index(coord).ok()?;
        self.data.get(i)
    }

    /// Overwrite the cell at a multi-dimensional index.
    pub fn set(&mut self, coord: &[usize], value: T) -> Result<(), ShapeError> {
        let i = self.shape.flat_index(coord)?;
        self.data[i] = value;
        Ok(())
    }
}

impl<T> Index<usize> for Grid<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.data[index]
    }
}

impl<T> IndexMut<usize> for Grid<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.data[index]
    }
}

impl Grid<f64> {
    /// Sum of all cells.
    pub fn sum(&self) -> f64 {
        self.data.iter().sum()
    }

    /// Number of cells exactly equal to `value`.
    pub fn count_eq(&self, value: f64) -> usize {
        self.data.iter().filter(|&&v| v == value).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn shape_rejects_empty_and_zero_axes() {
        assert_eq!(Shape::new(Vec::<usize>::new()), Err(ShapeError::EmptyShape));
        assert_eq!(
            Shape::new([3, 0, 2]),
            Err(ShapeError::ZeroLengthAxis { axis: 1 })
        );
    }

    #[test]
    fn flat_index_is_row_major() {
        let s = Shape::new([2, 3]).unwrap();
        assert_eq!(s.flat_index(&[0, 0]).unwrap(), 0);
        assert_eq!(s.flat_index(&[0, 2]).unwrap(), 2);
        assert_eq!(s.flat_index(&[1, 0]).unwrap(), 3);
        assert_eq!(s.flat_index(&[1, 2]).unwrap(), 5);
    }

    #[test]
    fn flat_index_rejects_bad_coords() {
        let s = Shape::new([2, 3]).unwrap();
        assert!(matches!(
            s.flat_index(&[2, 0]),
            Err(ShapeError::IndexOutOfBounds { .. })
        ));
        assert_eq!(
            s.flat_index(&[1]),
            Err(ShapeError::ArityMismatch {
                expected: 2,
                got: 1
            })
        );
    }

    #[test]
    fn strides_match_flat_index() {
        let s = Shape::new([4, 3, 2]).unwrap();
        assert_eq!(s.strides().as_slice(), &[6, 2, 1]);
    }

    #[test]
    fn from_vec_checks_length() {
        let s = Shape::new([2, 2]).unwrap();
        assert!(Grid::from_vec(s.clone(), vec![1.0; 4]).is_ok());
        assert_eq!(
            Grid::from_vec(s, vec![1.0; 3]),
            Err(ShapeError::LengthMismatch {
                expected: 4,
                got: 3
            })
        );
    }

    #[test]
    fn column_round_trip() {
        let s = Shape::new([4, 3]).unwrap();
        let mut g: Grid<u64> = Grid::zeros(s);
        g.set_column(1, &[9, 8, 7, 6]).unwrap();
        assert_eq!(g.column(1).unwrap(), vec![9, 8, 7, 6]);
        assert_eq!(g.column(0).unwrap(), vec![0, 0, 0, 0]);
        assert!(g.column(3).is_none());
        assert!(g.set_column(0, &[1, 2]).is_err());
    }

    #[test]
    fn column_requires_2d() {
        let g: Grid<u64> = Grid::zeros(Shape::new([5]).unwrap());
        assert!(g.column(0).is_none());
    }

    #[test]
    fn count_eq_and_sum() {
        let g = Grid::from_vec(Shape::new([4]).unwrap(), vec![0.0, 1.0, 1.0, 2.0]).unwrap();
        assert_eq!(g.count_eq(1.0), 2);
        assert_eq!(g.sum(), 4.0);
    }

    #[test]
    fn shape_display() {
        assert_eq!(Shape::new([10, 10]).unwrap().to_string(), "(10, 10)");
    }

    proptest! {
        #[test]
        fn coord_of_inverts_flat_index(
            dims in prop::collection::vec(1usize..6, 1..4),
            seed in 0usize..1000,
        ) {
            let s = Shape::new(&dims).unwrap();
            let i = seed % s.cell_count();
            let coord = s.coord_of(i);
            prop_assert_eq!(s.flat_index(&coord).unwrap(), i);
        }
    }
}
