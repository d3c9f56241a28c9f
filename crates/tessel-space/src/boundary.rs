//! Lattice boundary policy.

/// How a lattice treats neighbors beyond its edges.
///
/// # Examples
///
/// ```
/// use tessel_space::Boundary;
///
/// assert_eq!(Boundary::Toroidal.resolve_axis(-1, 5), Some(4));
/// assert_eq!(Boundary::Bounded.resolve_axis(-1, 5), None);
/// assert_eq!(Boundary::Bounded.resolve_axis(3, 5), Some(3));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Boundary {
    /// Edges wrap to the opposite side (torus).
    Toroidal,
    /// A neighbor beyond an edge reads the topology's outside value.
    Bounded,
}

impl Boundary {
    /// Resolve a possibly out-of-range position along one axis of length
    /// `len`. Returns `None` when the position falls outside a bounded
    /// lattice.
    pub fn resolve_axis(self, pos: isize, len: usize) -> Option<usize> {
        let n = len as isize;
        if (0..n).contains(&pos) {
            return Some(pos as usize);
        }
        match self {
            Self::Bounded => None,
            Self::Toroidal => Some(pos.rem_euclid(n) as usize),
        }
    }
}
