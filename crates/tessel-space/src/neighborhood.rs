//! Neighborhood kinds and their named direction offsets.
//!
//! Axis convention: axis 0 is rows (`top` = row − 1), axis 1 is columns
//! (`left` = column − 1), axis 2 is depth. A 1D lattice has a single axis
//! on which `left` = index − 1.

use smallvec::{smallvec, SmallVec};
use std::borrow::Cow;

/// In-plane Moore offsets `(name, d_row, d_col)` in reading order.
const MOORE_2D: [(&str, isize, isize); 8] = [
    ("top-left", -1, -1),
    ("top", -1, 0),
    ("top-right", -1, 1),
    ("left", 0, -1),
    ("right", 0, 1),
    ("bottom-left", 1, -1),
    ("bottom", 1, 0),
    ("bottom-right", 1, 1),
];

/// Von Neumann offsets `(name, d_row, d_col)`.
const VON_NEUMANN: [(&str, isize, isize); 4] = [
    ("top", -1, 0),
    ("left", 0, -1),
    ("right", 0, 1),
    ("bottom", 1, 0),
];

/// Which cells count as neighbors of a lattice cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Neighborhood {
    /// 1D: `left` and `right`.
    Line,
    /// 2D: `top`, `left`, `right`, `bottom`.
    VonNeumann,
    /// 2D: the Von Neumann directions plus the four diagonals.
    Moore,
    /// 3D: in-plane Moore, the same eight shifted one step along depth
    /// (`<dir>-1`, `<dir>+1`), and `direct-left` / `direct-right` along
    /// depth. 26 directions in total.
    Moore3D,
}

impl Neighborhood {
    /// Number of lattice axes this neighborhood is defined on.
    pub fn ndim(self) -> usize {
        match self {
            Self::Line => 1,
            Self::VonNeumann | Self::Moore => 2,
            Self::Moore3D => 3,
        }
    }

    /// The named offsets of this neighborhood, in a fixed order.
    pub fn directions(self) -> Vec<Direction> {
        match self {
            Self::Line => vec![
                Direction::new("left", smallvec![-1]),
                Direction::new("right", smallvec![1]),
            ],
            Self::VonNeumann => VON_NEUMANN
                .iter()
                .map(|&(name, dr, dc)| Direction::new(name, smallvec![dr, dc]))
                .collect(),
            Self::Moore => MOORE_2D
                .iter()
                .map(|&(name, dr, dc)| Direction::new(name, smallvec![dr, dc]))
                .collect(),
            Self::Moore3D => {
                let mut dirs = Vec::with_capacity(26);
                for &(name, dr, dc) in &MOORE_2D {
                    dirs.push(Direction::new(name, smallvec![dr, dc, 0]));
                }
                for dz in [-1isize, 1] {
                    for &(name, dr, dc) in &MOORE_2D {
                        dirs.push(Direction::new(
                            format!("{name}{dz:+}"),
                            smallvec![dr, dc, dz],
                        ));
                    }
                }
                dirs.push(Direction::new("direct-left", smallvec![0, 0, -1]));
                dirs.push(Direction::new("direct-right", smallvec![0, 0, 1]));
                dirs
            }
        }
    }
}

/// A named neighbor offset, one component per lattice axis.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Direction {
    name: Cow<'static, str>,
    offset: SmallVec<[isize; 3]>,
}

impl Direction {
    /// Create a direction from a name and an offset.
    pub fn new(name: impl Into<Cow<'static, str>>, offset: SmallVec<[isize; 3]>) -> Self {
        Self {
            name: name.into(),
            offset,
        }
    }

    /// Direction name, e.g. `"top-left"`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Offset along each axis.
    pub fn offset(&self) -> &[isize] {
        &self.offset
    }
}
