//! Test fixtures and helpers for Tessel development.
//!
//! Provides stand-in rules for exercising pipelines and automata without
//! depending on a real rule library, plus shorthand constructors for
//! small state arrays.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::{ConstRule, CountingRule, FailingRule, IdentityRule};

use tessel_core::{Grid, Shape};

/// A 1D lattice state.
pub fn line(values: &[f64]) -> Grid<f64> {
    grid(&[values.len()], values)
}

/// A 2D lattice state from row-major values.
pub fn grid2d(rows: usize, cols: usize, values: &[f64]) -> Grid<f64> {
    grid(&[rows, cols], values)
}

/// A state of any shape from row-major values.
///
/// # Panics
///
/// If the shape is invalid or `values` has the wrong length.
pub fn grid(dims: &[usize], values: &[f64]) -> Grid<f64> {
    let shape = Shape::new(dims).expect("valid test shape");
    Grid::from_vec(shape, values.to_vec()).expect("values match test shape")
}

/// A `compartments × nodes` matrix; `rows[c][j]` is the count of
/// compartment `c` at node `j`.
///
/// # Panics
///
/// If `rows` is empty or ragged.
pub fn compartments(rows: &[&[u64]]) -> Grid<u64> {
    let cols = rows.first().map_or(0, |r| r.len());
    let shape = Shape::new([rows.len(), cols]).expect("valid compartment shape");
    let data: Vec<u64> = rows.iter().flat_map(|r| r.iter().copied()).collect();
    Grid::from_vec(shape, data).expect("rows are not ragged")
}
