//! Spatial structure for Tessel automata.
//!
//! A lattice automaton's neighborhood is a single [`Topology`] value: a
//! [`Shape`](tessel_core::Shape), a [`Neighborhood`] kind and a
//! [`Boundary`] policy. Through the [`NeighborProvider`] trait it turns a
//! state array into a [`NeighborSet`], one array per named direction.
//! Network automata use an [`Adjacency`] matrix instead.
//!
//! # Neighborhoods
//!
//! - [`Neighborhood::Line`]: 1D, `left` / `right`
//! - [`Neighborhood::VonNeumann`]: 2D, 4 orthogonal directions
//! - [`Neighborhood::Moore`]: 2D, 8 directions
//! - [`Neighborhood::Moore3D`]: 3D, 26 directions

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod adjacency;
pub mod boundary;
pub mod error;
pub mod neighborhood;
pub mod neighbors;
pub mod topology;

pub use adjacency::Adjacency;
pub use boundary::Boundary;
pub use error::SpaceError;
pub use neighborhood::{Direction, Neighborhood};
pub use neighbors::NeighborSet;
pub use topology::{NeighborProvider, Topology};
