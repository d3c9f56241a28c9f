//! Rule trait, step context and rule pipeline for Tessel automata.
//!
//! A [`Rule`] maps the current state to the next one, reading whatever
//! else it needs from a [`StepContext`]. Rules are parameterized by a
//! [`Domain`]: [`Lattice`] rules see a
//! [`NeighborSet`](tessel_space::NeighborSet), [`Network`] rules see an
//! [`Adjacency`](tessel_space::Adjacency). A [`RuleManager`] folds the
//! state through an ordered list of rules once per step.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod context;
pub mod domain;
pub mod manager;
pub mod rule;

pub use context::StepContext;
pub use domain::{Domain, Lattice, Network};
pub use manager::RuleManager;
pub use rule::Rule;
