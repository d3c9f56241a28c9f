//! Criterion micro-benchmarks for neighbor computation.

use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use tessel_core::{Grid, Shape};
use tessel_space::{Boundary, NeighborProvider, Neighborhood, Topology};

fn ramp(dims: &[usize]) -> Grid<f64> {
    let shape = Shape::new(dims).unwrap();
    Grid::from_fn(shape, |i| (i % 3) as f64)
}

/// Benchmark: all 8 Moore neighbor arrays of a 100x100 torus.
fn bench_neighbors_moore_10k(c: &mut Criterion) {
    let state = ramp(&[100, 100]);
    let topology =
        Topology::new(state.shape().clone(), Neighborhood::Moore, Boundary::Toroidal).unwrap();

    c.bench_function("neighbors_moore_10k", |b| {
        b.iter(|| black_box(topology.neighbors(&state).unwrap()));
    });
}

/// Benchmark: all 4 Von Neumann neighbor arrays of a bounded 100x100 lattice.
fn bench_neighbors_von_neumann_bounded_10k(c: &mut Criterion) {
    let state = ramp(&[100, 100]);
    let topology =
        Topology::new(state.shape().clone(), Neighborhood::VonNeumann, Boundary::Bounded)
            .unwrap();

    c.bench_function("neighbors_von_neumann_bounded_10k", |b| {
        b.iter(|| black_box(topology.neighbors(&state).unwrap()));
    });
}

/// Benchmark: all 26 neighbor arrays of a 22x22x22 torus (~10K cells).
fn bench_neighbors_moore3d_10k(c: &mut Criterion) {
    let state = ramp(&[22, 22, 22]);
    let topology =
        Topology::new(state.shape().clone(), Neighborhood::Moore3D, Boundary::Toroidal).unwrap();

    c.bench_function("neighbors_moore3d_10k", |b| {
        b.iter(|| black_box(topology.neighbors(&state).unwrap()));
    });
}

criterion_group!(
    benches,
    bench_neighbors_moore_10k,
    bench_neighbors_von_neumann_bounded_10k,
    bench_neighbors_moore3d_10k
);
criterion_main!(benches);
