//! Conway's Game of Life (B3/S23).

use tessel_core::{Grid, RuleError};
use tessel_rule::{Lattice, Rule, StepContext};

/// Live (`1.0`) cells with two or three live neighbors survive; dead
/// (`0.0`) cells with exactly three live neighbors are born. Every other
/// cell becomes dead.
///
/// Works with any neighborhood; the classic rule uses
/// [`Moore`](tessel_space::Neighborhood::Moore).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GameOfLife;

impl Rule<Lattice> for GameOfLife {
    fn name(&self) -> &str {
        "game_of_life"
    }

    fn apply(
        &mut self,
        current: &Grid<f64>,
        ctx: &mut StepContext<'_, Lattice>,
    ) -> Result<Grid<f64>, RuleError> {
        let live = ctx.env().counts_equal(1.0);
        Ok(Grid::from_fn(current.shape().clone(), |i| {
            let alive = match (current[i], live[i]) {
                (v, 2 | 3) if v == 1.0 => true,
                (v, 3) if v == 0.0 => true,
                _ => false,
            };
            if alive {
                1.0
            } else {
                0.0
            }
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::apply;
    use tessel_space::{Boundary, Neighborhood};
    use tessel_test_utils::grid2d;

    fn step(state: &Grid<f64>, boundary: Boundary) -> Grid<f64> {
        apply(&mut GameOfLife, state, Neighborhood::Moore, boundary, 0).unwrap()
    }

    #[test]
    fn isolated_cell_dies() {
        let mut values = [0.0; 9];
        values[4] = 1.0;
        let out = step(&grid2d(3, 3, &values), Boundary::Bounded);
        assert_eq!(out.count_eq(1.0), 0);
    }

    #[test]
    fn block_is_a_still_life_on_a_torus() {
        #[rustfmt::skip]
        let block = grid2d(4, 4, &[
            0.0, 0.0, 0.0, 0.0,
            0.0, 1.0, 1.0, 0.0,
            0.0, 1.0, 1.0, 0.0,
            0.0, 0.0, 0.0, 0.0,
        ]);
        let once = step(&block, Boundary::Toroidal);
        assert_eq!(once, block);
        assert_eq!(step(&once, Boundary::Toroidal), block);
    }

    #[test]
    fn blinker_oscillates() {
        #[rustfmt::skip]
        let horizontal = grid2d(5, 5, &[
            0.0, 0.0, 0.0, 0.0, 0.0,
            0.0, 0.0, 0.0, 0.0, 0.0,
            0.0, 1.0, 1.0, 1.0, 0.0,
            0.0, 0.0, 0.0, 0.0, 0.0,
            0.0, 0.0, 0.0, 0.0, 0.0,
        ]);
        #[rustfmt::skip]
        let vertical = grid2d(5, 5, &[
            0.0, 0.0, 0.0, 0.0, 0.0,
            0.0, 0.0, 1.0, 0.0, 0.0,
            0.0, 0.0, 1.0, 0.0, 0.0,
            0.0, 0.0, 1.0, 0.0, 0.0,
            0.0, 0.0, 0.0, 0.0, 0.0,
        ]);
        assert_eq!(step(&horizontal, Boundary::Bounded), vertical);
        assert_eq!(step(&vertical, Boundary::Bounded), horizontal);
    }
}
