use rand::prelude::*;
use rand::rngs::SmallRng;

use super::*;

/// Purely random placement: every layout with the requested mine count is
/// equally likely.
#[derive(Clone, Debug)]
pub struct RandomLayoutGenerator {
    rng: SmallRng,
}

impl RandomLayoutGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl LayoutGenerator for RandomLayoutGenerator {
    fn generate(&mut self, mine_count: CellCount) -> Result<MineSet> {
        if !(MIN_MINES..=MAX_MINES).contains(&mine_count) {
            log::warn!(
                "Cannot place {} mines, at least {} and at most {} fit",
                mine_count,
                MIN_MINES,
                MAX_MINES
            );
            return Err(GameError::InvalidLayout(mine_count));
        }

        let mut mine_mask = [false; BOARD_CELLS as usize];
        let mut free_cells = BOARD_CELLS;
        let mut mines_placed = 0;

        // each draw picks a rank among the cells still free
        while mines_placed < mine_count {
            let mut place: CellCount = self.rng.random_range(0..free_cells);
            for (i, cell) in mine_mask.iter_mut().enumerate() {
                if *cell {
                    continue;
                }
                if place == 0 {
                    *cell = true;
                    mines_placed += 1;
                    free_cells -= 1;
                    log::trace!("mine placed at {}", i);
                    break;
                }
                place -= 1;
            }
        }

        Ok(MineSet::from_mine_mask(mine_mask))
    }
}
