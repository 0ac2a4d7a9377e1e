use core::ops::Index;
use serde::{Deserialize, Serialize};

pub use cell::*;
pub use controller::*;
pub use error::*;
pub use generator::*;
pub use input::*;
pub use payout::*;
pub use round::*;
pub use snapshot::*;
pub use types::*;

mod cell;
mod controller;
mod error;
mod generator;
mod input;
mod payout;
mod round;
mod snapshot;
mod types;

/// Credits a fresh controller starts with.
pub const DEFAULT_STARTING_BALANCE: Credits = 100_000.0;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub starting_balance: Credits,
}

impl GameConfig {
    pub fn new(starting_balance: Credits) -> Self {
        let starting_balance = if starting_balance.is_finite() {
            starting_balance.max(0.0)
        } else {
            0.0
        };
        Self { starting_balance }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            starting_balance: DEFAULT_STARTING_BALANCE,
        }
    }
}

/// The hidden mine positions of one round.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MineSet {
    mine_mask: [bool; BOARD_CELLS as usize],
    mine_count: CellCount,
}

impl MineSet {
    pub(crate) fn from_mine_mask(mine_mask: [bool; BOARD_CELLS as usize]) -> Self {
        let mine_count = mine_mask.iter().filter(|&&is_mine| is_mine).count() as CellCount;
        Self {
            mine_mask,
            mine_count,
        }
    }

    /// Builds a layout from explicit mine positions.
    ///
    /// Rejects indices off the board, duplicates, and counts outside
    /// `MIN_MINES..=MAX_MINES`.
    pub fn from_indices(indices: &[CellIndex]) -> Result<Self> {
        let requested = CellCount::try_from(indices.len()).unwrap_or(CellCount::MAX);
        if !(MIN_MINES..=MAX_MINES).contains(&requested) {
            return Err(GameError::InvalidLayout(requested));
        }

        let mut mine_mask = [false; BOARD_CELLS as usize];
        for &index in indices {
            if !is_on_board(index) || mine_mask[usize::from(index)] {
                return Err(GameError::InvalidLayout(requested));
            }
            mine_mask[usize::from(index)] = true;
        }

        Ok(Self::from_mine_mask(mine_mask))
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn safe_cell_count(&self) -> CellCount {
        BOARD_CELLS - self.mine_count
    }

    pub fn contains(&self, index: CellIndex) -> bool {
        is_on_board(index) && self.mine_mask[usize::from(index)]
    }

    /// Mine positions in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = CellIndex> + '_ {
        iter_cells().filter(|&index| self.mine_mask[usize::from(index)])
    }
}

impl Index<CellIndex> for MineSet {
    type Output = bool;

    fn index(&self, index: CellIndex) -> &Self::Output {
        &self.mine_mask[usize::from(index)]
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum RevealOutcome {
    NoChange,
    Safe,
    HitMine,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            Safe => true,
            HitMine => true,
        }
    }
}
