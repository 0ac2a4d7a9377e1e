use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundState {
    InProgress,
    Lost,
    CashedOut,
}

impl RoundState {
    pub const fn is_active(self) -> bool {
        matches!(self, Self::InProgress)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Lost | Self::CashedOut)
    }
}

/// A single round: the locked stake, the hidden layout and the cells picked so far.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Round {
    mines: MineSet,
    revealed: BTreeSet<CellIndex>,
    stake: Credits,
    safe_reveals: CellCount,
    state: RoundState,
    detonated: Option<CellIndex>,
}

impl Round {
    pub fn new(mines: MineSet, stake: Credits) -> Self {
        Self {
            mines,
            revealed: BTreeSet::new(),
            stake,
            safe_reveals: 0,
            state: RoundState::InProgress,
            detonated: None,
        }
    }

    pub fn state(&self) -> RoundState {
        self.state
    }

    pub fn stake(&self) -> Credits {
        self.stake
    }

    pub fn safe_reveals(&self) -> CellCount {
        self.safe_reveals
    }

    pub fn mines(&self) -> &MineSet {
        &self.mines
    }

    pub fn mine_count(&self) -> CellCount {
        self.mines.mine_count()
    }

    pub fn detonated(&self) -> Option<CellIndex> {
        self.detonated
    }

    pub fn is_revealed(&self, index: CellIndex) -> bool {
        self.revealed.contains(&index)
    }

    pub fn multiplier(&self) -> f64 {
        multiplier(self.safe_reveals)
    }

    /// What a cash-out would bank right now.
    pub fn potential_payout(&self) -> Credits {
        payout_amount(self.stake, self.safe_reveals)
    }

    pub fn cell_view(&self, index: CellIndex) -> CellView {
        if !self.state.is_finished() {
            return if self.is_revealed(index) {
                CellView::Picked
            } else {
                CellView::Hidden
            };
        }

        if self.detonated == Some(index) {
            CellView::Detonated
        } else if self.mines.contains(index) {
            CellView::Mine
        } else if self.is_revealed(index) {
            CellView::Picked
        } else {
            CellView::Safe
        }
    }

    /// Reveals exactly `index`, no cascade to neighbours.
    ///
    /// Each safe cell adds to the safe-reveal count only the first time it is
    /// picked; clicking it again reports `NoChange`.
    pub fn reveal(&mut self, index: CellIndex) -> Result<RevealOutcome> {
        let index = validate_index(index)?;
        self.check_active()?;

        if self.mines[index] {
            self.detonated = Some(index);
            self.state = RoundState::Lost;
            log::debug!("mine hit at {}, stake {} forfeited", index, self.stake);
            return Ok(RevealOutcome::HitMine);
        }

        if self.revealed.insert(index) {
            self.safe_reveals += 1;
            log::debug!("safe cell {}, {} safe so far", index, self.safe_reveals);
            Ok(RevealOutcome::Safe)
        } else {
            log::trace!("cell {} already picked", index);
            Ok(RevealOutcome::NoChange)
        }
    }

    pub fn cash_out(&mut self) -> Result<Payout> {
        self.check_active()?;

        let payout = Payout::new(self.stake, self.safe_reveals);
        self.state = RoundState::CashedOut;
        log::debug!(
            "cashed out {} at x{:.2} after {} safe cells",
            payout.amount,
            payout.multiplier,
            payout.safe_reveals
        );
        Ok(payout)
    }

    fn check_active(&self) -> Result<()> {
        if self.state.is_active() {
            Ok(())
        } else {
            Err(GameError::RoundNotActive)
        }
    }
}

fn validate_index(index: CellIndex) -> Result<CellIndex> {
    if is_on_board(index) {
        Ok(index)
    } else {
        Err(GameError::InvalidCell(index))
    }
}
