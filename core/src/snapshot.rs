use serde::{Deserialize, Serialize};

use crate::*;

/// Everything the rendering layer needs to draw one frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub status: RoundStatus,
    pub balance: Credits,
    pub cells: Vec<CellView>,
    pub stake: Option<Credits>,
    pub mine_count: Option<CellCount>,
    pub safe_reveals: CellCount,
    pub multiplier: f64,
    pub potential_payout: Option<Credits>,
    pub can_cash_out: bool,
    pub message: Option<String>,
}

impl Snapshot {
    pub fn from_controller<G: LayoutGenerator>(controller: &GameController<G>) -> Self {
        let round = controller.round();

        Self {
            status: controller.status(),
            balance: controller.balance(),
            cells: iter_cells().map(|index| controller.cell_view(index)).collect(),
            stake: round.map(Round::stake),
            mine_count: round.map(Round::mine_count),
            safe_reveals: round.map_or(0, Round::safe_reveals),
            multiplier: controller.current_multiplier().unwrap_or(1.0),
            potential_payout: controller.potential_payout(),
            can_cash_out: controller.can_cash_out(),
            message: controller.message().map(|message| message.to_string()),
        }
    }

    pub fn cell(&self, index: CellIndex) -> CellView {
        self.cells
            .get(usize::from(index))
            .copied()
            .unwrap_or_default()
    }

    /// Cells laid out as board rows.
    pub fn rows(&self) -> impl Iterator<Item = &[CellView]> {
        self.cells.chunks(usize::from(BOARD_SIDE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller(mines: &[CellIndex]) -> GameController<FixedLayoutGenerator> {
        GameController::with_generator(FixedLayoutGenerator::from_indices(mines).unwrap())
    }

    #[test]
    fn idle_snapshot_is_all_hidden() {
        let snapshot = controller(&[0]).snapshot();

        assert_eq!(snapshot.status, RoundStatus::Idle);
        assert_eq!(snapshot.cells.len(), usize::from(BOARD_CELLS));
        assert!(snapshot.cells.iter().all(|cell| cell.is_hidden()));
        assert_eq!(snapshot.stake, None);
        assert_eq!(snapshot.multiplier, 1.0);
        assert!(!snapshot.can_cash_out);
    }

    #[test]
    fn lost_snapshot_maps_cells_and_message() {
        let mut game = controller(&[0, 6]);
        game.start_round(2, 40.0).unwrap();
        game.reveal_cell(1).unwrap();
        game.reveal_cell(6).unwrap();

        let snapshot = game.snapshot();

        assert_eq!(snapshot.status, RoundStatus::Lost);
        assert_eq!(snapshot.cell(0), CellView::Mine);
        assert_eq!(snapshot.cell(1), CellView::Picked);
        assert_eq!(snapshot.cell(6), CellView::Detonated);
        assert_eq!(snapshot.cell(2), CellView::Safe);
        assert_eq!(snapshot.safe_reveals, 1);
        assert_eq!(snapshot.potential_payout, None);
        assert_eq!(snapshot.message.as_deref(), Some("You lost! You bet $40.00."));

        let rows: Vec<_> = snapshot.rows().collect();
        assert_eq!(rows.len(), usize::from(BOARD_SIDE));
        assert_eq!(rows[1][1], CellView::Detonated);
    }

    #[test]
    fn snapshot_serializes_for_the_frontend() {
        let mut game = controller(&[24]);
        game.start_round(1, 10.0).unwrap();
        game.reveal_cell(0).unwrap();

        let json = serde_json::to_value(game.snapshot()).unwrap();

        assert_eq!(json["status"], "InProgress");
        assert_eq!(json["cells"][0], "Picked");
        assert_eq!(json["cells"][24], "Hidden");
        assert_eq!(json["mine_count"], 1);
        assert_eq!(json["can_cash_out"], true);
        assert!(json["message"].is_null());
    }
}
