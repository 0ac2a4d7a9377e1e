/// Cell position on the board, row-major in `[0, BOARD_CELLS)`.
pub type CellIndex = u8;

/// Count type used for mine counts and revealed-cell counts.
pub type CellCount = u8;

/// Single coordinate axis, used for board columns and rows.
pub type Coord = u8;

/// Two-dimensional coordinates `(column, row)`.
pub type Coord2 = (Coord, Coord);

/// Virtual credits, used for balances, stakes and payouts.
pub type Credits = f64;

/// Width and height of the square board.
pub const BOARD_SIDE: Coord = 5;

/// Total number of cells on the board.
pub const BOARD_CELLS: CellCount = BOARD_SIDE * BOARD_SIDE;

/// Fewest mines a round can be played with.
pub const MIN_MINES: CellCount = 1;

/// Most mines a round can be played with, at least one cell stays safe.
pub const MAX_MINES: CellCount = BOARD_CELLS - 1;

pub trait ToCellIndex {
    fn to_cell_index(self) -> Option<CellIndex>;
}

impl ToCellIndex for Coord2 {
    fn to_cell_index(self) -> Option<CellIndex> {
        let (x, y) = self;
        if x < BOARD_SIDE && y < BOARD_SIDE {
            Some(y * BOARD_SIDE + x)
        } else {
            None
        }
    }
}

pub const fn is_on_board(index: CellIndex) -> bool {
    index < BOARD_CELLS
}

/// Iterator over every cell index in row-major order.
pub fn iter_cells() -> impl Iterator<Item = CellIndex> {
    0..BOARD_CELLS
}
