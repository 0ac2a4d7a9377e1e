use serde::{Deserialize, Serialize};

/// Player-visible state of a single cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellView {
    #[default]
    Hidden,
    /// Safe cell the player clicked.
    Picked,
    /// Safe cell shown by the end-of-round reveal.
    Safe,
    /// Mine shown by the end-of-round reveal.
    Mine,
    /// The mine the player clicked.
    Detonated,
}

impl CellView {
    pub const fn is_hidden(self) -> bool {
        matches!(self, Self::Hidden)
    }

    pub const fn is_mine(self) -> bool {
        matches!(self, Self::Mine | Self::Detonated)
    }
}
