use serde::{Deserialize, Serialize};

use crate::{CellCount, Credits};

/// Growth factor applied once per safe reveal.
pub const MULTIPLIER_BASE: f64 = 1.2;

/// Payout factor after `safe_reveals` safe clicks, independent of mine count.
pub fn multiplier(safe_reveals: CellCount) -> f64 {
    MULTIPLIER_BASE.powi(i32::from(safe_reveals))
}

/// Unrounded amount a cash-out banks for `stake` after `safe_reveals`.
pub fn payout_amount(stake: Credits, safe_reveals: CellCount) -> Credits {
    stake * multiplier(safe_reveals)
}

/// Result of a successful cash-out.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Payout {
    pub stake: Credits,
    pub safe_reveals: CellCount,
    pub multiplier: f64,
    pub amount: Credits,
}

impl Payout {
    pub fn new(stake: Credits, safe_reveals: CellCount) -> Self {
        let multiplier = multiplier(safe_reveals);
        Self {
            stake,
            safe_reveals,
            multiplier,
            amount: stake * multiplier,
        }
    }
}
