//! Conversion of raw form text into controller arguments.

use crate::*;

pub fn parse_mine_count(text: &str) -> Result<CellCount> {
    text.trim()
        .parse::<CellCount>()
        .ok()
        .filter(|count| (MIN_MINES..=MAX_MINES).contains(count))
        .ok_or(GameError::InvalidMineCount)
}

pub fn parse_bet(text: &str) -> Result<Credits> {
    text.trim()
        .parse::<Credits>()
        .ok()
        .filter(|bet| bet.is_finite() && *bet > 0.0)
        .ok_or(GameError::InvalidBet)
}
