use thiserror::Error;

use crate::{CellCount, CellIndex, Credits};

#[derive(Error, Debug, Copy, Clone, PartialEq)]
pub enum GameError {
    #[error("Number of mines must be between 1 and 24")]
    InvalidMineCount,
    #[error("Please enter a valid bet amount")]
    InvalidBet,
    #[error("Insufficient credits: bet {bet} exceeds balance {balance}")]
    InsufficientBalance { bet: Credits, balance: Credits },
    #[error("Invalid cell index {0}")]
    InvalidCell(CellIndex),
    #[error("Invalid mine layout for {0} requested mines")]
    InvalidLayout(CellCount),
    #[error("No round in progress, move ignored")]
    RoundNotActive,
}

impl GameError {
    /// Short text suitable for showing to the player after a rejected action.
    pub const fn user_message(&self) -> &'static str {
        use GameError::*;
        match self {
            InvalidMineCount => "Number of mines must be between 1 and 24.",
            InvalidBet => "Please enter a valid bet amount.",
            InsufficientBalance { .. } => "Insufficient credits.",
            InvalidCell(_) => "That cell is not on the board.",
            InvalidLayout(_) => "Invalid mine layout.",
            RoundNotActive => "Start a new round first.",
        }
    }
}

pub type Result<T> = core::result::Result<T, GameError>;
