use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::PlayerId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, thiserror::Error)]
#[ts(export)]
pub enum GameError {
    #[error("Player name cannot be empty")]
    EmptyPlayerName,
    #[error("At most {max} players can join a game")]
    RegistryFull { max: usize },
    #[error("Invalid target score: {input:?}")]
    InvalidTargetScore { input: String },
    #[error("Invalid digit: {digit}")]
    InvalidDigit { digit: u8 },
    #[error("Invalid dart slot: {index}")]
    InvalidSlot { index: usize },
    #[error("The game has already started")]
    SessionAlreadyStarted,
    #[error("No turn is open")]
    NoActiveTurn,
    #[error("Nothing is waiting for confirmation")]
    ConfirmationNotFound,
    #[error("It is {active}'s turn")]
    NotYourTurn { active: PlayerId },
    #[error("Player not found: {player_id}")]
    PlayerNotFound { player_id: PlayerId },
}

impl GameError {
    /// Turn-order and lookup misses are no-ops at the engine level
    /// rather than validation failures to report.
    pub fn is_silent(&self) -> bool {
        matches!(
            self,
            GameError::NotYourTurn { .. } | GameError::PlayerNotFound { .. }
        )
    }
}
