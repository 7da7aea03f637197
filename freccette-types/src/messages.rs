use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::{GameError, InputMode, PlayerId, TargetSelection};

pub type ConfirmationToken = Uuid;

/// User intents sent by the presentation layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Intent {
    AddPlayer { name: String },
    DeletePlayer { player_id: PlayerId },
    SelectPlayer { player_id: PlayerId },
    AppendDigit { slot: Option<usize>, digit: u8 },
    DeleteLastDigit { slot: Option<usize> },
    SetActiveSlot { index: usize },
    ConfigureSession { target: TargetSelection, input_mode: InputMode },
    StartSession,
    CommitTurn,
    CancelTurn,
    ResetScores,
    ResetAll,
    Confirm { token: ConfirmationToken },
    CancelConfirmation { token: ConfirmationToken },
}

impl Intent {
    /// Whether handling this intent can change persisted state
    pub fn is_mutating(&self) -> bool {
        !matches!(
            self,
            Intent::AppendDigit { .. }
                | Intent::DeleteLastDigit { .. }
                | Intent::SetActiveSlot { .. }
                | Intent::DeletePlayer { .. }
                | Intent::ResetScores
                | Intent::ResetAll
                | Intent::CancelConfirmation { .. }
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum TurnResult {
    Scored, // Points added, target not reached
    Win,    // Target reached exactly
    Bust,   // Would have gone over target, recorded as 0
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TurnReport {
    pub player_id: PlayerId,
    pub player_name: String,
    pub points: u32,
    pub result: TurnResult,
    pub score: u32,
    pub next_player: Option<PlayerId>,
}

/// Destructive actions that need an explicit confirmation step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum PendingAction {
    DeletePlayer { player_id: PlayerId, name: String },
    ResetScores,
    ResetAll,
}

impl PendingAction {
    pub fn describe(&self) -> String {
        match self {
            PendingAction::DeletePlayer { name, .. } => format!("Delete player {}?", name),
            PendingAction::ResetScores => {
                "Reset every score to zero and keep the players?".to_string()
            }
            PendingAction::ResetAll => "Remove all players and start a new game?".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ConfirmationRequest {
    pub token: ConfirmationToken,
    pub action: PendingAction,
    pub description: String,
}

/// Result of handling one intent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Outcome {
    Updated,
    Scored(TurnReport),
    Win(TurnReport),
    Bust(TurnReport),
    ConfirmationRequired(ConfirmationRequest),
    Ignored { reason: GameError },
    Rejected { error: GameError },
}

impl Outcome {
    pub fn from_turn(report: TurnReport) -> Self {
        match report.result {
            TurnResult::Scored => Outcome::Scored(report),
            TurnResult::Win => Outcome::Win(report),
            TurnResult::Bust => Outcome::Bust(report),
        }
    }

    pub fn from_error(error: GameError) -> Self {
        if error.is_silent() {
            Outcome::Ignored { reason: error }
        } else {
            Outcome::Rejected { error }
        }
    }
}
