use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::{ConfirmationRequest, InputMode, PlayerId, SessionPhase};

/// Read-only view of the in-progress score entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum EntryView {
    Total { display: String },
    Granular { slots: Vec<String>, active_slot: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PlayerView {
    pub id: PlayerId,
    pub name: String,
    pub score: u32,
    pub history: Vec<u32>,
    pub turns_played: usize,
    pub is_winner: bool,
    pub is_active: bool,
}

/// Everything the presentation layer needs to draw one frame
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SessionView {
    pub phase: SessionPhase,
    pub target_score: u32,
    pub input_mode: InputMode,
    pub players: Vec<PlayerView>,
    pub active_player_id: Option<PlayerId>,
    pub entry: Option<EntryView>,
    pub can_add_player: bool,
    pub pending_confirmation: Option<ConfirmationRequest>,
    pub storage_warning: Option<String>,
}
