use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::{GameError, MAX_PLAYERS, Player, PlayerId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum InputMode {
    #[default]
    Total,    // One combined value per turn
    Granular, // Three dart values summed together
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum SessionPhase {
    Setup,
    Playing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum TargetPreset {
    Points101,
    Points301,
    Points501,
    Points701,
}

impl TargetPreset {
    pub const ALL: [TargetPreset; 4] = [
        TargetPreset::Points101,
        TargetPreset::Points301,
        TargetPreset::Points501,
        TargetPreset::Points701,
    ];

    pub fn points(self) -> u32 {
        match self {
            TargetPreset::Points101 => 101,
            TargetPreset::Points301 => 301,
            TargetPreset::Points501 => 501,
            TargetPreset::Points701 => 701,
        }
    }

    pub fn from_points(points: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|preset| preset.points() == points)
    }
}

/// Target score as chosen on the setup screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum TargetSelection {
    Preset(TargetPreset),
    Custom(i64),
}

impl TargetSelection {
    /// Parse the free-text custom target field
    pub fn parse_custom(input: &str) -> Result<Self, GameError> {
        let trimmed = input.trim();
        trimmed
            .parse::<i64>()
            .map(TargetSelection::Custom)
            .map_err(|_| GameError::InvalidTargetScore {
                input: trimmed.to_string(),
            })
    }

    /// Resolve to a positive target score
    pub fn resolve(&self) -> Result<u32, GameError> {
        match self {
            TargetSelection::Preset(preset) => Ok(preset.points()),
            TargetSelection::Custom(value) => u32::try_from(*value)
                .ok()
                .filter(|&points| points > 0)
                .ok_or_else(|| GameError::InvalidTargetScore {
                    input: value.to_string(),
                }),
        }
    }
}

/// Persisted form of a game session. Field names follow the stored blob layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SessionSnapshot {
    pub players: Vec<Player>,
    pub active_player_id: Option<PlayerId>,
    pub target_score: u32,
    pub input_mode: InputMode,
    pub game_active: bool,
}

impl SessionSnapshot {
    pub fn phase(&self) -> SessionPhase {
        if self.game_active {
            SessionPhase::Playing
        } else {
            SessionPhase::Setup
        }
    }

    /// Check the invariants a restored session must satisfy.
    /// Returns a description of the first violation found.
    pub fn validate(&self) -> Result<(), String> {
        if self.players.len() > MAX_PLAYERS {
            return Err(format!(
                "{} players stored, at most {} allowed",
                self.players.len(),
                MAX_PLAYERS
            ));
        }

        if self.target_score == 0 {
            return Err("target score must be positive".to_string());
        }

        for (index, player) in self.players.iter().enumerate() {
            if player.name.trim().is_empty() {
                return Err(format!("player {} has an empty name", player.id));
            }
            if !player.is_consistent() {
                return Err(format!(
                    "player {} has score {} but history sums to {}",
                    player.id,
                    player.score,
                    player.history_total()
                ));
            }
            if self.players[..index].iter().any(|p| p.id == player.id) {
                return Err(format!("duplicate player id {}", player.id));
            }
        }

        if let Some(active_id) = self.active_player_id {
            if !self.players.iter().any(|p| p.id == active_id) {
                return Err(format!("active player {} is not registered", active_id));
            }
        }

        Ok(())
    }
}
