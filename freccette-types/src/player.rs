use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

pub type PlayerId = Uuid;

/// Most players a single session can hold.
pub const MAX_PLAYERS: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Player {
    pub id: PlayerId,
    pub name: String, // Untrusted, escape before rendering
    pub score: u32,
    pub history: Vec<u32>, // One entry per completed turn, 0 for a bust
}

impl Player {
    /// Create a player with a fresh time-ordered id and no turns played
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            name: name.into(),
            score: 0,
            history: Vec::new(),
        }
    }

    pub fn is_winner(&self, target_score: u32) -> bool {
        self.score >= target_score
    }

    pub fn turns_played(&self) -> usize {
        self.history.len()
    }

    /// Sum of the recorded turns. Equal to `score` for every consistent player.
    pub fn history_total(&self) -> u64 {
        self.history.iter().map(|&points| u64::from(points)).sum()
    }

    pub fn is_consistent(&self) -> bool {
        self.history_total() == u64::from(self.score)
    }
}
