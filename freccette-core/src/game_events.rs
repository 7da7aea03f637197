use chrono::{DateTime, Utc};
use freccette_types::{InputMode, PlayerId, TurnReport};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    PlayerRegistered {
        player_id: PlayerId,
        name: String,
    },
    PlayerRemoved {
        player_id: PlayerId,
        name: String,
        next_active: Option<PlayerId>,
    },
    TurnOpened {
        player_id: PlayerId,
        input_mode: InputMode,
    },
    TurnCommitted {
        report: TurnReport,
    },
    PlayerBusted {
        player_id: PlayerId,
        attempted: u32,
    },
    PlayerWon {
        player_id: PlayerId,
        score: u32,
    },
    TurnCancelled {
        player_id: PlayerId,
    },
    SessionConfigured {
        target_score: u32,
        input_mode: InputMode,
    },
    SessionStarted {
        first_player: Option<PlayerId>,
    },
    ScoresReset,
    SessionReset,
}

impl GameEvent {
    pub fn player_id(&self) -> Option<PlayerId> {
        match self {
            GameEvent::PlayerRegistered { player_id, .. } => Some(*player_id),
            GameEvent::PlayerRemoved { player_id, .. } => Some(*player_id),
            GameEvent::TurnOpened { player_id, .. } => Some(*player_id),
            GameEvent::TurnCommitted { report } => Some(report.player_id),
            GameEvent::PlayerBusted { player_id, .. } => Some(*player_id),
            GameEvent::PlayerWon { player_id, .. } => Some(*player_id),
            GameEvent::TurnCancelled { player_id } => Some(*player_id),
            GameEvent::SessionConfigured { .. }
            | GameEvent::SessionStarted { .. }
            | GameEvent::ScoresReset
            | GameEvent::SessionReset => None,
        }
    }
}

/// An event together with the time it happened
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRecord {
    pub at: DateTime<Utc>,
    pub event: GameEvent,
}

impl EventRecord {
    pub fn now(event: GameEvent) -> Self {
        Self {
            at: Utc::now(),
            event,
        }
    }
}

/// Event handler trait for processing game events
pub trait GameEventHandler {
    fn handle_event(&mut self, record: EventRecord);
}

/// Simple event bus for distributing game events
pub struct GameEventBus {
    handlers: Vec<Box<dyn GameEventHandler>>,
}

impl GameEventBus {
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    pub fn add_handler(&mut self, handler: Box<dyn GameEventHandler>) {
        self.handlers.push(handler);
    }

    pub fn publish(&mut self, record: EventRecord) {
        for handler in &mut self.handlers {
            handler.handle_event(record.clone());
        }
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }
}

impl Default for GameEventBus {
    fn default() -> Self {
        Self::new()
    }
}
