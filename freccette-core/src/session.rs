use freccette_types::{
    EntryView, GameError, InputMode, MAX_PLAYERS, Player, PlayerId, SessionPhase,
    SessionSnapshot, TargetPreset, TargetSelection, TurnReport,
};
use tracing::{debug, info};

use crate::{
    Digit, EventRecord, GameEvent, PlayerRegistry, RemovedPlayer, ScoreEntryBuffer, TurnEngine,
    TurnState,
};

pub const DEFAULT_TARGET_SCORE: u32 = 301;

/// Undrained events kept by a session. Older records are dropped first.
pub const MAX_PENDING_EVENTS: usize = 256;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid session snapshot: {reason}")]
pub struct InvalidSnapshot {
    pub reason: String,
}

/// The whole state of one scorekeeping session
///
/// Operations record `GameEvent`s in an outbox that callers empty with
/// `drain_events`. Only the latest `MAX_PENDING_EVENTS` are kept between
/// drains.
#[derive(Debug, Clone)]
pub struct GameSession {
    pub(crate) registry: PlayerRegistry,
    pub(crate) turn: TurnState,
    pub(crate) target_score: u32,
    pub(crate) input_mode: InputMode,
    pub(crate) game_active: bool,
    events: Vec<EventRecord>,
}

impl Default for GameSession {
    fn default() -> Self {
        Self {
            registry: PlayerRegistry::new(),
            turn: TurnState::NoActiveTurn,
            target_score: DEFAULT_TARGET_SCORE,
            input_mode: InputMode::Total,
            game_active: false,
            events: Vec::new(),
        }
    }
}

impl GameSession {
    /// Fresh session in the setup phase
    pub fn new(target: &TargetSelection, input_mode: InputMode) -> Result<Self, GameError> {
        Ok(Self {
            target_score: target.resolve()?,
            input_mode,
            ..Self::default()
        })
    }

    pub fn from_snapshot(snapshot: SessionSnapshot) -> Result<Self, InvalidSnapshot> {
        snapshot
            .validate()
            .map_err(|reason| InvalidSnapshot { reason })?;

        // In-progress entry is never stored, so a restored turn starts empty
        let turn = match snapshot.active_player_id {
            Some(player_id) => TurnState::open(player_id, snapshot.input_mode),
            None => TurnState::NoActiveTurn,
        };

        Ok(Self {
            registry: PlayerRegistry::from_players(snapshot.players),
            turn,
            target_score: snapshot.target_score,
            input_mode: snapshot.input_mode,
            game_active: snapshot.game_active,
            events: Vec::new(),
        })
    }

    pub fn to_snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            players: self.registry.players().to_vec(),
            active_player_id: self.turn.active_player_id(),
            target_score: self.target_score,
            input_mode: self.input_mode,
            game_active: self.game_active,
        }
    }

    // Lifecycle

    /// Choose target score and entry mode. Only allowed before the game starts.
    pub fn configure(
        &mut self,
        target: &TargetSelection,
        input_mode: InputMode,
    ) -> Result<(), GameError> {
        if self.game_active {
            return Err(GameError::SessionAlreadyStarted);
        }

        let target_score = target.resolve()?;
        self.target_score = target_score;
        self.input_mode = input_mode;

        info!("Session configured: target {}, {:?} entry", target_score, input_mode);
        self.record(GameEvent::SessionConfigured {
            target_score,
            input_mode,
        });
        Ok(())
    }

    /// Move from setup to play. The first player gets the opening turn
    /// unless a turn is already open.
    pub fn start(&mut self) -> Result<Option<PlayerId>, GameError> {
        if self.game_active {
            return Err(GameError::SessionAlreadyStarted);
        }

        self.game_active = true;
        if self.turn.active_player_id().is_none() {
            if let Some(first) = self.registry.first().map(|p| p.id) {
                self.open_turn(first);
            }
        }

        let first_player = self.turn.active_player_id();
        info!("Game started with {} players", self.registry.len());
        self.record(GameEvent::SessionStarted { first_player });
        Ok(first_player)
    }

    /// Zero every score and history. Players, order and phase are kept.
    pub fn reset_scores(&mut self) {
        self.registry.reset_scores();
        if let Some(entry) = self.turn.entry_mut() {
            entry.reset(self.input_mode);
        }

        info!("Scores reset for {} players", self.registry.len());
        self.record(GameEvent::ScoresReset);
    }

    /// Drop all players and return to setup
    pub fn reset_all(&mut self) {
        self.registry.clear();
        self.turn = TurnState::NoActiveTurn;
        self.game_active = false;

        info!("Session reset");
        self.record(GameEvent::SessionReset);
    }

    // Players

    pub fn add_player(&mut self, name: &str) -> Result<PlayerId, GameError> {
        let player = self.registry.register(name)?;
        let (player_id, name) = (player.id, player.name.clone());

        info!("Player {} joined ({} of {})", name, self.registry.len(), MAX_PLAYERS);
        self.record(GameEvent::PlayerRegistered { player_id, name });
        Ok(player_id)
    }

    /// Remove a player. If it held the open turn, the turn passes to the
    /// player that followed it; unknown ids are ignored.
    pub fn remove_player(&mut self, player_id: PlayerId) -> Option<RemovedPlayer> {
        let removed = self.registry.remove(player_id)?;

        if self.turn.active_player_id() == Some(player_id) {
            match removed.successor {
                Some(next) => self.open_turn(next),
                None => self.turn = TurnState::NoActiveTurn,
            }
        }

        let next_active = self.turn.active_player_id();
        info!("Player {} removed", removed.player.name);
        self.record(GameEvent::PlayerRemoved {
            player_id,
            name: removed.player.name.clone(),
            next_active,
        });
        Some(removed)
    }

    // Turns

    pub fn select_player(&mut self, player_id: PlayerId) -> Result<(), GameError> {
        TurnEngine::select_player(self, player_id)
    }

    pub fn commit_turn(&mut self) -> Result<TurnReport, GameError> {
        TurnEngine::commit_turn(self)
    }

    pub fn cancel_turn(&mut self) -> Result<PlayerId, GameError> {
        TurnEngine::cancel_turn(self)
    }

    // Score entry

    pub fn append_digit(&mut self, slot: Option<usize>, digit: u8) -> Result<(), GameError> {
        let digit = Digit::new(digit)?;
        let entry = self.entry_mut()?;
        entry.append_digit(slot, digit)?;
        debug!("Entry now {}", entry.compute_value());
        Ok(())
    }

    pub fn delete_last_digit(&mut self, slot: Option<usize>) -> Result<(), GameError> {
        self.entry_mut()?.delete_last_digit(slot)
    }

    pub fn set_active_slot(&mut self, index: usize) -> Result<(), GameError> {
        self.entry_mut()?.set_active_slot(index)
    }

    fn entry_mut(&mut self) -> Result<&mut ScoreEntryBuffer, GameError> {
        self.turn.entry_mut().ok_or(GameError::NoActiveTurn)
    }

    // Queries

    pub fn players(&self) -> &[Player] {
        self.registry.players()
    }

    pub fn player(&self, player_id: PlayerId) -> Option<&Player> {
        self.registry.get(player_id)
    }

    pub fn registry(&self) -> &PlayerRegistry {
        &self.registry
    }

    pub fn active_player_id(&self) -> Option<PlayerId> {
        self.turn.active_player_id()
    }

    pub fn active_player(&self) -> Option<&Player> {
        self.active_player_id()
            .and_then(|player_id| self.registry.get(player_id))
    }

    pub fn turn(&self) -> &TurnState {
        &self.turn
    }

    pub fn entry(&self) -> Option<&ScoreEntryBuffer> {
        self.turn.entry()
    }

    pub fn entry_view(&self) -> Option<EntryView> {
        self.entry().map(ScoreEntryBuffer::view)
    }

    pub fn target_score(&self) -> u32 {
        self.target_score
    }

    pub fn target_preset(&self) -> Option<TargetPreset> {
        TargetPreset::from_points(self.target_score)
    }

    pub fn input_mode(&self) -> InputMode {
        self.input_mode
    }

    pub fn is_game_active(&self) -> bool {
        self.game_active
    }

    pub fn phase(&self) -> SessionPhase {
        if self.game_active {
            SessionPhase::Playing
        } else {
            SessionPhase::Setup
        }
    }

    pub fn winners(&self) -> impl Iterator<Item = &Player> {
        self.registry
            .players()
            .iter()
            .filter(move |p| p.is_winner(self.target_score))
    }

    /// Take the events recorded since the last call
    pub fn drain_events(&mut self) -> Vec<EventRecord> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn open_turn(&mut self, player_id: PlayerId) {
        self.turn = TurnState::open(player_id, self.input_mode);
        self.record(GameEvent::TurnOpened {
            player_id,
            input_mode: self.input_mode,
        });
    }

    pub(crate) fn record(&mut self, event: GameEvent) {
        if self.events.len() >= MAX_PENDING_EVENTS {
            self.events.remove(0);
        }
        self.events.push(EventRecord::now(event));
    }
}
