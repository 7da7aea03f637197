use anyhow::{Context, Result};
use freccette_core::{ConfirmationGate, GameEventBus, GameEventHandler, GameSession};
use freccette_persistence::{BlobStore, FileStore, SessionGateway};
use freccette_types::{
    GameError, Intent, Outcome, PendingAction, SessionView, TargetSelection,
};
use tracing::{debug, error, info, warn};

use crate::config::Config;
use crate::render::session_view;
use crate::telemetry::{TracingEventHandler, init_tracing};

/// Owns the single game session and applies user intents to it.
///
/// Every intent that changes stored state is followed by a save. A failed
/// save is logged and surfaced through the view; the in-memory session
/// stays authoritative.
pub struct Scorekeeper<S: BlobStore> {
    session: GameSession,
    gateway: SessionGateway<S>,
    confirmations: ConfirmationGate,
    event_bus: GameEventBus,
    storage_warning: Option<String>,
}

impl Scorekeeper<FileStore> {
    /// Start logging, read `FRECCETTE_*` settings and open the file-backed
    /// scorekeeper they describe
    pub fn open_default() -> Result<Self> {
        init_tracing();
        let config = Config::from_env().context("Failed to load configuration")?;
        info!("Opening scorekeeper in {}", config.storage_dir.display());
        Self::open_from_config(&config)
    }

    /// Open the file-backed scorekeeper described by `config`
    pub fn open_from_config(config: &Config) -> Result<Self> {
        std::fs::create_dir_all(&config.storage_dir).with_context(|| {
            format!(
                "Failed to create storage directory {}",
                config.storage_dir.display()
            )
        })?;
        Ok(Self::open(FileStore::new(&config.storage_dir), config))
    }
}

impl<S: BlobStore> Scorekeeper<S> {
    /// Restore the saved session from `store`, or start a fresh one
    pub fn open(store: S, config: &Config) -> Self {
        let gateway = SessionGateway::new(store, config.storage_key.clone());
        let session = gateway.load_session().unwrap_or_else(|| {
            info!("Starting a fresh session");
            fresh_session(config)
        });

        let mut event_bus = GameEventBus::new();
        event_bus.add_handler(Box::new(TracingEventHandler));

        Self {
            session,
            gateway,
            confirmations: ConfirmationGate::new(),
            event_bus,
            storage_warning: None,
        }
    }

    pub fn add_event_handler(&mut self, handler: Box<dyn GameEventHandler>) {
        self.event_bus.add_handler(handler);
        debug!(handlers = self.event_bus.handler_count(), "Event handler added");
    }

    pub fn handle(&mut self, intent: Intent) -> Outcome {
        let persist = intent.is_mutating();

        let outcome = self.dispatch(intent).unwrap_or_else(|e| {
            if e.is_silent() {
                warn!("Ignored: {}", e);
            } else {
                info!("Rejected: {}", e);
            }
            Outcome::from_error(e)
        });

        for record in self.session.drain_events() {
            self.event_bus.publish(record);
        }

        let changed = !matches!(outcome, Outcome::Ignored { .. } | Outcome::Rejected { .. });
        if persist && changed {
            self.persist();
        }

        outcome
    }

    fn dispatch(&mut self, intent: Intent) -> Result<Outcome, GameError> {
        let session = &mut self.session;

        match intent {
            Intent::AddPlayer { name } => {
                session.add_player(&name)?;
                Ok(Outcome::Updated)
            }
            Intent::DeletePlayer { player_id } => {
                let name = session
                    .player(player_id)
                    .map(|p| p.name.clone())
                    .ok_or(GameError::PlayerNotFound { player_id })?;
                let request = self
                    .confirmations
                    .request(PendingAction::DeletePlayer { player_id, name });
                Ok(Outcome::ConfirmationRequired(request))
            }
            Intent::SelectPlayer { player_id } => {
                session.select_player(player_id)?;
                Ok(Outcome::Updated)
            }
            Intent::AppendDigit { slot, digit } => {
                session.append_digit(slot, digit)?;
                Ok(Outcome::Updated)
            }
            Intent::DeleteLastDigit { slot } => {
                session.delete_last_digit(slot)?;
                Ok(Outcome::Updated)
            }
            Intent::SetActiveSlot { index } => {
                session.set_active_slot(index)?;
                Ok(Outcome::Updated)
            }
            Intent::ConfigureSession { target, input_mode } => {
                session.configure(&target, input_mode)?;
                Ok(Outcome::Updated)
            }
            Intent::StartSession => {
                session.start()?;
                Ok(Outcome::Updated)
            }
            Intent::CommitTurn => session.commit_turn().map(Outcome::from_turn),
            Intent::CancelTurn => {
                session.cancel_turn()?;
                Ok(Outcome::Updated)
            }
            Intent::ResetScores => Ok(Outcome::ConfirmationRequired(
                self.confirmations.request(PendingAction::ResetScores),
            )),
            Intent::ResetAll => Ok(Outcome::ConfirmationRequired(
                self.confirmations.request(PendingAction::ResetAll),
            )),
            Intent::Confirm { token } => {
                let action = self.confirmations.confirm(token)?;
                self.apply(action)?;
                Ok(Outcome::Updated)
            }
            Intent::CancelConfirmation { token } => {
                self.confirmations.cancel(token)?;
                Ok(Outcome::Updated)
            }
        }
    }

    fn apply(&mut self, action: PendingAction) -> Result<(), GameError> {
        match action {
            PendingAction::DeletePlayer { player_id, .. } => {
                self.session
                    .remove_player(player_id)
                    .ok_or(GameError::PlayerNotFound { player_id })?;
            }
            PendingAction::ResetScores => self.session.reset_scores(),
            PendingAction::ResetAll => self.session.reset_all(),
        }
        Ok(())
    }

    fn persist(&mut self) {
        match self.gateway.save_session(&self.session) {
            Ok(()) => self.storage_warning = None,
            Err(e) => {
                error!("Failed to save session: {}", e);
                self.storage_warning = Some(e.to_string());
            }
        }
    }

    pub fn view(&self) -> SessionView {
        session_view(
            &self.session,
            self.confirmations.pending(),
            self.storage_warning.as_deref(),
        )
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn storage_warning(&self) -> Option<&str> {
        self.storage_warning.as_deref()
    }

    pub fn gateway(&self) -> &SessionGateway<S> {
        &self.gateway
    }
}

fn fresh_session(config: &Config) -> GameSession {
    let target = TargetSelection::Custom(i64::from(config.default_target));
    GameSession::new(&target, config.default_input_mode).unwrap_or_else(|e| {
        warn!("Default target rejected ({}), using built-in defaults", e);
        GameSession::default()
    })
}
