use freccette_types::{GameError, InputMode, PlayerId, TurnReport, TurnResult};
use tracing::{debug, info};

use crate::{GameEvent, GameSession, ScoreEntryBuffer, ScoringRules};

/// Whose turn is open, if anyone's. An open turn owns its entry buffer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TurnState {
    #[default]
    NoActiveTurn,
    TurnOpen {
        player_id: PlayerId,
        entry: ScoreEntryBuffer,
    },
}

impl TurnState {
    pub fn open(player_id: PlayerId, mode: InputMode) -> Self {
        TurnState::TurnOpen {
            player_id,
            entry: ScoreEntryBuffer::new(mode),
        }
    }

    pub fn active_player_id(&self) -> Option<PlayerId> {
        match self {
            TurnState::TurnOpen { player_id, .. } => Some(*player_id),
            TurnState::NoActiveTurn => None,
        }
    }

    pub fn entry(&self) -> Option<&ScoreEntryBuffer> {
        match self {
            TurnState::TurnOpen { entry, .. } => Some(entry),
            TurnState::NoActiveTurn => None,
        }
    }

    pub fn entry_mut(&mut self) -> Option<&mut ScoreEntryBuffer> {
        match self {
            TurnState::TurnOpen { entry, .. } => Some(entry),
            TurnState::NoActiveTurn => None,
        }
    }
}

pub struct TurnEngine;

impl TurnEngine {
    /// Open a turn for `player_id`. Once the game has started, a player
    /// cannot take over while someone else's turn is open.
    pub fn select_player(session: &mut GameSession, player_id: PlayerId) -> Result<(), GameError> {
        if session.game_active {
            if let Some(active) = session.turn.active_player_id() {
                if active != player_id {
                    debug!("Ignoring selection of {}: turn belongs to {}", player_id, active);
                    return Err(GameError::NotYourTurn { active });
                }
            }
        }

        if !session.registry.contains(player_id) {
            return Err(GameError::PlayerNotFound { player_id });
        }

        session.open_turn(player_id);
        Ok(())
    }

    /// Apply the open turn's entry to its player and pass the turn on
    pub fn commit_turn(session: &mut GameSession) -> Result<TurnReport, GameError> {
        let (player_id, points) = match &session.turn {
            TurnState::TurnOpen { player_id, entry } => (*player_id, entry.compute_value()),
            TurnState::NoActiveTurn => return Err(GameError::NoActiveTurn),
        };

        let target_score = session.target_score;
        let Some(player) = session.registry.get_mut(player_id) else {
            session.turn = TurnState::NoActiveTurn;
            return Err(GameError::PlayerNotFound { player_id });
        };

        let scored = ScoringRules::evaluate(player.score, points, target_score);
        player.score = scored.new_score;
        player.history.push(scored.recorded_points);
        let player_name = player.name.clone();

        let next_player = session.registry.next_after(player_id);
        let report = TurnReport {
            player_id,
            player_name,
            points,
            result: scored.result,
            score: scored.new_score,
            next_player,
        };

        info!(
            "{} scored {} ({:?}), now at {}/{}",
            report.player_name, points, report.result, report.score, target_score
        );
        session.record(GameEvent::TurnCommitted {
            report: report.clone(),
        });
        match report.result {
            TurnResult::Bust => session.record(GameEvent::PlayerBusted {
                player_id,
                attempted: points,
            }),
            TurnResult::Win => session.record(GameEvent::PlayerWon {
                player_id,
                score: report.score,
            }),
            TurnResult::Scored => {}
        }

        match next_player {
            Some(next) => session.open_turn(next),
            None => session.turn = TurnState::NoActiveTurn,
        }

        Ok(report)
    }

    /// Close the open turn without scoring it
    pub fn cancel_turn(session: &mut GameSession) -> Result<PlayerId, GameError> {
        let player_id = session
            .turn
            .active_player_id()
            .ok_or(GameError::NoActiveTurn)?;

        session.turn = TurnState::NoActiveTurn;
        session.record(GameEvent::TurnCancelled { player_id });
        Ok(player_id)
    }
}
