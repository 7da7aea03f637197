#![allow(dead_code)]

use freccette_core::{EventRecord, GameEvent, GameEventHandler, GameSession};
use freccette_types::{InputMode, Player, PlayerId, TargetSelection};
use std::sync::{Arc, Mutex};

/// Creates a setup-phase session with the given players registered in order
pub fn create_session_with_players(names: &[&str]) -> (GameSession, Vec<PlayerId>) {
    let mut session = GameSession::default();
    let ids = names
        .iter()
        .map(|name| session.add_player(name).expect("player should register"))
        .collect();
    (session, ids)
}

/// Creates a started session with a custom target and entry mode
pub fn create_started_session(
    names: &[&str],
    target: i64,
    input_mode: InputMode,
) -> (GameSession, Vec<PlayerId>) {
    let (mut session, ids) = create_session_with_players(names);
    session
        .configure(&TargetSelection::Custom(target), input_mode)
        .expect("target should be valid");
    session.start().expect("session should start");
    (session, ids)
}

/// Types a total-mode value digit by digit into the open turn
pub fn enter_total(session: &mut GameSession, points: u32) {
    for digit in points.to_string().bytes() {
        session
            .append_digit(None, digit - b'0')
            .expect("turn should be open");
    }
}

/// Types one value per dart in granular mode
pub fn enter_darts(session: &mut GameSession, darts: [&str; 3]) {
    for (slot, value) in darts.iter().enumerate() {
        session.set_active_slot(slot).expect("turn should be open");
        for digit in value.bytes() {
            session
                .append_digit(None, digit - b'0')
                .expect("turn should be open");
        }
    }
}

/// Commits `points` for whoever holds the open turn
pub fn play_turn(session: &mut GameSession, points: u32) -> freccette_types::TurnReport {
    enter_total(session, points);
    session.commit_turn().expect("turn should commit")
}

/// Helper to get player by name
pub fn get_player_by_name<'a>(session: &'a GameSession, name: &str) -> Option<&'a Player> {
    session.players().iter().find(|p| p.name == name)
}

/// Asserts the score/history invariant for every player
pub fn assert_scores_match_history(session: &GameSession) {
    for player in session.players() {
        assert_eq!(
            u64::from(player.score),
            player.history.iter().map(|&p| u64::from(p)).sum::<u64>(),
            "score of {} does not match its history {:?}",
            player.name,
            player.history
        );
    }
}

/// Event collector for testing event emissions
#[derive(Clone, Default)]
pub struct EventCollector {
    events: Arc<Mutex<Vec<GameEvent>>>,
}

impl EventCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_events(&self) -> Vec<GameEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn has_event_type(&self, check_fn: impl Fn(&GameEvent) -> bool) -> bool {
        self.events.lock().unwrap().iter().any(check_fn)
    }
}

impl GameEventHandler for EventCollector {
    fn handle_event(&mut self, record: EventRecord) {
        self.events.lock().unwrap().push(record.event);
    }
}
