use freccette_core::GameSession;
use freccette_types::{ConfirmationRequest, PlayerView, SessionView};

/// Escape a user-supplied string for interpolation into HTML
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Snapshot of the session for the presentation layer.
/// Player names are passed through raw; escape them when rendering.
pub fn session_view(
    session: &GameSession,
    pending: Option<&ConfirmationRequest>,
    storage_warning: Option<&str>,
) -> SessionView {
    let active_player_id = session.active_player_id();
    let players = session
        .players()
        .iter()
        .map(|player| PlayerView {
            id: player.id,
            name: player.name.clone(),
            score: player.score,
            history: player.history.clone(),
            turns_played: player.turns_played(),
            is_winner: player.is_winner(session.target_score()),
            is_active: Some(player.id) == active_player_id,
        })
        .collect();

    SessionView {
        phase: session.phase(),
        target_score: session.target_score(),
        input_mode: session.input_mode(),
        players,
        active_player_id,
        entry: session.entry_view(),
        can_add_player: !session.registry().is_full(),
        pending_confirmation: pending.cloned(),
        storage_warning: storage_warning.map(str::to_string),
    }
}
