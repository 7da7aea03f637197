use freccette_core::{EventRecord, GameEvent, GameEventHandler};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Install the fmt subscriber. `RUST_LOG` overrides the default `info`
/// level. Calling this more than once is harmless.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Logs every game event
#[derive(Debug, Default)]
pub struct TracingEventHandler;

impl GameEventHandler for TracingEventHandler {
    fn handle_event(&mut self, record: EventRecord) {
        match &record.event {
            GameEvent::PlayerBusted {
                player_id,
                attempted,
            } => info!(at = %record.at, %player_id, attempted, "Bust"),
            GameEvent::PlayerWon { player_id, score } => {
                info!(at = %record.at, %player_id, score, "Player reached the target")
            }
            GameEvent::TurnOpened { player_id, .. } => {
                debug!(at = %record.at, %player_id, "Turn opened")
            }
            other => debug!(
                at = %record.at,
                player_id = ?other.player_id(),
                event = ?other,
                "Game event"
            ),
        }
    }
}
