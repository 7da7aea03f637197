use freccette_core::GameSession;
use freccette_types::SessionSnapshot;
use tracing::{info, warn};

use crate::{BlobStore, PersistenceError};

pub fn encode_snapshot(snapshot: &SessionSnapshot) -> Result<Vec<u8>, PersistenceError> {
    serde_json::to_vec(snapshot).map_err(PersistenceError::Encode)
}

/// Decode a stored blob, rejecting snapshots that break session invariants
pub fn decode_snapshot(blob: &[u8]) -> Result<SessionSnapshot, PersistenceError> {
    let snapshot: SessionSnapshot =
        serde_json::from_slice(blob).map_err(PersistenceError::Decode)?;
    snapshot.validate().map_err(PersistenceError::Invalid)?;
    Ok(snapshot)
}

/// Saves and restores a session under a single storage key
pub struct SessionGateway<S> {
    store: S,
    key: String,
}

impl<S: BlobStore> SessionGateway<S> {
    pub fn new(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn try_load(&self) -> Result<Option<SessionSnapshot>, PersistenceError> {
        match self.store.get(&self.key)? {
            Some(blob) => decode_snapshot(&blob).map(Some),
            None => Ok(None),
        }
    }

    /// Load the stored snapshot. Missing, unreadable and corrupt blobs all
    /// come back as `None` so the caller can start fresh.
    pub fn load(&self) -> Option<SessionSnapshot> {
        match self.try_load() {
            Ok(Some(snapshot)) => {
                info!(
                    phase = ?snapshot.phase(),
                    "Restored session with {} players from {}",
                    snapshot.players.len(),
                    self.key
                );
                Some(snapshot)
            }
            Ok(None) => {
                info!("No saved session under {}", self.key);
                None
            }
            Err(e) => {
                warn!("Discarding saved session under {}: {}", self.key, e);
                None
            }
        }
    }

    pub fn save(&mut self, snapshot: &SessionSnapshot) -> Result<(), PersistenceError> {
        let blob = encode_snapshot(snapshot)?;
        self.store.put(&self.key, &blob)
    }

    /// Restore a session, or `None` when nothing usable is stored
    pub fn load_session(&self) -> Option<GameSession> {
        let snapshot = self.load()?;
        match GameSession::from_snapshot(snapshot) {
            Ok(session) => Some(session),
            Err(e) => {
                warn!("Discarding saved session under {}: {}", self.key, e);
                None
            }
        }
    }

    pub fn save_session(&mut self, session: &GameSession) -> Result<(), PersistenceError> {
        self.save(&session.to_snapshot())
    }

    pub fn clear(&mut self) -> Result<(), PersistenceError> {
        self.store.remove(&self.key)
    }
}
