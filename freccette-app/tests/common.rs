#![allow(dead_code)]

use freccette_app::{Config, Scorekeeper};
use freccette_persistence::{BlobStore, MemoryStore, PersistenceError};
use freccette_types::{Intent, Outcome, PlayerId};

pub fn test_config() -> Config {
    Config::default()
}

/// Blob store whose writes always fail, optionally serving a seeded blob
#[derive(Debug, Default)]
pub struct FailingStore {
    pub blob: Option<Vec<u8>>,
    pub attempts: usize,
}

impl BlobStore for FailingStore {
    fn get(&self, _key: &str) -> Result<Option<Vec<u8>>, PersistenceError> {
        Ok(self.blob.clone())
    }

    fn put(&mut self, _key: &str, _blob: &[u8]) -> Result<(), PersistenceError> {
        self.attempts += 1;
        Err(PersistenceError::Unavailable("disk full".to_string()))
    }

    fn remove(&mut self, _key: &str) -> Result<(), PersistenceError> {
        Err(PersistenceError::Unavailable("disk full".to_string()))
    }
}

/// Blob store whose reads fail
#[derive(Debug, Default)]
pub struct UnreadableStore;

impl BlobStore for UnreadableStore {
    fn get(&self, _key: &str) -> Result<Option<Vec<u8>>, PersistenceError> {
        Err(PersistenceError::Unavailable("permission denied".to_string()))
    }

    fn put(&mut self, _key: &str, _blob: &[u8]) -> Result<(), PersistenceError> {
        Ok(())
    }

    fn remove(&mut self, _key: &str) -> Result<(), PersistenceError> {
        Ok(())
    }
}

/// Scorekeeper over a memory store, plus a handle onto that store
pub fn memory_scorekeeper() -> (Scorekeeper<MemoryStore>, MemoryStore) {
    let store = MemoryStore::new();
    let keeper = Scorekeeper::open(store.clone(), &test_config());
    (keeper, store)
}

/// Registers players and returns their ids in order
pub fn add_players<S: BlobStore>(keeper: &mut Scorekeeper<S>, names: &[&str]) -> Vec<PlayerId> {
    for name in names {
        let outcome = keeper.handle(Intent::AddPlayer {
            name: name.to_string(),
        });
        assert_eq!(outcome, Outcome::Updated, "adding {name} failed");
    }
    keeper.session().players().iter().map(|p| p.id).collect()
}

/// Types a total value and commits it
pub fn score<S: BlobStore>(keeper: &mut Scorekeeper<S>, points: u32) -> Outcome {
    for digit in points.to_string().bytes() {
        keeper.handle(Intent::AppendDigit {
            slot: None,
            digit: digit - b'0',
        });
    }
    keeper.handle(Intent::CommitTurn)
}

/// Requests a confirmable action and confirms it
pub fn confirm<S: BlobStore>(keeper: &mut Scorekeeper<S>, intent: Intent) -> Outcome {
    match keeper.handle(intent) {
        Outcome::ConfirmationRequired(request) => {
            keeper.handle(Intent::Confirm {
                token: request.token,
            })
        }
        other => panic!("expected a confirmation request, got {other:?}"),
    }
}
