pub mod error;
pub mod file_store;
pub mod gateway;
pub mod memory_store;

pub use error::PersistenceError;
pub use file_store::FileStore;
pub use gateway::{SessionGateway, decode_snapshot, encode_snapshot};
pub use memory_store::MemoryStore;

/// Opaque key-value byte storage behind the session gateway
pub trait BlobStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, PersistenceError>;
    fn put(&mut self, key: &str, blob: &[u8]) -> Result<(), PersistenceError>;
    fn remove(&mut self, key: &str) -> Result<(), PersistenceError>;
}

impl<S: BlobStore + ?Sized> BlobStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, PersistenceError> {
        (**self).get(key)
    }

    fn put(&mut self, key: &str, blob: &[u8]) -> Result<(), PersistenceError> {
        (**self).put(key, blob)
    }

    fn remove(&mut self, key: &str) -> Result<(), PersistenceError> {
        (**self).remove(key)
    }
}
