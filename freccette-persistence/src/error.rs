#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("Storage I/O failed for {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to encode session: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("Failed to decode session: {0}")]
    Decode(#[source] serde_json::Error),
    #[error("Stored session is invalid: {0}")]
    Invalid(String),
    #[error("Invalid storage key: {0:?}")]
    InvalidKey(String),
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}
