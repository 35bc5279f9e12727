//! Persistence error types

/// Errors that can occur while storing or reading a layout blob.
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    /// I/O error from a file-backed store.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to encode the layout.
    #[error("Serialization error: {0}")]
    Serialization(serde_json::Error),

    /// The stored blob is not a valid layout.
    #[error("Deserialization error: {0}")]
    Deserialization(serde_json::Error),

    /// The store refused the write because it is full.
    #[error("storage quota exceeded: {needed} bytes needed, {quota} allowed")]
    QuotaExceeded {
        /// Bytes the store would hold after the write.
        needed: usize,
        /// Configured capacity in bytes.
        quota: usize,
    },
}
