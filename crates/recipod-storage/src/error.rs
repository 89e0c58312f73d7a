//! Storage error types for recipod-storage.
//!
//! [`StorageError`] covers every way a store call can fail, from backend
//! errors and timeouts to malformed connection strings at startup.

use std::time::Duration;

use thiserror::Error;

/// Errors produced by storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// SQLite reported an error.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Applying schema migrations failed.
    #[error("migration error: {0}")]
    Migration(String),

    /// A stored body could not be encoded or decoded.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Converting between entities and documents failed.
    #[error(transparent)]
    Core(#[from] recipod_core::CoreError),

    /// A document with this `_id` already exists in the collection.
    #[error("duplicate key: collection={collection}, _id={id}")]
    DuplicateKey { collection: String, id: String },

    /// An update tried to change `_id`.
    #[error("the _id field is immutable")]
    ImmutableId,

    /// The backend cannot evaluate this filter.
    #[error("unsupported filter: {reason}")]
    UnsupportedFilter { reason: String },

    /// The call did not complete within the collection's time bound.
    #[error("store operation timed out after {after:?}")]
    Timeout { after: Duration },

    /// The backend is not reachable.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// The connection string is missing or malformed.
    #[error("invalid store uri '{uri}': {reason}")]
    InvalidUri { uri: String, reason: String },

    /// A blocking backend task panicked or was cancelled.
    #[error("store task failed: {0}")]
    TaskFailed(String),
}
