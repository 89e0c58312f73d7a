//! Skill error types.

use thiserror::Error;

use recipod_storage::StorageError;

/// Failures surfaced to the voice-platform adapter.
#[derive(Debug, Error)]
pub enum SkillError {
    /// A required slot was missing or empty.
    #[error("{slot} is not present in the request")]
    InvalidInput { slot: &'static str },

    /// No recipe has the requested name.
    #[error("no recipe named '{name}'")]
    NotFound { name: String },

    /// The store call failed or timed out.
    #[error("store error: {0}")]
    Store(#[from] StorageError),
}
