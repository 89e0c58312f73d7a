//! Core error types for recipod-core.

use thiserror::Error;

/// Errors produced while parsing identifiers or converting entities to and
/// from store documents.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The input is not 24 hexadecimal digits.
    #[error("invalid document id: '{input}'")]
    InvalidDocumentId { input: String },

    /// An entity serialized to something other than a JSON object.
    #[error("value is not a document (expected a JSON object)")]
    NotADocument,

    /// JSON conversion failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
