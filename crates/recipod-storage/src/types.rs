//! Acknowledgments returned by write operations.
//!
//! These are serialized straight into HTTP responses, so the JSON field
//! names are part of the API.

use serde::{Deserialize, Serialize};

use recipod_core::DocumentId;

/// Result of `insert_one`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertOneResult {
    /// The id the store assigned (or kept) for the new document.
    pub inserted_id: DocumentId,
}

/// Result of `update_one`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResult {
    /// Documents that matched the filter (0 or 1).
    pub matched_count: u64,
    /// Documents whose stored values actually changed (0 or 1).
    pub modified_count: u64,
}

/// Result of `delete_one`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResult {
    pub deleted_count: u64,
}
