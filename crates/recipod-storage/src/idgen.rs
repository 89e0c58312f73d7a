//! Allocation of [`DocumentId`]s on insert.
//!
//! Layout follows the familiar 12-byte object id: 4 bytes of big-endian
//! Unix seconds, 5 bytes of per-process randomness, 3 bytes of a counter
//! seeded randomly. The timestamp keeps every allocated id non-nil.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::OnceLock;
use std::time::{SystemTime, UNIX_EPOCH};

use serde_json::Value;
use uuid::Uuid;

use recipod_core::{Document, DocumentId, ID_FIELD};

use crate::error::StorageError;

struct ProcessSeed {
    random: [u8; 5],
    counter: AtomicU32,
}

fn seed() -> &'static ProcessSeed {
    static SEED: OnceLock<ProcessSeed> = OnceLock::new();
    SEED.get_or_init(|| {
        let bytes = Uuid::new_v4().into_bytes();
        ProcessSeed {
            random: [bytes[0], bytes[1], bytes[2], bytes[3], bytes[4]],
            counter: AtomicU32::new(u32::from_be_bytes([0, bytes[5], bytes[6], bytes[7]])),
        }
    })
}

/// Allocates a fresh id.
pub fn next_id() -> DocumentId {
    let seed = seed();
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as u32)
        .unwrap_or(1)
        .max(1);
    let count = seed.counter.fetch_add(1, Ordering::Relaxed);

    let mut bytes = [0u8; DocumentId::LEN];
    bytes[..4].copy_from_slice(&secs.to_be_bytes());
    bytes[4..9].copy_from_slice(&seed.random);
    bytes[9..].copy_from_slice(&count.to_be_bytes()[1..]);
    DocumentId::from_bytes(bytes)
}

/// Ensures `doc` carries an `_id`, allocating one when absent.
///
/// A caller-supplied `_id` must be a valid hex id.
pub(crate) fn assign_id(doc: &mut Document) -> Result<DocumentId, StorageError> {
    let id = match doc.get(ID_FIELD) {
        Some(Value::String(hex)) => DocumentId::parse_str(hex)?,
        Some(other) => DocumentId::parse_str(&other.to_string())?,
        None => next_id(),
    };
    doc.insert(ID_FIELD.to_string(), Value::String(id.to_string()));
    Ok(id)
}
