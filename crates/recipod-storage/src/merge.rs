//! `$set`-style merge shared by both backends.

use recipod_core::{Document, ID_FIELD};

use crate::error::StorageError;

/// Copies every field of `set` onto `doc`. Returns whether any stored value
/// changed.
pub(crate) fn apply_set(doc: &mut Document, set: &Document) -> Result<bool, StorageError> {
    if let Some(new_id) = set.get(ID_FIELD) {
        if doc.get(ID_FIELD) != Some(new_id) {
            return Err(StorageError::ImmutableId);
        }
    }

    let mut changed = false;
    for (field, value) in set {
        if doc.get(field) != Some(value) {
            doc.insert(field.clone(), value.clone());
            changed = true;
        }
    }
    Ok(changed)
}
