//! JSON documents as the store sees them.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::CoreError;

/// One record in a collection.
pub type Document = Map<String, Value>;

/// Key under which every document carries its [`DocumentId`](crate::DocumentId).
pub const ID_FIELD: &str = "_id";

/// Serializes an entity into a store document.
pub fn to_document<T: Serialize>(value: &T) -> Result<Document, CoreError> {
    match serde_json::to_value(value)? {
        Value::Object(map) => Ok(map),
        _ => Err(CoreError::NotADocument),
    }
}

/// Decodes a store document into an entity.
pub fn from_document<T: DeserializeOwned>(doc: Document) -> Result<T, CoreError> {
    Ok(serde_json::from_value(Value::Object(doc))?)
}
