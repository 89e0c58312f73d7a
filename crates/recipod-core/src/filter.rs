//! Query filters understood by every store backend.
//!
//! Only two predicates exist: field equality and array set containment.
//! [`Filter::matches`] is the reference evaluation; the SQLite backend
//! translates the same predicates to SQL and must agree with it.

use serde_json::Value;

use crate::document::{Document, ID_FIELD};
use crate::id::DocumentId;

/// A predicate over documents in one collection.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// Matches every document.
    All,
    /// `field = value`.
    Eq { field: String, value: Value },
    /// `field ⊇ values` for an array-valued field. Order-independent.
    ContainsAll { field: String, values: Vec<Value> },
}

impl Filter {
    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Filter::Eq {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn contains_all<I, V>(field: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Filter::ContainsAll {
            field: field.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Equality on the `_id` field.
    pub fn by_id(id: DocumentId) -> Self {
        Filter::eq(ID_FIELD, id.to_string())
    }

    pub fn matches(&self, doc: &Document) -> bool {
        match self {
            Filter::All => true,
            Filter::Eq { field, value } => doc.get(field) == Some(value),
            Filter::ContainsAll { field, values } => match doc.get(field) {
                Some(Value::Array(items)) => values.iter().all(|v| items.contains(v)),
                _ => false,
            },
        }
    }
}
