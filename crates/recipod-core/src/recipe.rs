//! Recipes queried by the voice skill. Read-only.

use serde::{Deserialize, Serialize};

use crate::id::DocumentId;

/// A recipe and the names of its ingredients, in stored order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Recipe {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<DocumentId>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub ingredients: Vec<String>,
}

impl Recipe {
    /// Field holding the lookup name.
    pub const NAME_FIELD: &'static str = "name";
    /// Array field searched by ingredient queries.
    pub const INGREDIENTS_FIELD: &'static str = "ingredients";

    pub fn new<I, S>(name: impl Into<String>, ingredients: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Recipe {
            id: None,
            name: name.into(),
            ingredients: ingredients.into_iter().map(Into::into).collect(),
        }
    }
}
