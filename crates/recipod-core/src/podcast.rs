//! Podcast records managed by the REST API.
//!
//! [`Podcast`] is the full record used for create and list. [`PodcastPatch`]
//! is the update payload: each field is `Some` only when the client sent it,
//! so an update never clears a field the client left out.
//!
//! Both decode through one lenient reader. Field names match without regard
//! to case (`Title`, `TAGS`, `ID` all work), a repeated field keeps its last
//! value, `null` counts as absent, and an `_id` that is not a document id is
//! dropped rather than rejected.

use std::fmt;

use serde::de::{Deserializer, IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::document::{to_document, Document, ID_FIELD};
use crate::error::CoreError;
use crate::id::DocumentId;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "PodcastFields")]
pub struct Podcast {
    /// Assigned by the store on insert; ignored when a client supplies one.
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<DocumentId>,
    pub title: String,
    pub author: String,
    pub tags: Vec<String>,
}

impl Podcast {
    /// Prepares a client-supplied record for insertion.
    pub fn into_new(self) -> Podcast {
        Podcast { id: None, ..self }
    }
}

/// Partial podcast used by the update endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "PodcastFields")]
pub struct PodcastPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

impl PodcastPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.author.is_none() && self.tags.is_none()
    }

    /// The fields to set, and nothing else.
    pub fn to_set_document(&self) -> Result<Document, CoreError> {
        to_document(self)
    }
}

/// Whatever podcast fields a payload carried.
#[derive(Debug, Default)]
struct PodcastFields {
    id: Option<DocumentId>,
    title: Option<String>,
    author: Option<String>,
    tags: Option<Vec<String>>,
}

impl From<PodcastFields> for Podcast {
    fn from(fields: PodcastFields) -> Self {
        Podcast {
            id: fields.id,
            title: fields.title.unwrap_or_default(),
            author: fields.author.unwrap_or_default(),
            tags: fields.tags.unwrap_or_default(),
        }
    }
}

impl From<PodcastFields> for PodcastPatch {
    fn from(fields: PodcastFields) -> Self {
        PodcastPatch {
            title: fields.title,
            author: fields.author,
            tags: fields.tags,
        }
    }
}

enum Field {
    Id,
    Title,
    Author,
    Tags,
    Other,
}

impl Field {
    fn of(key: &str) -> Field {
        if key == ID_FIELD || key.eq_ignore_ascii_case("id") {
            Field::Id
        } else if key.eq_ignore_ascii_case("title") {
            Field::Title
        } else if key.eq_ignore_ascii_case("author") {
            Field::Author
        } else if key.eq_ignore_ascii_case("tags") {
            Field::Tags
        } else {
            Field::Other
        }
    }
}

impl<'de> Deserialize<'de> for PodcastFields {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct FieldsVisitor;

        impl<'de> Visitor<'de> for FieldsVisitor {
            type Value = PodcastFields;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a podcast object")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<PodcastFields, A::Error> {
                let mut fields = PodcastFields::default();
                while let Some(key) = map.next_key::<String>()? {
                    match Field::of(&key) {
                        Field::Id => {
                            let raw: Value = map.next_value()?;
                            if let Ok(id) = serde_json::from_value::<DocumentId>(raw) {
                                fields.id = Some(id);
                            }
                        }
                        Field::Title => {
                            if let Some(title) = map.next_value::<Option<String>>()? {
                                fields.title = Some(title);
                            }
                        }
                        Field::Author => {
                            if let Some(author) = map.next_value::<Option<String>>()? {
                                fields.author = Some(author);
                            }
                        }
                        Field::Tags => {
                            if let Some(tags) = map.next_value::<Option<Vec<String>>>()? {
                                fields.tags = Some(tags);
                            }
                        }
                        Field::Other => {
                            map.next_value::<IgnoredAny>()?;
                        }
                    }
                }
                Ok(fields)
            }
        }

        deserializer.deserialize_map(FieldsVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_fields_default_to_empty() {
        let podcast: Podcast = serde_json::from_value(json!({ "title": "Rust Radio" })).unwrap();
        assert_eq!(podcast.title, "Rust Radio");
        assert_eq!(podcast.author, "");
        assert!(podcast.tags.is_empty());
        assert!(podcast.id.is_none());
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let podcast: Podcast =
            serde_json::from_value(json!({ "title": "A", "rating": 5 })).unwrap();
        assert_eq!(podcast.title, "A");
    }

    #[test]
    fn capitalised_names_are_accepted() {
        let podcast: Podcast = serde_json::from_value(json!({
            "Title": "The Polyglot Developer",
            "Author": "Nic",
            "Tags": ["dev", "go"]
        }))
        .unwrap();
        assert_eq!(podcast.title, "The Polyglot Developer");
        assert_eq!(podcast.author, "Nic");
        assert_eq!(podcast.tags, vec!["dev", "go"]);
    }

    #[test]
    fn into_new_drops_client_id() {
        let podcast: Podcast = serde_json::from_value(json!({
            "_id": "5f1d4c2b9a8e7d6c5b4a3928",
            "title": "A"
        }))
        .unwrap();
        assert!(podcast.id.is_some());
        assert!(podcast.into_new().id.is_none());
    }

    #[test]
    fn serialization_omits_absent_id() {
        let value = serde_json::to_value(Podcast::default()).unwrap();
        assert_eq!(value, json!({ "title": "", "author": "", "tags": [] }));
    }

    #[test]
    fn patch_only_sets_present_fields() {
        let patch: PodcastPatch = serde_json::from_value(json!({ "author": "X" })).unwrap();
        let set = patch.to_set_document().unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(set["author"], "X");
    }

    #[test]
    fn patch_ignores_id_and_unknown_fields() {
        let patch: PodcastPatch = serde_json::from_value(json!({
            "_id": "5f1d4c2b9a8e7d6c5b4a3928",
            "plays": 12
        }))
        .unwrap();
        assert!(patch.is_empty());
        assert!(patch.to_set_document().unwrap().is_empty());
    }

    #[test]
    fn patch_keeps_explicit_empty_values() {
        let patch: PodcastPatch = serde_json::from_value(json!({ "tags": [] })).unwrap();
        assert_eq!(patch.tags, Some(vec![]));
        assert_eq!(patch.to_set_document().unwrap()["tags"], json!([]));
    }

    #[test]
    fn null_fields_count_as_absent() {
        let podcast: Podcast =
            serde_json::from_value(json!({ "title": "x", "author": null, "tags": null })).unwrap();
        assert_eq!(podcast.title, "x");
        assert_eq!(podcast.author, "");
        assert!(podcast.tags.is_empty());

        let patch: PodcastPatch = serde_json::from_value(json!({ "tags": null })).unwrap();
        assert!(patch.is_empty());
    }

    #[test]
    fn repeated_field_keeps_last_value() {
        let podcast: Podcast = serde_json::from_str(r#"{"title":"x","Title":"y"}"#).unwrap();
        assert_eq!(podcast.title, "y");

        let patch: PodcastPatch = serde_json::from_str(r#"{"Author":"a","author":"b"}"#).unwrap();
        assert_eq!(patch.author.as_deref(), Some("b"));
    }

    #[test]
    fn malformed_client_id_is_dropped() {
        let podcast: Podcast =
            serde_json::from_value(json!({ "_id": "abc", "title": "A" })).unwrap();
        assert!(podcast.id.is_none());
        assert_eq!(podcast.title, "A");
    }

    #[test]
    fn wrong_field_type_is_still_an_error() {
        assert!(serde_json::from_value::<Podcast>(json!({ "tags": "rust" })).is_err());
        assert!(serde_json::from_value::<Podcast>(json!(["title"])).is_err());
    }
}
