//! Episode records. Declared for the episodes collection; no endpoint reads
//! or writes them yet.

use serde::{Deserialize, Serialize};

use crate::id::DocumentId;

/// One episode, referencing its podcast by id. The reference is not
/// enforced by the store.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Episode {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<DocumentId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub podcast: Option<DocumentId>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Length in seconds.
    #[serde(default)]
    pub duration: i32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn episode_references_podcast_by_hex_id() {
        let podcast = DocumentId::from_bytes([3; 12]);
        let episode = Episode {
            id: None,
            podcast: Some(podcast),
            title: "Pilot".into(),
            description: "Where it starts".into(),
            duration: 1800,
        };
        let value = serde_json::to_value(&episode).unwrap();
        assert_eq!(value["podcast"], json!(podcast.to_string()));
        assert_eq!(value["duration"], json!(1800));
        assert!(value.get("_id").is_none());
    }
}
