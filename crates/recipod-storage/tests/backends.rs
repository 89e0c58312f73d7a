//! Behavioral contract shared by every DocumentStore backend.
//!
//! Each check runs against InMemoryStore and a private in-memory SQLite
//! database so the two backends cannot drift apart.

use std::sync::Arc;

use serde_json::json;

use recipod_core::{to_document, Document, DocumentId, Filter};
use recipod_storage::{DocumentStore, InMemoryStore, SqliteStore, StorageError};

fn backends() -> Vec<(&'static str, Arc<dyn DocumentStore>)> {
    vec![
        ("memory", Arc::new(InMemoryStore::new())),
        ("sqlite", Arc::new(SqliteStore::in_memory().unwrap())),
    ]
}

fn doc(value: serde_json::Value) -> Document {
    to_document(&value).unwrap()
}

async fn seed_recipes(store: &dyn DocumentStore) {
    for (name, ingredients) in [
        ("pancakes", json!(["flour", "eggs", "milk"])),
        ("omelette", json!(["eggs", "butter", "salt"])),
        ("shortbread", json!(["flour", "butter", "sugar"])),
    ] {
        store
            .insert_one("recipes", doc(json!({ "name": name, "ingredients": ingredients })))
            .await
            .unwrap();
    }
}

#[tokio::test]
async fn insert_assigns_id_and_find_returns_it() {
    for (backend, store) in backends() {
        let ack = store
            .insert_one("podcasts", doc(json!({ "title": "T" })))
            .await
            .unwrap();
        assert!(!ack.inserted_id.is_nil(), "{backend}");

        let found = store
            .find_one("podcasts", &Filter::by_id(ack.inserted_id))
            .await
            .unwrap()
            .unwrap_or_else(|| panic!("{backend}: inserted document not found"));
        assert_eq!(found["_id"], json!(ack.inserted_id.to_string()), "{backend}");
        assert_eq!(found["title"], "T", "{backend}");
    }
}

#[tokio::test]
async fn find_many_returns_insertion_order() {
    for (backend, store) in backends() {
        seed_recipes(store.as_ref()).await;
        let names: Vec<_> = store
            .find_many("recipes", &Filter::All)
            .await
            .unwrap()
            .into_iter()
            .map(|d| d["name"].clone())
            .collect();
        assert_eq!(
            names,
            vec![json!("pancakes"), json!("omelette"), json!("shortbread")],
            "{backend}"
        );
    }
}

#[tokio::test]
async fn contains_all_is_set_containment() {
    for (backend, store) in backends() {
        seed_recipes(store.as_ref()).await;

        let both = store
            .find_many("recipes", &Filter::contains_all("ingredients", ["butter", "flour"]))
            .await
            .unwrap();
        assert_eq!(both.len(), 1, "{backend}");
        assert_eq!(both[0]["name"], "shortbread", "{backend}");

        let eggs = store
            .find_many("recipes", &Filter::contains_all("ingredients", ["eggs", "eggs"]))
            .await
            .unwrap();
        assert_eq!(eggs.len(), 2, "{backend}");

        let none = store
            .find_many("recipes", &Filter::contains_all("ingredients", ["eggs", ""]))
            .await
            .unwrap();
        assert!(none.is_empty(), "{backend}");
    }
}

#[tokio::test]
async fn eq_finds_first_match_only() {
    for (backend, store) in backends() {
        seed_recipes(store.as_ref()).await;
        let hit = store
            .find_one("recipes", &Filter::eq("name", "omelette"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(hit["ingredients"], json!(["eggs", "butter", "salt"]), "{backend}");

        let miss = store
            .find_one("recipes", &Filter::eq("name", "Omelette"))
            .await
            .unwrap();
        assert!(miss.is_none(), "{backend}");
    }
}

#[tokio::test]
async fn update_merges_and_counts() {
    for (backend, store) in backends() {
        let ack = store
            .insert_one(
                "podcasts",
                doc(json!({ "title": "T", "author": "A", "tags": ["x", "y"] })),
            )
            .await
            .unwrap();
        let by_id = Filter::by_id(ack.inserted_id);

        let result = store
            .update_one("podcasts", &by_id, doc(json!({ "author": "X" })))
            .await
            .unwrap();
        assert_eq!((result.matched_count, result.modified_count), (1, 1), "{backend}");

        let stored = store.find_one("podcasts", &by_id).await.unwrap().unwrap();
        assert_eq!(stored["title"], "T", "{backend}");
        assert_eq!(stored["author"], "X", "{backend}");
        assert_eq!(stored["tags"], json!(["x", "y"]), "{backend}");

        let same = store
            .update_one("podcasts", &by_id, doc(json!({ "author": "X" })))
            .await
            .unwrap();
        assert_eq!((same.matched_count, same.modified_count), (1, 0), "{backend}");

        let empty = store
            .update_one("podcasts", &by_id, Document::new())
            .await
            .unwrap();
        assert_eq!((empty.matched_count, empty.modified_count), (1, 0), "{backend}");
    }
}

#[tokio::test]
async fn nil_id_matches_nothing() {
    for (backend, store) in backends() {
        store
            .insert_one("podcasts", doc(json!({ "title": "T" })))
            .await
            .unwrap();
        let nil = Filter::by_id(DocumentId::nil());

        let update = store
            .update_one("podcasts", &nil, doc(json!({ "title": "U" })))
            .await
            .unwrap();
        assert_eq!((update.matched_count, update.modified_count), (0, 0), "{backend}");

        let delete = store.delete_one("podcasts", &nil).await.unwrap();
        assert_eq!(delete.deleted_count, 0, "{backend}");
        assert_eq!(
            store.find_many("podcasts", &Filter::All).await.unwrap().len(),
            1,
            "{backend}"
        );
    }
}

#[tokio::test]
async fn delete_removes_one_document() {
    for (backend, store) in backends() {
        seed_recipes(store.as_ref()).await;
        let ack = store
            .delete_one("recipes", &Filter::contains_all("ingredients", ["eggs"]))
            .await
            .unwrap();
        assert_eq!(ack.deleted_count, 1, "{backend}");

        let left = store.find_many("recipes", &Filter::All).await.unwrap();
        assert_eq!(left.len(), 2, "{backend}");
        assert_eq!(left[0]["name"], "omelette", "{backend}");
    }
}

#[tokio::test]
async fn duplicate_ids_are_rejected() {
    for (backend, store) in backends() {
        let id = "0102030405060708090a0b0c";
        store
            .insert_one("podcasts", doc(json!({ "_id": id })))
            .await
            .unwrap();
        let err = store
            .insert_one("podcasts", doc(json!({ "_id": id })))
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::DuplicateKey { .. }), "{backend}: {err}");

        // The same id is fine in another collection.
        store
            .insert_one("episodes", doc(json!({ "_id": id })))
            .await
            .unwrap();
    }
}

#[tokio::test]
async fn sqlite_file_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("recipod.db");
    let path = path.to_str().unwrap();

    let id = {
        let store = SqliteStore::new(path).unwrap();
        store
            .insert_one("recipes", doc(json!({ "name": "toast", "ingredients": ["bread"] })))
            .await
            .unwrap()
            .inserted_id
    };

    let reopened = SqliteStore::new(path).unwrap();
    let found = reopened
        .find_one("recipes", &Filter::by_id(id))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found["name"], "toast");
}
