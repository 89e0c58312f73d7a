//! In-memory implementation of [`DocumentStore`].
//!
//! [`InMemoryStore`] is a first-class backend for tests, demos, and the
//! `memory://` connection string. Each collection is an insertion-ordered
//! `IndexMap` keyed by [`DocumentId`], behind one async `RwLock`, so every
//! trait call is atomic with respect to the others.

use std::collections::HashMap;

use async_trait::async_trait;
use indexmap::IndexMap;
use tokio::sync::RwLock;

use recipod_core::{Document, DocumentId, Filter};

use crate::error::StorageError;
use crate::idgen::assign_id;
use crate::merge::apply_set;
use crate::traits::DocumentStore;
use crate::types::{DeleteResult, InsertOneResult, UpdateResult};

type StoredCollection = IndexMap<DocumentId, Document>;

/// In-memory implementation of [`DocumentStore`].
#[derive(Debug, Default)]
pub struct InMemoryStore {
    collections: RwLock<HashMap<String, StoredCollection>>,
}

impl InMemoryStore {
    /// Creates a new empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents in `collection`.
    pub async fn count(&self, collection: &str) -> usize {
        self.collections
            .read()
            .await
            .get(collection)
            .map_or(0, IndexMap::len)
    }
}

#[async_trait]
impl DocumentStore for InMemoryStore {
    async fn find_one(
        &self,
        collection: &str,
        filter: &Filter,
    ) -> Result<Option<Document>, StorageError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .and_then(|docs| docs.values().find(|doc| filter.matches(doc)).cloned()))
    }

    async fn find_many(
        &self,
        collection: &str,
        filter: &Filter,
    ) -> Result<Vec<Document>, StorageError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .map(|docs| {
                docs.values()
                    .filter(|doc| filter.matches(doc))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn insert_one(
        &self,
        collection: &str,
        mut doc: Document,
    ) -> Result<InsertOneResult, StorageError> {
        let id = assign_id(&mut doc)?;
        let mut collections = self.collections.write().await;
        let docs = collections.entry(collection.to_string()).or_default();
        if docs.contains_key(&id) {
            return Err(StorageError::DuplicateKey {
                collection: collection.to_string(),
                id: id.to_string(),
            });
        }
        docs.insert(id, doc);
        Ok(InsertOneResult { inserted_id: id })
    }

    async fn update_one(
        &self,
        collection: &str,
        filter: &Filter,
        set: Document,
    ) -> Result<UpdateResult, StorageError> {
        let mut collections = self.collections.write().await;
        let Some(doc) = collections
            .get_mut(collection)
            .and_then(|docs| docs.values_mut().find(|doc| filter.matches(doc)))
        else {
            return Ok(UpdateResult::default());
        };

        let changed = apply_set(doc, &set)?;
        Ok(UpdateResult {
            matched_count: 1,
            modified_count: u64::from(changed),
        })
    }

    async fn delete_one(
        &self,
        collection: &str,
        filter: &Filter,
    ) -> Result<DeleteResult, StorageError> {
        let mut collections = self.collections.write().await;
        let Some(docs) = collections.get_mut(collection) else {
            return Ok(DeleteResult::default());
        };
        let Some(index) = docs.values().position(|doc| filter.matches(doc)) else {
            return Ok(DeleteResult::default());
        };
        // shift_remove keeps the remaining documents in insertion order
        docs.shift_remove_index(index);
        Ok(DeleteResult { deleted_count: 1 })
    }
}
