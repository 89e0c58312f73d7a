//! [`Collection`]: the store handle services hold.
//!
//! A collection pairs a shared [`DocumentStore`] with a collection name and
//! an optional per-call time bound. When the bound elapses the call fails
//! with [`StorageError::Timeout`] instead of waiting on the backend.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;

use recipod_core::{from_document, to_document, Document, Filter};

use crate::error::StorageError;
use crate::traits::DocumentStore;
use crate::types::{DeleteResult, InsertOneResult, UpdateResult};

/// A named collection inside a shared store. Cheap to clone.
#[derive(Clone)]
pub struct Collection {
    store: Arc<dyn DocumentStore>,
    name: Arc<str>,
    timeout: Option<Duration>,
}

impl std::fmt::Debug for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Collection")
            .field("name", &self.name)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl Collection {
    /// An unbounded handle on `name`.
    pub fn new(store: Arc<dyn DocumentStore>, name: impl Into<Arc<str>>) -> Self {
        Collection {
            store,
            name: name.into(),
            timeout: None,
        }
    }

    /// Bounds every call on this handle by `limit`.
    pub fn with_timeout(mut self, limit: Duration) -> Self {
        self.timeout = Some(limit);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    async fn bounded<T, F>(&self, op: &'static str, call: F) -> Result<T, StorageError>
    where
        F: Future<Output = Result<T, StorageError>>,
    {
        tracing::debug!(collection = %self.name, op, "store call");
        match self.timeout {
            Some(limit) => tokio::time::timeout(limit, call)
                .await
                .map_err(|_| StorageError::Timeout { after: limit })?,
            None => call.await,
        }
    }

    pub async fn find_one(&self, filter: &Filter) -> Result<Option<Document>, StorageError> {
        self.bounded("find_one", self.store.find_one(&self.name, filter))
            .await
    }

    pub async fn find_many(&self, filter: &Filter) -> Result<Vec<Document>, StorageError> {
        self.bounded("find_many", self.store.find_many(&self.name, filter))
            .await
    }

    pub async fn insert_one(&self, doc: Document) -> Result<InsertOneResult, StorageError> {
        self.bounded("insert_one", self.store.insert_one(&self.name, doc))
            .await
    }

    pub async fn update_one(
        &self,
        filter: &Filter,
        set: Document,
    ) -> Result<UpdateResult, StorageError> {
        self.bounded("update_one", self.store.update_one(&self.name, filter, set))
            .await
    }

    pub async fn delete_one(&self, filter: &Filter) -> Result<DeleteResult, StorageError> {
        self.bounded("delete_one", self.store.delete_one(&self.name, filter))
            .await
    }

    /// [`find_one`](Self::find_one), decoded into `T`.
    pub async fn find_one_as<T: DeserializeOwned>(
        &self,
        filter: &Filter,
    ) -> Result<Option<T>, StorageError> {
        match self.find_one(filter).await? {
            Some(doc) => Ok(Some(from_document(doc)?)),
            None => Ok(None),
        }
    }

    /// [`find_many`](Self::find_many), decoded into `T`.
    pub async fn find_many_as<T: DeserializeOwned>(
        &self,
        filter: &Filter,
    ) -> Result<Vec<T>, StorageError> {
        self.find_many(filter)
            .await?
            .into_iter()
            .map(|doc| from_document(doc).map_err(StorageError::from))
            .collect()
    }

    /// Serializes `value` and inserts it.
    pub async fn insert_as<T: Serialize>(
        &self,
        value: &T,
    ) -> Result<InsertOneResult, StorageError> {
        self.insert_one(to_document(value)?).await
    }
}
