//! The [`DocumentStore`] trait defining the storage contract.
//!
//! Every method is a single atomic round-trip against one named collection.
//! Backends (InMemoryStore, SqliteStore, test fakes) implement this trait
//! and are swappable behind `Arc<dyn DocumentStore>`.

use async_trait::async_trait;

use recipod_core::{Document, Filter};

use crate::error::StorageError;
use crate::types::{DeleteResult, InsertOneResult, UpdateResult};

/// The storage contract for JSON document collections.
///
/// Results come back in insertion order. Collections spring into existence
/// on first insert; querying an unknown collection yields nothing.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Returns the first document matching `filter`, if any.
    async fn find_one(
        &self,
        collection: &str,
        filter: &Filter,
    ) -> Result<Option<Document>, StorageError>;

    /// Returns every document matching `filter`.
    async fn find_many(
        &self,
        collection: &str,
        filter: &Filter,
    ) -> Result<Vec<Document>, StorageError>;

    /// Inserts a document.
    ///
    /// A document without `_id` gets a freshly allocated one. An `_id`
    /// already present in the collection fails with
    /// [`StorageError::DuplicateKey`].
    async fn insert_one(
        &self,
        collection: &str,
        doc: Document,
    ) -> Result<InsertOneResult, StorageError>;

    /// Sets the fields of `set` on the first document matching `filter`.
    ///
    /// Fields not named in `set` are left untouched. An empty `set` matches
    /// without modifying anything.
    async fn update_one(
        &self,
        collection: &str,
        filter: &Filter,
        set: Document,
    ) -> Result<UpdateResult, StorageError>;

    /// Removes the first document matching `filter`.
    async fn delete_one(
        &self,
        collection: &str,
        filter: &Filter,
    ) -> Result<DeleteResult, StorageError>;
}
