//! Document store abstraction for recipod.
//!
//! Provides the [`DocumentStore`] trait defining the five store operations
//! the services rely on, the [`Collection`] handle the services actually
//! hold, and two backends: [`InMemoryStore`] and [`SqliteStore`].
//!
//! # Modules
//!
//! - [`error`]: StorageError enum with all failure modes
//! - [`types`]: insert/update/delete acknowledgments
//! - [`traits`]: DocumentStore trait definition
//! - [`collection`]: named, optionally time-bounded handle over a store
//! - [`idgen`]: store-side DocumentId allocation
//! - `merge`: `$set` merge shared by the backends
//! - [`memory`]: InMemoryStore implementation
//! - [`schema`]: SQL migrations and connection setup
//! - [`sqlite`]: SqliteStore implementation
//! - [`uri`]: connection-string parsing and backend selection

pub mod collection;
pub mod error;
pub mod idgen;
pub mod memory;
mod merge;
pub mod schema;
pub mod sqlite;
pub mod traits;
pub mod types;
pub mod uri;

// Re-export key types for ergonomic use.
pub use collection::Collection;
pub use error::StorageError;
pub use memory::InMemoryStore;
pub use sqlite::SqliteStore;
pub use traits::DocumentStore;
pub use types::{DeleteResult, InsertOneResult, UpdateResult};
pub use uri::{connect, StoreUri};
