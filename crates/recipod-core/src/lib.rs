//! Data model shared by the recipe skill and the podcast API.
//!
//! Entities are plain serde structs. The store sees them as JSON
//! [`Document`]s keyed by an opaque [`DocumentId`], and queries are
//! expressed with [`Filter`].

pub mod document;
pub mod episode;
pub mod error;
pub mod filter;
pub mod id;
pub mod podcast;
pub mod recipe;

// Re-export commonly used types
pub use document::{from_document, to_document, Document, ID_FIELD};
pub use episode::Episode;
pub use error::CoreError;
pub use filter::Filter;
pub use id::DocumentId;
pub use podcast::{Podcast, PodcastPatch};
pub use recipe::Recipe;
