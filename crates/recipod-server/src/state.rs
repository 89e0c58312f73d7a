//! Application state shared by every handler.
//!
//! [`AppState`] holds collection handles over one long-lived store. There
//! is no lock here: each store call is atomic on its own, and handlers
//! never chain calls that would need one.

use std::sync::Arc;
use std::time::Duration;

use recipod_skill::IntentResolver;
use recipod_storage::{connect, Collection, DocumentStore, InMemoryStore, StorageError};

use crate::config::{ServerConfig, DEFAULT_STORE_TIMEOUT};

pub const RECIPES: &str = "recipes";
pub const PODCASTS: &str = "podcasts";
pub const EPISODES: &str = "episodes";

/// Shared application state for the HTTP server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Podcast records, each call bounded by the configured timeout.
    pub podcasts: Collection,
    /// Episode records. Declared alongside podcasts; no route uses them yet.
    pub episodes: Collection,
    /// Recipe skill. Its calls are bounded only by the request itself.
    pub skill: IntentResolver,
}

impl AppState {
    /// Builds state over an already-open store.
    pub fn new(store: Arc<dyn DocumentStore>, store_timeout: Duration) -> Self {
        AppState {
            podcasts: Collection::new(Arc::clone(&store), PODCASTS).with_timeout(store_timeout),
            episodes: Collection::new(Arc::clone(&store), EPISODES).with_timeout(store_timeout),
            skill: IntentResolver::new(Collection::new(store, RECIPES)),
        }
    }

    /// Connects to the configured store.
    pub fn from_config(config: &ServerConfig) -> Result<Self, StorageError> {
        let store = connect(&config.store_uri)?;
        Ok(Self::new(store, config.store_timeout))
    }

    /// Creates state over a fresh in-memory store (for testing).
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryStore::new()), DEFAULT_STORE_TIMEOUT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use recipod_storage::StoreUri;

    #[test]
    fn podcast_collections_are_bounded() {
        let config = ServerConfig {
            store_uri: StoreUri::SqliteMemory,
            port: 0,
            store_timeout: Duration::from_secs(4),
        };
        let state = AppState::from_config(&config).unwrap();
        assert_eq!(state.podcasts.name(), "podcasts");
        assert_eq!(state.podcasts.timeout(), Some(Duration::from_secs(4)));
        assert_eq!(state.episodes.name(), "episodes");
        assert_eq!(state.episodes.timeout(), Some(Duration::from_secs(4)));
    }
}
