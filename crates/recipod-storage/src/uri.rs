//! Store connection strings.
//!
//! | URI | Backend |
//! |---|---|
//! | `memory://` | [`InMemoryStore`], lives as long as the process |
//! | `sqlite::memory:` | private in-memory SQLite database |
//! | `sqlite://<path>` | SQLite database file at `<path>` (created if missing) |

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::error::StorageError;
use crate::memory::InMemoryStore;
use crate::sqlite::SqliteStore;
use crate::traits::DocumentStore;

const MEMORY: &str = "memory://";
const SQLITE_MEMORY: &str = "sqlite::memory:";
const SQLITE_PREFIX: &str = "sqlite://";

/// A parsed store connection string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreUri {
    Memory,
    SqliteMemory,
    SqliteFile(String),
}

impl StoreUri {
    pub fn parse(input: &str) -> Result<Self, StorageError> {
        let invalid = |reason: &str| StorageError::InvalidUri {
            uri: input.to_string(),
            reason: reason.to_string(),
        };
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(invalid("empty connection string"));
        }
        if trimmed == MEMORY {
            return Ok(StoreUri::Memory);
        }
        if trimmed == SQLITE_MEMORY {
            return Ok(StoreUri::SqliteMemory);
        }
        match trimmed.strip_prefix(SQLITE_PREFIX) {
            Some("") => Err(invalid("missing database path")),
            Some(path) => Ok(StoreUri::SqliteFile(path.to_string())),
            None => Err(invalid(
                "expected memory://, sqlite::memory: or sqlite://<path>",
            )),
        }
    }
}

impl FromStr for StoreUri {
    type Err = StorageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StoreUri::parse(s)
    }
}

impl fmt::Display for StoreUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreUri::Memory => f.write_str(MEMORY),
            StoreUri::SqliteMemory => f.write_str(SQLITE_MEMORY),
            StoreUri::SqliteFile(path) => write!(f, "{SQLITE_PREFIX}{path}"),
        }
    }
}

/// Opens the backend a connection string names.
pub fn connect(uri: &StoreUri) -> Result<Arc<dyn DocumentStore>, StorageError> {
    let store: Arc<dyn DocumentStore> = match uri {
        StoreUri::Memory => Arc::new(InMemoryStore::new()),
        StoreUri::SqliteMemory => Arc::new(SqliteStore::in_memory()?),
        StoreUri::SqliteFile(path) => Arc::new(SqliteStore::new(path)?),
    };
    tracing::info!(%uri, "document store connected");
    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_schemes() {
        assert_eq!(StoreUri::parse("memory://").unwrap(), StoreUri::Memory);
        assert_eq!(
            StoreUri::parse("sqlite::memory:").unwrap(),
            StoreUri::SqliteMemory
        );
        assert_eq!(
            StoreUri::parse("sqlite:///var/lib/recipod.db").unwrap(),
            StoreUri::SqliteFile("/var/lib/recipod.db".into())
        );
        assert_eq!(
            StoreUri::parse("sqlite://data.db").unwrap(),
            StoreUri::SqliteFile("data.db".into())
        );
    }

    #[test]
    fn rejects_empty_and_foreign_uris() {
        for bad in ["", "   ", "sqlite://", "mongodb+srv://cluster0.example.net", "data.db"] {
            assert!(
                matches!(StoreUri::parse(bad), Err(StorageError::InvalidUri { .. })),
                "accepted {bad:?}"
            );
        }
    }

    #[test]
    fn display_round_trips() {
        for uri in ["memory://", "sqlite::memory:", "sqlite://x.db"] {
            assert_eq!(StoreUri::parse(uri).unwrap().to_string(), uri);
        }
    }
}
