//! SQLite implementation of [`DocumentStore`].
//!
//! [`SqliteStore`] keeps every collection in one `documents` table with the
//! JSON body in a TEXT column. Filters are translated to SQL over SQLite's
//! JSON functions, so queries run inside the database rather than after a
//! full scan. `rusqlite` is blocking; each call runs on the blocking pool.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rusqlite::types::Value as SqlValue;
use rusqlite::{params, params_from_iter, Connection, ErrorCode, OptionalExtension};
use serde_json::Value;

use recipod_core::{Document, Filter, ID_FIELD};

use crate::error::StorageError;
use crate::idgen::assign_id;
use crate::merge::apply_set;
use crate::traits::DocumentStore;
use crate::types::{DeleteResult, InsertOneResult, UpdateResult};

/// SQLite-backed implementation of [`DocumentStore`].
///
/// Writes that read before they modify (`update_one`) run in a transaction.
#[derive(Clone)]
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    /// Opens (or creates) a SQLite database at `path`.
    pub fn new(path: &str) -> Result<Self, StorageError> {
        let conn = crate::schema::open_database(path)?;
        Ok(Self::from_connection(conn))
    }

    /// Opens a private in-memory SQLite database.
    pub fn in_memory() -> Result<Self, StorageError> {
        let conn = crate::schema::open_in_memory()?;
        Ok(Self::from_connection(conn))
    }

    fn from_connection(conn: Connection) -> Self {
        SqliteStore {
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    /// Runs `f` against the connection on the blocking thread pool.
    async fn with_conn<T, F>(&self, f: F) -> Result<T, StorageError>
    where
        F: FnOnce(&mut Connection) -> Result<T, StorageError> + Send + 'static,
        T: Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let mut guard = conn
                .lock()
                .map_err(|_| StorageError::Unavailable("sqlite connection lock poisoned".into()))?;
            f(&mut *guard)
        })
        .await
        .map_err(|e| StorageError::TaskFailed(e.to_string()))?
    }
}

// ---------------------------------------------------------------------------
// Filter translation
// ---------------------------------------------------------------------------

/// A WHERE fragment with its positional `?` parameters.
struct Clause {
    sql: String,
    params: Vec<SqlValue>,
}

/// JSON path addressing a top-level field, quoted so any key is safe.
fn json_path(field: &str) -> String {
    format!("$.\"{}\"", field.replace('"', "\\\""))
}

/// Converts a scalar JSON value into the SQL value `json_extract` yields
/// for it.
fn scalar_to_sql(value: &Value) -> Result<SqlValue, StorageError> {
    match value {
        Value::String(s) => Ok(SqlValue::Text(s.clone())),
        Value::Bool(b) => Ok(SqlValue::Integer(i64::from(*b))),
        Value::Number(n) => match (n.as_i64(), n.as_f64()) {
            (Some(i), _) => Ok(SqlValue::Integer(i)),
            (None, Some(f)) => Ok(SqlValue::Real(f)),
            _ => Err(StorageError::UnsupportedFilter {
                reason: format!("number out of range: {n}"),
            }),
        },
        Value::Null | Value::Array(_) | Value::Object(_) => Err(StorageError::UnsupportedFilter {
            reason: format!("only scalar values can be compared, got {value}"),
        }),
    }
}

fn translate(filter: &Filter) -> Result<Clause, StorageError> {
    match filter {
        Filter::All => Ok(Clause {
            sql: "1 = 1".into(),
            params: Vec::new(),
        }),
        // `_id` lives in its own indexed column.
        Filter::Eq { field, value } if field == ID_FIELD => match value {
            Value::String(hex) => Ok(Clause {
                sql: "id = ?".into(),
                params: vec![SqlValue::Text(hex.clone())],
            }),
            _ => Ok(Clause {
                sql: "0 = 1".into(),
                params: Vec::new(),
            }),
        },
        Filter::Eq { field, value } => Ok(Clause {
            sql: "(json_type(body, ?) NOT IN ('array', 'object') AND json_extract(body, ?) = ?)"
                .into(),
            params: vec![
                SqlValue::Text(json_path(field)),
                SqlValue::Text(json_path(field)),
                scalar_to_sql(value)?,
            ],
        }),
        Filter::ContainsAll { field, values } => {
            let path = json_path(field);
            let mut sql = String::from("json_type(body, ?) = 'array'");
            let mut params = vec![SqlValue::Text(path.clone())];
            for value in values {
                sql.push_str(
                    " AND EXISTS (SELECT 1 FROM json_each(body, ?) AS item \
                     WHERE item.type NOT IN ('array', 'object') AND item.value = ?)",
                );
                params.push(SqlValue::Text(path.clone()));
                params.push(scalar_to_sql(value)?);
            }
            Ok(Clause { sql, params })
        }
    }
}

/// Builds `collection = ? AND (<filter>)` with the collection as the first
/// parameter.
fn scoped(collection: &str, filter: &Filter) -> Result<Clause, StorageError> {
    let inner = translate(filter)?;
    let mut params = Vec::with_capacity(inner.params.len() + 1);
    params.push(SqlValue::Text(collection.to_string()));
    params.extend(inner.params);
    Ok(Clause {
        sql: format!("collection = ? AND ({})", inner.sql),
        params,
    })
}

fn parse_body(body: &str) -> Result<Document, StorageError> {
    Ok(serde_json::from_str(body)?)
}

fn is_constraint_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _) if e.code == ErrorCode::ConstraintViolation
    )
}

#[async_trait]
impl DocumentStore for SqliteStore {
    async fn find_one(
        &self,
        collection: &str,
        filter: &Filter,
    ) -> Result<Option<Document>, StorageError> {
        let clause = scoped(collection, filter)?;
        self.with_conn(move |conn| {
            let sql = format!(
                "SELECT body FROM documents WHERE {} ORDER BY seq LIMIT 1",
                clause.sql
            );
            let body: Option<String> = conn
                .query_row(&sql, params_from_iter(clause.params), |row| row.get(0))
                .optional()?;
            body.as_deref().map(parse_body).transpose()
        })
        .await
    }

    async fn find_many(
        &self,
        collection: &str,
        filter: &Filter,
    ) -> Result<Vec<Document>, StorageError> {
        let clause = scoped(collection, filter)?;
        self.with_conn(move |conn| {
            let sql = format!("SELECT body FROM documents WHERE {} ORDER BY seq", clause.sql);
            let mut stmt = conn.prepare(&sql)?;
            let bodies = stmt
                .query_map(params_from_iter(clause.params), |row| row.get::<_, String>(0))?
                .collect::<Result<Vec<_>, _>>()?;
            bodies.iter().map(|body| parse_body(body)).collect()
        })
        .await
    }

    async fn insert_one(
        &self,
        collection: &str,
        mut doc: Document,
    ) -> Result<InsertOneResult, StorageError> {
        let id = assign_id(&mut doc)?;
        let body = serde_json::to_string(&doc)?;
        let collection = collection.to_string();
        self.with_conn(move |conn| {
            match conn.execute(
                "INSERT INTO documents (collection, id, body) VALUES (?1, ?2, ?3)",
                params![collection, id.to_string(), body],
            ) {
                Ok(_) => Ok(InsertOneResult { inserted_id: id }),
                Err(e) if is_constraint_violation(&e) => Err(StorageError::DuplicateKey {
                    collection,
                    id: id.to_string(),
                }),
                Err(e) => Err(e.into()),
            }
        })
        .await
    }

    async fn update_one(
        &self,
        collection: &str,
        filter: &Filter,
        set: Document,
    ) -> Result<UpdateResult, StorageError> {
        let clause = scoped(collection, filter)?;
        self.with_conn(move |conn| {
            let tx = conn.transaction()?;
            let sql = format!(
                "SELECT seq, body FROM documents WHERE {} ORDER BY seq LIMIT 1",
                clause.sql
            );
            let found: Option<(i64, String)> = tx
                .query_row(&sql, params_from_iter(clause.params), |row| {
                    Ok((row.get(0)?, row.get(1)?))
                })
                .optional()?;
            let Some((seq, body)) = found else {
                return Ok(UpdateResult::default());
            };

            let mut doc = parse_body(&body)?;
            let changed = apply_set(&mut doc, &set)?;
            if changed {
                tx.execute(
                    "UPDATE documents SET body = ?1 WHERE seq = ?2",
                    params![serde_json::to_string(&doc)?, seq],
                )?;
            }
            tx.commit()?;
            Ok(UpdateResult {
                matched_count: 1,
                modified_count: u64::from(changed),
            })
        })
        .await
    }

    async fn delete_one(
        &self,
        collection: &str,
        filter: &Filter,
    ) -> Result<DeleteResult, StorageError> {
        let clause = scoped(collection, filter)?;
        self.with_conn(move |conn| {
            let sql = format!(
                "DELETE FROM documents WHERE seq = \
                 (SELECT seq FROM documents WHERE {} ORDER BY seq LIMIT 1)",
                clause.sql
            );
            let deleted = conn.execute(&sql, params_from_iter(clause.params))?;
            Ok(DeleteResult {
                deleted_count: deleted as u64,
            })
        })
        .await
    }
}
