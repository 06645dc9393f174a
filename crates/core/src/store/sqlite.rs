//! SQLite-backed movie document store.
//!
//! Movies are stored as JSON documents, one row each; rowid order is
//! insertion order, which is the order unsorted queries expose. The
//! genre/title filters are regexes and cannot be pushed into SQL, so list
//! queries scan documents in storage order and run the shared pipeline.

use std::path::Path;
use std::sync::Mutex;

use rusqlite::{params, Connection};

use super::{run_query, MovieStore, StoreError, StoredMovie};
use crate::query::QuerySpec;

/// SQLite-backed movie store.
pub struct SqliteMovieStore {
    conn: Mutex<Connection>,
}

impl SqliteMovieStore {
    /// Open a movie store, creating the database file and table if needed.
    pub fn new(path: &Path) -> Result<Self, StoreError> {
        let conn = Connection::open(path).map_err(|e| StoreError::Database(e.to_string()))?;
        Self::initialize_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Create an in-memory movie store (useful for testing).
    pub fn in_memory() -> Result<Self, StoreError> {
        let conn =
            Connection::open_in_memory().map_err(|e| StoreError::Database(e.to_string()))?;
        Self::initialize_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn initialize_schema(conn: &Connection) -> Result<(), StoreError> {
        conn.execute_batch(
            r#"
            -- One JSON document per movie; seq preserves insertion order
            CREATE TABLE IF NOT EXISTS movies (
                seq INTEGER PRIMARY KEY AUTOINCREMENT,
                id INTEGER NOT NULL UNIQUE,
                doc TEXT NOT NULL
            );
            "#,
        )
        .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(())
    }

    fn decode(doc: &str) -> Result<StoredMovie, StoreError> {
        serde_json::from_str(doc).map_err(|e| StoreError::Corrupt(e.to_string()))
    }
}

impl MovieStore for SqliteMovieStore {
    fn count(&self) -> Result<u64, StoreError> {
        let conn = self.conn.lock().unwrap();
        conn.query_row("SELECT COUNT(*) FROM movies", [], |row| row.get(0))
            .map_err(|e| StoreError::Database(e.to_string()))
    }

    fn find_by_id(&self, id: i64) -> Result<Option<StoredMovie>, StoreError> {
        let conn = self.conn.lock().unwrap();
        let doc: Option<String> = conn
            .query_row("SELECT doc FROM movies WHERE id = ?", params![id], |row| {
                row.get(0)
            })
            .map(Some)
            .or_else(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => Ok(None),
                _ => Err(StoreError::Database(e.to_string())),
            })?;

        doc.as_deref().map(Self::decode).transpose()
    }

    fn query(&self, spec: &QuerySpec) -> Result<Vec<StoredMovie>, StoreError> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn
            .prepare("SELECT doc FROM movies ORDER BY seq")
            .map_err(|e| StoreError::Database(e.to_string()))?;
        let rows = stmt
            .query_map([], |row| row.get::<_, String>(0))
            .map_err(|e| StoreError::Database(e.to_string()))?;

        run_query(
            spec,
            rows.map(|row| {
                row.map_err(|e| StoreError::Database(e.to_string()))
                    .and_then(|doc| Self::decode(&doc))
            }),
        )
    }

    fn insert(&self, movies: &[StoredMovie]) -> Result<u32, StoreError> {
        let conn = self.conn.lock().unwrap();
        let mut added = 0;
        for movie in movies {
            let doc =
                serde_json::to_string(movie).map_err(|e| StoreError::Corrupt(e.to_string()))?;
            let changed = conn
                .execute(
                    "INSERT OR IGNORE INTO movies (id, doc) VALUES (?, ?)",
                    params![movie.id, doc],
                )
                .map_err(|e| StoreError::Database(e.to_string()))?;
            added += changed as u32;
        }
        Ok(added)
    }
}
