//! Durable key-value storage for walkaround.
//!
//! The record collection is kept as one opaque blob under a single key, so
//! the storage layer only needs whole-value `get`/`put`/`remove`. The
//! [`KeyValueStore`] trait is that contract; [`SqliteStore`] is the durable
//! implementation and [`MemoryStore`] an in-process one.

mod memory;
pub mod migrations;
pub mod schema;

use std::path::{Path, PathBuf};

use chrono::Utc;
use rusqlite::{Connection, OptionalExtension};
use tracing::{debug, info};

use crate::error::{Error, Result};

pub use memory::MemoryStore;

/// A store of opaque byte values addressed by string keys.
///
/// `put` always replaces the whole value; there are no partial writes.
pub trait KeyValueStore {
    /// Read the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Store `value` under `key`, overwriting any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be written.
    fn put(&self, key: &str, value: &[u8]) -> Result<()>;

    /// Remove the value under `key`, returning whether one existed.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be written.
    fn remove(&self, key: &str) -> Result<bool>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        (**self).get(key)
    }

    fn put(&self, key: &str, value: &[u8]) -> Result<()> {
        (**self).put(key, value)
    }

    fn remove(&self, key: &str) -> Result<bool> {
        (**self).remove(key)
    }
}

/// `SQLite`-backed key-value store.
#[derive(Debug)]
pub struct SqliteStore {
    /// Path to the database file.
    path: PathBuf,
    /// Database connection.
    conn: Connection,
}

impl SqliteStore {
    /// Open or create a store database at the given path.
    ///
    /// Creates the parent directories and database file if they don't exist,
    /// then brings the schema up to date.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or schema initialization fails.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreate {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        debug!("Opening database at {}", path.display());
        let conn = Connection::open(&path).map_err(|source| Error::DatabaseOpen {
            path: path.clone(),
            source,
        })?;

        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL;")?;
        migrations::initialize_schema(&conn)?;

        info!("Database opened at {}", path.display());
        Ok(Self { path, conn })
    }

    /// Create an in-memory store, mostly for tests.
    ///
    /// # Errors
    ///
    /// Returns an error if the in-memory database cannot be created.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|source| Error::DatabaseOpen {
            path: PathBuf::from(":memory:"),
            source,
        })?;

        migrations::initialize_schema(&conn)?;

        Ok(Self {
            path: PathBuf::from(":memory:"),
            conn,
        })
    }

    /// Get the path to the database file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get database statistics.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn stats(&self) -> Result<StorageStats> {
        let entries: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM entries", [], |row| row.get(0))?;

        let db_size_bytes = if self.path.to_string_lossy() == ":memory:" {
            0
        } else {
            std::fs::metadata(&self.path).map(|m| m.len()).unwrap_or(0)
        };

        Ok(StorageStats {
            entries,
            db_size_bytes,
        })
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let value = self
            .conn
            .query_row("SELECT value FROM entries WHERE key = ?1", [key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value)
    }

    fn put(&self, key: &str, value: &[u8]) -> Result<()> {
        self.conn.execute(
            schema::UPSERT_ENTRY,
            (key, value, Utc::now().to_rfc3339()),
        )?;
        debug!("Wrote {} bytes under key {}", value.len(), key);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<bool> {
        let affected = self
            .conn
            .execute("DELETE FROM entries WHERE key = ?1", [key])?;
        Ok(affected > 0)
    }
}

/// Statistics about the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageStats {
    /// Number of keys stored.
    pub entries: i64,
    /// Size of the database file in bytes.
    pub db_size_bytes: u64,
}
