//! `SQLite` schema definitions for the key-value store.
//!
//! Only the metadata table is created unconditionally; the entries table is
//! built up by the versioned steps in [`super::migrations`].

/// SQL statement to create the metadata table holding the schema version.
pub const CREATE_METADATA_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS metadata (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
)
";

/// Version 1: the key-value entries table.
pub const CREATE_ENTRIES_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS entries (
    key TEXT PRIMARY KEY NOT NULL,
    value BLOB NOT NULL,
    updated_at TEXT NOT NULL
)
";

/// Upsert an entry, replacing any previous value for the key.
pub const UPSERT_ENTRY: &str = r"
INSERT INTO entries (key, value, updated_at) VALUES (?1, ?2, ?3)
ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at
";

/// Statements run on every open, before migrations.
pub const SCHEMA_STATEMENTS: &[&str] = &[CREATE_METADATA_TABLE];
