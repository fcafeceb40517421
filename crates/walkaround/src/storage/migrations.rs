//! Database migration system for the key-value store.
//!
//! Each schema version is a numbered step; opening a database applies every
//! step above the stored version, in order.

use rusqlite::Connection;

use crate::error::{Error, Result};

use super::schema::{CREATE_ENTRIES_TABLE, SCHEMA_STATEMENTS};

/// The current schema version.
pub const CURRENT_VERSION: i32 = 1;

/// Key used to store the schema version in the metadata table.
const VERSION_KEY: &str = "schema_version";

/// Initialize the database schema.
///
/// Creates the metadata table if needed, then runs any pending migrations
/// to bring the schema up to [`CURRENT_VERSION`].
///
/// # Errors
///
/// Returns an error if schema creation or migration fails, or if the
/// database was written by a newer version of walkaround.
pub fn initialize_schema(conn: &Connection) -> Result<()> {
    for statement in SCHEMA_STATEMENTS {
        conn.execute(statement, [])?;
    }

    let version = get_schema_version(conn)?;
    if version > CURRENT_VERSION {
        return Err(Error::DatabaseMigration {
            message: format!(
                "database schema version {version} is newer than supported version {CURRENT_VERSION}"
            ),
        });
    }

    for next in (version + 1)..=CURRENT_VERSION {
        run_migration(conn, next)?;
        set_schema_version(conn, next)?;
    }

    Ok(())
}

/// Get the schema version stored in the database, 0 for a fresh database.
fn get_schema_version(conn: &Connection) -> Result<i32> {
    let result: std::result::Result<String, rusqlite::Error> = conn.query_row(
        "SELECT value FROM metadata WHERE key = ?1",
        [VERSION_KEY],
        |row| row.get(0),
    );

    match result {
        Ok(value) => value.parse().map_err(|_| Error::DatabaseMigration {
            message: format!("invalid schema version: {value}"),
        }),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(0),
        Err(e) => Err(e.into()),
    }
}

fn set_schema_version(conn: &Connection, version: i32) -> Result<()> {
    conn.execute(
        "INSERT OR REPLACE INTO metadata (key, value) VALUES (?1, ?2)",
        (VERSION_KEY, version.to_string()),
    )?;
    Ok(())
}

fn run_migration(conn: &Connection, version: i32) -> Result<()> {
    let statement = match version {
        1 => CREATE_ENTRIES_TABLE,
        _ => {
            return Err(Error::DatabaseMigration {
                message: format!("unknown migration version: {version}"),
            })
        }
    };
    conn.execute(statement, [])?;
    Ok(())
}
