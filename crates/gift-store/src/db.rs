//! Database connection management

use crate::config::StoreConfig;
use crate::errors::{from_rusqlite, Result};
use rusqlite::Connection;
use std::path::Path;

/// Open a SQLite database at the given path
pub fn open<P: AsRef<Path>>(path: P) -> Result<Connection> {
    Connection::open(path).map_err(from_rusqlite)
}

/// Open an in-memory SQLite database
pub fn open_in_memory() -> Result<Connection> {
    Connection::open_in_memory().map_err(from_rusqlite)
}

/// Open the database described by `config`
pub fn open_configured(config: &StoreConfig) -> Result<Connection> {
    match &config.path {
        Some(path) => open(path),
        None => open_in_memory(),
    }
}

/// Apply connection-level settings from `config`
///
/// Must run outside a transaction: SQLite ignores `foreign_keys` changes
/// inside one.
pub fn configure(conn: &Connection, config: &StoreConfig) -> Result<()> {
    conn.pragma_update(None, "foreign_keys", config.foreign_keys)
        .map_err(from_rusqlite)?;

    // In-memory databases always report "memory"
    let mode: String = conn
        .pragma_update_and_check(None, "journal_mode", config.journal_mode.as_str(), |row| {
            row.get(0)
        })
        .map_err(from_rusqlite)?;
    tracing::debug!(journal_mode = %mode, foreign_keys = config.foreign_keys, "connection configured");

    Ok(())
}
