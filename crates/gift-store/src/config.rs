//! Store configuration
//!
//! Loaded from a TOML file such as:
//!
//! ```toml
//! path = "gift.db"
//! journal_mode = "WAL"
//! foreign_keys = true
//! ```
//!
//! Every key is optional. Without `path` the store lives in memory.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::errors::{config_error, io_error, Result};

/// Environment variable that overrides the configured database path
pub const ENV_DB_PATH: &str = "GIFT_DB_PATH";

/// SQLite journal mode applied when a connection is configured
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum JournalMode {
    Delete,
    Truncate,
    Persist,
    Memory,
    #[default]
    Wal,
    Off,
}

impl JournalMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            JournalMode::Delete => "DELETE",
            JournalMode::Truncate => "TRUNCATE",
            JournalMode::Persist => "PERSIST",
            JournalMode::Memory => "MEMORY",
            JournalMode::Wal => "WAL",
            JournalMode::Off => "OFF",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreConfig {
    /// Database file; `None` opens an in-memory database
    pub path: Option<PathBuf>,
    pub journal_mode: JournalMode,
    pub foreign_keys: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: None,
            journal_mode: JournalMode::default(),
            foreign_keys: true,
        }
    }
}

impl StoreConfig {
    /// In-memory database with default settings
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// File-backed database with default settings
    pub fn at_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            ..Self::default()
        }
    }

    /// Parse a TOML document
    ///
    /// # Errors
    /// * `Config` - if the document is malformed or has unknown keys
    pub fn from_toml_str(source: &str) -> Result<Self> {
        toml::from_str(source).map_err(|e| config_error(e.to_string()))
    }

    /// Read and parse a TOML file
    ///
    /// # Errors
    /// * `Io` - if the file cannot be read
    /// * `Config` - if its contents are invalid
    pub fn load(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path).map_err(|e| io_error("load_config", e))?;
        Self::from_toml_str(&source)
    }

    /// Replace the database path when an override is present
    pub fn with_path_override(mut self, path: Option<PathBuf>) -> Self {
        if let Some(path) = path {
            self.path = Some(path);
        }
        self
    }

    /// Apply `GIFT_DB_PATH` if it is set
    pub fn with_env_overrides(self) -> Self {
        let path = std::env::var_os(ENV_DB_PATH).map(PathBuf::from);
        self.with_path_override(path)
    }
}
