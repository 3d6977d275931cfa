//! Subcommands and the store options they share

use clap::Args;
use gift_store::config::StoreConfig;
use gift_store::PersistenceContext;
use std::path::PathBuf;

pub mod member;
pub mod product;
pub mod wish;

/// Database used when neither the config file, `GIFT_DB_PATH` nor `--db`
/// names one
pub const DEFAULT_DB_PATH: &str = "gift.db";

#[derive(Debug, Args)]
pub struct StoreOptions {
    /// TOML store configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Database file (overrides the config file and GIFT_DB_PATH)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,
}

impl StoreOptions {
    /// Effective store configuration
    pub fn resolve(&self) -> Result<StoreConfig, Box<dyn std::error::Error>> {
        let base = match &self.config {
            Some(path) => StoreConfig::load(path)?,
            None => StoreConfig::default(),
        };
        let mut config = base
            .with_env_overrides()
            .with_path_override(self.db.clone());
        if config.path.is_none() {
            config.path = Some(PathBuf::from(DEFAULT_DB_PATH));
        }
        Ok(config)
    }

    /// Open a persistence context over the effective configuration
    pub fn open(&self) -> Result<PersistenceContext, Box<dyn std::error::Error>> {
        Ok(PersistenceContext::open(&self.resolve()?)?)
    }
}
