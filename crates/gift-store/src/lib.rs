//! Gift Store - SQLite persistence for members, products and wishes
//!
//! Provides:
//! - Connection management and `StoreConfig`
//! - Embedded SQL migrations with checksums
//! - `PersistenceContext`: unit of work with an identity map
//! - Repositories with lookup, listing and relation fetch queries

pub mod config;
pub mod context;
pub mod db;
pub mod entity;
pub mod errors;
pub mod migrations;
pub mod repo;

// Re-export key types
pub use config::{JournalMode, StoreConfig};
pub use context::PersistenceContext;
pub use entity::Entity;
pub use errors::Result;
pub use repo::{MemberRepository, ProductRepository, Repository, SqliteRepository, WishRepository};
