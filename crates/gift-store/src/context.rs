//! Persistence context: one connection, one open transaction, one identity map
//!
//! Opening a context configures the connection, applies migrations and
//! begins a transaction. Writes go to the database immediately (identity
//! columns are assigned by SQLite) but only become durable on `flush`.
//! Dropping a context without flushing rolls the open transaction back.

#![allow(clippy::result_large_err)]

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use gift_core::errors::{ExError, ExErrorKind};
use gift_core::{EntityId, Member, MemberId, Product, ProductId, Wish, WishId};
use rusqlite::Connection;

use crate::config::StoreConfig;
use crate::db;
use crate::entity::Entity;
use crate::errors::{from_rusqlite, Result};
use crate::migrations::apply_migrations;

/// Entities managed by a context, keyed by identity
///
/// A managed entity is returned by later lookups of the same identity
/// without touching the database.
#[derive(Debug, Default)]
pub struct IdentityMap {
    pub(crate) members: HashMap<MemberId, Member>,
    pub(crate) products: HashMap<ProductId, Product>,
    pub(crate) wishes: HashMap<WishId, Wish>,
}

impl IdentityMap {
    pub fn len(&self) -> usize {
        self.members.len() + self.products.len() + self.wishes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn clear(&mut self) {
        self.members.clear();
        self.products.clear();
        self.wishes.clear();
    }
}

/// Unit of work over a SQLite connection
pub struct PersistenceContext {
    conn: Connection,
    identity_map: RefCell<IdentityMap>,
    statements: Cell<u64>,
}

impl PersistenceContext {
    /// Open the database described by `config`
    pub fn open(config: &StoreConfig) -> Result<Self> {
        let conn = db::open_configured(config)?;
        db::configure(&conn, config)?;
        Self::with_connection(conn)
    }

    /// Open a fresh in-memory database with default settings
    pub fn open_in_memory() -> Result<Self> {
        Self::open(&StoreConfig::in_memory())
    }

    /// Wrap an already configured connection
    ///
    /// Applies pending migrations, then begins the context transaction.
    pub fn with_connection(mut conn: Connection) -> Result<Self> {
        apply_migrations(&mut conn)?;
        conn.execute_batch("BEGIN").map_err(from_rusqlite)?;
        tracing::debug!("persistence context opened");

        Ok(Self {
            conn,
            identity_map: RefCell::new(IdentityMap::default()),
            statements: Cell::new(0),
        })
    }

    /// Insert a new entity and start managing it
    ///
    /// The entity receives its store-assigned identity.
    ///
    /// # Errors
    /// * `AlreadyExists` - if the entity already has an identity
    /// * `ConstraintViolation` - if the row breaks a schema constraint
    pub fn persist<E: Entity>(&self, entity: &mut E) -> Result<()> {
        if let Some(id) = entity.id() {
            return Err(ExError::new(ExErrorKind::AlreadyExists)
                .with_op("persist")
                .with_entity(E::NAME)
                .with_entity_id(id)
                .with_message("entity is already persisted"));
        }

        self.execute("persist", |conn| entity.insert(conn))?;
        let id = E::Id::from_raw(self.conn.last_insert_rowid());
        entity.assign_id(id).map_err(ExError::from)?;
        self.track(entity);

        tracing::debug!(entity = E::NAME, entity_id = id.get(), "entity persisted");
        Ok(())
    }

    /// Commit everything written so far and open a new transaction
    ///
    /// Managed entities stay managed.
    pub fn flush(&self) -> Result<()> {
        self.conn
            .execute_batch("COMMIT; BEGIN")
            .map_err(|err| from_rusqlite(err).with_op("flush"))?;
        tracing::debug!(managed = self.managed_count(), "persistence context flushed");
        Ok(())
    }

    /// Stop managing every entity
    ///
    /// Unflushed writes stay in the open transaction; later lookups read
    /// them back from the database as fresh values.
    pub fn clear(&self) {
        self.identity_map.borrow_mut().clear();
        tracing::debug!("persistence context cleared");
    }

    /// Whether an entity of type `E` with `id` is currently managed
    pub fn contains<E: Entity>(&self, id: E::Id) -> bool {
        E::managed(&self.identity_map.borrow()).contains_key(&id)
    }

    /// Number of managed entities across all types
    pub fn managed_count(&self) -> usize {
        self.identity_map.borrow().len()
    }

    /// SQL statements issued through this context since it was opened
    pub fn statement_count(&self) -> u64 {
        self.statements.get()
    }

    /// The underlying connection, for ad-hoc reads
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Run one statement against the connection, counting it
    pub(crate) fn execute<T, F>(&self, op: &str, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> rusqlite::Result<T>,
    {
        self.statements.set(self.statements.get() + 1);
        f(&self.conn).map_err(|err| from_rusqlite(err).with_op(op.to_string()))
    }

    /// Manage `entity`, replacing any previous value with its identity
    pub(crate) fn track<E: Entity>(&self, entity: &E) {
        let Some(id) = entity.id() else {
            return;
        };
        let mut map = self.identity_map.borrow_mut();
        E::managed_mut(&mut map).insert(id, entity.clone());
        entity.sync_relations(&mut map);
    }

    /// Manage a saved `entity`, keeping the context's relation state
    ///
    /// The caller's instance receives the managed collections.
    pub(crate) fn merge<E: Entity>(&self, entity: &mut E) {
        let Some(id) = entity.id() else {
            return;
        };
        let mut map = self.identity_map.borrow_mut();
        entity.adopt_managed_relations(&map);
        E::managed_mut(&mut map).insert(id, entity.clone());
        entity.sync_relations(&mut map);
    }

    /// Managed value for `id`, if any
    pub(crate) fn lookup<E: Entity>(&self, id: E::Id) -> Option<E> {
        E::managed(&self.identity_map.borrow()).get(&id).cloned()
    }

    /// Forget `id` after its row was deleted
    pub(crate) fn untrack<E: Entity>(&self, id: E::Id) {
        let mut map = self.identity_map.borrow_mut();
        E::managed_mut(&mut map).remove(&id);
        E::unlink_relations(id, &mut map);
    }
}

impl Drop for PersistenceContext {
    fn drop(&mut self) {
        if !self.conn.is_autocommit() {
            if let Err(err) = self.conn.execute_batch("ROLLBACK") {
                tracing::warn!(error = %err, "rollback on drop failed");
            }
        }
    }
}
