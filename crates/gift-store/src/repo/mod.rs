//! Repositories over a `PersistenceContext`
//!
//! `SqliteRepository<E>` implements the generic CRUD surface for every
//! entity. Entity-specific queries (relation fetches, lookups by email or
//! foreign key) live in the per-entity modules.

#![allow(clippy::result_large_err)]

pub mod member_repo;
pub mod product_repo;
pub mod wish_repo;

use std::marker::PhantomData;
use std::time::Instant;

use gift_core::errors::{ExError, GiftError};
use gift_core::{log_op_end, log_op_error, log_op_start};
use gift_core::{EntityId, Member, Product, Wish};
use rusqlite::{OptionalExtension, ToSql};

use crate::context::PersistenceContext;
use crate::entity::{Entity, WishOwner};
use crate::errors::{not_found, Result};

/// Storage operations shared by every entity type
pub trait Repository<E: Entity> {
    /// Insert `entity` when it has no identity, otherwise update its row
    ///
    /// An update keeps the context's view of relation collections and hands
    /// it back through `entity`.
    ///
    /// # Errors
    /// * `NotFound` - if the entity has an identity but no row
    /// * `ConstraintViolation` - if the row breaks a schema constraint
    fn save(&self, entity: &mut E) -> Result<()>;

    /// Entity with identity `id`, served from the context when managed
    ///
    /// # Errors
    /// * `Persistence` - if the query fails
    fn find_by_id(&self, id: E::Id) -> Result<Option<E>>;

    /// Every stored entity, in identity order
    ///
    /// # Errors
    /// * `Persistence` - if the query fails
    fn find_all(&self) -> Result<Vec<E>>;

    /// Number of stored entities
    ///
    /// # Errors
    /// * `Persistence` - if the query fails
    fn count(&self) -> Result<u64>;

    /// # Errors
    /// * `Persistence` - if the query fails
    fn exists_by_id(&self, id: E::Id) -> Result<bool>;

    /// Delete the row with identity `id`, returning whether one existed
    ///
    /// # Errors
    /// * `ConstraintViolation` - if other rows still reference it
    fn delete_by_id(&self, id: E::Id) -> Result<bool>;
}

/// SQLite-backed repository for one entity type
pub struct SqliteRepository<'c, E> {
    ctx: &'c PersistenceContext,
    _entity: PhantomData<fn() -> E>,
}

pub type ProductRepository<'c> = SqliteRepository<'c, Product>;
pub type MemberRepository<'c> = SqliteRepository<'c, Member>;
pub type WishRepository<'c> = SqliteRepository<'c, Wish>;

impl<'c, E: Entity> SqliteRepository<'c, E> {
    pub fn new(ctx: &'c PersistenceContext) -> Self {
        Self {
            ctx,
            _entity: PhantomData,
        }
    }

    pub fn context(&self) -> &'c PersistenceContext {
        self.ctx
    }

    /// Wrap an operation in start/end log events
    pub(crate) fn instrument<T>(&self, op: &'static str, f: impl FnOnce() -> Result<T>) -> Result<T> {
        let start = Instant::now();
        log_op_start!(op, entity = E::NAME);

        let result = f();
        let duration_ms = start.elapsed().as_millis() as u64;
        match &result {
            Ok(_) => {
                log_op_end!(op, duration_ms = duration_ms, entity = E::NAME);
            }
            Err(err) => {
                log_op_error!(op, err.clone(), duration_ms = duration_ms, entity = E::NAME);
            }
        }
        result
    }

    /// The managed value for a freshly read entity, managing it if new
    pub(crate) fn resolve(&self, loaded: E) -> E {
        if let Some(managed) = loaded.id().and_then(|id| self.ctx.lookup::<E>(id)) {
            return managed;
        }
        self.ctx.track(&loaded);
        loaded
    }

    /// Run a `SELECT` of `E::COLUMNS` (aliased `e`) and resolve each row
    pub(crate) fn query_entities(
        &self,
        op: &'static str,
        sql: &str,
        params: &[&dyn ToSql],
    ) -> Result<Vec<E>> {
        let rows = self.ctx.execute(op, |conn| {
            let mut stmt = conn.prepare(sql)?;
            let rows = stmt.query_map(params, |row| E::from_row(row, 0))?;
            rows.collect::<rusqlite::Result<Vec<E>>>()
        })?;
        Ok(rows.into_iter().map(|entity| self.resolve(entity)).collect())
    }

    pub(crate) fn select_sql(filter: &str) -> String {
        format!(
            "SELECT {} FROM {} e {} ORDER BY e.id",
            E::select_list("e"),
            E::TABLE,
            filter
        )
    }
}

impl<'c, E: Entity> Repository<E> for SqliteRepository<'c, E> {
    fn save(&self, entity: &mut E) -> Result<()> {
        self.instrument("save", || match entity.id() {
            None => self.ctx.persist(entity),
            Some(id) => {
                let touched = self.ctx.execute("save", |conn| entity.update(id, conn))?;
                if touched == 0 {
                    return Err(not_found("save", E::NAME, id.get()));
                }
                self.ctx.merge(entity);
                Ok(())
            }
        })
    }

    fn find_by_id(&self, id: E::Id) -> Result<Option<E>> {
        self.instrument("find_by_id", || {
            if let Some(managed) = self.ctx.lookup::<E>(id) {
                return Ok(Some(managed));
            }

            let sql = Self::select_sql("WHERE e.id = ?1");
            let found = self.ctx.execute("find_by_id", |conn| {
                conn.query_row(&sql, [id.get()], |row| E::from_row(row, 0))
                    .optional()
            })?;
            if let Some(entity) = &found {
                self.ctx.track(entity);
            }
            Ok(found)
        })
    }

    fn find_all(&self) -> Result<Vec<E>> {
        self.instrument("find_all", || {
            self.query_entities("find_all", &Self::select_sql(""), &[])
        })
    }

    fn count(&self) -> Result<u64> {
        self.instrument("count", || {
            let sql = format!("SELECT COUNT(*) FROM {}", E::TABLE);
            let rows: i64 = self
                .ctx
                .execute("count", |conn| conn.query_row(&sql, [], |row| row.get(0)))?;
            Ok(rows as u64)
        })
    }

    fn exists_by_id(&self, id: E::Id) -> Result<bool> {
        self.instrument("exists_by_id", || {
            if self.ctx.contains::<E>(id) {
                return Ok(true);
            }
            let sql = format!("SELECT EXISTS(SELECT 1 FROM {} WHERE id = ?1)", E::TABLE);
            self.ctx
                .execute("exists_by_id", |conn| {
                    conn.query_row(&sql, [id.get()], |row| row.get(0))
                })
        })
    }

    fn delete_by_id(&self, id: E::Id) -> Result<bool> {
        self.instrument("delete_by_id", || {
            let sql = format!("DELETE FROM {} WHERE id = ?1", E::TABLE);
            let touched = self
                .ctx
                .execute("delete_by_id", |conn| conn.execute(&sql, [id.get()]))?;
            self.ctx.untrack::<E>(id);
            Ok(touched > 0)
        })
    }
}

impl<'c, E: WishOwner> SqliteRepository<'c, E> {
    /// Load owners matching `filter` with their wishes in a single statement
    ///
    /// `filter` is a `WHERE` clause over the owner alias `o`.
    pub(crate) fn fetch_with_wishes(
        &self,
        op: &'static str,
        filter: &str,
        param: &dyn ToSql,
    ) -> Result<Vec<E>> {
        let sql = format!(
            "SELECT {}, {} FROM {} o LEFT JOIN {} w ON w.{} = o.id {} ORDER BY o.id, w.id",
            E::select_list("o"),
            Wish::select_list("w"),
            E::TABLE,
            Wish::TABLE,
            E::WISH_FOREIGN_KEY,
            filter
        );
        let wish_offset = E::COLUMNS.len();

        let rows = self.ctx.execute(op, |conn| {
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt.query_map(&[param], |row| {
                let owner = E::from_row(row, 0)?;
                let wish_id: Option<i64> = row.get(wish_offset)?;
                let wish = match wish_id {
                    Some(_) => Some(Wish::from_row(row, wish_offset)?),
                    None => None,
                };
                Ok((owner, wish))
            })?;
            rows.collect::<rusqlite::Result<Vec<(E, Option<Wish>)>>>()
        })?;

        let mut owners: Vec<E> = Vec::new();
        for (mut owner, wish) in rows {
            if owners.last().and_then(Entity::id) != owner.id() {
                owner.wishes_mut().set(Vec::new());
                owners.push(owner);
            }
            let items = owners.last_mut().and_then(|last| last.wishes_mut().get_mut());
            if let (Some(items), Some(wish)) = (items, wish) {
                items.push(wish);
            }
        }

        for owner in &owners {
            for wish in owner.wishes().get().unwrap_or_default() {
                self.ctx.track(wish);
            }
            self.ctx.track(owner);
        }
        Ok(owners)
    }

    /// Load the wish collection of `owner` if it is not loaded yet
    ///
    /// Issues one statement for an unloaded collection and none otherwise.
    ///
    /// # Errors
    /// * `TransientReference` - if the owner has no identity
    pub fn initialize_wishes(&self, owner: &mut E) -> Result<()> {
        if owner.wishes().is_loaded() {
            return Ok(());
        }
        let id = owner.id().ok_or_else(|| {
            ExError::from(GiftError::TransientReference { entity: E::NAME })
                .with_op("initialize_wishes")
        })?;

        let wishes = WishRepository::new(self.ctx).load_by_foreign_key(
            "initialize_wishes",
            E::WISH_FOREIGN_KEY,
            id.get(),
        )?;
        owner.wishes_mut().set(wishes);
        self.ctx.track(owner);
        Ok(())
    }
}
