//! Wish-specific queries

#![allow(clippy::result_large_err)]

use gift_core::{MemberId, ProductId, Wish};

use super::WishRepository;
use crate::errors::Result;

impl<'c> WishRepository<'c> {
    /// Wishes referencing product `id`, in identity order
    ///
    /// # Errors
    /// * `Persistence` - if the query fails
    pub fn find_by_product_id(&self, id: ProductId) -> Result<Vec<Wish>> {
        self.instrument("find_by_product_id", || {
            self.load_by_foreign_key("find_by_product_id", "product_id", id.get())
        })
    }

    /// Wishes made by member `id`, in identity order
    ///
    /// # Errors
    /// * `Persistence` - if the query fails
    pub fn find_by_member_id(&self, id: MemberId) -> Result<Vec<Wish>> {
        self.instrument("find_by_member_id", || {
            self.load_by_foreign_key("find_by_member_id", "member_id", id.get())
        })
    }

    /// One statement selecting the wishes whose `column` equals `raw`
    pub(crate) fn load_by_foreign_key(
        &self,
        op: &'static str,
        column: &str,
        raw: i64,
    ) -> Result<Vec<Wish>> {
        let sql = Self::select_sql(&format!("WHERE e.{} = ?1", column));
        self.query_entities(op, &sql, &[&raw])
    }
}
