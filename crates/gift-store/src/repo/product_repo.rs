//! Product-specific queries

#![allow(clippy::result_large_err)]

use gift_core::{Product, ProductId};

use super::ProductRepository;
use crate::errors::Result;

impl<'c> ProductRepository<'c> {
    /// Product `id` with its wishes, fetched in one joined statement
    ///
    /// The returned product's `wishes` relation is always loaded, empty
    /// when nobody wishes for it.
    ///
    /// # Errors
    /// * `Persistence` - if the query fails
    pub fn find_product_with_relation(&self, id: ProductId) -> Result<Option<Product>> {
        self.instrument("find_product_with_relation", || {
            let products =
                self.fetch_with_wishes("find_product_with_relation", "WHERE o.id = ?1", &id.get())?;
            Ok(products.into_iter().next())
        })
    }
}
