use super::ids::ProductId;
use super::relation::Relation;
use super::wish::Wish;
use crate::errors::{GiftError, Result};

/// Product - an item members can put on their wish list
///
/// The product owns the inverse side of the product/wish relation. The
/// `wishes` collection is lazy: a plain lookup leaves it `Unloaded`.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    id: Option<ProductId>,

    /// Display name (never blank)
    pub name: String,

    /// Price in the smallest currency unit
    pub price: u32,

    /// Location of the product image
    pub image_url: String,

    /// Wishes referencing this product
    pub wishes: Relation<Wish>,
}

impl Product {
    /// Start building a new, unpersisted product
    pub fn builder() -> ProductBuilder {
        ProductBuilder::new()
    }

    /// Rebuild a product read from the store
    ///
    /// The wish relation starts unloaded.
    pub fn hydrate(id: ProductId, name: String, price: u32, image_url: String) -> Self {
        Self {
            id: Some(id),
            name,
            price,
            image_url,
            wishes: Relation::Unloaded,
        }
    }

    /// Store-assigned identity, `None` until persisted
    pub fn id(&self) -> Option<ProductId> {
        self.id
    }

    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    /// Record the identity assigned by the store
    ///
    /// # Errors
    /// * `IdentityReassigned` - if a different identity is already assigned
    pub fn assign_id(&mut self, id: ProductId) -> Result<()> {
        match self.id {
            Some(current) if current != id => Err(GiftError::IdentityReassigned {
                entity: "product",
                current: current.get(),
                attempted: id.get(),
            }),
            _ => {
                self.id = Some(id);
                Ok(())
            }
        }
    }

    /// Loaded wishes, or `None` when the relation was never fetched
    pub fn wish_list(&self) -> Option<&[Wish]> {
        self.wishes.get()
    }
}

/// Builder for `Product`
///
/// All scalar fields are required; `build` validates the name.
#[derive(Debug, Default, Clone)]
pub struct ProductBuilder {
    name: Option<String>,
    price: Option<u32>,
    image_url: Option<String>,
}

impl ProductBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn price(mut self, price: u32) -> Self {
        self.price = Some(price);
        self
    }

    pub fn image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }

    /// Finish the product
    ///
    /// # Errors
    /// * `MissingField` - if name, price or image_url was never set
    /// * `InvalidName` - if the name is empty or whitespace-only
    pub fn build(self) -> Result<Product> {
        let name = self.name.ok_or(GiftError::MissingField {
            entity: "product",
            field: "name",
        })?;
        if name.trim().is_empty() {
            return Err(GiftError::InvalidName {
                reason: "Name cannot be empty or whitespace-only".to_string(),
            });
        }
        let price = self.price.ok_or(GiftError::MissingField {
            entity: "product",
            field: "price",
        })?;
        let image_url = self.image_url.ok_or(GiftError::MissingField {
            entity: "product",
            field: "image_url",
        })?;

        Ok(Product {
            id: None,
            name,
            price,
            image_url,
            wishes: Relation::empty(),
        })
    }
}
