use super::ids::{MemberId, ProductId, WishId};
use super::member::Member;
use super::product::Product;
use super::relation::Relation;
use crate::errors::{GiftError, Result};

/// Wish - join row between a member and a product, with a quantity
///
/// Both references are required and must point at persisted entities.
/// The relation graph is kept as ids: a wish never owns its member or
/// product, and the inverse collections hold wish values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wish {
    id: Option<WishId>,
    member_id: MemberId,
    product_id: ProductId,

    /// How many of the product the member wants
    pub count: u32,
}

impl Wish {
    /// Start building a new, unpersisted wish
    pub fn builder() -> WishBuilder {
        WishBuilder::new()
    }

    /// Rebuild a wish read from the store
    pub fn hydrate(id: WishId, member_id: MemberId, product_id: ProductId, count: u32) -> Self {
        Self {
            id: Some(id),
            member_id,
            product_id,
            count,
        }
    }

    pub fn id(&self) -> Option<WishId> {
        self.id
    }

    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    pub fn member_id(&self) -> MemberId {
        self.member_id
    }

    pub fn product_id(&self) -> ProductId {
        self.product_id
    }

    /// Record the identity assigned by the store
    ///
    /// # Errors
    /// * `IdentityReassigned` - if a different identity is already assigned
    pub fn assign_id(&mut self, id: WishId) -> Result<()> {
        match self.id {
            Some(current) if current != id => Err(GiftError::IdentityReassigned {
                entity: "wish",
                current: current.get(),
                attempted: id.get(),
            }),
            _ => {
                self.id = Some(id);
                Ok(())
            }
        }
    }

    /// Point this wish at `member` and register it on the member's side
    ///
    /// The member's collection only changes when it is loaded.
    ///
    /// # Errors
    /// * `TransientReference` - if the member has no identity yet
    pub fn add_member(&mut self, member: &mut Member) -> Result<()> {
        self.member_id = member
            .id()
            .ok_or(GiftError::TransientReference { entity: "member" })?;
        register(&mut member.wishes, self);
        Ok(())
    }

    /// Point this wish at `product` and register it on the product's side
    ///
    /// The product's collection only changes when it is loaded.
    ///
    /// # Errors
    /// * `TransientReference` - if the product has no identity yet
    pub fn add_product(&mut self, product: &mut Product) -> Result<()> {
        self.product_id = product
            .id()
            .ok_or(GiftError::TransientReference { entity: "product" })?;
        register(&mut product.wishes, self);
        Ok(())
    }
}

// A persisted wish replaces its earlier entry; unpersisted wishes are
// distinct rows-to-be and always append
fn register(relation: &mut Relation<Wish>, wish: &Wish) {
    let existing = wish.id.and_then(|id| {
        relation
            .get()
            .and_then(|items| items.iter().position(|item| item.id == Some(id)))
    });
    match existing {
        Some(index) => {
            if let Some(items) = relation.get_mut() {
                items[index] = wish.clone();
            }
        }
        None => {
            relation.push_if_loaded(wish.clone());
        }
    }
}

/// Builder for `Wish`
///
/// `count` defaults to 1.
#[derive(Debug, Clone)]
pub struct WishBuilder {
    member_id: Option<MemberId>,
    product_id: Option<ProductId>,
    transient: Option<&'static str>,
    count: u32,
}

impl Default for WishBuilder {
    fn default() -> Self {
        Self {
            member_id: None,
            product_id: None,
            transient: None,
            count: 1,
        }
    }
}

impl WishBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reference a member entity
    pub fn member(mut self, member: &Member) -> Self {
        match member.id() {
            Some(id) => self.member_id = Some(id),
            None => self.transient = Some("member"),
        }
        self
    }

    /// Reference a member by identity
    pub fn member_id(mut self, id: MemberId) -> Self {
        self.member_id = Some(id);
        self
    }

    /// Reference a product entity
    pub fn product(mut self, product: &Product) -> Self {
        match product.id() {
            Some(id) => self.product_id = Some(id),
            None => self.transient = Some("product"),
        }
        self
    }

    /// Reference a product by identity
    pub fn product_id(mut self, id: ProductId) -> Self {
        self.product_id = Some(id);
        self
    }

    pub fn count(mut self, count: u32) -> Self {
        self.count = count;
        self
    }

    /// Finish the wish
    ///
    /// # Errors
    /// * `TransientReference` - if a referenced member or product was never persisted
    /// * `MissingField` - if the member or product reference is absent
    pub fn build(self) -> Result<Wish> {
        if let Some(entity) = self.transient {
            return Err(GiftError::TransientReference { entity });
        }
        let member_id = self.member_id.ok_or(GiftError::MissingField {
            entity: "wish",
            field: "member",
        })?;
        let product_id = self.product_id.ok_or(GiftError::MissingField {
            entity: "wish",
            field: "product",
        })?;

        Ok(Wish {
            id: None,
            member_id,
            product_id,
            count: self.count,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn persisted_member(id: i64) -> Member {
        let mut member = Member::builder()
            .email(format!("test{}@pusan.ac.kr", id))
            .password("abc")
            .build()
            .unwrap();
        member.assign_id(MemberId::new(id)).unwrap();
        member
    }

    fn persisted_product(id: i64) -> Product {
        let mut product = Product::builder()
            .name("테스트")
            .price(123)
            .image_url("abc.png")
            .build()
            .unwrap();
        product.assign_id(ProductId::new(id)).unwrap();
        product
    }

    #[test]
    fn test_build_wish_from_entities() {
        let member = persisted_member(1);
        let product = persisted_product(2);

        let wish = Wish::builder()
            .member(&member)
            .product(&product)
            .count(3)
            .build()
            .unwrap();

        assert_eq!(wish.id(), None);
        assert_eq!(wish.member_id(), MemberId::new(1));
        assert_eq!(wish.product_id(), ProductId::new(2));
        assert_eq!(wish.count, 3);
    }

    #[test]
    fn test_count_defaults_to_one() {
        let wish = Wish::builder()
            .member_id(MemberId::new(1))
            .product_id(ProductId::new(1))
            .build()
            .unwrap();
        assert_eq!(wish.count, 1);
    }

    #[test]
    fn test_wish_requires_both_references() {
        let member = persisted_member(1);
        let product = persisted_product(1);

        let err = Wish::builder().product(&product).build();
        assert_eq!(
            err,
            Err(GiftError::MissingField {
                entity: "wish",
                field: "member"
            })
        );

        let err = Wish::builder().member(&member).build();
        assert_eq!(
            err,
            Err(GiftError::MissingField {
                entity: "wish",
                field: "product"
            })
        );
    }

    #[test]
    fn test_transient_reference_rejected() {
        let member = Member::builder()
            .email("a@b.c")
            .password("p")
            .build()
            .unwrap();
        let product = persisted_product(1);

        let err = Wish::builder().member(&member).product(&product).build();
        assert_eq!(err, Err(GiftError::TransientReference { entity: "member" }));
    }

    #[test]
    fn test_add_member_and_product_register_inverse_side() {
        let mut member1 = persisted_member(1);
        let mut member2 = persisted_member(2);
        let mut product = persisted_product(10);

        let mut wish1 = Wish::builder()
            .member(&member1)
            .product(&product)
            .count(3)
            .build()
            .unwrap();
        let mut wish2 = Wish::builder()
            .member(&member2)
            .product(&product)
            .count(3)
            .build()
            .unwrap();

        wish1.add_member(&mut member1).unwrap();
        wish1.add_product(&mut product).unwrap();
        wish2.add_member(&mut member2).unwrap();
        wish2.add_product(&mut product).unwrap();

        assert_eq!(product.wish_list().map(<[Wish]>::len), Some(2));
        assert_eq!(member1.wish_list(), Some(&[wish1.clone()][..]));
        assert_eq!(member2.wish_list(), Some(&[wish2.clone()][..]));

        // Unpersisted wishes are never merged, even when equal
        let mut twin = wish1.clone();
        twin.add_product(&mut product).unwrap();
        assert_eq!(product.wish_list().map(<[Wish]>::len), Some(3));
    }

    #[test]
    fn test_equal_unpersisted_wishes_are_both_registered() {
        let member = persisted_member(1);
        let mut product = persisted_product(1);
        let mut first = Wish::builder().member(&member).product(&product).build().unwrap();
        let mut second = Wish::builder().member(&member).product(&product).build().unwrap();
        assert_eq!(first, second);

        first.add_product(&mut product).unwrap();
        second.add_product(&mut product).unwrap();

        assert_eq!(product.wish_list().map(<[Wish]>::len), Some(2));
    }

    #[test]
    fn test_persisted_wish_registered_again_replaces_its_entry() {
        let member = persisted_member(1);
        let mut product = persisted_product(1);
        let mut wish = Wish::builder().member(&member).product(&product).build().unwrap();
        wish.assign_id(WishId::new(7)).unwrap();
        wish.add_product(&mut product).unwrap();

        wish.count = 4;
        wish.add_product(&mut product).unwrap();

        assert_eq!(product.wish_list(), Some(&[wish.clone()][..]));
    }

    #[test]
    fn test_add_product_leaves_unloaded_side_untouched() {
        let mut product =
            Product::hydrate(ProductId::new(4), "x".into(), 1, "x.png".into());
        let mut wish = Wish::builder()
            .member_id(MemberId::new(1))
            .product_id(ProductId::new(9))
            .build()
            .unwrap();

        wish.add_product(&mut product).unwrap();

        assert_eq!(wish.product_id(), ProductId::new(4));
        assert!(!product.wishes.is_loaded());
    }

    #[test]
    fn test_add_transient_product_fails() {
        let mut product = Product::builder()
            .name("x")
            .price(1)
            .image_url("x.png")
            .build()
            .unwrap();
        let mut wish = Wish::builder()
            .member_id(MemberId::new(1))
            .product_id(ProductId::new(9))
            .build()
            .unwrap();

        let err = wish.add_product(&mut product);
        assert_eq!(err, Err(GiftError::TransientReference { entity: "product" }));
        assert_eq!(wish.product_id(), ProductId::new(9));
    }
}
