//! Row mapping for the persisted entities
//!
//! `Entity` ties a gift-core model type to its table: column list, row
//! hydration, insert/update statements and its slot in the identity map.

use std::collections::HashMap;

use gift_core::{EntityId, Member, MemberId, Product, ProductId, Relation, Wish, WishId};
use rusqlite::{params, Connection, Row};

use crate::context::IdentityMap;

/// A model type stored in its own table
pub trait Entity: Clone + std::fmt::Debug {
    type Id: EntityId;

    /// Lowercase name used in logs and errors
    const NAME: &'static str;

    const TABLE: &'static str;

    /// Selected columns, identity first
    const COLUMNS: &'static [&'static str];

    fn id(&self) -> Option<Self::Id>;

    fn assign_id(&mut self, id: Self::Id) -> gift_core::Result<()>;

    /// Hydrate from `row`, reading `COLUMNS` starting at `offset`
    fn from_row(row: &Row<'_>, offset: usize) -> rusqlite::Result<Self>;

    /// Insert a new row; the caller reads back the rowid
    fn insert(&self, conn: &Connection) -> rusqlite::Result<usize>;

    /// Overwrite the row with identity `id`, returning rows touched
    fn update(&self, id: Self::Id, conn: &Connection) -> rusqlite::Result<usize>;

    #[doc(hidden)]
    fn managed(map: &IdentityMap) -> &HashMap<Self::Id, Self>;

    #[doc(hidden)]
    fn managed_mut(map: &mut IdentityMap) -> &mut HashMap<Self::Id, Self>;

    /// Bring loaded inverse collections of managed entities in line with `self`
    fn sync_relations(&self, _map: &mut IdentityMap) {}

    /// Take relation state from the managed copy instead of the caller's
    fn adopt_managed_relations(&mut self, _map: &IdentityMap) {}

    /// Drop a deleted entity from loaded inverse collections
    fn unlink_relations(_id: Self::Id, _map: &mut IdentityMap) {}

    /// `COLUMNS` qualified with a table alias, comma separated
    fn select_list(alias: &str) -> String {
        Self::COLUMNS
            .iter()
            .map(|column| format!("{}.{}", alias, column))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// An entity on the inverse side of the wish relation
pub trait WishOwner: Entity {
    /// Column of `wishes` referencing this entity
    const WISH_FOREIGN_KEY: &'static str;

    fn wishes(&self) -> &Relation<Wish>;

    fn wishes_mut(&mut self) -> &mut Relation<Wish>;
}

// Only the managed copy tracks the rows; without one the collection unloads
fn adopt_managed_wishes<E: WishOwner>(owner: &mut E, map: &IdentityMap) {
    let managed = owner
        .id()
        .and_then(|id| E::managed(map).get(&id))
        .map(|managed| managed.wishes().clone())
        .unwrap_or_default();
    *owner.wishes_mut() = managed;
}

impl Entity for Product {
    type Id = ProductId;

    const NAME: &'static str = "product";
    const TABLE: &'static str = "products";
    const COLUMNS: &'static [&'static str] = &["id", "name", "price", "image_url"];

    fn id(&self) -> Option<ProductId> {
        Product::id(self)
    }

    fn assign_id(&mut self, id: ProductId) -> gift_core::Result<()> {
        Product::assign_id(self, id)
    }

    fn from_row(row: &Row<'_>, offset: usize) -> rusqlite::Result<Self> {
        Ok(Product::hydrate(
            ProductId::new(row.get(offset)?),
            row.get(offset + 1)?,
            row.get(offset + 2)?,
            row.get(offset + 3)?,
        ))
    }

    fn insert(&self, conn: &Connection) -> rusqlite::Result<usize> {
        conn.execute(
            "INSERT INTO products (name, price, image_url) VALUES (?1, ?2, ?3)",
            params![self.name, self.price, self.image_url],
        )
    }

    fn update(&self, id: ProductId, conn: &Connection) -> rusqlite::Result<usize> {
        conn.execute(
            "UPDATE products SET name = ?1, price = ?2, image_url = ?3 WHERE id = ?4",
            params![self.name, self.price, self.image_url, id.get()],
        )
    }

    fn managed(map: &IdentityMap) -> &HashMap<ProductId, Self> {
        &map.products
    }

    fn managed_mut(map: &mut IdentityMap) -> &mut HashMap<ProductId, Self> {
        &mut map.products
    }

    fn adopt_managed_relations(&mut self, map: &IdentityMap) {
        adopt_managed_wishes(self, map);
    }
}

impl WishOwner for Product {
    const WISH_FOREIGN_KEY: &'static str = "product_id";

    fn wishes(&self) -> &Relation<Wish> {
        &self.wishes
    }

    fn wishes_mut(&mut self) -> &mut Relation<Wish> {
        &mut self.wishes
    }
}

impl Entity for Member {
    type Id = MemberId;

    const NAME: &'static str = "member";
    const TABLE: &'static str = "members";
    const COLUMNS: &'static [&'static str] = &["id", "email", "password"];

    fn id(&self) -> Option<MemberId> {
        Member::id(self)
    }

    fn assign_id(&mut self, id: MemberId) -> gift_core::Result<()> {
        Member::assign_id(self, id)
    }

    fn from_row(row: &Row<'_>, offset: usize) -> rusqlite::Result<Self> {
        Ok(Member::hydrate(
            MemberId::new(row.get(offset)?),
            row.get(offset + 1)?,
            row.get(offset + 2)?,
        ))
    }

    fn insert(&self, conn: &Connection) -> rusqlite::Result<usize> {
        conn.execute(
            "INSERT INTO members (email, password) VALUES (?1, ?2)",
            params![self.email, self.password.expose()],
        )
    }

    fn update(&self, id: MemberId, conn: &Connection) -> rusqlite::Result<usize> {
        conn.execute(
            "UPDATE members SET email = ?1, password = ?2 WHERE id = ?3",
            params![self.email, self.password.expose(), id.get()],
        )
    }

    fn managed(map: &IdentityMap) -> &HashMap<MemberId, Self> {
        &map.members
    }

    fn managed_mut(map: &mut IdentityMap) -> &mut HashMap<MemberId, Self> {
        &mut map.members
    }

    fn adopt_managed_relations(&mut self, map: &IdentityMap) {
        adopt_managed_wishes(self, map);
    }
}

impl WishOwner for Member {
    const WISH_FOREIGN_KEY: &'static str = "member_id";

    fn wishes(&self) -> &Relation<Wish> {
        &self.wishes
    }

    fn wishes_mut(&mut self) -> &mut Relation<Wish> {
        &mut self.wishes
    }
}

impl Entity for Wish {
    type Id = WishId;

    const NAME: &'static str = "wish";
    const TABLE: &'static str = "wishes";
    const COLUMNS: &'static [&'static str] = &["id", "member_id", "product_id", "count"];

    fn id(&self) -> Option<WishId> {
        Wish::id(self)
    }

    fn assign_id(&mut self, id: WishId) -> gift_core::Result<()> {
        Wish::assign_id(self, id)
    }

    fn from_row(row: &Row<'_>, offset: usize) -> rusqlite::Result<Self> {
        Ok(Wish::hydrate(
            WishId::new(row.get(offset)?),
            MemberId::new(row.get(offset + 1)?),
            ProductId::new(row.get(offset + 2)?),
            row.get(offset + 3)?,
        ))
    }

    fn insert(&self, conn: &Connection) -> rusqlite::Result<usize> {
        conn.execute(
            "INSERT INTO wishes (member_id, product_id, count) VALUES (?1, ?2, ?3)",
            params![self.member_id().get(), self.product_id().get(), self.count],
        )
    }

    fn update(&self, id: WishId, conn: &Connection) -> rusqlite::Result<usize> {
        conn.execute(
            "UPDATE wishes SET member_id = ?1, product_id = ?2, count = ?3 WHERE id = ?4",
            params![
                self.member_id().get(),
                self.product_id().get(),
                self.count,
                id.get()
            ],
        )
    }

    fn managed(map: &IdentityMap) -> &HashMap<WishId, Self> {
        &map.wishes
    }

    fn managed_mut(map: &mut IdentityMap) -> &mut HashMap<WishId, Self> {
        &mut map.wishes
    }

    fn sync_relations(&self, map: &mut IdentityMap) {
        let Some(id) = self.id() else {
            return;
        };
        for (product_id, product) in map.products.iter_mut() {
            place_wish(&mut product.wishes, self, id, *product_id == self.product_id());
        }
        for (member_id, member) in map.members.iter_mut() {
            place_wish(&mut member.wishes, self, id, *member_id == self.member_id());
        }
    }

    fn unlink_relations(id: WishId, map: &mut IdentityMap) {
        let lists = map
            .products
            .values_mut()
            .map(|product| &mut product.wishes)
            .chain(map.members.values_mut().map(|member| &mut member.wishes));
        for relation in lists {
            if let Some(items) = relation.get_mut() {
                items.retain(|wish| wish.id() != Some(id));
            }
        }
    }
}

// Replace in place when owned, append when newly owned, remove when moved away
fn place_wish(relation: &mut Relation<Wish>, wish: &Wish, id: WishId, owned: bool) {
    let Some(items) = relation.get_mut() else {
        return;
    };
    match items.iter().position(|existing| existing.id() == Some(id)) {
        Some(index) if owned => items[index] = wish.clone(),
        Some(index) => {
            items.remove(index);
        }
        None if owned => items.push(wish.clone()),
        None => {}
    }
}
