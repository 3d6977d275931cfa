// Shared fixtures for gift-store integration tests

#![allow(dead_code)]

use gift_core::{Member, Product, Wish};
use gift_store::{PersistenceContext, ProductRepository, Repository};

pub fn setup_context() -> PersistenceContext {
    PersistenceContext::open_in_memory().expect("Failed to open in-memory context")
}

pub fn product(name: &str) -> Product {
    Product::builder()
        .name(name)
        .price(123)
        .image_url("abc.png")
        .build()
        .unwrap()
}

pub fn member(email: &str) -> Member {
    Member::builder()
        .email(email)
        .password("abc")
        .build()
        .unwrap()
}

/// Persist `member` and `product`, then a wish linking them
pub fn wish_for(ctx: &PersistenceContext, member: &Member, product: &Product, count: u32) -> Wish {
    let mut wish = Wish::builder()
        .member(member)
        .product(product)
        .count(count)
        .build()
        .unwrap();
    ctx.persist(&mut wish).unwrap();
    wish
}

pub fn saved_product(ctx: &PersistenceContext, name: &str) -> Product {
    let mut product = product(name);
    ProductRepository::new(ctx).save(&mut product).unwrap();
    product
}
