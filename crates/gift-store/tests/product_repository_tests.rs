// Integration tests for ProductRepository

mod common;

use common::{member, product, saved_product, setup_context, wish_for};
use gift_core::{ExErrorKind, Product, ProductId, Wish};
use gift_store::{MemberRepository, ProductRepository, Repository};

#[test]
fn test_save_then_find_by_id_returns_same_fields() {
    // Given: A saved product
    let ctx = setup_context();
    let repo = ProductRepository::new(&ctx);
    let mut product = product("테스트");
    repo.save(&mut product).unwrap();
    let id = product.id().expect("save should assign an id");

    // When: It is read back after the context forgets it
    ctx.clear();
    let found = repo.find_by_id(id).unwrap().expect("product should exist");

    // Then: Every field matches
    assert_eq!(found.id(), Some(id));
    assert_eq!(found.name, "테스트");
    assert_eq!(found.price, 123);
    assert_eq!(found.image_url, "abc.png");
}

#[test]
fn test_find_by_id_of_managed_product_issues_no_statement() {
    let ctx = setup_context();
    let repo = ProductRepository::new(&ctx);
    let product = saved_product(&ctx, "a");

    let before = ctx.statement_count();
    let found = repo.find_by_id(product.id().unwrap()).unwrap();

    assert_eq!(found, Some(product));
    assert_eq!(ctx.statement_count(), before);
}

#[test]
fn test_find_by_id_missing_returns_none() {
    let ctx = setup_context();
    let repo = ProductRepository::new(&ctx);

    assert_eq!(repo.find_by_id(ProductId::new(999)).unwrap(), None);
}

#[test]
fn test_find_all_returns_every_product() {
    // Given: Three saved products
    let ctx = setup_context();
    let repo = ProductRepository::new(&ctx);
    for name in ["테스트1", "테스트2", "테스트3"] {
        saved_product(&ctx, name);
    }

    // When: All products are listed
    let products = repo.find_all().unwrap();

    // Then: All three come back in identity order
    assert_eq!(products.len(), 3);
    let names: Vec<&str> = products.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["테스트1", "테스트2", "테스트3"]);
    assert_eq!(repo.count().unwrap(), 3);
}

#[test]
fn test_save_existing_product_updates_row() {
    let ctx = setup_context();
    let repo = ProductRepository::new(&ctx);
    let mut product = saved_product(&ctx, "before");

    product.price = 456;
    product.name = "after".to_string();
    repo.save(&mut product).unwrap();
    ctx.clear();

    let found = repo.find_by_id(product.id().unwrap()).unwrap().unwrap();
    assert_eq!(found.name, "after");
    assert_eq!(found.price, 456);
    assert_eq!(repo.count().unwrap(), 1);
}

#[test]
fn test_save_with_unknown_identity_is_not_found() {
    let ctx = setup_context();
    let repo = ProductRepository::new(&ctx);
    let mut ghost = Product::hydrate(ProductId::new(42), "ghost".into(), 1, "g.png".into());

    let err = repo.save(&mut ghost).unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::NotFound);
    assert_eq!(err.entity_id(), Some("42"));
}

#[test]
fn test_delete_and_exists_by_id() {
    let ctx = setup_context();
    let repo = ProductRepository::new(&ctx);
    let id = saved_product(&ctx, "a").id().unwrap();
    assert!(repo.exists_by_id(id).unwrap());

    assert!(repo.delete_by_id(id).unwrap());

    assert!(!repo.exists_by_id(id).unwrap());
    assert!(!ctx.contains::<Product>(id));
    assert!(!repo.delete_by_id(id).unwrap(), "second delete finds no row");
}

#[test]
fn test_plain_lookup_leaves_wishes_unloaded_and_fetch_join_loads_them() {
    // Given: Two members wishing for the same product
    let ctx = setup_context();
    let members = MemberRepository::new(&ctx);
    let products = ProductRepository::new(&ctx);

    let mut member1 = member("test1@pusan.ac.kr");
    let mut member2 = member("test2@pusan.ac.kr");
    members.save(&mut member1).unwrap();
    members.save(&mut member2).unwrap();
    let product = saved_product(&ctx, "테스트");
    wish_for(&ctx, &member1, &product, 3);
    wish_for(&ctx, &member2, &product, 3);
    ctx.flush().unwrap();
    ctx.clear();
    let id = product.id().unwrap();

    // When: The product is looked up plainly
    let before = ctx.statement_count();
    let plain = products.find_by_id(id).unwrap().unwrap();

    // Then: Its wishes are not loaded and one statement ran
    assert!(!plain.wishes.is_loaded());
    assert_eq!(ctx.statement_count() - before, 1);

    // When: The product is fetched with its relation
    ctx.clear();
    let before = ctx.statement_count();
    let joined = products.find_product_with_relation(id).unwrap().unwrap();

    // Then: Both wishes arrive from a single statement
    assert_eq!(joined.wish_list().map(<[Wish]>::len), Some(2));
    assert_eq!(ctx.statement_count() - before, 1);
    assert!(joined
        .wish_list()
        .unwrap()
        .iter()
        .all(|wish| wish.product_id() == id && wish.count == 3));
}

#[test]
fn test_lazy_initialization_costs_an_extra_statement() {
    let ctx = setup_context();
    let products = ProductRepository::new(&ctx);
    let mut buyer = member("lazy@pusan.ac.kr");
    ctx.persist(&mut buyer).unwrap();
    let product = saved_product(&ctx, "lazy");
    wish_for(&ctx, &buyer, &product, 1);
    wish_for(&ctx, &buyer, &product, 2);
    ctx.clear();

    let before = ctx.statement_count();
    let mut found = products.find_by_id(product.id().unwrap()).unwrap().unwrap();
    products.initialize_wishes(&mut found).unwrap();

    assert_eq!(found.wish_list().map(<[Wish]>::len), Some(2));
    assert_eq!(ctx.statement_count() - before, 2);

    // Already loaded: nothing more to fetch
    products.initialize_wishes(&mut found).unwrap();
    assert_eq!(ctx.statement_count() - before, 2);
}

#[test]
fn test_fetch_join_for_product_without_wishes_loads_empty_list() {
    let ctx = setup_context();
    let products = ProductRepository::new(&ctx);
    let product = saved_product(&ctx, "lonely");
    ctx.clear();

    let joined = products
        .find_product_with_relation(product.id().unwrap())
        .unwrap()
        .unwrap();

    assert_eq!(joined.wish_list().map(<[Wish]>::len), Some(0));
    assert_eq!(
        products
            .find_product_with_relation(ProductId::new(999))
            .unwrap(),
        None
    );
}

#[test]
fn test_blank_name_is_rejected_before_reaching_store() {
    let err = Product::builder()
        .name(" ")
        .price(1)
        .image_url("a.png")
        .build()
        .unwrap_err();
    let ex: gift_core::ExError = err.into();
    assert_eq!(ex.kind(), ExErrorKind::InvalidName);
}
