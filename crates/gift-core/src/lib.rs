//! Gift Core - domain model and shared facilities
//!
//! This crate provides:
//! - `Member`, `Product` and `Wish` entities with builders and typed ids
//! - `Relation<T>`, the lazily fetched one-to-many collection
//! - The error facility (`GiftError` for domain validation, `ExError` across crates)
//! - The structured logging facility and its test capture mode
//!
//! Persistence lives in `gift-store`; nothing here touches SQL.

pub mod errors;
pub mod logging_facility;
pub mod model;

// Used by the exported logging macros
#[doc(hidden)]
pub use gift_core_types as core_types;

// Re-export commonly used types
pub use errors::{ExError, ExErrorKind, GiftError, Result};
pub use model::{
    EntityId, Member, MemberBuilder, MemberId, Product, ProductBuilder, ProductId, Relation, Wish,
    WishBuilder, WishId,
};
