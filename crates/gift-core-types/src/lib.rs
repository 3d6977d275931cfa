//! Core types shared across the gift crates
//!
//! This crate provides foundational types used by both the error and
//! logging facilities and by the domain model:
//!
//! - **Sensitive data**: `Sensitive<T>` marker for automatic redaction
//! - **Schema constants**: Canonical field keys and event names

pub mod schema;
pub mod sensitive;

pub use sensitive::Sensitive;
