//! Typed identities
//!
//! Identities are assigned by the backing store (SQLite rowids) and are
//! never constructed from thin air outside hydration and tests.

use std::fmt;
use std::hash::Hash;

/// Common surface of the typed identity newtypes
pub trait EntityId: Copy + Eq + Hash + Ord + fmt::Debug + fmt::Display {
    /// Wrap a raw store identity
    fn from_raw(raw: i64) -> Self;

    /// The raw store identity
    fn get(self) -> i64;
}

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(i64);

        impl $name {
            pub fn new(raw: i64) -> Self {
                Self(raw)
            }

            pub fn get(self) -> i64 {
                self.0
            }
        }

        impl EntityId for $name {
            fn from_raw(raw: i64) -> Self {
                Self(raw)
            }

            fn get(self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

entity_id!(
    /// Identity of a persisted `Member`
    MemberId
);
entity_id!(
    /// Identity of a persisted `Product`
    ProductId
);
entity_id!(
    /// Identity of a persisted `Wish`
    WishId
);
