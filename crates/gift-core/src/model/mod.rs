pub mod ids;
pub mod member;
pub mod product;
pub mod relation;
pub mod wish;

pub use ids::{EntityId, MemberId, ProductId, WishId};
pub use member::{Member, MemberBuilder};
pub use product::{Product, ProductBuilder};
pub use relation::Relation;
pub use wish::{Wish, WishBuilder};
