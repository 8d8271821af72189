//! Catalog domain module.
//!
//! Read-only product records as supplied by the catalog store, plus the two
//! leaf services every other crate reads specs through: the spec accessor
//! (dotted paths + field aliases) and the normalizer.

pub mod category;
pub mod key_specs;
pub mod normalize;
pub mod price;
pub mod product;
pub mod spec;

pub use category::Category;
pub use key_specs::{KeySpec, key_specs};
pub use normalize::{FieldKind, Normalized, normalize, normalize_token};
pub use price::{Price, Prices};
pub use product::{Product, ProductId};
pub use spec::SpecField;
