// Domain layer: product records and their mutation rules.

pub mod model;

pub use model::{Product, ProductDetails, ProductKind};
