pub mod inventory;
pub mod persistence;

pub use crate::domain::{Product, ProductDetails, ProductKind};
pub use crate::utils::error::Result;
pub use inventory::Inventory;
pub use persistence::InventoryDocument;
