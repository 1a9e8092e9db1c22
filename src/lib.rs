pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use app::MenuApp;
pub use config::{toml_config::TomlConfig, CliConfig, Settings};
pub use crate::core::{Inventory, InventoryDocument};
pub use domain::{Product, ProductDetails, ProductKind};
pub use utils::error::{InventoryError, Result};
