use crate::core::inventory::Inventory;
use crate::domain::Product;
use crate::utils::error::{InventoryError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::Path;

/// On-disk layout: `{ "products": [ <flat product record>, ... ] }`.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct InventoryDocument {
    #[serde(default)]
    pub products: Vec<Value>,
}

impl Inventory {
    pub fn to_document(&self) -> Result<InventoryDocument> {
        let products = self
            .iter()
            .map(Product::to_record)
            .collect::<Result<Vec<_>>>()?;
        Ok(InventoryDocument { products })
    }

    /// Writes the whole store as pretty-printed JSON, replacing any existing file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(&self.to_document()?)?;
        fs::write(path, json)?;

        tracing::info!(path = %path.display(), products = self.len(), "Saved inventory");
        Ok(())
    }

    /// Builds a new store from a file written by [`Inventory::save`].
    ///
    /// Every failure surfaces as `InvalidProductData`; the caller's current
    /// store is never touched.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Inventory> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            InventoryError::invalid_data_from(format!("Error loading inventory: {}", e), e)
        })?;

        let inventory = Self::from_json_str(&content)?;
        tracing::info!(path = %path.display(), products = inventory.len(), "Loaded inventory");
        Ok(inventory)
    }

    pub fn from_json_str(content: &str) -> Result<Inventory> {
        let root: Value = serde_json::from_str(content)
            .map_err(|e| InventoryError::invalid_data_from("Invalid JSON file", e))?;

        let document: InventoryDocument = serde_json::from_value(root).map_err(|e| {
            InventoryError::invalid_data_from(format!("Error loading inventory: {}", e), e)
        })?;

        let mut inventory = Inventory::new();
        for record in document.products {
            let product = Product::from_record(record)?;
            // 檔案內重複的 ID 直接拒絕整份檔案
            inventory.add(product).map_err(|e| {
                InventoryError::invalid_data_from(format!("Error creating product: {}", e), e)
            })?;
        }
        Ok(inventory)
    }
}
