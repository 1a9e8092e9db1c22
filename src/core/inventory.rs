use crate::domain::{Product, ProductKind};
use crate::utils::error::{InventoryError, Result};
use chrono::{Local, NaiveDate};
use std::collections::HashMap;
use std::fmt;

/// In-memory product store keyed by product id.
///
/// Iteration (list, search, save, sweep) follows insertion order.
#[derive(Debug, Clone, Default)]
pub struct Inventory {
    products: HashMap<String, Product>,
    order: Vec<String>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn contains(&self, product_id: &str) -> bool {
        self.products.contains_key(product_id)
    }

    pub fn add(&mut self, product: Product) -> Result<()> {
        if self.products.contains_key(product.product_id()) {
            return Err(InventoryError::DuplicateProduct {
                product_id: product.product_id().to_string(),
            });
        }

        tracing::debug!(product_id = product.product_id(), kind = %product.kind(), "Adding product");
        self.order.push(product.product_id().to_string());
        self.products
            .insert(product.product_id().to_string(), product);
        Ok(())
    }

    pub fn remove(&mut self, product_id: &str) -> Result<Product> {
        let product = self
            .products
            .remove(product_id)
            .ok_or_else(|| not_found(product_id))?;
        self.order.retain(|id| id != product_id);

        tracing::debug!(product_id, "Removed product");
        Ok(product)
    }

    pub fn get(&self, product_id: &str) -> Result<&Product> {
        self.products
            .get(product_id)
            .ok_or_else(|| not_found(product_id))
    }

    /// Mutable handle into the store; changes are visible to later reads.
    pub fn get_mut(&mut self, product_id: &str) -> Result<&mut Product> {
        self.products
            .get_mut(product_id)
            .ok_or_else(|| not_found(product_id))
    }

    pub fn list_all(&self) -> Vec<&Product> {
        self.iter().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Product> + '_ {
        self.order.iter().filter_map(|id| self.products.get(id))
    }

    /// Case-insensitive substring match on the product name.
    pub fn search_by_name(&self, query: &str) -> Vec<&Product> {
        let query = query.to_lowercase();
        self.iter()
            .filter(|product| product.name().to_lowercase().contains(&query))
            .collect()
    }

    pub fn search_by_type(&self, product_type: &str) -> Result<Vec<&Product>> {
        let kind: ProductKind = product_type.parse()?;
        Ok(self.iter().filter(|product| product.kind() == kind).collect())
    }

    pub fn sell(&mut self, product_id: &str, quantity: i64) -> Result<f64> {
        let total = self.get_mut(product_id)?.sell(quantity)?;
        tracing::debug!(product_id, quantity, total, "Sold product");
        Ok(total)
    }

    pub fn restock(&mut self, product_id: &str, quantity: i64) -> Result<()> {
        self.get_mut(product_id)?.restock(quantity)?;
        tracing::debug!(product_id, quantity, "Restocked product");
        Ok(())
    }

    pub fn total_value(&self) -> f64 {
        self.iter().map(Product::total_value).sum()
    }

    /// Removes every grocery that has expired as of today's local date.
    pub fn sweep_expired(&mut self) -> Vec<String> {
        self.sweep_expired_on(Local::now().date_naive())
    }

    pub fn sweep_expired_on(&mut self, today: NaiveDate) -> Vec<String> {
        let expired: Vec<String> = self
            .iter()
            .filter(|product| product.is_expired_on(today))
            .map(|product| product.product_id().to_string())
            .collect();

        for product_id in &expired {
            self.products.remove(product_id);
        }
        self.order.retain(|id| !expired.contains(id));

        if !expired.is_empty() {
            tracing::warn!(count = expired.len(), ids = ?expired, "Removed expired products");
        }
        expired
    }
}

impl fmt::Display for Inventory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("Inventory is empty");
        }

        write!(f, "Inventory ({} products):", self.len())?;
        for product in self.iter() {
            write!(f, "\n\n{}", product)?;
        }
        Ok(())
    }
}

fn not_found(product_id: &str) -> InventoryError {
    InventoryError::ProductNotFound {
        product_id: product_id.to_string(),
    }
}
