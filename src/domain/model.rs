use crate::utils::error::{InventoryError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_non_negative_price, validate_quantity, Validate,
};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Discriminator tag for the three product variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProductKind {
    Electronics,
    Grocery,
    Clothing,
}

impl ProductKind {
    pub const ALL: [ProductKind; 3] = [
        ProductKind::Electronics,
        ProductKind::Grocery,
        ProductKind::Clothing,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProductKind::Electronics => "Electronics",
            ProductKind::Grocery => "Grocery",
            ProductKind::Clothing => "Clothing",
        }
    }
}

impl fmt::Display for ProductKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProductKind {
    type Err = InventoryError;

    fn from_str(s: &str) -> Result<Self> {
        ProductKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| InventoryError::InvalidProductType {
                product_type: s.to_string(),
            })
    }
}

/// Variant-specific fields. Serialized inline next to the common fields,
/// with the variant name written to the `type` key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ProductDetails {
    Electronics { warranty_years: u32, brand: String },
    Grocery { expiry_date: NaiveDate },
    Clothing { size: String, material: String },
}

impl ProductDetails {
    pub fn kind(&self) -> ProductKind {
        match self {
            ProductDetails::Electronics { .. } => ProductKind::Electronics,
            ProductDetails::Grocery { .. } => ProductKind::Grocery,
            ProductDetails::Clothing { .. } => ProductKind::Clothing,
        }
    }
}

/// A sellable catalog entry.
///
/// `product_id` and `name` are fixed at construction. Stock only moves
/// through [`Product::sell`] and [`Product::restock`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    product_id: String,
    name: String,
    price: f64,
    quantity_in_stock: u32,
    #[serde(flatten)]
    details: ProductDetails,
}

impl Product {
    pub fn new(
        product_id: impl Into<String>,
        name: impl Into<String>,
        price: f64,
        quantity_in_stock: u32,
        details: ProductDetails,
    ) -> Result<Self> {
        let product = Self {
            product_id: product_id.into(),
            name: name.into(),
            price,
            quantity_in_stock,
            details,
        };
        product.validate()?;
        Ok(product)
    }

    pub fn electronics(
        product_id: impl Into<String>,
        name: impl Into<String>,
        price: f64,
        quantity_in_stock: u32,
        warranty_years: u32,
        brand: impl Into<String>,
    ) -> Result<Self> {
        Self::new(
            product_id,
            name,
            price,
            quantity_in_stock,
            ProductDetails::Electronics {
                warranty_years,
                brand: brand.into(),
            },
        )
    }

    /// `expiry_date` must be an ISO `YYYY-MM-DD` date.
    pub fn grocery(
        product_id: impl Into<String>,
        name: impl Into<String>,
        price: f64,
        quantity_in_stock: u32,
        expiry_date: &str,
    ) -> Result<Self> {
        let expiry_date = parse_expiry_date(expiry_date)?;
        Self::new(
            product_id,
            name,
            price,
            quantity_in_stock,
            ProductDetails::Grocery { expiry_date },
        )
    }

    pub fn clothing(
        product_id: impl Into<String>,
        name: impl Into<String>,
        price: f64,
        quantity_in_stock: u32,
        size: impl Into<String>,
        material: impl Into<String>,
    ) -> Result<Self> {
        Self::new(
            product_id,
            name,
            price,
            quantity_in_stock,
            ProductDetails::Clothing {
                size: size.into(),
                material: material.into(),
            },
        )
    }

    pub fn product_id(&self) -> &str {
        &self.product_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn quantity_in_stock(&self) -> u32 {
        self.quantity_in_stock
    }

    pub fn details(&self) -> &ProductDetails {
        &self.details
    }

    pub fn kind(&self) -> ProductKind {
        self.details.kind()
    }

    pub fn expiry_date(&self) -> Option<NaiveDate> {
        match self.details {
            ProductDetails::Grocery { expiry_date } => Some(expiry_date),
            _ => None,
        }
    }

    pub fn set_price(&mut self, new_price: f64) -> Result<()> {
        validate_non_negative_price("Price", new_price)?;
        self.price = new_price;
        Ok(())
    }

    /// Removes `quantity` units from stock and returns the sale total,
    /// priced at the current unit price.
    pub fn sell(&mut self, quantity: i64) -> Result<f64> {
        let requested = u64::try_from(quantity).map_err(|_| {
            InventoryError::invalid_argument("Sale quantity cannot be negative")
        })?;
        if requested > u64::from(self.quantity_in_stock) {
            return Err(InventoryError::InsufficientStock {
                product_id: self.product_id.clone(),
                requested,
                available: self.quantity_in_stock,
            });
        }

        // 已確認不超過庫存，必定可轉為 u32
        let quantity = validate_quantity("Sale quantity", quantity)?;
        let total = self.price * f64::from(quantity);
        self.quantity_in_stock -= quantity;
        Ok(total)
    }

    pub fn restock(&mut self, amount: i64) -> Result<()> {
        let amount = validate_quantity("Restock amount", amount)?;
        self.quantity_in_stock = self
            .quantity_in_stock
            .checked_add(amount)
            .ok_or_else(|| {
                InventoryError::invalid_argument(format!(
                    "Restock would exceed the maximum stock of {}",
                    u32::MAX
                ))
            })?;
        Ok(())
    }

    pub fn total_value(&self) -> f64 {
        self.price * f64::from(self.quantity_in_stock)
    }

    /// Expiry against the local calendar date, recomputed on every call.
    pub fn is_expired(&self) -> bool {
        self.is_expired_on(Local::now().date_naive())
    }

    /// A grocery is expired once `today` is strictly after its expiry date.
    /// Other variants never expire.
    pub fn is_expired_on(&self, today: NaiveDate) -> bool {
        match self.details {
            ProductDetails::Grocery { expiry_date } => today > expiry_date,
            _ => false,
        }
    }

    pub fn to_record(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Rebuilds a product from one flat record produced by [`Product::to_record`].
    pub fn from_record(record: Value) -> Result<Self> {
        let tag = match record.get("type") {
            Some(Value::String(tag)) => tag.clone(),
            Some(other) => other.to_string(),
            None => "<missing>".to_string(),
        };
        if ProductKind::from_str(&tag).is_err() {
            return Err(InventoryError::invalid_data(format!(
                "Unknown product type: {}",
                tag
            )));
        }

        let product: Product = serde_json::from_value(record).map_err(|e| {
            InventoryError::invalid_data_from(format!("Error creating product: {}", e), e)
        })?;
        product.validate().map_err(|e| {
            InventoryError::invalid_data_from(format!("Error creating product: {}", e), e)
        })?;
        Ok(product)
    }

    pub fn render(&self) -> String {
        self.to_string()
    }

    /// Same layout as [`Product::render`] with `currency_symbol` in the price line.
    pub fn render_with_currency(&self, currency_symbol: &str) -> String {
        Rendered {
            product: self,
            currency_symbol,
        }
        .to_string()
    }
}

impl Validate for Product {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("Product ID", &self.product_id)?;
        validate_non_negative_price("Price", self.price)
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = Rendered {
            product: self,
            currency_symbol: "$",
        };
        fmt::Display::fmt(&rendered, f)
    }
}

struct Rendered<'a> {
    product: &'a Product,
    currency_symbol: &'a str,
}

impl fmt::Display for Rendered<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let product = self.product;
        write!(
            f,
            "Product ID: {}\nName: {}\nPrice: {}{:.2}\nQuantity in Stock: {}",
            product.product_id,
            product.name,
            self.currency_symbol,
            product.price,
            product.quantity_in_stock
        )?;

        match &product.details {
            ProductDetails::Electronics {
                warranty_years,
                brand,
            } => write!(f, "\nBrand: {}\nWarranty: {} years", brand, warranty_years),
            ProductDetails::Grocery { expiry_date } => {
                let status = if product.is_expired() { "EXPIRED" } else { "Valid" };
                write!(
                    f,
                    "\nExpiry Date: {}\nStatus: {}",
                    expiry_date.format("%Y-%m-%d"),
                    status
                )
            }
            ProductDetails::Clothing { size, material } => {
                write!(f, "\nSize: {}\nMaterial: {}", size, material)
            }
        }
    }
}

pub fn parse_expiry_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|e| {
        InventoryError::invalid_data_from(
            format!("Invalid expiry date '{}', expected YYYY-MM-DD", value),
            e,
        )
    })
}
