use crate::utils::error::{InventoryError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_non_negative_price(field_name: &str, price: f64) -> Result<()> {
    if !price.is_finite() {
        return Err(InventoryError::invalid_argument(format!(
            "{} must be a finite number, got {}",
            field_name, price
        )));
    }
    if price < 0.0 {
        return Err(InventoryError::invalid_argument(format!(
            "{} cannot be negative",
            field_name
        )));
    }
    Ok(())
}

/// 將使用者輸入的數量轉為庫存單位，負數或溢位皆視為無效
pub fn validate_quantity(field_name: &str, value: i64) -> Result<u32> {
    if value < 0 {
        return Err(InventoryError::invalid_argument(format!(
            "{} cannot be negative",
            field_name
        )));
    }
    u32::try_from(value).map_err(|_| {
        InventoryError::invalid_argument(format!(
            "{} must be at most {}, got {}",
            field_name,
            u32::MAX,
            value
        ))
    })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(InventoryError::invalid_argument(format!(
            "{} cannot be empty or whitespace-only",
            field_name
        )));
    }
    Ok(())
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(InventoryError::ConfigError {
            message: format!("{}: path cannot be empty", field_name),
        });
    }

    if path.contains('\0') {
        return Err(InventoryError::ConfigError {
            message: format!("{}: path contains null bytes", field_name),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_non_negative_price() {
        assert!(validate_non_negative_price("price", 0.0).is_ok());
        assert!(validate_non_negative_price("price", 19.99).is_ok());
        assert!(validate_non_negative_price("price", -0.01).is_err());
        assert!(validate_non_negative_price("price", f64::NAN).is_err());
        assert!(validate_non_negative_price("price", f64::INFINITY).is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert_eq!(validate_quantity("quantity", 0).unwrap(), 0);
        assert_eq!(validate_quantity("quantity", 42).unwrap(), 42);
        assert!(matches!(
            validate_quantity("quantity", -1),
            Err(InventoryError::InvalidArgument { .. })
        ));
        assert!(validate_quantity("quantity", i64::from(u32::MAX) + 1).is_err());
    }

    #[test]
    fn test_validate_non_empty_string() {
        assert!(validate_non_empty_string("product_id", "E1").is_ok());
        assert!(validate_non_empty_string("product_id", "").is_err());
        assert!(validate_non_empty_string("product_id", "   ").is_err());
    }

    #[test]
    fn test_validate_path() {
        assert!(validate_path("storage.data_file", "inventory.json").is_ok());
        assert!(validate_path("storage.data_file", "").is_err());
        assert!(validate_path("storage.data_file", "bad\0path").is_err());
    }
}
