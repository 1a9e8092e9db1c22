use anyhow::Result;
use small_inventory::{Inventory, InventoryError, Product, ProductKind};
use std::error::Error as _;
use tempfile::TempDir;

fn sample_inventory() -> Result<Inventory> {
    let mut inventory = Inventory::new();
    inventory.add(Product::electronics("E1", "Laptop", 999.99, 5, 2, "Acme")?)?;
    inventory.add(Product::grocery("G1", "Milk", 2.5, 10, "2031-01-15")?)?;
    inventory.add(Product::clothing("C1", "Jacket", 80.0, 0, "L", "Leather")?)?;
    inventory.add(Product::grocery("G2", "Cheese", 7.25, 3, "2001-05-05")?)?;
    Ok(inventory)
}

/// 儲存後再載入，所有欄位與順序都應一致
#[test]
fn test_save_then_load_round_trip() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("inventory.json");

    let original = sample_inventory()?;
    original.save(&path)?;
    let restored = Inventory::load(&path)?;

    assert_eq!(restored.len(), original.len());
    for (before, after) in original.iter().zip(restored.iter()) {
        assert_eq!(before, after);
        assert_eq!(before.kind(), after.kind());
    }
    assert_eq!(restored.total_value(), original.total_value());
    Ok(())
}

/// 價格在存檔後應完全一致，不可有最後一位的誤差
#[test]
fn test_round_trip_keeps_exact_prices() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("prices.json");
    let prices = [394301.33835633675, 212918.90726713458, 902747.4764568267, 0.1 + 0.2];

    let mut inventory = Inventory::new();
    for (index, price) in prices.iter().enumerate() {
        let product_id = format!("C{}", index);
        inventory.add(Product::clothing(product_id, "Coat", *price, 1, "M", "Wool")?)?;
    }
    inventory.save(&path)?;
    let restored = Inventory::load(&path)?;

    for (index, price) in prices.iter().enumerate() {
        let product = restored.get(&format!("C{}", index))?;
        assert_eq!(product.price().to_bits(), price.to_bits());
    }
    assert_eq!(restored.total_value(), inventory.total_value());
    Ok(())
}

#[test]
fn test_saved_file_layout() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("inventory.json");
    sample_inventory()?.save(&path)?;

    let content = std::fs::read_to_string(&path)?;
    assert!(content.starts_with("{\n  \"products\": ["));

    let value: serde_json::Value = serde_json::from_str(&content)?;
    let products = value["products"].as_array().expect("products array");
    assert_eq!(products.len(), 4);
    assert_eq!(products[0]["type"], "Electronics");
    assert_eq!(products[0]["warranty_years"], 2);
    assert_eq!(products[1]["type"], "Grocery");
    assert_eq!(products[1]["expiry_date"], "2031-01-15");
    assert_eq!(products[2]["material"], "Leather");
    Ok(())
}

#[test]
fn test_save_overwrites_existing_file() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("inventory.json");

    sample_inventory()?.save(&path)?;
    Inventory::new().save(&path)?;

    assert!(Inventory::load(&path)?.is_empty());
    Ok(())
}

#[test]
fn test_load_hand_written_file() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("hand.json");
    std::fs::write(
        &path,
        r#"{
  "products": [
    {"product_id": "G9", "name": "Apples", "price": 3, "quantity_in_stock": 12,
     "type": "Grocery", "expiry_date": "2000-01-01"},
    {"product_id": "C9", "name": "Socks", "price": 4.5, "quantity_in_stock": 30,
     "type": "Clothing", "size": "M", "material": "Cotton"}
  ]
}"#,
    )?;

    let mut inventory = Inventory::load(&path)?;
    assert_eq!(inventory.search_by_type("Grocery")?.len(), 1);
    assert_eq!(inventory.get("G9")?.kind(), ProductKind::Grocery);
    assert_eq!(inventory.get("C9")?.price(), 4.5);

    assert_eq!(inventory.sweep_expired(), ["G9"]);
    assert_eq!(inventory.len(), 1);
    Ok(())
}

#[test]
fn test_load_invalid_json() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("broken.json");
    std::fs::write(&path, "{\"products\": [")?;

    let err = Inventory::load(&path).unwrap_err();
    assert!(matches!(err, InventoryError::InvalidProductData { .. }));
    assert!(err.to_string().contains("Invalid JSON file"));
    assert!(err.source().is_some());
    Ok(())
}

#[test]
fn test_load_unknown_product_type() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("furniture.json");
    std::fs::write(
        &path,
        serde_json::json!({
            "products": [{
                "product_id": "F1",
                "name": "Chair",
                "price": 45.0,
                "quantity_in_stock": 2,
                "type": "Furniture"
            }]
        })
        .to_string(),
    )?;

    let err = Inventory::load(&path).unwrap_err();
    assert!(matches!(err, InventoryError::InvalidProductData { .. }));
    assert!(err.to_string().contains("Furniture"));
    Ok(())
}

#[test]
fn test_load_missing_field_and_missing_file() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("partial.json");
    std::fs::write(
        &path,
        r#"{"products": [{"product_id": "E1", "name": "TV", "price": 10,
            "quantity_in_stock": 1, "type": "Electronics", "brand": "Acme"}]}"#,
    )?;

    let err = Inventory::load(&path).unwrap_err();
    assert!(err.to_string().contains("Error creating product"));

    let err = Inventory::load(temp_dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, InventoryError::InvalidProductData { .. }));
    assert!(err.to_string().contains("Error loading inventory"));
    Ok(())
}

#[test]
fn test_failed_load_keeps_existing_store() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("broken.json");
    std::fs::write(&path, "not json at all")?;

    let mut current = sample_inventory()?;
    if let Ok(loaded) = Inventory::load(&path) {
        current = loaded;
    }
    assert_eq!(current.len(), 4);
    Ok(())
}
