use crate::config::Settings;
use crate::core::Inventory;
use crate::domain::{Product, ProductKind};
use crate::utils::error::InventoryError;
use crate::utils::validation::validate_quantity;
use std::io::{self, BufRead, Write};

const SEPARATOR: &str = "==============================";

/// Text menu over an [`Inventory`]. Reads one answer per line from `input`.
pub struct MenuApp<R, W> {
    inventory: Inventory,
    settings: Settings,
    input: R,
    output: W,
    running: bool,
}

impl<R: BufRead, W: Write> MenuApp<R, W> {
    pub fn new(inventory: Inventory, settings: Settings, input: R, output: W) -> Self {
        Self {
            inventory,
            settings,
            input,
            output,
            running: true,
        }
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn into_inventory(self) -> Inventory {
        self.inventory
    }

    pub fn run(&mut self) -> io::Result<()> {
        while self.running {
            self.print_menu()?;
            let Some(choice) = self.prompt("Enter your choice (0-10): ")? else {
                break;
            };

            match choice.as_str() {
                "0" => self.running = false,
                "1" => self.add_product()?,
                "2" => self.remove_product()?,
                "3" => self.search_products()?,
                "4" => self.list_products()?,
                "5" => self.sell_product()?,
                "6" => self.restock_product()?,
                "7" => self.remove_expired()?,
                "8" => self.save_inventory()?,
                "9" => self.load_inventory()?,
                "10" => self.show_total_value()?,
                _ => writeln!(self.output, "\nInvalid choice. Please try again.")?,
            }
        }

        if self.settings.autosave {
            let data_file = self.settings.data_file.clone();
            self.save_to(&data_file)?;
        }
        Ok(())
    }

    fn print_menu(&mut self) -> io::Result<()> {
        writeln!(self.output, "\nMain Menu:")?;
        for line in [
            "1. Add Product",
            "2. Remove Product",
            "3. Search Products",
            "4. List All Products",
            "5. Sell Product",
            "6. Restock Product",
            "7. Remove Expired Products",
            "8. Save Inventory",
            "9. Load Inventory",
            "10. Show Total Inventory Value",
            "0. Exit",
        ] {
            writeln!(self.output, "{}", line)?;
        }
        writeln!(self.output)
    }

    /// `None` once the input is exhausted.
    fn prompt(&mut self, message: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", message)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            self.running = false;
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn prompt_parsed<T: std::str::FromStr>(&mut self, message: &str) -> io::Result<Option<T>>
    where
        T::Err: std::fmt::Display,
    {
        let Some(raw) = self.prompt(message)? else {
            return Ok(None);
        };
        match raw.parse::<T>() {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                writeln!(self.output, "Error: Invalid input '{}' - {}", raw, e)?;
                Ok(None)
            }
        }
    }

    fn report(&mut self, err: &InventoryError) -> io::Result<()> {
        tracing::debug!(category = ?err.category(), severity = ?err.severity(), "Menu operation failed: {}", err);
        writeln!(self.output, "\nError: {}", err)
    }

    fn choose_product_type(&mut self) -> io::Result<Option<ProductKind>> {
        loop {
            writeln!(self.output, "\nSelect product type:")?;
            for (index, kind) in ProductKind::ALL.iter().enumerate() {
                writeln!(self.output, "{}. {}", index + 1, kind)?;
            }
            writeln!(self.output, "0. Back to main menu")?;

            let Some(choice) = self.prompt("\nEnter your choice (0-3): ")? else {
                return Ok(None);
            };
            match choice.as_str() {
                "0" => return Ok(None),
                "1" => return Ok(Some(ProductKind::Electronics)),
                "2" => return Ok(Some(ProductKind::Grocery)),
                "3" => return Ok(Some(ProductKind::Clothing)),
                _ => writeln!(self.output, "Invalid choice. Please try again.")?,
            }
        }
    }

    /// Collects the fields for `kind`. Input errors are reported and yield `None`.
    fn read_product(&mut self, kind: ProductKind) -> io::Result<Option<Product>> {
        writeln!(self.output, "\nEnter product details:")?;
        let Some(product_id) = self.prompt("Product ID: ")? else {
            return Ok(None);
        };
        let Some(name) = self.prompt("Name: ")? else {
            return Ok(None);
        };
        let Some(price) = self.prompt_parsed::<f64>("Price: ")? else {
            return Ok(None);
        };
        let Some(quantity) = self.prompt_parsed::<i64>("Quantity in stock: ")? else {
            return Ok(None);
        };
        let quantity = match validate_quantity("Quantity in stock", quantity) {
            Ok(quantity) => quantity,
            Err(e) => {
                self.report(&e)?;
                return Ok(None);
            }
        };

        let product = match kind {
            ProductKind::Electronics => {
                let Some(warranty) = self.prompt_parsed::<u32>("Warranty (years): ")? else {
                    return Ok(None);
                };
                let Some(brand) = self.prompt("Brand: ")? else {
                    return Ok(None);
                };
                Product::electronics(product_id, name, price, quantity, warranty, brand)
            }
            ProductKind::Grocery => {
                let Some(expiry) = self.prompt("Expiry date (YYYY-MM-DD): ")? else {
                    return Ok(None);
                };
                Product::grocery(product_id, name, price, quantity, &expiry)
            }
            ProductKind::Clothing => {
                let Some(size) = self.prompt("Size: ")? else {
                    return Ok(None);
                };
                let Some(material) = self.prompt("Material: ")? else {
                    return Ok(None);
                };
                Product::clothing(product_id, name, price, quantity, size, material)
            }
        };

        match product {
            Ok(product) => Ok(Some(product)),
            Err(e) => {
                self.report(&e)?;
                Ok(None)
            }
        }
    }

    fn add_product(&mut self) -> io::Result<()> {
        let Some(kind) = self.choose_product_type()? else {
            return Ok(());
        };
        let Some(product) = self.read_product(kind)? else {
            return Ok(());
        };

        match self.inventory.add(product) {
            Ok(()) => writeln!(self.output, "\nProduct added successfully!"),
            Err(e) => self.report(&e),
        }
    }

    fn remove_product(&mut self) -> io::Result<()> {
        let Some(product_id) = self.prompt("\nEnter product ID to remove: ")? else {
            return Ok(());
        };
        match self.inventory.remove(&product_id) {
            Ok(_) => writeln!(self.output, "\nProduct removed successfully!"),
            Err(e) => self.report(&e),
        }
    }

    fn search_products(&mut self) -> io::Result<()> {
        writeln!(self.output, "\nSearch options:")?;
        writeln!(self.output, "1. Search by name")?;
        writeln!(self.output, "2. Search by type")?;
        writeln!(self.output, "0. Back to main menu")?;

        let Some(choice) = self.prompt("\nEnter your choice (0-2): ")? else {
            return Ok(());
        };
        let currency_symbol = self.settings.currency_symbol.clone();
        let render = |product: &Product| product.render_with_currency(&currency_symbol);
        let rendered: Vec<String> = match choice.as_str() {
            "0" => return Ok(()),
            "1" => {
                let Some(query) = self.prompt("\nEnter product name to search: ")? else {
                    return Ok(());
                };
                self.inventory
                    .search_by_name(&query)
                    .into_iter()
                    .map(render)
                    .collect()
            }
            "2" => {
                let Some(kind) = self.choose_product_type()? else {
                    return Ok(());
                };
                let found = self
                    .inventory
                    .search_by_type(kind.as_str())
                    .map(|products| products.into_iter().map(render).collect::<Vec<String>>());
                match found {
                    Ok(rendered) => rendered,
                    Err(e) => return self.report(&e),
                }
            }
            _ => return writeln!(self.output, "Invalid choice."),
        };

        if rendered.is_empty() {
            writeln!(self.output, "\nNo products found.")
        } else {
            writeln!(self.output, "\nFound {} products:", rendered.len())?;
            self.print_blocks(&rendered)
        }
    }

    fn print_blocks(&mut self, blocks: &[String]) -> io::Result<()> {
        for block in blocks {
            writeln!(self.output, "\n{}", SEPARATOR)?;
            writeln!(self.output, "{}", block)?;
        }
        Ok(())
    }

    fn list_products(&mut self) -> io::Result<()> {
        if self.inventory.is_empty() {
            return writeln!(self.output, "\nInventory is empty.");
        }

        let currency_symbol = &self.settings.currency_symbol;
        let rendered: Vec<String> = self
            .inventory
            .iter()
            .map(|product| product.render_with_currency(currency_symbol))
            .collect();
        writeln!(self.output, "\nInventory ({} products):", rendered.len())?;
        self.print_blocks(&rendered)
    }

    fn sell_product(&mut self) -> io::Result<()> {
        let Some(product_id) = self.prompt("\nEnter product ID: ")? else {
            return Ok(());
        };
        let Some(quantity) = self.prompt_parsed::<i64>("Enter quantity to sell: ")? else {
            return Ok(());
        };

        match self.inventory.sell(&product_id, quantity) {
            Ok(total) => writeln!(
                self.output,
                "\nSale successful! Total: {}{:.2}",
                self.settings.currency_symbol, total
            ),
            Err(e) => self.report(&e),
        }
    }

    fn restock_product(&mut self) -> io::Result<()> {
        let Some(product_id) = self.prompt("\nEnter product ID: ")? else {
            return Ok(());
        };
        let Some(quantity) = self.prompt_parsed::<i64>("Enter quantity to add: ")? else {
            return Ok(());
        };

        match self.inventory.restock(&product_id, quantity) {
            Ok(()) => writeln!(self.output, "\nProduct restocked successfully!"),
            Err(e) => self.report(&e),
        }
    }

    fn remove_expired(&mut self) -> io::Result<()> {
        let expired = self.inventory.sweep_expired();
        if expired.is_empty() {
            return writeln!(self.output, "\nNo expired products found.");
        }

        writeln!(self.output, "\nRemoved {} expired products:", expired.len())?;
        for product_id in expired {
            writeln!(self.output, "- {}", product_id)?;
        }
        Ok(())
    }

    fn prompt_filename(&mut self, action: &str) -> io::Result<Option<String>> {
        let message = format!(
            "\nEnter filename to {} (default: {}): ",
            action, self.settings.data_file
        );
        Ok(self.prompt(&message)?.map(|name| {
            if name.is_empty() {
                self.settings.data_file.clone()
            } else {
                name
            }
        }))
    }

    fn save_inventory(&mut self) -> io::Result<()> {
        let Some(filename) = self.prompt_filename("save")? else {
            return Ok(());
        };
        self.save_to(&filename)
    }

    fn save_to(&mut self, filename: &str) -> io::Result<()> {
        match self.inventory.save(filename) {
            Ok(()) => writeln!(self.output, "\nInventory saved successfully!"),
            Err(e) => writeln!(self.output, "\nError saving inventory: {}", e),
        }
    }

    fn load_inventory(&mut self) -> io::Result<()> {
        let Some(filename) = self.prompt_filename("load")? else {
            return Ok(());
        };

        // 只有完整載入成功才替換目前的庫存
        match Inventory::load(&filename) {
            Ok(inventory) => {
                self.inventory = inventory;
                writeln!(self.output, "\nInventory loaded successfully!")
            }
            Err(e) => writeln!(self.output, "\nError loading inventory: {}", e),
        }
    }

    fn show_total_value(&mut self) -> io::Result<()> {
        writeln!(
            self.output,
            "\nTotal inventory value: {}{:.2}",
            self.settings.currency_symbol,
            self.inventory.total_value()
        )
    }
}
