use anyhow::Context;
use clap::Parser;
use small_inventory::utils::logger;
use small_inventory::{CliConfig, Inventory, MenuApp};
use std::io;

fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting small-inventory");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    let settings = match config.resolve() {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!("Configuration validation failed: {}", e);
            tracing::error!("Suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };

    let inventory = if settings.autoload {
        match Inventory::load(&settings.data_file) {
            Ok(inventory) => inventory,
            Err(e) => {
                tracing::warn!(
                    "Starting with an empty inventory: {} (Category: {:?})",
                    e,
                    e.category()
                );
                eprintln!("⚠️ {}", e.user_friendly_message());
                eprintln!("💡 {}", e.recovery_suggestion());
                Inventory::new()
            }
        }
    } else {
        Inventory::new()
    };

    println!("{}", "=".repeat(50));
    println!("{:^50}", "Inventory Management System");
    println!("{}", "=".repeat(50));

    let stdin = io::stdin();
    let mut app = MenuApp::new(inventory, settings, stdin.lock(), io::stdout());
    app.run().context("menu session failed")?;

    tracing::info!(products = app.inventory().len(), "Exiting small-inventory");
    Ok(())
}
