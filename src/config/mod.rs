pub mod toml_config;

use crate::utils::error::Result;
use crate::utils::validation::{validate_path, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
use serde::{Deserialize, Serialize};
use toml_config::TomlConfig;

pub const DEFAULT_DATA_FILE: &str = "inventory.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(Parser))]
#[cfg_attr(feature = "cli", command(name = "small-inventory"))]
#[cfg_attr(
    feature = "cli",
    command(about = "Interactive inventory manager for electronics, groceries and clothing")
)]
pub struct CliConfig {
    /// JSON file used by the save and load menu entries
    #[cfg_attr(feature = "cli", arg(long))]
    pub data_file: Option<String>,

    /// Optional TOML settings file
    #[cfg_attr(feature = "cli", arg(short, long))]
    pub config: Option<String>,

    /// Load the data file before showing the menu
    #[cfg_attr(feature = "cli", arg(long))]
    pub load: bool,

    #[cfg_attr(feature = "cli", arg(short, long, help = "Enable verbose output"))]
    pub verbose: bool,

    #[cfg_attr(feature = "cli", arg(long, help = "Emit logs as JSON lines"))]
    pub json_logs: bool,
}

/// Effective settings after merging the TOML file with command-line flags.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub data_file: String,
    pub autoload: bool,
    pub autosave: bool,
    pub currency_symbol: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_file: DEFAULT_DATA_FILE.to_string(),
            autoload: false,
            autosave: false,
            currency_symbol: "$".to_string(),
        }
    }
}

impl CliConfig {
    /// 命令列參數優先於 TOML 設定
    pub fn resolve(&self) -> Result<Settings> {
        let mut settings = match &self.config {
            Some(path) => TomlConfig::from_file(path)?.into_settings(),
            None => Settings::default(),
        };

        if let Some(data_file) = &self.data_file {
            settings.data_file = data_file.clone();
        }
        if self.load {
            settings.autoload = true;
        }

        settings.validate()?;
        Ok(settings)
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validate_path("data_file", &self.data_file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn flags() -> CliConfig {
        CliConfig {
            data_file: None,
            config: None,
            load: false,
            verbose: false,
            json_logs: false,
        }
    }

    #[test]
    fn test_resolve_defaults() {
        let settings = flags().resolve().unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.data_file, "inventory.json");
    }

    #[test]
    fn test_flags_override_toml() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(
            br#"
[storage]
data_file = "from-toml.json"
autosave = true
"#,
        )
        .unwrap();

        let mut config = flags();
        config.config = Some(file.path().to_string_lossy().into_owned());
        let settings = config.resolve().unwrap();
        assert_eq!(settings.data_file, "from-toml.json");
        assert!(settings.autosave);
        assert!(!settings.autoload);

        config.data_file = Some("from-flag.json".to_string());
        config.load = true;
        let settings = config.resolve().unwrap();
        assert_eq!(settings.data_file, "from-flag.json");
        assert!(settings.autoload);
    }

    #[test]
    fn test_resolve_rejects_empty_data_file() {
        let mut config = flags();
        config.data_file = Some(String::new());
        assert!(config.resolve().is_err());
    }
}
