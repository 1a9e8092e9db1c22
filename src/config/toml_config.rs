use crate::config::{Settings, DEFAULT_DATA_FILE};
use crate::utils::error::{InventoryError, Result};
use crate::utils::validation::{validate_path, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    pub display: Option<DisplayConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_data_file")]
    pub data_file: String,
    pub autoload: Option<bool>,
    pub autosave: Option<bool>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            autoload: None,
            autosave: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    pub currency_symbol: Option<String>,
}

fn default_data_file() -> String {
    DEFAULT_DATA_FILE.to_string()
}

impl TomlConfig {
    /// 從 TOML 檔案載入設定
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| InventoryError::ConfigError {
            message: format!("cannot read {}: {}", path.display(), e),
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: TomlConfig =
            toml::from_str(content).map_err(|e| InventoryError::ConfigError {
                message: format!("TOML parsing error: {}", e),
            })?;
        config.validate()?;
        Ok(config)
    }

    pub fn currency_symbol(&self) -> &str {
        self.display
            .as_ref()
            .and_then(|d| d.currency_symbol.as_deref())
            .unwrap_or("$")
    }

    pub fn into_settings(self) -> Settings {
        let currency_symbol = self.currency_symbol().to_string();
        Settings {
            data_file: self.storage.data_file,
            autoload: self.storage.autoload.unwrap_or(false),
            autosave: self.storage.autosave.unwrap_or(false),
            currency_symbol,
        }
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_path("storage.data_file", &self.storage.data_file)?;

        if let Some(symbol) = self.display.as_ref().and_then(|d| d.currency_symbol.as_ref()) {
            if symbol.chars().count() > 3 {
                return Err(InventoryError::ConfigError {
                    message: format!(
                        "display.currency_symbol '{}' is longer than 3 characters",
                        symbol
                    ),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[storage]
data_file = "shop.json"
autoload = true
autosave = false

[display]
currency_symbol = "€"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.storage.data_file, "shop.json");
        assert_eq!(config.currency_symbol(), "€");

        let settings = config.into_settings();
        assert!(settings.autoload);
        assert!(!settings.autosave);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert_eq!(config.storage.data_file, "inventory.json");
        assert_eq!(config.currency_symbol(), "$");
    }

    #[test]
    fn test_invalid_config_rejected() {
        assert!(TomlConfig::from_toml_str("[storage\ndata_file = 1").is_err());
        assert!(TomlConfig::from_toml_str("[storage]\ndata_file = \"\"").is_err());
        assert!(TomlConfig::from_toml_str("[display]\ncurrency_symbol = \"EURO\"").is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[storage]\ndata_file = \"file-test.json\"\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.storage.data_file, "file-test.json");
        assert!(TomlConfig::from_file("/definitely/not/here.toml").is_err());
    }
}
