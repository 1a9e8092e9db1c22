use thiserror::Error;

#[derive(Error, Debug)]
pub enum InventoryError {
    #[error("Product with ID {product_id} already exists in inventory")]
    DuplicateProduct { product_id: String },

    #[error("Product with ID {product_id} not found in inventory")]
    ProductNotFound { product_id: String },

    #[error(
        "Insufficient stock for product {product_id}. Requested: {requested}, Available: {available}"
    )]
    InsufficientStock {
        product_id: String,
        requested: u64,
        available: u32,
    },

    #[error("Invalid product data: {message}")]
    InvalidProductData {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Invalid product type: {product_type}")]
    InvalidProductType { product_type: String },

    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Catalog,
    Stock,
    Data,
    Input,
    Config,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl InventoryError {
    pub fn invalid_data(message: impl Into<String>) -> Self {
        InventoryError::InvalidProductData {
            message: message.into(),
            source: None,
        }
    }

    /// 包裝底層錯誤，保留原始錯誤作為 source
    pub fn invalid_data_from<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        InventoryError::InvalidProductData {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        InventoryError::InvalidArgument {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            InventoryError::DuplicateProduct { .. }
            | InventoryError::ProductNotFound { .. }
            | InventoryError::InvalidProductType { .. } => ErrorCategory::Catalog,
            InventoryError::InsufficientStock { .. } => ErrorCategory::Stock,
            InventoryError::InvalidProductData { .. }
            | InventoryError::SerializationError(_) => ErrorCategory::Data,
            InventoryError::InvalidArgument { .. } => ErrorCategory::Input,
            InventoryError::ConfigError { .. } => ErrorCategory::Config,
            InventoryError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Catalog | ErrorCategory::Stock | ErrorCategory::Input => {
                ErrorSeverity::Low
            }
            ErrorCategory::Data => ErrorSeverity::Medium,
            ErrorCategory::Config => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            InventoryError::DuplicateProduct { .. } => {
                "Choose a different product ID or remove the existing product first"
            }
            InventoryError::ProductNotFound { .. } => {
                "List all products to check the available IDs"
            }
            InventoryError::InsufficientStock { .. } => {
                "Restock the product or sell a smaller quantity"
            }
            InventoryError::InvalidProductData { .. } => {
                "Check that the file is a valid inventory JSON document"
            }
            InventoryError::InvalidProductType { .. } => {
                "Use one of: Electronics, Grocery, Clothing"
            }
            InventoryError::InvalidArgument { .. } => "Enter a non-negative value",
            InventoryError::ConfigError { .. } => "Check the configuration file and flags",
            InventoryError::IoError(_) => "Check that the path exists and is writable",
            InventoryError::SerializationError(_) => "Check the JSON document structure",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            InventoryError::IoError(e) => format!("File access failed: {}", e),
            InventoryError::ConfigError { message } => {
                format!("Configuration problem: {}", message)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, InventoryError>;
