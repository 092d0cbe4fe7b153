use thiserror::Error;

/// The cart operation an error was raised from. Decides which generic
/// notification the shopper sees for lookup and storage failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Add,
    Remove,
    UpdateAmount,
}

impl Operation {
    pub fn failure_message(&self) -> &'static str {
        match self {
            Operation::Add => "error adding product",
            Operation::Remove => "error removing product",
            Operation::UpdateAmount => "error changing product quantity",
        }
    }
}

pub const STOCK_EXCEEDED_MESSAGE: &str = "requested quantity exceeds stock";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Stock,
    NotFound,
    Transport,
    Storage,
    Configuration,
}

#[derive(Error, Debug)]
pub enum CartError {
    #[error("Requested quantity {requested} of product {product_id} exceeds stock of {available}")]
    StockExceeded {
        product_id: u64,
        requested: u32,
        available: u32,
    },

    #[error("Product {product_id} is not in the cart")]
    NotFound { product_id: u64 },

    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("Lookup of {url} failed with status {status}")]
    LookupError { url: String, status: u16 },

    #[error("Storage error: {0}")]
    StorageError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

impl CartError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            CartError::StockExceeded { .. } => ErrorCategory::Stock,
            CartError::NotFound { .. } => ErrorCategory::NotFound,
            CartError::ApiError(_) | CartError::LookupError { .. } => ErrorCategory::Transport,
            CartError::StorageError(_) | CartError::SerializationError(_) => {
                ErrorCategory::Storage
            }
            CartError::ConfigError { .. }
            | CartError::InvalidConfigValueError { .. }
            | CartError::MissingConfigError { .. } => ErrorCategory::Configuration,
        }
    }

    /// Message shown to the shopper when `operation` fails with this error.
    /// Only a stock shortage gets its own wording; everything else falls back
    /// to the operation-level message.
    pub fn notification(&self, operation: Operation) -> &'static str {
        match self {
            CartError::StockExceeded { .. } => STOCK_EXCEEDED_MESSAGE,
            _ => operation.failure_message(),
        }
    }

    pub fn is_stock_exceeded(&self) -> bool {
        matches!(self, CartError::StockExceeded { .. })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, CartError::NotFound { .. })
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            CartError::StockExceeded { available, .. } => {
                format!("Only {} unit(s) in stock", available)
            }
            CartError::NotFound { product_id } => {
                format!("Product {} is not in your cart", product_id)
            }
            CartError::ApiError(_) => "Could not reach the store API".to_string(),
            CartError::LookupError { status, .. } => {
                format!("The store API answered with status {}", status)
            }
            CartError::StorageError(_) | CartError::SerializationError(_) => {
                "Could not save the cart".to_string()
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Stock => "Lower the quantity or try again later",
            ErrorCategory::NotFound => "List the cart to see which products it holds",
            ErrorCategory::Transport => "Check --api-endpoint and that the API is running",
            ErrorCategory::Storage => "Check that --storage-path is writable",
            ErrorCategory::Configuration => "Fix the configuration value and retry",
        }
    }
}

pub type Result<T> = std::result::Result<T, CartError>;
