pub mod toml_config;

use crate::core::ConfigProvider;
use crate::core::manager::DEFAULT_STORAGE_KEY;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use std::time::Duration;

pub use toml_config::TomlConfig;

pub const DEFAULT_API_ENDPOINT: &str = "http://localhost:3333";
pub const DEFAULT_STORAGE_PATH: &str = "./.shop-cart";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;

/// Checks shared by every configuration source.
pub(crate) fn validate_provider<C: ConfigProvider>(config: &C) -> Result<()> {
    validation::validate_url("api_endpoint", config.api_endpoint())?;
    validation::validate_path("storage_path", config.storage_path())?;
    validation::validate_non_empty_string("storage_key", config.storage_key())?;
    validation::validate_range("timeout_seconds", config.request_timeout().as_secs(), 1, 300)?;
    Ok(())
}

#[cfg(feature = "cli")]
pub use cli::{CliConfig, Command};

#[cfg(feature = "cli")]
mod cli {
    use super::*;
    use clap::{Parser, Subcommand};

    #[derive(Debug, Clone, Parser)]
    #[command(name = "shop-cart")]
    #[command(about = "Manage a storefront shopping cart from the terminal")]
    pub struct CliConfig {
        #[arg(long, env = "SHOP_CART_API", default_value = DEFAULT_API_ENDPOINT)]
        pub api_endpoint: String,

        #[arg(long, env = "SHOP_CART_STORAGE", default_value = DEFAULT_STORAGE_PATH)]
        pub storage_path: String,

        #[arg(long, default_value = DEFAULT_STORAGE_KEY)]
        pub storage_key: String,

        #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECONDS)]
        pub timeout_seconds: u64,

        #[arg(long, help = "Read settings from a TOML file instead of flags")]
        pub config: Option<String>,

        #[arg(long, help = "Enable verbose output")]
        pub verbose: bool,

        #[arg(long, help = "Emit logs as JSON")]
        pub json_logs: bool,

        #[command(subcommand)]
        pub command: Command,
    }

    #[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
    pub enum Command {
        /// Show the cart
        List,
        /// Add one unit of a product
        Add { product_id: u64 },
        /// Drop a product from the cart
        Remove { product_id: u64 },
        /// Set the quantity of a product already in the cart
        Update {
            product_id: u64,
            #[arg(allow_negative_numbers = true)]
            amount: i64,
        },
    }

    impl ConfigProvider for CliConfig {
        fn api_endpoint(&self) -> &str {
            &self.api_endpoint
        }

        fn storage_path(&self) -> &str {
            &self.storage_path
        }

        fn storage_key(&self) -> &str {
            &self.storage_key
        }

        fn request_timeout(&self) -> Duration {
            Duration::from_secs(self.timeout_seconds)
        }
    }

    impl Validate for CliConfig {
        fn validate(&self) -> Result<()> {
            validate_provider(self)
        }
    }
}
