pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, Command};

pub use adapters::http::HttpCatalog;
pub use adapters::notify::{ConsoleNotifier, RecordingNotifier};
pub use adapters::storage::{LocalStorage, MemoryStorage};
pub use config::TomlConfig;
pub use crate::core::{cart::Cart, manager::CartManager};
pub use domain::model::{CartEntry, Product, Stock, UpdateProductAmount};
pub use utils::error::{CartError, Result};
