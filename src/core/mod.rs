pub mod cart;
pub mod manager;

pub use crate::domain::model::{CartEntry, Product, Stock, UpdateProductAmount};
pub use crate::domain::ports::{CatalogApi, ConfigProvider, Notifier, Storage};
pub use crate::utils::error::Result;
