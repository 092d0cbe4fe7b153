use crate::domain::model::{Product, Stock};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Key-value store holding the serialized cart.
pub trait Storage: Send + Sync {
    fn get_item(
        &self,
        key: &str,
    ) -> impl std::future::Future<Output = Result<Option<String>>> + Send;
    fn set_item(
        &self,
        key: &str,
        value: &str,
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// Remote product catalog and stock lookup.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    async fn product(&self, product_id: u64) -> Result<Product>;
    async fn stock(&self, product_id: u64) -> Result<Stock>;
}

/// Surfaces failed operations to the shopper.
pub trait Notifier: Send + Sync {
    fn error(&self, message: &str);
}

pub trait ConfigProvider: Send + Sync {
    fn api_endpoint(&self) -> &str;
    fn storage_path(&self) -> &str;
    fn storage_key(&self) -> &str;
    fn request_timeout(&self) -> Duration;
}
