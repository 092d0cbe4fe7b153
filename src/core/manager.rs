use crate::core::cart::Cart;
use crate::domain::model::UpdateProductAmount;
use crate::domain::ports::{CatalogApi, Notifier, Storage};
use crate::utils::error::{CartError, Operation, Result};
use tokio::sync::Mutex;

pub const DEFAULT_STORAGE_KEY: &str = "@RocketShoes:cart";

/// Owns the shopper's cart for one session.
///
/// Each operation snapshots the cart, awaits its lookups without holding the
/// lock, computes the next cart and commits it. A commit persists and swaps
/// the in-memory copy under the cart lock, so storage and memory always hold
/// the same cart. Operations racing on the same product resolve as
/// last-write-wins.
///
/// Failures are reported through the [`Notifier`] and also returned, so a UI
/// can ignore the result while tests assert on the error kind.
pub struct CartManager<A: CatalogApi, S: Storage, N: Notifier> {
    api: A,
    storage: S,
    notifier: N,
    storage_key: String,
    cart: Mutex<Cart>,
}

impl<A: CatalogApi, S: Storage, N: Notifier> CartManager<A, S, N> {
    pub fn new(api: A, storage: S, notifier: N, storage_key: impl Into<String>) -> Self {
        Self {
            api,
            storage,
            notifier,
            storage_key: storage_key.into(),
            cart: Mutex::new(Cart::new()),
        }
    }

    /// Creates a manager seeded from the persisted cart. A missing key gives
    /// an empty cart; an unreadable record is logged and discarded.
    pub async fn load(
        api: A,
        storage: S,
        notifier: N,
        storage_key: impl Into<String>,
    ) -> Result<Self> {
        let manager = Self::new(api, storage, notifier, storage_key);

        let cart = match manager.storage.get_item(&manager.storage_key).await? {
            Some(raw) => match serde_json::from_str::<Cart>(&raw) {
                Ok(cart) => cart,
                Err(e) => {
                    tracing::warn!(
                        "Discarding unreadable cart stored under '{}': {}",
                        manager.storage_key,
                        e
                    );
                    Cart::new()
                }
            },
            None => Cart::new(),
        };

        tracing::debug!("Loaded cart with {} entries", cart.len());
        *manager.cart.lock().await = cart;
        Ok(manager)
    }

    /// Snapshot of the current cart.
    pub async fn cart(&self) -> Cart {
        self.cart.lock().await.clone()
    }

    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    pub async fn add_product(&self, product_id: u64) -> Result<Cart> {
        let result = self.try_add_product(product_id).await;
        self.settle(Operation::Add, result)
    }

    pub async fn remove_product(&self, product_id: u64) -> Result<Cart> {
        let result = self.try_remove_product(product_id).await;
        self.settle(Operation::Remove, result)
    }

    /// Sets the quantity of a product already in the cart. Non-positive
    /// amounts are ignored without a notification.
    pub async fn update_product_amount(&self, update: UpdateProductAmount) -> Result<Cart> {
        if update.amount <= 0 {
            tracing::debug!(
                "Ignoring non-positive amount {} for product {}",
                update.amount,
                update.product_id
            );
            return Ok(self.cart().await);
        }

        let result = self.try_update_product_amount(update).await;
        self.settle(Operation::UpdateAmount, result)
    }

    async fn try_add_product(&self, product_id: u64) -> Result<Cart> {
        let snapshot = self.cart().await;

        let next = if snapshot.contains(product_id) {
            let stock = self.api.stock(product_id).await?;
            snapshot.increment(product_id, &stock)?
        } else {
            let product = self.api.product(product_id).await?;
            let stock = self.api.stock(product_id).await?;
            snapshot.append(product, &stock)?
        };

        self.commit(next).await
    }

    async fn try_remove_product(&self, product_id: u64) -> Result<Cart> {
        let next = self.cart().await.remove(product_id)?;
        self.commit(next).await
    }

    async fn try_update_product_amount(&self, update: UpdateProductAmount) -> Result<Cart> {
        let UpdateProductAmount { product_id, amount } = update;
        let snapshot = self.cart().await;

        // no stock lookup for a product that is not in the cart
        if !snapshot.contains(product_id) {
            return Err(CartError::NotFound { product_id });
        }

        let stock = self.api.stock(product_id).await?;
        let amount = u32::try_from(amount).unwrap_or(u32::MAX);
        let next = snapshot.set_amount(product_id, amount, &stock)?;

        self.commit(next).await
    }

    async fn commit(&self, next: Cart) -> Result<Cart> {
        let payload = serde_json::to_string(&next)?;

        // held across the write: a failed write leaves memory untouched and
        // concurrent commits cannot interleave between persist and swap
        let mut current = self.cart.lock().await;
        self.storage.set_item(&self.storage_key, &payload).await?;
        tracing::debug!("Persisted cart ({} bytes) under '{}'", payload.len(), self.storage_key);

        *current = next.clone();
        tracing::info!(
            "Cart updated: {} products, {} items",
            next.len(),
            next.total_items()
        );
        Ok(next)
    }

    fn settle(&self, operation: Operation, result: Result<Cart>) -> Result<Cart> {
        if let Err(e) = &result {
            let message = e.notification(operation);
            tracing::warn!("{:?} failed: {} ({:?})", operation, e, e.category());
            self.notifier.error(message);
        }
        result
    }
}
