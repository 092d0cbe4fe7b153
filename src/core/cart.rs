use crate::domain::model::{CartEntry, Product, Stock};
use crate::utils::error::{CartError, Result};
use serde::{Deserialize, Serialize};

/// Ordered list of cart entries, at most one per product id.
///
/// Every transition is pure: it borrows the current cart, checks the guard
/// against the freshly fetched data and returns the next cart. The caller
/// decides whether to commit it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<CartEntry>", into = "Vec<CartEntry>")]
pub struct Cart {
    entries: Vec<CartEntry>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a cart from stored entries. Later duplicates of an id are
    /// dropped so the one-entry-per-product invariant holds.
    pub fn from_entries(entries: Vec<CartEntry>) -> Self {
        let mut cart = Self::new();
        for entry in entries {
            if cart.find(entry.id).is_none() {
                cart.entries.push(entry);
            }
        }
        cart
    }

    pub fn entries(&self) -> &[CartEntry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<CartEntry> {
        self.entries
    }

    pub fn find(&self, product_id: u64) -> Option<&CartEntry> {
        self.entries.iter().find(|entry| entry.id == product_id)
    }

    pub fn contains(&self, product_id: u64) -> bool {
        self.find(product_id).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of the quantities of every entry.
    pub fn total_items(&self) -> u64 {
        self.entries.iter().map(|entry| u64::from(entry.amount)).sum()
    }

    /// Price times quantity summed over the entries that carry a price.
    pub fn total(&self) -> f64 {
        self.entries.iter().filter_map(CartEntry::subtotal).sum()
    }

    /// Adds one more unit of a product already in the cart.
    pub fn increment(&self, product_id: u64, stock: &Stock) -> Result<Cart> {
        let current = self
            .find(product_id)
            .ok_or(CartError::NotFound { product_id })?;

        if current.amount >= stock.amount {
            return Err(CartError::StockExceeded {
                product_id,
                requested: current.amount.saturating_add(1),
                available: stock.amount,
            });
        }

        Ok(self.map_entry(product_id, |entry| entry.amount += 1))
    }

    /// Appends a product that is not yet in the cart with quantity 1.
    pub fn append(&self, product: Product, stock: &Stock) -> Result<Cart> {
        if stock.amount < 1 {
            return Err(CartError::StockExceeded {
                product_id: product.id,
                requested: 1,
                available: stock.amount,
            });
        }

        if self.contains(product.id) {
            return self.increment(product.id, stock);
        }

        let mut entries = self.entries.clone();
        entries.push(CartEntry::from_product(product, 1));
        Ok(Cart { entries })
    }

    pub fn remove(&self, product_id: u64) -> Result<Cart> {
        if !self.contains(product_id) {
            return Err(CartError::NotFound { product_id });
        }

        let entries = self
            .entries
            .iter()
            .filter(|entry| entry.id != product_id)
            .cloned()
            .collect();
        Ok(Cart { entries })
    }

    /// Sets the quantity of an entry to exactly `amount`, which must be
    /// positive and within stock.
    pub fn set_amount(&self, product_id: u64, amount: u32, stock: &Stock) -> Result<Cart> {
        if !self.contains(product_id) {
            return Err(CartError::NotFound { product_id });
        }

        if amount > stock.amount {
            return Err(CartError::StockExceeded {
                product_id,
                requested: amount,
                available: stock.amount,
            });
        }

        Ok(self.map_entry(product_id, |entry| entry.amount = amount))
    }

    fn map_entry(&self, product_id: u64, f: impl Fn(&mut CartEntry)) -> Cart {
        let entries = self
            .entries
            .iter()
            .cloned()
            .map(|mut entry| {
                if entry.id == product_id {
                    f(&mut entry);
                }
                entry
            })
            .collect();
        Cart { entries }
    }
}

impl From<Vec<CartEntry>> for Cart {
    fn from(entries: Vec<CartEntry>) -> Self {
        Self::from_entries(entries)
    }
}

impl From<Cart> for Vec<CartEntry> {
    fn from(cart: Cart) -> Self {
        cart.entries
    }
}
