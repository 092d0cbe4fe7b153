use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Display attributes of a product (title, price, image, ...). The cart never
/// interprets them beyond the optional `price` used for totals.
pub type Attributes = Map<String, Value>;

/// Product record as returned by `GET /products/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: u64,
    #[serde(flatten)]
    pub attributes: Attributes,
}

/// Stock level as returned by `GET /stock/{id}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stock {
    #[serde(default)]
    pub id: Option<u64>,
    pub amount: u32,
}

/// One product in the cart. Stored flat, e.g.
/// `{"id":1,"title":"Sneaker","price":139.9,"image":"...","amount":2}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartEntry {
    pub id: u64,
    #[serde(flatten)]
    pub attributes: Attributes,
    pub amount: u32,
}

impl CartEntry {
    pub fn from_product(product: Product, amount: u32) -> Self {
        let Product { id, mut attributes } = product;
        // an `amount` coming back from the catalog would collide with ours
        attributes.remove("amount");
        Self {
            id,
            attributes,
            amount,
        }
    }

    pub fn title(&self) -> Option<&str> {
        self.attributes.get("title").and_then(Value::as_str)
    }

    pub fn price(&self) -> Option<f64> {
        self.attributes.get("price").and_then(Value::as_f64)
    }

    pub fn subtotal(&self) -> Option<f64> {
        self.price().map(|price| price * f64::from(self.amount))
    }
}

/// Argument of the update-amount operation. `amount` is signed because
/// non-positive requests are accepted and ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateProductAmount {
    pub product_id: u64,
    pub amount: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_entry_serializes_flat() {
        let product: Product = serde_json::from_value(json!({
            "id": 1,
            "title": "Tênis de Caminhada",
            "price": 179.9,
            "image": "https://example.com/1.jpg"
        }))
        .unwrap();

        let entry = CartEntry::from_product(product, 2);
        let value = serde_json::to_value(&entry).unwrap();

        assert_eq!(value["id"], 1);
        assert_eq!(value["amount"], 2);
        assert_eq!(value["title"], "Tênis de Caminhada");
        assert_eq!(entry.subtotal(), Some(179.9 * 2.0));
    }

    #[test]
    fn test_catalog_amount_is_dropped() {
        let product: Product =
            serde_json::from_value(json!({"id": 4, "title": "Boot", "amount": 99})).unwrap();
        let entry = CartEntry::from_product(product, 1);

        assert_eq!(entry.amount, 1);
        assert!(!entry.attributes.contains_key("amount"));
    }

    #[test]
    fn test_stock_without_id() {
        let stock: Stock = serde_json::from_str(r#"{"amount": 3}"#).unwrap();
        assert_eq!(stock.amount, 3);
        assert_eq!(stock.id, None);
    }

    #[test]
    fn test_entry_without_price() {
        let entry: CartEntry = serde_json::from_str(r#"{"id": 2, "amount": 1}"#).unwrap();
        assert_eq!(entry.price(), None);
        assert_eq!(entry.subtotal(), None);
        assert_eq!(entry.title(), None);
    }
}
