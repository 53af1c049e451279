//! Cart Aggregate

use serde::{Deserialize, Serialize};
use crate::domain::value_objects::Money;

/// Session shopping cart. Only the line-item collection is persisted; the
/// drawer flag is per-tab UI state and never leaves the process.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Cart {
    items: Vec<CartLine>,
    currency: String,
    #[serde(skip)]
    open: bool,
}

/// One product variant the shopper intends to buy. A line is identified by
/// the (product_id, weight) pair; `weight` is the free-form variant label
/// shown on the storefront, e.g. "500g".
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: String,
    pub slug: Option<String>,
    pub name: String,
    pub image_url: String,
    pub weight: String,
    pub unit_price: Money,
    pub quantity: u32,
}

impl CartLine {
    pub fn line_total(&self) -> Money { self.unit_price.multiply(self.quantity) }
}

impl Cart {
    pub fn new() -> Self {
        Self { items: vec![], currency: "VND".to_string(), open: false }
    }

    pub fn items(&self) -> &[CartLine] { &self.items }
    pub fn currency(&self) -> &str { &self.currency }
    pub fn line_count(&self) -> usize { self.items.len() }
    pub fn is_empty(&self) -> bool { self.items.is_empty() }

    /// Adds a line to the cart. An existing line with the same
    /// (product_id, weight) pair absorbs the quantity; anything else is
    /// appended as a new line.
    pub fn add_item(&mut self, item: CartLine) {
        if let Some(existing) = self.items.iter_mut().find(|i| i.product_id == item.product_id && i.weight == item.weight) {
            existing.quantity += item.quantity;
        } else {
            self.items.push(item);
        }
    }

    /// Sets a line's quantity exactly. Zero or below removes the line
    /// instead of clamping. Unknown lines are left alone.
    pub fn update_quantity(&mut self, product_id: &str, weight: &str, quantity: i32) {
        if quantity <= 0 {
            self.remove_item(product_id, weight);
        } else if let Some(item) = self.items.iter_mut().find(|i| i.product_id == product_id && i.weight == weight) {
            item.quantity = quantity as u32;
        }
    }

    /// Removes the matching line. Absent lines are a no-op.
    pub fn remove_item(&mut self, product_id: &str, weight: &str) {
        self.items.retain(|i| !(i.product_id == product_id && i.weight == weight));
    }

    pub fn clear(&mut self) { self.items.clear(); }

    /// Sum of quantities across all lines.
    pub fn total_items(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity)).sum()
    }

    /// Subtotal over all lines. Tax and shipping are somebody else's job.
    pub fn total_price(&self) -> Money {
        self.items.iter().fold(Money::zero(&self.currency), |acc, i| acc.add(&i.line_total()).unwrap_or(acc))
    }

    pub fn is_open(&self) -> bool { self.open }
    pub fn open(&mut self) { self.open = true; }
    pub fn close(&mut self) { self.open = false; }
    pub fn toggle(&mut self) { self.open = !self.open; }
}

impl Default for Cart {
    fn default() -> Self { Self::new() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn line(product_id: &str, weight: &str, price: i64, quantity: u32) -> CartLine {
        CartLine {
            product_id: product_id.into(), slug: None, name: product_id.into(),
            image_url: format!("/images/{}.jpg", product_id), weight: weight.into(),
            unit_price: Money::vnd(Decimal::new(price, 0)), quantity,
        }
    }

    #[test]
    fn test_add_merges_same_product_and_weight() {
        let mut cart = Cart::new();
        cart.add_item(line("cha-bong", "500g", 120_000, 2));
        cart.add_item(line("cha-bong", "500g", 120_000, 1));
        cart.add_item(line("cha-bong", "500g", 120_000, 4));
        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.items()[0].quantity, 7); // Merged
    }

    #[test]
    fn test_same_product_different_weight_is_distinct() {
        let mut cart = Cart::new();
        cart.add_item(line("cha-bong", "500g", 120_000, 1));
        cart.add_item(line("cha-bong", "1kg", 230_000, 2));
        assert_eq!(cart.line_count(), 2);
        assert_eq!(cart.items()[0].quantity, 1);
        assert_eq!(cart.items()[1].quantity, 2);
    }

    #[test]
    fn test_update_quantity_sets_not_adds() {
        let mut cart = Cart::new();
        cart.add_item(line("muoi-tom", "200g", 45_000, 2));
        cart.update_quantity("muoi-tom", "200g", 5);
        assert_eq!(cart.items()[0].quantity, 5);
    }

    #[test]
    fn test_update_quantity_zero_or_negative_removes() {
        let mut cart = Cart::new();
        cart.add_item(line("muoi-tom", "200g", 45_000, 2));
        cart.update_quantity("muoi-tom", "200g", 0);
        assert!(cart.is_empty());

        cart.add_item(line("muoi-tom", "200g", 45_000, 2));
        cart.update_quantity("muoi-tom", "200g", -3);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_quantity_unknown_line_is_noop() {
        let mut cart = Cart::new();
        cart.add_item(line("cha-bong", "500g", 120_000, 2));
        cart.update_quantity("cha-bong", "1kg", 9);
        cart.update_quantity("banh-trang", "500g", 0);
        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.items()[0].quantity, 2);
    }

    #[test]
    fn test_remove_is_keyed_on_both_fields() {
        let mut cart = Cart::new();
        cart.add_item(line("cha-bong", "500g", 120_000, 1));
        cart.add_item(line("cha-bong", "1kg", 230_000, 1));
        cart.remove_item("cha-bong", "500g");
        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.items()[0].weight, "1kg");
        cart.remove_item("cha-bong", "500g"); // already gone, no-op
        assert_eq!(cart.line_count(), 1);
    }

    #[test]
    fn test_totals() {
        let mut cart = Cart::new();
        cart.add_item(line("cha-bong", "500g", 120_000, 2));
        cart.add_item(line("muoi-tom", "200g", 45_000, 3));
        assert_eq!(cart.total_items(), 5);
        assert_eq!(cart.total_price().amount(), Decimal::new(375_000, 0));
        assert_eq!(cart.total_price().currency(), "VND");
    }

    #[test]
    fn test_clear_empties_regardless_of_state() {
        let mut cart = Cart::new();
        assert_eq!(cart.total_items(), 0);
        cart.clear();
        assert_eq!(cart.total_items(), 0);
        cart.add_item(line("cha-bong", "500g", 120_000, 2));
        cart.clear();
        assert_eq!(cart.total_items(), 0);
        assert_eq!(cart.total_price().amount(), Decimal::ZERO);
    }

    #[test]
    fn test_drawer_flag_toggles() {
        let mut cart = Cart::new();
        assert!(!cart.is_open());
        cart.toggle();
        assert!(cart.is_open());
        cart.close();
        assert!(!cart.is_open());
        cart.open();
        assert!(cart.is_open());
    }

    #[test]
    fn test_drawer_flag_is_not_persisted() {
        let mut cart = Cart::new();
        cart.add_item(line("cha-bong", "500g", 120_000, 1));
        cart.open();
        let json = serde_json::to_value(&cart).unwrap();
        assert!(json.get("open").is_none());
        let restored: Cart = serde_json::from_value(json).unwrap();
        assert!(!restored.is_open());
        assert_eq!(restored.line_count(), 1);
    }
}
