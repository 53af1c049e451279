//! Order Aggregate

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::domain::aggregates::cart::Cart;
use crate::domain::value_objects::Money;

/// A placed order. Line items and the subtotal are frozen from the cart at
/// checkout; afterwards the only mutation is the one-way paid flip driven by
/// the payment gateway's notification.
#[derive(Clone, Debug)]
pub struct Order {
    id: Uuid,
    order_number: String,
    customer_email: String,
    customer_name: Option<String>,
    shipping_address: serde_json::Value,
    items: Vec<OrderLine>,
    subtotal: Money,
    paid: bool,
    paid_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OrderLine { pub product_id: String, pub name: String, pub weight: String, pub quantity: u32, pub unit_price: Money, pub total: Money }

impl Order {
    /// Freezes the given cart into a new unpaid order.
    pub fn from_cart(order_number: impl Into<String>, customer_email: impl Into<String>, cart: &Cart) -> Result<Self, OrderError> {
        if cart.is_empty() { return Err(OrderError::EmptyCart); }
        let items = cart.items().iter()
            .map(|i| OrderLine {
                product_id: i.product_id.clone(), name: i.name.clone(), weight: i.weight.clone(),
                quantity: i.quantity, unit_price: i.unit_price.clone(), total: i.line_total(),
            })
            .collect();
        let now = Utc::now();
        Ok(Self {
            id: Uuid::now_v7(), order_number: order_number.into(), customer_email: customer_email.into(),
            customer_name: None, shipping_address: serde_json::Value::Object(Default::default()),
            items, subtotal: cart.total_price(), paid: false, paid_at: None,
            created_at: now, updated_at: now,
        })
    }

    pub fn with_customer_name(mut self, name: Option<String>) -> Self { self.customer_name = name; self }
    pub fn with_shipping_address(mut self, address: serde_json::Value) -> Self { self.shipping_address = address; self }

    pub fn id(&self) -> Uuid { self.id }
    pub fn order_number(&self) -> &str { &self.order_number }
    pub fn customer_email(&self) -> &str { &self.customer_email }
    pub fn customer_name(&self) -> Option<&str> { self.customer_name.as_deref() }
    pub fn shipping_address(&self) -> &serde_json::Value { &self.shipping_address }
    pub fn items(&self) -> &[OrderLine] { &self.items }
    pub fn subtotal(&self) -> &Money { &self.subtotal }
    pub fn is_paid(&self) -> bool { self.paid }
    pub fn paid_at(&self) -> Option<DateTime<Utc>> { self.paid_at }
    pub fn created_at(&self) -> DateTime<Utc> { self.created_at }
    pub fn updated_at(&self) -> DateTime<Utc> { self.updated_at }

    /// Flags the order paid. Safe to re-apply; the first paid timestamp
    /// sticks.
    pub fn mark_paid(&mut self) {
        if self.paid_at.is_none() { self.paid_at = Some(Utc::now()); }
        self.paid = true;
        self.touch();
    }

    fn touch(&mut self) { self.updated_at = Utc::now(); }
}

#[derive(Debug, Clone)] pub enum OrderError { EmptyCart }
impl std::error::Error for OrderError {}
impl std::fmt::Display for OrderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { write!(f, "Cart is empty") }
}
