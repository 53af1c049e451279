//! Postgres-backed persistence collaborators

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::aggregates::{Cart, Order};
use crate::{Result, StorefrontError};

/// The order persistence seam the payment gate writes through. The gate only
/// ever needs the conditional paid update; keeping it behind a trait lets the
/// webhook decision path run against an in-memory store in tests.
#[async_trait]
pub trait OrderStore {
    /// Flags the order matching the natural order-number key as paid and
    /// reports how many rows matched. Re-applying is safe: the first paid
    /// timestamp is preserved.
    async fn mark_paid(&self, order_number: &str) -> Result<u64>;
}

/// An order row as stored. Line items ride along as a JSON document; the
/// gate and the storefront only ever address the row by `order_number`.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct OrderRecord {
    pub id: Uuid, pub order_number: String, pub customer_email: String, pub customer_name: Option<String>,
    pub shipping_address: serde_json::Value, pub items: serde_json::Value,
    pub subtotal: Decimal, pub currency: String,
    pub paid: bool, pub paid_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>, pub updated_at: DateTime<Utc>,
}

#[derive(Clone)]
pub struct PgOrderStore { pool: PgPool }

impl PgOrderStore {
    pub fn new(pool: PgPool) -> Self { Self { pool } }

    pub async fn insert(&self, order: &Order) -> Result<()> {
        let items = serde_json::to_value(order.items()).map_err(storage)?;
        sqlx::query("INSERT INTO orders (id, order_number, customer_email, customer_name, shipping_address, items, subtotal, currency, paid, paid_at, created_at, updated_at) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)")
            .bind(order.id()).bind(order.order_number()).bind(order.customer_email()).bind(order.customer_name())
            .bind(order.shipping_address()).bind(items)
            .bind(order.subtotal().amount()).bind(order.subtotal().currency())
            .bind(order.is_paid()).bind(order.paid_at())
            .bind(order.created_at()).bind(order.updated_at())
            .execute(&self.pool).await.map_err(storage)?;
        Ok(())
    }

    pub async fn fetch_by_number(&self, order_number: &str) -> Result<OrderRecord> {
        sqlx::query_as::<_, OrderRecord>("SELECT * FROM orders WHERE order_number = $1")
            .bind(order_number)
            .fetch_optional(&self.pool).await.map_err(storage)?
            .ok_or(StorefrontError::OrderNotFound)
    }
}

#[async_trait]
impl OrderStore for PgOrderStore {
    async fn mark_paid(&self, order_number: &str) -> Result<u64> {
        let result = sqlx::query("UPDATE orders SET paid = TRUE, paid_at = COALESCE(paid_at, NOW()), updated_at = NOW() WHERE order_number = $1")
            .bind(order_number)
            .execute(&self.pool).await.map_err(storage)?;
        Ok(result.rows_affected())
    }
}

/// Cart persistence: one JSON document per session key, overwritten on every
/// mutation. Concurrent writers for the same session are last-write-wins.
#[derive(Clone)]
pub struct PgCartStore { pool: PgPool }

impl PgCartStore {
    pub fn new(pool: PgPool) -> Self { Self { pool } }

    pub async fn load(&self, session_id: &str) -> Result<Option<Cart>> {
        let row: Option<(serde_json::Value,)> = sqlx::query_as("SELECT data FROM carts WHERE session_id = $1")
            .bind(session_id)
            .fetch_optional(&self.pool).await.map_err(storage)?;
        row.map(|(data,)| serde_json::from_value(data).map_err(storage)).transpose()
    }

    pub async fn save(&self, session_id: &str, cart: &Cart) -> Result<()> {
        let data = serde_json::to_value(cart).map_err(storage)?;
        sqlx::query("INSERT INTO carts (session_id, data, updated_at) VALUES ($1, $2, NOW()) ON CONFLICT (session_id) DO UPDATE SET data = EXCLUDED.data, updated_at = NOW()")
            .bind(session_id).bind(data)
            .execute(&self.pool).await.map_err(storage)?;
        Ok(())
    }

    pub async fn clear(&self, session_id: &str) -> Result<()> {
        sqlx::query("DELETE FROM carts WHERE session_id = $1")
            .bind(session_id)
            .execute(&self.pool).await.map_err(storage)?;
        Ok(())
    }
}

fn storage(e: impl std::fmt::Display) -> StorefrontError {
    StorefrontError::StorageError(e.to_string())
}
