//! Checkout hand-off and order lookup

use axum::{extract::{Path, State}, http::StatusCode, Json};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::domain::aggregates::Order;
use crate::store::OrderRecord;
use super::{http_error, AppState};

#[derive(Debug, Deserialize, Validate)]
pub struct CheckoutRequest {
    #[validate(length(min = 1))]
    pub session: String,
    #[validate(email)]
    pub customer_email: String,
    pub customer_name: Option<String>,
    pub shipping_address: Option<serde_json::Value>,
}

#[derive(Debug, Serialize)]
pub struct CheckoutResponse { pub order_number: String, pub subtotal: Decimal, pub currency: String, pub total_items: u64 }

/// Freezes the session cart into an order and clears the cart. Payment
/// happens later, out of band, via the gateway's webhook.
pub async fn checkout(State(s): State<AppState>, Json(r): Json<CheckoutRequest>) -> Result<(StatusCode, Json<CheckoutResponse>), (StatusCode, String)> {
    r.validate().map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;
    let cart = s.carts.load(&r.session).await.map_err(http_error)?.unwrap_or_default();
    let order = Order::from_cart(generate_order_number(), r.customer_email, &cart)
        .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?
        .with_customer_name(r.customer_name)
        .with_shipping_address(r.shipping_address.unwrap_or_else(|| serde_json::json!({})));
    s.orders.insert(&order).await.map_err(http_error)?;
    s.carts.clear(&r.session).await.map_err(http_error)?;
    tracing::info!(order_number = %order.order_number(), total_items = cart.total_items(), "order created");
    Ok((StatusCode::CREATED, Json(CheckoutResponse {
        order_number: order.order_number().to_string(),
        subtotal: order.subtotal().amount(),
        currency: order.subtotal().currency().to_string(),
        total_items: cart.total_items(),
    })))
}

pub async fn get_order(State(s): State<AppState>, Path(order_number): Path<String>) -> Result<Json<OrderRecord>, (StatusCode, String)> {
    let record = s.orders.fetch_by_number(&order_number).await.map_err(http_error)?;
    Ok(Json(record))
}

fn generate_order_number() -> String {
    let entropy = Uuid::new_v4().simple().to_string();
    format!("DH-{}", entropy[..8].to_uppercase())
}
