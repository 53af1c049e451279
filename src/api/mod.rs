//! HTTP surface

pub mod cart;
pub mod orders;
pub mod webhook;

use axum::{http::StatusCode, routing::{get, post, delete}, Json, Router};
use sqlx::PgPool;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::store::{PgCartStore, PgOrderStore};
use crate::StorefrontError;

#[derive(Clone)]
pub struct AppState { pub carts: PgCartStore, pub orders: PgOrderStore }

impl AppState {
    pub fn new(db: PgPool) -> Self {
        Self { carts: PgCartStore::new(db.clone()), orders: PgOrderStore::new(db) }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { Json(serde_json::json!({"status": "healthy", "service": "dacsan-storefront"})) }))
        .route("/api/v1/cart/:session", get(cart::get_cart).post(cart::add_to_cart).put(cart::update_item_quantity).delete(cart::clear_cart))
        .route("/api/v1/cart/:session/item", delete(cart::remove_item))
        .route("/api/v1/checkout", post(orders::checkout))
        .route("/api/v1/orders/:order_number", get(orders::get_order))
        .route("/api/v1/payments/webhook", post(webhook::payment_webhook))
        .layer(TraceLayer::new_for_http()).layer(CorsLayer::permissive()).with_state(state)
}

pub(crate) fn http_error(err: StorefrontError) -> (StatusCode, String) {
    let status = match err {
        StorefrontError::OrderNotFound => StatusCode::NOT_FOUND,
        StorefrontError::StorageError(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, err.to_string())
}
