//! Đặc Sản Việt Storefront Service
//!
//! Backend for a specialty-food storefront: session shopping carts, a
//! checkout hand-off that turns a cart into an order, and the payment
//! gateway's webhook that flags orders paid.
//!
//! ## Features
//! - Session carts with line merging per (product, weight) variant
//! - Cart persistence across sessions (one JSON document per session key)
//! - Checkout creating orders with a human-readable order number
//! - Payment-notification gate conditionally flipping an order's paid flag

use thiserror::Error;

pub mod api;
pub mod domain;
pub mod store;

#[derive(Error, Debug)]
pub enum StorefrontError {
    #[error("Order not found")]
    OrderNotFound,

    #[error("Storage error: {0}")]
    StorageError(String),
}

pub type Result<T> = std::result::Result<T, StorefrontError>;
