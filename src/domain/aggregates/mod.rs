//! Aggregates module
pub mod order;
pub mod cart;

pub use order::{Order, OrderError, OrderLine};
pub use cart::{Cart, CartLine};
