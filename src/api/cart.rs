//! Session cart endpoints
//!
//! Every mutation follows the same load, mutate, save shape; the saved
//! document is the line-item collection only. Two tabs writing the same
//! session are last-write-wins.

use axum::{extract::{Path, Query, State}, http::StatusCode, Json};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::aggregates::{Cart, CartLine};
use crate::domain::value_objects::Money;
use super::{http_error, AppState};

#[derive(Debug, Deserialize)]
pub struct AddItemRequest {
    pub product_id: String,
    pub slug: Option<String>,
    pub name: String,
    pub image_url: String,
    pub weight: String,
    pub unit_price: Decimal,
    pub quantity: Option<u32>,
}

impl AddItemRequest {
    fn into_line(self) -> CartLine {
        CartLine {
            product_id: self.product_id, slug: self.slug, name: self.name, image_url: self.image_url,
            weight: self.weight, unit_price: Money::vnd(self.unit_price), quantity: self.quantity.unwrap_or(1),
        }
    }
}

#[derive(Debug, Deserialize)] pub struct UpdateQuantityRequest { pub product_id: String, pub weight: String, pub quantity: i32 }
#[derive(Debug, Deserialize)] pub struct RemoveItemParams { pub product_id: String, pub weight: String }

#[derive(Debug, Serialize)]
pub struct CartView { pub items: Vec<CartLine>, pub total_items: u64, pub subtotal: Decimal, pub currency: String }

impl CartView {
    fn of(cart: &Cart) -> Self {
        Self {
            items: cart.items().to_vec(), total_items: cart.total_items(),
            subtotal: cart.total_price().amount(), currency: cart.currency().to_string(),
        }
    }
}

pub async fn get_cart(State(s): State<AppState>, Path(session): Path<String>) -> Result<Json<CartView>, (StatusCode, String)> {
    let cart = s.carts.load(&session).await.map_err(http_error)?.unwrap_or_default();
    Ok(Json(CartView::of(&cart)))
}

pub async fn add_to_cart(State(s): State<AppState>, Path(session): Path<String>, Json(r): Json<AddItemRequest>) -> Result<(StatusCode, Json<CartView>), (StatusCode, String)> {
    if r.unit_price.is_sign_negative() {
        return Err((StatusCode::BAD_REQUEST, "Unit price must not be negative".to_string()));
    }
    if r.quantity == Some(0) {
        return Err((StatusCode::BAD_REQUEST, "Quantity must be at least 1".to_string()));
    }
    let mut cart = s.carts.load(&session).await.map_err(http_error)?.unwrap_or_default();
    cart.add_item(r.into_line());
    s.carts.save(&session, &cart).await.map_err(http_error)?;
    Ok((StatusCode::CREATED, Json(CartView::of(&cart))))
}

pub async fn update_item_quantity(State(s): State<AppState>, Path(session): Path<String>, Json(r): Json<UpdateQuantityRequest>) -> Result<Json<CartView>, (StatusCode, String)> {
    let mut cart = s.carts.load(&session).await.map_err(http_error)?.unwrap_or_default();
    cart.update_quantity(&r.product_id, &r.weight, r.quantity);
    s.carts.save(&session, &cart).await.map_err(http_error)?;
    Ok(Json(CartView::of(&cart)))
}

pub async fn remove_item(State(s): State<AppState>, Path(session): Path<String>, Query(p): Query<RemoveItemParams>) -> Result<Json<CartView>, (StatusCode, String)> {
    let mut cart = s.carts.load(&session).await.map_err(http_error)?.unwrap_or_default();
    cart.remove_item(&p.product_id, &p.weight);
    s.carts.save(&session, &cart).await.map_err(http_error)?;
    Ok(Json(CartView::of(&cart)))
}

pub async fn clear_cart(State(s): State<AppState>, Path(session): Path<String>) -> Result<StatusCode, (StatusCode, String)> {
    s.carts.clear(&session).await.map_err(http_error)?;
    Ok(StatusCode::NO_CONTENT)
}
