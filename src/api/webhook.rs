//! Payment gateway webhook gate
//!
//! The gateway POSTs a notification after the shopper finishes (or abandons)
//! its hosted checkout. An order is flagged paid only when the notification
//! type, transaction status and order status all carry their paid sentinel;
//! everything else is acknowledged and dropped. The gateway retries on 5xx
//! per its own policy, so the gate itself never queues or retries.

use axum::{body::Bytes, extract::State, http::StatusCode, response::{IntoResponse, Response}, Json};
use tracing::{error, info, warn};

use crate::domain::payment::PaymentNotification;
use crate::store::OrderStore;
use super::AppState;

/// Everything the gate can answer. The `ignored` marker lets the gateway
/// and any log scraper tell "nothing to do" apart from "failed".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WebhookOutcome {
    InvalidPayload,
    MissingInvoice,
    Ignored,
    Updated,
    StoreFailure,
}

impl WebhookOutcome {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidPayload | Self::MissingInvoice => StatusCode::BAD_REQUEST,
            Self::Ignored | Self::Updated => StatusCode::OK,
            Self::StoreFailure => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn body(&self) -> serde_json::Value {
        match self {
            Self::InvalidPayload => serde_json::json!({"error": "Invalid payload"}),
            Self::MissingInvoice => serde_json::json!({"error": "Missing order invoice number"}),
            Self::Ignored => serde_json::json!({"ok": true, "ignored": true}),
            Self::Updated => serde_json::json!({"ok": true}),
            Self::StoreFailure => serde_json::json!({"error": "Failed to update order"}),
        }
    }
}

impl IntoResponse for WebhookOutcome {
    fn into_response(self) -> Response {
        (self.status(), Json(self.body())).into_response()
    }
}

/// Evaluates one notification delivery against the order store.
///
/// The body is taken raw rather than through the `Json` extractor so an
/// unparseable delivery answers the contract's own error shape.
pub async fn process<S: OrderStore>(orders: &S, body: &[u8]) -> WebhookOutcome {
    let notification: PaymentNotification = match serde_json::from_slice(body) {
        Ok(n) => n,
        Err(e) => {
            warn!(error = %e, "discarding unparseable payment notification");
            return WebhookOutcome::InvalidPayload;
        }
    };
    let Some(invoice) = notification.invoice_number() else {
        warn!("payment notification without an order invoice number");
        return WebhookOutcome::MissingInvoice;
    };
    if !notification.confirms_payment() {
        info!(order_number = %invoice, "payment notification acknowledged but ignored");
        return WebhookOutcome::Ignored;
    }
    match orders.mark_paid(invoice).await {
        Ok(0) => {
            // The gateway is never asked to redeliver for an order we will
            // never have, so this still acknowledges.
            warn!(order_number = %invoice, "paid update matched no order");
            WebhookOutcome::Updated
        }
        Ok(_) => {
            info!(order_number = %invoice, "order marked paid");
            WebhookOutcome::Updated
        }
        Err(e) => {
            error!(order_number = %invoice, error = %e, "failed to flag order paid");
            WebhookOutcome::StoreFailure
        }
    }
}

pub async fn payment_webhook(State(s): State<AppState>, body: Bytes) -> WebhookOutcome {
    process(&s.orders, &body).await
}
