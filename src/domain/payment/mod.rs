//! Payment gateway notification payload

use serde::Deserialize;

/// `notification_type` value the gateway sends for a completed payment.
pub const NOTIFY_ORDER_PAID: &str = "ORDER_PAID";
/// `transaction.transaction_status` value for an approved transaction.
pub const TXN_APPROVED: &str = "APPROVED";
/// `order.order_status` value for a captured order.
pub const ORDER_CAPTURED: &str = "CAPTURED";

/// The asynchronous notification the gateway POSTs to our webhook. Field
/// paths are fixed by the gateway's contract. Everything except the invoice
/// number is optional; absent fields are tolerated and simply fail the paid
/// predicate.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct PaymentNotification {
    pub notification_type: Option<String>,
    pub transaction: Option<TransactionDetails>,
    pub order: Option<OrderDetails>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct TransactionDetails {
    pub transaction_status: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct OrderDetails {
    pub order_status: Option<String>,
    pub order_invoice_number: Option<String>,
}

impl PaymentNotification {
    /// The order's natural key, if present and non-blank.
    pub fn invoice_number(&self) -> Option<&str> {
        self.order.as_ref()
            .and_then(|o| o.order_invoice_number.as_deref())
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    fn transaction_status(&self) -> Option<&str> {
        self.transaction.as_ref().and_then(|t| t.transaction_status.as_deref())
    }

    fn order_status(&self) -> Option<&str> {
        self.order.as_ref().and_then(|o| o.order_status.as_deref())
    }

    /// True only when all three classification fields carry their paid
    /// sentinel. Any mismatch or absence means the event is acknowledged but
    /// ignored.
    pub fn confirms_payment(&self) -> bool {
        self.notification_type.as_deref() == Some(NOTIFY_ORDER_PAID)
            && self.transaction_status() == Some(TXN_APPROVED)
            && self.order_status() == Some(ORDER_CAPTURED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paid_payload() -> serde_json::Value {
        serde_json::json!({
            "notification_type": "ORDER_PAID",
            "transaction": { "transaction_status": "APPROVED" },
            "order": { "order_status": "CAPTURED", "order_invoice_number": "TB123" }
        })
    }

    #[test]
    fn test_all_three_sentinels_confirm() {
        let n: PaymentNotification = serde_json::from_value(paid_payload()).unwrap();
        assert_eq!(n.invoice_number(), Some("TB123"));
        assert!(n.confirms_payment());
    }

    #[test]
    fn test_any_single_mismatch_fails_the_predicate() {
        let mut p = paid_payload();
        p["transaction"]["transaction_status"] = "PENDING".into();
        let n: PaymentNotification = serde_json::from_value(p).unwrap();
        assert!(!n.confirms_payment());

        let mut p = paid_payload();
        p["notification_type"] = "ORDER_CREATED".into();
        let n: PaymentNotification = serde_json::from_value(p).unwrap();
        assert!(!n.confirms_payment());

        let mut p = paid_payload();
        p["order"]["order_status"] = "PENDING".into();
        let n: PaymentNotification = serde_json::from_value(p).unwrap();
        assert!(!n.confirms_payment());
    }

    #[test]
    fn test_absent_fields_are_tolerated_but_do_not_confirm() {
        let n: PaymentNotification = serde_json::from_value(serde_json::json!({
            "order": { "order_invoice_number": "TB123" }
        })).unwrap();
        assert_eq!(n.invoice_number(), Some("TB123"));
        assert!(!n.confirms_payment());
    }

    #[test]
    fn test_blank_invoice_number_counts_as_missing() {
        let n: PaymentNotification = serde_json::from_value(serde_json::json!({
            "order": { "order_invoice_number": "   " }
        })).unwrap();
        assert_eq!(n.invoice_number(), None);

        let n = PaymentNotification::default();
        assert_eq!(n.invoice_number(), None);
    }
}
