//! The placed order, as returned by the order-creation operation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use eventreg_core::OrderId;

/// A successfully placed order. Created exactly once per wizard run,
/// immutable thereafter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    /// Where the buyer pays; empty when no further action is needed
    /// (e.g. free orders).
    #[serde(default)]
    pub payment_url: String,
    #[serde(default)]
    pub cancel_url: String,
    /// The reservation holds until this deadline.
    pub reserved_to: DateTime<Utc>,
    pub currency_id: String,
    pub price: f64,
}

impl Order {
    /// Whether the buyer still has to pay to finish the order.
    pub fn requires_payment(&self) -> bool {
        !self.payment_url.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(payment_url: &str) -> Order {
        Order {
            id: OrderId::new("ord-1"),
            payment_url: payment_url.to_string(),
            cancel_url: String::new(),
            reserved_to: "2026-09-01T18:00:00Z".parse().unwrap(),
            currency_id: "RUB".to_string(),
            price: 1500.0,
        }
    }

    #[test]
    fn payment_is_required_iff_the_url_is_present() {
        assert!(order("https://pay.example.com/ord-1").requires_payment());
        assert!(!order("").requires_payment());
    }

    #[test]
    fn missing_urls_default_to_empty() {
        let order: Order = serde_json::from_str(
            r#"{
                "id": "ord-2",
                "reserved_to": "2026-09-01T18:00:00Z",
                "currency_id": "RUB",
                "price": 0
            }"#,
        )
        .unwrap();
        assert_eq!(order.payment_url, "");
        assert!(!order.requires_payment());
    }
}
