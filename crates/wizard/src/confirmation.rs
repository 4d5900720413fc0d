//! Confirmation-step view model.

use eventreg_core::OrderId;
use eventreg_orders::Order;

/// What the confirmation step shows. Pure data derived from the order;
/// no further logic happens after this point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Confirmation {
    pub order_id: OrderId,
    /// Present only while the order still needs paying.
    pub payment: Option<PaymentCta>,
}

/// Payment call-to-action for orders with an outstanding reservation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentCta {
    pub payment_url: String,
    /// Formatted reservation deadline, e.g. "1 September, 18:00".
    pub reserved_to: String,
    /// Formatted price with currency, e.g. "1500 RUB".
    pub amount: String,
}

impl Confirmation {
    pub fn for_order(order: &Order) -> Self {
        let payment = order.requires_payment().then(|| PaymentCta {
            payment_url: order.payment_url.clone(),
            reserved_to: order.reserved_to.format("%-d %B, %H:%M").to_string(),
            amount: format_amount(order.price, &order.currency_id),
        });
        Self {
            order_id: order.id.clone(),
            payment,
        }
    }
}

/// Whole amounts print without decimals, anything else with two places.
fn format_amount(price: f64, currency: &str) -> String {
    if price.fract() == 0.0 {
        format!("{price:.0} {currency}")
    } else {
        format!("{price:.2} {currency}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(payment_url: &str, price: f64) -> Order {
        Order {
            id: OrderId::new("ord-1"),
            payment_url: payment_url.to_string(),
            cancel_url: String::new(),
            reserved_to: "2026-09-01T18:00:00Z".parse().unwrap(),
            currency_id: "RUB".to_string(),
            price,
        }
    }

    #[test]
    fn unpaid_order_shows_deadline_and_amount() {
        let confirmation = Confirmation::for_order(&order("https://pay.example.com/ord-1", 1500.0));
        assert_eq!(confirmation.order_id.as_str(), "ord-1");
        let cta = confirmation.payment.unwrap();
        assert_eq!(cta.payment_url, "https://pay.example.com/ord-1");
        assert_eq!(cta.reserved_to, "1 September, 18:00");
        assert_eq!(cta.amount, "1500 RUB");
    }

    #[test]
    fn free_order_shows_only_the_order_id() {
        let confirmation = Confirmation::for_order(&order("", 0.0));
        assert_eq!(confirmation.order_id.as_str(), "ord-1");
        assert_eq!(confirmation.payment, None);
    }

    #[test]
    fn fractional_amounts_keep_two_places() {
        let confirmation = Confirmation::for_order(&order("https://pay.example.com/ord-1", 99.5));
        assert_eq!(confirmation.payment.unwrap().amount, "99.50 RUB");
    }
}
