//! Consumed remote operations and their wire types.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use eventreg_catalog::{EventCatalog, EventSummary};
use eventreg_core::{EventId, PaymentMethodId};
use eventreg_orders::{Customer, Order, Payment, Ticket};

/// Buyer profile as returned by the remote service, possibly pre-filling
/// the customer step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

/// Order-creation request body: the customer fields inline, the payment
/// selection, and the attendee list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderRequest {
    #[serde(flatten)]
    pub customer: Customer,
    pub payment_id: PaymentMethodId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legal_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inn: Option<String>,
    pub tickets: Vec<Ticket>,
}

impl OrderRequest {
    pub fn new(customer: &Customer, payment: &Payment, tickets: &[Ticket]) -> Self {
        Self {
            customer: customer.clone(),
            payment_id: payment.payment_id.clone(),
            legal_name: payment.legal_name.clone(),
            inn: payment.inn.clone(),
            tickets: tickets.to_vec(),
        }
    }
}

/// Client-side failure talking to the remote service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),
    /// Non-success HTTP status with the raw response body.
    #[error("API error ({status})")]
    Status { status: u16, body: String },
    #[error("parse error: {0}")]
    Parse(String),
}

/// The four remote operations the wizard consumes.
///
/// Implementations own the transport entirely; the wizard never sees
/// anything below these calls.
#[async_trait]
pub trait EventApi: Send + Sync {
    /// Event metadata. Failure is fatal to entering the wizard.
    async fn fetch_event(&self, id: EventId) -> Result<EventSummary, ApiError>;

    /// Ticket/payment catalog. Fetched together with the event; failure is
    /// equally fatal.
    async fn fetch_catalog(&self, id: EventId) -> Result<EventCatalog, ApiError>;

    /// Buyer profile, when a session exists. Callers treat failure as "no
    /// pre-filled profile".
    async fn fetch_profile(&self) -> Result<Option<Profile>, ApiError>;

    /// The single side-effecting operation: create the order.
    async fn create_order(&self, id: EventId, request: &OrderRequest) -> Result<Order, ApiError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use eventreg_orders::{CustomerDraft, PaymentDraft, TicketListEditor};

    fn catalog() -> EventCatalog {
        serde_json::from_str(
            r#"{
                "types": [{"id": "standard", "name": "Standard"}],
                "payments": [
                    {"id": "pm-invoice", "type": "invoice", "agree_url": ""},
                    {"id": "pm-card", "type": "card", "agree_url": ""}
                ],
                "is_active": true
            }"#,
        )
        .unwrap()
    }

    fn customer(phone: &str) -> Customer {
        CustomerDraft {
            first_name: "Ann".to_string(),
            last_name: "Lee".to_string(),
            email: "ann@example.com".to_string(),
            phone: phone.to_string(),
        }
        .validate()
        .unwrap()
    }

    fn tickets(catalog: &EventCatalog, customer: &Customer) -> Vec<Ticket> {
        let editor = TicketListEditor::new(catalog);
        editor.validate(&editor.seed(customer)).unwrap()
    }

    #[test]
    fn request_inlines_customer_fields_and_omits_absent_ones() {
        let catalog = catalog();
        let customer = customer("");
        let payment = PaymentDraft {
            payment_id: "pm-card".to_string(),
            ..PaymentDraft::default()
        }
        .validate(&catalog)
        .unwrap();

        let request = OrderRequest::new(&customer, &payment, &tickets(&catalog, &customer));
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value["first_name"], "Ann");
        assert_eq!(value["email"], "ann@example.com");
        assert_eq!(value["payment_id"], "pm-card");
        assert!(value.get("phone").is_none());
        assert!(value.get("legal_name").is_none());
        assert!(value.get("inn").is_none());
        assert_eq!(value["tickets"][0]["type_id"], "standard");
        assert_eq!(value["tickets"][0]["email"], "ann@example.com");
    }

    #[test]
    fn request_carries_phone_and_invoice_fields_when_present() {
        let catalog = catalog();
        let customer = customer("+79991234567");
        let payment = PaymentDraft {
            payment_id: "pm-invoice".to_string(),
            legal_name: "Acme LLC".to_string(),
            inn: "7701234567".to_string(),
        }
        .validate(&catalog)
        .unwrap();

        let request = OrderRequest::new(&customer, &payment, &tickets(&catalog, &customer));
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value["phone"], "+79991234567");
        assert_eq!(value["legal_name"], "Acme LLC");
        assert_eq!(value["inn"], "7701234567");
    }
}
