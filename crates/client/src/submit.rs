//! Order submission and the server-error mapping contract.

use std::collections::BTreeMap;

use thiserror::Error;

use eventreg_core::EventId;
use eventreg_orders::{Customer, Order, Payment, Ticket};

use crate::analytics::{OrderPlaced, Tracker};
use crate::api::{ApiError, EventApi, OrderRequest};

/// Structured 400-class rejection, mapped into the payment form's slots.
/// Only the first message of each field is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Rejection {
    /// Global banner message (`non_field_errors` / `__all__`).
    pub status: Option<String>,
    pub payment_id: Option<String>,
    pub legal_name: Option<String>,
    pub inn: Option<String>,
}

/// Failure taxonomy of an order submission.
#[derive(Debug, Error)]
pub enum SubmitError {
    /// The server rejected the order with field or global messages;
    /// recoverable at the payment step.
    #[error("order rejected by the server")]
    Rejected(Rejection),

    /// The server reported an error for a field this client does not know.
    /// Not recoverable locally.
    #[error("client/server contract violated: unknown error field `{0}`")]
    Contract(String),

    /// Transport-level or otherwise unclassified failure. The caller shows
    /// a generic message but must still treat the error as unhandled.
    #[error(transparent)]
    Transport(#[from] ApiError),
}

/// Submits the final order and maps failures back into form state.
///
/// Submission is not cancellable once started; the single-flight guard
/// belongs to the calling step form.
pub struct OrderSubmitter<'a, A: EventApi + ?Sized, T: Tracker + ?Sized> {
    api: &'a A,
    tracker: &'a T,
}

impl<'a, A: EventApi + ?Sized, T: Tracker + ?Sized> OrderSubmitter<'a, A, T> {
    pub fn new(api: &'a A, tracker: &'a T) -> Self {
        Self { api, tracker }
    }

    /// Create the order for `event_id`.
    ///
    /// On success the order-success goal is tracked best-effort before the
    /// order is returned; tracking failure never fails the submission.
    pub async fn submit(
        &self,
        event_id: EventId,
        customer: &Customer,
        payment: &Payment,
        tickets: &[Ticket],
    ) -> Result<Order, SubmitError> {
        let request = OrderRequest::new(customer, payment, tickets);

        match self.api.create_order(event_id, &request).await {
            Ok(order) => {
                let goal = OrderPlaced {
                    event_id,
                    order_id: order.id.clone(),
                    currency_id: order.currency_id.clone(),
                    price: order.price,
                };
                if let Err(err) = self.tracker.order_placed(&goal) {
                    tracing::warn!(%err, "order goal tracking failed");
                }
                tracing::info!(order_id = %order.id, %event_id, "order created");
                Ok(order)
            }
            Err(ApiError::Status { status: 400, body }) => Err(map_rejection(&body)),
            Err(err) => {
                tracing::error!(%err, %event_id, "order submission failed");
                Err(SubmitError::Transport(err))
            }
        }
    }
}

/// Map a 400-class response body onto the known form-error slots.
///
/// Unknown keys mean the server and this client disagree about the form's
/// shape; that is a contract violation and aborts the mapping instead of
/// being guessed at.
fn map_rejection(body: &str) -> SubmitError {
    let fields: BTreeMap<String, Vec<String>> = match serde_json::from_str(body) {
        Ok(fields) => fields,
        Err(err) => return SubmitError::Transport(ApiError::Parse(err.to_string())),
    };

    let mut rejection = Rejection::default();
    for (field, messages) in &fields {
        let first = messages.first().cloned().unwrap_or_default();
        match field.as_str() {
            "non_field_errors" | "__all__" => rejection.status = Some(first),
            "payment_id" => rejection.payment_id = Some(first),
            "legal_name" => rejection.legal_name = Some(first),
            "inn" => rejection.inn = Some(first),
            unknown => {
                tracing::error!(field = unknown, "server reported an unknown error field");
                return SubmitError::Contract(unknown.to_string());
            }
        }
    }
    SubmitError::Rejected(rejection)
}
