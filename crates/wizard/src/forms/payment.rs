//! Payment step controller.
//!
//! Owns the single-flight guard around order submission: while a submission
//! is outstanding the form is busy and both submit and back-navigation are
//! refused. The guard is released on every exit path. A submission that
//! never resolves leaves the form busy for good; there is deliberately no
//! timeout here.

use thiserror::Error;

use eventreg_catalog::{EventCatalog, PaymentKind, PaymentMethod};
use eventreg_core::EventId;
use eventreg_orders::{Customer, Order, Payment, PaymentDraft, PaymentErrors, Ticket};

use eventreg_client::{EventApi, OrderSubmitter, Rejection, SubmitError, Tracker};

/// Outcome of a payment submit as seen by the session.
#[derive(Debug, Clone, PartialEq)]
pub enum PaymentOutcome {
    /// Local or remote validation failed; the messages are on the form and
    /// the wizard stays at the payment step.
    Rejected,
    /// The order was placed.
    Completed(Order),
}

/// Failure of a payment submit that the form cannot absorb.
#[derive(Debug, Error)]
pub enum PaymentError {
    /// A submission is already outstanding.
    #[error("a submission is already in flight")]
    InFlight,

    /// Contract violation or transport failure, propagated after being
    /// recorded on the form. Callers must not treat this as handled.
    #[error(transparent)]
    Submit(#[from] SubmitError),
}

/// The payment step form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaymentForm {
    values: PaymentDraft,
    errors: PaymentErrors,
    status: Option<String>,
    busy: bool,
}

impl PaymentForm {
    pub fn new(values: PaymentDraft) -> Self {
        Self {
            values,
            errors: PaymentErrors::default(),
            status: None,
            busy: false,
        }
    }

    pub fn values(&self) -> &PaymentDraft {
        &self.values
    }

    /// The UI edits field values in place.
    pub fn values_mut(&mut self) -> &mut PaymentDraft {
        &mut self.values
    }

    pub fn errors(&self) -> &PaymentErrors {
        &self.errors
    }

    /// Global banner message (server-wide rejections, transport failures).
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Whether a submission is outstanding. Submit and back-navigation are
    /// refused while this is set.
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// The method currently selected, if the selection is valid.
    pub fn selected<'a>(&self, catalog: &'a EventCatalog) -> Option<&'a PaymentMethod> {
        catalog.payment(self.values.payment_id.trim())
    }

    /// Invoice methods additionally collect the company fields.
    pub fn shows_invoice_fields(&self, catalog: &EventCatalog) -> bool {
        self.selected(catalog)
            .is_some_and(|m| m.kind == PaymentKind::Invoice)
    }

    /// Legal-terms link for the selected method.
    pub fn agree_url<'a>(&self, catalog: &'a EventCatalog) -> Option<&'a str> {
        self.selected(catalog).map(|m| m.agree_url.as_str())
    }

    /// With a single selectable method the selector cannot be changed.
    pub fn selector_inert(&self, catalog: &EventCatalog) -> bool {
        catalog.sole_payment().is_some()
    }

    /// Local validation only; no remote call.
    pub fn validate(&mut self, catalog: &EventCatalog) -> Option<Payment> {
        match self.values.validate(catalog) {
            Ok(payment) => {
                self.errors = PaymentErrors::default();
                Some(payment)
            }
            Err(errors) => {
                self.errors = errors;
                None
            }
        }
    }

    /// Map a structured server rejection into the form's slots.
    fn apply_rejection(&mut self, rejection: Rejection) {
        self.status = rejection.status;
        self.errors = PaymentErrors {
            payment_id: rejection.payment_id,
            legal_name: rejection.legal_name,
            inn: rejection.inn,
        };
    }

    /// Validate locally, then submit the order.
    ///
    /// Remote rejections are mapped into the form and reported as
    /// `Rejected`; contract violations and transport failures propagate as
    /// errors after being recorded. Field values always survive.
    pub async fn submit<A, T>(
        &mut self,
        submitter: &OrderSubmitter<'_, A, T>,
        event_id: EventId,
        catalog: &EventCatalog,
        customer: &Customer,
        tickets: &[Ticket],
    ) -> Result<PaymentOutcome, PaymentError>
    where
        A: EventApi + ?Sized,
        T: Tracker + ?Sized,
    {
        if self.busy {
            return Err(PaymentError::InFlight);
        }

        self.status = None;
        let Some(payment) = self.validate(catalog) else {
            return Ok(PaymentOutcome::Rejected);
        };

        self.busy = true;
        let result = submitter
            .submit(event_id, customer, &payment, tickets)
            .await;
        self.busy = false;

        match result {
            Ok(order) => Ok(PaymentOutcome::Completed(order)),
            Err(SubmitError::Rejected(rejection)) => {
                self.apply_rejection(rejection);
                Ok(PaymentOutcome::Rejected)
            }
            Err(err @ SubmitError::Contract(_)) => Err(err.into()),
            Err(err) => {
                self.status = Some("something went wrong, please try again".to_string());
                Err(err.into())
            }
        }
    }
}
