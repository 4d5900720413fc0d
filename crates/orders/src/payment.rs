//! Payment selection: draft, kind-conditional validation, committed value.

use serde::{Deserialize, Serialize};

use eventreg_catalog::{EventCatalog, PaymentKind};
use eventreg_core::PaymentMethodId;

use crate::validate::require;

/// Payment fields as typed into the form. The company fields are only
/// meaningful while an invoice method is selected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentDraft {
    pub payment_id: String,
    pub legal_name: String,
    pub inn: String,
}

/// Validated payment selection. The company fields are present exactly
/// when the selected method is an invoice one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    pub payment_id: PaymentMethodId,
    pub legal_name: Option<String>,
    pub inn: Option<String>,
}

/// Field-level failures from payment validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaymentErrors {
    pub payment_id: Option<String>,
    pub legal_name: Option<String>,
    pub inn: Option<String>,
}

impl PaymentErrors {
    pub fn is_empty(&self) -> bool {
        self.payment_id.is_none() && self.legal_name.is_none() && self.inn.is_none()
    }
}

impl PaymentDraft {
    /// Validate against the catalog's selectable payment methods.
    ///
    /// `legal_name` and `inn` are required only for invoice methods; for
    /// every other kind whatever was typed into them is dropped.
    pub fn validate(&self, catalog: &EventCatalog) -> Result<Payment, PaymentErrors> {
        let mut errors = PaymentErrors::default();

        let method = match require(&self.payment_id, "select a payment method") {
            Ok(raw) => match catalog.payment(&raw) {
                Some(method) => Some(method),
                None => {
                    errors.payment_id = Some("payment method is unavailable".to_string());
                    None
                }
            },
            Err(m) => {
                errors.payment_id = Some(m);
                None
            }
        };

        let invoice = method.map(|m| m.kind == PaymentKind::Invoice).unwrap_or(false);
        let (legal_name, inn) = if invoice {
            (
                require(&self.legal_name, "company name is required")
                    .map_err(|m| errors.legal_name = Some(m))
                    .ok(),
                require(&self.inn, "taxpayer id is required")
                    .map_err(|m| errors.inn = Some(m))
                    .ok(),
            )
        } else {
            (None, None)
        };

        match method {
            Some(method) if errors.is_empty() => Ok(Payment {
                payment_id: method.id.clone(),
                legal_name,
                inn,
            }),
            _ => Err(errors),
        }
    }
}
