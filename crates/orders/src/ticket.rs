//! Attendee tickets: drafts, the list editor, and submit-time validation.

use serde::{Deserialize, Serialize};

use eventreg_catalog::{EventCatalog, TicketType};
use eventreg_core::TicketTypeId;

use crate::contact::Email;
use crate::customer::Customer;
use crate::validate::{duplicate_positions, require, require_email};

/// Per-attendee ticket fields as typed into the form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketDraft {
    pub type_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

/// Validated attendee ticket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    pub type_id: TicketTypeId,
    pub first_name: String,
    pub last_name: String,
    pub email: Email,
}

impl Ticket {
    /// Re-open the committed value for editing (back-navigation).
    pub fn draft(&self) -> TicketDraft {
        TicketDraft {
            type_id: self.type_id.to_string(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.to_string(),
        }
    }
}

/// Field-level failures for one attendee row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TicketErrors {
    pub type_id: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
}

impl TicketErrors {
    pub fn is_empty(&self) -> bool {
        self.type_id.is_none()
            && self.first_name.is_none()
            && self.last_name.is_none()
            && self.email.is_none()
    }
}

/// Failures from whole-list validation: one row entry per draft (aligned by
/// index) plus a list-level message when the list itself is unusable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TicketListErrors {
    pub list: Option<String>,
    pub rows: Vec<TicketErrors>,
}

impl TicketListErrors {
    pub fn is_empty(&self) -> bool {
        self.list.is_none() && self.rows.iter().all(TicketErrors::is_empty)
    }
}

/// Structural operations over the attendee list.
///
/// The editor holds the selectable ticket types so new rows can pre-assign
/// the sole type; the list's committed value lives in the wizard state
/// between steps. Removal is never blocked here; the minimum-size
/// invariant is enforced at submit time only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketListEditor {
    types: Vec<TicketType>,
}

impl TicketListEditor {
    pub fn new(catalog: &EventCatalog) -> Self {
        Self {
            types: catalog.selectable_types().cloned().collect(),
        }
    }

    /// The type id pre-assigned to new rows: set only when exactly one
    /// selectable type exists.
    fn default_type_id(&self) -> String {
        match &self.types[..] {
            [only] => only.id.to_string(),
            _ => String::new(),
        }
    }

    /// With a single selectable type the selector cannot be changed; submit
    /// still requires the value to be present.
    pub fn selector_inert(&self) -> bool {
        self.types.len() == 1
    }

    /// The initial one-element list, with the attendee fields copied from
    /// the buyer.
    pub fn seed(&self, customer: &Customer) -> Vec<TicketDraft> {
        vec![TicketDraft {
            type_id: self.default_type_id(),
            first_name: customer.first_name.clone(),
            last_name: customer.last_name.clone(),
            email: customer.email.to_string(),
        }]
    }

    /// Append a blank draft at the end of the list.
    pub fn append(&self, mut list: Vec<TicketDraft>) -> Vec<TicketDraft> {
        list.push(TicketDraft {
            type_id: self.default_type_id(),
            ..TicketDraft::default()
        });
        list
    }

    /// Remove the draft at `index`. Out-of-range indexes are ignored.
    pub fn remove(&self, mut list: Vec<TicketDraft>, index: usize) -> Vec<TicketDraft> {
        if index < list.len() {
            list.remove(index);
        }
        list
    }

    /// Removal is offered for every row but the first.
    pub fn can_remove(index: usize) -> bool {
        index > 0
    }

    /// The append affordance lives on the last row only.
    pub fn offers_append(list: &[TicketDraft], index: usize) -> bool {
        index + 1 == list.len()
    }

    /// Validate the whole list at submit time: minimum size one, required
    /// fields present, every type selectable, e-mails pairwise distinct.
    pub fn validate(&self, list: &[TicketDraft]) -> Result<Vec<Ticket>, TicketListErrors> {
        let mut errors = TicketListErrors {
            list: None,
            rows: vec![TicketErrors::default(); list.len()],
        };

        if list.is_empty() {
            errors.list = Some("at least one attendee is required".to_string());
            return Err(errors);
        }

        let mut tickets = Vec::with_capacity(list.len());
        for (row, draft) in errors.rows.iter_mut().zip(list) {
            let type_id = match require(&draft.type_id, "select a ticket type") {
                Ok(raw) if self.types.iter().any(|t| t.id.as_str() == raw) => {
                    Some(TicketTypeId::new(raw))
                }
                Ok(_) => {
                    row.type_id = Some("ticket type is unavailable".to_string());
                    None
                }
                Err(m) => {
                    row.type_id = Some(m);
                    None
                }
            };
            let first_name = require(&draft.first_name, "first name is required")
                .map_err(|m| row.first_name = Some(m))
                .ok();
            let last_name = require(&draft.last_name, "last name is required")
                .map_err(|m| row.last_name = Some(m))
                .ok();
            let email = require_email(&draft.email, "e-mail is invalid")
                .map_err(|m| row.email = Some(m))
                .ok();

            if let (Some(type_id), Some(first_name), Some(last_name), Some(email)) =
                (type_id, first_name, last_name, email)
            {
                tickets.push(Ticket {
                    type_id,
                    first_name,
                    last_name,
                    email,
                });
            }
        }

        for index in duplicate_positions(list, |draft| draft.email.as_str()) {
            let row = &mut errors.rows[index];
            if row.email.is_none() {
                row.email = Some("e-mail must be unique among attendees".to_string());
            }
        }

        if errors.is_empty() {
            Ok(tickets)
        } else {
            Err(errors)
        }
    }
}
