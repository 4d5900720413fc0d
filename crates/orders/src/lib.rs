//! Order domain module.
//!
//! This crate contains the buyer, attendee, and payment drafts the order
//! wizard edits, the validation rules that turn them into committed values,
//! and the resulting order record. All logic here is deterministic (no IO,
//! no HTTP).

pub mod contact;
pub mod customer;
pub mod order;
pub mod payment;
pub mod ticket;
pub mod validate;

pub use contact::{Email, Phone};
pub use customer::{Customer, CustomerDraft, CustomerErrors};
pub use order::Order;
pub use payment::{Payment, PaymentDraft, PaymentErrors};
pub use ticket::{Ticket, TicketDraft, TicketErrors, TicketListEditor, TicketListErrors};
