//! Event catalog module (read-only).
//!
//! This crate contains the event, ticket-type, and payment-method records
//! supplied by the remote service, plus the selectable-set filters the
//! order wizard works against. Nothing here is mutated by the wizard.

pub mod catalog;

pub use catalog::{EventCatalog, EventSummary, PaymentKind, PaymentMethod, TicketType};
