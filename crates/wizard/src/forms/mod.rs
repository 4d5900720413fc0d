//! Step-form controllers.
//!
//! Each form owns its in-progress values, typed per-field error slots, and
//! (for payment) the single-flight busy guard. Forms never touch the wizard
//! state directly: they validate and hand a normalized value back to the
//! session, which drives the state machine.

pub mod customer;
pub mod payment;
pub mod tickets;

pub use customer::{CustomerField, CustomerForm};
pub use payment::{PaymentError, PaymentForm, PaymentOutcome};
pub use tickets::TicketsForm;
