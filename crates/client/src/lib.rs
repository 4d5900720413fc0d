//! Client-side integration with the remote registration service.
//!
//! This crate owns the consumed remote operations (`EventApi`), the order
//! submitter with its structured server-error mapping, the wizard context
//! loader, and the best-effort analytics tracker. No concrete HTTP
//! transport lives here; callers supply an `EventApi` implementation.

pub mod analytics;
pub mod api;
pub mod in_memory;
pub mod loader;
pub mod submit;

pub use analytics::{NoopTracker, OrderPlaced, TrackError, Tracker};
pub use api::{ApiError, EventApi, OrderRequest, Profile};
pub use in_memory::{InMemoryEventApi, RecordingTracker};
pub use loader::{LoadError, WizardContext, load_context};
pub use submit::{OrderSubmitter, Rejection, SubmitError};
