//! Best-effort goal tracking.
//!
//! Tracking failures are logged and discarded at the call site; they never
//! affect the primary control flow.

use serde::Serialize;
use thiserror::Error;

use eventreg_core::{EventId, OrderId};

/// Payload of the order-success goal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderPlaced {
    pub event_id: EventId,
    pub order_id: OrderId,
    pub currency_id: String,
    pub price: f64,
}

/// Failure to record a goal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("tracking failed: {0}")]
pub struct TrackError(pub String);

/// Analytics sink for wizard goals.
pub trait Tracker: Send + Sync {
    fn order_placed(&self, goal: &OrderPlaced) -> Result<(), TrackError>;
}

/// Tracker that records nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopTracker;

impl Tracker for NoopTracker {
    fn order_placed(&self, _goal: &OrderPlaced) -> Result<(), TrackError> {
        Ok(())
    }
}
