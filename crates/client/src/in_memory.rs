//! In-memory `EventApi` and `Tracker` implementations with scripted
//! responses, for tests and local development.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use eventreg_catalog::{EventCatalog, EventSummary};
use eventreg_core::EventId;
use eventreg_orders::Order;

use crate::analytics::{OrderPlaced, TrackError, Tracker};
use crate::api::{ApiError, EventApi, OrderRequest, Profile};

/// Scripted `EventApi`.
///
/// Fetches answer from the configured fixtures; order creation pops
/// responses from a queue and records every request it saw.
#[derive(Debug, Default)]
pub struct InMemoryEventApi {
    event: Option<EventSummary>,
    catalog: Option<EventCatalog>,
    profile: Option<Profile>,
    profile_fails: bool,
    order_responses: Mutex<VecDeque<Result<Order, ApiError>>>,
    order_requests: Mutex<Vec<serde_json::Value>>,
}

impl InMemoryEventApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_event(mut self, event: EventSummary) -> Self {
        self.event = Some(event);
        self
    }

    pub fn with_catalog(mut self, catalog: EventCatalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    pub fn with_profile(mut self, profile: Profile) -> Self {
        self.profile = Some(profile);
        self
    }

    /// Make `fetch_profile` fail (e.g. no session).
    pub fn with_profile_error(mut self) -> Self {
        self.profile_fails = true;
        self
    }

    /// Queue the response for the next `create_order` call.
    pub fn push_order_response(&self, response: Result<Order, ApiError>) {
        self.order_responses.lock().unwrap().push_back(response);
    }

    /// Every order-creation request body seen so far, as JSON.
    pub fn order_requests(&self) -> Vec<serde_json::Value> {
        self.order_requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl EventApi for InMemoryEventApi {
    async fn fetch_event(&self, _id: EventId) -> Result<EventSummary, ApiError> {
        self.event.clone().ok_or(ApiError::Status {
            status: 404,
            body: String::new(),
        })
    }

    async fn fetch_catalog(&self, _id: EventId) -> Result<EventCatalog, ApiError> {
        self.catalog.clone().ok_or(ApiError::Status {
            status: 404,
            body: String::new(),
        })
    }

    async fn fetch_profile(&self) -> Result<Option<Profile>, ApiError> {
        if self.profile_fails {
            return Err(ApiError::Status {
                status: 401,
                body: String::new(),
            });
        }
        Ok(self.profile.clone())
    }

    async fn create_order(&self, _id: EventId, request: &OrderRequest) -> Result<Order, ApiError> {
        let value = serde_json::to_value(request)
            .map_err(|e| ApiError::Parse(e.to_string()))?;
        self.order_requests.lock().unwrap().push(value);
        self.order_responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(ApiError::Network("no scripted response".to_string())))
    }
}

/// Tracker that remembers every goal, optionally failing each call.
#[derive(Debug, Default)]
pub struct RecordingTracker {
    fails: bool,
    goals: Mutex<Vec<OrderPlaced>>,
}

impl RecordingTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fails: true,
            goals: Mutex::new(Vec::new()),
        }
    }

    pub fn goals(&self) -> Vec<OrderPlaced> {
        self.goals.lock().unwrap().clone()
    }
}

impl Tracker for RecordingTracker {
    fn order_placed(&self, goal: &OrderPlaced) -> Result<(), TrackError> {
        self.goals.lock().unwrap().push(goal.clone());
        if self.fails {
            return Err(TrackError("scripted tracker failure".to_string()));
        }
        Ok(())
    }
}
