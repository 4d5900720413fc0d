//! Wizard entry: load the event, its catalog, and the optional profile.

use thiserror::Error;

use eventreg_catalog::{EventCatalog, EventSummary};
use eventreg_core::EventId;
use eventreg_orders::{Customer, CustomerDraft};

use crate::api::{EventApi, Profile};

/// Everything needed to start a wizard session.
#[derive(Debug, Clone, PartialEq)]
pub struct WizardContext {
    pub event: EventSummary,
    pub catalog: EventCatalog,
    /// Validated pre-filled customer, when the profile fetch produced one.
    pub profile: Option<Customer>,
}

/// Failure to assemble the context.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    /// Event missing, catalog missing, or registration closed. The wizard
    /// must refuse to render; the page layer shows a not-found condition.
    #[error("event not found")]
    EventNotFound,
}

/// Load the wizard context for `event_id`.
///
/// The event and its catalog are required together; a failure of either,
/// or an inactive catalog, is a not-found condition. The profile fetch is
/// best-effort and never fails the load.
pub async fn load_context<A: EventApi + ?Sized>(
    api: &A,
    event_id: EventId,
) -> Result<WizardContext, LoadError> {
    let (event, catalog) = futures::join!(api.fetch_event(event_id), api.fetch_catalog(event_id));
    let (event, catalog) = match (event, catalog) {
        (Ok(event), Ok(catalog)) if catalog.is_active => (event, catalog),
        _ => return Err(LoadError::EventNotFound),
    };

    let profile = match api.fetch_profile().await {
        Ok(profile) => profile.and_then(profile_customer),
        Err(err) => {
            tracing::debug!(%err, "profile fetch failed; continuing without one");
            None
        }
    };

    Ok(WizardContext {
        event,
        catalog,
        profile,
    })
}

/// A profile only pre-fills the wizard when it validates as a customer.
fn profile_customer(profile: Profile) -> Option<Customer> {
    CustomerDraft {
        first_name: profile.first_name,
        last_name: profile.last_name,
        email: profile.email,
        phone: String::new(),
    }
    .validate()
    .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::in_memory::InMemoryEventApi;

    fn event() -> EventSummary {
        EventSummary {
            id: EventId(7),
            title: "RustConf".to_string(),
        }
    }

    fn catalog(is_active: bool) -> EventCatalog {
        serde_json::from_str(&format!(
            r#"{{
                "types": [{{"id": "standard", "name": "Standard"}}],
                "payments": [{{"id": "pm-card", "type": "card", "agree_url": ""}}],
                "is_active": {is_active}
            }}"#,
        ))
        .unwrap()
    }

    fn profile() -> Profile {
        Profile {
            first_name: "Ann".to_string(),
            last_name: "Lee".to_string(),
            email: "ann@example.com".to_string(),
        }
    }

    #[tokio::test]
    async fn loads_event_catalog_and_profile() {
        let api = InMemoryEventApi::new()
            .with_event(event())
            .with_catalog(catalog(true))
            .with_profile(profile());

        let context = load_context(&api, EventId(7)).await.unwrap();
        assert_eq!(context.event.title, "RustConf");
        let customer = context.profile.unwrap();
        assert_eq!(customer.first_name, "Ann");
        assert_eq!(customer.email.as_str(), "ann@example.com");
    }

    #[tokio::test]
    async fn missing_event_is_not_found() {
        let api = InMemoryEventApi::new().with_catalog(catalog(true));
        assert_eq!(
            load_context(&api, EventId(7)).await.unwrap_err(),
            LoadError::EventNotFound
        );
    }

    #[tokio::test]
    async fn missing_catalog_is_not_found() {
        let api = InMemoryEventApi::new().with_event(event());
        assert_eq!(
            load_context(&api, EventId(7)).await.unwrap_err(),
            LoadError::EventNotFound
        );
    }

    #[tokio::test]
    async fn inactive_catalog_is_not_found() {
        let api = InMemoryEventApi::new()
            .with_event(event())
            .with_catalog(catalog(false));
        assert_eq!(
            load_context(&api, EventId(7)).await.unwrap_err(),
            LoadError::EventNotFound
        );
    }

    #[tokio::test]
    async fn profile_failure_is_ignored() {
        let api = InMemoryEventApi::new()
            .with_event(event())
            .with_catalog(catalog(true))
            .with_profile_error();

        let context = load_context(&api, EventId(7)).await.unwrap();
        assert_eq!(context.profile, None);
    }

    #[tokio::test]
    async fn invalid_profile_is_treated_as_absent() {
        let api = InMemoryEventApi::new()
            .with_event(event())
            .with_catalog(catalog(true))
            .with_profile(Profile {
                email: "not-an-email".to_string(),
                ..profile()
            });

        let context = load_context(&api, EventId(7)).await.unwrap();
        assert_eq!(context.profile, None);
    }
}
