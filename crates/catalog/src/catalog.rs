use serde::{Deserialize, Serialize};

use eventreg_core::{EventId, PaymentMethodId, TicketTypeId};

/// Event metadata shown during registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventSummary {
    pub id: EventId,
    pub title: String,
}

/// Ticket type offered for an event.
///
/// Disabled types stay referenced by the catalog but are excluded from the
/// selectable set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketType {
    pub id: TicketTypeId,
    pub name: String,
    #[serde(default)]
    pub disabled: bool,
}

/// Payment method kind understood by the order flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentKind {
    Invoice,
    Card,
    Free,
    /// Any kind this client does not understand; never selectable.
    #[serde(other)]
    Other,
}

/// Payment method offered for an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentMethod {
    pub id: PaymentMethodId,
    #[serde(rename = "type")]
    pub kind: PaymentKind,
    /// Legal-terms link shown next to the buy action.
    pub agree_url: String,
}

impl PaymentMethod {
    pub fn is_selectable(&self) -> bool {
        self.kind != PaymentKind::Other
    }
}

/// Ticket/payment catalog fetched together with the event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventCatalog {
    pub types: Vec<TicketType>,
    pub payments: Vec<PaymentMethod>,
    pub is_active: bool,
}

impl EventCatalog {
    /// Ticket types offered to the user.
    pub fn selectable_types(&self) -> impl Iterator<Item = &TicketType> {
        self.types.iter().filter(|t| !t.disabled)
    }

    /// Payment methods offered to the user.
    pub fn selectable_payments(&self) -> impl Iterator<Item = &PaymentMethod> {
        self.payments.iter().filter(|p| p.is_selectable())
    }

    /// The sole selectable ticket type, when exactly one exists.
    ///
    /// New attendee rows pre-assign this type and the selector is inert.
    pub fn sole_type(&self) -> Option<&TicketType> {
        let mut types = self.selectable_types();
        match (types.next(), types.next()) {
            (Some(only), None) => Some(only),
            _ => None,
        }
    }

    /// The sole selectable payment method, when exactly one exists.
    pub fn sole_payment(&self) -> Option<&PaymentMethod> {
        let mut payments = self.selectable_payments();
        match (payments.next(), payments.next()) {
            (Some(only), None) => Some(only),
            _ => None,
        }
    }

    /// Look up a selectable ticket type by its raw id.
    pub fn ticket_type(&self, id: &str) -> Option<&TicketType> {
        self.selectable_types().find(|t| t.id.as_str() == id)
    }

    /// Look up a selectable payment method by its raw id.
    pub fn payment(&self, id: &str) -> Option<&PaymentMethod> {
        self.selectable_payments().find(|p| p.id.as_str() == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> EventCatalog {
        EventCatalog {
            types: vec![
                TicketType {
                    id: TicketTypeId::new("standard"),
                    name: "Standard".to_string(),
                    disabled: false,
                },
                TicketType {
                    id: TicketTypeId::new("vip"),
                    name: "VIP".to_string(),
                    disabled: true,
                },
            ],
            payments: vec![
                PaymentMethod {
                    id: PaymentMethodId::new("pm-card"),
                    kind: PaymentKind::Card,
                    agree_url: "https://example.com/terms".to_string(),
                },
                PaymentMethod {
                    id: PaymentMethodId::new("pm-crypto"),
                    kind: PaymentKind::Other,
                    agree_url: "https://example.com/terms".to_string(),
                },
            ],
            is_active: true,
        }
    }

    #[test]
    fn disabled_types_are_not_selectable() {
        let catalog = catalog();
        let selectable: Vec<_> = catalog.selectable_types().collect();
        assert_eq!(selectable.len(), 1);
        assert_eq!(selectable[0].id.as_str(), "standard");
    }

    #[test]
    fn unsupported_payment_kinds_are_not_selectable() {
        let catalog = catalog();
        let selectable: Vec<_> = catalog.selectable_payments().collect();
        assert_eq!(selectable.len(), 1);
        assert_eq!(selectable[0].id.as_str(), "pm-card");
    }

    #[test]
    fn sole_type_counts_only_selectable_entries() {
        // One enabled + one disabled type: the enabled one is the sole type.
        let catalog = catalog();
        assert_eq!(catalog.sole_type().map(|t| t.id.as_str()), Some("standard"));

        let mut two_enabled = catalog.clone();
        two_enabled.types[1].disabled = false;
        assert_eq!(two_enabled.sole_type(), None);
    }

    #[test]
    fn sole_payment_ignores_unsupported_kinds() {
        let catalog = catalog();
        assert_eq!(
            catalog.sole_payment().map(|p| p.id.as_str()),
            Some("pm-card")
        );
    }

    #[test]
    fn lookups_skip_excluded_entries() {
        let catalog = catalog();
        assert!(catalog.ticket_type("standard").is_some());
        assert!(catalog.ticket_type("vip").is_none());
        assert!(catalog.payment("pm-card").is_some());
        assert!(catalog.payment("pm-crypto").is_none());
    }

    #[test]
    fn unknown_payment_kind_deserializes_to_other() {
        let method: PaymentMethod = serde_json::from_str(
            r#"{"id": "pm-1", "type": "barter", "agree_url": "https://example.com/terms"}"#,
        )
        .unwrap();
        assert_eq!(method.kind, PaymentKind::Other);
        assert!(!method.is_selectable());
    }

    #[test]
    fn known_payment_kinds_deserialize_lowercase() {
        for (raw, kind) in [
            ("invoice", PaymentKind::Invoice),
            ("card", PaymentKind::Card),
            ("free", PaymentKind::Free),
        ] {
            let json = format!(r#"{{"id": "pm", "type": "{raw}", "agree_url": ""}}"#);
            let method: PaymentMethod = serde_json::from_str(&json).unwrap();
            assert_eq!(method.kind, kind);
        }
    }
}
