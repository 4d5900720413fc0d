//! Buyer identity: draft, validation, committed value.

use serde::{Deserialize, Serialize};

use eventreg_core::ValueObject;

use crate::contact::{Email, Phone};
use crate::validate::{optional_phone, require, require_email};

/// Raw buyer-identity fields as typed into the form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerDraft {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
}

/// Validated buyer identity, carried read-only through the later steps as
/// the default attendee template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub first_name: String,
    pub last_name: String,
    pub email: Email,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<Phone>,
}

impl Customer {
    /// Re-open the committed value for editing (back-navigation).
    pub fn draft(&self) -> CustomerDraft {
        CustomerDraft {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.to_string(),
            phone: self.phone.as_ref().map(Phone::to_string).unwrap_or_default(),
        }
    }
}

impl ValueObject for Customer {}

/// Field-level failures from customer validation. One message per field;
/// untouched slots stay `None` so other fields keep their entered values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerErrors {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl CustomerErrors {
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.email.is_none()
            && self.phone.is_none()
    }
}

impl CustomerDraft {
    /// Validate every field and normalize into a `Customer`.
    ///
    /// The phone, when present, is replaced by its canonical form; an empty
    /// phone simply stays absent.
    pub fn validate(&self) -> Result<Customer, CustomerErrors> {
        let mut errors = CustomerErrors::default();

        let first_name = require(&self.first_name, "first name is required")
            .map_err(|m| errors.first_name = Some(m))
            .ok();
        let last_name = require(&self.last_name, "last name is required")
            .map_err(|m| errors.last_name = Some(m))
            .ok();
        let email = require_email(&self.email, "e-mail is invalid")
            .map_err(|m| errors.email = Some(m))
            .ok();
        let phone = optional_phone(&self.phone, "phone number is invalid")
            .map_err(|m| errors.phone = Some(m))
            .ok();

        match (first_name, last_name, email, phone) {
            (Some(first_name), Some(last_name), Some(email), Some(phone)) => Ok(Customer {
                first_name,
                last_name,
                email,
                phone,
            }),
            _ => Err(errors),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> CustomerDraft {
        CustomerDraft {
            first_name: "Ann".to_string(),
            last_name: "Lee".to_string(),
            email: "ann@example.com".to_string(),
            phone: String::new(),
        }
    }

    #[test]
    fn valid_draft_commits_without_phone() {
        let customer = draft().validate().unwrap();
        assert_eq!(customer.first_name, "Ann");
        assert_eq!(customer.last_name, "Lee");
        assert_eq!(customer.email.as_str(), "ann@example.com");
        assert_eq!(customer.phone, None);
    }

    #[test]
    fn phone_is_normalized_when_present() {
        let mut draft = draft();
        draft.phone = "8 (999) 123-45-67".to_string();
        let customer = draft.validate().unwrap();
        assert_eq!(customer.phone.unwrap().as_str(), "+79991234567");
    }

    #[test]
    fn unparseable_phone_fails_even_when_other_fields_are_valid() {
        let mut draft = draft();
        draft.phone = "12345".to_string();
        let errors = draft.validate().unwrap_err();
        assert!(errors.phone.is_some());
        assert!(errors.first_name.is_none());
        assert!(errors.last_name.is_none());
        assert!(errors.email.is_none());
    }

    #[test]
    fn each_missing_field_gets_its_own_slot() {
        let errors = CustomerDraft::default().validate().unwrap_err();
        assert!(errors.first_name.is_some());
        assert!(errors.last_name.is_some());
        assert!(errors.email.is_some());
        assert!(errors.phone.is_none());
    }

    #[test]
    fn draft_round_trips_the_committed_value() {
        let mut original = draft();
        original.phone = "+79991234567".to_string();
        let customer = original.validate().unwrap();
        let reopened = customer.draft();
        assert_eq!(reopened.first_name, "Ann");
        assert_eq!(reopened.phone, "+79991234567");
    }
}
