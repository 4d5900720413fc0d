//! Buyer-identity step controller.

use eventreg_orders::{Customer, CustomerDraft, CustomerErrors};

/// One field of the customer form, for opportunistic (on-blur) validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CustomerField {
    FirstName,
    LastName,
    Email,
    Phone,
}

/// The buyer-identity step form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerForm {
    values: CustomerDraft,
    errors: CustomerErrors,
}

impl CustomerForm {
    pub fn new(values: CustomerDraft) -> Self {
        Self {
            values,
            errors: CustomerErrors::default(),
        }
    }

    pub fn values(&self) -> &CustomerDraft {
        &self.values
    }

    /// The UI edits field values in place.
    pub fn values_mut(&mut self) -> &mut CustomerDraft {
        &mut self.values
    }

    pub fn errors(&self) -> &CustomerErrors {
        &self.errors
    }

    /// Re-validate a single field without touching the other slots.
    pub fn validate_field(&mut self, field: CustomerField) {
        let all = match self.values.validate() {
            Ok(_) => CustomerErrors::default(),
            Err(errors) => errors,
        };
        match field {
            CustomerField::FirstName => self.errors.first_name = all.first_name,
            CustomerField::LastName => self.errors.last_name = all.last_name,
            CustomerField::Email => self.errors.email = all.email,
            CustomerField::Phone => self.errors.phone = all.phone,
        }
    }

    /// Validate everything; on success the normalized customer is returned
    /// and the slots are cleared. On failure the entered values are kept.
    pub fn submit(&mut self) -> Option<Customer> {
        match self.values.validate() {
            Ok(customer) => {
                self.errors = CustomerErrors::default();
                Some(customer)
            }
            Err(errors) => {
                self.errors = errors;
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_values() -> CustomerDraft {
        CustomerDraft {
            first_name: "Ann".to_string(),
            last_name: "Lee".to_string(),
            email: "ann@example.com".to_string(),
            phone: String::new(),
        }
    }

    #[test]
    fn submit_returns_the_normalized_customer() {
        let mut form = CustomerForm::new(valid_values());
        form.values_mut().phone = "8 999 123 45 67".to_string();
        let customer = form.submit().unwrap();
        assert_eq!(customer.phone.unwrap().as_str(), "+79991234567");
        assert!(form.errors().is_empty());
    }

    #[test]
    fn failed_submit_keeps_the_entered_values() {
        let mut form = CustomerForm::new(CustomerDraft {
            email: "not-an-email".to_string(),
            ..valid_values()
        });
        assert_eq!(form.submit(), None);
        assert!(form.errors().email.is_some());
        // The offending input stays on screen for correction.
        assert_eq!(form.values().email, "not-an-email");
        assert_eq!(form.values().first_name, "Ann");
    }

    #[test]
    fn validate_field_touches_only_its_own_slot() {
        let mut form = CustomerForm::new(CustomerDraft::default());
        form.validate_field(CustomerField::Email);
        assert!(form.errors().email.is_some());
        assert!(form.errors().first_name.is_none());
        assert!(form.errors().last_name.is_none());
    }

    #[test]
    fn validate_field_clears_a_fixed_slot() {
        let mut form = CustomerForm::new(CustomerDraft::default());
        form.validate_field(CustomerField::Email);
        assert!(form.errors().email.is_some());

        form.values_mut().email = "ann@example.com".to_string();
        form.validate_field(CustomerField::Email);
        assert!(form.errors().email.is_none());
    }
}
