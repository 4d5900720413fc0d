//! Contact value objects: e-mail addresses and RU phone numbers.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use eventreg_core::{DomainError, DomainResult, ValueObject};

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_re() -> &'static Regex {
    EMAIL_RE.get_or_init(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap())
}

/// Syntactically valid e-mail address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    /// Parse a raw user-entered address. Surrounding whitespace is trimmed.
    pub fn parse(raw: &str) -> DomainResult<Self> {
        let value = raw.trim();
        if value.is_empty() {
            return Err(DomainError::validation("e-mail is required"));
        }
        if !email_re().is_match(value) {
            return Err(DomainError::validation("e-mail is invalid"));
        }
        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for Email {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl ValueObject for Email {}

/// RU phone number in canonical `+7XXXXXXXXXX` form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Phone(String);

impl Phone {
    /// Parse a raw user-entered RU number.
    ///
    /// Accepts `+7`-, `7`-, or `8`-prefixed 11-digit input as well as a bare
    /// 10-digit national number; separators are ignored. The national number
    /// must be a mobile one (leading `9`). The canonical form replaces
    /// whatever the user typed.
    pub fn parse(raw: &str) -> DomainResult<Self> {
        let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
        let national = match digits.len() {
            11 if digits.starts_with('7') || digits.starts_with('8') => &digits[1..],
            10 => digits.as_str(),
            _ => return Err(DomainError::validation("phone number is invalid")),
        };
        if !national.starts_with('9') {
            return Err(DomainError::validation("phone number is invalid"));
        }
        Ok(Self(format!("+7{national}")))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for Phone {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl ValueObject for Phone {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_accepts_plain_addresses() {
        let email = Email::parse("ann@example.com").unwrap();
        assert_eq!(email.as_str(), "ann@example.com");
    }

    #[test]
    fn email_trims_whitespace() {
        let email = Email::parse("  ann@example.com ").unwrap();
        assert_eq!(email.as_str(), "ann@example.com");
    }

    #[test]
    fn email_rejects_bad_shapes() {
        for raw in ["", "   ", "ann", "ann@", "@example.com", "ann@example", "a b@example.com"] {
            assert!(Email::parse(raw).is_err(), "accepted {raw:?}");
        }
    }

    #[test]
    fn phone_normalizes_common_formats() {
        for raw in [
            "+7 (999) 123-45-67",
            "89991234567",
            "79991234567",
            "9991234567",
        ] {
            let phone = Phone::parse(raw).unwrap();
            assert_eq!(phone.as_str(), "+79991234567", "from {raw:?}");
        }
    }

    #[test]
    fn phone_rejects_non_mobile_and_malformed_input() {
        for raw in ["123", "84951234567", "+1 555 123 4567", "not a number", "999123456789"] {
            assert!(Phone::parse(raw).is_err(), "accepted {raw:?}");
        }
    }
}
