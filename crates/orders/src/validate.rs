//! Composable field validation.
//!
//! Each function checks one field independently and returns either the
//! normalized value or the message to attach to that field's error slot.
//! Forms combine them per record and re-run the full set on every submit
//! attempt; individual checks are cheap enough to run on blur as well.

use crate::contact::{Email, Phone};

/// Outcome of validating a single field.
pub type FieldResult<T> = Result<T, String>;

/// A required text field: blank input fails, otherwise the trimmed value
/// is kept.
pub fn require(raw: &str, message: &str) -> FieldResult<String> {
    let value = raw.trim();
    if value.is_empty() {
        Err(message.to_string())
    } else {
        Ok(value.to_string())
    }
}

/// A required e-mail field.
pub fn require_email(raw: &str, message: &str) -> FieldResult<Email> {
    Email::parse(raw).map_err(|_| message.to_string())
}

/// An optional phone field: empty input is a valid absence; anything else
/// must parse for the fixed region and is replaced by its canonical form.
pub fn optional_phone(raw: &str, message: &str) -> FieldResult<Option<Phone>> {
    if raw.trim().is_empty() {
        return Ok(None);
    }
    Phone::parse(raw).map(Some).map_err(|_| message.to_string())
}

/// Positions of records whose keyed value appears elsewhere in the list.
///
/// Every offending record is reported, so the failure can be attached to
/// that record's own field rather than to the list as a whole. Records
/// with a blank value are skipped (their required-field check reports the
/// problem instead).
pub fn duplicate_positions<T, F>(items: &[T], key: F) -> Vec<usize>
where
    F: Fn(&T) -> &str,
{
    let mut positions = Vec::new();
    for (i, item) in items.iter().enumerate() {
        let value = key(item).trim();
        if value.is_empty() {
            continue;
        }
        let duplicated = items
            .iter()
            .enumerate()
            .any(|(j, other)| j != i && key(other).trim() == value);
        if duplicated {
            positions.push(i);
        }
    }
    positions
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_trims_and_rejects_blank() {
        assert_eq!(require("  Ann ", "required"), Ok("Ann".to_string()));
        assert_eq!(require("", "required"), Err("required".to_string()));
        assert_eq!(require("   ", "required"), Err("required".to_string()));
    }

    #[test]
    fn require_email_uses_the_given_message() {
        assert!(require_email("ann@example.com", "bad e-mail").is_ok());
        assert_eq!(
            require_email("nope", "bad e-mail"),
            Err("bad e-mail".to_string())
        );
    }

    #[test]
    fn optional_phone_treats_empty_as_absent() {
        assert_eq!(optional_phone("", "bad phone"), Ok(None));
        assert_eq!(optional_phone("   ", "bad phone"), Ok(None));
        assert!(optional_phone("+79991234567", "bad phone").unwrap().is_some());
        assert_eq!(
            optional_phone("12", "bad phone"),
            Err("bad phone".to_string())
        );
    }

    #[test]
    fn duplicate_positions_reports_every_offender() {
        let items = ["a@x.com", "b@x.com", "a@x.com", "c@x.com"];
        assert_eq!(duplicate_positions(&items, |s| s), vec![0, 2]);
    }

    #[test]
    fn duplicate_positions_skips_blank_values() {
        let items = ["", "", "a@x.com"];
        assert_eq!(duplicate_positions(&items, |s| s), Vec::<usize>::new());
    }
}
