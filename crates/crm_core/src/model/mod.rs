//! CRM domain model.
//!
//! # Responsibility
//! - Define the records kept by the entity store and their creation/patch inputs.
//! - Provide input validation used by services before store writes.
//!
//! # Invariants
//! - Every record is identified by a sequential integer id that is never reused.
//! - `created_at` is assigned once at creation and is never part of a patch.
//! - Patch structs list exactly the mutable fields of their entity.

use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod customer;
pub mod note;
pub mod permission;
pub mod task;
pub mod user;

pub type UserId = u64;
pub type CustomerId = u64;
pub type TaskId = u64;
pub type NoteId = u64;
pub type PermissionId = u64;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

/// Input validation failure for create payloads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelValidationError {
    /// Required text field is empty after trim.
    BlankField(&'static str),
    /// Email is present but not shaped like `local@domain.tld`.
    InvalidEmail(String),
}

impl Display for ModelValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankField(field) => write!(f, "field `{field}` must not be blank"),
            Self::InvalidEmail(value) => write!(f, "invalid email address: `{value}`"),
        }
    }
}

impl Error for ModelValidationError {}

/// Unknown string value for one of the model enums.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
}

impl Display for ParseEnumError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "unsupported {} value `{}`", self.kind, self.value)
    }
}

impl Error for ParseEnumError {}

pub(crate) fn require_text(field: &'static str, value: &str) -> Result<(), ModelValidationError> {
    if value.trim().is_empty() {
        return Err(ModelValidationError::BlankField(field));
    }
    Ok(())
}

pub(crate) fn check_email(value: Option<&str>) -> Result<(), ModelValidationError> {
    match value.map(str::trim) {
        Some(email) if !email.is_empty() && !EMAIL_RE.is_match(email) => {
            Err(ModelValidationError::InvalidEmail(email.to_string()))
        }
        _ => Ok(()),
    }
}

/// Drops a patch value that carries no text, the way form submissions
/// omit untouched inputs.
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::{check_email, non_blank, require_text, ModelValidationError};

    #[test]
    fn email_check_allows_missing_and_empty_values() {
        assert!(check_email(None).is_ok());
        assert!(check_email(Some("  ")).is_ok());
        assert!(check_email(Some("info@acme.com.tr")).is_ok());
    }

    #[test]
    fn email_check_rejects_malformed_address() {
        assert_eq!(
            check_email(Some("acme.com")),
            Err(ModelValidationError::InvalidEmail("acme.com".to_string()))
        );
    }

    #[test]
    fn blank_text_is_rejected_and_dropped() {
        assert_eq!(
            require_text("title", " \t"),
            Err(ModelValidationError::BlankField("title"))
        );
        assert_eq!(non_blank(Some(" ".to_string())), None);
        assert_eq!(non_blank(Some("x".to_string())).as_deref(), Some("x"));
    }
}
