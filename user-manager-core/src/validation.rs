//! Field-level input validation
//!
//! Every operation that accepts user data runs it through a [`Validator`]
//! before touching the store. Failures are collected per field so the caller
//! receives one readable message for each offending field.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

/// Local part and domain of an address, matched case-insensitively.
///
/// Leading dots and consecutive dots are rejected separately in
/// [`is_valid_email`] since the regex engine has no look-around.
static EMAIL_REGEX: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"(?i)^[a-z0-9_'+\-.]*[a-z0-9_+\-]@([a-z0-9][a-z0-9\-]*\.)+[a-z]{2,}$").ok()
});

pub const NAME_REQUIRED: &str = "Name is required";
pub const INVALID_EMAIL: &str = "Invalid email format";
pub const ADDRESS_REQUIRED: &str = "Address is required";
pub const PHONE_REQUIRED: &str = "Phone number is required";
pub const ID_NOT_POSITIVE: &str = "ID must be a positive integer";

/// A single failing field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Machine-readable field key.
    pub field: String,
    /// Human-readable reason.
    pub message: String,
}

/// Validation failure carrying every failing field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    errors: Vec<FieldError>,
}

impl ValidationError {
    /// Build an error for a single field.
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            errors: vec![FieldError {
                field: field.into(),
                message: message.into(),
            }],
        }
    }

    /// All failing fields, in the order they were checked.
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// Whether the given field is among the failures.
    pub fn has_field(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.errors.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", error.field, error.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// Types that can check their own field constraints.
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError>;
}

/// Collects field errors and turns them into a single [`ValidationError`].
#[derive(Debug, Default)]
pub struct Validator {
    errors: Vec<FieldError>,
}

impl Validator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, field: &str, message: &str) {
        self.errors.push(FieldError {
            field: field.to_string(),
            message: message.to_string(),
        });
    }

    /// Require a non-empty string.
    pub fn non_empty(&mut self, field: &str, value: &str, message: &str) -> &mut Self {
        if value.is_empty() {
            self.push(field, message);
        }
        self
    }

    /// Require a syntactically valid email address.
    pub fn email(&mut self, field: &str, value: &str) -> &mut Self {
        if !is_valid_email(value) {
            self.push(field, INVALID_EMAIL);
        }
        self
    }

    /// Require an integer of at least 1.
    pub fn positive(&mut self, field: &str, value: u64, message: &str) -> &mut Self {
        if value == 0 {
            self.push(field, message);
        }
        self
    }

    /// Require `min <= value <= max`.
    pub fn range(&mut self, field: &str, value: u64, min: u64, max: u64, message: &str) -> &mut Self {
        if !(min..=max).contains(&value) {
            self.push(field, message);
        }
        self
    }

    /// Apply `check` only when the optional value is present.
    pub fn optional<T: ?Sized>(
        &mut self,
        value: Option<&T>,
        check: impl FnOnce(&mut Self, &T),
    ) -> &mut Self {
        if let Some(v) = value {
            check(self, v);
        }
        self
    }

    /// Fold in the field errors of another validation.
    pub fn merge(&mut self, result: Result<(), ValidationError>) -> &mut Self {
        if let Err(e) = result {
            self.errors.extend(e.errors);
        }
        self
    }

    pub fn finish(&mut self) -> Result<(), ValidationError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationError {
                errors: std::mem::take(&mut self.errors),
            })
        }
    }
}

/// Check an email address.
pub fn is_valid_email(value: &str) -> bool {
    if value.starts_with('.') || value.contains("..") {
        return false;
    }
    EMAIL_REGEX.as_ref().is_some_and(|re| re.is_match(value))
}
