//! Validation error types

use std::fmt;

/// Validation error for incoming thread and post payloads
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// One or more required fields were missing, null, or empty.
    ///
    /// Carries the full list of fields the payload requires, not just the
    /// ones that failed.
    MissingFields { fields: &'static [&'static str] },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingFields { fields } => write!(f, "{} are required", fields.join(", ")),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Keep a field only if it is present and non-empty.
pub(crate) fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
