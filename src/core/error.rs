use thiserror::Error;

/// A single validation error with field name and message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Wire name of the invalid field (e.g. "startdate").
    pub field: String,
    /// Human-readable error description.
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl ValidationError {
    /// Create a validation error for `field`.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Returned when a country code is not one of the supported jurisdictions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unsupported country '{code}'")]
pub struct UnsupportedCountry {
    /// The rejected code, as received.
    pub code: String,
}

/// Join a list of validation errors into one line for client-facing messages.
pub fn join_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
