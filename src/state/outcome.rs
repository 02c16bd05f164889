//! Submission outcomes and the normalized error type

use super::forms::{FieldId, FieldViolations};
use super::Classification;
use std::fmt;

/// Category of a failed submission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// One or more fields failed local validation; nothing was sent
    ValidationError,
    /// The request never produced a response
    NetworkError,
    /// The service answered with an explicit error
    ServiceError,
    /// The response could not be understood
    ParseError,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorKind::ValidationError => "Invalid input",
            ErrorKind::NetworkError => "Network error",
            ErrorKind::ServiceError => "Service error",
            ErrorKind::ParseError => "Unexpected response",
        };
        f.write_str(s)
    }
}

/// A failed submission, ready to show to the user
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct ErrorInfo {
    pub kind: ErrorKind,
    pub message: String,
    /// Per-field problems, only populated for validation errors
    pub field_violations: FieldViolations,
}

impl ErrorInfo {
    fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            field_violations: FieldViolations::new(),
        }
    }

    pub fn validation(field_violations: FieldViolations) -> Self {
        let message = match field_violations.len() {
            1 => "1 field needs attention".to_string(),
            n => format!("{n} fields need attention"),
        };
        Self {
            kind: ErrorKind::ValidationError,
            message,
            field_violations,
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NetworkError, message)
    }

    pub fn service(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ServiceError, message)
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ParseError, message)
    }

    /// Violation message for a single field, if any
    pub fn violation_for(&self, id: FieldId) -> Option<String> {
        self.field_violations.get(&id).map(ToString::to_string)
    }
}

/// Terminal result of one submission
pub type SubmitResult = Result<Classification, ErrorInfo>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::forms::Violation;

    #[test]
    fn test_validation_message_counts_fields() {
        let mut violations = FieldViolations::new();
        violations.insert(FieldId::Sex, Violation::MissingValue);
        assert_eq!(ErrorInfo::validation(violations.clone()).message, "1 field needs attention");

        violations.insert(FieldId::Age, Violation::MissingValue);
        let info = ErrorInfo::validation(violations);
        assert_eq!(info.message, "2 fields need attention");
        assert_eq!(info.kind, ErrorKind::ValidationError);
    }

    #[test]
    fn test_remote_errors_have_no_field_violations() {
        let info = ErrorInfo::service("model unavailable");
        assert!(info.field_violations.is_empty());
        assert_eq!(info.to_string(), "Service error: model unavailable");
    }

    #[test]
    fn test_violation_for() {
        let mut violations = FieldViolations::new();
        violations.insert(FieldId::Age, Violation::MissingValue);
        let info = ErrorInfo::validation(violations);
        assert_eq!(info.violation_for(FieldId::Age).as_deref(), Some("required"));
        assert_eq!(info.violation_for(FieldId::Sex), None);
    }
}
