//! Form domain layer
//!
//! This module provides the field schema, the mutable form state and the
//! validator that turns raw input into a request payload.

mod field;
mod form_state;
mod validation;

pub use field::{
    all_fields, definition_for, FieldDefinition, FieldId, FieldKind, FIELD_COUNT, SAMPLE_VALUES,
};
pub use form_state::{FormError, FormState, SubmitStatus};
pub use validation::{validate, FieldViolations, ValidatedPayload, Violation};
