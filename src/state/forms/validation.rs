//! Validation of raw form values against the field schema

use super::field::{all_fields, Domain, FieldDefinition, FieldId, FieldKind, FIELD_COUNT};
use super::FormState;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::num::IntErrorKind;

/// Why a single field was rejected
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum Violation {
    #[error("required")]
    MissingValue,
    #[error("must be {expected}")]
    TypeMismatch { expected: FieldKind },
    #[error("must be {domain}")]
    OutOfRange { domain: Domain },
}

/// Every rejected field with its reason
pub type FieldViolations = BTreeMap<FieldId, Violation>;

/// A parsed value in its canonical numeric form
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CanonicalValue {
    Integer(i64),
    Decimal(f64),
}

impl CanonicalValue {
    pub fn as_f64(&self) -> f64 {
        match *self {
            CanonicalValue::Integer(v) => v as f64,
            CanonicalValue::Decimal(v) => v,
        }
    }
}

impl fmt::Display for CanonicalValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CanonicalValue::Integer(v) => write!(f, "{v}"),
            CanonicalValue::Decimal(v) => write!(f, "{v}"),
        }
    }
}

impl Serialize for CanonicalValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match *self {
            CanonicalValue::Integer(v) => serializer.serialize_i64(v),
            CanonicalValue::Decimal(v) => serializer.serialize_f64(v),
        }
    }
}

/// Fully validated request body.
///
/// Only [`validate`] constructs one, so holding a payload means all
/// thirteen fields passed.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedPayload {
    values: [CanonicalValue; FIELD_COUNT],
}

impl ValidatedPayload {
    pub fn get(&self, id: FieldId) -> CanonicalValue {
        self.values[id.index()]
    }

    /// Values paired with their field, in schema order
    pub fn iter(&self) -> impl Iterator<Item = (FieldId, CanonicalValue)> + '_ {
        FieldId::ALL.iter().map(move |id| (*id, self.get(*id)))
    }
}

impl Serialize for ValidatedPayload {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(FIELD_COUNT))?;
        for (id, value) in self.iter() {
            map.serialize_entry(id.as_str(), &value)?;
        }
        map.end()
    }
}

/// Check every field and either build the payload or report all violations.
///
/// Does not stop at the first failure.
pub fn validate(form: &FormState) -> Result<ValidatedPayload, FieldViolations> {
    let mut values = [CanonicalValue::Integer(0); FIELD_COUNT];
    let mut violations = FieldViolations::new();

    for definition in all_fields() {
        match validate_field(definition, form.value(definition.id)) {
            Ok(value) => values[definition.id.index()] = value,
            Err(violation) => {
                violations.insert(definition.id, violation);
            }
        }
    }

    if violations.is_empty() {
        Ok(ValidatedPayload { values })
    } else {
        tracing::debug!(count = violations.len(), "form failed validation");
        Err(violations)
    }
}

/// Check one raw value against its definition
pub fn validate_field(
    definition: &FieldDefinition,
    raw: &str,
) -> Result<CanonicalValue, Violation> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(Violation::MissingValue);
    }

    let mismatch = Violation::TypeMismatch {
        expected: definition.kind,
    };
    let value = match definition.kind {
        FieldKind::Integer => {
            let v = raw.parse::<i64>().map_err(|e| match e.kind() {
                // A whole number too large to hold is still a whole number
                IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => Violation::OutOfRange {
                    domain: definition.domain,
                },
                _ => mismatch,
            })?;
            CanonicalValue::Integer(v)
        }
        FieldKind::Decimal => {
            let v = raw.parse::<f64>().map_err(|_| mismatch)?;
            if !v.is_finite() {
                return Err(mismatch);
            }
            // -0 canonicalizes to 0
            CanonicalValue::Decimal(if v == 0.0 { 0.0 } else { v })
        }
    };

    if !definition.domain.contains(value.as_f64()) {
        return Err(Violation::OutOfRange {
            domain: definition.domain,
        });
    }

    Ok(value)
}
