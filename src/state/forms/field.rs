//! Field schema for the prediction form
//!
//! The thirteen clinical measurements are fixed at compile time. Every
//! other part of the application iterates [`all_fields`] instead of
//! naming fields one by one.

use super::FormError;
use std::fmt;
use std::str::FromStr;

/// Identifier of one of the thirteen form inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldId {
    Age,
    Sex,
    Cp,
    Trestbps,
    Chol,
    Fbs,
    Restecg,
    Thalach,
    Exang,
    Oldpeak,
    Slope,
    Ca,
    Thal,
}

/// Number of fields in the schema
pub const FIELD_COUNT: usize = 13;

impl FieldId {
    /// All identifiers in canonical presentation order
    pub const ALL: [FieldId; FIELD_COUNT] = [
        FieldId::Age,
        FieldId::Sex,
        FieldId::Cp,
        FieldId::Trestbps,
        FieldId::Chol,
        FieldId::Fbs,
        FieldId::Restecg,
        FieldId::Thalach,
        FieldId::Exang,
        FieldId::Oldpeak,
        FieldId::Slope,
        FieldId::Ca,
        FieldId::Thal,
    ];

    /// Canonical wire key (case-sensitive, lowercase)
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldId::Age => "age",
            FieldId::Sex => "sex",
            FieldId::Cp => "cp",
            FieldId::Trestbps => "trestbps",
            FieldId::Chol => "chol",
            FieldId::Fbs => "fbs",
            FieldId::Restecg => "restecg",
            FieldId::Thalach => "thalach",
            FieldId::Exang => "exang",
            FieldId::Oldpeak => "oldpeak",
            FieldId::Slope => "slope",
            FieldId::Ca => "ca",
            FieldId::Thal => "thal",
        }
    }

    /// Position of this field in the canonical order
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Field at the given position in the canonical order
    pub fn from_index(index: usize) -> Option<FieldId> {
        Self::ALL.get(index).copied()
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldId {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| FormError::UnknownField(s.to_string()))
    }
}

/// Numeric type a field parses as
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Integer,
    Decimal,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::Integer => f.write_str("a whole number"),
            FieldKind::Decimal => f.write_str("a number"),
        }
    }
}

/// Valid domain of a parsed value
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Domain {
    /// Closed range `[min, max]`
    Range { min: f64, max: f64 },
    /// Lower bound only
    AtLeast(f64),
}

impl Domain {
    pub fn contains(&self, value: f64) -> bool {
        match *self {
            Domain::Range { min, max } => value >= min && value <= max,
            Domain::AtLeast(min) => value >= min,
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Domain::Range { min, max } if max - min == 1.0 => write!(f, "{min} or {max}"),
            Domain::Range { min, max } => write!(f, "between {min} and {max}"),
            Domain::AtLeast(min) => write!(f, "at least {min}"),
        }
    }
}

/// Static declaration of a single input
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDefinition {
    pub id: FieldId,
    pub kind: FieldKind,
    pub domain: Domain,
    /// Label shown above the input
    pub label: &'static str,
    /// Short explanation of the accepted values
    pub hint: &'static str,
}

const fn def(
    id: FieldId,
    kind: FieldKind,
    domain: Domain,
    label: &'static str,
    hint: &'static str,
) -> FieldDefinition {
    FieldDefinition {
        id,
        kind,
        domain,
        label,
        hint,
    }
}

const NON_NEGATIVE: Domain = Domain::AtLeast(0.0);

const fn binary() -> Domain {
    Domain::Range { min: 0.0, max: 1.0 }
}

const fn range(min: f64, max: f64) -> Domain {
    Domain::Range { min, max }
}

static SCHEMA: [FieldDefinition; FIELD_COUNT] = [
    def(FieldId::Age, FieldKind::Integer, NON_NEGATIVE, "Age", "years"),
    def(FieldId::Sex, FieldKind::Integer, binary(), "Sex", "0 = female, 1 = male"),
    def(FieldId::Cp, FieldKind::Integer, range(0.0, 3.0), "Chest pain type", "0-3"),
    def(FieldId::Trestbps, FieldKind::Integer, NON_NEGATIVE, "Resting blood pressure", "mm Hg"),
    def(FieldId::Chol, FieldKind::Integer, NON_NEGATIVE, "Serum cholesterol", "mg/dl"),
    def(FieldId::Fbs, FieldKind::Integer, binary(), "Fasting blood sugar > 120 mg/dl", "0 = no, 1 = yes"),
    def(FieldId::Restecg, FieldKind::Integer, range(0.0, 2.0), "Resting ECG", "0-2"),
    def(FieldId::Thalach, FieldKind::Integer, NON_NEGATIVE, "Max heart rate", "bpm"),
    def(FieldId::Exang, FieldKind::Integer, binary(), "Exercise induced angina", "0 = no, 1 = yes"),
    def(FieldId::Oldpeak, FieldKind::Decimal, NON_NEGATIVE, "ST depression", "e.g. 1.4"),
    def(FieldId::Slope, FieldKind::Integer, range(0.0, 2.0), "ST slope", "0-2"),
    def(FieldId::Ca, FieldKind::Integer, range(0.0, 3.0), "Major vessels", "0-3"),
    def(FieldId::Thal, FieldKind::Integer, range(1.0, 3.0), "Thalassemia", "1-3"),
];

/// A complete, valid set of inputs used by "load sample"
pub const SAMPLE_VALUES: [(FieldId, &str); FIELD_COUNT] = [
    (FieldId::Age, "57"),
    (FieldId::Sex, "1"),
    (FieldId::Cp, "2"),
    (FieldId::Trestbps, "130"),
    (FieldId::Chol, "236"),
    (FieldId::Fbs, "0"),
    (FieldId::Restecg, "1"),
    (FieldId::Thalach, "174"),
    (FieldId::Exang, "0"),
    (FieldId::Oldpeak, "0.0"),
    (FieldId::Slope, "1"),
    (FieldId::Ca, "1"),
    (FieldId::Thal, "2"),
];

/// Definition for a field
pub fn definition_for(id: FieldId) -> &'static FieldDefinition {
    &SCHEMA[id.index()]
}

/// All definitions in canonical presentation order
pub fn all_fields() -> &'static [FieldDefinition] {
    &SCHEMA
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_all_fields_in_canonical_order() {
        let keys: Vec<&str> = all_fields().iter().map(|d| d.id.as_str()).collect();
        assert_eq!(
            keys,
            vec![
                "age", "sex", "cp", "trestbps", "chol", "fbs", "restecg", "thalach", "exang",
                "oldpeak", "slope", "ca", "thal"
            ]
        );
    }

    #[test]
    fn test_definition_for_matches_id() {
        for id in FieldId::ALL {
            assert_eq!(definition_for(id).id, id);
        }
    }

    #[test]
    fn test_only_oldpeak_is_decimal() {
        let decimals: Vec<FieldId> = all_fields()
            .iter()
            .filter(|d| d.kind == FieldKind::Decimal)
            .map(|d| d.id)
            .collect();
        assert_eq!(decimals, vec![FieldId::Oldpeak]);
    }

    #[test]
    fn test_from_str_round_trips_canonical_keys() {
        for id in FieldId::ALL {
            assert_eq!(id.as_str().parse::<FieldId>().unwrap(), id);
        }
    }

    #[test]
    fn test_from_str_rejects_unknown_and_wrong_case() {
        assert!(matches!(
            "Edad".parse::<FieldId>(),
            Err(FormError::UnknownField(name)) if name == "Edad"
        ));
        assert!("AGE".parse::<FieldId>().is_err());
        assert!("".parse::<FieldId>().is_err());
    }

    #[test]
    fn test_index_round_trip() {
        for (i, id) in FieldId::ALL.iter().enumerate() {
            assert_eq!(id.index(), i);
            assert_eq!(FieldId::from_index(i), Some(*id));
        }
        assert_eq!(FieldId::from_index(FIELD_COUNT), None);
    }

    #[test]
    fn test_domain_contains() {
        let sex = definition_for(FieldId::Sex).domain;
        assert!(sex.contains(0.0));
        assert!(sex.contains(1.0));
        assert!(!sex.contains(2.0));

        let thal = definition_for(FieldId::Thal).domain;
        assert!(!thal.contains(0.0));
        assert!(thal.contains(3.0));

        assert!(NON_NEGATIVE.contains(0.0));
        assert!(!NON_NEGATIVE.contains(-0.1));
    }

    #[test]
    fn test_domain_display() {
        assert_eq!(binary().to_string(), "0 or 1");
        assert_eq!(range(1.0, 3.0).to_string(), "between 1 and 3");
        assert_eq!(NON_NEGATIVE.to_string(), "at least 0");
    }
}
