//! Interpretation of the service's prediction value

use super::ErrorInfo;
use serde_json::Value;

/// Binary outcome returned by the prediction service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Heart disease present (class 1)
    Positive,
    /// No heart disease (class 0)
    Negative,
}

impl Classification {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Positive => "Heart disease present",
            Self::Negative => "No heart disease",
        }
    }

    pub fn class_number(&self) -> u8 {
        match self {
            Self::Positive => 1,
            Self::Negative => 0,
        }
    }
}

/// Text label the prediction backend sends for class 1
pub const POSITIVE_LABEL: &str = "Presencia de enfermedad (Clase 1)";

/// Text label the prediction backend sends for class 0
pub const NEGATIVE_LABEL: &str = "Sin enfermedad (Clase 0)";

/// Map the raw `predicted_rating` value to a classification.
///
/// Accepts the JSON numbers `0` and `1` and the backend's two class labels.
/// Anything else, including the "inconclusive" label, is a parse error
/// rather than a default.
pub fn interpret(raw: &Value) -> Result<Classification, ErrorInfo> {
    let literal = match raw {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => match s.trim() {
            POSITIVE_LABEL => Some(1.0),
            NEGATIVE_LABEL => Some(0.0),
            _ => None,
        },
        _ => None,
    };

    match literal {
        Some(v) if v == 1.0 => Ok(Classification::Positive),
        Some(v) if v == 0.0 => Ok(Classification::Negative),
        _ => Err(ErrorInfo::parse(format!(
            "unexpected prediction value: {raw}"
        ))),
    }
}
