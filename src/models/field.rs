use serde::{Deserialize, Serialize};
use std::fmt;

/// A form value that clients may send either as a JSON number or as a string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(f64),
    Text(String),
}

impl FieldValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Number(value) => Some(*value),
            FieldValue::Text(text) => text.trim().parse().ok(),
        }
    }

    /// Integer view; fractional numbers are truncated, text must be an integer literal.
    /// Values outside the `i32` range are rejected rather than saturated.
    pub fn as_i32(&self) -> Option<i32> {
        match self {
            FieldValue::Number(value) if value.is_finite() => {
                let whole = value.trunc();
                (whole >= i32::MIN as f64 && whole <= i32::MAX as f64).then_some(whole as i32)
            }
            FieldValue::Number(_) => None,
            FieldValue::Text(text) => text.trim().parse().ok(),
        }
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, FieldValue::Text(text) if text.trim().is_empty())
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Number(value) => write!(f, "{}", value),
            FieldValue::Text(text) => write!(f, "{}", text.trim()),
        }
    }
}

/// Names of required fields that are absent, null or blank
pub fn missing_fields(fields: &[(&'static str, Option<&FieldValue>)]) -> Vec<&'static str> {
    fields
        .iter()
        .filter(|(_, value)| value.map_or(true, FieldValue::is_blank))
        .map(|(name, _)| *name)
        .collect()
}
