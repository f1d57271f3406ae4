use serde::Deserialize;
use std::fmt;

/// A scalar field value as it appears in a record line.
///
/// Numbers and numeric text are both accepted for identifiers and
/// coordinates; coercion to the typed field happens in
/// [`Entity::try_from`](crate::models::Entity). Booleans and null decode
/// here but never coerce.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Integer(i64),
    Float(f64),
    Text(String),
    Bool(bool),
    Null,
}

/// 2^63, the first float above the i64 range
const I64_UPPER_EXCLUSIVE: f64 = 9_223_372_036_854_775_808.0;

impl Scalar {
    /// Coerce to an integer identifier. Floats are accepted only when integral.
    pub fn as_id(&self) -> Option<i64> {
        match self {
            Scalar::Integer(value) => Some(*value),
            Scalar::Float(value)
                if value.fract() == 0.0
                    && *value >= i64::MIN as f64
                    && *value < I64_UPPER_EXCLUSIVE =>
            {
                Some(*value as i64)
            }
            Scalar::Float(_) => None,
            Scalar::Text(text) => text.trim().parse().ok(),
            Scalar::Bool(_) | Scalar::Null => None,
        }
    }

    /// Coerce to degrees.
    pub fn as_degrees(&self) -> Option<f64> {
        match self {
            Scalar::Integer(value) => Some(*value as f64),
            Scalar::Float(value) => Some(*value),
            Scalar::Text(text) => text.trim().parse().ok(),
            Scalar::Bool(_) | Scalar::Null => None,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Integer(value) => write!(f, "{}", value),
            Scalar::Float(value) => write!(f, "{}", value),
            Scalar::Text(text) => write!(f, "{:?}", text),
            Scalar::Bool(value) => write!(f, "{}", value),
            Scalar::Null => write!(f, "null"),
        }
    }
}

/// One decoded input line, before field coercion
#[derive(Debug, Clone, Deserialize)]
pub struct RawRecord {
    pub user_id: Scalar,
    pub name: String,
    pub latitude: Scalar,
    pub longitude: Scalar,
}
