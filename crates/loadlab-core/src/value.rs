use std::fmt;

use serde::{Serialize, Serializer};
use serde_json::Value;

/// Numeric cell of an output table.
///
/// Counters keep the representation they had in the report, so an integer
/// counter is written as `10` and never as `10.0`. Derived ratios are floats.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MetricValue {
    Int(i64),
    Float(f64),
}

impl MetricValue {
    pub const ZERO: MetricValue = MetricValue::Int(0);

    /// Reads a JSON number. Returns `None` for any other JSON type.
    pub fn from_json(value: &Value) -> Option<Self> {
        let Value::Number(number) = value else {
            return None;
        };
        if let Some(i) = number.as_i64() {
            Some(Self::Int(i))
        } else {
            number.as_f64().map(Self::Float)
        }
    }

    pub fn as_f64(self) -> f64 {
        match self {
            Self::Int(i) => i as f64,
            Self::Float(f) => f,
        }
    }

    pub fn is_positive(self) -> bool {
        match self {
            Self::Int(i) => i > 0,
            Self::Float(f) => f > 0.0,
        }
    }

    /// Sums two values, staying integral when both sides are integers.
    pub fn add(self, other: Self) -> Self {
        match (self, other) {
            (Self::Int(a), Self::Int(b)) => match a.checked_add(b) {
                Some(sum) => Self::Int(sum),
                None => Self::Float(a as f64 + b as f64),
            },
            (a, b) => Self::Float(a.as_f64() + b.as_f64()),
        }
    }

    /// `part / whole * 100`, or `None` when `whole` is not positive.
    pub fn percent_of(part: Self, whole: Self) -> Option<Self> {
        if !whole.is_positive() {
            return None;
        }
        Some(Self::Float(part.as_f64() / whole.as_f64() * 100.0))
    }
}

impl Default for MetricValue {
    fn default() -> Self {
        Self::ZERO
    }
}

impl From<i64> for MetricValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for MetricValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(i) => write!(f, "{i}"),
            // Debug keeps the trailing `.0` on whole floats.
            Self::Float(x) => write!(f, "{x:?}"),
        }
    }
}

impl Serialize for MetricValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match *self {
            Self::Int(i) => serializer.serialize_i64(i),
            Self::Float(x) => serializer.serialize_f64(x),
        }
    }
}
