//! Fallback accessors over an untyped JSON report.
//!
//! Reports are read as `serde_json::Value` rather than typed structs because
//! every field is optional and a missing field has a documented fallback.
//! Each call site names its fallback explicitly. A key that is absent or
//! `null` yields the fallback; a key holding the wrong JSON type is a
//! [`ShapeError`].

use serde_json::{Map, Value};

use crate::error::ShapeError;
use crate::value::MetricValue;

/// A JSON object (or the absence of one) plus its dotted location.
#[derive(Debug, Clone)]
pub struct Section<'a> {
    location: String,
    fields: Option<&'a Map<String, Value>>,
}

impl<'a> Section<'a> {
    /// Wraps the top level of a report. The root must be an object.
    pub fn root(value: &'a Value) -> Result<Self, ShapeError> {
        match value {
            Value::Object(fields) => Ok(Self {
                location: String::new(),
                fields: Some(fields),
            }),
            other => Err(ShapeError {
                field: "<root>".to_string(),
                expected: "object",
                found: type_name(other),
            }),
        }
    }

    /// Builds a section directly from an object value, for per-entry access.
    pub fn from_object(location: impl Into<String>, value: &'a Value) -> Result<Self, ShapeError> {
        let location = location.into();
        match value {
            Value::Object(fields) => Ok(Self {
                location,
                fields: Some(fields),
            }),
            other => Err(ShapeError {
                field: location,
                expected: "object",
                found: type_name(other),
            }),
        }
    }

    /// True when the section is missing, `null`, or `{}`.
    pub fn is_empty(&self) -> bool {
        self.fields.map_or(true, Map::is_empty)
    }

    /// Raw lookup; `null` is reported as absent.
    pub fn get(&self, key: &str) -> Option<&'a Value> {
        self.fields
            .and_then(|fields| fields.get(key))
            .filter(|value| !value.is_null())
    }

    /// Nested object, or an empty section when the key is absent.
    pub fn section(&self, key: &str) -> Result<Section<'a>, ShapeError> {
        let location = self.child(key);
        match self.get(key) {
            None => Ok(Section {
                location,
                fields: None,
            }),
            Some(value) => Section::from_object(location, value),
        }
    }

    /// Number at `key`, or `fallback` when the key is absent.
    pub fn number_or(&self, key: &str, fallback: MetricValue) -> Result<MetricValue, ShapeError> {
        match self.get(key) {
            None => Ok(fallback),
            Some(value) => MetricValue::from_json(value).ok_or_else(|| ShapeError {
                field: self.child(key),
                expected: "number",
                found: type_name(value),
            }),
        }
    }

    /// Array at `key`, or an empty slice when the key is absent.
    pub fn array(&self, key: &str) -> Result<&'a [Value], ShapeError> {
        match self.get(key) {
            None => Ok(&[]),
            Some(Value::Array(items)) => Ok(items.as_slice()),
            Some(other) => Err(ShapeError {
                field: self.child(key),
                expected: "array",
                found: type_name(other),
            }),
        }
    }

    /// Dotted location of `key` below this section, for error messages.
    pub fn child(&self, key: &str) -> String {
        if self.location.is_empty() {
            key.to_string()
        } else {
            format!("{}.{}", self.location, key)
        }
    }
}

/// True for values a report uses to mean "nothing here": `null`, `false`,
/// zero, `""`, `[]` and `{}`.
pub fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(fields) => fields.is_empty(),
    }
}

pub(crate) fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
