//! Value representations for docfactory documents.
//!
//! `FieldValue` is what a document field holds; `Slot` wraps it to tell an
//! unassigned field apart from a field explicitly set to any value, `Null`
//! and empty strings included.

use crate::types::FieldType;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;
use std::str::FromStr;
use uuid::Uuid;

/// Error produced when a value cannot be interpreted as a field type.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValueError {
    /// Textual input could not be parsed
    #[error("cannot parse '{input}' as {field_type}: {reason}")]
    Parse {
        field_type: FieldType,
        input: String,
        reason: String,
    },

    /// Value of the wrong kind for the field type
    #[error("a {found} value is not valid for a {field_type} field")]
    Incompatible {
        field_type: FieldType,
        found: &'static str,
    },
}

/// A field value held by a document.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Explicit null
    Null,

    /// Boolean value
    Bool(bool),

    /// 64-bit signed integer
    Int(i64),

    /// 64-bit floating point
    Float(f64),

    /// Exact decimal
    Decimal(Decimal),

    /// String value
    String(String),

    /// UUID value
    Uuid(Uuid),

    /// UTC timestamp
    DateTime(DateTime<Utc>),

    /// Calendar date
    Date(NaiveDate),

    /// Time of day
    Time(NaiveTime),

    /// List of values
    Array(Vec<FieldValue>),

    /// Mapping of values
    Object(BTreeMap<String, FieldValue>),
}

impl FieldValue {
    /// Check if this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Short name of the value's kind, used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Decimal(_) => "decimal",
            Self::String(_) => "string",
            Self::Uuid(_) => "uuid",
            Self::DateTime(_) => "datetime",
            Self::Date(_) => "date",
            Self::Time(_) => "time",
            Self::Array(_) => "array",
            Self::Object(_) => "object",
        }
    }

    /// Try to get this value as a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Try to get this value as an i64.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Try to get this value as an f64.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            Self::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Try to get this value as a decimal.
    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            Self::Decimal(d) => Some(*d),
            _ => None,
        }
    }

    /// Try to get this value as a string reference.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get this value as a UUID.
    pub fn as_uuid(&self) -> Option<&Uuid> {
        match self {
            Self::Uuid(u) => Some(u),
            _ => None,
        }
    }

    /// Try to get this value as a DateTime.
    pub fn as_datetime(&self) -> Option<&DateTime<Utc>> {
        match self {
            Self::DateTime(dt) => Some(dt),
            _ => None,
        }
    }

    /// Parse a textual value as the given field type.
    ///
    /// The literal `null` always yields [`FieldValue::Null`]; for text types
    /// `\null` yields the string `"null"`. Structured types (`dict`, `list`)
    /// are read as JSON.
    pub fn coerce(input: &str, field_type: &FieldType) -> Result<Self, ValueError> {
        if input == "null" {
            return Ok(Self::Null);
        }

        let parse_err = |reason: String| ValueError::Parse {
            field_type: *field_type,
            input: input.to_string(),
            reason,
        };

        let value = match field_type {
            FieldType::Str
            | FieldType::String
            | FieldType::Url
            | FieldType::UrlField
            | FieldType::Email => match input {
                "\\null" => Self::String("null".to_string()),
                _ => Self::String(input.to_string()),
            },
            FieldType::Uuid => {
                Self::Uuid(Uuid::parse_str(input).map_err(|e| parse_err(e.to_string()))?)
            }
            FieldType::Integer | FieldType::Int => {
                Self::Int(input.parse().map_err(|e: std::num::ParseIntError| {
                    parse_err(e.to_string())
                })?)
            }
            FieldType::Number => match input.parse::<i64>() {
                Ok(i) => Self::Int(i),
                Err(_) => Self::Float(input.parse().map_err(|e: std::num::ParseFloatError| {
                    parse_err(e.to_string())
                })?),
            },
            FieldType::Decimal => {
                Self::Decimal(Decimal::from_str(input).map_err(|e| parse_err(e.to_string()))?)
            }
            FieldType::Float => {
                Self::Float(input.parse().map_err(|e: std::num::ParseFloatError| {
                    parse_err(e.to_string())
                })?)
            }
            FieldType::Bool | FieldType::Boolean => {
                Self::Bool(input.parse().map_err(|e: std::str::ParseBoolError| {
                    parse_err(e.to_string())
                })?)
            }
            FieldType::DateTime | FieldType::LocalDateTime => Self::DateTime(
                parse_timestamp(input)
                    .ok_or_else(|| parse_err("expected RFC 3339 or YYYY-MM-DD".to_string()))?,
            ),
            FieldType::Date => Self::Date(
                NaiveDate::parse_from_str(input, "%Y-%m-%d")
                    .map_err(|e| parse_err(e.to_string()))?,
            ),
            FieldType::Time => Self::Time(
                NaiveTime::parse_from_str(input, "%H:%M:%S")
                    .map_err(|e| parse_err(e.to_string()))?,
            ),
            FieldType::Dict | FieldType::List => {
                let json: serde_json::Value =
                    serde_json::from_str(input).map_err(|e| parse_err(e.to_string()))?;
                Self::from(json)
            }
        };

        ensure_accepted(value, field_type)
    }

    /// Interpret a YAML value (e.g. a schema default) as the given field type.
    pub fn from_yaml(value: &serde_yaml::Value, field_type: &FieldType) -> Result<Self, ValueError> {
        match value {
            serde_yaml::Value::Null => Ok(Self::Null),
            // YAML already distinguishes `null` from the string "null"
            serde_yaml::Value::String(s) if field_type.accepts(&Self::String(String::new())) => {
                Ok(Self::String(s.clone()))
            }
            serde_yaml::Value::String(s) => Self::coerce(s, field_type),
            serde_yaml::Value::Bool(b) => ensure_accepted(Self::Bool(*b), field_type),
            serde_yaml::Value::Number(n) => {
                let value = if let Some(i) = n.as_i64() {
                    match field_type {
                        FieldType::Decimal => Self::Decimal(Decimal::from(i)),
                        FieldType::Float => Self::Float(i as f64),
                        _ => Self::Int(i),
                    }
                } else {
                    let f = n.as_f64().unwrap_or_default();
                    match field_type {
                        FieldType::Decimal => match Decimal::from_f64(f) {
                            Some(d) => Self::Decimal(d),
                            None => {
                                return Err(ValueError::Parse {
                                    field_type: *field_type,
                                    input: f.to_string(),
                                    reason: "out of decimal range".to_string(),
                                })
                            }
                        },
                        _ => Self::Float(f),
                    }
                };
                ensure_accepted(value, field_type)
            }
            serde_yaml::Value::Sequence(_) | serde_yaml::Value::Mapping(_) => {
                let json = serde_json::to_value(value).map_err(|e| ValueError::Parse {
                    field_type: *field_type,
                    input: format!("{value:?}"),
                    reason: e.to_string(),
                })?;
                ensure_accepted(Self::from(json), field_type)
            }
            serde_yaml::Value::Tagged(tagged) => Self::from_yaml(&tagged.value, field_type),
        }
    }
}

fn ensure_accepted(value: FieldValue, field_type: &FieldType) -> Result<FieldValue, ValueError> {
    if field_type.accepts(&value) {
        Ok(value)
    } else {
        Err(ValueError::Incompatible {
            field_type: *field_type,
            found: value.kind_name(),
        })
    }
}

/// Parse a timestamp string in various formats.
fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date.and_hms_opt(0, 0, 0)?.and_utc());
    }

    None
}

impl From<serde_json::Value> for FieldValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Self::Int(i),
                None => Self::Float(n.as_f64().unwrap_or_default()),
            },
            serde_json::Value::String(s) => Self::String(s),
            serde_json::Value::Array(items) => {
                Self::Array(items.into_iter().map(Self::from).collect())
            }
            serde_json::Value::Object(map) => {
                Self::Object(map.into_iter().map(|(k, v)| (k, Self::from(v))).collect())
            }
        }
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i32> for FieldValue {
    fn from(i: i32) -> Self {
        Self::Int(i as i64)
    }
}

impl From<i64> for FieldValue {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<f64> for FieldValue {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<Decimal> for FieldValue {
    fn from(d: Decimal) -> Self {
        Self::Decimal(d)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<Uuid> for FieldValue {
    fn from(u: Uuid) -> Self {
        Self::Uuid(u)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(dt: DateTime<Utc>) -> Self {
        Self::DateTime(dt)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// Storage slot for one document field.
///
/// `Missing` means nothing was ever assigned. It is distinct from
/// `Set(FieldValue::Null)`.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Slot {
    /// No value assigned
    #[default]
    Missing,
    /// A value was assigned
    Set(FieldValue),
}

impl Slot {
    /// Check if no value was assigned.
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }

    /// Get the assigned value, if any.
    pub fn value(&self) -> Option<&FieldValue> {
        match self {
            Self::Missing => None,
            Self::Set(v) => Some(v),
        }
    }

    /// Consume the slot, returning the assigned value, if any.
    pub fn into_value(self) -> Option<FieldValue> {
        match self {
            Self::Missing => None,
            Self::Set(v) => Some(v),
        }
    }
}
