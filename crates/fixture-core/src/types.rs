//! Field type catalog for docfactory schemas.
//!
//! This module defines `FieldType`, the closed set of type identifiers a
//! document schema can declare, and `GeneratorKind`, the semantic kind of
//! value a generator produces for a field type.

use crate::values::FieldValue;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Field type identifier declared by a schema field.
///
/// Several variants are different spellings of the same semantic type
/// (`Str`/`String`, `Number`/`Integer`/`Int`, `Bool`/`Boolean`, ...). They are
/// kept distinct because schemas written against different API generations
/// use different spellings, and every spelling in use needs its own
/// generator entry.
///
/// # YAML Format
///
/// ```yaml
/// type: string
/// type: int
/// type: date_time
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    // Text
    /// Short string spelling
    Str,
    /// Long string spelling
    String,

    // Identifiers
    /// UUID
    Uuid,

    // Numbers
    /// Generic number
    Number,
    /// Integer, long spelling
    Integer,
    /// Integer, short spelling
    Int,
    /// Exact decimal
    Decimal,
    /// Floating point
    Float,

    // Booleans
    /// Boolean, short spelling
    Bool,
    /// Boolean, long spelling
    Boolean,

    // Temporal
    /// Timestamp
    #[serde(alias = "datetime")]
    DateTime,
    /// Timestamp without timezone information
    #[serde(alias = "local_datetime")]
    LocalDateTime,
    /// Calendar date
    Date,
    /// Time of day
    Time,

    // Formatted strings
    /// URL, upper-case spelling
    Url,
    /// URL, field spelling
    UrlField,
    /// Email address
    Email,

    // Structured
    /// Free-form mapping
    Dict,
    /// List of values
    List,
}

impl FieldType {
    /// Every field type in the catalog, in declaration order.
    pub const ALL: &'static [FieldType] = &[
        FieldType::Str,
        FieldType::String,
        FieldType::Uuid,
        FieldType::Number,
        FieldType::Integer,
        FieldType::Int,
        FieldType::Decimal,
        FieldType::Float,
        FieldType::Bool,
        FieldType::Boolean,
        FieldType::DateTime,
        FieldType::LocalDateTime,
        FieldType::Date,
        FieldType::Time,
        FieldType::Url,
        FieldType::UrlField,
        FieldType::Email,
        FieldType::Dict,
        FieldType::List,
    ];

    /// The generator kind this field type maps to, if any.
    ///
    /// Types returning `None` cannot be auto-filled; declaring one of them as
    /// a required field makes factory creation fail with a missing generator.
    pub fn generator_kind(&self) -> Option<GeneratorKind> {
        match self {
            Self::Str | Self::String => Some(GeneratorKind::Word),
            Self::Uuid => Some(GeneratorKind::Uuid),
            Self::Number | Self::Integer | Self::Int => Some(GeneratorKind::Integer),
            Self::Decimal => Some(GeneratorKind::Decimal),
            Self::Float => Some(GeneratorKind::Float),
            Self::Bool | Self::Boolean => Some(GeneratorKind::Boolean),
            Self::DateTime | Self::LocalDateTime => Some(GeneratorKind::DateTime),
            Self::Url | Self::UrlField => Some(GeneratorKind::Url),
            Self::Email => Some(GeneratorKind::Email),
            Self::Date | Self::Time | Self::Dict | Self::List => None,
        }
    }

    /// Check whether a value may be stored in a field of this type.
    ///
    /// `Null` is accepted by every type; whether a null is allowed to be
    /// persisted is decided by the required flag at commit time.
    pub fn accepts(&self, value: &FieldValue) -> bool {
        match (self, value) {
            (_, FieldValue::Null) => true,
            (Self::Str | Self::String | Self::Url | Self::UrlField | Self::Email, v) => {
                matches!(v, FieldValue::String(_))
            }
            (Self::Uuid, v) => matches!(v, FieldValue::Uuid(_)),
            (Self::Number, v) => matches!(
                v,
                FieldValue::Int(_) | FieldValue::Float(_) | FieldValue::Decimal(_)
            ),
            (Self::Integer | Self::Int, v) => matches!(v, FieldValue::Int(_)),
            (Self::Decimal, v) => matches!(v, FieldValue::Decimal(_) | FieldValue::Int(_)),
            (Self::Float, v) => matches!(v, FieldValue::Float(_) | FieldValue::Int(_)),
            (Self::Bool | Self::Boolean, v) => matches!(v, FieldValue::Bool(_)),
            (Self::DateTime | Self::LocalDateTime, v) => matches!(v, FieldValue::DateTime(_)),
            (Self::Date, v) => matches!(v, FieldValue::Date(_)),
            (Self::Time, v) => matches!(v, FieldValue::Time(_)),
            (Self::Dict, v) => matches!(v, FieldValue::Object(_)),
            (Self::List, v) => matches!(v, FieldValue::Array(_)),
        }
    }

    /// The identifier used for this type in YAML schemas.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Str => "str",
            Self::String => "string",
            Self::Uuid => "uuid",
            Self::Number => "number",
            Self::Integer => "integer",
            Self::Int => "int",
            Self::Decimal => "decimal",
            Self::Float => "float",
            Self::Bool => "bool",
            Self::Boolean => "boolean",
            Self::DateTime => "date_time",
            Self::LocalDateTime => "local_date_time",
            Self::Date => "date",
            Self::Time => "time",
            Self::Url => "url",
            Self::UrlField => "url_field",
            Self::Email => "email",
            Self::Dict => "dict",
            Self::List => "list",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Semantic kind of a generated value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeneratorKind {
    /// A single dictionary word
    Word,
    /// A small non-negative integer
    Integer,
    /// An exact decimal with two fractional digits
    Decimal,
    /// A boolean
    Boolean,
    /// A floating point number
    Float,
    /// A UTC timestamp
    DateTime,
    /// An http(s) URL
    Url,
    /// An email address
    Email,
    /// A random (v4) UUID
    Uuid,
}
