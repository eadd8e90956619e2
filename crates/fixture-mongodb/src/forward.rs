//! Forward conversion: FieldValue → BSON value.

use bson::{Bson, DateTime as BsonDateTime, Document};
use fixture_core::FieldValue;

/// Wrapper for BSON values that can be inserted into MongoDB.
#[derive(Debug, Clone, PartialEq)]
pub struct BsonValue(pub Bson);

impl BsonValue {
    /// Get the inner BSON value.
    pub fn into_inner(self) -> Bson {
        self.0
    }

    /// Get a reference to the inner BSON value.
    pub fn as_inner(&self) -> &Bson {
        &self.0
    }
}

impl From<FieldValue> for BsonValue {
    fn from(value: FieldValue) -> Self {
        match value {
            FieldValue::Null => BsonValue(Bson::Null),

            FieldValue::Bool(b) => BsonValue(Bson::Boolean(b)),

            FieldValue::Int(i) => BsonValue(Bson::Int64(i)),

            FieldValue::Float(f) => BsonValue(Bson::Double(f)),

            // MongoDB has Decimal128, but a string keeps the exact scale
            FieldValue::Decimal(d) => BsonValue(Bson::String(d.to_string())),

            FieldValue::String(s) => BsonValue(Bson::String(s)),

            // UUID - MongoDB has native UUID binary subtype
            FieldValue::Uuid(u) => BsonValue(Bson::Binary(bson::Binary {
                subtype: bson::spec::BinarySubtype::Uuid,
                bytes: u.as_bytes().to_vec(),
            })),

            // MongoDB DateTime has millisecond precision
            FieldValue::DateTime(dt) => BsonValue(Bson::DateTime(BsonDateTime::from_chrono(dt))),

            FieldValue::Date(d) => BsonValue(Bson::String(d.format("%Y-%m-%d").to_string())),

            FieldValue::Time(t) => BsonValue(Bson::String(t.format("%H:%M:%S%.f").to_string())),

            FieldValue::Array(items) => {
                let bson_arr: Vec<Bson> = items
                    .into_iter()
                    .map(|v| BsonValue::from(v).into_inner())
                    .collect();
                BsonValue(Bson::Array(bson_arr))
            }

            FieldValue::Object(map) => {
                let mut doc = Document::new();
                for (k, v) in map {
                    doc.insert(k, BsonValue::from(v).into_inner());
                }
                BsonValue(Bson::Document(doc))
            }
        }
    }
}

/// Convert stored document fields to a BSON document.
pub fn fields_to_document<I>(fields: I) -> Document
where
    I: IntoIterator<Item = (String, FieldValue)>,
{
    let mut doc = Document::new();
    for (name, value) in fields {
        doc.insert(name, BsonValue::from(value).into_inner());
    }
    doc
}
