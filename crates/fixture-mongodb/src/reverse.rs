//! Reverse conversion: BSON value → FieldValue.
//!
//! BSON loses some type information on the way in (decimals, dates and times
//! are stored as strings), so conversion back is guided by the declared
//! field type.

use bson::spec::BinarySubtype;
use bson::Bson;
use chrono::{NaiveDate, NaiveTime};
use fixture_core::{FieldType, FieldValue};
use rust_decimal::Decimal;
use std::str::FromStr;

/// Convert a BSON value read from MongoDB into a field value.
pub fn bson_to_field_value(value: &Bson, field_type: &FieldType) -> FieldValue {
    match (field_type, value) {
        (_, Bson::Null) => FieldValue::Null,

        (_, Bson::Boolean(b)) => FieldValue::Bool(*b),

        (FieldType::Float, Bson::Int32(i)) => FieldValue::Float(*i as f64),
        (FieldType::Float, Bson::Int64(i)) => FieldValue::Float(*i as f64),
        (FieldType::Decimal, Bson::Int32(i)) => FieldValue::Decimal(Decimal::from(*i)),
        (FieldType::Decimal, Bson::Int64(i)) => FieldValue::Decimal(Decimal::from(*i)),
        (_, Bson::Int32(i)) => FieldValue::Int(*i as i64),
        (_, Bson::Int64(i)) => FieldValue::Int(*i),

        (_, Bson::Double(f)) => FieldValue::Float(*f),

        (FieldType::Decimal, Bson::String(s)) => Decimal::from_str(s)
            .map(FieldValue::Decimal)
            .unwrap_or_else(|_| FieldValue::String(s.clone())),
        (FieldType::Decimal, Bson::Decimal128(d)) => Decimal::from_str(&d.to_string())
            .map(FieldValue::Decimal)
            .unwrap_or_else(|_| FieldValue::String(d.to_string())),
        (FieldType::Date, Bson::String(s)) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(FieldValue::Date)
            .unwrap_or_else(|_| FieldValue::String(s.clone())),
        (FieldType::Time, Bson::String(s)) => NaiveTime::parse_from_str(s, "%H:%M:%S%.f")
            .map(FieldValue::Time)
            .unwrap_or_else(|_| FieldValue::String(s.clone())),
        (_, Bson::String(s)) => FieldValue::String(s.clone()),

        (_, Bson::Binary(bin)) if bin.subtype == BinarySubtype::Uuid => {
            match uuid::Uuid::from_slice(&bin.bytes) {
                Ok(u) => FieldValue::Uuid(u),
                Err(_) => FieldValue::String(value.to_string()),
            }
        }

        (_, Bson::DateTime(dt)) => FieldValue::DateTime(dt.to_chrono()),

        (_, Bson::ObjectId(oid)) => FieldValue::String(oid.to_hex()),

        (_, Bson::Array(items)) => FieldValue::Array(
            items
                .iter()
                .map(|v| bson_to_field_value(v, &FieldType::List))
                .collect(),
        ),

        (_, Bson::Document(doc)) => FieldValue::Object(
            doc.iter()
                .map(|(k, v)| (k.clone(), bson_to_field_value(v, &FieldType::Dict)))
                .collect(),
        ),

        (_, other) => FieldValue::String(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forward::BsonValue;
    use chrono::{TimeZone, Utc};

    fn round_trip(value: FieldValue, field_type: FieldType) -> FieldValue {
        let bson = BsonValue::from(value).into_inner();
        bson_to_field_value(&bson, &field_type)
    }

    #[test]
    fn test_lossy_types_recovered_by_field_type() {
        let d = Decimal::new(1050, 2);
        assert_eq!(
            round_trip(FieldValue::Decimal(d), FieldType::Decimal),
            FieldValue::Decimal(d)
        );

        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert_eq!(
            round_trip(FieldValue::Date(date), FieldType::Date),
            FieldValue::Date(date)
        );

        let time = NaiveTime::from_hms_milli_opt(8, 30, 0, 500).unwrap();
        assert_eq!(
            round_trip(FieldValue::Time(time), FieldType::Time),
            FieldValue::Time(time)
        );
        let whole = NaiveTime::from_hms_opt(23, 59, 59).unwrap();
        assert_eq!(
            round_trip(FieldValue::Time(whole), FieldType::Time),
            FieldValue::Time(whole)
        );

        let u = uuid::Uuid::new_v4();
        assert_eq!(round_trip(FieldValue::Uuid(u), FieldType::Uuid), FieldValue::Uuid(u));

        let dt = Utc.with_ymd_and_hms(2020, 5, 17, 8, 30, 0).unwrap();
        assert_eq!(
            round_trip(FieldValue::DateTime(dt), FieldType::DateTime),
            FieldValue::DateTime(dt)
        );
    }

    #[test]
    fn test_int32_from_other_writers() {
        assert_eq!(
            bson_to_field_value(&Bson::Int32(7), &FieldType::Int),
            FieldValue::Int(7)
        );
        assert_eq!(
            bson_to_field_value(&Bson::Int32(7), &FieldType::Float),
            FieldValue::Float(7.0)
        );
    }

    #[test]
    fn test_object_id() {
        let oid = bson::oid::ObjectId::new();
        assert_eq!(
            bson_to_field_value(&Bson::ObjectId(oid), &FieldType::String),
            FieldValue::String(oid.to_hex())
        );
    }
}
