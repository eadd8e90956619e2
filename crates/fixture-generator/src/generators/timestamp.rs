//! Timestamp value generator.

use chrono::{DateTime, Utc};
use fixture_core::FieldValue;
use rand::Rng;

/// Generate a random timestamp between the Unix epoch and now.
///
/// Timestamps have second precision.
pub fn generate_datetime<R: Rng>(rng: &mut R) -> FieldValue {
    let now = Utc::now().timestamp();
    let ts = rng.gen_range(0..=now);
    FieldValue::DateTime(DateTime::from_timestamp(ts, 0).unwrap_or_default())
}
