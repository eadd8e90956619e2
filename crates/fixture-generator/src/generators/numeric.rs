//! Numeric and boolean value generators.

use fixture_core::FieldValue;
use rand::Rng;
use rust_decimal::Decimal;

/// Upper bound (inclusive) of generated integers.
pub const MAX_INT: i64 = 9999;

/// Magnitude bound (exclusive) of generated floats and decimals.
pub const MAX_MAGNITUDE: i64 = 10_000;

/// Generate a random non-negative integer up to [`MAX_INT`].
pub fn generate_integer<R: Rng>(rng: &mut R) -> FieldValue {
    FieldValue::Int(rng.gen_range(0..=MAX_INT))
}

/// Generate a random float in `(-MAX_MAGNITUDE, MAX_MAGNITUDE)`.
pub fn generate_float<R: Rng>(rng: &mut R) -> FieldValue {
    let bound = MAX_MAGNITUDE as f64;
    FieldValue::Float(rng.gen_range(-bound..bound))
}

/// Generate a random decimal with two fractional digits.
pub fn generate_decimal<R: Rng>(rng: &mut R) -> FieldValue {
    let cents_bound = MAX_MAGNITUDE * 100;
    let cents = rng.gen_range(-cents_bound + 1..cents_bound);
    FieldValue::Decimal(Decimal::new(cents, 2))
}

/// Generate a fair random boolean.
pub fn generate_boolean<R: Rng>(rng: &mut R) -> FieldValue {
    FieldValue::Bool(rng.gen_bool(0.5))
}
