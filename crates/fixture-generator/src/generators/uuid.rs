//! UUID value generator.

use fixture_core::FieldValue;
use rand::Rng;
use uuid::Builder;

/// Generate a random version 4 UUID from the provided RNG.
pub fn generate_uuid_v4<R: Rng>(rng: &mut R) -> FieldValue {
    FieldValue::Uuid(Builder::from_random_bytes(rng.gen()).into_uuid())
}
