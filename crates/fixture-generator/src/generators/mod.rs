//! Fake-value generators, one per [`GeneratorKind`].
//!
//! Each kind has an RNG-parameterised function in a submodule and a
//! zero-argument [`Generator`] that draws from the thread-local RNG. The
//! zero-argument form is what the registry hands out; it is never seeded.

pub mod numeric;
pub mod text;
pub mod timestamp;
pub mod uuid;

use fixture_core::{FieldValue, GeneratorKind};

/// A zero-argument function producing one fresh random value per call.
pub type Generator = fn() -> FieldValue;

/// Get the generator for a semantic kind.
pub fn generator_for_kind(kind: GeneratorKind) -> Generator {
    match kind {
        GeneratorKind::Word => word,
        GeneratorKind::Integer => integer,
        GeneratorKind::Decimal => decimal,
        GeneratorKind::Boolean => boolean,
        GeneratorKind::Float => float,
        GeneratorKind::DateTime => datetime,
        GeneratorKind::Url => url,
        GeneratorKind::Email => email,
        GeneratorKind::Uuid => uuid_v4,
    }
}

fn word() -> FieldValue {
    text::generate_word(&mut rand::thread_rng())
}

fn integer() -> FieldValue {
    numeric::generate_integer(&mut rand::thread_rng())
}

fn decimal() -> FieldValue {
    numeric::generate_decimal(&mut rand::thread_rng())
}

fn boolean() -> FieldValue {
    numeric::generate_boolean(&mut rand::thread_rng())
}

fn float() -> FieldValue {
    numeric::generate_float(&mut rand::thread_rng())
}

fn datetime() -> FieldValue {
    timestamp::generate_datetime(&mut rand::thread_rng())
}

fn url() -> FieldValue {
    text::generate_url(&mut rand::thread_rng())
}

fn email() -> FieldValue {
    text::generate_email(&mut rand::thread_rng())
}

fn uuid_v4() -> FieldValue {
    uuid::generate_uuid_v4(&mut rand::thread_rng())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_kind_produces_its_value_kind() {
        let cases = [
            (GeneratorKind::Word, "string"),
            (GeneratorKind::Integer, "int"),
            (GeneratorKind::Decimal, "decimal"),
            (GeneratorKind::Boolean, "bool"),
            (GeneratorKind::Float, "float"),
            (GeneratorKind::DateTime, "datetime"),
            (GeneratorKind::Url, "string"),
            (GeneratorKind::Email, "string"),
            (GeneratorKind::Uuid, "uuid"),
        ];

        for (kind, expected) in cases {
            let value = generator_for_kind(kind)();
            assert_eq!(value.kind_name(), expected, "{kind:?}");
        }
    }

    #[test]
    fn test_generators_are_not_cached() {
        let generate = generator_for_kind(GeneratorKind::Uuid);
        assert_ne!(generate(), generate());
    }
}
