//! Text value generators backed by the `fake` crate.

use fake::faker::internet::en::{DomainSuffix, SafeEmail};
use fake::faker::lorem::en::Word;
use fake::Fake;
use fixture_core::FieldValue;
use rand::Rng;

/// Generate a single lorem word.
pub fn generate_word<R: Rng>(rng: &mut R) -> FieldValue {
    let word: String = Word().fake_with_rng(rng);
    FieldValue::String(word)
}

/// Generate an email address on a reserved example domain.
pub fn generate_email<R: Rng>(rng: &mut R) -> FieldValue {
    let email: String = SafeEmail().fake_with_rng(rng);
    FieldValue::String(email)
}

/// Generate an https URL of the form `https://www.<word>.<suffix>/`.
pub fn generate_url<R: Rng>(rng: &mut R) -> FieldValue {
    let host: String = Word().fake_with_rng(rng);
    let suffix: String = DomainSuffix().fake_with_rng(rng);
    FieldValue::String(format!("https://www.{}.{suffix}/", host.to_lowercase()))
}
