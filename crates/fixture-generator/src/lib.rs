//! Value generator registry for docfactory.
//!
//! This crate maps every [`FieldType`](fixture_core::FieldType) that can be
//! auto-filled to a zero-argument generator producing a plausible random
//! value. Values come from the `fake` crate and the thread-local RNG and are
//! deliberately unseeded, so repeated calls (and repeated test runs) produce
//! different values.
//!
//! # Example
//!
//! ```rust
//! use fixture_core::FieldType;
//! use fixture_generator::default_registry;
//!
//! let registry = default_registry();
//! let generate = registry.lookup(&FieldType::Email).unwrap();
//! let email = generate();
//! assert!(email.as_str().unwrap().contains('@'));
//!
//! assert!(registry.lookup(&FieldType::Date).is_err());
//! ```
//!
//! # Generators
//!
//! - `word` - a lorem word (`str`, `string`)
//! - `integer` - 0..=9999 (`number`, `integer`, `int`)
//! - `decimal` - two fractional digits (`decimal`)
//! - `float` - -10000..10000 (`float`)
//! - `boolean` - fair coin (`bool`, `boolean`)
//! - `datetime` - epoch..now (`date_time`, `local_date_time`)
//! - `url` - `https://www.<word>.<suffix>/` (`url`, `url_field`)
//! - `email` - safe example-domain address (`email`)
//! - `uuid` - v4 (`uuid`)

pub mod generators;
pub mod registry;

// Re-exports for convenience
pub use generators::{generator_for_kind, Generator};
pub use registry::{default_registry, GeneratorRegistry, MissingGeneratorError};
