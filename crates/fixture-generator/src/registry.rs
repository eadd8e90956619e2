//! Field type to value generator registry.

use crate::generators::{generator_for_kind, Generator};
use fixture_core::{DocumentSchema, FieldSchema, FieldType};
use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

/// A required field's type has no registered generator.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("No value generator registered for field type '{field_type}'")]
pub struct MissingGeneratorError {
    /// The unmapped field type
    pub field_type: FieldType,
}

static DEFAULT_REGISTRY: LazyLock<Arc<GeneratorRegistry>> =
    LazyLock::new(|| Arc::new(GeneratorRegistry::standard()));

/// The process-wide registry, built on first use and read-only afterwards.
pub fn default_registry() -> Arc<GeneratorRegistry> {
    Arc::clone(&DEFAULT_REGISTRY)
}

/// Mapping from exact field type to a zero-argument value generator.
///
/// Lookup is keyed on the declared [`FieldType`], so each spelling of a
/// semantic type (`str` and `string`, `bool` and `boolean`, ...) has its own
/// entry even when the generators are identical.
#[derive(Debug, Clone, Default)]
pub struct GeneratorRegistry {
    entries: HashMap<FieldType, Generator>,
}

impl GeneratorRegistry {
    /// Create a registry with no entries.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build the standard registry from the field type catalog.
    ///
    /// Every catalog type that declares a generator kind gets the generator
    /// for that kind; types without a kind are left unmapped.
    pub fn standard() -> Self {
        let entries = FieldType::ALL
            .iter()
            .filter_map(|ft| ft.generator_kind().map(|kind| (*ft, generator_for_kind(kind))))
            .collect();
        Self { entries }
    }

    /// Register (or replace) the generator for a field type.
    pub fn with_generator(mut self, field_type: FieldType, generator: Generator) -> Self {
        self.entries.insert(field_type, generator);
        self
    }

    /// Look up the generator for a field type.
    pub fn lookup(&self, field_type: &FieldType) -> Result<Generator, MissingGeneratorError> {
        self.entries
            .get(field_type)
            .copied()
            .ok_or(MissingGeneratorError {
                field_type: *field_type,
            })
    }

    /// Check whether a field type has a generator.
    pub fn contains(&self, field_type: &FieldType) -> bool {
        self.entries.contains_key(field_type)
    }

    /// Number of registered field types.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no field type is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered field types, in catalog order.
    pub fn field_types(&self) -> Vec<FieldType> {
        FieldType::ALL
            .iter()
            .filter(|ft| self.contains(ft))
            .copied()
            .collect()
    }

    /// Required fields of a schema whose type has no generator.
    pub fn uncovered<'a>(&self, schema: &'a DocumentSchema) -> Vec<&'a FieldSchema> {
        schema
            .required_fields()
            .filter(|f| !self.contains(&f.field_type))
            .collect()
    }

    /// Fail with the first required field of a schema that has no generator.
    pub fn check(&self, schema: &DocumentSchema) -> Result<(), MissingGeneratorError> {
        match self.uncovered(schema).first() {
            Some(field) => Err(MissingGeneratorError {
                field_type: field.field_type,
            }),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fixture_core::FieldValue;

    #[test]
    fn test_standard_covers_every_kinded_type() {
        let registry = GeneratorRegistry::standard();

        for ft in FieldType::ALL {
            assert_eq!(
                registry.contains(ft),
                ft.generator_kind().is_some(),
                "coverage mismatch for {ft}"
            );
        }
        assert_eq!(registry.len(), 15);
    }

    #[test]
    fn test_lookup_generates_accepted_values() {
        let registry = GeneratorRegistry::standard();

        for ft in registry.field_types() {
            let generate = registry.lookup(&ft).unwrap();
            for _ in 0..10 {
                let value = generate();
                assert!(!value.is_null());
                assert!(ft.accepts(&value), "{ft} rejected {value:?}");
            }
        }
    }

    #[test]
    fn test_lookup_missing() {
        let registry = GeneratorRegistry::standard();
        let err = registry.lookup(&FieldType::Date).unwrap_err();
        assert_eq!(err.field_type, FieldType::Date);
        assert_eq!(
            err.to_string(),
            "No value generator registered for field type 'date'"
        );
    }

    #[test]
    fn test_each_spelling_needs_an_entry() {
        fn fixed() -> FieldValue {
            FieldValue::from("fixed")
        }

        let registry = GeneratorRegistry::empty().with_generator(FieldType::Str, fixed);
        assert!(registry.lookup(&FieldType::Str).is_ok());
        assert!(registry.lookup(&FieldType::String).is_err());
    }

    #[test]
    fn test_with_generator_replaces() {
        fn zero() -> FieldValue {
            FieldValue::Int(0)
        }

        let registry = GeneratorRegistry::standard().with_generator(FieldType::Int, zero);
        assert_eq!(registry.lookup(&FieldType::Int).unwrap()(), FieldValue::Int(0));
        assert_eq!(registry.len(), 15);
    }

    #[test]
    fn test_uncovered_and_check() {
        let schema = DocumentSchema::new(
            "Event",
            vec![
                FieldSchema::required("title", FieldType::Str),
                FieldSchema::required("day", FieldType::Date),
                FieldSchema::optional("tags", FieldType::List),
            ],
        )
        .unwrap();
        let registry = GeneratorRegistry::standard();

        let uncovered: Vec<&str> = registry
            .uncovered(&schema)
            .iter()
            .map(|f| f.name.as_str())
            .collect();
        // Optional fields are never generated, so they are never uncovered
        assert_eq!(uncovered, vec!["day"]);
        assert_eq!(
            registry.check(&schema),
            Err(MissingGeneratorError {
                field_type: FieldType::Date
            })
        );
    }

    #[test]
    fn test_default_registry_is_shared() {
        let a = default_registry();
        let b = default_registry();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(a.len(), GeneratorRegistry::standard().len());
    }
}
