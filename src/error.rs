//! Error types for factory operations.

use fixture_core::{ModelError, StoreError, ValidationError};
use fixture_generator::MissingGeneratorError;

/// Errors raised while building or creating documents through a factory.
///
/// Model validation and store failures are forwarded unmodified.
#[derive(Debug, thiserror::Error)]
pub enum FactoryError {
    /// The factory has no model bound, or was marked abstract
    #[error("Cannot create documents from abstract factory {0}")]
    AbstractFactory(String),

    /// A required field's type has no value generator
    #[error("Cannot generate value for required field '{field}'")]
    MissingGenerator {
        field: String,
        #[source]
        source: MissingGeneratorError,
    },

    /// The document violates its schema
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The store rejected or failed the write
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<ModelError> for FactoryError {
    fn from(err: ModelError) -> Self {
        match err {
            ModelError::Validation(e) => FactoryError::Validation(e),
            ModelError::Store(e) => FactoryError::Store(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fixture_core::{DocumentId, FieldType};

    #[test]
    fn test_model_errors_are_flattened() {
        let err: FactoryError = ModelError::Validation(ValidationError::MissingRequired {
            document: "Person".to_string(),
            field: "name".to_string(),
        })
        .into();
        assert!(matches!(err, FactoryError::Validation(_)));
        assert_eq!(err.to_string(), "Missing required field 'Person.name'");

        let err: FactoryError = ModelError::Store(StoreError::NotFound {
            collection: "person".to_string(),
            id: DocumentId::new("person-1"),
        })
        .into();
        assert!(matches!(err, FactoryError::Store(StoreError::NotFound { .. })));
    }

    #[test]
    fn test_missing_generator_keeps_source() {
        let err = FactoryError::MissingGenerator {
            field: "birthday".to_string(),
            source: MissingGeneratorError {
                field_type: FieldType::Date,
            },
        };
        let source = std::error::Error::source(&err).unwrap();
        assert_eq!(
            source.to_string(),
            "No value generator registered for field type 'date'"
        );
    }
}
