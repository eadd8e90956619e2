//! docfactory
//!
//! Test fixture factories for schema-declared document models.
//!
//! A factory is bound to a document [`Model`]. Creating a document through it
//! applies caller overrides, generates values for every required field the
//! caller left unset, and persists the document through the model's store.
//!
//! # Crates
//!
//! - `fixture_core` - Field types, values, schemas, the model contract and stores
//! - `fixture_generator` - Field type to value generator registry
//! - `fixture_mongodb` - MongoDB-backed document store
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use docfactory::{DocumentSchema, FactoryBuilder, FieldSchema, FieldType, MemoryStore, Model, Overrides};
//!
//! # tokio_test::block_on(async {
//! let schema = DocumentSchema::new(
//!     "Person",
//!     vec![
//!         FieldSchema::required("name", FieldType::Str),
//!         FieldSchema::required("age", FieldType::Int),
//!         FieldSchema::optional("surname", FieldType::Str),
//!     ],
//! )
//! .unwrap();
//!
//! let factory = FactoryBuilder::new("PersonFactory")
//!     .model(Model::new(schema, Arc::new(MemoryStore::new())))
//!     .build();
//!
//! let person = factory.create(Overrides::new().with("age", 5)).await.unwrap();
//! assert!(person.is_committed());
//! assert!(person.is_missing("surname"));
//! # });
//! ```

pub mod error;
pub mod factory;
pub mod params;

pub use error::FactoryError;
pub use factory::{Factory, FactoryBuilder, FactoryMeta};
pub use params::{FactoryParams, FieldStrategy, Fixed, Sequence};

// Re-export the document model so callers need a single dependency
pub use fixture_core::{
    Document, DocumentId, DocumentSchema, DocumentStore, FieldSchema, FieldType, FieldValue,
    MemoryStore, Model, ModelError, Overrides, SchemaCatalog, Slot, StoreError, ValidationError,
};
pub use fixture_generator::{default_registry, GeneratorRegistry, MissingGeneratorError};
