//! Core types for docfactory.
//!
//! This crate provides the foundational types shared by the factory, the
//! value generators and the storage backends:
//!
//! - [`FieldType`] - Catalog of field type identifiers a schema can declare
//! - [`FieldValue`] / [`Slot`] - Field values and the unset marker
//! - [`DocumentSchema`] / [`SchemaCatalog`] - Document schemas, loadable from YAML
//! - [`Model`] / [`Document`] - The document model contract
//! - [`DocumentStore`] - Asynchronous persistence seam, with [`MemoryStore`]
//!
//! # Architecture
//!
//! ```text
//! fixture-core (this crate)
//!    │
//!    ├─── fixture-generator   (field type → value generator registry)
//!    ├─── fixture-mongodb     (DocumentStore backed by MongoDB)
//!    └─── docfactory          (factories and the creation engine)
//! ```
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use fixture_core::{DocumentSchema, FieldSchema, FieldType, MemoryStore, Model, Overrides};
//!
//! let schema = DocumentSchema::new(
//!     "Person",
//!     vec![
//!         FieldSchema::required("name", FieldType::String),
//!         FieldSchema::optional("surname", FieldType::String),
//!     ],
//! )
//! .unwrap();
//!
//! let model = Model::new(schema, Arc::new(MemoryStore::new()));
//! let person = model.instantiate(Overrides::new().with("surname", "fake")).unwrap();
//! assert!(person.is_missing("name"));
//! ```

pub mod model;
pub mod schema;
pub mod store;
pub mod types;
pub mod values;

// Re-exports for convenience
pub use model::{Document, Model, ModelError, Overrides, ValidationError};
pub use schema::{DocumentSchema, FieldSchema, SchemaCatalog, SchemaError};
pub use store::{DocumentId, DocumentStore, MemoryStore, StoreError, StoredFields};
pub use types::{FieldType, GeneratorKind};
pub use values::{FieldValue, Slot, ValueError};
