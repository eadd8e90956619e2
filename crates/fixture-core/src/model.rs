//! Document model and document instances.
//!
//! A [`Model`] binds a [`DocumentSchema`] to the [`DocumentStore`] its
//! documents are persisted in. [`Model::instantiate`] is the model's
//! constructor: it validates caller overrides, applies schema defaults and
//! leaves every other field [`Slot::Missing`]. [`Document::commit`] validates
//! required fields and persists the document.

use crate::schema::{DocumentSchema, FieldSchema};
use crate::store::{DocumentId, DocumentStore, StoreError, StoredFields};
use crate::types::FieldType;
use crate::values::{FieldValue, Slot};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Errors raised by the model when a document violates its schema.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// Field not declared by the schema
    #[error("Unknown field '{field}' for document '{document}'")]
    UnknownField { document: String, field: String },

    /// Value not valid for the declared field type
    #[error("Field '{document}.{field}' expects {expected}, got {found}")]
    TypeMismatch {
        document: String,
        field: String,
        expected: FieldType,
        found: &'static str,
    },

    /// Required field is unset or null at commit time
    #[error("Missing required field '{document}.{field}'")]
    MissingRequired { document: String, field: String },
}

/// Errors raised by model operations.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// Schema validation failed
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The store rejected or failed the write
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Caller-supplied field values for a new document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overrides {
    values: HashMap<String, FieldValue>,
}

impl Overrides {
    /// Create an empty set of overrides.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an override, replacing any previous value for the same field.
    pub fn with(mut self, field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.insert(field, value);
        self
    }

    /// Add an override in place.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<FieldValue>) {
        self.values.insert(field.into(), value.into());
    }

    /// Get the override for a field.
    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.values.get(field)
    }

    /// Number of overrides.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if there are no overrides.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over overridden field names and values.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K: Into<String>, V: Into<FieldValue>> FromIterator<(K, V)> for Overrides {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut overrides = Self::new();
        for (k, v) in iter {
            overrides.insert(k, v);
        }
        overrides
    }
}

/// A document model: a schema bound to the store its documents live in.
#[derive(Clone)]
pub struct Model {
    schema: Arc<DocumentSchema>,
    store: Arc<dyn DocumentStore>,
}

impl fmt::Debug for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Model")
            .field("name", &self.schema.name())
            .field("collection", &self.schema.collection())
            .finish_non_exhaustive()
    }
}

impl Model {
    /// Bind a schema to a store.
    pub fn new(schema: DocumentSchema, store: Arc<dyn DocumentStore>) -> Self {
        Self {
            schema: Arc::new(schema),
            store,
        }
    }

    /// Model name.
    pub fn name(&self) -> &str {
        self.schema.name()
    }

    /// Model schema.
    pub fn schema(&self) -> &DocumentSchema {
        &self.schema
    }

    /// Construct a new, unpersisted document from caller overrides.
    ///
    /// Overrides naming undeclared fields, or holding values the declared
    /// type does not accept, are rejected. Fields absent from the overrides
    /// receive their schema default when one exists; all others stay
    /// [`Slot::Missing`].
    pub fn instantiate(&self, overrides: Overrides) -> Result<Document, ValidationError> {
        for (name, value) in overrides.iter() {
            let field =
                self.schema
                    .get_field(name)
                    .ok_or_else(|| ValidationError::UnknownField {
                        document: self.name().to_string(),
                        field: name.to_string(),
                    })?;
            self.check_type(field, value)?;
        }

        let mut overrides = overrides.values;
        let slots = self
            .schema
            .fields()
            .iter()
            .map(|field| match overrides.remove(&field.name) {
                Some(value) => Slot::Set(value),
                None => field.default.clone().map_or(Slot::Missing, Slot::Set),
            })
            .collect();

        Ok(Document {
            model: self.clone(),
            slots,
            id: None,
        })
    }

    /// Validate and persist a document.
    ///
    /// The document is inserted on first commit and replaced afterwards.
    pub async fn commit(&self, document: &mut Document) -> Result<DocumentId, ModelError> {
        for (field, slot) in self.schema.fields().iter().zip(&document.slots) {
            let unset = slot.value().map_or(true, FieldValue::is_null);
            if field.required && unset {
                return Err(ValidationError::MissingRequired {
                    document: self.name().to_string(),
                    field: field.name.clone(),
                }
                .into());
            }
        }

        let fields = document.stored_fields();
        let collection = self.schema.collection();
        let id = match &document.id {
            Some(id) => {
                self.store.replace(collection, id, fields).await?;
                id.clone()
            }
            None => self.store.insert(collection, fields).await?,
        };

        debug!("Committed {} document {}", self.name(), id);
        document.id = Some(id.clone());
        Ok(id)
    }

    fn check_type(&self, field: &FieldSchema, value: &FieldValue) -> Result<(), ValidationError> {
        if field.field_type.accepts(value) {
            Ok(())
        } else {
            Err(ValidationError::TypeMismatch {
                document: self.name().to_string(),
                field: field.name.clone(),
                expected: field.field_type,
                found: value.kind_name(),
            })
        }
    }
}

/// One in-memory record of a model.
#[derive(Debug, Clone)]
pub struct Document {
    model: Model,
    /// One slot per schema field, in schema order
    slots: Vec<Slot>,
    id: Option<DocumentId>,
}

impl Document {
    /// The model this document belongs to.
    pub fn model(&self) -> &Model {
        &self.model
    }

    /// Get the slot of a field, or `None` if the schema does not declare it.
    pub fn get(&self, field: &str) -> Option<&Slot> {
        let idx = self.model.schema.field_index(field)?;
        self.slots.get(idx)
    }

    /// Get the value of a field, or `None` if it is unset or undeclared.
    pub fn value(&self, field: &str) -> Option<&FieldValue> {
        self.get(field).and_then(Slot::value)
    }

    /// Check whether a declared field is unset.
    pub fn is_missing(&self, field: &str) -> bool {
        self.get(field).is_some_and(Slot::is_missing)
    }

    /// Assign a value to a declared field.
    pub fn set(&mut self, field: &str, value: impl Into<FieldValue>) -> Result<(), ValidationError> {
        let value = value.into();
        let idx = self
            .model
            .schema
            .field_index(field)
            .ok_or_else(|| ValidationError::UnknownField {
                document: self.model.name().to_string(),
                field: field.to_string(),
            })?;
        self.model
            .check_type(&self.model.schema.fields()[idx], &value)?;
        self.slots[idx] = Slot::Set(value);
        Ok(())
    }

    /// Identity assigned by the store, once committed.
    pub fn id(&self) -> Option<&DocumentId> {
        self.id.as_ref()
    }

    /// Check whether the document has been persisted.
    pub fn is_committed(&self) -> bool {
        self.id.is_some()
    }

    /// Iterate over fields that hold a value, in schema order.
    pub fn values(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.model
            .schema
            .fields()
            .iter()
            .zip(&self.slots)
            .filter_map(|(field, slot)| slot.value().map(|v| (field.name.as_str(), v)))
    }

    /// Validate and persist this document through its model.
    pub async fn commit(&mut self) -> Result<DocumentId, ModelError> {
        let model = self.model.clone();
        model.commit(self).await
    }

    fn stored_fields(&self) -> StoredFields {
        self.values()
            .map(|(name, value)| (name.to_string(), value.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn person_schema() -> DocumentSchema {
        DocumentSchema::new(
            "Person",
            vec![
                FieldSchema::required("name", FieldType::String),
                FieldSchema::required("age", FieldType::Integer),
                FieldSchema::optional("surname", FieldType::String),
                FieldSchema::required("active", FieldType::Boolean).with_default(true),
            ],
        )
        .unwrap()
    }

    fn person_model() -> (Model, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        (Model::new(person_schema(), store.clone()), store)
    }

    #[test]
    fn test_instantiate_applies_overrides_and_defaults() {
        let (model, _) = person_model();
        let doc = model
            .instantiate(Overrides::new().with("age", 5).with("surname", "fake"))
            .unwrap();

        assert!(doc.is_missing("name"));
        assert_eq!(doc.value("age"), Some(&FieldValue::Int(5)));
        assert_eq!(doc.value("surname"), Some(&FieldValue::from("fake")));
        assert_eq!(doc.value("active"), Some(&FieldValue::Bool(true)));
        assert!(!doc.is_committed());
    }

    #[test]
    fn test_instantiate_rejects_unknown_field() {
        let (model, _) = person_model();
        let err = model
            .instantiate(Overrides::new().with("nickname", "bob"))
            .unwrap_err();
        assert!(matches!(err, ValidationError::UnknownField { ref field, .. } if field == "nickname"));
    }

    #[test]
    fn test_instantiate_rejects_wrong_type() {
        let (model, _) = person_model();
        let err = model
            .instantiate(Overrides::new().with("age", "five"))
            .unwrap_err();
        assert!(matches!(
            err,
            ValidationError::TypeMismatch {
                expected: FieldType::Integer,
                found: "string",
                ..
            }
        ));
    }

    #[test]
    fn test_explicit_null_is_not_missing() {
        let (model, _) = person_model();
        let doc = model
            .instantiate(Overrides::new().with("surname", FieldValue::Null))
            .unwrap();
        assert!(!doc.is_missing("surname"));
        assert_eq!(doc.value("surname"), Some(&FieldValue::Null));
    }

    #[test]
    fn test_set_is_type_checked() {
        let (model, _) = person_model();
        let mut doc = model.instantiate(Overrides::new()).unwrap();

        doc.set("name", "alice").unwrap();
        assert_eq!(doc.value("name"), Some(&FieldValue::from("alice")));
        assert!(doc.set("name", 3).is_err());
        assert!(doc.set("unknown", 3).is_err());
    }

    #[tokio::test]
    async fn test_commit_persists_set_fields() {
        let (model, store) = person_model();
        let mut doc = model
            .instantiate(Overrides::new().with("name", "alice").with("age", 30))
            .unwrap();

        let id = doc.commit().await.unwrap();
        assert_eq!(doc.id(), Some(&id));

        let stored = store.get("person", &id).await.unwrap();
        let names: Vec<&str> = stored.iter().map(|(n, _)| n.as_str()).collect();
        // Unset optional fields are not stored
        assert_eq!(names, vec!["name", "age", "active"]);
    }

    #[tokio::test]
    async fn test_commit_rejects_missing_required() {
        let (model, store) = person_model();
        let mut doc = model
            .instantiate(Overrides::new().with("age", 30))
            .unwrap();

        let err = doc.commit().await.unwrap_err();
        assert!(matches!(
            err,
            ModelError::Validation(ValidationError::MissingRequired { ref field, .. }) if field == "name"
        ));
        assert!(!doc.is_committed());
        assert_eq!(store.count("person").await, 0);
    }

    #[tokio::test]
    async fn test_commit_rejects_null_required() {
        let (model, _) = person_model();
        let mut doc = model
            .instantiate(
                Overrides::new()
                    .with("name", FieldValue::Null)
                    .with("age", 30),
            )
            .unwrap();
        assert!(matches!(
            doc.commit().await,
            Err(ModelError::Validation(ValidationError::MissingRequired { .. }))
        ));
    }

    #[tokio::test]
    async fn test_second_commit_replaces() {
        let (model, store) = person_model();
        let mut doc = model
            .instantiate(Overrides::new().with("name", "alice").with("age", 30))
            .unwrap();

        let first = doc.commit().await.unwrap();
        doc.set("age", 31).unwrap();
        let second = doc.commit().await.unwrap();

        assert_eq!(first, second);
        assert_eq!(store.count("person").await, 1);
        let stored = store.get("person", &first).await.unwrap();
        assert!(stored.contains(&("age".to_string(), FieldValue::Int(31))));
    }

    #[test]
    fn test_overrides_from_iter() {
        let overrides: Overrides = [("a", 1), ("b", 2), ("a", 3)].into_iter().collect();
        assert_eq!(overrides.len(), 2);
        assert_eq!(overrides.get("a"), Some(&FieldValue::Int(3)));
    }
}
