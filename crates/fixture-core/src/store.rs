//! Persistence seam for document models.
//!
//! A `DocumentStore` durably stores the set fields of a document and hands
//! back an identity. `MemoryStore` is an in-process implementation for tests.

use crate::values::FieldValue;
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;

/// Identity assigned to a document by its store.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocumentId(String);

impl DocumentId {
    /// Wrap a store-specific identity.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identity as a string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Errors raised by a document store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Replace targeted a document that does not exist
    #[error("Document {id} not found in collection '{collection}'")]
    NotFound { collection: String, id: DocumentId },

    /// A unique index rejected the write
    #[error("Unique constraint violated in collection '{collection}': {detail}")]
    UniqueViolation { collection: String, detail: String },

    /// Any other backend failure (connectivity, server error, ...)
    #[error("Storage backend error: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Fields of one document as handed to a store, in schema order.
pub type StoredFields = Vec<(String, FieldValue)>;

/// Asynchronous persistence operation used by document models.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert a new document and return its identity.
    async fn insert(&self, collection: &str, fields: StoredFields)
        -> Result<DocumentId, StoreError>;

    /// Replace the stored fields of an existing document.
    async fn replace(
        &self,
        collection: &str,
        id: &DocumentId,
        fields: StoredFields,
    ) -> Result<(), StoreError>;
}

/// In-memory document store.
///
/// Identities are sequential per store. Unique indexes can be declared per
/// collection field; a write that would duplicate an indexed value fails with
/// [`StoreError::UniqueViolation`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, Vec<(DocumentId, StoredFields)>>>,
    unique_indexes: HashSet<(String, String)>,
    next_id: AtomicU64,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a unique index on `collection.field`.
    pub fn with_unique_index(
        mut self,
        collection: impl Into<String>,
        field: impl Into<String>,
    ) -> Self {
        self.unique_indexes.insert((collection.into(), field.into()));
        self
    }

    /// Get the stored fields of a document.
    pub async fn get(&self, collection: &str, id: &DocumentId) -> Option<StoredFields> {
        let collections = self.collections.read().await;
        collections
            .get(collection)?
            .iter()
            .find(|(doc_id, _)| doc_id == id)
            .map(|(_, fields)| fields.clone())
    }

    /// Number of documents in a collection.
    pub async fn count(&self, collection: &str) -> usize {
        let collections = self.collections.read().await;
        collections.get(collection).map_or(0, Vec::len)
    }

    fn check_unique(
        &self,
        collection: &str,
        existing: &[(DocumentId, StoredFields)],
        skip: Option<&DocumentId>,
        fields: &StoredFields,
    ) -> Result<(), StoreError> {
        for (name, value) in fields {
            if value.is_null() || !self.is_indexed(collection, name) {
                continue;
            }
            let clash = existing
                .iter()
                .filter(|(id, _)| Some(id) != skip)
                .any(|(_, other)| other.iter().any(|(n, v)| n == name && v == value));
            if clash {
                return Err(StoreError::UniqueViolation {
                    collection: collection.to_string(),
                    detail: format!("duplicate value for '{name}'"),
                });
            }
        }
        Ok(())
    }

    fn is_indexed(&self, collection: &str, field: &str) -> bool {
        self.unique_indexes
            .contains(&(collection.to_string(), field.to_string()))
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn insert(
        &self,
        collection: &str,
        fields: StoredFields,
    ) -> Result<DocumentId, StoreError> {
        let mut collections = self.collections.write().await;
        let documents = collections.entry(collection.to_string()).or_default();
        self.check_unique(collection, documents, None, &fields)?;

        let id = DocumentId::new(format!(
            "{collection}-{}",
            self.next_id.fetch_add(1, Ordering::SeqCst)
        ));
        documents.push((id.clone(), fields));
        Ok(id)
    }

    async fn replace(
        &self,
        collection: &str,
        id: &DocumentId,
        fields: StoredFields,
    ) -> Result<(), StoreError> {
        let mut collections = self.collections.write().await;
        let not_found = || StoreError::NotFound {
            collection: collection.to_string(),
            id: id.clone(),
        };
        let documents = collections.get_mut(collection).ok_or_else(not_found)?;
        self.check_unique(collection, documents, Some(id), &fields)?;

        let slot = documents
            .iter_mut()
            .find(|(doc_id, _)| doc_id == id)
            .ok_or_else(not_found)?;
        slot.1 = fields;
        Ok(())
    }
}
