//! Document schema definitions.
//!
//! A `DocumentSchema` is the ordered list of fields a document model
//! declares. Schemas can be built in code or loaded from a YAML catalog.
//!
//! ## YAML Format
//!
//! ```yaml
//! version: 1
//! documents:
//!   - name: Person
//!     collection: people
//!     fields:
//!       - name: name
//!         type: string
//!         required: true
//!       - name: active
//!         type: boolean
//!         default: true
//! ```

use crate::types::FieldType;
use crate::values::{FieldValue, ValueError};
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

// ============================================================================
// Error Types
// ============================================================================

/// Error type for schema operations.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// Error reading schema file
    #[error("Failed to read schema file: {0}")]
    IoError(#[from] std::io::Error),

    /// Error parsing YAML
    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// Unsupported schema file version
    #[error("Unsupported schema version: {0}")]
    UnsupportedVersion(u32),

    /// Document not found in catalog
    #[error("Document not found: {0}")]
    DocumentNotFound(String),

    /// Two documents with the same name in one catalog
    #[error("Document '{0}' is defined more than once")]
    DuplicateDocument(String),

    /// Two fields with the same name in one document
    #[error("Field '{field}' is declared more than once in document '{document}'")]
    DuplicateField { document: String, field: String },

    /// Default value not valid for the field type
    #[error("Invalid default for field '{document}.{field}': {source}")]
    InvalidDefault {
        document: String,
        field: String,
        #[source]
        source: ValueError,
    },
}

// ============================================================================
// Field and Document Schemas
// ============================================================================

/// A single field declared by a document schema.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSchema {
    /// Field name
    pub name: String,

    /// Declared field type
    pub field_type: FieldType,

    /// Whether the field must hold a non-null value before persistence
    pub required: bool,

    /// Value assigned by the model constructor when the caller supplies none
    pub default: Option<FieldValue>,
}

impl FieldSchema {
    /// Create a required field.
    pub fn required(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            required: true,
            default: None,
        }
    }

    /// Create an optional field.
    pub fn optional(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            required: false,
            default: None,
        }
    }

    /// Set the model-layer default for this field.
    pub fn with_default(mut self, value: impl Into<FieldValue>) -> Self {
        self.default = Some(value.into());
        self
    }
}

/// Ordered schema of one document model.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentSchema {
    name: String,
    collection: String,
    fields: Vec<FieldSchema>,
}

impl DocumentSchema {
    /// Create a document schema, storing documents in the lower-cased name
    /// as collection.
    ///
    /// Fails if two fields share a name or a default is not valid for its
    /// field type.
    pub fn new(name: impl Into<String>, fields: Vec<FieldSchema>) -> Result<Self, SchemaError> {
        let name = name.into();
        let collection = name.to_lowercase();
        Self::with_collection(name, collection, fields)
    }

    /// Create a document schema stored in an explicit collection.
    pub fn with_collection(
        name: impl Into<String>,
        collection: impl Into<String>,
        fields: Vec<FieldSchema>,
    ) -> Result<Self, SchemaError> {
        let name = name.into();

        let mut seen = HashSet::new();
        for field in &fields {
            if !seen.insert(field.name.as_str()) {
                return Err(SchemaError::DuplicateField {
                    document: name,
                    field: field.name.clone(),
                });
            }
            if let Some(default) = &field.default {
                if !field.field_type.accepts(default) {
                    return Err(SchemaError::InvalidDefault {
                        document: name,
                        field: field.name.clone(),
                        source: ValueError::Incompatible {
                            field_type: field.field_type,
                            found: default.kind_name(),
                        },
                    });
                }
            }
        }

        Ok(Self {
            name,
            collection: collection.into(),
            fields,
        })
    }

    /// Document model name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Collection documents are stored in.
    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Fields in declaration order.
    pub fn fields(&self) -> &[FieldSchema] {
        &self.fields
    }

    /// Get a field schema by name.
    pub fn get_field(&self, name: &str) -> Option<&FieldSchema> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Position of a field in declaration order.
    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    /// Get all field names.
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }

    /// Iterate over required fields.
    pub fn required_fields(&self) -> impl Iterator<Item = &FieldSchema> {
        self.fields.iter().filter(|f| f.required)
    }
}

// ============================================================================
// YAML Catalog
// ============================================================================

#[derive(Debug, Deserialize)]
struct RawCatalog {
    version: u32,
    documents: Vec<RawDocument>,
}

#[derive(Debug, Deserialize)]
struct RawDocument {
    name: String,
    #[serde(default)]
    collection: Option<String>,
    fields: Vec<RawField>,
}

#[derive(Debug, Deserialize)]
struct RawField {
    name: String,
    #[serde(rename = "type")]
    field_type: FieldType,
    #[serde(default)]
    required: bool,
    #[serde(default)]
    default: Option<serde_yaml::Value>,
}

/// Collection of document schemas loaded from YAML.
#[derive(Debug, Clone, Default)]
pub struct SchemaCatalog {
    documents: Vec<DocumentSchema>,

    /// Cached document lookup
    document_map: HashMap<String, usize>,
}

impl SchemaCatalog {
    /// Supported schema file version.
    pub const VERSION: u32 = 1;

    /// Parse a catalog from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, SchemaError> {
        let raw: RawCatalog = serde_yaml::from_str(yaml)?;
        if raw.version != Self::VERSION {
            return Err(SchemaError::UnsupportedVersion(raw.version));
        }

        let mut catalog = Self::default();
        for doc in raw.documents {
            let mut fields = Vec::with_capacity(doc.fields.len());
            for field in doc.fields {
                let default = match &field.default {
                    Some(value) => Some(FieldValue::from_yaml(value, &field.field_type).map_err(
                        |source| SchemaError::InvalidDefault {
                            document: doc.name.clone(),
                            field: field.name.clone(),
                            source,
                        },
                    )?),
                    None => None,
                };
                fields.push(FieldSchema {
                    name: field.name,
                    field_type: field.field_type,
                    required: field.required,
                    default,
                });
            }

            let schema = match doc.collection {
                Some(collection) => DocumentSchema::with_collection(doc.name, collection, fields)?,
                None => DocumentSchema::new(doc.name, fields)?,
            };
            catalog.add_document(schema)?;
        }

        Ok(catalog)
    }

    /// Load a catalog from a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SchemaError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Add a document schema to the catalog.
    pub fn add_document(&mut self, schema: DocumentSchema) -> Result<(), SchemaError> {
        if self.document_map.contains_key(schema.name()) {
            return Err(SchemaError::DuplicateDocument(schema.name().to_string()));
        }
        self.document_map
            .insert(schema.name().to_string(), self.documents.len());
        self.documents.push(schema);
        Ok(())
    }

    /// Get a document schema by name.
    pub fn get_document(&self, name: &str) -> Option<&DocumentSchema> {
        self.document_map
            .get(name)
            .and_then(|&idx| self.documents.get(idx))
    }

    /// Get a document schema by name, failing if it does not exist.
    pub fn document(&self, name: &str) -> Result<&DocumentSchema, SchemaError> {
        self.get_document(name)
            .ok_or_else(|| SchemaError::DocumentNotFound(name.to_string()))
    }

    /// Get all document names in declaration order.
    pub fn document_names(&self) -> Vec<&str> {
        self.documents.iter().map(|d| d.name()).collect()
    }

    /// Iterate over all document schemas.
    pub fn documents(&self) -> impl Iterator<Item = &DocumentSchema> {
        self.documents.iter()
    }
}
