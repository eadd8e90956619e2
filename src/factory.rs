//! Factory definitions and the creation engine.
//!
//! A [`Factory`] is bound to one document [`Model`]. Creating a document
//! instantiates the model with the caller's overrides, fills every required
//! field that is still unset from the [`GeneratorRegistry`], and commits the
//! result through the model's store. Optional fields the caller leaves unset
//! stay unset.

use crate::error::FactoryError;
use crate::params::FactoryParams;
use fixture_core::{Document, Model, Overrides};
use fixture_generator::{default_registry, GeneratorRegistry};
use futures::future::try_join_all;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Factory metadata fixed at definition time.
#[derive(Debug, Clone)]
pub struct FactoryMeta {
    /// Model the factory creates documents of
    pub model: Option<Model>,

    /// Abstract factories cannot create documents
    pub is_abstract: bool,

    /// Per-field strategies for [`Factory::create_with_params`]
    pub params: FactoryParams,
}

/// Builder for [`Factory`].
#[derive(Debug)]
pub struct FactoryBuilder {
    name: String,
    model: Option<Model>,
    params: FactoryParams,
    registry: Option<Arc<GeneratorRegistry>>,
    is_abstract: bool,
}

impl FactoryBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            model: None,
            params: FactoryParams::default(),
            registry: None,
            is_abstract: false,
        }
    }

    /// Bind the model to create documents of.
    pub fn model(mut self, model: Model) -> Self {
        self.model = Some(model);
        self
    }

    pub fn params(mut self, params: FactoryParams) -> Self {
        self.params = params;
        self
    }

    /// Use a specific generator registry instead of the process-wide one.
    pub fn registry(mut self, registry: Arc<GeneratorRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Mark the factory abstract even if a model is bound.
    pub fn mark_abstract(mut self) -> Self {
        self.is_abstract = true;
        self
    }

    pub fn build(self) -> Factory {
        let is_abstract = self.is_abstract || self.model.is_none();
        Factory {
            name: self.name,
            meta: FactoryMeta {
                model: self.model,
                is_abstract,
                params: self.params,
            },
            registry: self.registry.unwrap_or_else(default_registry),
        }
    }
}

/// Creates persisted documents of one model with generated field values.
#[derive(Debug, Clone)]
pub struct Factory {
    name: String,
    meta: FactoryMeta,
    registry: Arc<GeneratorRegistry>,
}

impl Factory {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn meta(&self) -> &FactoryMeta {
        &self.meta
    }

    pub fn is_abstract(&self) -> bool {
        self.meta.is_abstract
    }

    pub fn registry(&self) -> &GeneratorRegistry {
        &self.registry
    }

    /// The bound model, or an error if the factory is abstract.
    pub fn model(&self) -> Result<&Model, FactoryError> {
        match &self.meta.model {
            Some(model) if !self.meta.is_abstract => Ok(model),
            _ => Err(FactoryError::AbstractFactory(self.name.clone())),
        }
    }

    /// Create and persist one document.
    ///
    /// Overrides are applied verbatim, including explicit nulls. Required
    /// fields left unset (and without a schema default) receive a generated
    /// value for their exact field type.
    pub async fn create(&self, overrides: Overrides) -> Result<Document, FactoryError> {
        let document = self.prepare(overrides, false)?;
        self.persist(document).await
    }

    /// Same as [`create`](Self::create) without persisting the document.
    pub fn build(&self, overrides: Overrides) -> Result<Document, FactoryError> {
        self.prepare(overrides, false)
    }

    /// Create `count` documents concurrently.
    ///
    /// Fails with the first error; documents already persisted by other
    /// creations are kept.
    pub async fn create_batch(
        &self,
        count: usize,
        overrides: &Overrides,
    ) -> Result<Vec<Document>, FactoryError> {
        try_join_all((0..count).map(|_| self.create(overrides.clone()))).await
    }

    /// Create one document, consulting the factory's field strategies first.
    ///
    /// Any unset field with a declared strategy, optional or not, is filled
    /// by that strategy. Remaining unset required fields fall back to the
    /// registry.
    pub async fn create_with_params(&self, overrides: Overrides) -> Result<Document, FactoryError> {
        let document = self.prepare(overrides, true)?;
        self.persist(document).await
    }

    fn prepare(&self, overrides: Overrides, use_params: bool) -> Result<Document, FactoryError> {
        let model = self.model()?;
        let mut document = model.instantiate(overrides).inspect_err(|e| {
            warn!("Rejected {} overrides: {}", self.name, e);
        })?;

        for field in model.schema().fields() {
            if !document.is_missing(&field.name) {
                continue;
            }

            let strategy = use_params
                .then(|| self.meta.params.strategy(&field.name))
                .flatten();
            let value = match strategy {
                Some(strategy) => strategy.generate(field),
                None if field.required => {
                    let generate = self.registry.lookup(&field.field_type).map_err(|source| {
                        FactoryError::MissingGenerator {
                            field: field.name.clone(),
                            source,
                        }
                    })?;
                    generate()
                }
                None => continue,
            };

            debug!(
                "Generated {} value for {}.{}",
                field.field_type,
                model.name(),
                field.name
            );
            document.set(&field.name, value)?;
        }

        Ok(document)
    }

    async fn persist(&self, mut document: Document) -> Result<Document, FactoryError> {
        match document.commit().await {
            Ok(id) => {
                info!("{} created {} document {}", self.name, document.model().name(), id);
                Ok(document)
            }
            Err(e) => {
                warn!("{} failed to persist document: {}", self.name, e);
                Err(e.into())
            }
        }
    }
}

impl fmt::Display for Factory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.meta.model {
            Some(model) if !self.meta.is_abstract => {
                write!(f, "<{} for {}>", self.name, model.name())
            }
            _ => write!(f, "<{} (abstract)>", self.name),
        }
    }
}
