//! Per-factory field strategies.
//!
//! A factory can declare a [`FieldStrategy`] for individual fields. Strategies
//! are consulted by [`Factory::create_with_params`](crate::Factory::create_with_params)
//! before the generator registry, and only there.

use fixture_core::{FieldSchema, FieldValue};
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Produces a value for one field of a new document.
pub trait FieldStrategy: Send + Sync {
    fn generate(&self, field: &FieldSchema) -> FieldValue;
}

impl<F> FieldStrategy for F
where
    F: Fn() -> FieldValue + Send + Sync,
{
    fn generate(&self, _field: &FieldSchema) -> FieldValue {
        self()
    }
}

/// Always yields the same value.
#[derive(Debug, Clone, PartialEq)]
pub struct Fixed(pub FieldValue);

impl FieldStrategy for Fixed {
    fn generate(&self, _field: &FieldSchema) -> FieldValue {
        self.0.clone()
    }
}

/// Yields successive values from a counter starting at 0.
///
/// Each `{n}` in the template is replaced with the counter. Fields whose type
/// accepts integers get the bare counter instead of the rendered template.
#[derive(Debug)]
pub struct Sequence {
    template: String,
    counter: AtomicU64,
}

impl Sequence {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            counter: AtomicU64::new(0),
        }
    }

    fn next(&self) -> u64 {
        self.counter.fetch_add(1, Ordering::SeqCst)
    }
}

impl FieldStrategy for Sequence {
    fn generate(&self, field: &FieldSchema) -> FieldValue {
        let n = self.next();
        if field.field_type.accepts(&FieldValue::Int(0)) {
            FieldValue::Int(n as i64)
        } else {
            FieldValue::String(self.template.replace("{n}", &n.to_string()))
        }
    }
}

/// Strategies declared by a factory, keyed by field name.
#[derive(Clone, Default)]
pub struct FactoryParams {
    strategies: HashMap<String, Arc<dyn FieldStrategy>>,
}

impl fmt::Debug for FactoryParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut fields: Vec<&str> = self.strategies.keys().map(String::as_str).collect();
        fields.sort_unstable();
        f.debug_struct("FactoryParams")
            .field("fields", &fields)
            .finish()
    }
}

impl FactoryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare the strategy for a field, replacing any previous one.
    pub fn with(mut self, field: impl Into<String>, strategy: impl FieldStrategy + 'static) -> Self {
        self.strategies.insert(field.into(), Arc::new(strategy));
        self
    }

    /// Get the strategy declared for a field.
    pub fn strategy(&self, field: &str) -> Option<&Arc<dyn FieldStrategy>> {
        self.strategies.get(field)
    }

    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }
}
