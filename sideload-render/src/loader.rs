//! Loading related objects by identifier.
//!
//! When a relationship holds only identifiers and the client asked for it to
//! be sideloaded, the assembler fetches the full objects through a
//! [`ResourceLoader`]. A [`LoadError::NotFound`] result skips the embed; any
//! other failure aborts the build.

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::error::BoxError;

/// A serialized object: field name to value.
pub type Object = Map<String, Value>;

/// Result type for loader operations.
pub type LoadResult<T> = Result<T, LoadError>;

/// Errors returned by a [`ResourceLoader`].
#[derive(Debug, Error)]
pub enum LoadError {
    /// No object with this identifier exists.
    #[error("no {model} with id `{id}`")]
    NotFound { model: String, id: String },

    /// The backing store failed.
    #[error("loader backend error: {0}")]
    Backend(#[source] BoxError),
}

impl LoadError {
    /// Create a not found error.
    pub fn not_found(model: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            model: model.into(),
            id: id.into(),
        }
    }

    /// Create a backend error.
    pub fn backend(source: impl Into<BoxError>) -> Self {
        Self::Backend(source.into())
    }

    /// Check if this is a not found error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Fetches serialized objects by model and identifier.
#[async_trait]
pub trait ResourceLoader: Send + Sync {
    /// Load the serialized object of `model` identified by `id`.
    async fn load(&self, model: &str, id: &str) -> LoadResult<Object>;
}

/// Loader over serialized objects held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryLoader {
    objects: HashMap<String, HashMap<String, Object>>,
    id_field: String,
}

impl InMemoryLoader {
    /// Create an empty loader reading identifiers from `id`.
    pub fn new() -> Self {
        Self::with_id_field("id")
    }

    /// Create an empty loader reading identifiers from `id_field`.
    pub fn with_id_field(id_field: impl Into<String>) -> Self {
        Self {
            objects: HashMap::new(),
            id_field: id_field.into(),
        }
    }

    /// Store an object. Objects without an identifier are ignored.
    pub fn insert(&mut self, model: impl Into<String>, object: Object) {
        let Some(id) = object.get(&self.id_field).and_then(id_string) else {
            return;
        };
        self.objects.entry(model.into()).or_default().insert(id, object);
    }

    /// Store an object, builder style.
    pub fn with(mut self, model: impl Into<String>, object: Value) -> Self {
        if let Value::Object(object) = object {
            self.insert(model, object);
        }
        self
    }

    /// Build a loader from fixtures shaped `{"Model": [object, ...]}`.
    pub fn from_fixtures(fixtures: &Value, id_field: &str) -> LoadResult<Self> {
        let Value::Object(models) = fixtures else {
            return Err(LoadError::backend("fixtures must be an object keyed by model"));
        };

        let mut loader = Self::with_id_field(id_field);
        for (model, objects) in models {
            let Value::Array(objects) = objects else {
                return Err(LoadError::backend(format!(
                    "fixtures for {model} must be an array"
                )));
            };
            for object in objects {
                if let Value::Object(object) = object {
                    loader.insert(model, object.clone());
                }
            }
        }
        Ok(loader)
    }

    /// Number of stored objects.
    pub fn len(&self) -> usize {
        self.objects.values().map(HashMap::len).sum()
    }

    /// Check if no objects are stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ResourceLoader for InMemoryLoader {
    async fn load(&self, model: &str, id: &str) -> LoadResult<Object> {
        self.objects
            .get(model)
            .and_then(|objects| objects.get(id))
            .cloned()
            .ok_or_else(|| LoadError::not_found(model, id))
    }
}

/// Stringify an identifier value. `null`, arrays and objects have no
/// identifier form.
pub fn id_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}
