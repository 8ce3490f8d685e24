//! Render configuration and resource type resolution.
//!
//! ```rust
//! use sideload_render::{BoxError, RenderConfig};
//!
//! let config = RenderConfig::new().pluralize_types(true);
//! assert_eq!(config.resource_type("Company").unwrap(), "companies");
//!
//! let custom = RenderConfig::new().type_extractor(
//!     "shout",
//!     |model: &str| -> Result<String, BoxError> { Ok(model.to_uppercase()) },
//! );
//! assert_eq!(custom.resource_type("Person").unwrap(), "PERSON");
//! ```

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use sideload_schema::{FieldCase, SideloadConfig};
use sideload_schema::naming;

use crate::error::{BoxError, RenderError, RenderResult};

/// Maps a domain model name to a resource type.
pub trait TypeExtractor: Send + Sync {
    /// Resource type for `model`.
    fn extract(&self, model: &str) -> Result<String, BoxError>;
}

impl<F> TypeExtractor for F
where
    F: Fn(&str) -> Result<String, BoxError> + Send + Sync,
{
    fn extract(&self, model: &str) -> Result<String, BoxError> {
        self(model)
    }
}

/// Named type extractors that configuration files can refer to.
#[derive(Clone, Default)]
pub struct ExtractorRegistry {
    extractors: IndexMap<String, Arc<dyn TypeExtractor>>,
}

impl ExtractorRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the built-in extractors:
    ///
    /// - `model`: the model name verbatim
    /// - `lowercase`: the model name lowercased
    pub fn with_builtins() -> Self {
        Self::new()
            .with("model", |model: &str| -> Result<String, BoxError> {
                Ok(model.to_string())
            })
            .with("lowercase", |model: &str| -> Result<String, BoxError> {
                Ok(model.to_lowercase())
            })
    }

    /// Register an extractor under `name`, replacing any previous one.
    pub fn register(&mut self, name: impl Into<String>, extractor: impl TypeExtractor + 'static) {
        self.extractors.insert(name.into(), Arc::new(extractor));
    }

    /// Register an extractor, builder style.
    pub fn with(mut self, name: impl Into<String>, extractor: impl TypeExtractor + 'static) -> Self {
        self.register(name, extractor);
        self
    }

    /// Get an extractor by name.
    pub fn get(&self, name: &str) -> Option<Arc<dyn TypeExtractor>> {
        self.extractors.get(name).cloned()
    }

    /// Registered names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.extractors.keys().map(String::as_str)
    }
}

impl fmt::Debug for ExtractorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtractorRegistry")
            .field("extractors", &self.extractors.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// How resource types are derived from model names.
#[derive(Clone)]
pub enum TypeResolver {
    /// Kebab-cased model name, optionally pluralized.
    Default { pluralize: bool },
    /// A custom extractor; the only authority when configured.
    Custom {
        name: String,
        extractor: Arc<dyn TypeExtractor>,
    },
}

impl TypeResolver {
    /// Resource type for `model`.
    pub fn resolve(&self, model: &str) -> RenderResult<String> {
        match self {
            Self::Default { pluralize } => Ok(naming::resource_type(model, *pluralize)),
            Self::Custom { name, extractor } => {
                extractor
                    .extract(model)
                    .map_err(|source| RenderError::TypeExtractor {
                        extractor: name.clone(),
                        model: model.to_string(),
                        source,
                    })
            }
        }
    }

    /// Check if a custom extractor is configured.
    pub fn is_custom(&self) -> bool {
        matches!(self, Self::Custom { .. })
    }
}

impl Default for TypeResolver {
    fn default() -> Self {
        Self::Default { pluralize: false }
    }
}

impl fmt::Debug for TypeResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default { pluralize } => f
                .debug_struct("Default")
                .field("pluralize", pluralize)
                .finish(),
            Self::Custom { name, .. } => f.debug_struct("Custom").field("name", name).finish(),
        }
    }
}

/// Settings shared by every build of an assembler.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Resource type resolution.
    pub type_resolver: TypeResolver,
    /// Identifier field of serialized objects.
    pub id_field: String,
    /// Field carrying an object's concrete model name.
    pub type_key: String,
    /// Naming convention of serialized field names, used to map wire names
    /// back to object fields.
    pub field_case: FieldCase,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            type_resolver: TypeResolver::default(),
            id_field: "id".to_string(),
            type_key: "_type".to_string(),
            field_case: FieldCase::default(),
        }
    }
}

impl RenderConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pluralize default resource types. Replaces any custom extractor.
    pub fn pluralize_types(mut self, pluralize: bool) -> Self {
        self.type_resolver = TypeResolver::Default { pluralize };
        self
    }

    /// Use a custom type extractor.
    pub fn type_extractor(
        mut self,
        name: impl Into<String>,
        extractor: impl TypeExtractor + 'static,
    ) -> Self {
        self.type_resolver = TypeResolver::Custom {
            name: name.into(),
            extractor: Arc::new(extractor),
        };
        self
    }

    /// Set the identifier field.
    pub fn id_field(mut self, field: impl Into<String>) -> Self {
        self.id_field = field.into();
        self
    }

    /// Set the type marker field.
    pub fn type_key(mut self, key: impl Into<String>) -> Self {
        self.type_key = key.into();
        self
    }

    /// Set the naming convention of serialized field names.
    pub fn field_case(mut self, case: FieldCase) -> Self {
        self.field_case = case;
        self
    }

    /// Serialized field name for a dasherized wire name.
    pub fn internal_name(&self, wire: &str) -> String {
        naming::internal_name(wire, self.field_case)
    }

    /// Resource type for `model`.
    pub fn resource_type(&self, model: &str) -> RenderResult<String> {
        self.type_resolver.resolve(model)
    }

    /// Build from a parsed configuration file, resolving a named extractor in
    /// `registry`.
    pub fn from_config(config: &SideloadConfig, registry: &ExtractorRegistry) -> RenderResult<Self> {
        let type_resolver = match &config.naming.type_extractor {
            Some(name) => TypeResolver::Custom {
                extractor: registry
                    .get(name)
                    .ok_or_else(|| RenderError::UnresolvedExtractor { name: name.clone() })?,
                name: name.clone(),
            },
            None => TypeResolver::Default {
                pluralize: config.naming.pluralize_types,
            },
        };

        Ok(Self {
            type_resolver,
            id_field: config.render.id_field.clone(),
            type_key: config.render.type_key.clone(),
            field_case: config.naming.field_case,
        })
    }
}
