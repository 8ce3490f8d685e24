//! Configuration file parsing for `sideload.toml`.
//!
//! ```toml
//! [naming]
//! field_case = "snake"
//! pluralize_types = false
//!
//! [render]
//! id_field = "id"
//! type_key = "_type"
//!
//! [[resources]]
//! name = "Article"
//! attributes = ["title"]
//!
//! [resources.relationships.author]
//! model = "Person"
//! include = "Person"
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::descriptor::{Cardinality, RelationshipSpec, ResourceDescriptor};
use crate::error::{SchemaError, SchemaResult};
use crate::naming::FieldCase;
use crate::validator::{DescriptorSet, Schema};

/// Default config file name.
pub const CONFIG_FILE_NAME: &str = "sideload.toml";

/// Main configuration structure for `sideload.toml`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SideloadConfig {
    /// Naming rules for fields and resource types.
    #[serde(default)]
    pub naming: NamingConfig,

    /// Serialized object conventions.
    #[serde(default)]
    pub render: RenderSettings,

    /// Debug/logging settings.
    #[serde(default)]
    pub debug: DebugConfig,

    /// Resource descriptors.
    #[serde(default)]
    pub resources: Vec<ResourceConfig>,
}

impl SideloadConfig {
    /// Load configuration from a file path.
    pub fn from_file(path: impl AsRef<Path>) -> SchemaResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| SchemaError::IoError {
            path: path.display().to_string(),
            source: e,
        })?;

        content.parse()
    }

    /// Build and validate the descriptor schema declared in `resources`.
    pub fn schema(&self) -> SchemaResult<Schema> {
        self.resources
            .iter()
            .map(ResourceConfig::to_descriptor)
            .collect::<DescriptorSet>()
            .validate()
    }
}

impl std::str::FromStr for SideloadConfig {
    type Err = SchemaError;

    /// Parse configuration from a TOML string.
    fn from_str(content: &str) -> SchemaResult<Self> {
        toml::from_str(content).map_err(|e| SchemaError::TomlError { source: e })
    }
}

/// Naming configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct NamingConfig {
    /// Internal naming convention of serialized field names. Rendering
    /// always emits dasherized names; this is the convention for mapping
    /// them back (see `naming::internal_name`).
    #[serde(default)]
    pub field_case: FieldCase,

    /// Pluralize default resource types (`person` becomes `persons`).
    #[serde(default)]
    pub pluralize_types: bool,

    /// Name of a registered custom type extractor. When set it is the only
    /// source of resource types.
    pub type_extractor: Option<String>,
}

/// Serialized object conventions.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RenderSettings {
    /// Identifier field of serialized objects.
    #[serde(default = "default_id_field")]
    pub id_field: String,

    /// Field carrying an object's concrete model name.
    #[serde(default = "default_type_key")]
    pub type_key: String,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            id_field: default_id_field(),
            type_key: default_type_key(),
        }
    }
}

fn default_id_field() -> String {
    "id".to_string()
}

fn default_type_key() -> String {
    "_type".to_string()
}

/// Debug and logging configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DebugConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: Option<String>,

    /// Log format (json, pretty, compact).
    pub log_format: Option<String>,
}

/// One `[[resources]]` entry.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ResourceConfig {
    /// Registry name.
    pub name: String,

    /// Domain model name (defaults to `name`).
    pub model: Option<String>,

    /// Attribute fields, in output order.
    #[serde(default)]
    pub attributes: Vec<String>,

    /// Relationship fields, in output order.
    #[serde(default)]
    pub relationships: IndexMap<String, RelationshipConfig>,

    /// Read-only fields.
    #[serde(default)]
    pub read_only: Vec<String>,

    /// Related model of read-only relationships.
    #[serde(default)]
    pub model_map: IndexMap<String, String>,

    /// Polymorphic variants: concrete model to descriptor name.
    #[serde(default)]
    pub variants: IndexMap<String, String>,
}

impl ResourceConfig {
    /// Convert into a descriptor. References are checked by validation.
    pub fn to_descriptor(&self) -> ResourceDescriptor {
        let mut descriptor = ResourceDescriptor::new(&self.name).attributes(&self.attributes);
        if let Some(model) = &self.model {
            descriptor = descriptor.model(model);
        }

        for (field, rel) in &self.relationships {
            let cardinality = if rel.many {
                Cardinality::Many
            } else {
                Cardinality::One
            };
            let mut spec = match &rel.model {
                Some(model) => RelationshipSpec {
                    model: Some(model.clone()),
                    ..RelationshipSpec::untyped(field, cardinality)
                },
                None => RelationshipSpec::untyped(field, cardinality),
            };
            if let Some(include) = &rel.include {
                spec = spec.sideload(include);
            }
            descriptor = descriptor.relationship(spec);
        }

        for field in &self.read_only {
            descriptor = descriptor.read_only(field);
        }
        for (field, model) in &self.model_map {
            descriptor = descriptor.model_map(field, model);
        }
        for (model, target) in &self.variants {
            descriptor = descriptor.variant(model, target);
        }

        descriptor
    }
}

/// One relationship entry of a resource.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RelationshipConfig {
    /// Related domain model.
    pub model: Option<String>,

    /// To-many relation.
    #[serde(default)]
    pub many: bool,

    /// Descriptor used to sideload this relation.
    pub include: Option<String>,
}
