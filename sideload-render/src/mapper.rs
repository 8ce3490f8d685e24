//! Serialized object to resource identity and attributes.

use indexmap::IndexMap;
use serde_json::Value;
use sideload_schema::ResourceDescriptor;
use sideload_schema::naming::wire_name;

use crate::config::RenderConfig;
use crate::document::ResourceIdentifier;
use crate::error::{RenderError, RenderResult};
use crate::loader::{Object, id_string};

/// Identity and attributes of one mapped object.
#[derive(Debug, Clone, PartialEq)]
pub struct MappedResource {
    /// Stringified identifier.
    pub id: String,
    /// Resource type.
    pub resource_type: String,
    /// Attributes keyed by wire name, in declaration order.
    pub attributes: IndexMap<String, Value>,
}

impl MappedResource {
    /// Identity of the mapped object.
    pub fn identifier(&self) -> ResourceIdentifier {
        ResourceIdentifier::new(&self.id, &self.resource_type)
    }
}

/// Maps serialized objects to resource identity and attributes.
#[derive(Debug, Clone, Copy)]
pub struct ResourceMapper<'a> {
    config: &'a RenderConfig,
}

impl<'a> ResourceMapper<'a> {
    /// Create a mapper over `config`.
    pub fn new(config: &'a RenderConfig) -> Self {
        Self { config }
    }

    /// Concrete model named by the object's type marker.
    pub fn model_of<'o>(&self, object: &'o Object) -> Option<&'o str> {
        object.get(&self.config.type_key).and_then(Value::as_str)
    }

    /// Stringified identifier of an object of `model`.
    pub fn id_of(&self, object: &Object, model: &str) -> RenderResult<String> {
        object
            .get(&self.config.id_field)
            .and_then(id_string)
            .ok_or_else(|| RenderError::missing_id(model, &self.config.id_field))
    }

    /// Resource type of an object rendered with `descriptor`.
    pub fn resource_type_of(
        &self,
        object: &Object,
        descriptor: &ResourceDescriptor,
    ) -> RenderResult<String> {
        let model = self.model_of(object).unwrap_or(descriptor.model_name());
        self.config.resource_type(model)
    }

    /// Map an object to `(id, type, attributes)`.
    ///
    /// Missing attribute values render as `null`. The identifier field and the
    /// type marker never appear among the attributes.
    pub fn attributes_for(
        &self,
        object: &Object,
        descriptor: &ResourceDescriptor,
    ) -> RenderResult<MappedResource> {
        let model = self.model_of(object).unwrap_or(descriptor.model_name());
        let id = self.id_of(object, model)?;
        let resource_type = self.config.resource_type(model)?;

        let attributes = descriptor
            .attribute_names()
            .filter(|name| *name != self.config.id_field && *name != self.config.type_key)
            .map(|name| {
                let value = object.get(name).cloned().unwrap_or(Value::Null);
                (wire_name(name), value)
            })
            .collect();

        Ok(MappedResource {
            id,
            resource_type,
            attributes,
        })
    }

    /// An object is fully loaded when it carries any field beyond its
    /// identifier and type marker.
    pub fn is_fully_loaded(&self, object: &Object) -> bool {
        object
            .keys()
            .any(|key| *key != self.config.id_field && *key != self.config.type_key)
    }
}
