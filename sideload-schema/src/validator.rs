//! Descriptor registration and validation.
//!
//! Descriptors reference each other by name (sideload targets, polymorphic
//! variants), so references may point forward or form cycles. A
//! [`DescriptorSet`] collects declarations; [`Validator`] resolves every
//! reference once and produces an immutable [`Schema`]. Nothing is resolved
//! lazily while rendering.

use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::descriptor::{FieldKind, ResourceDescriptor};
use crate::error::{SchemaError, SchemaResult};

/// Unvalidated collection of descriptors.
#[derive(Debug, Clone, Default)]
pub struct DescriptorSet {
    descriptors: Vec<ResourceDescriptor>,
}

impl DescriptorSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a descriptor.
    pub fn register(&mut self, descriptor: ResourceDescriptor) {
        self.descriptors.push(descriptor);
    }

    /// Add a descriptor, builder style.
    pub fn with(mut self, descriptor: ResourceDescriptor) -> Self {
        self.register(descriptor);
        self
    }

    /// Number of declared descriptors.
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// Check if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Validate the set into a [`Schema`].
    pub fn validate(self) -> SchemaResult<Schema> {
        Validator::new().validate(self)
    }
}

impl FromIterator<ResourceDescriptor> for DescriptorSet {
    fn from_iter<T: IntoIterator<Item = ResourceDescriptor>>(iter: T) -> Self {
        Self {
            descriptors: iter.into_iter().collect(),
        }
    }
}

/// Validated, immutable descriptor registry.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    descriptors: IndexMap<String, ResourceDescriptor>,
}

impl Schema {
    /// Get a descriptor by name.
    pub fn get(&self, name: &str) -> Option<&ResourceDescriptor> {
        self.descriptors.get(name)
    }

    /// Get a descriptor by name, failing if it is not registered.
    pub fn descriptor(&self, name: &str) -> SchemaResult<&ResourceDescriptor> {
        self.get(name).ok_or_else(|| SchemaError::NotRegistered {
            name: name.to_string(),
        })
    }

    /// Descriptor that renders an object of concrete `model` in place of
    /// `descriptor`.
    pub fn resolve_concrete<'a>(
        &'a self,
        descriptor: &'a ResourceDescriptor,
        model: Option<&str>,
    ) -> SchemaResult<&'a ResourceDescriptor> {
        match descriptor.resolve_concrete(model) {
            name if name == descriptor.name() => Ok(descriptor),
            name => self.descriptor(name),
        }
    }

    /// All descriptors in registration order.
    pub fn descriptors(&self) -> impl Iterator<Item = &ResourceDescriptor> {
        self.descriptors.values()
    }

    /// Number of descriptors.
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// Check if the schema is empty.
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}

/// Descriptor validator for reference resolution and consistency checks.
#[derive(Debug, Default)]
pub struct Validator {
    errors: Vec<SchemaError>,
}

impl Validator {
    /// Create a new validator.
    pub fn new() -> Self {
        Self { errors: vec![] }
    }

    /// Validate a descriptor set and return the schema or every error found.
    pub fn validate(&mut self, set: DescriptorSet) -> SchemaResult<Schema> {
        self.errors.clear();

        let mut descriptors = IndexMap::new();
        for descriptor in set.descriptors {
            if descriptors.contains_key(descriptor.name()) {
                self.errors
                    .push(SchemaError::duplicate("descriptor", descriptor.name()));
                continue;
            }
            descriptors.insert(descriptor.name().to_string(), descriptor);
        }

        for descriptor in descriptors.values() {
            self.validate_descriptor(descriptor, &descriptors);
        }

        if self.errors.is_empty() {
            debug!(descriptors = descriptors.len(), "Descriptor schema validated");
            Ok(Schema { descriptors })
        } else {
            Err(SchemaError::ValidationFailed {
                count: self.errors.len(),
                errors: std::mem::take(&mut self.errors),
            })
        }
    }

    fn validate_descriptor(
        &mut self,
        descriptor: &ResourceDescriptor,
        all: &IndexMap<String, ResourceDescriptor>,
    ) {
        let name = descriptor.name();

        if descriptor.model_name().trim().is_empty() {
            self.errors
                .push(SchemaError::invalid_descriptor(name, "model name is empty"));
        }

        for spec in descriptor.relationship_specs() {
            if descriptor.field_kind(&spec.name) != Some(FieldKind::Relationship) {
                self.errors.push(SchemaError::invalid_field(
                    name,
                    &spec.name,
                    "sideload declared for a field that is not a declared relationship",
                ));
                continue;
            }

            if let Some(target) = spec.include.as_deref() {
                if !all.contains_key(target) {
                    self.errors
                        .push(SchemaError::unknown_descriptor(name, &spec.name, target));
                }
            }

            let typed = (spec.model.is_some() && !descriptor.is_read_only(&spec.name))
                || descriptor.mapped_model(&spec.name).is_some();
            if !typed {
                // Still renderable when every related object carries its own type.
                warn!(
                    descriptor = name,
                    field = %spec.name,
                    "Relationship has no static type; add a model_map entry unless related objects are always typed"
                );
            }
        }

        for field in descriptor.read_only_fields() {
            if descriptor.field_kind(field).is_none() {
                self.errors.push(SchemaError::invalid_field(
                    name,
                    field,
                    "read-only field is not declared",
                ));
            }
        }

        for (field, _) in descriptor.model_mappings() {
            if descriptor.field_kind(field) != Some(FieldKind::Relationship) {
                self.errors.push(SchemaError::invalid_field(
                    name,
                    field,
                    "model_map entry for a field that is not a declared relationship",
                ));
            }
        }

        for (model, target) in descriptor.variants() {
            if !all.contains_key(target) {
                self.errors
                    .push(SchemaError::unknown_descriptor(name, model, target));
            }
        }
    }
}

/// Validate a descriptor set.
pub fn validate_descriptors(set: DescriptorSet) -> SchemaResult<Schema> {
    Validator::new().validate(set)
}
