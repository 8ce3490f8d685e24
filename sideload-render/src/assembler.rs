//! Compound document assembly.
//!
//! The [`Assembler`] walks serialized objects along the requested include
//! paths and collects embedded resources into one deduplicated `included`
//! list. Every primary resource is registered before anything is sideloaded,
//! so `included` never repeats an entry of `data`.
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use serde_json::json;
//! use sideload_render::{Assembler, IncludePaths, RenderConfig};
//! use sideload_schema::{DescriptorSet, ResourceDescriptor};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let schema = DescriptorSet::new()
//!     .with(
//!         ResourceDescriptor::new("Article")
//!             .attribute("title")
//!             .to_one("author", "Person")
//!             .include("author", "Person"),
//!     )
//!     .with(ResourceDescriptor::new("Person").attributes(["first_name", "last_name"]))
//!     .validate()?;
//!
//! let assembler = Assembler::new(Arc::new(schema), RenderConfig::new());
//! let article = json!({
//!     "id": 1,
//!     "title": "Hello",
//!     "author": {"id": 5, "first_name": "Molly", "last_name": "Davis"}
//! });
//!
//! let document = assembler
//!     .build(&article, "Article", &IncludePaths::parse("author"))
//!     .await?;
//! assert_eq!(document.included().len(), 1);
//! # Ok(())
//! # }
//! ```

use std::collections::HashSet;
use std::sync::Arc;

use futures::FutureExt;
use futures::future::BoxFuture;
use indexmap::IndexMap;
use serde_json::Value;
use sideload_schema::{ResourceDescriptor, Schema};
use tracing::{debug, trace, warn};

use crate::config::RenderConfig;
use crate::document::{CompoundDocument, PrimaryData, Relationship, ResourceIdentifier, ResourceObject};
use crate::error::{RenderError, RenderResult};
use crate::include::IncludePaths;
use crate::loader::{LoadError, Object, ResourceLoader};
use crate::mapper::ResourceMapper;
use crate::resolver::{RelatedTarget, RelationshipEntry, RelationshipResolver};

/// Relationships of a rendered object, keyed by internal field name.
type Relations = IndexMap<String, RelationshipEntry>;

/// Mutable state of one build.
#[derive(Debug, Default)]
struct BuildState {
    included: Vec<ResourceObject>,
    seen: HashSet<ResourceIdentifier>,
}

impl BuildState {
    /// Append `resource` unless its identity was already rendered.
    fn push(&mut self, resource: ResourceObject) -> bool {
        if self.seen.insert(resource.identifier()) {
            self.included.push(resource);
            true
        } else {
            false
        }
    }
}

/// Builds compound documents from serialized objects.
///
/// An assembler is immutable and may serve concurrent builds; each build
/// owns its own accumulator.
#[derive(Clone)]
pub struct Assembler {
    schema: Arc<Schema>,
    config: Arc<RenderConfig>,
    loader: Option<Arc<dyn ResourceLoader>>,
}

impl std::fmt::Debug for Assembler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Assembler")
            .field("descriptors", &self.schema.len())
            .field("config", &self.config)
            .field("loader", &self.loader.is_some())
            .finish()
    }
}

impl Assembler {
    /// Create an assembler without a resource loader. Identifier-only
    /// relationships are then never embedded.
    pub fn new(schema: Arc<Schema>, config: RenderConfig) -> Self {
        Self {
            schema,
            config: Arc::new(config),
            loader: None,
        }
    }

    /// Fetch identifier-only sideload targets through `loader`.
    pub fn with_loader(mut self, loader: Arc<dyn ResourceLoader>) -> Self {
        self.loader = Some(loader);
        self
    }

    /// The descriptor schema.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// The render configuration.
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Build a compound document.
    ///
    /// `data` is a serialized object, an array of them, or `null`. It is
    /// rendered with the descriptor named `descriptor`, or with a polymorphic
    /// variant of it chosen by each object's type marker.
    pub async fn build(
        &self,
        data: &Value,
        descriptor: &str,
        includes: &IncludePaths,
    ) -> RenderResult<CompoundDocument> {
        let root = self.schema.descriptor(descriptor)?;

        let objects: Vec<&Object> = match data {
            Value::Null => Vec::new(),
            Value::Object(object) => vec![object],
            Value::Array(items) => items
                .iter()
                .map(|item| {
                    item.as_object().ok_or_else(|| {
                        RenderError::invalid_data("primary data arrays must hold objects")
                    })
                })
                .collect::<RenderResult<_>>()?,
            _ => {
                return Err(RenderError::invalid_data(
                    "primary data must be an object, an array of objects or null",
                ));
            }
        };

        debug!(
            descriptor = %descriptor,
            primary = objects.len(),
            includes = includes.len(),
            "Building compound document"
        );

        let mut state = BuildState::default();
        let mut primary = Vec::with_capacity(objects.len());
        let mut pending = Vec::with_capacity(objects.len());

        for object in objects {
            let concrete = self.concrete(root, object)?;
            let (resource, relations) = self.render(object, concrete)?;
            state.seen.insert(resource.identifier());
            primary.push(resource);
            pending.push((concrete, relations));
        }

        if !includes.is_empty() {
            for (concrete, relations) in &pending {
                for entry in relations.values() {
                    self.sideload(&mut state, concrete, entry, entry.wire_name.clone(), includes)
                        .await?;
                }
            }
        }

        let data = match data {
            Value::Array(_) => PrimaryData::Collection(primary),
            _ => match primary.pop() {
                Some(resource) => PrimaryData::Resource(Box::new(resource)),
                None => PrimaryData::Null,
            },
        };

        debug!(included = state.included.len(), "Compound document built");

        Ok(CompoundDocument {
            data,
            included: (!state.included.is_empty()).then_some(state.included),
        })
    }

    /// Embed the targets of `entry`, reached through `path`, then descend
    /// into their relationships while a requested path continues below.
    fn sideload<'a>(
        &'a self,
        state: &'a mut BuildState,
        parent: &'a ResourceDescriptor,
        entry: &'a RelationshipEntry,
        path: String,
        includes: &'a IncludePaths,
    ) -> BoxFuture<'a, RenderResult<()>> {
        async move {
            if !includes.touches(&path) {
                return Ok(());
            }

            let Some(target_name) = parent.sideload_target(&entry.name) else {
                crate::sideload_debug!(
                    descriptor = parent.name(),
                    path = %path,
                    "Relationship requested but not sideloadable"
                );
                return Ok(());
            };
            let target_descriptor = self.schema.descriptor(target_name)?;

            let mut embedded = Vec::with_capacity(entry.targets.len());
            for target in &entry.targets {
                if state.seen.contains(&target.identifier) {
                    trace!(path = %path, id = %target.identifier.id, resource_type = %target.identifier.resource_type, "Skipped duplicate resource");
                    continue;
                }

                let Some(object) = self.target_object(target).await? else {
                    continue;
                };

                let concrete = self.concrete(target_descriptor, &object)?;
                let (resource, relations) = self.render(&object, concrete)?;
                let identifier = resource.identifier();

                if state.push(resource) {
                    trace!(path = %path, id = %identifier.id, resource_type = %identifier.resource_type, "Embedded resource");
                    embedded.push((concrete, relations));
                } else {
                    trace!(path = %path, id = %identifier.id, resource_type = %identifier.resource_type, "Skipped duplicate resource");
                }
            }

            if includes.has_descendant_included(&path) {
                for (concrete, relations) in &embedded {
                    for nested in relations.values() {
                        let nested_path = format!("{}.{}", path, nested.wire_name);
                        self.sideload(state, concrete, nested, nested_path, includes)
                            .await?;
                    }
                }
            }

            Ok(())
        }
        .boxed()
    }

    /// The full object of a sideload target, fetching it when only its
    /// identifier is known. `None` means the target cannot be embedded.
    ///
    /// Objects without a type marker get the relation's model as their
    /// marker, so the embedded resource keeps the identity of its linkage.
    async fn target_object(&self, target: &RelatedTarget) -> RenderResult<Option<Object>> {
        let object = match &target.object {
            Some(object) => object.clone(),
            None => match self.load(target).await? {
                Some(object) => object,
                None => return Ok(None),
            },
        };
        Ok(Some(self.mark(object, &target.model)))
    }

    fn mark(&self, mut object: Object, model: &str) -> Object {
        object
            .entry(self.config.type_key.clone())
            .or_insert_with(|| Value::String(model.to_string()));
        object
    }

    async fn load(&self, target: &RelatedTarget) -> RenderResult<Option<Object>> {
        let Some(loader) = &self.loader else {
            return Ok(None);
        };

        let id = &target.identifier.id;
        match loader.load(&target.model, id).await {
            Ok(object) => Ok(Some(object)),
            Err(LoadError::NotFound { .. }) => {
                warn!(model = %target.model, id = %id, "Sideload target not found");
                Ok(None)
            }
            Err(source) => Err(RenderError::Loader {
                model: target.model.clone(),
                id: id.clone(),
                source,
            }),
        }
    }

    /// Descriptor that renders `object` in place of `descriptor`.
    fn concrete<'s>(
        &'s self,
        descriptor: &'s ResourceDescriptor,
        object: &Object,
    ) -> RenderResult<&'s ResourceDescriptor> {
        let model = ResourceMapper::new(&self.config).model_of(object);
        Ok(self.schema.resolve_concrete(descriptor, model)?)
    }

    /// Render one object with its relationship linkage.
    fn render(
        &self,
        object: &Object,
        descriptor: &ResourceDescriptor,
    ) -> RenderResult<(ResourceObject, Relations)> {
        let mapped = ResourceMapper::new(&self.config).attributes_for(object, descriptor)?;
        let relations = RelationshipResolver::new(&self.config).relationships_for(object, descriptor)?;

        let relationships = (descriptor.relationships().next().is_some()).then(|| {
            relations
                .values()
                .map(|entry| {
                    (
                        entry.wire_name.clone(),
                        Relationship {
                            data: entry.linkage(),
                        },
                    )
                })
                .collect()
        });

        let resource = ResourceObject {
            id: mapped.id,
            resource_type: mapped.resource_type,
            attributes: mapped.attributes,
            relationships,
        };
        Ok((resource, relations))
    }
}
