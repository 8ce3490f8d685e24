//! Relationship resolution.
//!
//! For every declared relationship of a descriptor the resolver determines
//! cardinality, the related identifiers and types, and which related objects
//! are already fully loaded.

use indexmap::IndexMap;
use serde_json::Value;
use sideload_schema::naming::wire_name;
use sideload_schema::{Cardinality, RelationshipSpec, ResourceDescriptor};

use crate::config::RenderConfig;
use crate::document::{Linkage, ResourceIdentifier};
use crate::error::{RenderError, RenderResult};
use crate::loader::{Object, id_string};
use crate::mapper::ResourceMapper;

/// One related object referenced by a relationship.
#[derive(Debug, Clone, PartialEq)]
pub struct RelatedTarget {
    /// Linkage identity.
    pub identifier: ResourceIdentifier,
    /// Concrete domain model of the target.
    pub model: String,
    /// The serialized object, when it is fully loaded.
    pub object: Option<Object>,
}

impl RelatedTarget {
    /// Check if the full object is at hand.
    pub fn is_loaded(&self) -> bool {
        self.object.is_some()
    }
}

/// Resolved relationship of one object.
#[derive(Debug, Clone, PartialEq)]
pub struct RelationshipEntry {
    /// Internal field name.
    pub name: String,
    /// Wire field name.
    pub wire_name: String,
    /// Declared cardinality.
    pub cardinality: Cardinality,
    /// Static resource type of the relation, if one is declared.
    pub related_type: Option<String>,
    /// The field value as serialized.
    pub raw_value: Value,
    /// Related objects in order; null entries are skipped.
    pub targets: Vec<RelatedTarget>,
}

impl RelationshipEntry {
    /// Linkage rendered under `relationships`.
    pub fn linkage(&self) -> Linkage {
        match self.cardinality {
            Cardinality::One => {
                Linkage::One(self.targets.first().map(|target| target.identifier.clone()))
            }
            Cardinality::Many => Linkage::Many(
                self.targets
                    .iter()
                    .map(|target| target.identifier.clone())
                    .collect(),
            ),
        }
    }

    /// Check if the relation references nothing.
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

/// Resolves declared relationships of serialized objects.
#[derive(Debug, Clone, Copy)]
pub struct RelationshipResolver<'a> {
    config: &'a RenderConfig,
    mapper: ResourceMapper<'a>,
}

impl<'a> RelationshipResolver<'a> {
    /// Create a resolver over `config`.
    pub fn new(config: &'a RenderConfig) -> Self {
        Self {
            config,
            mapper: ResourceMapper::new(config),
        }
    }

    /// Resolve every declared relationship of `object`, keyed by internal
    /// field name in declaration order.
    pub fn relationships_for(
        &self,
        object: &Object,
        descriptor: &ResourceDescriptor,
    ) -> RenderResult<IndexMap<String, RelationshipEntry>> {
        descriptor
            .relationships()
            .map(|spec| {
                let entry = self.resolve(object, descriptor, spec)?;
                Ok((spec.name.clone(), entry))
            })
            .collect()
    }

    fn resolve(
        &self,
        object: &Object,
        descriptor: &ResourceDescriptor,
        spec: &RelationshipSpec,
    ) -> RenderResult<RelationshipEntry> {
        let static_model = static_model(descriptor, spec);
        let raw_value = object.get(&spec.name).cloned().unwrap_or(Value::Null);

        let values: Vec<&Value> = match (spec.cardinality, &raw_value) {
            (_, Value::Null) => Vec::new(),
            (Cardinality::Many, Value::Array(items)) => {
                items.iter().filter(|item| !item.is_null()).collect()
            }
            (Cardinality::One, Value::Array(_)) => {
                return Err(RenderError::invalid_data(format!(
                    "to-one relationship `{}.{}` holds an array",
                    descriptor.name(),
                    spec.name
                )));
            }
            (Cardinality::Many, _) => {
                return Err(RenderError::invalid_data(format!(
                    "to-many relationship `{}.{}` does not hold an array",
                    descriptor.name(),
                    spec.name
                )));
            }
            (Cardinality::One, value) => vec![value],
        };

        // Nothing to infer a type from, so the field itself must declare one.
        if values.is_empty() && static_model.is_none() {
            return Err(RenderError::unknown_related_type(descriptor.name(), &spec.name));
        }

        let targets = values
            .into_iter()
            .map(|value| self.target(value, static_model, descriptor, spec))
            .collect::<RenderResult<Vec<_>>>()?;

        let related_type = static_model
            .map(|model| self.config.resource_type(model))
            .transpose()?;

        Ok(RelationshipEntry {
            name: spec.name.clone(),
            wire_name: wire_name(&spec.name),
            cardinality: spec.cardinality,
            related_type,
            raw_value,
            targets,
        })
    }

    fn target(
        &self,
        value: &Value,
        static_model: Option<&str>,
        descriptor: &ResourceDescriptor,
        spec: &RelationshipSpec,
    ) -> RenderResult<RelatedTarget> {
        let unknown = || RenderError::unknown_related_type(descriptor.name(), &spec.name);

        let (model, id, object) = match value {
            Value::Object(nested) => {
                let model = self
                    .mapper
                    .model_of(nested)
                    .or(static_model)
                    .ok_or_else(unknown)?;
                let id = self.mapper.id_of(nested, model)?;
                let object = self.mapper.is_fully_loaded(nested).then(|| nested.clone());
                (model, id, object)
            }
            Value::Array(_) => {
                return Err(RenderError::invalid_data(format!(
                    "relationship `{}.{}` holds a nested array",
                    descriptor.name(),
                    spec.name
                )));
            }
            scalar => {
                let model = static_model.ok_or_else(unknown)?;
                let id = id_string(scalar)
                    .ok_or_else(|| RenderError::missing_id(model, &self.config.id_field))?;
                (model, id, None)
            }
        };

        Ok(RelatedTarget {
            identifier: ResourceIdentifier::new(id, self.config.resource_type(model)?),
            model: model.to_string(),
            object,
        })
    }
}

/// Related model declared for a relationship: the spec's model unless the
/// field is read-only, then the descriptor's model map.
fn static_model<'d>(descriptor: &'d ResourceDescriptor, spec: &'d RelationshipSpec) -> Option<&'d str> {
    spec.model
        .as_deref()
        .filter(|_| !descriptor.is_read_only(&spec.name))
        .or_else(|| descriptor.mapped_model(&spec.name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn object(value: Value) -> Object {
        match value {
            Value::Object(map) => map,
            _ => panic!("Expected an object"),
        }
    }

    fn article() -> ResourceDescriptor {
        ResourceDescriptor::new("Article")
            .attribute("title")
            .to_one("author", "Person")
            .to_many("comments", "Comment")
    }

    #[test]
    fn test_identifier_relationships() {
        let config = RenderConfig::new();
        let resolver = RelationshipResolver::new(&config);
        let data = object(json!({"id": 1, "title": "Hello", "author": 5, "comments": [1, null, 2]}));

        let entries = resolver.relationships_for(&data, &article()).unwrap();
        assert_eq!(entries.keys().collect::<Vec<_>>(), vec!["author", "comments"]);

        let author = &entries["author"];
        assert_eq!(author.related_type.as_deref(), Some("person"));
        assert_eq!(
            author.linkage(),
            Linkage::One(Some(ResourceIdentifier::new("5", "person")))
        );
        assert!(!author.targets[0].is_loaded());

        let comments = &entries["comments"];
        assert_eq!(comments.targets.len(), 2);
        assert_eq!(
            serde_json::to_value(comments.linkage()).unwrap(),
            json!([{"id": "1", "type": "comment"}, {"id": "2", "type": "comment"}])
        );
    }

    #[test]
    fn test_empty_relationships() {
        let config = RenderConfig::new();
        let resolver = RelationshipResolver::new(&config);
        let data = object(json!({"id": 1, "author": null, "comments": []}));

        let entries = resolver.relationships_for(&data, &article()).unwrap();
        assert_eq!(entries["author"].linkage(), Linkage::One(None));
        assert_eq!(entries["comments"].linkage(), Linkage::Many(vec![]));
        assert!(entries["comments"].is_empty());
    }

    #[test]
    fn test_loaded_targets() {
        let config = RenderConfig::new();
        let resolver = RelationshipResolver::new(&config);
        let data = object(json!({
            "id": 1,
            "author": {"id": 5, "first_name": "Molly"},
            "comments": [{"id": 3}]
        }));

        let entries = resolver.relationships_for(&data, &article()).unwrap();
        assert!(entries["author"].targets[0].is_loaded());
        assert!(!entries["comments"].targets[0].is_loaded());
        assert_eq!(entries["comments"].targets[0].identifier.id, "3");
    }

    #[test]
    fn test_cardinality_comes_from_declaration() {
        let config = RenderConfig::new();
        let resolver = RelationshipResolver::new(&config);

        let err = resolver
            .relationships_for(&object(json!({"id": 1, "comments": 3})), &article())
            .unwrap_err();
        assert!(matches!(err, RenderError::InvalidData { .. }));

        let err = resolver
            .relationships_for(&object(json!({"id": 1, "author": [5]})), &article())
            .unwrap_err();
        assert!(matches!(err, RenderError::InvalidData { .. }));
    }

    #[test]
    fn test_polymorphic_targets() {
        let config = RenderConfig::new();
        let resolver = RelationshipResolver::new(&config);
        let project = ResourceDescriptor::new("Project").to_many("organizations", "Organization");
        let data = object(json!({
            "id": 1,
            "organizations": [
                {"id": 1, "_type": "Company", "name": "ACME"},
                {"id": 2, "_type": "Association", "name": "Friends"}
            ]
        }));

        let entries = resolver.relationships_for(&data, &project).unwrap();
        let organizations = &entries["organizations"];
        assert_eq!(organizations.related_type.as_deref(), Some("organization"));
        assert_eq!(
            organizations.linkage(),
            Linkage::Many(vec![
                ResourceIdentifier::new("1", "company"),
                ResourceIdentifier::new("2", "association"),
            ])
        );
        assert_eq!(organizations.targets[1].model, "Association");
    }

    #[test]
    fn test_read_only_relationship_uses_model_map() {
        let config = RenderConfig::new();
        let resolver = RelationshipResolver::new(&config);
        let comment = ResourceDescriptor::new("Comment")
            .read_only_relationship("author", Cardinality::One)
            .model_map("author", "Person");

        let entries = resolver
            .relationships_for(&object(json!({"id": 1, "author": 5})), &comment)
            .unwrap();
        assert_eq!(
            entries["author"].linkage(),
            Linkage::One(Some(ResourceIdentifier::new("5", "person")))
        );
    }

    #[test]
    fn test_read_only_flag_hides_declared_model() {
        let config = RenderConfig::new();
        let resolver = RelationshipResolver::new(&config);
        let comment = ResourceDescriptor::new("Comment")
            .to_one("author", "Person")
            .read_only("author");

        let err = resolver
            .relationships_for(&object(json!({"id": 1, "author": 5})), &comment)
            .unwrap_err();
        assert!(matches!(
            err,
            RenderError::UnknownRelatedType { ref descriptor, ref field }
                if descriptor == "Comment" && field == "author"
        ));
    }

    #[test]
    fn test_untyped_relationship_fails_even_when_empty() {
        let config = RenderConfig::new();
        let resolver = RelationshipResolver::new(&config);
        let comment = ResourceDescriptor::new("Comment")
            .read_only_relationship("author", Cardinality::One);

        let err = resolver
            .relationships_for(&object(json!({"id": 1, "author": null})), &comment)
            .unwrap_err();
        assert!(matches!(err, RenderError::UnknownRelatedType { .. }));
    }

    #[test]
    fn test_untyped_relationship_with_typed_targets() {
        let config = RenderConfig::new();
        let resolver = RelationshipResolver::new(&config);
        let comment = ResourceDescriptor::new("Comment")
            .read_only_relationship("author", Cardinality::One);

        let entries = resolver
            .relationships_for(
                &object(json!({"id": 1, "author": {"id": 5, "_type": "Person"}})),
                &comment,
            )
            .unwrap();
        assert_eq!(entries["author"].related_type, None);
        assert_eq!(entries["author"].targets[0].identifier.resource_type, "person");
    }

    #[test]
    fn test_wire_names() {
        let config = RenderConfig::new();
        let resolver = RelationshipResolver::new(&config);
        let person = ResourceDescriptor::new("Person").to_many("other_organizations", "Organization");

        let entries = resolver
            .relationships_for(&object(json!({"id": 1, "other_organizations": []})), &person)
            .unwrap();
        assert_eq!(entries["other_organizations"].wire_name, "other-organizations");
    }
}
