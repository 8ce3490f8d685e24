//! Resource descriptors.
//!
//! A [`ResourceDescriptor`] declares how one domain type is rendered: which
//! serialized fields are attributes, which are relationships, which
//! relationships may be sideloaded and with which nested descriptor, and how a
//! polymorphic object maps to its concrete descriptor.
//!
//! ```rust
//! use sideload_schema::ResourceDescriptor;
//!
//! let article = ResourceDescriptor::new("Article")
//!     .attribute("title")
//!     .to_one("author", "Person")
//!     .to_many("comments", "Comment")
//!     .include("author", "Person")
//!     .include("comments", "Comment");
//!
//! assert_eq!(article.attribute_names().collect::<Vec<_>>(), vec!["title"]);
//! assert!(article.sideload_target("author").is_some());
//! ```

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

/// Kind of a declared field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// Scalar attribute rendered under `attributes`.
    Attribute,
    /// Relation rendered under `relationships`.
    Relationship,
}

/// Cardinality of a relationship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Cardinality {
    /// To-one relation, linkage is an identifier or `null`.
    #[default]
    One,
    /// To-many relation, linkage is an array of identifiers.
    Many,
}

impl Cardinality {
    /// Check if this relation renders multiple identifiers.
    pub fn is_many(&self) -> bool {
        matches!(self, Self::Many)
    }

    /// Check if this relation renders a single identifier.
    pub fn is_one(&self) -> bool {
        matches!(self, Self::One)
    }
}

/// Specification for a relationship field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationshipSpec {
    /// Name of the relation (internal field name).
    pub name: String,
    /// Cardinality of the relation.
    pub cardinality: Cardinality,
    /// Domain model of the related objects. Absent for read-only relations.
    pub model: Option<String>,
    /// Name of the descriptor used when the relation is sideloaded.
    pub include: Option<String>,
}

impl RelationshipSpec {
    /// Create a to-one relationship spec.
    pub fn one(name: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cardinality: Cardinality::One,
            model: Some(model.into()),
            include: None,
        }
    }

    /// Create a to-many relationship spec.
    pub fn many(name: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cardinality: Cardinality::Many,
            model: Some(model.into()),
            include: None,
        }
    }

    /// Create a relationship spec without model metadata.
    pub fn untyped(name: impl Into<String>, cardinality: Cardinality) -> Self {
        Self {
            name: name.into(),
            cardinality,
            model: None,
            include: None,
        }
    }

    /// Allow sideloading through the named descriptor.
    pub fn sideload(mut self, descriptor: impl Into<String>) -> Self {
        self.include = Some(descriptor.into());
        self
    }

    /// Check if this relation may be sideloaded.
    pub fn is_sideloadable(&self) -> bool {
        self.include.is_some()
    }
}

/// Declaration of how one domain type renders as a resource object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceDescriptor {
    name: String,
    model: String,
    fields: IndexMap<String, FieldKind>,
    relationships: IndexMap<String, RelationshipSpec>,
    read_only: IndexSet<String>,
    model_map: IndexMap<String, String>,
    variants: IndexMap<String, String>,
}

impl ResourceDescriptor {
    /// Create a descriptor whose registry name and model are both `name`.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            model: name.clone(),
            name,
            fields: IndexMap::new(),
            relationships: IndexMap::new(),
            read_only: IndexSet::new(),
            model_map: IndexMap::new(),
            variants: IndexMap::new(),
        }
    }

    /// Set the domain model name, when it differs from the descriptor name.
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Declare an attribute field.
    pub fn attribute(mut self, name: impl Into<String>) -> Self {
        self.fields.insert(name.into(), FieldKind::Attribute);
        self
    }

    /// Declare several attribute fields, in order.
    pub fn attributes(mut self, names: impl IntoIterator<Item = impl Into<String>>) -> Self {
        for name in names {
            self.fields.insert(name.into(), FieldKind::Attribute);
        }
        self
    }

    /// Declare a relationship field.
    pub fn relationship(mut self, spec: RelationshipSpec) -> Self {
        self.fields.insert(spec.name.clone(), FieldKind::Relationship);
        self.relationships.insert(spec.name.clone(), spec);
        self
    }

    /// Declare a to-one relationship to `model`.
    pub fn to_one(self, name: impl Into<String>, model: impl Into<String>) -> Self {
        self.relationship(RelationshipSpec::one(name, model))
    }

    /// Declare a to-many relationship to `model`.
    pub fn to_many(self, name: impl Into<String>, model: impl Into<String>) -> Self {
        self.relationship(RelationshipSpec::many(name, model))
    }

    /// Declare a read-only relationship. Read-only relations carry no model
    /// metadata, so their type comes from [`Self::model_map`] or from the
    /// related objects themselves.
    pub fn read_only_relationship(
        mut self,
        name: impl Into<String>,
        cardinality: Cardinality,
    ) -> Self {
        let name = name.into();
        self.read_only.insert(name.clone());
        self.relationship(RelationshipSpec::untyped(name, cardinality))
    }

    /// Mark an already declared field as read-only.
    pub fn read_only(mut self, name: impl Into<String>) -> Self {
        self.read_only.insert(name.into());
        self
    }

    /// Allow sideloading relationship `field` through the named descriptor.
    ///
    /// Fields that are not declared relationships are caught by validation.
    pub fn include(mut self, field: impl Into<String>, descriptor: impl Into<String>) -> Self {
        let field = field.into();
        let descriptor = descriptor.into();
        match self.relationships.get_mut(&field) {
            Some(spec) => spec.include = Some(descriptor),
            None => {
                self.relationships.insert(
                    field.clone(),
                    RelationshipSpec::untyped(field, Cardinality::One).sideload(descriptor),
                );
            }
        }
        self
    }

    /// Declare the related model of a read-only relationship.
    pub fn model_map(mut self, field: impl Into<String>, model: impl Into<String>) -> Self {
        self.model_map.insert(field.into(), model.into());
        self
    }

    /// Declare a polymorphic variant: objects whose type marker names
    /// `model` render with the descriptor named `descriptor`.
    pub fn variant(mut self, model: impl Into<String>, descriptor: impl Into<String>) -> Self {
        self.variants.insert(model.into(), descriptor.into());
        self
    }

    /// Registry name of this descriptor.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Domain model name used for resource type resolution.
    pub fn model_name(&self) -> &str {
        &self.model
    }

    /// All declared fields in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, FieldKind)> {
        self.fields.iter().map(|(name, kind)| (name.as_str(), *kind))
    }

    /// Kind of a declared field.
    pub fn field_kind(&self, name: &str) -> Option<FieldKind> {
        self.fields.get(name).copied()
    }

    /// Declared attribute names in declaration order.
    pub fn attribute_names(&self) -> impl Iterator<Item = &str> {
        self.fields
            .iter()
            .filter(|(_, kind)| **kind == FieldKind::Attribute)
            .map(|(name, _)| name.as_str())
    }

    /// Declared relationships in field declaration order.
    pub fn relationships(&self) -> impl Iterator<Item = &RelationshipSpec> {
        self.fields
            .iter()
            .filter(|(_, kind)| **kind == FieldKind::Relationship)
            .filter_map(|(name, _)| self.relationships.get(name))
    }

    /// Every relationship spec, including sideload entries for undeclared
    /// fields. Used by validation.
    pub fn relationship_specs(&self) -> impl Iterator<Item = &RelationshipSpec> {
        self.relationships.values()
    }

    /// Get a relationship spec by field name.
    pub fn relationship_spec(&self, name: &str) -> Option<&RelationshipSpec> {
        self.relationships.get(name)
    }

    /// Check whether a field is read-only.
    pub fn is_read_only(&self, name: &str) -> bool {
        self.read_only.contains(name)
    }

    /// Read-only field names.
    pub fn read_only_fields(&self) -> impl Iterator<Item = &str> {
        self.read_only.iter().map(String::as_str)
    }

    /// Explicit model of a read-only relationship.
    pub fn mapped_model(&self, field: &str) -> Option<&str> {
        self.model_map.get(field).map(String::as_str)
    }

    /// Explicit model mappings.
    pub fn model_mappings(&self) -> impl Iterator<Item = (&str, &str)> {
        self.model_map.iter().map(|(f, m)| (f.as_str(), m.as_str()))
    }

    /// Descriptor name used to sideload relationship `field`, if any.
    pub fn sideload_target(&self, field: &str) -> Option<&str> {
        self.relationships
            .get(field)
            .filter(|_| self.field_kind(field) == Some(FieldKind::Relationship))
            .and_then(|spec| spec.include.as_deref())
    }

    /// Polymorphic variants (concrete model, descriptor name).
    pub fn variants(&self) -> impl Iterator<Item = (&str, &str)> {
        self.variants.iter().map(|(m, d)| (m.as_str(), d.as_str()))
    }

    /// Descriptor name for a concrete model, if this descriptor is polymorphic
    /// over it.
    pub fn variant_for(&self, model: &str) -> Option<&str> {
        self.variants.get(model).map(String::as_str)
    }

    /// Check whether this descriptor declares polymorphic variants.
    pub fn is_polymorphic(&self) -> bool {
        !self.variants.is_empty()
    }

    /// Name of the descriptor that renders an object of concrete `model`:
    /// the matching variant, or this descriptor itself.
    pub fn resolve_concrete(&self, model: Option<&str>) -> &str {
        model
            .and_then(|model| self.variant_for(model))
            .unwrap_or(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_cardinality() {
        assert!(Cardinality::Many.is_many());
        assert!(Cardinality::One.is_one());
        assert!(!Cardinality::One.is_many());
    }

    #[test]
    fn test_relationship_spec() {
        let spec = RelationshipSpec::many("comments", "Comment").sideload("Comment");

        assert_eq!(spec.name, "comments");
        assert_eq!(spec.cardinality, Cardinality::Many);
        assert_eq!(spec.model.as_deref(), Some("Comment"));
        assert!(spec.is_sideloadable());
    }

    #[test]
    fn test_field_order_is_declaration_order() {
        let descriptor = ResourceDescriptor::new("Person")
            .attribute("last_name")
            .to_many("posts", "Post")
            .attribute("first_name");

        let fields: Vec<_> = descriptor.fields().collect();
        assert_eq!(
            fields,
            vec![
                ("last_name", FieldKind::Attribute),
                ("posts", FieldKind::Relationship),
                ("first_name", FieldKind::Attribute),
            ]
        );
        assert_eq!(
            descriptor.attribute_names().collect::<Vec<_>>(),
            vec!["last_name", "first_name"]
        );
    }

    #[test]
    fn test_include_marks_existing_relationship() {
        let descriptor = ResourceDescriptor::new("Comment")
            .attribute("body")
            .to_one("author", "Person")
            .include("author", "Person");

        assert_eq!(descriptor.sideload_target("author"), Some("Person"));
        assert_eq!(descriptor.sideload_target("body"), None);
    }

    #[test]
    fn test_include_without_declared_field_is_not_sideloadable() {
        let descriptor = ResourceDescriptor::new("Comment").include("author", "Person");

        assert_eq!(descriptor.field_kind("author"), None);
        assert_eq!(descriptor.sideload_target("author"), None);
        assert_eq!(descriptor.relationship_specs().count(), 1);
    }

    #[test]
    fn test_read_only_relationship() {
        let descriptor = ResourceDescriptor::new("Comment")
            .read_only_relationship("author", Cardinality::One)
            .model_map("author", "Person");

        assert!(descriptor.is_read_only("author"));
        assert_eq!(descriptor.relationship_spec("author").unwrap().model, None);
        assert_eq!(descriptor.mapped_model("author"), Some("Person"));
    }

    #[test]
    fn test_variants() {
        let descriptor = ResourceDescriptor::new("Organization")
            .attribute("name")
            .variant("Company", "Company")
            .variant("Association", "Association");

        assert!(descriptor.is_polymorphic());
        assert_eq!(descriptor.variant_for("Company"), Some("Company"));
        assert_eq!(descriptor.variant_for("Individual"), None);
        assert_eq!(descriptor.resolve_concrete(Some("Association")), "Association");
        assert_eq!(descriptor.resolve_concrete(Some("Individual")), "Organization");
        assert_eq!(descriptor.resolve_concrete(None), "Organization");
    }

    #[test]
    fn test_model_override() {
        let descriptor = ResourceDescriptor::new("ReadOnlyAuthorComment").model("Comment");
        assert_eq!(descriptor.name(), "ReadOnlyAuthorComment");
        assert_eq!(descriptor.model_name(), "Comment");
    }
}
