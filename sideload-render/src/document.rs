//! Compound document wire types.

use indexmap::IndexMap;
use serde::ser::{Serialize, Serializer};
use serde_json::Value;

use crate::error::RenderResult;

/// Media type of rendered documents.
pub const MEDIA_TYPE: &str = "application/vnd.api+json";

/// Resource identity: `(type, id)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize)]
pub struct ResourceIdentifier {
    /// Stringified identifier.
    pub id: String,
    /// Resource type.
    #[serde(rename = "type")]
    pub resource_type: String,
}

impl ResourceIdentifier {
    /// Create an identifier.
    pub fn new(id: impl Into<String>, resource_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            resource_type: resource_type.into(),
        }
    }
}

/// Linkage of one relationship.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Linkage {
    /// To-one relation; `None` renders as `null`.
    One(Option<ResourceIdentifier>),
    /// To-many relation; empty renders as `[]`.
    Many(Vec<ResourceIdentifier>),
}

impl Linkage {
    /// Identifiers referenced by this linkage.
    pub fn identifiers(&self) -> Vec<&ResourceIdentifier> {
        match self {
            Self::One(one) => one.iter().collect(),
            Self::Many(many) => many.iter().collect(),
        }
    }
}

/// Relationship object: `{"data": linkage}`.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Relationship {
    /// Resource linkage.
    pub data: Linkage,
}

impl Serialize for Linkage {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::One(one) => one.serialize(serializer),
            Self::Many(many) => many.serialize(serializer),
        }
    }
}

/// Resource object.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ResourceObject {
    /// Stringified identifier.
    pub id: String,
    /// Resource type.
    #[serde(rename = "type")]
    pub resource_type: String,
    /// Attributes keyed by wire name; omitted when empty.
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub attributes: IndexMap<String, Value>,
    /// Relationships keyed by wire name; omitted when none are declared.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relationships: Option<IndexMap<String, Relationship>>,
}

impl ResourceObject {
    /// Identity of this resource.
    pub fn identifier(&self) -> ResourceIdentifier {
        ResourceIdentifier::new(&self.id, &self.resource_type)
    }

    /// Get a relationship by wire name.
    pub fn relationship(&self, wire_name: &str) -> Option<&Relationship> {
        self.relationships.as_ref()?.get(wire_name)
    }
}

/// Primary data of a document.
#[derive(Debug, Clone, PartialEq)]
pub enum PrimaryData {
    /// A single resource.
    Resource(Box<ResourceObject>),
    /// A collection of resources.
    Collection(Vec<ResourceObject>),
    /// No resource (`null`).
    Null,
}

impl PrimaryData {
    /// Primary resources in order.
    pub fn resources(&self) -> Vec<&ResourceObject> {
        match self {
            Self::Resource(resource) => vec![resource.as_ref()],
            Self::Collection(resources) => resources.iter().collect(),
            Self::Null => Vec::new(),
        }
    }
}

impl Serialize for PrimaryData {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Resource(resource) => resource.serialize(serializer),
            Self::Collection(resources) => resources.serialize(serializer),
            Self::Null => serializer.serialize_none(),
        }
    }
}

/// Top-level compound document.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct CompoundDocument {
    /// Primary data.
    pub data: PrimaryData,
    /// Sideloaded resources; omitted when nothing was embedded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub included: Option<Vec<ResourceObject>>,
}

impl CompoundDocument {
    /// Sideloaded resources, empty when nothing was embedded.
    pub fn included(&self) -> &[ResourceObject] {
        self.included.as_deref().unwrap_or_default()
    }

    /// Convert to a JSON value.
    pub fn to_value(&self) -> RenderResult<Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Serialize to a compact JSON string.
    pub fn to_string(&self) -> RenderResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Serialize to a pretty-printed JSON string.
    pub fn to_string_pretty(&self) -> RenderResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn person(id: &str) -> ResourceObject {
        let mut attributes = IndexMap::new();
        attributes.insert("first-name".to_string(), json!("Molly"));
        ResourceObject {
            id: id.to_string(),
            resource_type: "person".to_string(),
            attributes,
            relationships: None,
        }
    }

    #[test]
    fn test_linkage_serialization() {
        let one = Linkage::One(Some(ResourceIdentifier::new("1", "person")));
        assert_eq!(serde_json::to_value(&one).unwrap(), json!({"id": "1", "type": "person"}));
        assert_eq!(serde_json::to_value(Linkage::One(None)).unwrap(), json!(null));
        assert_eq!(serde_json::to_value(Linkage::Many(vec![])).unwrap(), json!([]));
    }

    #[test]
    fn test_empty_attributes_omitted() {
        let resource = ResourceObject {
            id: "1".into(),
            resource_type: "formatting-with-abbr".into(),
            attributes: IndexMap::new(),
            relationships: None,
        };
        assert_eq!(
            serde_json::to_value(&resource).unwrap(),
            json!({"id": "1", "type": "formatting-with-abbr"})
        );
    }

    #[test]
    fn test_document_without_included() {
        let document = CompoundDocument {
            data: PrimaryData::Collection(vec![person("1")]),
            included: None,
        };
        assert_eq!(
            document.to_value().unwrap(),
            json!({"data": [{"id": "1", "type": "person", "attributes": {"first-name": "Molly"}}]})
        );
        assert!(document.included().is_empty());
    }

    #[test]
    fn test_null_primary_data() {
        let document = CompoundDocument {
            data: PrimaryData::Null,
            included: None,
        };
        assert_eq!(document.to_string().unwrap(), r#"{"data":null}"#);
    }

    #[test]
    fn test_field_order() {
        let mut resource = person("7");
        let mut relationships = IndexMap::new();
        relationships.insert(
            "comments".to_string(),
            Relationship {
                data: Linkage::Many(vec![ResourceIdentifier::new("3", "comment")]),
            },
        );
        resource.relationships = Some(relationships);

        assert_eq!(
            serde_json::to_string(&resource).unwrap(),
            r#"{"id":"7","type":"person","attributes":{"first-name":"Molly"},"relationships":{"comments":{"data":[{"id":"3","type":"comment"}]}}}"#
        );
    }
}
