//! # sideload-render
//!
//! Compound document assembly for sideload.
//!
//! This crate turns serialized objects into JSON:API-style compound
//! documents:
//! - [`IncludePaths`] parses the client's `include` value
//! - [`ResourceMapper`] and [`RelationshipResolver`] map one object
//! - [`Assembler`] walks the object graph along the requested paths and
//!   collects a deduplicated `included` list
//! - [`ResourceLoader`] fetches related objects known only by identifier
//!
//! ## Example
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
//!         ResourceDescriptor::new("Comment")
//!             .attribute("body")
//!             .to_one("author", "Person")
//!             .include("author", "Person"),
//!     )
//!     .with(ResourceDescriptor::new("Person").attributes(["first_name", "last_name"]))
//!     .validate()?;
//!
//! let assembler = Assembler::new(Arc::new(schema), RenderConfig::new());
//! let comments = json!([
//!     {"id": 1, "body": "First", "author": {"id": 5, "first_name": "Molly"}},
//!     {"id": 2, "body": "Second", "author": {"id": 5, "first_name": "Molly"}}
//! ]);
//!
//! let document = assembler
//!     .build(&comments, "Comment", &IncludePaths::parse("author"))
//!     .await?;
//! println!("{}", document.to_string_pretty()?);
//! # Ok(())
//! # }
//! ```

pub mod assembler;
pub mod config;
pub mod document;
pub mod error;
pub mod include;
pub mod loader;
pub mod logging;
pub mod mapper;
pub mod resolver;

pub use assembler::Assembler;
pub use config::{ExtractorRegistry, RenderConfig, TypeExtractor, TypeResolver};
pub use document::{
    CompoundDocument, Linkage, MEDIA_TYPE, PrimaryData, Relationship, ResourceIdentifier,
    ResourceObject,
};
pub use error::{BoxError, RenderError, RenderResult};
pub use include::IncludePaths;
pub use loader::{InMemoryLoader, LoadError, LoadResult, Object, ResourceLoader};
pub use mapper::{MappedResource, ResourceMapper};
pub use resolver::{RelatedTarget, RelationshipEntry, RelationshipResolver};
