//! # Sideload
//!
//! Render relational object graphs as JSON:API-style compound documents.
//!
//! Sideload provides:
//! - Declarative resource descriptors for attributes, relationships and
//!   polymorphic variants
//! - Include-path gated sideloading of related resources into a
//!   deduplicated `included` list
//! - Configurable field naming and resource type resolution
//! - Async loading of related objects known only by identifier
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use serde_json::json;
//! use sideload::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let schema = DescriptorSet::new()
//!         .with(
//!             ResourceDescriptor::new("Article")
//!                 .attribute("title")
//!                 .to_one("author", "Person")
//!                 .include("author", "Person"),
//!         )
//!         .with(ResourceDescriptor::new("Person").attributes(["first_name", "last_name"]))
//!         .validate()?;
//!
//!     let assembler = Assembler::new(Arc::new(schema), RenderConfig::new());
//!     let article = json!({
//!         "id": 1,
//!         "title": "Hello",
//!         "author": {"id": 5, "first_name": "Molly", "last_name": "Davis"}
//!     });
//!
//!     let document = assembler
//!         .build(&article, "Article", &IncludePaths::parse("author"))
//!         .await?;
//!     println!("{}", document.to_string_pretty()?);
//!
//!     Ok(())
//! }
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

/// Resource descriptors, naming rules and configuration.
pub mod schema {
    pub use sideload_schema::*;
}

/// Compound document assembly.
pub mod render {
    pub use sideload_render::*;
}

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::render::{
        Assembler, CompoundDocument, ExtractorRegistry, InMemoryLoader, IncludePaths,
        RenderConfig, RenderError, ResourceLoader,
    };
    pub use crate::schema::{
        Cardinality, DescriptorSet, ResourceDescriptor, Schema, SideloadConfig,
    };
}

// Re-export key types at the crate root
pub use render::{Assembler, CompoundDocument, IncludePaths, RenderConfig, RenderError};
pub use schema::{ResourceDescriptor, Schema, SchemaError, SideloadConfig};
