//! # sideload-schema
//!
//! Resource descriptors and configuration for sideload.
//!
//! This crate provides:
//! - [`ResourceDescriptor`] declarations of attributes, relationships and
//!   sideload targets
//! - A [`Validator`] that resolves descriptor references into a [`Schema`]
//! - Field and resource-type naming rules
//! - Configuration parser for `sideload.toml` files
//!
//! ## Example
//!
//! ```rust
//! use sideload_schema::{DescriptorSet, ResourceDescriptor};
//!
//! let schema = DescriptorSet::new()
//!     .with(
//!         ResourceDescriptor::new("Comment")
//!             .attribute("body")
//!             .to_one("author", "Person")
//!             .include("author", "Person"),
//!     )
//!     .with(ResourceDescriptor::new("Person").attributes(["first_name", "last_name"]))
//!     .validate()
//!     .unwrap();
//!
//! assert_eq!(schema.len(), 2);
//! ```

pub mod config;
pub mod descriptor;
pub mod error;
pub mod naming;
pub mod validator;

pub use config::SideloadConfig;
pub use descriptor::{Cardinality, FieldKind, RelationshipSpec, ResourceDescriptor};
pub use error::{SchemaError, SchemaResult};
pub use naming::FieldCase;
pub use validator::{DescriptorSet, Schema, Validator, validate_descriptors};
