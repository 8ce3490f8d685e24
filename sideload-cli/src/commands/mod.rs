//! CLI command implementations.

pub mod render;
pub mod validate;
pub mod version;
