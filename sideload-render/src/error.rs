//! Error types for document assembly.
//!
//! Every [`RenderError`] except [`RenderError::Loader`] and
//! [`RenderError::Serialization`] is a configuration error: it points at a
//! defect in descriptors or settings rather than at one record, and it aborts
//! the whole build.
//!
//! ```rust
//! use sideload_render::RenderError;
//!
//! let err = RenderError::missing_id("Person", "id");
//! assert!(err.is_configuration());
//! assert!(err.to_string().contains("Person"));
//! ```

// These warnings are false positives - the fields are used by derive macros
#![allow(unused_assignments)]

use miette::Diagnostic;
use sideload_schema::SchemaError;
use thiserror::Error;

use crate::loader::LoadError;

/// Boxed error returned by user-supplied hooks.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Result type for render operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Errors that can occur while building a compound document.
#[derive(Error, Debug, Diagnostic)]
pub enum RenderError {
    /// A serialized object has no usable identifier.
    #[error("{model} object has no `{field}` value")]
    #[diagnostic(code(sideload::render::missing_id))]
    MissingId { model: String, field: String },

    /// The type of a related object cannot be determined.
    #[error("cannot determine the related type of `{descriptor}.{field}`")]
    #[diagnostic(
        code(sideload::render::unknown_related_type),
        help(
            "relationship fields without model metadata (eg. read-only fields) must declare \
             the related model in the descriptor's model_map: model_map(\"{field}\", \"Model\")"
        )
    )]
    UnknownRelatedType { descriptor: String, field: String },

    /// The configured type extractor failed.
    #[error("type extractor `{extractor}` failed for model `{model}`")]
    #[diagnostic(code(sideload::render::type_extractor))]
    TypeExtractor {
        extractor: String,
        model: String,
        #[source]
        source: BoxError,
    },

    /// The configured type extractor name is not registered.
    #[error("could not resolve type extractor `{name}`")]
    #[diagnostic(
        code(sideload::render::unresolved_extractor),
        help("register the extractor before building the render configuration")
    )]
    UnresolvedExtractor { name: String },

    /// Descriptor lookup failed.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Schema(#[from] SchemaError),

    /// Input data has an unexpected shape.
    #[error("invalid serialized data: {message}")]
    #[diagnostic(code(sideload::render::invalid_data))]
    InvalidData { message: String },

    /// The resource loader failed for a reason other than a missing record.
    #[error("failed to load {model} `{id}` for sideloading")]
    #[diagnostic(code(sideload::render::loader))]
    Loader {
        model: String,
        id: String,
        #[source]
        source: LoadError,
    },

    /// Document serialization failed.
    #[error("failed to serialize document")]
    #[diagnostic(code(sideload::render::serialization))]
    Serialization(#[from] serde_json::Error),
}

impl RenderError {
    /// Create a missing identifier error.
    pub fn missing_id(model: impl Into<String>, field: impl Into<String>) -> Self {
        Self::MissingId {
            model: model.into(),
            field: field.into(),
        }
    }

    /// Create an unknown related type error.
    pub fn unknown_related_type(descriptor: impl Into<String>, field: impl Into<String>) -> Self {
        Self::UnknownRelatedType {
            descriptor: descriptor.into(),
            field: field.into(),
        }
    }

    /// Create an invalid data error.
    pub fn invalid_data(message: impl Into<String>) -> Self {
        Self::InvalidData {
            message: message.into(),
        }
    }

    /// Check if this error is a configuration defect.
    pub fn is_configuration(&self) -> bool {
        !matches!(self, Self::Loader { .. } | Self::Serialization(_))
    }
}

#[cfg(test)]
#[allow(unused_assignments)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_related_type_names_field() {
        let err = RenderError::unknown_related_type("Comment", "author");
        assert!(err.is_configuration());
        assert!(err.to_string().contains("Comment.author"));

        let help = err.help().map(|h| h.to_string()).unwrap_or_default();
        assert!(help.contains("model_map"));
        assert!(help.contains("author"));
    }

    #[test]
    fn test_type_extractor_keeps_cause() {
        let cause: BoxError = "boom".into();
        let err = RenderError::TypeExtractor {
            extractor: "custom".into(),
            model: "Person".into(),
            source: cause,
        };

        assert!(err.is_configuration());
        let source = std::error::Error::source(&err).map(|s| s.to_string());
        assert_eq!(source.as_deref(), Some("boom"));
    }

    #[test]
    fn test_loader_error_is_not_configuration() {
        let err = RenderError::Loader {
            model: "Person".into(),
            id: "1".into(),
            source: LoadError::backend("connection reset"),
        };
        assert!(!err.is_configuration());
    }

    #[test]
    fn test_schema_error_conversion() {
        let err: RenderError = SchemaError::NotRegistered {
            name: "Article".into(),
        }
        .into();
        assert!(err.is_configuration());
        assert!(err.to_string().contains("Article"));
    }
}
