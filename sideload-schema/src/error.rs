//! Error types for descriptor declaration, validation and configuration.

// These warnings are false positives - the fields are used by derive macros
#![allow(unused_assignments)]

use miette::Diagnostic;
use thiserror::Error;

/// Result type for schema operations.
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Errors that can occur while declaring, validating or configuring descriptors.
#[derive(Error, Debug, Diagnostic)]
pub enum SchemaError {
    /// Error reading a file.
    #[error("failed to read file: {path}")]
    #[diagnostic(code(sideload::schema::io_error))]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// TOML parsing error.
    #[error("failed to parse TOML")]
    #[diagnostic(code(sideload::schema::toml_error))]
    TomlError {
        #[source]
        source: toml::de::Error,
    },

    /// Configuration error.
    #[error("configuration error: {message}")]
    #[diagnostic(code(sideload::schema::config_error))]
    ConfigError { message: String },

    /// Invalid descriptor definition.
    #[error("invalid descriptor `{name}`: {message}")]
    #[diagnostic(code(sideload::schema::invalid_descriptor))]
    InvalidDescriptor { name: String, message: String },

    /// Invalid field declaration.
    #[error("invalid field `{descriptor}.{field}`: {message}")]
    #[diagnostic(code(sideload::schema::invalid_field))]
    InvalidField {
        descriptor: String,
        field: String,
        message: String,
    },

    /// A lazy descriptor reference that names no registered descriptor.
    #[error("unknown descriptor `{target}` referenced from `{descriptor}.{field}`")]
    #[diagnostic(
        code(sideload::schema::unknown_descriptor),
        help("register a descriptor named `{target}` or fix the reference")
    )]
    UnknownDescriptor {
        descriptor: String,
        field: String,
        target: String,
    },

    /// Lookup of a descriptor that is not part of the schema.
    #[error("no descriptor named `{name}`")]
    #[diagnostic(code(sideload::schema::not_registered))]
    NotRegistered { name: String },

    /// Duplicate definition.
    #[error("duplicate {kind} `{name}`")]
    #[diagnostic(code(sideload::schema::duplicate))]
    Duplicate { kind: String, name: String },

    /// Validation error with multiple issues.
    #[error("descriptor validation failed with {count} error(s)")]
    #[diagnostic(code(sideload::schema::validation_failed))]
    ValidationFailed {
        count: usize,
        #[related]
        errors: Vec<SchemaError>,
    },
}

impl SchemaError {
    /// Create an invalid descriptor error.
    pub fn invalid_descriptor(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidDescriptor {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Create an invalid field error.
    pub fn invalid_field(
        descriptor: impl Into<String>,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::InvalidField {
            descriptor: descriptor.into(),
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create an unknown descriptor reference error.
    pub fn unknown_descriptor(
        descriptor: impl Into<String>,
        field: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        Self::UnknownDescriptor {
            descriptor: descriptor.into(),
            field: field.into(),
            target: target.into(),
        }
    }

    /// Create a duplicate definition error.
    pub fn duplicate(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self::Duplicate {
            kind: kind.into(),
            name: name.into(),
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }
}
