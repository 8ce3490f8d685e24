//! CLI error types and result alias.

use miette::Diagnostic;
use sideload_render::RenderError;
use sideload_schema::SchemaError;
use thiserror::Error;

/// Result type alias for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// CLI error types
#[derive(Error, Debug, Diagnostic)]
pub enum CliError {
    /// IO error
    #[error("IO error: {0}")]
    #[diagnostic(code(sideload::io))]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    #[diagnostic(code(sideload::config))]
    Config(String),

    /// Input document error
    #[error("Input error: {0}")]
    #[diagnostic(code(sideload::input))]
    Input(String),

    /// Descriptor error
    #[error(transparent)]
    #[diagnostic(transparent)]
    Schema(#[from] SchemaError),

    /// Rendering error
    #[error(transparent)]
    #[diagnostic(transparent)]
    Render(#[from] RenderError),

    /// Validation error
    #[error("Validation error: {0}")]
    #[diagnostic(code(sideload::validation))]
    Validation(String),
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        CliError::Input(format!("Failed to parse JSON: {}", err))
    }
}

impl From<sideload_render::LoadError> for CliError {
    fn from(err: sideload_render::LoadError) -> Self {
        CliError::Input(format!("Invalid fixtures: {}", err))
    }
}
