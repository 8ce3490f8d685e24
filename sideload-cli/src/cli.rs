//! CLI argument definitions using clap.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Sideload CLI - Render object graphs as compound documents
#[derive(Parser, Debug)]
#[command(name = "sideload")]
#[command(author = "Pegasus Heavy Industries LLC")]
#[command(version)]
#[command(about = "Sideload CLI - Render object graphs as compound documents", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render serialized objects as a compound document
    Render(RenderArgs),

    /// Validate resource descriptors in the configuration file
    Validate(ValidateArgs),

    /// Display version information
    Version,
}

// =============================================================================
// Render Command
// =============================================================================

/// Arguments for the `render` command
#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Serialized object or array (JSON); reads stdin when absent or `-`
    pub input: Option<PathBuf>,

    /// Path to the configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Descriptor used for the primary data
    #[arg(short, long)]
    pub resource: String,

    /// Comma-separated include paths, eg. `author,comments.author`
    #[arg(short, long)]
    pub include: Option<String>,

    /// Objects available for sideloading by identifier, as `{"Model": [...]}`
    #[arg(short, long)]
    pub fixtures: Option<PathBuf>,

    /// Pretty-print the document
    #[arg(short, long)]
    pub pretty: bool,
}

// =============================================================================
// Validate Command
// =============================================================================

/// Arguments for the `validate` command
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Path to the configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_render() {
        let cli = Cli::parse_from([
            "sideload",
            "render",
            "article.json",
            "--resource",
            "Article",
            "--include",
            "author,comments",
            "--pretty",
        ]);

        match cli.command {
            Command::Render(args) => {
                assert_eq!(args.resource, "Article");
                assert_eq!(args.include.as_deref(), Some("author,comments"));
                assert_eq!(args.input, Some(PathBuf::from("article.json")));
                assert!(args.pretty);
                assert!(args.config.is_none());
            }
            other => panic!("Expected render command, got {other:?}"),
        }
    }
}
