//! `sideload render` command - Render serialized objects as a compound document.

use std::path::Path;
use std::sync::Arc;

use serde_json::Value;
use sideload_render::{
    Assembler, ExtractorRegistry, InMemoryLoader, IncludePaths, RenderConfig, logging,
};
use tokio::io::AsyncReadExt;

use crate::cli::RenderArgs;
use crate::config;
use crate::error::{CliError, CliResult};

/// Run the render command
pub async fn run(args: RenderArgs) -> CliResult<()> {
    let config_path = config::config_path(args.config)?;
    let config = config::load(&config_path)?;

    if let Some(level) = &config.debug.log_level {
        let format = config.debug.log_format.as_deref().unwrap_or("compact");
        logging::init_with(level, format);
    }

    let schema = config.schema()?;
    let render_config = RenderConfig::from_config(&config, &ExtractorRegistry::with_builtins())?;

    let mut assembler = Assembler::new(Arc::new(schema), render_config);
    if let Some(path) = &args.fixtures {
        let fixtures: Value = serde_json::from_str(&read_file(path).await?)?;
        let loader = InMemoryLoader::from_fixtures(&fixtures, &assembler.config().id_field)?;
        assembler = assembler.with_loader(Arc::new(loader));
    }

    let input = read_input(args.input.as_deref()).await?;
    let data: Value = serde_json::from_str(&input)?;
    let includes = IncludePaths::from(args.include.as_deref());

    let document = assembler.build(&data, &args.resource, &includes).await?;

    let rendered = if args.pretty {
        document.to_string_pretty()?
    } else {
        document.to_string()?
    };
    println!("{}", rendered);

    Ok(())
}

async fn read_input(path: Option<&Path>) -> CliResult<String> {
    if config::is_stdin(path) {
        let mut input = String::new();
        tokio::io::stdin().read_to_string(&mut input).await?;
        return Ok(input);
    }

    match path {
        Some(path) => read_file(path).await,
        None => Err(CliError::Input("No input given".to_string())),
    }
}

async fn read_file(path: &Path) -> CliResult<String> {
    if !path.exists() {
        return Err(CliError::Input(format!(
            "File not found: {}",
            path.display()
        )));
    }
    Ok(tokio::fs::read_to_string(path).await?)
}
