//! Sideload CLI - Command-line interface for sideload.

use clap::Parser;

use sideload_cli::cli::{Cli, Command};
use sideload_cli::commands;
use sideload_cli::error::CliResult;
use sideload_cli::output;

#[tokio::main]
async fn main() {
    sideload_render::logging::init();

    if let Err(e) = run().await {
        output::newline_err();
        output::error(&e.to_string());
        for cause in output::causes(&e) {
            output::cause(&cause);
        }
        std::process::exit(1);
    }
}

async fn run() -> CliResult<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Render(args) => commands::render::run(args).await,
        Command::Validate(args) => commands::validate::run(args).await,
        Command::Version => commands::version::run().await,
    }
}
