//! `sideload version` command - Display version information.

use crate::error::CliResult;
use crate::output::{self, kv};

/// Package version
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Package name
const NAME: &str = env!("CARGO_PKG_NAME");

/// Run the version command
pub async fn run() -> CliResult<()> {
    output::header("sideload");

    kv("Version", VERSION);
    kv("Binary", NAME);

    #[cfg(debug_assertions)]
    let build_mode = "debug";
    #[cfg(not(debug_assertions))]
    let build_mode = "release";

    kv("Build", build_mode);
    kv("Media type", sideload_render::MEDIA_TYPE);

    output::newline();

    output::section("Components");
    kv("sideload-schema", env!("CARGO_PKG_VERSION"));
    kv("sideload-render", env!("CARGO_PKG_VERSION"));

    Ok(())
}
