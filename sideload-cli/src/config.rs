//! CLI configuration handling.

use std::path::{Path, PathBuf};

use sideload_schema::SideloadConfig;
pub use sideload_schema::config::CONFIG_FILE_NAME;

use crate::error::{CliError, CliResult};

/// Placeholder for reading input from stdin.
pub const STDIN_PLACEHOLDER: &str = "-";

/// Resolve the configuration file path, defaulting to `sideload.toml` in the
/// current directory.
pub fn config_path(explicit: Option<PathBuf>) -> CliResult<PathBuf> {
    match explicit {
        Some(path) => Ok(path),
        None => Ok(std::env::current_dir()?.join(CONFIG_FILE_NAME)),
    }
}

/// Load the configuration file.
pub fn load(path: &Path) -> CliResult<SideloadConfig> {
    if !path.exists() {
        return Err(CliError::Config(format!(
            "Config file not found: {}",
            path.display()
        )));
    }
    Ok(SideloadConfig::from_file(path)?)
}

/// Check if a path argument asks for stdin.
pub fn is_stdin(path: Option<&Path>) -> bool {
    path.is_none_or(|p| p.as_os_str() == STDIN_PLACEHOLDER)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_stdin() {
        assert!(is_stdin(None));
        assert!(is_stdin(Some(Path::new("-"))));
        assert!(!is_stdin(Some(Path::new("article.json"))));
    }

    #[test]
    fn test_explicit_config_path() {
        let path = config_path(Some(PathBuf::from("custom.toml"))).unwrap();
        assert_eq!(path, PathBuf::from("custom.toml"));
    }

    #[test]
    fn test_missing_config() {
        let err = load(Path::new("/nonexistent/sideload.toml")).unwrap_err();
        assert!(matches!(err, CliError::Config(_)));
    }
}
