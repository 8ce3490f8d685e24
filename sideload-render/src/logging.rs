//! Logging infrastructure for sideload.
//!
//! Structured logging controlled by environment variables.
//!
//! # Environment Variables
//!
//! - `SIDELOAD_DEBUG=true` / `SIDELOAD_DEBUG=1` - Enable debug logging
//! - `SIDELOAD_LOG_LEVEL=debug|info|warn|error|trace` - Set specific log level
//! - `SIDELOAD_LOG_FORMAT=json|pretty|compact` - Set output format (default: json)
//!
//! # Usage
//!
//! ```rust,no_run
//! use sideload_render::logging;
//!
//! // Initialize logging (call once at startup)
//! logging::init();
//! ```
//!
//! Inside the engine the standard tracing macros are used:
//!
//! ```rust,ignore
//! debug!(descriptor = %name, primary = count, "Building compound document");
//! trace!(path = %path, "Embedding relationship");
//! warn!(model = %model, id = %id, "Sideload target not found");
//! ```

use std::env;
use std::sync::Once;

static INIT: Once = Once::new();

/// Check if debug logging is enabled via `SIDELOAD_DEBUG`.
///
/// Returns `true` if `SIDELOAD_DEBUG` is set to "true", "1", or "yes" (case-insensitive).
#[inline]
pub fn is_debug_enabled() -> bool {
    env::var("SIDELOAD_DEBUG")
        .map(|v| matches!(v.to_lowercase().as_str(), "true" | "1" | "yes"))
        .unwrap_or(false)
}

/// Normalize a log level name, falling back to `None` for unknown names.
pub fn parse_level(level: &str) -> Option<&'static str> {
    match level.to_lowercase().as_str() {
        "trace" => Some("trace"),
        "debug" => Some("debug"),
        "info" => Some("info"),
        "warn" => Some("warn"),
        "error" => Some("error"),
        _ => None,
    }
}

/// Get the configured log level from `SIDELOAD_LOG_LEVEL`.
///
/// Defaults to "debug" if `SIDELOAD_DEBUG` is enabled, otherwise "warn".
pub fn get_log_level() -> &'static str {
    let fallback = if is_debug_enabled() { "debug" } else { "warn" };
    env::var("SIDELOAD_LOG_LEVEL")
        .ok()
        .and_then(|level| parse_level(&level))
        .unwrap_or(fallback)
}

/// Get the configured log format from `SIDELOAD_LOG_FORMAT`.
///
/// Defaults to "json" for structured logging.
pub fn get_log_format() -> &'static str {
    env::var("SIDELOAD_LOG_FORMAT")
        .map(|f| match f.to_lowercase().as_str() {
            "pretty" => "pretty",
            "compact" => "compact",
            _ => "json",
        })
        .unwrap_or("json")
}

/// Initialize logging from the environment.
///
/// Subsequent calls are no-ops. Nothing is installed unless `SIDELOAD_DEBUG`
/// or `SIDELOAD_LOG_LEVEL` is set.
pub fn init() {
    if !is_debug_enabled() && env::var("SIDELOAD_LOG_LEVEL").is_err() {
        return;
    }
    init_with(get_log_level(), get_log_format());
}

/// Initialize logging with an explicit level and format.
///
/// Without the `tracing-subscriber` feature this does nothing and the host
/// application is expected to install its own subscriber.
pub fn init_with(level: &str, format: &str) {
    INIT.call_once(|| {
        #[cfg(feature = "tracing-subscriber")]
        {
            use tracing_subscriber::{EnvFilter, fmt, prelude::*};

            let level = parse_level(level).unwrap_or("warn");
            let filter = EnvFilter::try_new(format!(
                "sideload={},sideload_render={},sideload_schema={},sideload_cli={}",
                level, level, level, level
            ))
            .unwrap_or_else(|_| EnvFilter::new("warn"));

            match format {
                "json" => {
                    tracing_subscriber::registry()
                        .with(filter)
                        .with(fmt::layer().json().with_writer(std::io::stderr))
                        .init();
                }
                "compact" => {
                    tracing_subscriber::registry()
                        .with(filter)
                        .with(fmt::layer().compact().with_writer(std::io::stderr))
                        .init();
                }
                _ => {
                    tracing_subscriber::registry()
                        .with(filter)
                        .with(fmt::layer().pretty().with_writer(std::io::stderr))
                        .init();
                }
            }

            tracing::info!(level = level, format = format, "sideload logging initialized");
        }

        #[cfg(not(feature = "tracing-subscriber"))]
        {
            let _ = (level, format);
        }
    });
}

/// Macro for conditional debug logging.
///
/// Only logs if `SIDELOAD_DEBUG` is enabled at runtime.
#[macro_export]
macro_rules! sideload_debug {
    ($($arg:tt)*) => {
        if $crate::logging::is_debug_enabled() {
            tracing::debug!($($arg)*);
        }
    };
}

/// Macro for conditional trace logging.
#[macro_export]
macro_rules! sideload_trace {
    ($($arg:tt)*) => {
        if $crate::logging::is_debug_enabled() {
            tracing::trace!($($arg)*);
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("DEBUG"), Some("debug"));
        assert_eq!(parse_level("warn"), Some("warn"));
        assert_eq!(parse_level("verbose"), None);
    }

    #[test]
    fn test_log_level_default() {
        // SAFETY: Test runs in isolation
        unsafe {
            env::remove_var("SIDELOAD_DEBUG");
            env::remove_var("SIDELOAD_LOG_LEVEL");
        }
        assert!(!is_debug_enabled());
        assert_eq!(get_log_level(), "warn");
    }
}
