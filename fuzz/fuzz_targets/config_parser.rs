//! Fuzz target for the sideload config parser.
//!
//! This target feeds arbitrary TOML strings to the config parser and
//! validates whatever parses.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_config_parser
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;
use sideload_schema::SideloadConfig;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        // Parsing and validation should never panic, only return errors
        if let Ok(config) = input.parse::<SideloadConfig>() {
            let _ = config.schema();
        }
    }
});
