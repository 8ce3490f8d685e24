//! Fuzz target for include path parsing and matching.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_include_paths
//! ```

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use sideload_render::IncludePaths;

#[derive(Debug, Arbitrary)]
struct Input<'a> {
    raw: &'a str,
    candidate: &'a str,
}

fuzz_target!(|input: Input<'_>| {
    let paths = IncludePaths::parse(input.raw);

    for path in paths.iter() {
        assert!(!path.is_empty());
        assert_eq!(path, path.trim());
        assert!(paths.is_directly_included(path));
    }

    // A path never continues below itself.
    if paths.has_descendant_included(input.candidate) {
        assert!(paths.iter().any(|p| p.len() > input.candidate.len()));
    }
    assert_eq!(
        paths.touches(input.candidate),
        paths.is_directly_included(input.candidate) || paths.has_descendant_included(input.candidate)
    );
});
