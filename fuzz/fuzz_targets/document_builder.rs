//! Fuzz target for compound document assembly.
//!
//! Arbitrary JSON is rendered against a fixed blog schema with every include
//! path requested. Builds may fail but must never panic, and successful
//! documents must keep `included` free of duplicates.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_document_builder
//! ```

#![no_main]

use std::collections::HashSet;
use std::sync::{Arc, OnceLock};

use libfuzzer_sys::fuzz_target;
use sideload_render::{Assembler, IncludePaths, RenderConfig};
use sideload_schema::{DescriptorSet, ResourceDescriptor};

fn assembler() -> &'static Assembler {
    static ASSEMBLER: OnceLock<Assembler> = OnceLock::new();
    ASSEMBLER.get_or_init(|| {
        let schema = DescriptorSet::new()
            .with(
                ResourceDescriptor::new("Article")
                    .attribute("title")
                    .to_one("author", "Person")
                    .to_many("comments", "Comment")
                    .include("author", "Person")
                    .include("comments", "Comment"),
            )
            .with(
                ResourceDescriptor::new("Comment")
                    .attribute("body")
                    .to_one("author", "Person")
                    .include("author", "Person"),
            )
            .with(
                ResourceDescriptor::new("Person")
                    .attributes(["first_name", "last_name"])
                    .to_many("comments", "Comment")
                    .include("comments", "Comment"),
            )
            .validate()
            .unwrap();
        Assembler::new(Arc::new(schema), RenderConfig::new())
    })
}

fuzz_target!(|data: &[u8]| {
    let Ok(value) = serde_json::from_slice::<serde_json::Value>(data) else {
        return;
    };

    let includes = IncludePaths::parse("author,comments.author.comments");
    let result = futures::executor::block_on(assembler().build(&value, "Article", &includes));

    if let Ok(document) = result {
        let mut seen = HashSet::new();
        for resource in document.data.resources() {
            seen.insert(resource.identifier());
        }
        for resource in document.included() {
            assert!(seen.insert(resource.identifier()));
        }
    }
});
