//! Integration tests for configuration parsing and handling.
//!
//! These tests verify that `sideload.toml` files produce the descriptors and
//! render settings they declare.

use std::io::Write;
use std::sync::Arc;

use serde_json::json;
use sideload::prelude::*;
use sideload::schema::config::CONFIG_FILE_NAME;
use sideload::schema::{FieldCase, SchemaError};

const BLOG: &str = r#"
    [naming]
    pluralize_types = false

    [render]
    id_field = "pk"

    [[resources]]
    name = "Article"
    attributes = ["title"]

    [resources.relationships.author]
    model = "Person"
    include = "Person"

    [[resources]]
    name = "Person"
    attributes = ["first_name", "last_name"]
"#;

/// Test minimal configuration
#[test]
fn test_config_minimal() {
    let config: SideloadConfig = toml::from_str("").expect("Failed to parse config");
    assert_eq!(config.naming.field_case, FieldCase::Snake);
    assert!(config.resources.is_empty());
    assert!(config.schema().unwrap().is_empty());
}

/// Test full configuration with all options
#[test]
fn test_config_full() {
    let config_str = r#"
        [naming]
        field_case = "camel"
        pluralize_types = true
        type_extractor = "model"

        [render]
        id_field = "uuid"
        type_key = "kind"

        [debug]
        log_level = "debug"
        log_format = "pretty"

        [[resources]]
        name = "Organization"
        attributes = ["name"]

        [resources.variants]
        Company = "Company"

        [[resources]]
        name = "Company"
        attributes = ["name", "description"]
    "#;

    let config: SideloadConfig = config_str.parse().expect("Failed to parse config");
    assert_eq!(config.naming.field_case, FieldCase::Camel);
    assert_eq!(config.naming.type_extractor.as_deref(), Some("model"));
    assert_eq!(config.render.type_key, "kind");
    assert_eq!(config.debug.log_level.as_deref(), Some("debug"));

    let schema = config.schema().unwrap();
    assert!(schema.descriptor("Organization").unwrap().is_polymorphic());

    let render = RenderConfig::from_config(&config, &ExtractorRegistry::with_builtins()).unwrap();
    assert_eq!(render.resource_type("BlogPost").unwrap(), "BlogPost");
}

/// Test that every validation problem is reported
#[test]
fn test_config_validation_errors() {
    let config: SideloadConfig = r#"
        [[resources]]
        name = "Article"
        read_only = ["summary"]

        [resources.relationships.author]
        model = "Person"
        include = "Person"
    "#
    .parse()
    .unwrap();

    match config.schema() {
        Err(SchemaError::ValidationFailed { count, errors }) => {
            assert_eq!(count, 2);
            assert_eq!(errors.len(), 2);
        }
        other => panic!("Expected ValidationFailed, got {other:?}"),
    }
}

/// Test loading from disk and rendering with the configured id field
#[tokio::test]
async fn test_config_file_drives_rendering() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);
    std::fs::File::create(&path)
        .and_then(|mut file| file.write_all(BLOG.as_bytes()))
        .unwrap();

    let config = SideloadConfig::from_file(&path).unwrap();
    let render = RenderConfig::from_config(&config, &ExtractorRegistry::new()).unwrap();
    let assembler = Assembler::new(Arc::new(config.schema().unwrap()), render);

    let article = json!({
        "pk": 1,
        "title": "Hello",
        "author": {"pk": 5, "first_name": "Molly", "last_name": "Davis"}
    });

    let document = assembler
        .build(&article, "Article", &IncludePaths::parse("author"))
        .await
        .unwrap();
    assert_eq!(document.included()[0].id, "5");
    assert_eq!(document.data.resources()[0].id, "1");
}

/// Test unknown extractor names fail when settings are resolved
#[test]
fn test_config_unknown_extractor() {
    let config: SideloadConfig = "[naming]\ntype_extractor = \"nope\"\n".parse().unwrap();
    let err = RenderConfig::from_config(&config, &ExtractorRegistry::with_builtins()).unwrap_err();
    assert!(matches!(err, RenderError::UnresolvedExtractor { .. }));
}
