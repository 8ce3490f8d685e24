//! Integration tests for the sideload CLI

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const BLOG_CONFIG: &str = r#"
[[resources]]
name = "Article"
attributes = ["title"]

[resources.relationships.author]
model = "Person"
include = "Person"

[resources.relationships.comments]
model = "Comment"
many = true
include = "Comment"

[[resources]]
name = "Comment"
attributes = ["body"]

[resources.relationships.author]
model = "Person"
include = "Person"

[[resources]]
name = "Person"
attributes = ["first_name", "last_name"]
"#;

const ARTICLE: &str = r#"{
    "id": 1,
    "title": "Hello",
    "author": 5,
    "comments": [
        {"id": 10, "body": "First", "author": {"id": 5, "first_name": "Molly", "last_name": "Davis"}},
        {"id": 11, "body": "Second", "author": {"id": 5, "first_name": "Molly", "last_name": "Davis"}}
    ]
}"#;

/// Get the sideload binary
#[allow(deprecated)]
fn sideload_cmd() -> Command {
    Command::cargo_bin("sideload").unwrap()
}

fn project() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("sideload.toml"), BLOG_CONFIG).unwrap();
    fs::write(temp_dir.path().join("article.json"), ARTICLE).unwrap();
    temp_dir
}

#[test]
fn test_help_command() {
    sideload_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Sideload CLI"))
        .stdout(predicate::str::contains("Usage: sideload <COMMAND>"))
        .stdout(predicate::str::contains("render"))
        .stdout(predicate::str::contains("validate"));
}

#[test]
fn test_version_command() {
    sideload_cmd()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("Version"))
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_render_help() {
    sideload_cmd()
        .args(["render", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--resource"))
        .stdout(predicate::str::contains("--include"))
        .stdout(predicate::str::contains("--fixtures"));
}

#[test]
fn test_validate_valid_config() {
    let temp_dir = project();

    sideload_cmd()
        .current_dir(temp_dir.path())
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration is valid"))
        .stdout(predicate::str::contains("Descriptors"));
}

#[test]
fn test_validate_reports_unknown_descriptor() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("broken.toml");
    fs::write(
        &config_path,
        r#"
[[resources]]
name = "Comment"

[resources.relationships.author]
model = "Person"
include = "Persn"
"#,
    )
    .unwrap();

    sideload_cmd()
        .args(["validate", "--config"])
        .arg(&config_path)
        .assert()
        .failure()
        .stdout(predicate::str::contains("Persn"))
        .stderr(predicate::str::contains("validation errors"));
}

#[test]
fn test_validate_missing_config() {
    let temp_dir = TempDir::new().unwrap();

    sideload_cmd()
        .current_dir(temp_dir.path())
        .arg("validate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Config file not found"));
}

#[test]
fn test_render_without_includes() {
    let temp_dir = project();

    sideload_cmd()
        .current_dir(temp_dir.path())
        .args(["render", "article.json", "--resource", "Article"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""type":"article""#))
        .stdout(predicate::str::contains("included").not());
}

#[test]
fn test_render_with_nested_includes() {
    let temp_dir = project();

    let output = sideload_cmd()
        .current_dir(temp_dir.path())
        .args([
            "render",
            "article.json",
            "--resource",
            "Article",
            "--include",
            "comments,comments.author",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let document: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let included = document["included"].as_array().unwrap();
    assert_eq!(included.len(), 3);
    let people = included.iter().filter(|r| r["type"] == "person").count();
    assert_eq!(people, 1);
}

#[test]
fn test_render_from_stdin_with_fixtures() {
    let temp_dir = project();
    fs::write(
        temp_dir.path().join("fixtures.json"),
        r#"{"Person": [{"id": 5, "first_name": "Molly", "last_name": "Davis"}]}"#,
    )
    .unwrap();

    sideload_cmd()
        .current_dir(temp_dir.path())
        .args([
            "render",
            "-",
            "--resource",
            "Article",
            "--include",
            "author",
            "--fixtures",
            "fixtures.json",
        ])
        .write_stdin(r#"{"id": 1, "title": "Hello", "author": 5, "comments": []}"#)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""first-name":"Molly""#));
}

#[test]
fn test_render_unknown_resource() {
    let temp_dir = project();

    sideload_cmd()
        .current_dir(temp_dir.path())
        .args(["render", "article.json", "--resource", "Missing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Missing"));
}

#[test]
fn test_render_invalid_json() {
    let temp_dir = project();

    sideload_cmd()
        .current_dir(temp_dir.path())
        .args(["render", "-", "--resource", "Article"])
        .write_stdin("{not json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse JSON"));
}
