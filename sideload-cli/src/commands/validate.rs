//! `sideload validate` command - Validate resource descriptors.

use sideload_render::{ExtractorRegistry, RenderConfig};
use sideload_schema::{Schema, SchemaError, SideloadConfig};

use crate::cli::ValidateArgs;
use crate::config;
use crate::error::{CliError, CliResult};
use crate::output::{self, success, warn};

/// Run the validate command
pub async fn run(args: ValidateArgs) -> CliResult<()> {
    output::header("Validate Descriptors");

    let config_path = config::config_path(args.config)?;
    output::kv("Config", &config_path.display().to_string());
    output::newline();

    output::step(1, 3, "Parsing configuration...");
    let config = config::load(&config_path)?;

    output::step(2, 3, "Resolving descriptors...");
    let schema = match config.schema() {
        Ok(schema) => schema,
        Err(SchemaError::ValidationFailed { errors, .. }) => {
            output::newline();
            output::error("Descriptor validation failed!");
            output::newline();
            output::section("Errors");
            for error in &errors {
                output::list_item(&error.to_string());
            }
            return Err(CliError::Validation(format!(
                "Found {} validation errors",
                errors.len()
            )));
        }
        Err(other) => return Err(other.into()),
    };

    output::step(3, 3, "Checking render settings...");
    let render_config = RenderConfig::from_config(&config, &ExtractorRegistry::with_builtins())?;
    let warnings = untyped_relationships(&schema);

    output::newline();
    if warnings.is_empty() {
        success("Configuration is valid!");
    } else {
        success("Configuration is valid with warnings:");
        output::newline();
        for warning in &warnings {
            warn(warning);
        }
    }

    output::newline();
    print_summary(&config, &schema, &render_config);

    Ok(())
}

/// Relationships whose type can only come from the related objects.
fn untyped_relationships(schema: &Schema) -> Vec<String> {
    schema
        .descriptors()
        .flat_map(|descriptor| {
            descriptor
                .relationships()
                .filter(move |spec| {
                    let declared = spec.model.is_some() && !descriptor.is_read_only(&spec.name);
                    !declared && descriptor.mapped_model(&spec.name).is_none()
                })
                .map(move |spec| {
                    format!(
                        "Relationship '{}.{}' has no static type; add a model_map entry",
                        descriptor.name(),
                        spec.name
                    )
                })
        })
        .collect()
}

fn print_summary(config: &SideloadConfig, schema: &Schema, render_config: &RenderConfig) {
    output::section("Descriptor Summary");
    output::kv("Descriptors", &schema.len().to_string());

    let attributes: usize = schema
        .descriptors()
        .map(|d| d.attribute_names().count())
        .sum();
    let relationships: usize = schema.descriptors().map(|d| d.relationships().count()).sum();
    let sideloadable: usize = schema
        .descriptors()
        .map(|d| {
            d.relationships()
                .filter(|spec| d.sideload_target(&spec.name).is_some())
                .count()
        })
        .sum();
    let polymorphic = schema.descriptors().filter(|d| d.is_polymorphic()).count();

    output::kv("Attributes", &attributes.to_string());
    output::kv("Relationships", &relationships.to_string());
    output::kv("Sideloadable", &sideloadable.to_string());
    output::kv("Polymorphic", &polymorphic.to_string());

    output::newline();
    output::section("Render Settings");
    output::kv("Field case", config.naming.field_case.as_str());
    output::kv("Type resolver", &format!("{:?}", render_config.type_resolver));
    output::kv("Id field", &render_config.id_field);
    output::kv("Type key", &render_config.type_key);
}
