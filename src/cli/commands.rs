//! CLI command implementations
//!
//! Every command loads the manifest, builds all schemas and registers all
//! classes before printing anything, so a broken manifest never produces
//! partial output.

use std::path::Path;

use serde_json::{json, Map, Value};

use crate::manifest::{load_manifest, LoadedManifest};
use crate::observability;

use super::args::{Cli, Command};
use super::errors::{CliError, CliResult};
use super::io::{write_error, write_response};

/// Main CLI entry point
///
/// Parses arguments, installs logging and dispatches to the command.
/// Failures are also reported as a JSON error object on stdout.
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    observability::init_logging(cli.verbose);

    let result = run_command(cli.command);
    if let Err(e) = &result {
        write_error(e.code_str(), e.message())?;
    }
    result
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Resolve { manifest, class } => resolve(&manifest, class.as_deref()),
        Command::Check { manifest } => check(&manifest),
        Command::Schema { manifest, name } => schema(&manifest, &name),
    }
}

/// Print resolved metas, keyed by class name
pub fn resolve(manifest: &Path, class: Option<&str>) -> CliResult<()> {
    let loaded = load_manifest(manifest)?;
    write_response(resolved_metas(&loaded, class)?)
}

/// Print a summary of a manifest that loaded cleanly
pub fn check(manifest: &Path) -> CliResult<()> {
    let loaded = load_manifest(manifest)?;
    write_response(summary(&loaded))
}

/// Print the effective rules of one schema
pub fn schema(manifest: &Path, name: &str) -> CliResult<()> {
    let loaded = load_manifest(manifest)?;
    write_response(schema_rules(&loaded, name)?)
}

fn resolved_metas(loaded: &LoadedManifest, class: Option<&str>) -> CliResult<Value> {
    let registry = &loaded.registry;
    let mut metas = Map::new();

    match class {
        Some(name) => {
            if !registry.contains(name) {
                return Err(CliError::unknown_class(name));
            }
            let meta = registry
                .meta(name)
                .ok_or_else(|| CliError::not_participating(name))?;
            metas.insert(name.to_string(), meta.to_value());
        }
        None => {
            for node in registry.classes() {
                if let Some(meta) = node.resolved() {
                    metas.insert(node.name().to_string(), meta.to_value());
                }
            }
        }
    }

    Ok(Value::Object(metas))
}

fn summary(loaded: &LoadedManifest) -> Value {
    let registry = &loaded.registry;
    let participating: Vec<&str> = registry
        .classes()
        .filter(|node| node.participates())
        .map(|node| node.name())
        .collect();

    json!({
        "schemas": loaded.catalog.len(),
        "classes": registry.len(),
        "participating": participating,
    })
}

fn schema_rules(loaded: &LoadedManifest, name: &str) -> CliResult<Value> {
    let schema = loaded
        .catalog
        .get(name)
        .ok_or_else(|| CliError::unknown_schema(name))?;

    let fields: Vec<Value> = schema
        .fields()
        .iter()
        .map(|field| {
            json!({
                "name": field.name,
                "type": field.field_type,
                "rule": field.rule.as_str(),
                "default": field.default,
            })
        })
        .collect();

    Ok(json!({
        "name": schema.name(),
        "extends": schema.parent().map(|p| p.name()),
        "fields": fields,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::Manifest;

    fn loaded() -> LoadedManifest {
        Manifest::from_json(
            r#"{
                "schemas": [{
                    "name": "AnimalMeta",
                    "fields": [
                        {"name": "abstract", "type": {"type": "bool"}, "rule": "do_not_inherit", "default": {"value": false}},
                        {"name": "number", "type": {"type": "int"}, "default": "as_default"}
                    ]
                }],
                "classes": [
                    {"name": "Root"},
                    {"name": "Entity", "extends": "Root", "participates": "AnimalMeta",
                     "meta": {"schema": "AnimalMeta", "values": {"abstract": true, "number": 1}}},
                    {"name": "Animal", "extends": "Entity"}
                ]
            }"#,
        )
        .unwrap()
        .build()
        .unwrap()
    }

    #[test]
    fn test_resolved_metas_all() {
        let data = resolved_metas(&loaded(), None).unwrap();
        assert_eq!(
            data,
            json!({
                "Entity": {"abstract": true, "number": 1},
                "Animal": {"abstract": false, "number": 1},
            })
        );
    }

    #[test]
    fn test_resolved_metas_single_class() {
        let loaded = loaded();

        let data = resolved_metas(&loaded, Some("Animal")).unwrap();
        assert_eq!(data, json!({"Animal": {"abstract": false, "number": 1}}));

        let err = resolved_metas(&loaded, Some("Root")).unwrap_err();
        assert_eq!(err.code_str(), "META_NOT_PARTICIPATING");

        let err = resolved_metas(&loaded, Some("Plant")).unwrap_err();
        assert_eq!(err.code_str(), "META_CLI_UNKNOWN_CLASS");
    }

    #[test]
    fn test_summary() {
        assert_eq!(
            summary(&loaded()),
            json!({"schemas": 1, "classes": 3, "participating": ["Entity", "Animal"]})
        );
    }

    #[test]
    fn test_schema_rules() {
        let data = schema_rules(&loaded(), "AnimalMeta").unwrap();

        assert_eq!(data["name"], "AnimalMeta");
        assert_eq!(data["extends"], Value::Null);
        assert_eq!(data["fields"][0]["rule"], "DO_NOT_INHERIT");
        assert_eq!(data["fields"][0]["default"], json!({"value": false}));
        assert_eq!(data["fields"][1]["default"], json!("as_default"));

        let err = schema_rules(&loaded(), "PlantMeta").unwrap_err();
        assert_eq!(err.code_str(), "META_UNKNOWN_SCHEMA");
    }
}
