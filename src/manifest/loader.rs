//! Manifest loading and application
//!
//! - Reads a single JSON file
//! - Defines every schema in declaration order
//! - Registers every class in declaration order
//! - The first failure aborts the load; nothing partial is returned

use std::fs;
use std::path::Path;

use crate::hierarchy::{ClassDef, ClassRegistry};
use crate::meta::MetaObject;
use crate::observability::Event;
use crate::schema::SchemaCatalog;

use super::errors::{ManifestError, ManifestResult};
use super::types::{ClassDecl, Manifest};

/// Schemas and classes built from a manifest.
#[derive(Debug)]
pub struct LoadedManifest {
    pub catalog: SchemaCatalog,
    pub registry: ClassRegistry,
}

impl Manifest {
    /// Reads a manifest file.
    pub fn load(path: &Path) -> ManifestResult<Self> {
        let content = fs::read_to_string(path).map_err(|source| ManifestError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&content).map_err(|source| ManifestError::Json {
            origin: path.display().to_string(),
            source,
        })
    }

    /// Parses a manifest held in memory.
    pub fn from_json(content: &str) -> ManifestResult<Self> {
        serde_json::from_str(content).map_err(|source| ManifestError::Json {
            origin: "<in-memory>".to_string(),
            source,
        })
    }

    /// Builds every schema and registers every class.
    pub fn build(&self) -> ManifestResult<LoadedManifest> {
        let mut catalog = SchemaCatalog::new();
        for def in &self.schemas {
            catalog.define(def)?;
        }

        let mut registry = ClassRegistry::with_config(self.config.clone());
        for decl in &self.classes {
            registry.register(class_def(&catalog, decl)?)?;
        }

        tracing::info!(
            event = %Event::ManifestLoaded,
            schemas = catalog.len(),
            classes = registry.len(),
            participating = registry.classes().filter(|c| c.participates()).count(),
            "manifest loaded"
        );

        Ok(LoadedManifest { catalog, registry })
    }
}

/// Loads and applies a manifest file in one step.
pub fn load_manifest(path: &Path) -> ManifestResult<LoadedManifest> {
    Manifest::load(path)?.build()
}

fn class_def(catalog: &SchemaCatalog, decl: &ClassDecl) -> ManifestResult<ClassDef> {
    let lookup = |schema: &str| {
        catalog.get(schema).ok_or_else(|| ManifestError::UnknownSchema {
            class: decl.name.clone(),
            schema: schema.to_string(),
        })
    };

    let mut def = ClassDef::new(&decl.name);
    if let Some(parent) = &decl.extends {
        def = def.extends(parent);
    }
    if let Some(schema) = &decl.participates {
        def = def.participates(lookup(schema)?);
    }
    if let Some(meta) = &decl.meta {
        let schema = lookup(&meta.schema)?;
        def = def.with_meta(MetaObject::new(schema, meta.values.clone())?);
    }
    Ok(def)
}
