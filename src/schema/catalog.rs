//! In-memory registry of built rule schemas
//!
//! - One entry per schema name
//! - Registered schemas are immutable; re-registering a name fails
//! - `extends` references resolve against earlier registrations only

use std::collections::BTreeMap;
use std::sync::Arc;

use super::errors::{SchemaError, SchemaResult};
use super::types::{RuleSchema, SchemaDef};

/// Named collection of rule schemas.
#[derive(Debug, Default)]
pub struct SchemaCatalog {
    schemas: BTreeMap<String, Arc<RuleSchema>>,
}

impl SchemaCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an already built schema.
    pub fn register(&mut self, schema: Arc<RuleSchema>) -> SchemaResult<()> {
        if self.schemas.contains_key(schema.name()) {
            return Err(SchemaError::schema_immutable(schema.name()));
        }
        self.schemas.insert(schema.name().to_string(), schema);
        Ok(())
    }

    /// Builds a schema from its declaration and registers it.
    ///
    /// The parent named by `extends` must already be registered.
    pub fn define(&mut self, def: &SchemaDef) -> SchemaResult<Arc<RuleSchema>> {
        if self.schemas.contains_key(&def.name) {
            return Err(SchemaError::schema_immutable(&def.name));
        }

        let mut builder = RuleSchema::builder(&def.name).fields(def.fields.iter().cloned());
        if let Some(parent) = &def.extends {
            let parent = self
                .get(parent)
                .ok_or_else(|| SchemaError::unknown_schema(parent))?;
            builder = builder.extends(parent);
        }

        let schema = builder.build()?;
        self.register(Arc::clone(&schema))?;
        Ok(schema)
    }

    pub fn get(&self, name: &str) -> Option<&Arc<RuleSchema>> {
        self.schemas.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.schemas.contains_key(name)
    }

    /// Returns all schemas ordered by name.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<RuleSchema>> {
        self.schemas.values()
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{FieldSpec, FieldType, SchemaErrorCode};

    fn sample_def(name: &str, extends: Option<&str>) -> SchemaDef {
        SchemaDef {
            name: name.to_string(),
            extends: extends.map(str::to_string),
            fields: vec![FieldSpec::inherited("number", FieldType::Int)],
        }
    }

    #[test]
    fn test_define_and_get() {
        let mut catalog = SchemaCatalog::new();
        catalog.define(&sample_def("AnimalMeta", None)).unwrap();

        let schema = catalog.get("AnimalMeta").unwrap();
        assert_eq!(schema.name(), "AnimalMeta");
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_schema_immutability() {
        let mut catalog = SchemaCatalog::new();
        catalog.define(&sample_def("AnimalMeta", None)).unwrap();

        let err = catalog.define(&sample_def("AnimalMeta", None)).unwrap_err();
        assert_eq!(err.code().code(), "META_SCHEMA_IMMUTABLE");
    }

    #[test]
    fn test_extends_resolves_registered_parent() {
        let mut catalog = SchemaCatalog::new();
        let base = catalog.define(&sample_def("BaseMeta", None)).unwrap();
        let child = catalog.define(&sample_def("ChildMeta", Some("BaseMeta"))).unwrap();

        assert!(child.is_subtype_of(&base));
    }

    #[test]
    fn test_unknown_parent_rejected() {
        let mut catalog = SchemaCatalog::new();
        let err = catalog.define(&sample_def("ChildMeta", Some("Missing"))).unwrap_err();

        assert_eq!(err.code(), SchemaErrorCode::UnknownSchema);
        assert!(catalog.is_empty());
    }
}
