//! Sparse meta-object instances
//!
//! A meta-object holds only the fields that were explicitly supplied.
//! Everything else is filled in by resolution, so "explicit" is simply
//! "present in the mapping".

use std::sync::Arc;

use serde_json::{Map, Value};

use crate::schema::{
    json_type_name, MetaValidator, RuleSchema, SchemaError, SchemaResult, ValidationDetails,
};

use super::snapshot::OverrideSnapshot;

/// A validated, sparse instance of a rule schema.
#[derive(Debug, Clone)]
pub struct MetaObject {
    schema: Arc<RuleSchema>,
    explicit: Map<String, Value>,
}

impl MetaObject {
    /// Creates a meta-object from the explicitly supplied fields.
    ///
    /// # Errors
    ///
    /// - META_UNKNOWN_FIELD if a key is not declared by `schema`
    /// - META_VALIDATION_FAILED if a value does not match its field type
    pub fn new(schema: &Arc<RuleSchema>, explicit: Map<String, Value>) -> SchemaResult<Self> {
        MetaValidator::new(schema).validate_partial(&explicit)?;
        Ok(Self {
            schema: Arc::clone(schema),
            explicit,
        })
    }

    /// Creates a meta-object from a JSON object.
    pub fn from_value(schema: &Arc<RuleSchema>, value: Value) -> SchemaResult<Self> {
        match value {
            Value::Object(explicit) => Self::new(schema, explicit),
            other => Err(SchemaError::validation_failed(
                schema.name(),
                ValidationDetails::type_mismatch("$root", "object", json_type_name(&other)),
            )),
        }
    }

    /// A meta-object that sets nothing explicitly.
    pub fn empty(schema: &Arc<RuleSchema>) -> Self {
        Self {
            schema: Arc::clone(schema),
            explicit: Map::new(),
        }
    }

    pub fn builder(schema: &Arc<RuleSchema>) -> MetaObjectBuilder {
        MetaObjectBuilder {
            schema: Arc::clone(schema),
            explicit: Map::new(),
        }
    }

    pub fn schema(&self) -> &Arc<RuleSchema> {
        &self.schema
    }

    pub fn is_explicit(&self, field: &str) -> bool {
        self.explicit.contains_key(field)
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.explicit.get(field)
    }

    /// Captures which fields were supplied, for resolution.
    pub fn snapshot(&self) -> OverrideSnapshot {
        OverrideSnapshot::new(self.schema.name(), self.explicit.clone())
    }

    pub fn explicit_fields(&self) -> impl Iterator<Item = &str> {
        self.explicit.keys().map(String::as_str)
    }
}

/// Field-by-field construction of a [`MetaObject`].
#[derive(Debug)]
pub struct MetaObjectBuilder {
    schema: Arc<RuleSchema>,
    explicit: Map<String, Value>,
}

impl MetaObjectBuilder {
    pub fn set(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.explicit.insert(field.into(), value.into());
        self
    }

    pub fn build(self) -> SchemaResult<MetaObject> {
        MetaObject::new(&self.schema, self.explicit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{FieldSpec, FieldType, SchemaErrorCode};
    use serde_json::json;

    fn sample_schema() -> Arc<RuleSchema> {
        RuleSchema::builder("AnimalMeta")
            .field(FieldSpec::do_not_inherit("abstract", FieldType::Bool, false))
            .field(FieldSpec::accumulate("things", FieldType::sequence(FieldType::String)))
            .field(FieldSpec::inherited("number", FieldType::Int))
            .build()
            .unwrap()
    }

    #[test]
    fn test_records_explicit_fields() {
        let schema = sample_schema();

        let empty = MetaObject::empty(&schema);
        assert_eq!(empty.explicit_fields().count(), 0);

        let meta = MetaObject::builder(&schema).set("number", 1).build().unwrap();
        assert!(meta.is_explicit("number"));
        assert!(!meta.is_explicit("abstract"));
    }

    #[test]
    fn test_value_equal_to_default_is_still_explicit() {
        let schema = sample_schema();
        let meta = MetaObject::builder(&schema).set("abstract", false).build().unwrap();

        let snapshot = meta.snapshot();
        assert!(snapshot.is_explicit("abstract"));
        assert_eq!(snapshot.value_of("abstract"), Some(&json!(false)));
        assert_eq!(snapshot.schema_name(), "AnimalMeta");
    }

    #[test]
    fn test_from_value_requires_object() {
        let schema = sample_schema();
        let err = MetaObject::from_value(&schema, json!([1, 2])).unwrap_err();
        assert_eq!(err.details().unwrap().field, "$root");
    }

    #[test]
    fn test_undeclared_field_rejected() {
        let schema = sample_schema();
        let err = MetaObject::from_value(&schema, json!({"legs": 4})).unwrap_err();
        assert_eq!(err.code(), SchemaErrorCode::UnknownField);
    }

    #[test]
    fn test_wrong_type_rejected() {
        let schema = sample_schema();
        let err = MetaObject::builder(&schema)
            .set("things", json!(["a", 1]))
            .build()
            .unwrap_err();
        assert_eq!(err.code(), SchemaErrorCode::ValidationFailed);
        assert_eq!(err.details().unwrap().field, "things[1]");
    }
}
