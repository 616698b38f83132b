//! Final, immutable per-class meta values

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::schema::{RuleSchema, SchemaError, SchemaResult, ValidationDetails};

use super::object::MetaObject;

/// The effective meta of one class: every schema field, in schema order.
#[derive(Debug, Clone)]
pub struct ResolvedMeta {
    schema: Arc<RuleSchema>,
    values: Vec<(String, Value)>,
}

impl ResolvedMeta {
    pub(crate) fn new(schema: Arc<RuleSchema>, values: Vec<(String, Value)>) -> Self {
        Self { schema, values }
    }

    pub fn schema(&self) -> &Arc<RuleSchema> {
        &self.schema
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.values
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, value)| value)
    }

    /// Deserializes one field into `T`.
    pub fn get_as<T: DeserializeOwned>(&self, field: &str) -> SchemaResult<T> {
        let value = self
            .get(field)
            .ok_or_else(|| SchemaError::unknown_field(self.schema.name(), field))?;
        serde_json::from_value(value.clone()).map_err(|e| {
            SchemaError::validation_failed(
                self.schema.name(),
                ValidationDetails::new(field, std::any::type_name::<T>(), e.to_string()),
            )
        })
    }

    /// Deserializes the whole meta into a typed struct.
    pub fn deserialize<T: DeserializeOwned>(&self) -> SchemaResult<T> {
        serde_json::from_value(self.to_value()).map_err(|e| {
            SchemaError::validation_failed(
                self.schema.name(),
                ValidationDetails::new("$root", std::any::type_name::<T>(), e.to_string()),
            )
        })
    }

    /// Fields and values in schema order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// JSON object with every field.
    pub fn to_value(&self) -> Value {
        Value::Object(self.to_map())
    }

    /// A meta-object with every field explicitly set to its resolved value.
    pub fn to_meta_object(&self) -> SchemaResult<MetaObject> {
        MetaObject::new(&self.schema, self.to_map())
    }

    fn to_map(&self) -> Map<String, Value> {
        self.values
            .iter()
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect()
    }
}

impl PartialEq for ResolvedMeta {
    fn eq(&self, other: &Self) -> bool {
        self.schema.same_type(&other.schema) && self.values == other.values
    }
}
