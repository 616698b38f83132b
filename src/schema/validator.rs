//! Value validation for meta-objects
//!
//! Validation semantics:
//! - Every supplied field is declared by the schema
//! - Field types exactly match, no coercion (an int is not a float string)
//! - Nulls only where the type is `optional` or `any`
//! - Set elements are unique
//! - A complete mapping carries every declared field
//!
//! Validation never mutates the values it checks.

use serde_json::{Map, Value};

use super::errors::{SchemaError, SchemaResult, ValidationDetails};
use super::types::{FieldType, RuleSchema};

/// Validates meta-object values against a rule schema.
pub struct MetaValidator<'a> {
    schema: &'a RuleSchema,
}

impl<'a> MetaValidator<'a> {
    pub fn new(schema: &'a RuleSchema) -> Self {
        Self { schema }
    }

    /// Validates one field value.
    ///
    /// # Errors
    ///
    /// - META_UNKNOWN_FIELD if the schema does not declare `field`
    /// - META_VALIDATION_FAILED if the value does not match the declared type
    pub fn validate_field(&self, field: &str, value: &Value) -> SchemaResult<()> {
        let spec = self
            .schema
            .field(field)
            .ok_or_else(|| SchemaError::unknown_field(self.schema.name(), field))?;

        check_value(&spec.field_type, value, field)
            .map_err(|details| SchemaError::validation_failed(self.schema.name(), details))
    }

    /// Validates a sparse mapping: only the supplied fields are checked.
    pub fn validate_partial(&self, values: &Map<String, Value>) -> SchemaResult<()> {
        for (field, value) in values {
            self.validate_field(field, value)?;
        }
        Ok(())
    }

    /// Validates a complete mapping: no extra fields and none missing.
    pub fn validate_complete<'v, I>(&self, entries: I) -> SchemaResult<()>
    where
        I: IntoIterator<Item = (&'v str, &'v Value)>,
    {
        let mut seen = Vec::with_capacity(self.schema.len());
        for (field, value) in entries {
            self.validate_field(field, value)?;
            seen.push(field);
        }

        for name in self.schema.field_names() {
            if !seen.contains(&name) {
                return Err(SchemaError::validation_failed(
                    self.schema.name(),
                    ValidationDetails::missing_field(name),
                ));
            }
        }

        Ok(())
    }
}

/// Checks a value against a field type, reporting the first mismatch.
pub fn check_value(
    expected: &FieldType,
    value: &Value,
    path: &str,
) -> Result<(), ValidationDetails> {
    match expected {
        FieldType::Any => return Ok(()),
        FieldType::Optional { inner } => {
            if value.is_null() {
                return Ok(());
            }
            return check_value(inner, value, path);
        }
        _ => {}
    }

    if value.is_null() {
        return Err(ValidationDetails::null_value(path));
    }

    match expected {
        FieldType::String => expect(value.is_string(), expected, value, path),
        FieldType::Int => expect(value.is_i64() || value.is_u64(), expected, value, path),
        FieldType::Bool => expect(value.is_boolean(), expected, value, path),
        // Integers are acceptable floats
        FieldType::Float => expect(value.is_number(), expected, value, path),
        FieldType::Sequence { element_type } => {
            let items = value
                .as_array()
                .ok_or_else(|| mismatch(expected, value, path))?;
            for (i, item) in items.iter().enumerate() {
                check_value(element_type, item, &format!("{}[{}]", path, i))?;
            }
            Ok(())
        }
        FieldType::Set { element_type } => {
            let items = value
                .as_array()
                .ok_or_else(|| mismatch(expected, value, path))?;
            for (i, item) in items.iter().enumerate() {
                let item_path = format!("{}[{}]", path, i);
                check_value(element_type, item, &item_path)?;
                if items[..i].contains(item) {
                    return Err(ValidationDetails::duplicate_element(item_path));
                }
            }
            Ok(())
        }
        FieldType::Map { value_type } => {
            let entries = value
                .as_object()
                .ok_or_else(|| mismatch(expected, value, path))?;
            for (key, entry) in entries {
                check_value(value_type, entry, &make_path(path, key))?;
            }
            Ok(())
        }
        FieldType::Any | FieldType::Optional { .. } => Ok(()),
    }
}

fn expect(
    ok: bool,
    expected: &FieldType,
    value: &Value,
    path: &str,
) -> Result<(), ValidationDetails> {
    if ok {
        Ok(())
    } else {
        Err(mismatch(expected, value, path))
    }
}

fn mismatch(expected: &FieldType, value: &Value, path: &str) -> ValidationDetails {
    ValidationDetails::type_mismatch(path, expected.type_name(), json_type_name(value))
}

/// Returns the JSON type name for error messages.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) => {
            if n.is_i64() || n.is_u64() {
                "int"
            } else {
                "float"
            }
        }
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Creates a field path from prefix and key.
fn make_path(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", prefix, key)
    }
}
