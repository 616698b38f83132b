//! Rule schema construction and definition-time checks

use std::sync::Arc;

use crate::observability::Event;

use super::errors::{RuleViolation, SchemaError, SchemaResult, ViolationKind};
use super::types::{DefaultProvider, FieldSpec, Rule, RuleSchema};
use super::validator::check_value;

/// Collects field declarations and produces an immutable [`RuleSchema`].
#[derive(Debug)]
pub struct RuleSchemaBuilder {
    name: String,
    parent: Option<Arc<RuleSchema>>,
    fields: Vec<FieldSpec>,
}

impl RuleSchemaBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent: None,
            fields: Vec::new(),
        }
    }

    /// Inherit every field of `parent`. Redeclared fields replace the
    /// inherited declaration in place.
    pub fn extends(mut self, parent: &Arc<RuleSchema>) -> Self {
        self.parent = Some(Arc::clone(parent));
        self
    }

    pub fn field(mut self, spec: FieldSpec) -> Self {
        self.fields.push(spec);
        self
    }

    pub fn fields(mut self, specs: impl IntoIterator<Item = FieldSpec>) -> Self {
        self.fields.extend(specs);
        self
    }

    /// Checks every field and builds the schema.
    ///
    /// All rejected fields are reported together.
    pub fn build(self) -> SchemaResult<Arc<RuleSchema>> {
        let RuleSchemaBuilder { name, parent, fields } = self;

        for (i, spec) in fields.iter().enumerate() {
            if fields[..i].iter().any(|f| f.name == spec.name) {
                return Err(SchemaError::duplicate_field(&name, &spec.name));
            }
        }

        let mut effective: Vec<FieldSpec> = parent
            .as_ref()
            .map(|p| p.fields().to_vec())
            .unwrap_or_default();
        for spec in fields {
            match effective.iter_mut().find(|f| f.name == spec.name) {
                Some(slot) => *slot = spec,
                None => effective.push(spec),
            }
        }

        let violations: Vec<RuleViolation> = effective.iter().filter_map(check_field).collect();
        if !violations.is_empty() {
            tracing::warn!(
                event = %Event::SchemaRejected,
                schema = %name,
                violations = violations.len(),
                "schema rejected"
            );
            return Err(SchemaError::invalid_rules(name, violations));
        }

        tracing::debug!(
            event = %Event::SchemaBuilt,
            schema = %name,
            extends = parent.as_ref().map(|p| p.name()).unwrap_or("-"),
            fields = effective.len(),
            "schema built"
        );

        Ok(Arc::new(RuleSchema {
            name,
            parent,
            fields: effective,
        }))
    }
}

fn check_field(spec: &FieldSpec) -> Option<RuleViolation> {
    let declared = spec.field_type.container_kind();
    let violation = |kind| Some(RuleViolation::new(&spec.name, kind));

    match spec.rule {
        Rule::DoNotInherit if !spec.default.is_concrete() => {
            return violation(ViolationKind::DoNotInheritWithoutDefault);
        }
        Rule::Accumulate => {
            let Some(expected) = declared else {
                return violation(ViolationKind::AccumulateNotContainer {
                    found: spec.field_type.type_name(),
                });
            };
            // A literal container would be shared by every class
            match spec.default {
                DefaultProvider::Factory(found) if found == expected => {}
                DefaultProvider::Factory(found) => {
                    return violation(ViolationKind::FactoryKindMismatch {
                        expected: Some(expected),
                        found,
                    });
                }
                _ => return violation(ViolationKind::AccumulateWithoutFactory),
            }
        }
        _ => {}
    }

    match &spec.default {
        DefaultProvider::Factory(found) if declared != Some(*found) => {
            violation(ViolationKind::FactoryKindMismatch {
                expected: declared,
                found: *found,
            })
        }
        DefaultProvider::Value(value) => check_value(&spec.field_type, value, &spec.name)
            .err()
            .and_then(|details| violation(ViolationKind::InvalidDefault(details))),
        _ => None,
    }
}
