//! Rule schema type definitions
//!
//! Supported field types:
//! - string, int, bool, float, any
//! - optional: null or the inner type
//! - sequence: ordered array, duplicates allowed
//! - set: array of unique elements
//! - map: object with string keys and a single value type

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Declared type of a meta field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FieldType {
    /// UTF-8 string
    String,
    /// 64-bit signed integer
    Int,
    /// Boolean
    Bool,
    /// 64-bit floating point
    Float,
    /// Any JSON value, unchecked
    Any,
    /// Null or a value of the inner type
    Optional { inner: Box<FieldType> },
    /// Ordered sequence, duplicates allowed
    Sequence { element_type: Box<FieldType> },
    /// Unordered collection of unique elements
    Set { element_type: Box<FieldType> },
    /// String-keyed mapping
    Map { value_type: Box<FieldType> },
}

impl FieldType {
    pub fn sequence(element_type: FieldType) -> Self {
        FieldType::Sequence {
            element_type: Box::new(element_type),
        }
    }

    pub fn set(element_type: FieldType) -> Self {
        FieldType::Set {
            element_type: Box::new(element_type),
        }
    }

    pub fn map(value_type: FieldType) -> Self {
        FieldType::Map {
            value_type: Box::new(value_type),
        }
    }

    pub fn optional(inner: FieldType) -> Self {
        FieldType::Optional {
            inner: Box::new(inner),
        }
    }

    /// Returns the type name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Int => "int",
            FieldType::Bool => "bool",
            FieldType::Float => "float",
            FieldType::Any => "any",
            FieldType::Optional { .. } => "optional",
            FieldType::Sequence { .. } => "sequence",
            FieldType::Set { .. } => "set",
            FieldType::Map { .. } => "map",
        }
    }

    /// Container kind, for types that can be accumulated.
    pub fn container_kind(&self) -> Option<ContainerKind> {
        match self {
            FieldType::Sequence { .. } => Some(ContainerKind::Sequence),
            FieldType::Set { .. } => Some(ContainerKind::Set),
            FieldType::Map { .. } => Some(ContainerKind::Map),
            _ => None,
        }
    }
}

/// Kinds of container a field can accumulate into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContainerKind {
    Sequence,
    Set,
    Map,
}

impl ContainerKind {
    /// Builds a fresh empty container of this kind.
    pub fn empty(&self) -> Value {
        match self {
            ContainerKind::Sequence | ContainerKind::Set => Value::Array(Vec::new()),
            ContainerKind::Map => Value::Object(Map::new()),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ContainerKind::Sequence => "sequence",
            ContainerKind::Set => "set",
            ContainerKind::Map => "map",
        }
    }
}

impl fmt::Display for ContainerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How a field's value flows from a class to its descendants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rule {
    /// Take the own value if set, otherwise the parent's
    #[default]
    InheritOrOverride,
    /// Reset to the default at every level unless set again
    DoNotInherit,
    /// Combine the parent's container with the own entries
    Accumulate,
}

impl Rule {
    pub fn as_str(&self) -> &'static str {
        match self {
            Rule::InheritOrOverride => "INHERIT_OR_OVERRIDE",
            Rule::DoNotInherit => "DO_NOT_INHERIT",
            Rule::Accumulate => "ACCUMULATE",
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Where a field's value comes from when nobody supplied one
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DefaultProvider {
    /// No default; some class in the chain must supply the field
    #[default]
    Required,
    /// Placeholder that lets the field be omitted; must be resolved
    /// to a real value by an ancestor
    AsDefault,
    /// Literal default value
    Value(Value),
    /// Fresh empty container on every call
    Factory(ContainerKind),
}

impl DefaultProvider {
    /// Whether this provider yields a real value.
    pub fn is_concrete(&self) -> bool {
        matches!(self, DefaultProvider::Value(_) | DefaultProvider::Factory(_))
    }

    /// Produces the default value, or `None` for `Required` and `AsDefault`.
    pub fn produce(&self) -> Option<Value> {
        match self {
            DefaultProvider::Value(value) => Some(value.clone()),
            DefaultProvider::Factory(kind) => Some(kind.empty()),
            DefaultProvider::Required | DefaultProvider::AsDefault => None,
        }
    }
}

/// Declaration of a single meta field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(default)]
    pub rule: Rule,
    #[serde(default)]
    pub default: DefaultProvider,
}

impl FieldSpec {
    /// Create an INHERIT_OR_OVERRIDE field with no default
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            rule: Rule::InheritOrOverride,
            default: DefaultProvider::Required,
        }
    }

    /// Create an INHERIT_OR_OVERRIDE field defaulting to the sentinel
    pub fn inherited(name: impl Into<String>, field_type: FieldType) -> Self {
        Self::new(name, field_type).as_default()
    }

    /// Create a DO_NOT_INHERIT field with a literal default
    pub fn do_not_inherit(
        name: impl Into<String>,
        field_type: FieldType,
        default: impl Into<Value>,
    ) -> Self {
        Self::new(name, field_type)
            .with_rule(Rule::DoNotInherit)
            .with_default(default)
    }

    /// Create an ACCUMULATE field backed by an empty-container factory
    pub fn accumulate(name: impl Into<String>, field_type: FieldType) -> Self {
        let default = match field_type.container_kind() {
            Some(kind) => DefaultProvider::Factory(kind),
            None => DefaultProvider::Required,
        };
        Self {
            name: name.into(),
            field_type,
            rule: Rule::Accumulate,
            default,
        }
    }

    pub fn with_rule(mut self, rule: Rule) -> Self {
        self.rule = rule;
        self
    }

    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = DefaultProvider::Value(default.into());
        self
    }

    pub fn with_factory(mut self, kind: ContainerKind) -> Self {
        self.default = DefaultProvider::Factory(kind);
        self
    }

    pub fn as_default(mut self) -> Self {
        self.default = DefaultProvider::AsDefault;
        self
    }
}

/// Serializable schema declaration, as found in manifests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaDef {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extends: Option<String>,
    #[serde(default)]
    pub fields: Vec<FieldSpec>,
}

/// Immutable per-meta-class rule description.
///
/// Schemas are compared by identity, the same way two distinct classes
/// with identical bodies are still different types. Build them once with
/// [`RuleSchema::builder`] and share the returned `Arc`.
#[derive(Debug)]
pub struct RuleSchema {
    pub(crate) name: String,
    pub(crate) parent: Option<Arc<RuleSchema>>,
    pub(crate) fields: Vec<FieldSpec>,
}

impl RuleSchema {
    /// Starts a new schema declaration.
    pub fn builder(name: impl Into<String>) -> super::RuleSchemaBuilder {
        super::RuleSchemaBuilder::new(name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The schema this one extends, if any.
    pub fn parent(&self) -> Option<&Arc<RuleSchema>> {
        self.parent.as_ref()
    }

    /// All fields, inherited ones first, in declaration order.
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Identity comparison.
    pub fn same_type(&self, other: &RuleSchema) -> bool {
        std::ptr::eq(self, other)
    }

    /// True if `self` is `other` or extends it, directly or transitively.
    pub fn is_subtype_of(&self, other: &RuleSchema) -> bool {
        let mut current = Some(self);
        while let Some(schema) = current {
            if schema.same_type(other) {
                return true;
            }
            current = schema.parent.as_deref();
        }
        false
    }

    /// Describes the effective schema, inherited fields included.
    pub fn to_def(&self) -> SchemaDef {
        SchemaDef {
            name: self.name.clone(),
            extends: self.parent.as_ref().map(|p| p.name.clone()),
            fields: self.fields.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_field_type_names() {
        assert_eq!(FieldType::String.type_name(), "string");
        assert_eq!(FieldType::Int.type_name(), "int");
        assert_eq!(FieldType::Bool.type_name(), "bool");
        assert_eq!(FieldType::Float.type_name(), "float");
        assert_eq!(FieldType::sequence(FieldType::Int).type_name(), "sequence");
        assert_eq!(FieldType::set(FieldType::Int).type_name(), "set");
        assert_eq!(FieldType::map(FieldType::Int).type_name(), "map");
    }

    #[test]
    fn test_container_kinds() {
        assert_eq!(
            FieldType::sequence(FieldType::String).container_kind(),
            Some(ContainerKind::Sequence)
        );
        assert_eq!(FieldType::set(FieldType::String).container_kind(), Some(ContainerKind::Set));
        assert_eq!(FieldType::map(FieldType::Any).container_kind(), Some(ContainerKind::Map));
        assert_eq!(FieldType::Int.container_kind(), None);
        assert_eq!(FieldType::optional(FieldType::sequence(FieldType::Int)).container_kind(), None);
    }

    #[test]
    fn test_factory_yields_fresh_empty_containers() {
        let provider = DefaultProvider::Factory(ContainerKind::Map);
        assert_eq!(provider.produce(), Some(json!({})));
        assert_eq!(DefaultProvider::Factory(ContainerKind::Set).produce(), Some(json!([])));
        assert!(provider.is_concrete());
    }

    #[test]
    fn test_placeholders_are_not_concrete() {
        assert!(!DefaultProvider::Required.is_concrete());
        assert!(!DefaultProvider::AsDefault.is_concrete());
        assert_eq!(DefaultProvider::AsDefault.produce(), None);
    }

    #[test]
    fn test_accumulate_picks_matching_factory() {
        let spec = FieldSpec::accumulate("tags", FieldType::set(FieldType::String));
        assert_eq!(spec.rule, Rule::Accumulate);
        assert_eq!(spec.default, DefaultProvider::Factory(ContainerKind::Set));
    }

    #[test]
    fn test_field_spec_json_shape() {
        let spec: FieldSpec = serde_json::from_value(json!({
            "name": "things",
            "type": {"type": "sequence", "element_type": {"type": "string"}},
            "rule": "accumulate",
            "default": {"factory": "sequence"}
        }))
        .unwrap();
        assert_eq!(spec, FieldSpec::accumulate("things", FieldType::sequence(FieldType::String)));

        let spec: FieldSpec = serde_json::from_value(json!({
            "name": "number",
            "type": {"type": "int"},
            "default": "as_default"
        }))
        .unwrap();
        assert_eq!(spec.rule, Rule::InheritOrOverride);
        assert_eq!(spec.default, DefaultProvider::AsDefault);
    }
}
