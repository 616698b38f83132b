//! Schema error types
//!
//! Error codes:
//! - META_SCHEMA_INVALID_RULES (definition)
//! - META_SCHEMA_DUPLICATE_FIELD (definition)
//! - META_SCHEMA_IMMUTABLE (definition)
//! - META_UNKNOWN_SCHEMA (definition)
//! - META_UNKNOWN_FIELD (construction)
//! - META_VALIDATION_FAILED (construction)

use std::fmt;

use super::types::ContainerKind;

/// When an error can be raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorPhase {
    /// Raised while a meta-class schema is being defined
    Definition,
    /// Raised while a meta-object is being constructed or validated
    Construction,
}

impl fmt::Display for ErrorPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorPhase::Definition => write!(f, "DEFINITION"),
            ErrorPhase::Construction => write!(f, "CONSTRUCTION"),
        }
    }
}

/// Schema-specific error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaErrorCode {
    /// One or more fields break the rule constraints
    InvalidRules,
    /// A field is declared twice in the same schema body
    DuplicateField,
    /// A schema with the same name is already registered
    SchemaImmutable,
    /// Schema name not found
    UnknownSchema,
    /// Meta-object names a field its schema does not declare
    UnknownField,
    /// Value does not match the declared field type
    ValidationFailed,
}

impl SchemaErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            SchemaErrorCode::InvalidRules => "META_SCHEMA_INVALID_RULES",
            SchemaErrorCode::DuplicateField => "META_SCHEMA_DUPLICATE_FIELD",
            SchemaErrorCode::SchemaImmutable => "META_SCHEMA_IMMUTABLE",
            SchemaErrorCode::UnknownSchema => "META_UNKNOWN_SCHEMA",
            SchemaErrorCode::UnknownField => "META_UNKNOWN_FIELD",
            SchemaErrorCode::ValidationFailed => "META_VALIDATION_FAILED",
        }
    }

    /// Returns the phase in which this error is raised
    pub fn phase(&self) -> ErrorPhase {
        match self {
            SchemaErrorCode::UnknownField | SchemaErrorCode::ValidationFailed => {
                ErrorPhase::Construction
            }
            _ => ErrorPhase::Definition,
        }
    }
}

impl fmt::Display for SchemaErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Validation failure details
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationDetails {
    /// Field path (e.g., "things[2]", "labels.owner")
    pub field: String,
    /// Expected type or condition
    pub expected: String,
    /// Actual value or type found
    pub actual: String,
}

impl ValidationDetails {
    pub fn new(
        field: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::new(field, "field to be present", "missing")
    }

    pub fn extra_field(field: impl Into<String>) -> Self {
        Self::new(field, "no undeclared fields", "extra field present")
    }

    pub fn type_mismatch(
        field: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self::new(field, expected, actual)
    }

    pub fn null_value(field: impl Into<String>) -> Self {
        Self::new(field, "non-null value", "null")
    }

    pub fn duplicate_element(field: impl Into<String>) -> Self {
        Self::new(field, "unique set element", "duplicate element")
    }
}

impl fmt::Display for ValidationDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "field '{}': expected {}, got {}",
            self.field, self.expected, self.actual
        )
    }
}

/// Why a field declaration was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViolationKind {
    /// DO_NOT_INHERIT field with no concrete default
    DoNotInheritWithoutDefault,
    /// ACCUMULATE field whose declared type is not a container
    AccumulateNotContainer { found: &'static str },
    /// ACCUMULATE field without a fresh-container factory
    AccumulateWithoutFactory,
    /// Factory builds a different container than the declared type
    FactoryKindMismatch {
        expected: Option<ContainerKind>,
        found: ContainerKind,
    },
    /// Literal default does not match the declared type
    InvalidDefault(ValidationDetails),
}

/// A single rejected field declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleViolation {
    pub field: String,
    pub kind: ViolationKind,
}

impl RuleViolation {
    pub fn new(field: impl Into<String>, kind: ViolationKind) -> Self {
        Self {
            field: field.into(),
            kind,
        }
    }
}

impl fmt::Display for RuleViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ViolationKind::DoNotInheritWithoutDefault => write!(
                f,
                "field '{}' is DO_NOT_INHERIT but does not provide a default value or factory",
                self.field
            ),
            ViolationKind::AccumulateNotContainer { found } => write!(
                f,
                "field '{}' is ACCUMULATE but its type '{}' is not a sequence, set or map",
                self.field, found
            ),
            ViolationKind::AccumulateWithoutFactory => write!(
                f,
                "field '{}' is ACCUMULATE but does not provide an empty-container factory",
                self.field
            ),
            ViolationKind::FactoryKindMismatch { expected, found } => match expected {
                Some(expected) => write!(
                    f,
                    "field '{}' declares a {} factory for a {} type",
                    self.field, found, expected
                ),
                None => write!(
                    f,
                    "field '{}' declares a {} factory for a non-container type",
                    self.field, found
                ),
            },
            ViolationKind::InvalidDefault(details) => {
                write!(f, "field '{}' has an invalid default: {}", self.field, details)
            }
        }
    }
}

/// Schema error type with full context
#[derive(Debug, Clone)]
pub struct SchemaError {
    code: SchemaErrorCode,
    message: String,
    schema: Option<String>,
    details: Option<ValidationDetails>,
    violations: Vec<RuleViolation>,
}

impl SchemaError {
    fn new(code: SchemaErrorCode, schema: Option<String>, message: String) -> Self {
        Self {
            code,
            message,
            schema,
            details: None,
            violations: Vec::new(),
        }
    }

    /// Create an error listing every rejected field declaration
    pub fn invalid_rules(schema: impl Into<String>, violations: Vec<RuleViolation>) -> Self {
        let schema = schema.into();
        let reasons = violations
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join("; ");
        let mut err = Self::new(
            SchemaErrorCode::InvalidRules,
            Some(schema.clone()),
            format!("Error with <{}>: {}", schema, reasons),
        );
        err.violations = violations;
        err
    }

    /// Create a duplicate field error
    pub fn duplicate_field(schema: impl Into<String>, field: impl Into<String>) -> Self {
        let schema = schema.into();
        let field = field.into();
        Self::new(
            SchemaErrorCode::DuplicateField,
            Some(schema.clone()),
            format!("Field '{}' is declared more than once on <{}>", field, schema),
        )
    }

    /// Create a schema immutable error
    pub fn schema_immutable(schema: impl Into<String>) -> Self {
        let schema = schema.into();
        Self::new(
            SchemaErrorCode::SchemaImmutable,
            Some(schema.clone()),
            format!("Schema '{}' is already registered", schema),
        )
    }

    /// Create an unknown schema error
    pub fn unknown_schema(schema: impl Into<String>) -> Self {
        let schema = schema.into();
        Self::new(
            SchemaErrorCode::UnknownSchema,
            Some(schema.clone()),
            format!("Schema '{}' not found", schema),
        )
    }

    /// Create an unknown field error
    pub fn unknown_field(schema: impl Into<String>, field: impl Into<String>) -> Self {
        let schema = schema.into();
        let details = ValidationDetails::extra_field(field);
        let mut err = Self::new(
            SchemaErrorCode::UnknownField,
            Some(schema.clone()),
            format!("<{}> does not declare {}", schema, details),
        );
        err.details = Some(details);
        err
    }

    /// Create a validation failed error
    pub fn validation_failed(schema: impl Into<String>, details: ValidationDetails) -> Self {
        let schema = schema.into();
        let mut err = Self::new(
            SchemaErrorCode::ValidationFailed,
            Some(schema.clone()),
            format!("<{}> validation failed: {}", schema, details),
        );
        err.details = Some(details);
        err
    }

    /// Returns the error code
    pub fn code(&self) -> SchemaErrorCode {
        self.code
    }

    /// Returns the phase this error belongs to
    pub fn phase(&self) -> ErrorPhase {
        self.code.phase()
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the schema name if applicable
    pub fn schema(&self) -> Option<&str> {
        self.schema.as_deref()
    }

    /// Returns validation details if applicable
    pub fn details(&self) -> Option<&ValidationDetails> {
        self.details.as_ref()
    }

    /// Returns the rejected field declarations, if any
    pub fn violations(&self) -> &[RuleViolation] {
        &self.violations
    }
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.code.phase(), self.code.code(), self.message)
    }
}

impl std::error::Error for SchemaError {}

/// Result type for schema operations
pub type SchemaResult<T> = Result<T, SchemaError>;
