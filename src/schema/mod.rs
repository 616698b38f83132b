//! Rule schema subsystem
//!
//! A rule schema describes, once per meta-class, every field's declared
//! type, inheritance rule and default. Schemas are checked when they are
//! built and are immutable afterwards.
//!
//! # Design Principles
//!
//! - Definition errors surface at build time, never at first use
//! - Accumulated containers come from factories, never shared literals
//! - Schemas compare by identity
//! - Validation is deterministic and never coerces

mod builder;
mod catalog;
mod errors;
mod types;
mod validator;

pub use builder::RuleSchemaBuilder;
pub use catalog::SchemaCatalog;
pub use errors::{
    ErrorPhase, RuleViolation, SchemaError, SchemaErrorCode, SchemaResult, ValidationDetails,
    ViolationKind,
};
pub use types::{ContainerKind, DefaultProvider, FieldSpec, FieldType, Rule, RuleSchema, SchemaDef};
pub use validator::{check_value, json_type_name, MetaValidator};
