//! meta-inherit - per-class metadata resolved along class hierarchies
//!
//! Each participating class carries a meta-object whose fields are
//! inherited, reset or accumulated from its ancestors according to the
//! rule declared for each field in a rule schema.
//!
//! ```ignore
//! use meta_inherit::{ClassDef, ClassRegistry, FieldSpec, FieldType, MetaObject, RuleSchema};
//!
//! let schema = RuleSchema::builder("AnimalMeta")
//!     .field(FieldSpec::do_not_inherit("abstract", FieldType::Bool, false))
//!     .field(FieldSpec::accumulate("things", FieldType::sequence(FieldType::String)))
//!     .field(FieldSpec::inherited("number", FieldType::Int))
//!     .build()?;
//!
//! let mut registry = ClassRegistry::new();
//! registry.register(
//!     ClassDef::new("Entity")
//!         .participates(&schema)
//!         .with_meta(MetaObject::builder(&schema).set("number", 1).build()?),
//! )?;
//! registry.register(ClassDef::new("Animal").extends("Entity"))?;
//! ```

pub mod cli;
pub mod config;
pub mod hierarchy;
pub mod manifest;
pub mod meta;
pub mod observability;
pub mod resolve;
pub mod schema;

pub use config::{RegistryConfig, SubtypePolicy};
pub use hierarchy::{ClassDef, ClassRegistry, HierarchyError, HierarchyResult};
pub use meta::{MetaObject, OverrideSnapshot, ResolvedMeta};
pub use resolve::{combine, resolve};
pub use schema::{
    ContainerKind, DefaultProvider, FieldSpec, FieldType, Rule, RuleSchema, SchemaError,
    SchemaResult,
};
