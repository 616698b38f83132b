//! Schema Invariant Tests
//!
//! Tests for rule schema and meta-object invariants:
//! - Invalid rule declarations fail when the schema is built
//! - Validation is deterministic
//! - No undeclared fields allowed
//! - Type matching is exact
//! - Registered schemas are immutable

use std::sync::Arc;

use meta_inherit::meta::MetaObject;
use meta_inherit::schema::{
    ContainerKind, FieldSpec, FieldType, Rule, RuleSchema, SchemaCatalog, SchemaDef,
    SchemaErrorCode, ViolationKind,
};
use serde_json::json;

// =============================================================================
// Helper Functions
// =============================================================================

fn animal_meta() -> Arc<RuleSchema> {
    RuleSchema::builder("AnimalMeta")
        .field(FieldSpec::do_not_inherit("abstract", FieldType::Bool, false))
        .field(FieldSpec::accumulate("things", FieldType::sequence(FieldType::String)))
        .field(FieldSpec::inherited("number", FieldType::Int))
        .field(
            FieldSpec::new("weight", FieldType::optional(FieldType::Float))
                .with_default(json!(null)),
        )
        .build()
        .unwrap()
}

// =============================================================================
// Definition-Time Tests
// =============================================================================

/// An ACCUMULATE field of a scalar type is a definition error.
#[test]
fn test_accumulate_scalar_rejected() {
    let err = RuleSchema::builder("Broken")
        .field(FieldSpec::new("count", FieldType::Int).with_rule(Rule::Accumulate))
        .build()
        .unwrap_err();

    assert_eq!(err.code(), SchemaErrorCode::InvalidRules);
    assert_eq!(err.violations().len(), 1);
    assert!(matches!(
        err.violations()[0].kind,
        ViolationKind::AccumulateNotContainer { .. }
    ));
}

/// A DO_NOT_INHERIT field with no default is a definition error.
#[test]
fn test_do_not_inherit_without_default_rejected() {
    let err = RuleSchema::builder("Broken")
        .field(FieldSpec::new("abstract", FieldType::Bool).with_rule(Rule::DoNotInherit))
        .build()
        .unwrap_err();

    assert_eq!(err.code().code(), "META_SCHEMA_INVALID_RULES");
    assert_eq!(err.violations()[0].field, "abstract");
}

/// A literal default must match the declared type.
#[test]
fn test_default_type_checked() {
    let err = RuleSchema::builder("Broken")
        .field(FieldSpec::new("number", FieldType::Int).with_default("one"))
        .build()
        .unwrap_err();

    assert!(matches!(err.violations()[0].kind, ViolationKind::InvalidDefault(_)));
}

/// A factory must build the declared container kind.
#[test]
fn test_factory_kind_checked() {
    let err = RuleSchema::builder("Broken")
        .field(
            FieldSpec::accumulate("tags", FieldType::set(FieldType::String))
                .with_factory(ContainerKind::Map),
        )
        .build()
        .unwrap_err();

    assert!(matches!(
        err.violations()[0].kind,
        ViolationKind::FactoryKindMismatch { .. }
    ));
}

// =============================================================================
// Meta-Object Construction Tests
// =============================================================================

/// Same meta-object validates the same way every time.
#[test]
fn test_validation_is_deterministic() {
    let schema = animal_meta();
    let good = json!({"abstract": true, "things": ["a"]});
    let bad = json!({"abstract": "yes"});

    for _ in 0..100 {
        assert!(MetaObject::from_value(&schema, good.clone()).is_ok());
        assert!(MetaObject::from_value(&schema, bad.clone()).is_err());
    }
}

#[test]
fn test_undeclared_field_rejected() {
    let schema = animal_meta();
    let err = MetaObject::from_value(&schema, json!({"legs": 4})).unwrap_err();

    assert_eq!(err.code(), SchemaErrorCode::UnknownField);
}

#[test]
fn test_int_accepted_as_float_but_not_reverse() {
    let schema = animal_meta();

    assert!(MetaObject::from_value(&schema, json!({"weight": 3})).is_ok());
    assert!(MetaObject::from_value(&schema, json!({"weight": 3.5})).is_ok());
    assert!(MetaObject::from_value(&schema, json!({"number": 3.5})).is_err());
}

#[test]
fn test_null_only_for_optional() {
    let schema = animal_meta();

    assert!(MetaObject::from_value(&schema, json!({"weight": null})).is_ok());

    let err = MetaObject::from_value(&schema, json!({"number": null})).unwrap_err();
    assert_eq!(err.code(), SchemaErrorCode::ValidationFailed);
}

#[test]
fn test_element_path_reported() {
    let schema = animal_meta();
    let err = MetaObject::from_value(&schema, json!({"things": ["a", 2]})).unwrap_err();

    assert_eq!(err.details().unwrap().field, "things[1]");
}

/// Only keys present in the meta-object count as explicit.
#[test]
fn test_explicit_is_key_presence() {
    let schema = animal_meta();
    let object = MetaObject::builder(&schema).set("abstract", false).build().unwrap();

    assert!(object.is_explicit("abstract"));
    assert!(!object.is_explicit("number"));
    assert_eq!(object.explicit_fields().collect::<Vec<_>>(), ["abstract"]);
}

// =============================================================================
// Catalog Tests
// =============================================================================

#[test]
fn test_catalog_schema_immutable() {
    let mut catalog = SchemaCatalog::new();
    catalog.register(animal_meta()).unwrap();

    let err = catalog.register(animal_meta()).unwrap_err();
    assert_eq!(err.code(), SchemaErrorCode::SchemaImmutable);
    assert_eq!(catalog.len(), 1);
}

#[test]
fn test_catalog_define_with_parent() {
    let mut catalog = SchemaCatalog::new();
    catalog.register(animal_meta()).unwrap();

    let def: SchemaDef = serde_json::from_value(json!({
        "name": "CatMeta",
        "extends": "AnimalMeta",
        "fields": [{"name": "lives", "type": {"type": "int"}, "default": {"value": 9}}]
    }))
    .unwrap();
    let cat = catalog.define(&def).unwrap();

    assert!(cat.is_subtype_of(catalog.get("AnimalMeta").unwrap()));
    assert_eq!(
        cat.field_names().collect::<Vec<_>>(),
        ["abstract", "things", "number", "weight", "lives"]
    );
}

#[test]
fn test_catalog_unknown_parent() {
    let mut catalog = SchemaCatalog::new();
    let def = SchemaDef {
        name: "CatMeta".into(),
        extends: Some("AnimalMeta".into()),
        fields: vec![],
    };

    let err = catalog.define(&def).unwrap_err();
    assert_eq!(err.code(), SchemaErrorCode::UnknownSchema);
    assert!(catalog.is_empty());
}
