//! Field resolution algorithm
//!
//! Combines a schema, the nearest ancestor's resolved meta and a class's
//! own explicit overrides into that class's meta.

mod accumulate;
mod algorithm;

pub use accumulate::accumulate;
pub use algorithm::{resolve, FieldSlot, Resolution};

use crate::hierarchy::{HierarchyError, HierarchyResult};
use crate::meta::{MetaObject, ResolvedMeta};

/// Merges a resolved meta with a child meta-object outside any hierarchy.
///
/// Passing `None` applies the per-level reset alone: DO_NOT_INHERIT fields
/// go back to their defaults. The child must be of exactly the same schema.
pub fn combine(
    parent: &ResolvedMeta,
    child: Option<&MetaObject>,
) -> HierarchyResult<ResolvedMeta> {
    if let Some(child) = child {
        if !child.schema().same_type(parent.schema()) {
            return Err(HierarchyError::IncompatibleMerge {
                left: parent.schema().name().to_string(),
                right: child.schema().name().to_string(),
            });
        }
    }

    let snapshot = child.map(MetaObject::snapshot);
    resolve(parent.schema(), Some(parent), snapshot.as_ref()).seal(parent.schema().name())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{FieldSpec, FieldType, RuleSchema};
    use serde_json::json;
    use std::sync::Arc;

    fn some_meta() -> Arc<RuleSchema> {
        RuleSchema::builder("SomeMeta")
            .field(FieldSpec::do_not_inherit("abstract", FieldType::Bool, false))
            .field(FieldSpec::new("number", FieldType::Int))
            .build()
            .unwrap()
    }

    fn sealed(schema: &Arc<RuleSchema>, value: serde_json::Value) -> ResolvedMeta {
        let object = MetaObject::from_value(schema, value).unwrap();
        resolve(schema, None, Some(&object.snapshot())).seal("root").unwrap()
    }

    #[test]
    fn test_combine_with_none_resets() {
        let schema = some_meta();
        let root = sealed(&schema, json!({"number": 1, "abstract": true}));

        let result = combine(&root, None).unwrap();
        assert_eq!(result.get("number"), Some(&json!(1)));
        assert_eq!(result.get("abstract"), Some(&json!(false)));
    }

    #[test]
    fn test_combine_chain_reasserts() {
        let schema = some_meta();
        let a = sealed(&schema, json!({"number": 1, "abstract": true}));
        let b = MetaObject::empty(&schema);
        let c = MetaObject::builder(&schema).set("abstract", true).build().unwrap();

        let ab = combine(&a, Some(&b)).unwrap();
        assert_eq!(ab.get("abstract"), Some(&json!(false)));

        let abc = combine(&ab, Some(&c)).unwrap();
        assert_eq!(abc.get("abstract"), Some(&json!(true)));
        assert_eq!(abc.get("number"), Some(&json!(1)));
    }

    #[test]
    fn test_combine_rejects_other_schema() {
        let schema = some_meta();
        let other = RuleSchema::builder("OtherMeta")
            .field(FieldSpec::new("number", FieldType::Int))
            .build()
            .unwrap();

        let a = sealed(&schema, json!({"number": 1}));
        let b = MetaObject::builder(&other).set("number", 2).build().unwrap();

        let err = combine(&a, Some(&b)).unwrap_err();
        assert_eq!(err.code(), "META_INCOMPATIBLE_MERGE");
    }
}
