//! Explicit-vs-defaulted field tracking for one meta-object

use serde_json::{Map, Value};

/// The fields a meta-object was explicitly given, with their values.
///
/// A field counts as explicit when it was supplied at all, even if the
/// supplied value equals the schema default.
#[derive(Debug, Clone, PartialEq)]
pub struct OverrideSnapshot {
    schema: String,
    explicit: Map<String, Value>,
}

impl OverrideSnapshot {
    pub(crate) fn new(schema: impl Into<String>, explicit: Map<String, Value>) -> Self {
        Self {
            schema: schema.into(),
            explicit,
        }
    }

    /// Name of the schema the meta-object was built against.
    pub fn schema_name(&self) -> &str {
        &self.schema
    }

    pub fn is_explicit(&self, field: &str) -> bool {
        self.explicit.contains_key(field)
    }

    /// Value of an explicit field; `None` for defaulted fields.
    pub fn value_of(&self, field: &str) -> Option<&Value> {
        self.explicit.get(field)
    }

    pub fn explicit_fields(&self) -> impl Iterator<Item = &str> {
        self.explicit.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.explicit.len()
    }

    pub fn is_empty(&self) -> bool {
        self.explicit.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_explicit_is_key_presence() {
        let mut explicit = Map::new();
        explicit.insert("abstract".into(), json!(false));
        let snapshot = OverrideSnapshot::new("AnimalMeta", explicit);

        assert!(snapshot.is_explicit("abstract"));
        assert_eq!(snapshot.value_of("abstract"), Some(&json!(false)));
        assert!(!snapshot.is_explicit("number"));
        assert_eq!(snapshot.value_of("number"), None);
        assert_eq!(snapshot.explicit_fields().collect::<Vec<_>>(), ["abstract"]);
    }
}
