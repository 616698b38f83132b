//! Container combination for ACCUMULATE fields

use serde_json::Value;

use crate::schema::ContainerKind;

/// Combines an inherited container with a class's own entries.
///
/// - sequence: `base` then `own`, order and duplicates kept
/// - set: `base` then every element of `own` not already present
/// - map: `base` with each key of `own` inserted, own entries winning
///
/// A value of the wrong shape contributes nothing.
pub fn accumulate(kind: ContainerKind, base: &Value, own: &Value) -> Value {
    match kind {
        ContainerKind::Sequence => {
            let mut out = items(base).to_vec();
            out.extend(items(own).iter().cloned());
            Value::Array(out)
        }
        ContainerKind::Set => {
            let mut out = items(base).to_vec();
            for item in items(own) {
                if !out.contains(item) {
                    out.push(item.clone());
                }
            }
            Value::Array(out)
        }
        ContainerKind::Map => {
            let mut out = base.as_object().cloned().unwrap_or_default();
            if let Some(entries) = own.as_object() {
                for (key, value) in entries {
                    out.insert(key.clone(), value.clone());
                }
            }
            Value::Object(out)
        }
    }
}

fn items(value: &Value) -> &[Value] {
    value.as_array().map(Vec::as_slice).unwrap_or(&[])
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sequence_concatenates_in_order() {
        let out = accumulate(ContainerKind::Sequence, &json!(["a", "b"]), &json!(["b", "c"]));
        assert_eq!(out, json!(["a", "b", "b", "c"]));
    }

    #[test]
    fn test_set_union_keeps_base_order() {
        let out = accumulate(ContainerKind::Set, &json!(["b", "a"]), &json!(["a", "c"]));
        assert_eq!(out, json!(["b", "a", "c"]));
    }

    #[test]
    fn test_map_own_keys_win() {
        let out = accumulate(
            ContainerKind::Map,
            &json!({"legs": 4, "sound": "generic"}),
            &json!({"sound": "meow", "tail": true}),
        );
        assert_eq!(out, json!({"legs": 4, "sound": "meow", "tail": true}));
    }

    #[test]
    fn test_empty_own_passes_base_through() {
        let base = json!(["a"]);
        assert_eq!(accumulate(ContainerKind::Sequence, &base, &json!([])), base);
        assert_eq!(accumulate(ContainerKind::Map, &json!({}), &json!({})), json!({}));
    }
}
