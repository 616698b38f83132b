//! Field resolution
//!
//! `resolve` is pure and total: the same schema, parent and snapshot always
//! produce the same slots. Whether the slots form a usable meta is decided
//! separately by [`Resolution::seal`].

use std::sync::Arc;

use serde_json::Value;

use crate::hierarchy::{HierarchyError, HierarchyResult};
use crate::meta::{OverrideSnapshot, ResolvedMeta};
use crate::schema::{DefaultProvider, FieldSpec, Rule, RuleSchema};

use super::accumulate::accumulate;

/// Outcome for a single field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldSlot {
    /// A real value
    Value(Value),
    /// Still the `AsDefault` placeholder
    Sentinel,
    /// No default and nobody supplied a value
    Missing,
}

impl FieldSlot {
    fn from_default(default: &DefaultProvider) -> Self {
        match default {
            DefaultProvider::AsDefault => FieldSlot::Sentinel,
            DefaultProvider::Required => FieldSlot::Missing,
            provider => provider.produce().map_or(FieldSlot::Missing, FieldSlot::Value),
        }
    }

    pub fn value(&self) -> Option<&Value> {
        match self {
            FieldSlot::Value(value) => Some(value),
            FieldSlot::Sentinel | FieldSlot::Missing => None,
        }
    }
}

/// Per-field results of one resolution, in schema order.
#[derive(Debug, Clone)]
pub struct Resolution {
    schema: Arc<RuleSchema>,
    slots: Vec<(String, FieldSlot)>,
}

impl Resolution {
    pub fn schema(&self) -> &Arc<RuleSchema> {
        &self.schema
    }

    pub fn slot(&self, field: &str) -> Option<&FieldSlot> {
        self.slots
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, slot)| slot)
    }

    pub fn slots(&self) -> impl Iterator<Item = (&str, &FieldSlot)> {
        self.slots.iter().map(|(name, slot)| (name.as_str(), slot))
    }

    /// Fields that did not resolve to a real value.
    pub fn unresolved_fields(&self) -> impl Iterator<Item = &str> {
        self.slots
            .iter()
            .filter(|(_, slot)| slot.value().is_none())
            .map(|(name, _)| name.as_str())
    }

    pub fn is_complete(&self) -> bool {
        self.unresolved_fields().next().is_none()
    }

    /// Turns the slots into a meta for `class`.
    ///
    /// # Errors
    ///
    /// The first field, in schema order, that is still a sentinel
    /// (META_UNRESOLVED_SENTINEL) or has no value (META_MISSING_VALUE).
    pub fn seal(self, class: &str) -> HierarchyResult<ResolvedMeta> {
        let mut values = Vec::with_capacity(self.slots.len());
        for (field, slot) in self.slots {
            match slot {
                FieldSlot::Value(value) => values.push((field, value)),
                FieldSlot::Sentinel => {
                    return Err(HierarchyError::UnresolvedSentinel {
                        class: class.to_string(),
                        field,
                    })
                }
                FieldSlot::Missing => {
                    return Err(HierarchyError::MissingValue {
                        class: class.to_string(),
                        field,
                    })
                }
            }
        }
        Ok(ResolvedMeta::new(self.schema, values))
    }
}

/// Resolves every field of `schema` from the parent's meta and the class's
/// own explicit overrides.
///
/// - INHERIT_OR_OVERRIDE: own value, else parent value, else default
/// - DO_NOT_INHERIT: own value, else default; the parent is never read
/// - ACCUMULATE: parent container (or empty) combined with own entries
///   (or empty)
pub fn resolve(
    schema: &Arc<RuleSchema>,
    parent: Option<&ResolvedMeta>,
    snapshot: Option<&OverrideSnapshot>,
) -> Resolution {
    let slots = schema
        .fields()
        .iter()
        .map(|spec| {
            let own = snapshot.and_then(|s| s.value_of(&spec.name));
            let inherited = parent.and_then(|p| p.get(&spec.name));
            (spec.name.clone(), resolve_field(spec, inherited, own))
        })
        .collect();

    Resolution {
        schema: Arc::clone(schema),
        slots,
    }
}

fn resolve_field(spec: &FieldSpec, inherited: Option<&Value>, own: Option<&Value>) -> FieldSlot {
    let value = match (spec.rule, spec.field_type.container_kind()) {
        (Rule::InheritOrOverride, _) => own.or(inherited).cloned(),
        (Rule::DoNotInherit, _) => own.cloned(),
        (Rule::Accumulate, Some(kind)) => {
            let empty = kind.empty();
            Some(accumulate(
                kind,
                inherited.unwrap_or(&empty),
                own.unwrap_or(&empty),
            ))
        }
        // Rejected when the schema is built
        (Rule::Accumulate, None) => own.or(inherited).cloned(),
    };
    value.map_or_else(|| FieldSlot::from_default(&spec.default), FieldSlot::Value)
}
