//! Class registration and meta binding
//!
//! Registration is the explicit replacement for a class-creation hook:
//! every class is registered once, parents before children, and its meta
//! is resolved right then. Registered metas never change afterwards.

use std::collections::HashMap;
use std::sync::Arc;

use crate::config::{RegistryConfig, SubtypePolicy};
use crate::meta::{MetaObject, ResolvedMeta};
use crate::observability::Event;
use crate::resolve::resolve;
use crate::schema::{MetaValidator, RuleSchema};

use super::ancestor::AncestorResolver;
use super::errors::{HierarchyError, HierarchyResult};
use super::node::{ClassDef, ClassNode};

/// Registry of application classes and their resolved metas.
#[derive(Debug, Default)]
pub struct ClassRegistry {
    config: RegistryConfig,
    classes: HashMap<String, ClassNode>,
    order: Vec<String>,
}

impl ClassRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: RegistryConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Registers a class and resolves its meta.
    ///
    /// Returns the resolved meta, or `None` for a class outside any meta
    /// hierarchy.
    ///
    /// # Errors
    ///
    /// - META_DUPLICATE_CLASS, META_UNKNOWN_PARENT for ordering mistakes
    /// - META_SCHEMA_CONFLICT if the class opts into a second schema
    /// - META_NOT_PARTICIPATING for a meta on a non-participating class
    /// - META_TYPE_MISMATCH if the local meta is of the wrong schema
    /// - META_VALIDATION_FAILED if a subtype meta's value does not fit the
    ///   hierarchy schema's field type
    /// - META_UNRESOLVED_SENTINEL, META_MISSING_VALUE if a field never
    ///   receives a value anywhere in the chain
    pub fn register(&mut self, def: ClassDef) -> HierarchyResult<Option<Arc<ResolvedMeta>>> {
        let name = def.name.clone();
        match self.bind(def) {
            Ok(resolved) => Ok(resolved),
            Err(err) => {
                tracing::warn!(
                    event = %Event::ResolutionFailed,
                    class = %name,
                    code = err.code(),
                    error = %err,
                    "class registration failed"
                );
                Err(err)
            }
        }
    }

    fn bind(&mut self, def: ClassDef) -> HierarchyResult<Option<Arc<ResolvedMeta>>> {
        let ClassDef {
            name,
            parent,
            schema: opt_in,
            meta,
        } = def;

        if self.classes.contains_key(&name) {
            return Err(HierarchyError::DuplicateClass(name));
        }
        if let Some(parent) = &parent {
            if !self.classes.contains_key(parent) {
                return Err(HierarchyError::UnknownParent {
                    class: name,
                    parent: parent.clone(),
                });
            }
        }

        let (inherited_schema, parent_meta) = {
            let ancestors = AncestorResolver::new(&self.classes);
            (
                ancestors.nearest_schema(parent.as_deref()).cloned(),
                ancestors.nearest_resolved(parent.as_deref()).cloned(),
            )
        };

        let opted_in = opt_in.is_some();
        let schema = match (opt_in, inherited_schema) {
            (Some(own), Some(inherited)) if !own.same_type(&inherited) => {
                return Err(HierarchyError::SchemaConflict {
                    class: name,
                    expected: inherited.name().to_string(),
                    found: own.name().to_string(),
                });
            }
            (Some(own), _) => Some(own),
            (None, inherited) => inherited,
        };

        let Some(schema) = schema else {
            if meta.is_some() {
                return Err(HierarchyError::NotParticipating(name));
            }
            tracing::debug!(
                event = %Event::ClassSkipped,
                class = %name,
                "class outside meta hierarchy"
            );
            self.insert(ClassNode {
                name,
                parent,
                schema: None,
                opted_in: false,
                local_meta: None,
                resolved: None,
            });
            return Ok(None);
        };

        let snapshot = match &meta {
            Some(meta) => {
                self.check_meta_type(&name, &schema, meta)?;
                Some(meta.snapshot())
            }
            None => None,
        };

        let resolved = resolve(&schema, parent_meta.as_deref(), snapshot.as_ref()).seal(&name)?;
        if self.config.validate_resolved {
            MetaValidator::new(&schema).validate_complete(resolved.iter())?;
        }
        let resolved = Arc::new(resolved);

        tracing::debug!(
            event = %Event::MetaResolved,
            class = %name,
            schema = schema.name(),
            parent = parent.as_deref().unwrap_or("-"),
            explicit = snapshot.as_ref().map_or(0, |s| s.len()),
            "meta resolved"
        );

        self.insert(ClassNode {
            name,
            parent,
            schema: Some(schema),
            opted_in,
            local_meta: meta,
            resolved: Some(Arc::clone(&resolved)),
        });
        Ok(Some(resolved))
    }

    fn check_meta_type(
        &self,
        class: &str,
        expected: &RuleSchema,
        meta: &MetaObject,
    ) -> HierarchyResult<()> {
        let found = meta.schema();
        let accepted = match self.config.subtype_policy {
            SubtypePolicy::Exact => found.same_type(expected),
            SubtypePolicy::AllowSubtypes => found.is_subtype_of(expected),
        };
        if !accepted {
            return Err(HierarchyError::TypeMismatch {
                class: class.to_string(),
                expected: expected.name().to_string(),
                found: found.name().to_string(),
            });
        }

        // Subtypes may redeclare a field's type; explicit values must still
        // fit the hierarchy's declaration.
        let validator = MetaValidator::new(expected);
        for field in meta.explicit_fields() {
            if let (Some(_), Some(value)) = (expected.field(field), meta.get(field)) {
                validator.validate_field(field, value)?;
            }
        }
        Ok(())
    }

    fn insert(&mut self, node: ClassNode) {
        self.order.push(node.name.clone());
        self.classes.insert(node.name.clone(), node);
    }

    /// Resolved meta of a participating class.
    pub fn meta(&self, class: &str) -> Option<&Arc<ResolvedMeta>> {
        self.classes.get(class).and_then(ClassNode::resolved)
    }

    pub fn node(&self, class: &str) -> Option<&ClassNode> {
        self.classes.get(class)
    }

    pub fn contains(&self, class: &str) -> bool {
        self.classes.contains_key(class)
    }

    pub fn participates(&self, class: &str) -> bool {
        self.meta(class).is_some()
    }

    /// Participating classes from the hierarchy root down to `class`.
    pub fn ancestor_chain(&self, class: &str) -> Vec<&str> {
        let mut chain: Vec<&str> = AncestorResolver::new(&self.classes)
            .ancestors(Some(class))
            .filter(|node| node.participates())
            .map(ClassNode::name)
            .collect();
        chain.reverse();
        chain
    }

    /// Registered classes in registration order.
    pub fn classes(&self) -> impl Iterator<Item = &ClassNode> {
        self.order.iter().filter_map(|name| self.classes.get(name))
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}
