//! Upward walks over the declared-parent chain

use std::collections::HashMap;
use std::sync::Arc;

use crate::meta::ResolvedMeta;
use crate::schema::RuleSchema;

use super::node::ClassNode;

/// Finds the nearest participating ancestor of a class.
pub struct AncestorResolver<'a> {
    classes: &'a HashMap<String, ClassNode>,
}

impl<'a> AncestorResolver<'a> {
    pub fn new(classes: &'a HashMap<String, ClassNode>) -> Self {
        Self { classes }
    }

    /// Iterates from `start` up to the root of its chain.
    pub fn ancestors(&self, start: Option<&str>) -> Ancestors<'a> {
        let classes = self.classes;
        Ancestors {
            classes,
            next: start.and_then(|name| classes.get(name)),
        }
    }

    /// Resolved meta of the closest class at or above `start`.
    pub fn nearest_resolved(&self, start: Option<&str>) -> Option<&'a Arc<ResolvedMeta>> {
        self.ancestors(start).find_map(ClassNode::resolved)
    }

    /// Schema of the closest participating class at or above `start`.
    pub fn nearest_schema(&self, start: Option<&str>) -> Option<&'a Arc<RuleSchema>> {
        self.ancestors(start).find_map(ClassNode::schema)
    }
}

/// Iterator over a class and its ancestors, nearest first.
pub struct Ancestors<'a> {
    classes: &'a HashMap<String, ClassNode>,
    next: Option<&'a ClassNode>,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = &'a ClassNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.next?;
        self.next = node.parent().and_then(|parent| self.classes.get(parent));
        Some(node)
    }
}
