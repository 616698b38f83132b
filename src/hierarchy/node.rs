//! Class declarations and registered class nodes

use std::sync::Arc;

use crate::meta::{MetaObject, ResolvedMeta};
use crate::schema::RuleSchema;

/// Declaration of an application class, handed to the registry.
///
/// ```ignore
/// let def = ClassDef::new("Cat")
///     .extends("Animal")
///     .with_meta(MetaObject::builder(&schema).set("number", 2).build()?);
/// ```
#[derive(Debug, Clone)]
pub struct ClassDef {
    pub(crate) name: String,
    pub(crate) parent: Option<String>,
    pub(crate) schema: Option<Arc<RuleSchema>>,
    pub(crate) meta: Option<MetaObject>,
}

impl ClassDef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent: None,
            schema: None,
            meta: None,
        }
    }

    /// Declared parent class.
    pub fn extends(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    /// Opts this class, and every descendant, into meta resolution
    /// following `schema`.
    pub fn participates(mut self, schema: &Arc<RuleSchema>) -> Self {
        self.schema = Some(Arc::clone(schema));
        self
    }

    /// Locally declared meta-object.
    pub fn with_meta(mut self, meta: MetaObject) -> Self {
        self.meta = Some(meta);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// A registered class.
#[derive(Debug)]
pub struct ClassNode {
    pub(crate) name: String,
    pub(crate) parent: Option<String>,
    pub(crate) schema: Option<Arc<RuleSchema>>,
    pub(crate) opted_in: bool,
    pub(crate) local_meta: Option<MetaObject>,
    pub(crate) resolved: Option<Arc<ResolvedMeta>>,
}

impl ClassNode {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent(&self) -> Option<&str> {
        self.parent.as_deref()
    }

    /// Schema the class follows, declared or inherited.
    pub fn schema(&self) -> Option<&Arc<RuleSchema>> {
        self.schema.as_ref()
    }

    /// Whether the hierarchy starts participating at this class.
    pub fn is_opt_in_point(&self) -> bool {
        self.opted_in
    }

    pub fn local_meta(&self) -> Option<&MetaObject> {
        self.local_meta.as_ref()
    }

    pub fn resolved(&self) -> Option<&Arc<ResolvedMeta>> {
        self.resolved.as_ref()
    }

    pub fn participates(&self) -> bool {
        self.resolved.is_some()
    }
}
