//! Meta-object instances and resolved per-class metas

mod object;
mod resolved;
mod snapshot;

pub use object::{MetaObject, MetaObjectBuilder};
pub use resolved::ResolvedMeta;
pub use snapshot::OverrideSnapshot;
