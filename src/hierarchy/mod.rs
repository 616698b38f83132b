//! Class hierarchy binding
//!
//! Participation is explicit: a class opts in with
//! [`ClassDef::participates`], and every class registered below it follows
//! the same rule schema.
//!
//! # Invariants
//!
//! - Parents are registered before children
//! - Each class is resolved exactly once, at registration
//! - Every participating class gets a meta, with or without a local one
//! - A local meta-object must be of the hierarchy's schema

mod ancestor;
mod errors;
mod node;
mod registry;

pub use ancestor::{AncestorResolver, Ancestors};
pub use errors::{HierarchyError, HierarchyResult};
pub use node::{ClassDef, ClassNode};
pub use registry::ClassRegistry;
