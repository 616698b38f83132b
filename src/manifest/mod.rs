//! JSON manifests
//!
//! A manifest declares rule schemas and application classes in one file,
//! so hierarchies can be resolved and inspected without writing code.

mod errors;
mod loader;
mod types;

pub use errors::{ManifestError, ManifestResult};
pub use loader::{load_manifest, LoadedManifest};
pub use types::{ClassDecl, Manifest, MetaDecl};
