//! Manifest loading errors

use std::path::PathBuf;

use thiserror::Error;

use crate::hierarchy::HierarchyError;
use crate::schema::SchemaError;

/// Errors raised while reading or applying a manifest
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("Failed to read manifest {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid manifest JSON in {origin}: {source}")]
    Json {
        origin: String,
        source: serde_json::Error,
    },

    #[error("Class '{class}' refers to unknown schema '{schema}'")]
    UnknownSchema { class: String, schema: String },

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Hierarchy(#[from] HierarchyError),
}

impl ManifestError {
    pub fn code(&self) -> &'static str {
        match self {
            ManifestError::Io { .. } => "META_MANIFEST_IO",
            ManifestError::Json { .. } => "META_MANIFEST_JSON",
            ManifestError::UnknownSchema { .. } => "META_UNKNOWN_SCHEMA",
            ManifestError::Schema(e) => e.code().code(),
            ManifestError::Hierarchy(e) => e.code(),
        }
    }
}

pub type ManifestResult<T> = Result<T, ManifestError>;
