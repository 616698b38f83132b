//! # Hierarchy Errors
//!
//! Raised synchronously when a class is registered. Nothing here is
//! transient; re-registering the same definition fails the same way.

use thiserror::Error;

use crate::schema::SchemaError;

/// Result type for hierarchy operations
pub type HierarchyResult<T> = Result<T, HierarchyError>;

/// Class registration and resolution errors
#[derive(Debug, Clone, Error)]
pub enum HierarchyError {
    #[error("<{class}>: meta must be of type {expected}, not {found}")]
    TypeMismatch {
        class: String,
        expected: String,
        found: String,
    },

    #[error("<{class}>: field '{field}' can inherit a value, but no class in the hierarchy declares one")]
    UnresolvedSentinel { class: String, field: String },

    #[error("<{class}>: field '{field}' has no default and no class in the hierarchy declares it")]
    MissingValue { class: String, field: String },

    #[error("<{class}>: parent class '{parent}' is not registered")]
    UnknownParent { class: String, parent: String },

    #[error("Class already registered: {0}")]
    DuplicateClass(String),

    #[error("<{class}>: hierarchy already follows {expected}, cannot switch to {found}")]
    SchemaConflict {
        class: String,
        expected: String,
        found: String,
    },

    #[error("<{0}>: declares a meta but neither it nor any ancestor participates in a meta hierarchy")]
    NotParticipating(String),

    #[error("Cannot merge metas of different types: {left} and {right}")]
    IncompatibleMerge { left: String, right: String },

    #[error("{0}")]
    Validation(#[from] SchemaError),
}

impl HierarchyError {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            HierarchyError::TypeMismatch { .. } => "META_TYPE_MISMATCH",
            HierarchyError::UnresolvedSentinel { .. } => "META_UNRESOLVED_SENTINEL",
            HierarchyError::MissingValue { .. } => "META_MISSING_VALUE",
            HierarchyError::UnknownParent { .. } => "META_UNKNOWN_PARENT",
            HierarchyError::DuplicateClass(_) => "META_DUPLICATE_CLASS",
            HierarchyError::SchemaConflict { .. } => "META_SCHEMA_CONFLICT",
            HierarchyError::NotParticipating(_) => "META_NOT_PARTICIPATING",
            HierarchyError::IncompatibleMerge { .. } => "META_INCOMPATIBLE_MERGE",
            HierarchyError::Validation(e) => e.code().code(),
        }
    }

    /// Class the error was raised for, when there is one.
    pub fn class(&self) -> Option<&str> {
        match self {
            HierarchyError::TypeMismatch { class, .. }
            | HierarchyError::UnresolvedSentinel { class, .. }
            | HierarchyError::MissingValue { class, .. }
            | HierarchyError::UnknownParent { class, .. }
            | HierarchyError::SchemaConflict { class, .. } => Some(class.as_str()),
            HierarchyError::DuplicateClass(class) | HierarchyError::NotParticipating(class) => {
                Some(class.as_str())
            }
            HierarchyError::IncompatibleMerge { .. } | HierarchyError::Validation(_) => None,
        }
    }
}
