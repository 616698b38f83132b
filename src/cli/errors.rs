//! CLI-specific error types
//!
//! Library errors keep their own codes when surfaced through the CLI.

use std::fmt;
use std::io;

use crate::manifest::ManifestError;

/// CLI error codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliErrorCode {
    /// I/O error (stdout)
    IoError,
    /// Requested class is not in the manifest
    UnknownClass,
    /// Requested class has no meta
    NotParticipating,
    /// Requested schema is not in the manifest
    UnknownSchema,
    /// Manifest failed to load, carrying the library code
    Manifest(&'static str),
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::IoError => "META_CLI_IO_ERROR",
            Self::UnknownClass => "META_CLI_UNKNOWN_CLASS",
            Self::NotParticipating => "META_NOT_PARTICIPATING",
            Self::UnknownSchema => "META_UNKNOWN_SCHEMA",
            Self::Manifest(code) => *code,
        }
    }
}

/// CLI error
#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    /// Create a new CLI error
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// I/O error
    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::IoError, msg)
    }

    pub fn unknown_class(class: &str) -> Self {
        Self::new(
            CliErrorCode::UnknownClass,
            format!("Class '{}' is not declared in the manifest", class),
        )
    }

    pub fn not_participating(class: &str) -> Self {
        Self::new(
            CliErrorCode::NotParticipating,
            format!("Class '{}' is outside any meta hierarchy", class),
        )
    }

    pub fn unknown_schema(schema: &str) -> Self {
        Self::new(
            CliErrorCode::UnknownSchema,
            format!("Schema '{}' is not declared in the manifest", schema),
        )
    }

    /// Get the error code
    pub fn code(&self) -> &CliErrorCode {
        &self.code
    }

    /// Get the error code string
    pub fn code_str(&self) -> &'static str {
        self.code.code()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for CliError {}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::io_error(format!("JSON error: {}", e))
    }
}

impl From<ManifestError> for CliError {
    fn from(e: ManifestError) -> Self {
        Self::new(CliErrorCode::Manifest(e.code()), e.to_string())
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hierarchy::HierarchyError;

    #[test]
    fn test_manifest_code_preserved() {
        let err: CliError = ManifestError::from(HierarchyError::MissingValue {
            class: "Entity".into(),
            field: "number".into(),
        })
        .into();

        assert_eq!(err.code_str(), "META_MISSING_VALUE");
        assert!(err.message().contains("number"));
    }

    #[test]
    fn test_display() {
        let err = CliError::unknown_class("Cat");
        assert_eq!(
            err.to_string(),
            "META_CLI_UNKNOWN_CLASS: Class 'Cat' is not declared in the manifest"
        );
    }
}
