//! Registry configuration
//!
//! Read from a manifest's `config` section or a standalone JSON file.
//! Every field is optional; an empty object gives the defaults.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which meta-object types a class may declare
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubtypePolicy {
    /// The hierarchy's schema or any schema extending it
    #[default]
    AllowSubtypes,
    /// Only the hierarchy's own schema
    Exact,
}

/// Configuration for a [`ClassRegistry`](crate::hierarchy::ClassRegistry).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegistryConfig {
    /// Type check applied to locally declared meta-objects (default: allow_subtypes)
    #[serde(default)]
    pub subtype_policy: SubtypePolicy,

    /// Re-validate every resolved meta against its schema (default: true)
    #[serde(default = "default_validate_resolved")]
    pub validate_resolved: bool,
}

fn default_validate_resolved() -> bool {
    true
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            subtype_policy: SubtypePolicy::default(),
            validate_resolved: default_validate_resolved(),
        }
    }
}

impl RegistryConfig {
    /// Configuration that only accepts the exact hierarchy schema.
    pub fn strict() -> Self {
        Self {
            subtype_policy: SubtypePolicy::Exact,
            ..Self::default()
        }
    }

    /// Load configuration from a JSON file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&content).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config JSON in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = RegistryConfig::default();
        assert_eq!(config.subtype_policy, SubtypePolicy::AllowSubtypes);
        assert!(config.validate_resolved);
    }

    #[test]
    fn test_empty_object_gives_defaults() {
        let config: RegistryConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, RegistryConfig::default());
    }

    #[test]
    fn test_strict() {
        assert_eq!(RegistryConfig::strict().subtype_policy, SubtypePolicy::Exact);
    }

    #[test]
    fn test_unknown_keys_rejected() {
        let result: Result<RegistryConfig, _> = serde_json::from_str(r#"{"subtypes": true}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("registry.json");
        fs::write(&path, r#"{"subtype_policy": "exact", "validate_resolved": false}"#).unwrap();

        let config = RegistryConfig::load(&path).unwrap();
        assert_eq!(config.subtype_policy, SubtypePolicy::Exact);
        assert!(!config.validate_resolved);
    }

    #[test]
    fn test_load_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let err = RegistryConfig::load(&temp_dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
