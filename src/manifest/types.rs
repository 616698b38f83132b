//! Manifest file structure

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::config::RegistryConfig;
use crate::schema::SchemaDef;

/// A declarative description of schemas and classes.
///
/// Schemas are defined in order, so `extends` may only name an earlier
/// schema. Classes are registered in order, parents first.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    #[serde(default)]
    pub config: RegistryConfig,

    #[serde(default)]
    pub schemas: Vec<SchemaDef>,

    #[serde(default)]
    pub classes: Vec<ClassDecl>,
}

/// One class declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClassDecl {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extends: Option<String>,

    /// Schema this class opts into
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub participates: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<MetaDecl>,
}

/// A class's local meta-object: its schema and explicit values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MetaDecl {
    pub schema: String,

    #[serde(default)]
    pub values: Map<String, Value>,
}
