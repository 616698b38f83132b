//! Observable events
//!
//! Every log line carries one of these as its `event` field, so output can
//! be filtered by event name regardless of the message text.

use std::fmt;

/// Observable events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Schema definition
    /// Rule schema passed its checks
    SchemaBuilt,
    /// Rule schema rejected
    SchemaRejected,

    // Class registration
    /// Class stored without taking part in meta resolution
    ClassSkipped,
    /// Class meta resolved and stored
    MetaResolved,
    /// Class registration failed
    ResolutionFailed,

    // Manifests
    /// Manifest read and every class registered
    ManifestLoaded,
}

impl Event {
    /// Returns the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::SchemaBuilt => "SCHEMA_BUILT",
            Event::SchemaRejected => "SCHEMA_REJECTED",
            Event::ClassSkipped => "CLASS_SKIPPED",
            Event::MetaResolved => "META_RESOLVED",
            Event::ResolutionFailed => "RESOLUTION_FAILED",
            Event::ManifestLoaded => "MANIFEST_LOADED",
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names() {
        assert_eq!(Event::SchemaBuilt.as_str(), "SCHEMA_BUILT");
        assert_eq!(Event::MetaResolved.to_string(), "META_RESOLVED");
    }
}
