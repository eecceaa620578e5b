//! Common types for registry responses

use serde::Deserialize;

/// A single release entry as published by the registry
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VersionRecord {
    /// Version as tagged by the author (e.g. "v12.51.0")
    #[serde(default)]
    pub version: String,
    /// Normalized four-part version (e.g. "12.51.0.0" or "12.51.1.0-beta1")
    #[serde(default)]
    pub version_normalized: Option<String>,
}

impl VersionRecord {
    pub fn new(version: &str, version_normalized: &str) -> Self {
        Self {
            version: version.to_string(),
            version_normalized: Some(version_normalized.to_string()),
        }
    }
}
