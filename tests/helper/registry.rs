//! Registry test utilities

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use package_sync::config::RegistryConfig;
use package_sync::version::error::RegistryError;
use package_sync::version::registry::Registry;
use package_sync::version::types::VersionRecord;

/// Mock registry for testing
#[derive(Default)]
pub struct MockRegistry {
    versions: HashMap<String, Vec<VersionRecord>>,
    calls: AtomicUsize,
}

impl MockRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register releases as `(version, version_normalized)` pairs, newest first
    pub fn with_versions(mut self, package: &str, versions: Vec<(&str, &str)>) -> Self {
        self.versions.insert(
            package.to_string(),
            versions
                .into_iter()
                .map(|(version, normalized)| VersionRecord::new(version, normalized))
                .collect(),
        );
        self
    }

    /// Number of lookups made so far
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Registry for MockRegistry {
    async fn fetch_versions(
        &self,
        package_name: &str,
    ) -> Result<Vec<VersionRecord>, RegistryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.versions.get(package_name) {
            Some(versions) => Ok(versions.clone()),
            None => Err(RegistryError::NotFound(package_name.to_string())),
        }
    }
}

/// Registry configuration without request staggering
pub fn test_config() -> RegistryConfig {
    RegistryConfig {
        stagger_delay_ms: 0,
        ..RegistryConfig::default()
    }
}
