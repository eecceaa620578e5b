//! Registry trait for fetching package releases from a remote index

#[cfg(test)]
use mockall::automock;

use crate::version::error::RegistryError;
use crate::version::types::VersionRecord;

/// Trait for fetching the release list of a package
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait Registry: Send + Sync {
    /// Fetches all release records for a package
    ///
    /// # Arguments
    /// * `package_name` - The package identifier (e.g., "laravel/framework")
    ///
    /// # Returns
    /// * `Ok(Vec<VersionRecord>)` - Records in registry order (newest first for Packagist)
    /// * `Err(RegistryError)` - If the fetch fails
    async fn fetch_versions(&self, package_name: &str)
    -> Result<Vec<VersionRecord>, RegistryError>;
}
