//! Concurrent lookup of the latest stable version for a set of packages

use std::sync::LazyLock;
use std::time::Duration;

use futures::future::join_all;
use indexmap::IndexMap;
use regex::Regex;
use tokio::time::{sleep, timeout};
use tracing::{debug, info, warn};

use crate::config::RegistryConfig;
use crate::version::error::RegistryError;
use crate::version::registry::Registry;
use crate::version::types::VersionRecord;

/// Pre-release markers in a normalized version (e.g. "2.0.0.0-RC1")
static PRE_RELEASE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)-(alpha|beta|rc|dev|patch)").unwrap());

/// Returns true if the normalized version denotes a stable release
pub fn is_stable(version_normalized: &str) -> bool {
    !version_normalized.starts_with("dev-") && !PRE_RELEASE_RE.is_match(version_normalized)
}

/// Pick the first stable release in registry order, with any `v` prefix removed.
/// Records without a version string are skipped.
pub fn find_latest_stable(records: &[VersionRecord]) -> Option<String> {
    records
        .iter()
        .filter(|record| !record.version.is_empty())
        .find(|record| is_stable(record.version_normalized.as_deref().unwrap_or_default()))
        .map(|record| record.version.trim_start_matches('v').to_string())
}

/// Fetch one package, bounded by the configured timeout
async fn fetch_one(
    registry: &dyn Registry,
    package_name: &str,
    timeout_ms: u64,
) -> Result<Option<String>, RegistryError> {
    let records = timeout(
        Duration::from_millis(timeout_ms),
        registry.fetch_versions(package_name),
    )
    .await
    .map_err(|_| RegistryError::Timeout {
        package: package_name.to_string(),
        timeout_ms,
    })??;

    Ok(find_latest_stable(&records))
}

/// Fetch the latest stable version of every package in one concurrent batch
///
/// All requests run in parallel with staggered start times to avoid rate
/// limiting. A failed lookup yields `None` for that package and never
/// affects the others. The returned map preserves the input order.
pub async fn fetch_latest(
    registry: &dyn Registry,
    package_names: &[String],
    config: &RegistryConfig,
) -> IndexMap<String, Option<String>> {
    info!("Fetching latest versions for {} packages", package_names.len());

    let futures = package_names.iter().enumerate().map(|(i, package_name)| {
        let delay = Duration::from_millis(config.stagger_delay_ms * i as u64);
        async move {
            sleep(delay).await;
            let latest = fetch_one(registry, package_name, config.timeout_ms)
                .await
                .inspect_err(|e| warn!("Failed to fetch {}: {}", package_name, e))
                .unwrap_or(None);
            debug!("Latest stable version of {}: {:?}", package_name, latest);
            (package_name.clone(), latest)
        }
    });

    let results: IndexMap<_, _> = join_all(futures).await.into_iter().collect();
    info!(
        "Resolved {} of {} packages",
        results.values().filter(|v| v.is_some()).count(),
        results.len()
    );
    results
}

/// Fetch the latest stable version of a single package
pub async fn fetch_latest_one(
    registry: &dyn Registry,
    package_name: &str,
    config: &RegistryConfig,
) -> Option<String> {
    fetch_latest(registry, &[package_name.to_string()], config)
        .await
        .swap_remove(package_name)
        .flatten()
}
