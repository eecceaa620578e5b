use serde::Deserialize;
use std::path::Path;

// =============================================================================
// Registry-related constants
// =============================================================================

/// Default Packagist metadata endpoint (p2 API)
pub const DEFAULT_REGISTRY_URL: &str = "https://repo.packagist.org/p2";

/// Timeout for a single registry request in milliseconds (30 seconds)
pub const FETCH_TIMEOUT_MS: u64 = 30_000;

/// Delay between starting each fetch request to avoid rate limiting (10ms)
pub const FETCH_STAGGER_DELAY_MS: u64 = 10;

/// User agent sent with every registry request
pub const USER_AGENT: &str = "package-sync";

/// System CA bundles, checked in order; the first existing one is trusted
/// in addition to the built-in roots.
pub const CA_BUNDLE_PATHS: [&str; 3] = [
    "/etc/ssl/cert.pem",
    "/etc/ssl/certs/ca-certificates.crt",
    "/etc/pki/tls/certs/ca-bundle.crt",
];

// =============================================================================
// Project files
// =============================================================================

pub const DECLARATION_FILE: &str = "composer.json";
pub const LOCK_FILE: &str = "composer.lock";

/// Top-level configuration structure
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct SyncConfig {
    pub registry: RegistryConfig,
}

/// Registry-related configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct RegistryConfig {
    /// Base URL of the package metadata endpoint
    pub base_url: String,
    /// Per-request timeout in milliseconds
    pub timeout_ms: u64,
    /// Delay between request starts in milliseconds
    pub stagger_delay_ms: u64,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_REGISTRY_URL.to_string(),
            timeout_ms: FETCH_TIMEOUT_MS,
            stagger_delay_ms: FETCH_STAGGER_DELAY_MS,
        }
    }
}

impl SyncConfig {
    /// Load configuration from a JSON file. Missing fields use defaults.
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Override the registry base URL (e.g. from the command line)
    pub fn with_registry_url(mut self, base_url: Option<String>) -> Self {
        if let Some(url) = base_url {
            self.registry.base_url = url.trim_end_matches('/').to_string();
        }
        self
    }
}

/// Returns the first CA bundle path that exists on this system.
pub fn find_ca_bundle() -> Option<&'static Path> {
    CA_BUNDLE_PATHS
        .into_iter()
        .map(Path::new)
        .find(|path| path.exists())
}
