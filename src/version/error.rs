use thiserror::Error;

/// Failure while looking up a single package in the registry.
///
/// These never abort a batch; the fetcher degrades them to an absent
/// latest version.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Package not found: {0}")]
    NotFound(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Request timed out after {timeout_ms}ms: {package}")]
    Timeout { package: String, timeout_ms: u64 },
}
