//! Packagist metadata API (p2) implementation

use std::collections::HashMap;
use std::time::Duration;

use reqwest::{Certificate, ClientBuilder};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::{RegistryConfig, USER_AGENT, find_ca_bundle};
use crate::version::error::RegistryError;
use crate::version::registry::Registry;
use crate::version::types::VersionRecord;

/// Response from the Packagist p2 API
#[derive(Debug, Deserialize)]
struct PackagistResponse {
    #[serde(default)]
    packages: HashMap<String, Vec<VersionRecord>>,
}

/// Registry implementation for the Packagist metadata API
pub struct PackagistRegistry {
    client: reqwest::Client,
    base_url: String,
}

impl PackagistRegistry {
    /// Creates a new PackagistRegistry from the registry configuration
    pub fn new(config: &RegistryConfig) -> Result<Self, RegistryError> {
        let builder = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_millis(config.timeout_ms));

        Ok(Self {
            client: with_system_ca_bundle(builder).build()?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn package_url(&self, package_name: &str) -> String {
        format!("{}/{}.json", self.base_url, package_name)
    }
}

/// Trust the first system CA bundle found, in addition to the built-in roots
fn with_system_ca_bundle(builder: ClientBuilder) -> ClientBuilder {
    let Some(path) = find_ca_bundle() else {
        return builder;
    };

    let certificates = std::fs::read(path)
        .map_err(|e| e.to_string())
        .and_then(|pem| Certificate::from_pem_bundle(&pem).map_err(|e| e.to_string()));

    match certificates {
        Ok(certificates) => {
            debug!(
                "Loaded {} certificates from {}",
                certificates.len(),
                path.display()
            );
            certificates
                .into_iter()
                .fold(builder, |builder, cert| builder.add_root_certificate(cert))
        }
        Err(e) => {
            warn!("Ignoring CA bundle {}: {}", path.display(), e);
            builder
        }
    }
}

#[async_trait::async_trait]
impl Registry for PackagistRegistry {
    async fn fetch_versions(
        &self,
        package_name: &str,
    ) -> Result<Vec<VersionRecord>, RegistryError> {
        let url = self.package_url(package_name);
        debug!("Fetching Packagist package: {}", url);

        let response = self.client.get(&url).send().await?;

        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(RegistryError::NotFound(package_name.to_string()));
        }

        if !status.is_success() {
            warn!("Packagist returned status {}: {}", status, url);
            return Err(RegistryError::InvalidResponse(format!(
                "Unexpected status: {}",
                status
            )));
        }

        let mut body: PackagistResponse = response.json().await.map_err(|e| {
            warn!("Failed to parse Packagist response: {}", e);
            RegistryError::InvalidResponse(e.to_string())
        })?;

        Ok(body.packages.remove(package_name).unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;

    fn registry_for(base_url: String) -> PackagistRegistry {
        PackagistRegistry::new(&RegistryConfig {
            base_url,
            ..RegistryConfig::default()
        })
        .unwrap()
    }

    #[tokio::test]
    async fn fetch_versions_returns_records_in_registry_order() {
        let mut server = Server::new_async().await;

        let mock = server
            .mock("GET", "/laravel/framework.json")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{
                    "packages": {
                        "laravel/framework": [
                            {"version": "v12.51.1-beta.1", "version_normalized": "12.51.1.0-beta1"},
                            {"version": "v12.51.0", "version_normalized": "12.51.0.0"},
                            {"version": "v12.50.0", "version_normalized": "12.50.0.0"}
                        ]
                    },
                    "minified": "composer/2.0"
                }"#,
            )
            .create_async()
            .await;

        let registry = registry_for(server.url());
        let result = registry.fetch_versions("laravel/framework").await.unwrap();

        mock.assert_async().await;
        assert_eq!(
            result,
            vec![
                VersionRecord::new("v12.51.1-beta.1", "12.51.1.0-beta1"),
                VersionRecord::new("v12.51.0", "12.51.0.0"),
                VersionRecord::new("v12.50.0", "12.50.0.0"),
            ]
        );
    }

    #[tokio::test]
    async fn fetch_versions_returns_not_found_for_nonexistent_package() {
        let mut server = Server::new_async().await;

        let mock = server
            .mock("GET", "/nonexistent/package.json")
            .with_status(404)
            .create_async()
            .await;

        let registry = registry_for(server.url());
        let result = registry.fetch_versions("nonexistent/package").await;

        mock.assert_async().await;
        assert!(matches!(result, Err(RegistryError::NotFound(_))));
    }

    #[tokio::test]
    async fn fetch_versions_returns_invalid_response_for_server_error() {
        let mut server = Server::new_async().await;

        let mock = server
            .mock("GET", "/some/package.json")
            .with_status(500)
            .create_async()
            .await;

        let registry = registry_for(server.url());
        let result = registry.fetch_versions("some/package").await;

        mock.assert_async().await;
        assert!(matches!(result, Err(RegistryError::InvalidResponse(_))));
    }

    #[tokio::test]
    async fn fetch_versions_returns_invalid_response_for_malformed_body() {
        let mut server = Server::new_async().await;

        let mock = server
            .mock("GET", "/some/package.json")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("not json")
            .create_async()
            .await;

        let registry = registry_for(server.url());
        let result = registry.fetch_versions("some/package").await;

        mock.assert_async().await;
        assert!(matches!(result, Err(RegistryError::InvalidResponse(_))));
    }

    #[tokio::test]
    async fn fetch_versions_returns_empty_when_package_key_is_missing() {
        let mut server = Server::new_async().await;

        let mock = server
            .mock("GET", "/some/package.json")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"packages": {"other/package": []}}"#)
            .create_async()
            .await;

        let registry = registry_for(server.url());
        let result = registry.fetch_versions("some/package").await.unwrap();

        mock.assert_async().await;
        assert!(result.is_empty());
    }
}
