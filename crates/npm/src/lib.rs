//! npm registry and downloads client for the mosaic resolver.
//!
//! [`NpmRegistry`] is the seam the resolver depends on; [`NpmClient`] talks
//! to `registry.npmjs.org` and `api.npmjs.org` (or the URLs in
//! [`Settings`]).

use async_trait::async_trait;
use mosaic_core::{Error, Result, Settings};
use reqwest::header::ACCEPT;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

const REGISTRY_SERVICE: &str = "npm registry";
const DOWNLOADS_SERVICE: &str = "npm downloads";
const ABBREVIATED_METADATA: &str = "application/vnd.npm.install-v1+json";

/// Distribution tags of a package.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistTags {
    /// The `latest` tag.
    #[serde(default)]
    pub latest: Option<String>,
}

impl DistTags {
    /// The `latest` tag, if it is non-empty.
    #[must_use]
    pub fn usable_latest(&self) -> Option<&str> {
        self.latest.as_deref().filter(|v| !v.trim().is_empty())
    }
}

/// Download count over a period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Downloads {
    /// Number of downloads.
    pub downloads: u64,
}

#[derive(Debug, Deserialize)]
struct Packument {
    #[serde(rename = "dist-tags", default)]
    dist_tags: DistTags,
}

/// Read-only access to the npm registry.
#[async_trait]
pub trait NpmRegistry: Send + Sync {
    /// Distribution tags of `package`, or `None` if the registry does not
    /// know the package.
    ///
    /// # Errors
    ///
    /// Returns an upstream error if the request fails, the registry answers
    /// with a non-404 error status, or the body cannot be parsed.
    async fn dist_tags(&self, package: &str) -> Result<Option<DistTags>>;

    /// Downloads of `package` over the last month.
    ///
    /// # Errors
    ///
    /// Returns an upstream error if the request fails or the response has
    /// no numeric `downloads` field.
    async fn downloads_last_month(&self, package: &str) -> Result<Downloads>;
}

/// [`NpmRegistry`] backed by the public npm HTTP APIs.
#[derive(Debug, Clone)]
pub struct NpmClient {
    client: Client,
    registry_url: String,
    downloads_url: String,
}

impl NpmClient {
    /// Create a client from engine settings.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if the HTTP client cannot be built.
    pub fn new(settings: &Settings) -> Result<Self> {
        let client = Client::builder()
            .user_agent(settings.user_agent.as_str())
            .timeout(settings.request_timeout)
            .build()
            .map_err(|e| Error::configuration(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            registry_url: settings.npm_registry_url.trim_end_matches('/').to_string(),
            downloads_url: settings.npm_downloads_url.trim_end_matches('/').to_string(),
        })
    }
}

/// Registry path segment for a package; the scope separator is escaped.
fn registry_segment(package: &str) -> String {
    package.replacen('/', "%2F", 1)
}

#[async_trait]
impl NpmRegistry for NpmClient {
    #[instrument(skip(self))]
    async fn dist_tags(&self, package: &str) -> Result<Option<DistTags>> {
        let url = format!("{}/{}", self.registry_url, registry_segment(package));
        debug!(%url, "Fetching package metadata");

        let response = self
            .client
            .get(&url)
            .header(ACCEPT, ABBREVIATED_METADATA)
            .send()
            .await
            .map_err(|e| Error::upstream(REGISTRY_SERVICE, format!("Request for {package} failed: {e}")))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            debug!(%package, "Package not found in registry");
            return Ok(None);
        }
        if !status.is_success() {
            return Err(Error::upstream(
                REGISTRY_SERVICE,
                format!("{package} returned HTTP {status}"),
            ));
        }

        let packument: Packument = response.json().await.map_err(|e| {
            Error::upstream(
                REGISTRY_SERVICE,
                format!("Invalid metadata for {package}: {e}"),
            )
        })?;

        Ok(Some(packument.dist_tags))
    }

    #[instrument(skip(self))]
    async fn downloads_last_month(&self, package: &str) -> Result<Downloads> {
        let url = format!("{}/downloads/point/last-month/{package}", self.downloads_url);
        debug!(%url, "Fetching download count");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::upstream(DOWNLOADS_SERVICE, format!("Request for {package} failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::upstream(
                DOWNLOADS_SERVICE,
                format!("{package} returned HTTP {status}"),
            ));
        }

        response.json::<Downloads>().await.map_err(|e| {
            Error::upstream(
                DOWNLOADS_SERVICE,
                format!("No `downloads` field in the response for {package}: {e}"),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_segment_escapes_scope() {
        assert_eq!(registry_segment("@luxass/utils"), "@luxass%2Futils");
        assert_eq!(registry_segment("mosaic"), "mosaic");
    }

    #[test]
    fn test_usable_latest() {
        assert_eq!(
            DistTags {
                latest: Some("1.2.0".into())
            }
            .usable_latest(),
            Some("1.2.0")
        );
        assert_eq!(DistTags { latest: Some(" ".into()) }.usable_latest(), None);
        assert_eq!(DistTags::default().usable_latest(), None);
    }
}
