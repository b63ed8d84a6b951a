//! GitHub REST client.

use async_trait::async_trait;
use mosaic_core::{Error, Result, Settings};
use reqwest::header::ACCEPT;
use reqwest::{Client, Response, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use crate::models::{
    ContentFile, DirectoryEntry, LatestRelease, RepositoryMetadata, TreeListing,
};
use crate::provider::GitHubProvider;

const SERVICE: &str = "github";
const API_VERSION: &str = "2022-11-28";
const MEDIA_TYPE: &str = "application/vnd.github+json";

#[derive(Debug, Deserialize)]
struct RestRepository {
    name: String,
    description: Option<String>,
    homepage: Option<String>,
    #[serde(default)]
    stargazers_count: u64,
    default_branch: String,
}

#[derive(Debug, Deserialize)]
struct RestContent {
    #[serde(rename = "type")]
    kind: String,
    name: String,
    path: String,
    encoding: Option<String>,
    content: Option<String>,
}

/// [`GitHubProvider`] backed by the GitHub REST API.
pub struct GitHubClient {
    client: Client,
    api_url: String,
    token: Option<SecretString>,
}

impl std::fmt::Debug for GitHubClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubClient")
            .field("api_url", &self.api_url)
            .field("authenticated", &self.token.is_some())
            .finish_non_exhaustive()
    }
}

impl GitHubClient {
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
            api_url: settings.github_api_url.trim_end_matches('/').to_string(),
            token: settings.github_token.clone(),
        })
    }

    /// GET `path`, mapping 404 to `None` and other failures to upstream errors.
    async fn get(&self, path: &str) -> Result<Option<Response>> {
        let url = format!("{}/{path}", self.api_url);
        debug!(%url, "Fetching from GitHub");

        let mut request = self
            .client
            .get(&url)
            .header(ACCEPT, MEDIA_TYPE)
            .header("X-GitHub-Api-Version", API_VERSION);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token.expose_secret());
        }

        let response = request
            .send()
            .await
            .map_err(|e| Error::upstream(SERVICE, format!("Request to {path} failed: {e}")))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            debug!(%path, "GitHub returned 404");
            return Ok(None);
        }
        if !status.is_success() {
            return Err(Error::upstream(
                SERVICE,
                format!("{path} returned HTTP {status}"),
            ));
        }

        Ok(Some(response))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>> {
        let Some(response) = self.get(path).await? else {
            return Ok(None);
        };

        response
            .json::<T>()
            .await
            .map(Some)
            .map_err(|e| Error::upstream(SERVICE, format!("Invalid response from {path}: {e}")))
    }
}

#[async_trait]
impl GitHubProvider for GitHubClient {
    #[instrument(skip(self))]
    async fn repository(&self, owner: &str, name: &str) -> Result<Option<RepositoryMetadata>> {
        let repository: Option<RestRepository> =
            self.get_json(&format!("repos/{owner}/{name}")).await?;

        Ok(repository.map(|r| RepositoryMetadata {
            name: r.name,
            description: r.description.filter(|d| !d.is_empty()),
            homepage_url: r.homepage.filter(|h| !h.is_empty()),
            stargazer_count: r.stargazers_count,
            default_branch: r.default_branch,
        }))
    }

    #[instrument(skip(self))]
    async fn content(&self, owner: &str, name: &str, path: &str) -> Result<Option<ContentFile>> {
        let value: Option<serde_json::Value> = self
            .get_json(&format!("repos/{owner}/{name}/contents/{path}"))
            .await?;
        let Some(value) = value else {
            return Ok(None);
        };

        if value.is_array() {
            return Err(Error::InvalidContent {
                path: path.to_string(),
                message: "path is a directory".to_string(),
            });
        }

        let content: RestContent =
            serde_json::from_value(value).map_err(|e| Error::InvalidContent {
                path: path.to_string(),
                message: e.to_string(),
            })?;

        match (content.kind.as_str(), content.encoding, content.content) {
            ("file", Some(encoding), Some(encoded)) => Ok(Some(ContentFile {
                name: content.name,
                path: content.path,
                encoding,
                content: encoded,
            })),
            (kind, _, _) => Err(Error::InvalidContent {
                path: path.to_string(),
                message: format!("expected an encoded file, got '{kind}'"),
            }),
        }
    }

    #[instrument(skip(self))]
    async fn directory(&self, owner: &str, name: &str, path: &str) -> Result<Vec<DirectoryEntry>> {
        let value: Option<serde_json::Value> = self
            .get_json(&format!("repos/{owner}/{name}/contents/{path}"))
            .await?;
        let Some(value) = value else {
            return Ok(Vec::new());
        };

        if !value.is_array() {
            return Err(Error::upstream(
                SERVICE,
                format!("{owner}/{name}/{path} is not a directory"),
            ));
        }

        serde_json::from_value(value).map_err(|e| {
            Error::upstream(
                SERVICE,
                format!("Invalid directory listing for {owner}/{name}/{path}: {e}"),
            )
        })
    }

    #[instrument(skip(self))]
    async fn tree(&self, owner: &str, name: &str, branch: &str) -> Result<TreeListing> {
        self.get_json(&format!(
            "repos/{owner}/{name}/git/trees/{branch}?recursive=1"
        ))
        .await?
        .ok_or_else(|| {
            Error::upstream(
                SERVICE,
                format!("No tree for branch '{branch}' in {owner}/{name}"),
            )
        })
    }

    #[instrument(skip(self))]
    async fn latest_release(&self, owner: &str, name: &str) -> Result<Option<LatestRelease>> {
        self.get_json(&format!("repos/{owner}/{name}/releases/latest"))
            .await
    }
}
