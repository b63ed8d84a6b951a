//! Runtime settings for the resolution engine.
//!
//! Settings are built once and handed to every client and to the resolver
//! explicitly; nothing reads the environment after construction.

use secrecy::SecretString;
use std::time::Duration;

use crate::{Error, Result};

/// Default GitHub REST API base URL.
pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";
/// Default npm registry base URL.
pub const DEFAULT_NPM_REGISTRY_URL: &str = "https://registry.npmjs.org";
/// Default npm downloads API base URL.
pub const DEFAULT_NPM_DOWNLOADS_URL: &str = "https://api.npmjs.org";
/// Default public site the readme links point at.
pub const DEFAULT_SITE_URL: &str = "https://mosaic.luxass.dev";
/// Default home identity owning the central registry repository.
pub const DEFAULT_HOME_OWNER: &str = "luxass";

/// Engine settings.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Owner whose `{owner}/{owner}` repository hosts external configs.
    pub home_owner: String,
    /// Token for the GitHub API, if any.
    pub github_token: Option<SecretString>,
    /// Base URL of the GitHub REST API.
    pub github_api_url: String,
    /// Base URL of the npm registry.
    pub npm_registry_url: String,
    /// Base URL of the npm downloads API.
    pub npm_downloads_url: String,
    /// Base URL used when building readme links.
    pub site_url: String,
    /// Timeout applied to every outbound request.
    pub request_timeout: Duration,
    /// User agent sent with every outbound request.
    pub user_agent: String,
    /// Upper bound on repositories per batch resolution.
    pub max_batch_size: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self::new(DEFAULT_HOME_OWNER)
    }
}

impl Settings {
    /// Create settings for the given home owner with public defaults.
    #[must_use]
    pub fn new(home_owner: impl Into<String>) -> Self {
        Self {
            home_owner: home_owner.into(),
            github_token: None,
            github_api_url: DEFAULT_GITHUB_API_URL.to_string(),
            npm_registry_url: DEFAULT_NPM_REGISTRY_URL.to_string(),
            npm_downloads_url: DEFAULT_NPM_DOWNLOADS_URL.to_string(),
            site_url: DEFAULT_SITE_URL.to_string(),
            request_timeout: Duration::from_secs(30),
            user_agent: concat!("mosaic/", env!("CARGO_PKG_VERSION")).to_string(),
            max_batch_size: 10,
        }
    }

    /// Read settings from `MOSAIC_*` variables, falling back to defaults.
    ///
    /// The token is read from `GITHUB_TOKEN`, then `GH_TOKEN`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] when `MOSAIC_REQUEST_TIMEOUT_SECS`
    /// or `MOSAIC_MAX_BATCH_SIZE` is not a whole number, or when the
    /// resulting settings fail [`Settings::validate`].
    pub fn from_env() -> Result<Self> {
        let mut settings = Self::new(
            std::env::var("MOSAIC_HOME_OWNER").unwrap_or_else(|_| DEFAULT_HOME_OWNER.to_string()),
        );

        if let Ok(token) = std::env::var("GITHUB_TOKEN").or_else(|_| std::env::var("GH_TOKEN")) {
            settings = settings.with_github_token(token);
        }
        if let Ok(url) = std::env::var("MOSAIC_GITHUB_API_URL") {
            settings.github_api_url = url;
        }
        if let Ok(url) = std::env::var("MOSAIC_NPM_REGISTRY_URL") {
            settings.npm_registry_url = url;
        }
        if let Ok(url) = std::env::var("MOSAIC_NPM_DOWNLOADS_URL") {
            settings.npm_downloads_url = url;
        }
        if let Ok(url) = std::env::var("MOSAIC_SITE_URL") {
            settings.site_url = url;
        }
        if let Ok(raw) = std::env::var("MOSAIC_REQUEST_TIMEOUT_SECS") {
            let secs = raw.trim().parse::<u64>().map_err(|e| {
                Error::configuration(format!(
                    "MOSAIC_REQUEST_TIMEOUT_SECS must be a number of seconds, got '{raw}': {e}"
                ))
            })?;
            settings.request_timeout = Duration::from_secs(secs);
        }
        if let Ok(raw) = std::env::var("MOSAIC_MAX_BATCH_SIZE") {
            settings.max_batch_size = raw.trim().parse::<usize>().map_err(|e| {
                Error::configuration(format!(
                    "MOSAIC_MAX_BATCH_SIZE must be a whole number, got '{raw}': {e}"
                ))
            })?;
        }

        settings.validate()?;
        Ok(settings)
    }

    /// Check the settings before they are used.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if `max_batch_size` is zero.
    pub fn validate(&self) -> Result<()> {
        if self.max_batch_size == 0 {
            return Err(Error::configuration("max batch size must be at least 1"));
        }
        Ok(())
    }

    /// Set the GitHub token. Empty tokens are ignored.
    #[must_use]
    pub fn with_github_token(mut self, token: impl Into<String>) -> Self {
        let token = token.into();
        self.github_token = if token.trim().is_empty() {
            None
        } else {
            Some(SecretString::from(token))
        };
        self
    }

    /// Set the GitHub API base URL.
    #[must_use]
    pub fn with_github_api_url(mut self, url: impl Into<String>) -> Self {
        self.github_api_url = url.into();
        self
    }

    /// Set the npm registry base URL.
    #[must_use]
    pub fn with_npm_registry_url(mut self, url: impl Into<String>) -> Self {
        self.npm_registry_url = url.into();
        self
    }

    /// Set the npm downloads API base URL.
    #[must_use]
    pub fn with_npm_downloads_url(mut self, url: impl Into<String>) -> Self {
        self.npm_downloads_url = url.into();
        self
    }

    /// Set the public site URL.
    #[must_use]
    pub fn with_site_url(mut self, url: impl Into<String>) -> Self {
        self.site_url = url.into();
        self
    }

    /// Set the per-request timeout.
    #[must_use]
    pub const fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Set the maximum batch size.
    #[must_use]
    pub const fn with_max_batch_size(mut self, size: usize) -> Self {
        self.max_batch_size = size;
        self
    }
}
