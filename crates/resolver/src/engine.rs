//! The resolution engine.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use futures::future::join_all;
use mosaic_core::{
    ConfigLocation, Error, MosaicConfig, Project, Result, SchemaValidator, Settings,
};
use mosaic_github::{GitHubClient, GitHubProvider};
use mosaic_npm::{NpmClient, NpmRegistry};
use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::assembler::ProjectAssembler;
use crate::batch::{BatchOutcome, RepositoryRef};

/// A located and validated config.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedConfig {
    /// The validated config.
    pub config: MosaicConfig,
    /// Where it was fetched from.
    pub location: ConfigLocation,
    /// Whether it came from the home registry.
    pub external: bool,
    /// Caller-facing link to the config.
    pub path: String,
}

/// Projects with the time they were resolved.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectListing {
    /// When the projects were resolved.
    pub last_modified: DateTime<Utc>,
    /// The projects.
    pub projects: Vec<Project>,
}

impl ProjectListing {
    /// Stamp `projects` with the current time.
    #[must_use]
    pub fn new(projects: Vec<Project>) -> Self {
        Self {
            last_modified: Utc::now(),
            projects,
        }
    }
}

/// Resolves mosaic configs into projects.
///
/// A resolver owns its providers and a compiled schema. It holds no other
/// state: every call fetches fresh data.
pub struct Resolver {
    github: Arc<dyn GitHubProvider>,
    npm: Arc<dyn NpmRegistry>,
    validator: SchemaValidator,
    settings: Settings,
}

impl std::fmt::Debug for Resolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resolver")
            .field("home_owner", &self.settings.home_owner)
            .finish_non_exhaustive()
    }
}

impl Resolver {
    /// Create a resolver talking to GitHub and npm over HTTP.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if the settings are invalid or a
    /// client or the schema cannot be built.
    pub fn new(settings: Settings) -> Result<Self> {
        settings.validate()?;
        let github = Arc::new(GitHubClient::new(&settings)?);
        let npm = Arc::new(NpmClient::new(&settings)?);
        Self::with_providers(github, npm, settings)
    }

    /// Create a resolver over the given providers.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if the settings are invalid or the
    /// schema cannot be compiled.
    pub fn with_providers(
        github: Arc<dyn GitHubProvider>,
        npm: Arc<dyn NpmRegistry>,
        settings: Settings,
    ) -> Result<Self> {
        settings.validate()?;
        Ok(Self {
            github,
            npm,
            validator: SchemaValidator::new()?,
            settings,
        })
    }

    /// The settings this resolver was built with.
    #[must_use]
    pub const fn settings(&self) -> &Settings {
        &self.settings
    }

    fn assembler(&self) -> ProjectAssembler<'_> {
        ProjectAssembler::new(
            self.github.as_ref(),
            self.npm.as_ref(),
            &self.settings.site_url,
        )
    }

    /// Locate, fetch and validate the config of `owner/repository`.
    async fn load(&self, owner: &str, repository: &str) -> Result<(ConfigLocation, MosaicConfig)> {
        let location = ConfigLocation::locate(&self.settings.home_owner, owner, repository);
        if owner.is_empty() || location.repository.is_empty() {
            return Err(Error::NotFound {
                location: location.resolved_path(),
            });
        }

        debug!(path = %location.resolved_path(), external = location.is_external, "Fetching config");
        let file = self
            .github
            .content(
                &location.fetch_owner,
                &location.fetch_repository,
                &location.file_path,
            )
            .await?
            .ok_or_else(|| Error::NotFound {
                location: location.resolved_path(),
            })?;

        let config = self.validator.parse_toml(&file.decode()?)?;
        Ok((location, config))
    }

    /// Resolve the projects of `owner/repository`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] when there is no config, a validation
    /// error for an invalid one, and any enrichment error.
    #[instrument(skip(self))]
    pub async fn resolve_projects(&self, owner: &str, repository: &str) -> Result<Vec<Project>> {
        let (location, config) = self.load(owner, repository).await?;
        let projects = self
            .assembler()
            .assemble(&location.owner, &location.repository, &config)
            .await?;

        info!(%owner, repository = %location.repository, count = projects.len(), "Resolved projects");
        Ok(projects)
    }

    /// Locate and validate the config of `owner/repository` without enriching it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] when there is no config and a validation
    /// error for an invalid one.
    #[instrument(skip(self))]
    pub async fn resolve_config(&self, owner: &str, repository: &str) -> Result<ResolvedConfig> {
        let (location, config) = self.load(owner, repository).await?;
        Ok(ResolvedConfig {
            external: location.is_external,
            path: location.html_url(),
            config,
            location,
        })
    }

    /// Resolve several repositories concurrently.
    ///
    /// Outcomes are returned in input order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if more repositories are requested
    /// than `max_batch_size` allows.
    #[instrument(skip(self, repositories), fields(count = repositories.len()))]
    pub async fn resolve_many(&self, repositories: &[RepositoryRef]) -> Result<Vec<BatchOutcome>> {
        if repositories.len() > self.settings.max_batch_size {
            return Err(Error::configuration(format!(
                "{} repositories requested, at most {} may be resolved at once",
                repositories.len(),
                self.settings.max_batch_size
            )));
        }

        let outcomes = join_all(repositories.iter().map(|reference| async move {
            let result = self
                .resolve_projects(&reference.owner, &reference.repository)
                .await;
            BatchOutcome::from_result(reference.clone(), result)
        }))
        .await;

        Ok(outcomes)
    }

    /// List the external repositories registered in the home registry.
    ///
    /// # Errors
    ///
    /// Returns an upstream error if the registry cannot be listed.
    pub async fn registry_repositories(&self) -> Result<Vec<RepositoryRef>> {
        crate::registry::registry_repositories(self.github.as_ref(), &self.settings.home_owner)
            .await
    }
}
