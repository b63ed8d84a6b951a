//! Turning a validated config into projects.

use mosaic_core::{
    Error, MANIFEST_FILE, MosaicConfig, NpmPackage, NpmSetting, PackageManifest, Project,
    ProjectWebsite, ReadmeSetting, Result, WebsiteSetting,
};
use mosaic_github::{GitHubProvider, RepositoryMetadata};
use mosaic_npm::NpmRegistry;
use tracing::{debug, info, instrument};

use crate::manifest::{ManifestReader, require_name};
use crate::version::{ManifestFallback, VersionResolver};
use crate::workspace::WorkspaceExpander;

/// Assembles the projects of one repository.
///
/// Enrichments run in a fixed order (npm, then version) and any enabled
/// enrichment that cannot be satisfied fails the whole repository.
#[derive(Clone, Copy)]
pub struct ProjectAssembler<'a> {
    github: &'a dyn GitHubProvider,
    npm: &'a dyn NpmRegistry,
    site_url: &'a str,
}

impl<'a> ProjectAssembler<'a> {
    /// Create an assembler. `site_url` is the base of readme links.
    #[must_use]
    pub fn new(github: &'a dyn GitHubProvider, npm: &'a dyn NpmRegistry, site_url: &'a str) -> Self {
        Self {
            github,
            npm,
            site_url: site_url.trim_end_matches('/'),
        }
    }

    /// Assemble the projects for `owner/repository`.
    ///
    /// An ignored config yields no projects and performs no I/O.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RepositoryNotFound`] if the repository does not
    /// exist, and any error raised by an enabled enrichment.
    #[instrument(skip(self, config))]
    pub async fn assemble(
        &self,
        owner: &str,
        repository: &str,
        config: &MosaicConfig,
    ) -> Result<Vec<Project>> {
        if config.project.ignore {
            info!(%owner, %repository, "Repository is ignored");
            return Ok(Vec::new());
        }

        let metadata = self
            .github
            .repository(owner, repository)
            .await?
            .ok_or_else(|| Error::RepositoryNotFound {
                owner: owner.to_string(),
                repository: repository.to_string(),
            })?;

        if let Some(workspace) = config.enabled_workspace() {
            return WorkspaceExpander::new(*self)
                .expand(owner, repository, config, workspace, &metadata)
                .await;
        }

        let project = self.single(owner, repository, config, &metadata).await?;
        Ok(vec![project])
    }

    async fn single(
        &self,
        owner: &str,
        repository: &str,
        config: &MosaicConfig,
        metadata: &RepositoryMetadata,
    ) -> Result<Project> {
        let settings = &config.project;

        let mut project = Project {
            name: metadata.name.clone(),
            title: settings.name.clone().unwrap_or_else(|| metadata.name.clone()),
            description: settings
                .description
                .clone()
                .or_else(|| metadata.description.clone()),
            keywords: settings.keywords.clone(),
            image: settings.image.clone(),
            ignore: settings.ignore,
            deprecated: settings.deprecated.clone(),
            stars: settings.stars.then_some(metadata.stargazer_count),
            priority: settings.priority,
            website: website_block(&config.website, metadata),
            readme: self.readme_url(owner, repository, &config.readme),
            npm: None,
            version: None,
        };

        let mut root_manifest: Option<PackageManifest> = None;
        if let NpmSetting::Enabled { name, downloads } = &config.npm {
            let name = match name {
                Some(name) => name.clone(),
                None => {
                    let manifest = self.manifests().read(owner, repository, MANIFEST_FILE).await?;
                    let name = require_name(&manifest, owner, repository, MANIFEST_FILE, "npm")?;
                    root_manifest = Some(manifest);
                    name
                }
            };
            project.npm = Some(self.npm_package(name, *downloads).await?);
        }

        if settings.version {
            let fallback = root_manifest
                .as_ref()
                .map_or(ManifestFallback::Path(MANIFEST_FILE), ManifestFallback::Loaded);
            project.version = Some(self.versions().resolve(owner, repository, fallback).await?);
        }

        Ok(project)
    }

    pub(crate) fn manifests(&self) -> ManifestReader<'a> {
        ManifestReader::new(self.github)
    }

    pub(crate) fn versions(&self) -> VersionResolver<'a> {
        VersionResolver::new(self.github, self.npm)
    }

    pub(crate) const fn github(&self) -> &'a dyn GitHubProvider {
        self.github
    }

    /// The npm block for `name`, with last-month downloads when requested.
    pub(crate) async fn npm_package(&self, name: String, downloads: bool) -> Result<NpmPackage> {
        let downloads = if downloads {
            let count = self.npm.downloads_last_month(&name).await?;
            debug!(package = %name, downloads = count.downloads, "Fetched npm downloads");
            Some(count.downloads)
        } else {
            None
        };
        Ok(NpmPackage::new(name, downloads))
    }

    /// URL of the readme sub-resource, if the readme is enabled.
    pub(crate) fn readme_url(
        &self,
        owner: &str,
        repository: &str,
        readme: &ReadmeSetting,
    ) -> Option<String> {
        let base = format!("{}/api/v1/mosaic/{owner}/{repository}/readme", self.site_url);
        match readme {
            ReadmeSetting::Disabled => None,
            ReadmeSetting::RepositoryDefault => Some(base),
            ReadmeSetting::Path(path) => Some(format!("{base}/{}", path.trim_start_matches('/'))),
        }
    }
}

/// The website block: the explicit URL, else the repository homepage.
pub(crate) fn website_block(
    website: &WebsiteSetting,
    metadata: &RepositoryMetadata,
) -> Option<ProjectWebsite> {
    match website {
        WebsiteSetting::Disabled => None,
        WebsiteSetting::Enabled(options) => Some(ProjectWebsite {
            url: options
                .url
                .clone()
                .or_else(|| metadata.homepage_url.clone()),
            title: options.title.clone(),
            description: options.description.clone(),
            keywords: options.keywords.clone(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mosaic_core::WebsiteOptions;

    #[test]
    fn test_website_prefers_explicit_url() {
        let metadata = RepositoryMetadata {
            homepage_url: Some("https://home.example".into()),
            ..RepositoryMetadata::default()
        };

        let explicit = WebsiteSetting::Enabled(WebsiteOptions {
            url: Some("https://explicit.example".into()),
            ..WebsiteOptions::default()
        });
        assert_eq!(
            website_block(&explicit, &metadata).and_then(|w| w.url),
            Some("https://explicit.example".to_string())
        );

        let homepage = WebsiteSetting::Enabled(WebsiteOptions::default());
        assert_eq!(
            website_block(&homepage, &metadata).and_then(|w| w.url),
            Some("https://home.example".to_string())
        );

        let no_homepage = website_block(&homepage, &RepositoryMetadata::default()).unwrap();
        assert_eq!(no_homepage.url, None);

        assert!(website_block(&WebsiteSetting::Disabled, &metadata).is_none());
    }
}
