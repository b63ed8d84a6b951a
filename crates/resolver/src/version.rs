//! Version resolution.
//!
//! The version of a project comes from the first usable source of:
//!
//! 1. the latest GitHub release tag, verbatim
//! 2. the npm `latest` dist-tag of the manifest's package name
//! 3. the manifest `version`, only once the registry has answered without
//!    a usable `latest`
//!
//! A failed release lookup falls through to the npm registry. A registry
//! that cannot be reached is an error, not a reason to use the manifest
//! version.

use mosaic_core::{Error, PackageManifest, Result, manifest_path};
use mosaic_github::GitHubProvider;
use mosaic_npm::NpmRegistry;
use tracing::{debug, info, warn};

use crate::manifest::ManifestReader;

/// The manifest consulted when there is no release.
#[derive(Debug, Clone, Copy)]
pub enum ManifestFallback<'m> {
    /// A manifest that was already fetched.
    Loaded(&'m PackageManifest),
    /// A manifest path, fetched only if needed.
    Path(&'m str),
}

/// Resolves project versions.
#[derive(Clone, Copy)]
pub struct VersionResolver<'a> {
    github: &'a dyn GitHubProvider,
    npm: &'a dyn NpmRegistry,
}

impl<'a> VersionResolver<'a> {
    /// Create a resolver over the given providers.
    #[must_use]
    pub fn new(github: &'a dyn GitHubProvider, npm: &'a dyn NpmRegistry) -> Self {
        Self { github, npm }
    }

    /// Resolve the version of `owner/repository`.
    ///
    /// # Errors
    ///
    /// - [`Error::MissingField`] if there is no release and the manifest lacks
    ///   `version` or `name`
    /// - an upstream error if the npm registry fails
    pub async fn resolve(
        &self,
        owner: &str,
        repository: &str,
        fallback: ManifestFallback<'_>,
    ) -> Result<String> {
        match self.github.latest_release(owner, repository).await {
            Ok(Some(release)) if !release.tag_name.is_empty() => {
                info!(%owner, %repository, tag = %release.tag_name, "Version from latest release");
                return Ok(release.tag_name);
            }
            Ok(_) => warn!(%owner, %repository, "No release found, consulting the npm registry"),
            Err(e) => warn!(
                %owner,
                %repository,
                error = %e,
                "Release lookup failed, consulting the npm registry"
            ),
        }

        let fetched;
        let (manifest, path) = match fallback {
            ManifestFallback::Loaded(manifest) => (manifest, None),
            ManifestFallback::Path(path) => {
                fetched = ManifestReader::new(self.github)
                    .read(owner, repository, path)
                    .await?;
                (&fetched, Some(manifest_path(path)))
            }
        };
        let location = path.map_or_else(
            || format!("{owner}/{repository}"),
            |path| format!("{owner}/{repository}/{path}"),
        );

        let Some(version) = manifest.version.as_deref() else {
            return Err(Error::missing_field(
                "version",
                format!("{location} has no release and no manifest version"),
            ));
        };
        let Some(name) = manifest.name.as_deref() else {
            return Err(Error::missing_field(
                "name",
                format!("the manifest at {location} has no name to look up in the npm registry"),
            ));
        };

        match self.npm.dist_tags(name).await? {
            Some(tags) => {
                if let Some(latest) = tags.usable_latest() {
                    info!(package = %name, %latest, "Version from npm dist-tags");
                    return Ok(latest.to_string());
                }
                debug!(package = %name, "Registry has no latest tag");
            }
            None => debug!(package = %name, "Package is not published"),
        }

        info!(package = %name, %version, "Version from package manifest");
        Ok(version.to_string())
    }
}
