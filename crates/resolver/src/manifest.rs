//! Fetching `package.json` files from GitHub.

use mosaic_core::{Error, PackageManifest, Result, manifest_path, parse_manifest};
use mosaic_github::GitHubProvider;
use tracing::debug;

/// Reads and validates package manifests from a repository.
#[derive(Clone, Copy)]
pub struct ManifestReader<'a> {
    github: &'a dyn GitHubProvider,
}

impl<'a> ManifestReader<'a> {
    /// Create a reader over `github`.
    #[must_use]
    pub fn new(github: &'a dyn GitHubProvider) -> Self {
        Self { github }
    }

    /// Read the manifest at `path`, which may name a directory or the file itself.
    ///
    /// # Errors
    ///
    /// - [`Error::ManifestNotFound`] if no file exists at the normalized path
    /// - [`Error::InvalidContent`] if the remote object is not an encoded file
    /// - [`Error::Validation`] if the JSON does not parse or fails validation
    pub async fn read(&self, owner: &str, repository: &str, path: &str) -> Result<PackageManifest> {
        let path = manifest_path(path);
        debug!(%owner, %repository, %path, "Reading package manifest");

        let file = self
            .github
            .content(owner, repository, &path)
            .await?
            .ok_or_else(|| Error::ManifestNotFound {
                owner: owner.to_string(),
                repository: repository.to_string(),
                path: path.clone(),
            })?;

        let text = file.decode()?;
        parse_manifest(&text, &format!("package.json at {owner}/{repository}/{path}"))
    }
}

/// The manifest `name`, or a missing-field error explaining who needed it.
pub(crate) fn require_name(
    manifest: &PackageManifest,
    owner: &str,
    repository: &str,
    path: &str,
    needed_for: &str,
) -> Result<String> {
    manifest.name.clone().ok_or_else(|| {
        Error::missing_field(
            "name",
            format!(
                "{} in {owner}/{repository} has no name, which {needed_for} requires",
                manifest_path(path)
            ),
        )
    })
}
