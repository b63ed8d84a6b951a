//! The GitHub provider trait.

use async_trait::async_trait;
use mosaic_core::Result;

use crate::models::{ContentFile, DirectoryEntry, LatestRelease, RepositoryMetadata, TreeListing};

/// Read-only access to the GitHub data the resolver needs.
///
/// Implemented by [`crate::GitHubClient`] against the REST API, and by
/// in-memory fakes in tests. A missing object is `Ok(None)` wherever the
/// caller is expected to branch on absence; transport failures and
/// unexpected statuses are errors.
///
/// # Example
///
/// ```ignore
/// struct StaticGitHub { /* ... */ }
///
/// #[async_trait]
/// impl GitHubProvider for StaticGitHub {
///     async fn repository(&self, owner: &str, name: &str) -> Result<Option<RepositoryMetadata>> {
///         Ok(Some(RepositoryMetadata { name: name.to_string(), ..Default::default() }))
///     }
///     // ...
/// }
/// ```
#[async_trait]
pub trait GitHubProvider: Send + Sync {
    /// Repository metadata, or `None` if the repository does not exist.
    ///
    /// # Errors
    ///
    /// Returns an upstream error if the request fails.
    async fn repository(&self, owner: &str, name: &str) -> Result<Option<RepositoryMetadata>>;

    /// A single file, or `None` if nothing exists at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`mosaic_core::Error::InvalidContent`] when `path` is not a
    /// file, and an upstream error if the request fails.
    async fn content(&self, owner: &str, name: &str, path: &str) -> Result<Option<ContentFile>>;

    /// Entries of the directory at `path`; empty if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an upstream error if the request fails or `path` is a file.
    async fn directory(&self, owner: &str, name: &str, path: &str) -> Result<Vec<DirectoryEntry>>;

    /// Recursive tree of `branch`.
    ///
    /// # Errors
    ///
    /// Returns an upstream error if the request fails or the branch is unknown.
    async fn tree(&self, owner: &str, name: &str, branch: &str) -> Result<TreeListing>;

    /// The latest published release, or `None` if there is none.
    ///
    /// # Errors
    ///
    /// Returns an upstream error if the request fails.
    async fn latest_release(&self, owner: &str, name: &str) -> Result<Option<LatestRelease>>;
}
