//! Listing the external repositories registered in the home registry.

use mosaic_core::{REGISTRY_DIR, Result, parse_registry_path};
use mosaic_github::{EntryKind, GitHubProvider};
use tracing::{debug, instrument};

use crate::batch::RepositoryRef;

/// Walk `.github/mosaic` of `{home}/{home}` and list every registered repository.
///
/// Only `*.toml` files two levels deep (`{owner}/{repository}.toml`) count;
/// the result is sorted and free of duplicates.
///
/// # Errors
///
/// Returns an upstream error if a directory listing fails.
#[instrument(skip(github))]
pub async fn registry_repositories(
    github: &dyn GitHubProvider,
    home_owner: &str,
) -> Result<Vec<RepositoryRef>> {
    let mut pending = vec![REGISTRY_DIR.to_string()];
    let mut repositories = Vec::new();

    while let Some(directory) = pending.pop() {
        let entries = github.directory(home_owner, home_owner, &directory).await?;
        debug!(%directory, count = entries.len(), "Listed registry directory");

        for entry in entries {
            match entry.kind {
                EntryKind::Dir => pending.push(entry.path),
                EntryKind::File => {
                    if let Some((owner, repository)) = parse_registry_path(&entry.path) {
                        repositories.push(RepositoryRef::new(owner, repository));
                    }
                }
                EntryKind::Symlink | EntryKind::Submodule => {}
            }
        }
    }

    repositories.sort();
    repositories.dedup();
    Ok(repositories)
}
