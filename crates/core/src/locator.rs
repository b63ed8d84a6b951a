//! Config location.
//!
//! First-party repositories (owned by the home identity) keep their config
//! in `.github/mosaic.toml`. Every other repository is resolved through the
//! home registry repository `{home}/{home}`, where a curated file lives at
//! `.github/mosaic/{owner}/{repository}.toml`. A third-party repository
//! cannot register itself without a commit to the registry.

use serde::Serialize;

/// Path of an in-repository config file.
pub const CONFIG_FILE: &str = ".github/mosaic.toml";
/// Directory in the registry repository holding external configs.
pub const REGISTRY_DIR: &str = ".github/mosaic";

const CONFIG_EXTENSION: &str = ".toml";

/// Where a repository's mosaic config is fetched from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigLocation {
    /// Owner as requested by the caller.
    pub owner: String,
    /// Repository as requested by the caller (extension stripped for external ones).
    pub repository: String,
    /// Whether the config is delegated to the home registry repository.
    pub is_external: bool,
    /// Owner of the repository the file is fetched from.
    pub fetch_owner: String,
    /// Repository the file is fetched from.
    pub fetch_repository: String,
    /// Path of the config file inside the fetched repository.
    pub file_path: String,
}

impl ConfigLocation {
    /// Locate the config for `owner/repository` relative to `home_owner`.
    #[must_use]
    pub fn locate(home_owner: &str, owner: &str, repository: &str) -> Self {
        if owner == home_owner {
            return Self {
                owner: owner.to_string(),
                repository: repository.to_string(),
                is_external: false,
                fetch_owner: owner.to_string(),
                fetch_repository: repository.to_string(),
                file_path: CONFIG_FILE.to_string(),
            };
        }

        let repository = repository
            .strip_suffix(CONFIG_EXTENSION)
            .unwrap_or(repository);

        Self {
            owner: owner.to_string(),
            repository: repository.to_string(),
            is_external: true,
            fetch_owner: home_owner.to_string(),
            fetch_repository: home_owner.to_string(),
            file_path: format!(
                "{REGISTRY_DIR}/{}/{}{CONFIG_EXTENSION}",
                owner.to_lowercase(),
                repository.to_lowercase()
            ),
        }
    }

    /// The `repos/{owner}/{repo}/contents/{path}` API path of the file.
    #[must_use]
    pub fn resolved_path(&self) -> String {
        format!(
            "repos/{}/{}/contents/{}",
            self.fetch_owner, self.fetch_repository, self.file_path
        )
    }

    /// Caller-facing link, built from the requested owner and repository.
    #[must_use]
    pub fn html_url(&self) -> String {
        format!(
            "https://github.com/{}/{}/blob/main/{CONFIG_FILE}",
            self.owner, self.repository
        )
    }
}

/// Parse a registry file path (`.github/mosaic/{owner}/{repo}.toml`) back
/// into its owner and repository.
#[must_use]
pub fn parse_registry_path(path: &str) -> Option<(String, String)> {
    let rest = path.strip_prefix(REGISTRY_DIR)?.strip_prefix('/')?;
    let (owner, file) = rest.split_once('/')?;
    let repository = file.strip_suffix(CONFIG_EXTENSION)?;
    if owner.is_empty() || repository.is_empty() || repository.contains('/') {
        return None;
    }
    Some((owner.to_string(), repository.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_internal_location() {
        let location = ConfigLocation::locate("luxass", "luxass", "lesetid");
        assert!(!location.is_external);
        assert_eq!(
            location.resolved_path(),
            "repos/luxass/lesetid/contents/.github/mosaic.toml"
        );
    }

    #[test]
    fn test_external_location_is_lowercased_and_delegated() {
        let location = ConfigLocation::locate("luxass", "Vercel", "Next.js");
        assert!(location.is_external);
        assert_eq!(
            location.resolved_path(),
            "repos/luxass/luxass/contents/.github/mosaic/vercel/next.js.toml"
        );
        assert_eq!(
            location.html_url(),
            "https://github.com/Vercel/Next.js/blob/main/.github/mosaic.toml"
        );
    }

    #[test]
    fn test_external_strips_config_extension() {
        let location = ConfigLocation::locate("luxass", "vercel", "next.js.toml");
        assert_eq!(location.repository, "next.js");
        assert_eq!(location.file_path, ".github/mosaic/vercel/next.js.toml");
    }

    #[test]
    fn test_parse_registry_path() {
        assert_eq!(
            parse_registry_path(".github/mosaic/vercel/next.js.toml"),
            Some(("vercel".to_string(), "next.js".to_string()))
        );
        assert_eq!(parse_registry_path(".github/mosaic/README.md"), None);
        assert_eq!(parse_registry_path(".github/mosaic/.mosaicignore"), None);
        assert_eq!(parse_registry_path("src/vercel/next.js.toml"), None);
    }

    proptest! {
        #[test]
        fn external_locations_always_target_registry(
            owner in "[A-Za-z0-9-]{1,20}",
            repository in "[A-Za-z0-9._-]{1,30}",
        ) {
            prop_assume!(owner != "home");
            let location = ConfigLocation::locate("home", &owner, &repository);
            let expected_repo = repository
                .strip_suffix(".toml")
                .unwrap_or(&repository)
                .to_lowercase();

            prop_assert!(location.is_external);
            prop_assert_eq!(
                location.resolved_path(),
                format!(
                    "repos/home/home/contents/.github/mosaic/{}/{}.toml",
                    owner.to_lowercase(),
                    expected_repo
                )
            );
        }
    }
}
