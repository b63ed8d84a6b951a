//! Per-package effective configuration.

use mosaic_core::{
    Deprecated, MosaicConfig, PackageManifest, ReadmeSetting, WebsiteSetting, WorkspaceOverride,
};
use serde::Serialize;

/// A workspace member discovered in the repository tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkspacePackage {
    /// Package name from its manifest.
    pub name: String,
    /// Repository-relative directory of the package.
    pub path: String,
    /// The package manifest.
    pub manifest: PackageManifest,
}

/// The configuration a single workspace package is enriched with.
///
/// Every field follows the same precedence: the package override, then the
/// top-level config, then the repository-derived default.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EffectivePackageConfig {
    /// Description.
    pub description: Option<String>,
    /// Keywords.
    pub keywords: Option<Vec<String>>,
    /// Image.
    pub image: Option<String>,
    /// Deprecation notice.
    pub deprecated: Option<Deprecated>,
    /// Website toggle.
    pub website: WebsiteSetting,
    /// Readme toggle; the repository default is the package's own readme.
    pub readme: ReadmeSetting,
    /// Whether to resolve the package version.
    pub version: bool,
}

impl EffectivePackageConfig {
    /// Merge the override for `package` over `config`.
    #[must_use]
    pub fn merge(
        config: &MosaicConfig,
        override_: Option<&WorkspaceOverride>,
        package: &WorkspacePackage,
        repository_description: Option<&str>,
    ) -> Self {
        let project = &config.project;

        let readme = match override_.and_then(|o| o.readme.clone()) {
            Some(readme) => readme,
            None => config.readme.clone(),
        };
        let readme = match readme {
            ReadmeSetting::RepositoryDefault => {
                ReadmeSetting::Path(format!("{}/README.md", package.path.trim_matches('/')))
            }
            other => other,
        };

        Self {
            description: override_
                .and_then(|o| o.description.clone())
                .or_else(|| project.description.clone())
                .or_else(|| repository_description.map(str::to_string)),
            keywords: override_
                .and_then(|o| o.keywords.clone())
                .or_else(|| project.keywords.clone()),
            image: override_
                .and_then(|o| o.image.clone())
                .or_else(|| project.image.clone()),
            deprecated: override_
                .and_then(|o| o.deprecated.clone())
                .or_else(|| project.deprecated.clone()),
            website: override_
                .and_then(|o| o.website.clone())
                .unwrap_or_else(|| config.website.clone()),
            readme,
            version: override_
                .and_then(|o| o.version)
                .unwrap_or(project.version),
        }
    }
}
