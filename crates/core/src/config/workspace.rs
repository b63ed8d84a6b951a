//! Workspace (multi-package) configuration.

use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::enrichment::{RawReadme, RawWebsite, ReadmeSetting, WebsiteSetting};
use super::Deprecated;

/// Workspace section of a mosaic config.
///
/// Overrides are authored as a table keyed by package name. The key becomes
/// [`WorkspaceOverride::name`] when the section is constructed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawWorkspace", into = "RawWorkspace")]
pub struct WorkspaceConfig {
    /// Resolve every workspace package as its own project.
    pub enabled: bool,
    /// Gitignore-style patterns excluding package directories.
    pub ignores: Vec<String>,
    /// Per-package overrides, in declaration order.
    pub overrides: Vec<WorkspaceOverride>,
}

impl WorkspaceConfig {
    /// Find the override declared for `package_name`.
    #[must_use]
    pub fn override_for(&self, package_name: &str) -> Option<&WorkspaceOverride> {
        self.overrides.iter().find(|o| o.name == package_name)
    }
}

/// Per-package override. Fields present here win over the top-level config.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkspaceOverride {
    /// Declared package name (the table key).
    pub name: String,
    /// Drop the package from the output.
    pub ignore: bool,
    /// Description override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Keywords override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<String>>,
    /// Image override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Deprecation override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<Deprecated>,
    /// Website override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<WebsiteSetting>,
    /// Readme override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub readme: Option<ReadmeSetting>,
    /// Version resolution override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<bool>,
}

/// Surface form of the `workspace` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct RawWorkspace {
    /// Resolve every workspace package as its own project.
    #[serde(default)]
    pub enabled: bool,
    /// Gitignore-style patterns excluding package directories.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ignores: Vec<String>,
    /// Overrides keyed by package name.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub overrides: IndexMap<String, RawOverride>,
}

/// Surface form of one override.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct RawOverride {
    /// Drop the package from the output.
    #[serde(default)]
    pub ignore: bool,
    /// Description override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Keywords override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<String>>,
    /// Image override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Deprecation override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<Deprecated>,
    /// Website override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(with = "Option<RawWebsite>")]
    pub website: Option<WebsiteSetting>,
    /// Readme override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(with = "Option<RawReadme>")]
    pub readme: Option<ReadmeSetting>,
    /// Version resolution override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<bool>,
}

impl From<RawWorkspace> for WorkspaceConfig {
    fn from(raw: RawWorkspace) -> Self {
        let overrides = raw
            .overrides
            .into_iter()
            .map(|(name, o)| WorkspaceOverride {
                name,
                ignore: o.ignore,
                description: o.description,
                keywords: o.keywords,
                image: o.image,
                deprecated: o.deprecated,
                website: o.website,
                readme: o.readme,
                version: o.version,
            })
            .collect();

        Self {
            enabled: raw.enabled,
            ignores: raw.ignores,
            overrides,
        }
    }
}

impl From<WorkspaceConfig> for RawWorkspace {
    fn from(config: WorkspaceConfig) -> Self {
        let overrides = config
            .overrides
            .into_iter()
            .map(|o| {
                (
                    o.name,
                    RawOverride {
                        ignore: o.ignore,
                        description: o.description,
                        keywords: o.keywords,
                        image: o.image,
                        deprecated: o.deprecated,
                        website: o.website,
                        readme: o.readme,
                        version: o.version,
                    },
                )
            })
            .collect();

        Self {
            enabled: config.enabled,
            ignores: config.ignores,
            overrides,
        }
    }
}
