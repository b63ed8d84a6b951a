//! Mosaic config types.
//!
//! A mosaic config is a TOML document describing how a repository should be
//! surfaced as one or more projects. The surface shape (what authors write)
//! is described by the `Raw*` types and exported as a JSON Schema; the
//! typed [`MosaicConfig`] is what the resolver works with.

mod enrichment;
pub mod validate;
mod workspace;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub use enrichment::{
    NpmSetting, NpmTable, RawNpm, RawReadme, RawWebsite, ReadmeSetting, ReadmeTable,
    WebsiteOptions, WebsiteSetting, WebsiteTable,
};
pub use validate::SchemaValidator;
pub use workspace::{RawOverride, RawWorkspace, WorkspaceConfig, WorkspaceOverride};

/// A validated mosaic config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
#[schemars(description = "Project configuration for mosaic")]
pub struct MosaicConfig {
    /// Project level settings.
    pub project: ProjectConfig,

    /// Link the project to an npm package.
    #[serde(default)]
    #[schemars(with = "RawNpm")]
    pub npm: NpmSetting,

    /// Expose the repository readme.
    #[serde(default)]
    #[schemars(with = "RawReadme")]
    pub readme: ReadmeSetting,

    /// Expose a website for the project.
    #[serde(default)]
    #[schemars(with = "RawWebsite")]
    pub website: WebsiteSetting,

    /// Resolve every workspace package as its own project.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(with = "Option<RawWorkspace>")]
    pub workspace: Option<WorkspaceConfig>,
}

impl MosaicConfig {
    /// The workspace section, if workspace mode is enabled.
    #[must_use]
    pub fn enabled_workspace(&self) -> Option<&WorkspaceConfig> {
        self.workspace.as_ref().filter(|w| w.enabled)
    }
}

/// The `[project]` section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    /// Display name; the repository name is used when omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Description; the repository description is used when omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Ordering hint for consumers. Higher sorts first.
    #[serde(default)]
    pub priority: f64,

    /// Exclude the repository entirely.
    #[serde(default)]
    pub ignore: bool,

    /// Resolve the current version from releases, npm, or `package.json`.
    #[serde(default)]
    pub version: bool,

    /// Include the star count.
    #[serde(default)]
    pub stars: bool,

    /// Keywords shown with the project.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<String>>,

    /// Image shown with the project.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    /// Mark the project as deprecated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<Deprecated>,
}

/// Deprecation notice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct Deprecated {
    /// The deprecation message.
    pub message: String,
    /// The replacement project.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replacement: Option<String>,
}
