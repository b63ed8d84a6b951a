//! Enrichment toggles.
//!
//! `readme`, `website` and `npm` accept a boolean shorthand, a string, or a
//! table on the surface. They are normalized into closed enums on
//! deserialization so downstream branching is exhaustive.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

const fn default_true() -> bool {
    true
}

/// Whether and where to expose the repository readme.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawReadme", into = "RawReadme")]
pub enum ReadmeSetting {
    /// No readme link.
    #[default]
    Disabled,
    /// Use the repository's default readme.
    RepositoryDefault,
    /// Use the readme at this repository-relative path.
    Path(String),
}

impl ReadmeSetting {
    /// Whether a readme link should be produced.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        !matches!(self, Self::Disabled)
    }
}

/// Surface form of the `readme` field.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum RawReadme {
    /// `true` uses the repository readme, `false` disables it.
    Flag(bool),
    /// Relative path of the readme to use.
    Path(String),
    /// Table form.
    Table(ReadmeTable),
}

/// Table form of the `readme` field.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct ReadmeTable {
    /// Include the readme of the project.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Path to the readme file; auto detected when omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl From<RawReadme> for ReadmeSetting {
    fn from(raw: RawReadme) -> Self {
        match raw {
            RawReadme::Flag(false) | RawReadme::Table(ReadmeTable { enabled: false, .. }) => {
                Self::Disabled
            }
            RawReadme::Flag(true) | RawReadme::Table(ReadmeTable { path: None, .. }) => {
                Self::RepositoryDefault
            }
            RawReadme::Path(path)
            | RawReadme::Table(ReadmeTable {
                path: Some(path), ..
            }) => {
                if path.trim().is_empty() {
                    Self::RepositoryDefault
                } else {
                    Self::Path(path)
                }
            }
        }
    }
}

impl From<ReadmeSetting> for RawReadme {
    fn from(setting: ReadmeSetting) -> Self {
        match setting {
            ReadmeSetting::Disabled => Self::Flag(false),
            ReadmeSetting::RepositoryDefault => Self::Flag(true),
            ReadmeSetting::Path(path) => Self::Path(path),
        }
    }
}

/// Optional metadata shown on the project page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct WebsiteOptions {
    /// Explicit URL; the repository homepage is used when omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Page title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Page description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Keywords to show on the project page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<String>>,
}

/// Whether and how to expose a website for the project.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawWebsite", into = "RawWebsite")]
pub enum WebsiteSetting {
    /// No website block.
    #[default]
    Disabled,
    /// Website block; `url: None` means the repository homepage.
    Enabled(WebsiteOptions),
}

impl WebsiteSetting {
    /// Whether a website block should be produced.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        matches!(self, Self::Enabled(_))
    }

    /// The explicit URL, if one was configured.
    #[must_use]
    pub fn explicit_url(&self) -> Option<&str> {
        match self {
            Self::Enabled(options) => options.url.as_deref(),
            Self::Disabled => None,
        }
    }
}

/// Surface form of the `website` field.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum RawWebsite {
    /// `true` uses the repository homepage, `false` disables it.
    Flag(bool),
    /// Explicit website URL.
    Url(String),
    /// Table form.
    Table(WebsiteTable),
}

/// Table form of the `website` field.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct WebsiteTable {
    /// Include the website block.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Explicit website URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Page title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Page description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Keywords to show on the project page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<String>>,
}

impl From<RawWebsite> for WebsiteSetting {
    fn from(raw: RawWebsite) -> Self {
        match raw {
            RawWebsite::Flag(false) | RawWebsite::Table(WebsiteTable { enabled: false, .. }) => {
                Self::Disabled
            }
            RawWebsite::Flag(true) => Self::Enabled(WebsiteOptions::default()),
            RawWebsite::Url(url) => Self::Enabled(WebsiteOptions {
                url: Some(url),
                ..WebsiteOptions::default()
            }),
            RawWebsite::Table(table) => Self::Enabled(WebsiteOptions {
                url: table.url,
                title: table.title,
                description: table.description,
                keywords: table.keywords,
            }),
        }
    }
}

impl From<WebsiteSetting> for RawWebsite {
    fn from(setting: WebsiteSetting) -> Self {
        match setting {
            WebsiteSetting::Disabled => Self::Flag(false),
            WebsiteSetting::Enabled(options) => Self::Table(WebsiteTable {
                enabled: true,
                url: options.url,
                title: options.title,
                description: options.description,
                keywords: options.keywords,
            }),
        }
    }
}

/// Whether and how to link the project to an npm package.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawNpm", into = "RawNpm")]
pub enum NpmSetting {
    /// No npm block.
    #[default]
    Disabled,
    /// npm block.
    Enabled {
        /// Explicit package name; read from `package.json` when omitted.
        name: Option<String>,
        /// Include the last-month download count.
        downloads: bool,
    },
}

/// Surface form of the `npm` field.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum RawNpm {
    /// `true` enables the package with download counts.
    Flag(bool),
    /// Table form.
    Table(NpmTable),
}

/// Table form of the `npm` field.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct NpmTable {
    /// Include information about the package.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// The package name; inferred from `package.json` when omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Include the number of downloads in the last month.
    #[serde(default)]
    pub downloads: bool,
}

impl From<RawNpm> for NpmSetting {
    fn from(raw: RawNpm) -> Self {
        match raw {
            RawNpm::Flag(false) | RawNpm::Table(NpmTable { enabled: false, .. }) => Self::Disabled,
            RawNpm::Flag(true) => Self::Enabled {
                name: None,
                downloads: true,
            },
            RawNpm::Table(NpmTable {
                name, downloads, ..
            }) => Self::Enabled { name, downloads },
        }
    }
}

impl From<NpmSetting> for RawNpm {
    fn from(setting: NpmSetting) -> Self {
        match setting {
            NpmSetting::Disabled => Self::Flag(false),
            NpmSetting::Enabled { name, downloads } => Self::Table(NpmTable {
                enabled: true,
                name,
                downloads,
            }),
        }
    }
}
