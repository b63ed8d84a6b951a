//! Resolved project records.

use serde::{Deserialize, Serialize};

use crate::config::Deprecated;

/// A project resolved from a mosaic config and enriched with upstream data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Repository name, or package name for workspace members.
    pub name: String,
    /// Display title.
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Mirrors `project.ignore`.
    pub ignore: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<Deprecated>,
    /// Star count, only when requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stars: Option<u64>,
    /// Ordering hint for consumers.
    pub priority: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<ProjectWebsite>,
    /// URL of the readme sub-resource.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub readme: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub npm: Option<NpmPackage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

/// Website block of a project.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectWebsite {
    /// Explicit URL or the repository homepage; `None` when neither exists.
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<String>>,
}

/// npm block of a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NpmPackage {
    /// Package name.
    pub name: String,
    /// Package page on npmjs.com.
    pub url: String,
    /// Downloads in the last month, only when requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub downloads: Option<u64>,
}

impl NpmPackage {
    /// Create an npm block pointing at the package page on npmjs.com.
    #[must_use]
    pub fn new(name: impl Into<String>, downloads: Option<u64>) -> Self {
        let name = name.into();
        let url = format!("https://www.npmjs.com/package/{name}");
        Self {
            name,
            url,
            downloads,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_npm_package_url() {
        let npm = NpmPackage::new("@luxass/utils", None);
        assert_eq!(npm.url, "https://www.npmjs.com/package/@luxass/utils");
    }

    #[test]
    fn test_serializes_camel_case_and_skips_absent_fields() {
        let project = Project {
            name: "mosaic".into(),
            title: "Mosaic".into(),
            priority: 1.5,
            website: Some(ProjectWebsite::default()),
            ..Project::default()
        };

        let json = serde_json::to_value(&project).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "name": "mosaic",
                "title": "Mosaic",
                "ignore": false,
                "priority": 1.5,
                "website": { "url": null }
            })
        );
    }
}
