//! `package.json` parsing and validation.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::{Error, Result, Violation};

/// Default manifest path at the repository root.
pub const MANIFEST_FILE: &str = "package.json";

const MAX_NAME_LENGTH: usize = 214;

static PACKAGE_NAME: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(
        r"^(?:@(?:[a-z0-9*~-][a-z0-9*._~-]*)?/[a-z0-9._~-]|[a-z0-9~-])[a-z0-9._~-]*$",
    )
    .ok()
});

/// The fields of a `package.json` the resolver cares about.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PackageManifest {
    /// Package name.
    pub name: Option<String>,
    /// Package version.
    pub version: Option<String>,
    /// Whether publishing is disabled.
    pub private: Option<bool>,
    /// Workspace member globs, in declaration order.
    pub workspaces: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct RawManifest {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    version: Option<String>,
    #[serde(default)]
    private: Option<bool>,
    #[serde(default)]
    workspaces: Option<RawWorkspaces>,
}

/// `workspaces` is either a list of globs or Yarn's `{ "packages": [...] }`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawWorkspaces {
    Globs(Vec<String>),
    Yarn {
        #[serde(default)]
        packages: Vec<String>,
    },
}

impl From<RawWorkspaces> for Vec<String> {
    fn from(raw: RawWorkspaces) -> Self {
        match raw {
            RawWorkspaces::Globs(globs) | RawWorkspaces::Yarn { packages: globs } => globs,
        }
    }
}

/// Normalize a manifest location to a repository-relative `package.json` path.
///
/// `packages/core` becomes `packages/core/package.json`; a path that already
/// names the manifest is kept. A leading `/` is stripped.
#[must_use]
pub fn manifest_path(path: &str) -> String {
    let path = path.trim_start_matches('/');
    if path.is_empty() || path == MANIFEST_FILE {
        return MANIFEST_FILE.to_string();
    }
    if path.ends_with("/package.json") {
        return path.to_string();
    }
    format!("{}/{MANIFEST_FILE}", path.trim_end_matches('/'))
}

/// Parse and validate manifest JSON.
///
/// `subject` names the document in validation errors.
///
/// # Errors
///
/// Returns [`Error::Validation`] if the text is not JSON, a field has the
/// wrong type, or `name` is not a valid npm package name.
pub fn parse_manifest(json: &str, subject: &str) -> Result<PackageManifest> {
    let deserializer = &mut serde_json::Deserializer::from_str(json);
    let raw: RawManifest = serde_path_to_error::deserialize(deserializer).map_err(|e| {
        let path = e.path().to_string();
        let pointer = if path == "." {
            "/".to_string()
        } else {
            format!("/{}", path.replace('.', "/"))
        };
        Error::validation(subject, vec![Violation::new(pointer, e.inner().to_string())])
    })?;

    if let Some(name) = &raw.name {
        let violations = validate_package_name(name);
        if !violations.is_empty() {
            return Err(Error::validation(subject, violations));
        }
    }

    Ok(PackageManifest {
        name: raw.name,
        version: raw.version,
        private: raw.private,
        workspaces: raw.workspaces.map(Into::into),
    })
}

fn validate_package_name(name: &str) -> Vec<Violation> {
    let mut violations = Vec::new();

    if name.is_empty() || name.len() > MAX_NAME_LENGTH {
        violations.push(Violation::new(
            "/name",
            format!("package name must be between 1 and {MAX_NAME_LENGTH} characters"),
        ));
    }

    let matches = PACKAGE_NAME
        .as_ref()
        .is_some_and(|pattern| pattern.is_match(name));
    if !matches {
        violations.push(Violation::new(
            "/name",
            format!("\"{name}\" is not a valid npm package name"),
        ));
    }

    violations
}
