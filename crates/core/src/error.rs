//! Error types for config resolution and project enrichment.

use miette::Diagnostic;
use serde::Serialize;
use thiserror::Error;

/// Result type for mosaic operations.
pub type Result<T> = std::result::Result<T, Error>;

/// A single schema violation, addressed by a JSON pointer into the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// JSON pointer to the offending value (`/` for the document root).
    pub path: String,
    /// Human readable description of the problem.
    pub message: String,
}

impl Violation {
    /// Create a new violation.
    #[must_use]
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        let path = path.into();
        Self {
            path: if path.is_empty() { "/".to_string() } else { path },
            message: message.into(),
        }
    }
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// The failure taxonomy callers branch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Nothing to resolve at the requested location.
    NotFound,
    /// A document failed schema validation.
    Validation,
    /// A required external call failed or returned an unusable shape.
    UpstreamUnavailable,
    /// A field required by an enabled enrichment is absent.
    MissingRequiredField,
    /// The upstream data has a shape the engine does not support.
    UnsupportedShape,
    /// The engine itself was misconfigured or misused by the caller.
    Configuration,
}

/// Errors that can occur while resolving a mosaic config into projects.
#[derive(Error, Debug, Diagnostic)]
pub enum Error {
    /// No config file exists at the resolved location.
    #[error("No mosaic config found at {location}")]
    #[diagnostic(
        code(mosaic::not_found),
        help(
            "Commit a `.github/mosaic.toml` to the repository, or a registry entry for external repositories"
        )
    )]
    NotFound {
        /// The `repos/{owner}/{repo}/contents/{path}` location that was fetched.
        location: String,
    },

    /// The repository itself does not exist or is not visible.
    #[error("Repository {owner}/{repository} not found")]
    #[diagnostic(
        code(mosaic::repository_not_found),
        help("Check the owner and repository name, and that the token can see the repository")
    )]
    RepositoryNotFound {
        /// Repository owner.
        owner: String,
        /// Repository name.
        repository: String,
    },

    /// A document failed validation.
    #[error("Invalid {subject}: {}", format_violations(.violations))]
    #[diagnostic(
        code(mosaic::validation),
        help("Fix the listed fields; every violation is reported with its JSON pointer")
    )]
    Validation {
        /// What was being validated (e.g. `mosaic config`).
        subject: String,
        /// All violations found.
        violations: Vec<Violation>,
    },

    /// An external service failed or answered with something unusable.
    #[error("{service} unavailable: {message}")]
    #[diagnostic(
        code(mosaic::upstream_unavailable),
        help("This is usually transient; retry the resolution later")
    )]
    Upstream {
        /// The service that failed (`github`, `npm registry`, ...).
        service: String,
        /// Description of the failure.
        message: String,
    },

    /// The remote object was not an encoded file.
    #[error("Invalid content response for {path}: {message}")]
    #[diagnostic(
        code(mosaic::invalid_content),
        help("The path must point at a single file, not a directory or submodule")
    )]
    InvalidContent {
        /// Path of the object inside the repository.
        path: String,
        /// Description of what was wrong.
        message: String,
    },

    /// A field required by an enabled enrichment is missing.
    #[error("Missing required field `{field}`: {context}")]
    #[diagnostic(
        code(mosaic::missing_field),
        help("Add the field, or disable the enrichment that needs it")
    )]
    MissingField {
        /// Name of the missing field.
        field: String,
        /// Where it was expected and why it was needed.
        context: String,
    },

    /// A package manifest does not exist where one was required.
    #[error("No package.json found at {owner}/{repository}/{path}")]
    #[diagnostic(
        code(mosaic::manifest_not_found),
        help("Every workspace member and every npm/version enabled project needs a package.json")
    )]
    ManifestNotFound {
        /// Repository owner.
        owner: String,
        /// Repository name.
        repository: String,
        /// Normalized manifest path.
        path: String,
    },

    /// Upstream data has a shape that is not supported.
    #[error("Unsupported upstream shape: {message}")]
    #[diagnostic(code(mosaic::unsupported_shape))]
    UnsupportedShape {
        /// Description of the unsupported shape.
        message: String,
    },

    /// Engine misconfiguration or invalid caller input.
    #[error("Configuration error: {0}")]
    #[diagnostic(code(mosaic::configuration))]
    Configuration(String),
}

fn format_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl Error {
    /// Create an [`Error::Upstream`].
    pub fn upstream(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Upstream {
            service: service.into(),
            message: message.into(),
        }
    }

    /// Create an [`Error::MissingField`].
    pub fn missing_field(field: impl Into<String>, context: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
            context: context.into(),
        }
    }

    /// Create an [`Error::Validation`].
    pub fn validation(subject: impl Into<String>, violations: Vec<Violation>) -> Self {
        Self::Validation {
            subject: subject.into(),
            violations,
        }
    }

    /// Create an [`Error::UnsupportedShape`].
    pub fn unsupported_shape(message: impl Into<String>) -> Self {
        Self::UnsupportedShape {
            message: message.into(),
        }
    }

    /// Create an [`Error::Configuration`].
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Map this error onto the caller-facing taxonomy.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } | Self::RepositoryNotFound { .. } => ErrorKind::NotFound,
            Self::Validation { .. } => ErrorKind::Validation,
            Self::Upstream { .. } | Self::InvalidContent { .. } => ErrorKind::UpstreamUnavailable,
            Self::MissingField { .. } | Self::ManifestNotFound { .. } => {
                ErrorKind::MissingRequiredField
            }
            Self::UnsupportedShape { .. } => ErrorKind::UnsupportedShape,
            Self::Configuration(_) => ErrorKind::Configuration,
        }
    }

    /// Whether retrying the same resolution may succeed.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self.kind(), ErrorKind::UpstreamUnavailable)
    }

    /// Structured violations, if this is a validation error.
    #[must_use]
    pub fn violations(&self) -> &[Violation] {
        match self {
            Self::Validation { violations, .. } => violations,
            _ => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_mapping() {
        assert_eq!(
            Error::NotFound {
                location: "repos/a/b/contents/.github/mosaic.toml".into()
            }
            .kind(),
            ErrorKind::NotFound
        );
        assert_eq!(
            Error::upstream("npm registry", "timed out").kind(),
            ErrorKind::UpstreamUnavailable
        );
        assert_eq!(
            Error::ManifestNotFound {
                owner: "a".into(),
                repository: "b".into(),
                path: "package.json".into(),
            }
            .kind(),
            ErrorKind::MissingRequiredField
        );
        assert_eq!(
            Error::unsupported_shape("tree truncated").kind(),
            ErrorKind::UnsupportedShape
        );
    }

    #[test]
    fn test_only_upstream_is_retryable() {
        assert!(Error::upstream("github", "502").is_retryable());
        assert!(!Error::missing_field("name", "package.json").is_retryable());
        assert!(!Error::validation("mosaic config", vec![]).is_retryable());
    }

    #[test]
    fn test_validation_message_lists_violations() {
        let err = Error::validation(
            "mosaic config",
            vec![
                Violation::new("/project/priority", "\"high\" is not of type \"number\""),
                Violation::new("", "\"project\" is a required property"),
            ],
        );
        let message = err.to_string();
        assert!(message.contains("/project/priority"));
        assert!(message.starts_with("Invalid mosaic config"));
        assert_eq!(err.violations()[1].path, "/");
    }
}
