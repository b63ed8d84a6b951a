//! Repository references and per-repository batch outcomes.

use std::fmt;
use std::str::FromStr;

use mosaic_core::{Error, ErrorKind, Project};
use serde::{Deserialize, Serialize};

/// An `owner/repository` pair.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RepositoryRef {
    /// Repository owner.
    pub owner: String,
    /// Repository name.
    pub repository: String,
}

impl RepositoryRef {
    /// Create a reference.
    #[must_use]
    pub fn new(owner: impl Into<String>, repository: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            repository: repository.into(),
        }
    }
}

impl fmt::Display for RepositoryRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repository)
    }
}

impl FromStr for RepositoryRef {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('/') {
            Some((owner, repository))
                if !owner.is_empty() && !repository.is_empty() && !repository.contains('/') =>
            {
                Ok(Self::new(owner, repository))
            }
            _ => Err(Error::configuration(format!(
                "expected a repository as 'owner/name', got '{s}'"
            ))),
        }
    }
}

/// The outcome of resolving one repository of a batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BatchOutcome {
    /// The repository resolved.
    Resolved {
        /// The repository.
        repository: RepositoryRef,
        /// Its projects (empty when the config is ignored).
        projects: Vec<Project>,
    },
    /// No config or no repository.
    NotFound {
        /// The repository.
        repository: RepositoryRef,
    },
    /// Resolution failed.
    Failed {
        /// The repository.
        repository: RepositoryRef,
        /// Failure kind.
        kind: ErrorKind,
        /// Whether a retry may succeed.
        retryable: bool,
        /// Error message.
        message: String,
    },
}

impl BatchOutcome {
    /// Classify a single resolution result.
    #[must_use]
    pub fn from_result(repository: RepositoryRef, result: mosaic_core::Result<Vec<Project>>) -> Self {
        match result {
            Ok(projects) => Self::Resolved {
                repository,
                projects,
            },
            Err(error) if error.kind() == ErrorKind::NotFound => Self::NotFound { repository },
            Err(error) => Self::Failed {
                repository,
                kind: error.kind(),
                retryable: error.is_retryable(),
                message: error.to_string(),
            },
        }
    }

    /// The repository this outcome is for.
    #[must_use]
    pub const fn repository(&self) -> &RepositoryRef {
        match self {
            Self::Resolved { repository, .. }
            | Self::NotFound { repository }
            | Self::Failed { repository, .. } => repository,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_repository_ref() {
        let reference: RepositoryRef = "vercel/next.js".parse().unwrap();
        assert_eq!(reference, RepositoryRef::new("vercel", "next.js"));
        assert_eq!(reference.to_string(), "vercel/next.js");

        assert!("vercel".parse::<RepositoryRef>().is_err());
        assert!("/next.js".parse::<RepositoryRef>().is_err());
        assert!("a/b/c".parse::<RepositoryRef>().is_err());
    }

    #[test]
    fn test_outcome_classification() {
        let repository = RepositoryRef::new("a", "b");

        let outcome = BatchOutcome::from_result(
            repository.clone(),
            Err(Error::NotFound {
                location: "repos/a/b/contents/.github/mosaic.toml".into(),
            }),
        );
        assert_eq!(outcome, BatchOutcome::NotFound { repository: repository.clone() });

        let outcome =
            BatchOutcome::from_result(repository.clone(), Err(Error::upstream("github", "502")));
        match outcome {
            BatchOutcome::Failed {
                kind, retryable, ..
            } => {
                assert_eq!(kind, ErrorKind::UpstreamUnavailable);
                assert!(retryable);
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn test_outcome_serialization() {
        let outcome = BatchOutcome::NotFound {
            repository: RepositoryRef::new("a", "b"),
        };
        assert_eq!(
            serde_json::to_value(&outcome).unwrap(),
            serde_json::json!({
                "status": "not_found",
                "repository": { "owner": "a", "repository": "b" }
            })
        );
    }
}
