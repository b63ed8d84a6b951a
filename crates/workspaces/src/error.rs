//! Error types for workspace member matching.

use miette::Diagnostic;
use thiserror::Error;

/// Result type for workspace operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building workspace matchers.
#[derive(Error, Debug, Diagnostic)]
pub enum Error {
    /// A `workspaces` glob in the root `package.json` does not compile.
    #[error("Invalid workspace glob '{pattern}': {message}")]
    #[diagnostic(
        code(mosaic::workspaces::invalid_glob),
        help("Check the `workspaces` field of the root package.json")
    )]
    InvalidWorkspaceGlob {
        /// The offending pattern.
        pattern: String,
        /// Description of the problem.
        message: String,
    },

    /// A `workspace.ignores` entry of the mosaic config does not compile.
    #[error("Invalid workspace ignore pattern '{pattern}': {message}")]
    #[diagnostic(
        code(mosaic::workspaces::invalid_ignore),
        help("`workspace.ignores` uses gitignore syntax")
    )]
    InvalidIgnorePattern {
        /// Index of the pattern in `workspace.ignores`.
        index: usize,
        /// The offending pattern.
        pattern: String,
        /// Description of the problem.
        message: String,
    },
}

impl From<Error> for mosaic_core::Error {
    fn from(error: Error) -> Self {
        match error {
            Error::InvalidWorkspaceGlob { .. } => Self::unsupported_shape(error.to_string()),
            Error::InvalidIgnorePattern {
                index,
                pattern,
                message,
            } => Self::validation(
                mosaic_core::config::validate::CONFIG_SUBJECT,
                vec![mosaic_core::Violation::new(
                    format!("/workspace/ignores/{index}"),
                    format!("invalid ignore pattern '{pattern}': {message}"),
                )],
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mosaic_core::ErrorKind;

    #[test]
    fn test_glob_error_is_unsupported_shape() {
        let error = Error::InvalidWorkspaceGlob {
            pattern: "packages/[".to_string(),
            message: "unclosed character class".to_string(),
        };
        assert!(error.to_string().contains("packages/["));

        let core: mosaic_core::Error = error.into();
        assert_eq!(core.kind(), ErrorKind::UnsupportedShape);
    }

    #[test]
    fn test_ignore_error_points_at_config_field() {
        let core: mosaic_core::Error = Error::InvalidIgnorePattern {
            index: 2,
            pattern: "[".to_string(),
            message: "unclosed".to_string(),
        }
        .into();

        assert_eq!(core.kind(), ErrorKind::Validation);
        assert_eq!(core.violations()[0].path, "/workspace/ignores/2");
    }

    #[test]
    fn test_diagnostic_codes() {
        use miette::Diagnostic;

        let error = Error::InvalidWorkspaceGlob {
            pattern: "x".to_string(),
            message: "y".to_string(),
        };
        assert_eq!(
            error.code().map(|c| c.to_string()),
            Some("mosaic::workspaces::invalid_glob".to_string())
        );
        assert!(error.help().is_some());
    }
}
