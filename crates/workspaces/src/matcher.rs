//! Selecting workspace member directories from a repository tree.
//!
//! A directory is a member when it matches at least one `workspaces` glob,
//! matches none of the `!`-prefixed globs, and is not ignored by the
//! config's gitignore-style `workspace.ignores`.

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use ignore::gitignore::{Gitignore, GitignoreBuilder};
use tracing::debug;

use crate::error::{Error, Result};

/// Compiled member matcher.
#[derive(Debug, Clone)]
pub struct MemberMatcher {
    includes: GlobSet,
    excludes: GlobSet,
    ignores: Gitignore,
}

impl MemberMatcher {
    /// Compile the matcher.
    ///
    /// # Arguments
    ///
    /// * `workspace_globs` - the `workspaces` field of the root `package.json`
    /// * `ignores` - the `workspace.ignores` field of the mosaic config
    ///
    /// # Errors
    ///
    /// Returns an error naming the first pattern that does not compile.
    pub fn new(workspace_globs: &[String], ignores: &[String]) -> Result<Self> {
        let mut includes = GlobSetBuilder::new();
        let mut excludes = GlobSetBuilder::new();

        for pattern in workspace_globs {
            if let Some(negated) = pattern.strip_prefix('!') {
                excludes.add(compile_glob(negated)?);
            } else {
                includes.add(compile_glob(pattern)?);
            }
        }

        let mut gitignore = GitignoreBuilder::new("");
        for (index, pattern) in ignores.iter().enumerate() {
            gitignore
                .add_line(None, pattern)
                .map_err(|e| Error::InvalidIgnorePattern {
                    index,
                    pattern: pattern.clone(),
                    message: e.to_string(),
                })?;
        }

        Ok(Self {
            includes: build_set(includes)?,
            excludes: build_set(excludes)?,
            ignores: gitignore.build().map_err(|e| Error::InvalidIgnorePattern {
                index: 0,
                pattern: ignores.join(", "),
                message: e.to_string(),
            })?,
        })
    }

    /// Whether the directory at `path` is a workspace member.
    #[must_use]
    pub fn is_member(&self, path: &str) -> bool {
        let path = normalize(path);
        if path.is_empty() {
            return false;
        }

        self.includes.is_match(path)
            && !self.excludes.is_match(path)
            && !self
                .ignores
                .matched_path_or_any_parents(path, true)
                .is_ignore()
    }

    /// Filter `directories` down to members, keeping their order.
    pub fn select<'a, I>(&self, directories: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let members: Vec<String> = directories
            .into_iter()
            .filter(|path| self.is_member(path))
            .map(|path| normalize(path).to_string())
            .collect();

        debug!(count = members.len(), "Selected workspace members");
        members
    }
}

fn normalize(path: &str) -> &str {
    let path = path.strip_prefix("./").unwrap_or(path);
    path.trim_matches('/')
}

fn compile_glob(pattern: &str) -> Result<globset::Glob> {
    GlobBuilder::new(normalize(pattern))
        .literal_separator(true)
        .build()
        .map_err(|e| Error::InvalidWorkspaceGlob {
            pattern: pattern.to_string(),
            message: e.to_string(),
        })
}

fn build_set(builder: GlobSetBuilder) -> Result<GlobSet> {
    builder.build().map_err(|e| Error::InvalidWorkspaceGlob {
        pattern: String::new(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn globs(patterns: &[&str]) -> Vec<String> {
        patterns.iter().map(|p| (*p).to_string()).collect()
    }

    #[test]
    fn test_star_does_not_cross_separator() {
        let matcher = MemberMatcher::new(&globs(&["packages/*"]), &[]).unwrap();
        assert!(matcher.is_member("packages/core"));
        assert!(!matcher.is_member("packages/core/src"));
        assert!(!matcher.is_member("packages"));
        assert!(!matcher.is_member("apps/web"));
    }

    #[test]
    fn test_double_star_and_negation() {
        let matcher =
            MemberMatcher::new(&globs(&["packages/**", "!packages/legacy"]), &[]).unwrap();
        assert!(matcher.is_member("packages/core"));
        assert!(matcher.is_member("packages/nested/deep"));
        assert!(!matcher.is_member("packages/legacy"));
    }

    #[test]
    fn test_leading_dot_slash_is_ignored() {
        let matcher = MemberMatcher::new(&globs(&["./packages/*"]), &[]).unwrap();
        assert!(matcher.is_member("packages/core"));
    }

    #[test]
    fn test_gitignore_precedence() {
        let matcher = MemberMatcher::new(
            &globs(&["packages/*", "playgrounds/*"]),
            &globs(&["playgrounds/", "packages/*", "!packages/core"]),
        )
        .unwrap();

        assert!(matcher.is_member("packages/core"));
        assert!(!matcher.is_member("packages/utils"));
        assert!(!matcher.is_member("playgrounds/vite"));
    }

    #[test]
    fn test_select_keeps_tree_order() {
        let matcher = MemberMatcher::new(&globs(&["packages/*"]), &globs(&["packages/b"])).unwrap();
        let members = matcher.select(["packages/c", "packages/a", "packages/b", "README.md"]);
        assert_eq!(members, vec!["packages/c".to_string(), "packages/a".to_string()]);
    }

    #[test]
    fn test_invalid_glob() {
        let err = MemberMatcher::new(&globs(&["packages/["]), &[]).unwrap_err();
        assert!(matches!(err, Error::InvalidWorkspaceGlob { .. }));
    }
}
