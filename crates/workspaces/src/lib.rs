//! Workspace support for the mosaic resolver.
//!
//! A repository whose mosaic config enables `workspace` is surfaced as one
//! project per package. This crate holds the parts of that expansion that do
//! not touch the network:
//!
//! - [`MemberMatcher`] - selects member directories from a repository tree
//!   using the root `package.json` `workspaces` globs and the config's
//!   gitignore-style `workspace.ignores`
//! - [`EffectivePackageConfig`] - merges a package override over the
//!   top-level config and the repository defaults
//!
//! # Matching rules
//!
//! - `*` matches within one path segment; `**` crosses segments.
//! - `workspaces` entries starting with `!` exclude directories.
//! - `workspace.ignores` follows gitignore precedence: later patterns win,
//!   `!` re-includes, and a directory is ignored when it or a parent is.
//!
//! # Example
//!
//! ```rust,ignore
//! use mosaic_workspaces::MemberMatcher;
//!
//! let matcher = MemberMatcher::new(&["packages/*".into()], &["packages/legacy".into()])?;
//! let members = matcher.select(tree.iter().filter(|e| e.is_dir()).map(|e| e.path.as_str()));
//! ```

#![warn(missing_docs)]

pub mod error;
pub mod matcher;
pub mod merge;

pub use error::{Error, Result};
pub use matcher::MemberMatcher;
pub use merge::{EffectivePackageConfig, WorkspacePackage};
