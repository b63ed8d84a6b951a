//! Shapes returned by the GitHub provider.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use mosaic_core::{Error, Result};
use serde::{Deserialize, Serialize};

/// Repository metadata used to enrich projects.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryMetadata {
    /// Repository name.
    pub name: String,
    /// Repository description.
    pub description: Option<String>,
    /// Homepage URL configured on the repository.
    pub homepage_url: Option<String>,
    /// Number of stars.
    pub stargazer_count: u64,
    /// Default branch name.
    pub default_branch: String,
}

/// A file returned by the contents API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentFile {
    /// File name.
    pub name: String,
    /// Repository-relative path.
    pub path: String,
    /// Content encoding, `base64` for regular files.
    pub encoding: String,
    /// Encoded content.
    pub content: String,
}

impl ContentFile {
    /// Create a base64 encoded file from plain text.
    #[must_use]
    pub fn from_text(path: impl Into<String>, text: &str) -> Self {
        let path = path.into();
        let name = path.rsplit('/').next().unwrap_or_default().to_string();
        Self {
            name,
            path,
            encoding: "base64".to_string(),
            content: STANDARD.encode(text),
        }
    }

    /// Decode the file content as UTF-8 text.
    ///
    /// GitHub wraps base64 content at 60 columns; whitespace is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidContent`] for unknown encodings, invalid base64
    /// or non UTF-8 content.
    pub fn decode(&self) -> Result<String> {
        if self.encoding != "base64" {
            return Err(Error::InvalidContent {
                path: self.path.clone(),
                message: format!("unsupported encoding '{}'", self.encoding),
            });
        }

        let compact: String = self
            .content
            .chars()
            .filter(|c| !c.is_ascii_whitespace())
            .collect();

        let bytes = STANDARD.decode(compact).map_err(|e| Error::InvalidContent {
            path: self.path.clone(),
            message: format!("invalid base64: {e}"),
        })?;

        String::from_utf8(bytes).map_err(|e| Error::InvalidContent {
            path: self.path.clone(),
            message: format!("content is not UTF-8: {e}"),
        })
    }
}

/// Kind of an entry in a directory listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// Regular file.
    File,
    /// Directory.
    Dir,
    /// Symbolic link.
    Symlink,
    /// Git submodule.
    Submodule,
}

/// An entry of a directory listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryEntry {
    /// Entry name.
    pub name: String,
    /// Repository-relative path.
    pub path: String,
    /// Entry kind.
    #[serde(rename = "type")]
    pub kind: EntryKind,
}

/// A recursive tree listing of a branch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeListing {
    /// Whether GitHub cut the listing short.
    #[serde(default)]
    pub truncated: bool,
    /// Entries in traversal order.
    #[serde(default)]
    pub tree: Vec<TreeEntry>,
}

/// One entry of a tree listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeEntry {
    /// Repository-relative path.
    pub path: String,
    /// `blob`, `tree` or `commit`.
    #[serde(rename = "type")]
    pub kind: String,
}

impl TreeEntry {
    /// Whether the entry is a directory.
    #[must_use]
    pub fn is_dir(&self) -> bool {
        self.kind == "tree"
    }
}

/// The latest published release of a repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LatestRelease {
    /// Tag the release points at.
    pub tag_name: String,
}
