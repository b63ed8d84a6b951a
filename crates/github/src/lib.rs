//! GitHub provider for the mosaic resolver.
//!
//! This crate provides:
//! - [`GitHubProvider`], the read-only view of GitHub the resolver depends on
//! - [`GitHubClient`], its implementation against the REST API
//! - the response [`models`] shared by both

pub mod client;
pub mod models;
pub mod provider;

pub use client::GitHubClient;
pub use models::{
    ContentFile, DirectoryEntry, EntryKind, LatestRelease, RepositoryMetadata, TreeEntry,
    TreeListing,
};
pub use provider::GitHubProvider;
