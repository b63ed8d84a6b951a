//! In-memory providers for driving the resolver in tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use mosaic_core::{Error, Result, Settings};
use mosaic_github::{
    ContentFile, DirectoryEntry, EntryKind, GitHubProvider, LatestRelease, RepositoryMetadata,
    TreeEntry, TreeListing,
};
use mosaic_npm::{DistTags, Downloads, NpmRegistry};
use mosaic_resolver::Resolver;

pub const HOME: &str = "luxass";

/// Current value of a call counter.
pub fn calls(counter: &AtomicUsize) -> usize {
    counter.load(Ordering::SeqCst)
}

/// GitHub backed by maps, counting calls per operation.
#[derive(Default)]
pub struct FakeGitHub {
    repositories: HashMap<(String, String), RepositoryMetadata>,
    files: HashMap<(String, String, String), String>,
    directories: HashMap<(String, String, String), Vec<DirectoryEntry>>,
    trees: HashMap<(String, String), TreeListing>,
    releases: HashMap<(String, String), String>,
    failing_releases: bool,
    pub repository_calls: AtomicUsize,
    pub content_calls: AtomicUsize,
    pub release_calls: AtomicUsize,
    pub tree_calls: AtomicUsize,
}

fn key2(owner: &str, repository: &str) -> (String, String) {
    (owner.to_string(), repository.to_string())
}

fn key3(owner: &str, repository: &str, path: &str) -> (String, String, String) {
    (owner.to_string(), repository.to_string(), path.to_string())
}

impl FakeGitHub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_repository(mut self, owner: &str, name: &str, description: Option<&str>) -> Self {
        self.repositories.insert(
            key2(owner, name),
            RepositoryMetadata {
                name: name.to_string(),
                description: description.map(ToString::to_string),
                homepage_url: Some(format!("https://{name}.dev")),
                stargazer_count: 128,
                default_branch: "main".to_string(),
            },
        );
        self
    }

    pub fn with_file(mut self, owner: &str, repository: &str, path: &str, text: &str) -> Self {
        self.files
            .insert(key3(owner, repository, path), text.to_string());
        self
    }

    pub fn with_config(self, owner: &str, repository: &str, toml: &str) -> Self {
        self.with_file(owner, repository, ".github/mosaic.toml", toml)
    }

    pub fn with_directory(
        mut self,
        owner: &str,
        repository: &str,
        path: &str,
        entries: &[(&str, EntryKind)],
    ) -> Self {
        let entries = entries
            .iter()
            .map(|(name, kind)| DirectoryEntry {
                name: (*name).to_string(),
                path: format!("{path}/{name}"),
                kind: *kind,
            })
            .collect();
        self.directories
            .insert(key3(owner, repository, path), entries);
        self
    }

    pub fn with_tree(mut self, owner: &str, repository: &str, dirs: &[&str], truncated: bool) -> Self {
        let tree = dirs
            .iter()
            .map(|path| TreeEntry {
                path: (*path).to_string(),
                kind: "tree".to_string(),
            })
            .chain(std::iter::once(TreeEntry {
                path: "package.json".to_string(),
                kind: "blob".to_string(),
            }))
            .collect();
        self.trees
            .insert(key2(owner, repository), TreeListing { truncated, tree });
        self
    }

    pub fn with_release(mut self, owner: &str, repository: &str, tag: &str) -> Self {
        self.releases.insert(key2(owner, repository), tag.to_string());
        self
    }

    pub const fn with_failing_releases(mut self) -> Self {
        self.failing_releases = true;
        self
    }
}

#[async_trait]
impl GitHubProvider for FakeGitHub {
    async fn repository(&self, owner: &str, name: &str) -> Result<Option<RepositoryMetadata>> {
        self.repository_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.repositories.get(&key2(owner, name)).cloned())
    }

    async fn content(&self, owner: &str, name: &str, path: &str) -> Result<Option<ContentFile>> {
        self.content_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .files
            .get(&key3(owner, name, path))
            .map(|text| ContentFile::from_text(path, text)))
    }

    async fn directory(&self, owner: &str, name: &str, path: &str) -> Result<Vec<DirectoryEntry>> {
        Ok(self
            .directories
            .get(&key3(owner, name, path))
            .cloned()
            .unwrap_or_default())
    }

    async fn tree(&self, owner: &str, name: &str, _branch: &str) -> Result<TreeListing> {
        self.tree_calls.fetch_add(1, Ordering::SeqCst);
        self.trees
            .get(&key2(owner, name))
            .cloned()
            .ok_or_else(|| Error::upstream("github", format!("no tree for {owner}/{name}")))
    }

    async fn latest_release(&self, owner: &str, name: &str) -> Result<Option<LatestRelease>> {
        self.release_calls.fetch_add(1, Ordering::SeqCst);
        if self.failing_releases {
            return Err(Error::upstream("github", "502 Bad Gateway"));
        }
        Ok(self
            .releases
            .get(&key2(owner, name))
            .map(|tag| LatestRelease {
                tag_name: tag.clone(),
            }))
    }
}

/// npm backed by maps, counting calls per operation.
#[derive(Default)]
pub struct FakeNpm {
    latest: HashMap<String, Option<String>>,
    downloads: HashMap<String, u64>,
    failing: bool,
    pub dist_tag_calls: AtomicUsize,
    pub download_calls: AtomicUsize,
}

impl FakeNpm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish `package` with `latest`; `None` publishes it without a latest tag.
    pub fn with_package(mut self, package: &str, latest: Option<&str>) -> Self {
        self.latest
            .insert(package.to_string(), latest.map(ToString::to_string));
        self
    }

    pub fn with_downloads(mut self, package: &str, downloads: u64) -> Self {
        self.downloads.insert(package.to_string(), downloads);
        self
    }

    pub const fn failing(mut self) -> Self {
        self.failing = true;
        self
    }
}

#[async_trait]
impl NpmRegistry for FakeNpm {
    async fn dist_tags(&self, package: &str) -> Result<Option<DistTags>> {
        self.dist_tag_calls.fetch_add(1, Ordering::SeqCst);
        if self.failing {
            return Err(Error::upstream("npm registry", "503 Service Unavailable"));
        }
        Ok(self.latest.get(package).map(|latest| DistTags {
            latest: latest.clone(),
        }))
    }

    async fn downloads_last_month(&self, package: &str) -> Result<Downloads> {
        self.download_calls.fetch_add(1, Ordering::SeqCst);
        if self.failing {
            return Err(Error::upstream("npm downloads", "503 Service Unavailable"));
        }
        self.downloads
            .get(package)
            .map(|&downloads| Downloads { downloads })
            .ok_or_else(|| Error::upstream("npm downloads", format!("no counts for {package}")))
    }
}

/// A resolver over the given fakes, with the fakes kept for inspection.
pub fn resolver(github: FakeGitHub, npm: FakeNpm) -> (Resolver, Arc<FakeGitHub>, Arc<FakeNpm>) {
    let github = Arc::new(github);
    let npm = Arc::new(npm);
    let resolver = Resolver::with_providers(
        github.clone(),
        npm.clone(),
        Settings::new(HOME).with_site_url("https://mosaic.example"),
    )
    .unwrap();
    (resolver, github, npm)
}
