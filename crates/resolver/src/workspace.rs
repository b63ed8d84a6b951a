//! Workspace expansion: one project per workspace package.

use futures::future::try_join_all;
use mosaic_core::{
    Error, MANIFEST_FILE, MosaicConfig, NpmSetting, Project, Result, WorkspaceConfig,
};
use mosaic_github::RepositoryMetadata;
use mosaic_workspaces::{EffectivePackageConfig, MemberMatcher, WorkspacePackage};
use tracing::{debug, info, instrument};

use crate::assembler::{ProjectAssembler, website_block};
use crate::manifest::require_name;
use crate::version::ManifestFallback;

/// Expands a workspace repository into its packages.
///
/// Any package that cannot be resolved fails the whole expansion; there is
/// no partial output.
#[derive(Clone, Copy)]
pub struct WorkspaceExpander<'a> {
    assembler: ProjectAssembler<'a>,
}

impl<'a> WorkspaceExpander<'a> {
    /// Create an expander that enriches packages through `assembler`.
    #[must_use]
    pub const fn new(assembler: ProjectAssembler<'a>) -> Self {
        Self { assembler }
    }

    /// Expand `owner/repository` into projects, in tree discovery order.
    ///
    /// # Errors
    ///
    /// - [`Error::MissingField`] if the root manifest declares no workspaces
    ///   or a package manifest has no name
    /// - [`Error::ManifestNotFound`] if a manifest is missing
    /// - [`Error::UnsupportedShape`] if the tree is truncated or empty
    #[instrument(skip(self, config, workspace, metadata))]
    pub async fn expand(
        &self,
        owner: &str,
        repository: &str,
        config: &MosaicConfig,
        workspace: &WorkspaceConfig,
        metadata: &RepositoryMetadata,
    ) -> Result<Vec<Project>> {
        let packages = self.discover(owner, repository, workspace, metadata).await?;

        let mut projects = Vec::with_capacity(packages.len());
        for package in &packages {
            let override_ = workspace.override_for(&package.name);
            if override_.is_some_and(|o| o.ignore) {
                debug!(package = %package.name, "Package ignored by override");
                continue;
            }

            let effective = EffectivePackageConfig::merge(
                config,
                override_,
                package,
                metadata.description.as_deref(),
            );
            projects.push(
                self.package_project(owner, repository, config, metadata, package, &effective)
                    .await?,
            );
        }

        info!(%owner, %repository, count = projects.len(), "Expanded workspace");
        Ok(projects)
    }

    /// Find the workspace packages and load their manifests.
    async fn discover(
        &self,
        owner: &str,
        repository: &str,
        workspace: &WorkspaceConfig,
        metadata: &RepositoryMetadata,
    ) -> Result<Vec<WorkspacePackage>> {
        let manifests = self.assembler.manifests();

        let root = manifests.read(owner, repository, MANIFEST_FILE).await?;
        let globs = root
            .workspaces
            .as_ref()
            .filter(|globs| !globs.is_empty())
            .ok_or_else(|| {
                Error::missing_field(
                    "workspaces",
                    format!(
                        "workspace mode is enabled but the root package.json of {owner}/{repository} declares no workspaces"
                    ),
                )
            })?;

        let listing = self
            .assembler
            .github()
            .tree(owner, repository, &metadata.default_branch)
            .await?;
        if listing.truncated {
            return Err(Error::unsupported_shape(format!(
                "the file tree of {owner}/{repository} is truncated; repositories this large are not supported"
            )));
        }
        if listing.tree.is_empty() {
            return Err(Error::unsupported_shape(format!(
                "the file tree of {owner}/{repository} is empty"
            )));
        }

        let matcher = MemberMatcher::new(globs, &workspace.ignores)?;
        let directories = matcher.select(
            listing
                .tree
                .iter()
                .filter(|entry| entry.is_dir())
                .map(|entry| entry.path.as_str()),
        );
        debug!(?directories, "Matched workspace directories");

        try_join_all(directories.into_iter().map(|path| async move {
            let manifest = manifests.read(owner, repository, &path).await?;
            let name = require_name(&manifest, owner, repository, &path, "workspace expansion")?;
            Ok::<_, Error>(WorkspacePackage {
                name,
                path,
                manifest,
            })
        }))
        .await
    }

    async fn package_project(
        &self,
        owner: &str,
        repository: &str,
        config: &MosaicConfig,
        metadata: &RepositoryMetadata,
        package: &WorkspacePackage,
        effective: &EffectivePackageConfig,
    ) -> Result<Project> {
        let mut project = Project {
            name: package.name.clone(),
            title: config
                .project
                .name
                .clone()
                .unwrap_or_else(|| metadata.name.clone()),
            description: effective.description.clone(),
            keywords: effective.keywords.clone(),
            image: effective.image.clone(),
            ignore: config.project.ignore,
            deprecated: effective.deprecated.clone(),
            stars: config.project.stars.then_some(metadata.stargazer_count),
            priority: config.project.priority,
            website: website_block(&effective.website, metadata),
            readme: self
                .assembler
                .readme_url(owner, repository, &effective.readme),
            npm: None,
            version: None,
        };

        if let NpmSetting::Enabled { name, downloads } = &config.npm {
            let name = name.clone().unwrap_or_else(|| package.name.clone());
            project.npm = Some(self.assembler.npm_package(name, *downloads).await?);
        }

        if effective.version {
            project.version = Some(
                self.assembler
                    .versions()
                    .resolve(owner, repository, ManifestFallback::Loaded(&package.manifest))
                    .await?,
            );
        }

        Ok(project)
    }
}
