//! Subcommand execution.
//!
//! Every command renders its result as JSON; nothing here writes to stdout.

use mosaic_core::{Error, Result};
use mosaic_resolver::{BatchOutcome, ProjectListing, RepositoryRef, Resolver};
use serde::Serialize;
use tracing::{debug, info};

/// A parsed subcommand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Resolve {
        repository: RepositoryRef,
    },
    Config {
        repository: RepositoryRef,
    },
    Batch {
        repositories: Vec<RepositoryRef>,
        registry: bool,
    },
    Registry,
}

impl Command {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Resolve { .. } => "resolve",
            Self::Config { .. } => "config",
            Self::Batch { .. } => "batch",
            Self::Registry => "registry",
        }
    }
}

/// Run `command` and render its output.
pub async fn execute(resolver: &Resolver, command: Command, pretty: bool) -> Result<String> {
    match command {
        Command::Resolve { repository } => {
            let projects = resolver
                .resolve_projects(&repository.owner, &repository.repository)
                .await?;
            render(&ProjectListing::new(projects), pretty)
        }
        Command::Config { repository } => {
            let config = resolver
                .resolve_config(&repository.owner, &repository.repository)
                .await?;
            render(&config, pretty)
        }
        Command::Batch {
            repositories,
            registry,
        } => {
            let outcomes = batch(resolver, repositories, registry).await?;
            render(&outcomes, pretty)
        }
        Command::Registry => render(&resolver.registry_repositories().await?, pretty),
    }
}

async fn batch(
    resolver: &Resolver,
    mut repositories: Vec<RepositoryRef>,
    registry: bool,
) -> Result<Vec<BatchOutcome>> {
    if registry {
        repositories.extend(resolver.registry_repositories().await?);
    }
    if repositories.is_empty() {
        return Err(Error::configuration(
            "no repositories to resolve; pass OWNER/NAME arguments or --registry",
        ));
    }

    let mut outcomes = Vec::with_capacity(repositories.len());
    for chunk in repositories.chunks(resolver.settings().max_batch_size) {
        debug!(count = chunk.len(), "Resolving chunk");
        outcomes.extend(resolver.resolve_many(chunk).await?);
    }

    let failed = outcomes
        .iter()
        .filter(|o| matches!(o, BatchOutcome::Failed { .. }))
        .count();
    info!(total = outcomes.len(), failed, "Batch resolved");
    Ok(outcomes)
}

fn render<T: Serialize>(value: &T, pretty: bool) -> Result<String> {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    rendered.map_err(|e| Error::configuration(format!("Failed to serialize output: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_names() {
        assert_eq!(Command::Registry.name(), "registry");
        assert_eq!(
            Command::Resolve {
                repository: RepositoryRef::new("a", "b")
            }
            .name(),
            "resolve"
        );
    }

    #[test]
    fn test_render() {
        let repositories = vec![RepositoryRef::new("vercel", "next.js")];
        assert_eq!(
            render(&repositories, false).unwrap(),
            r#"[{"owner":"vercel","repository":"next.js"}]"#
        );
        assert!(render(&repositories, true).unwrap().contains('\n'));
    }
}
