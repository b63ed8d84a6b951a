use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use mosaic_core::{Result, Settings};
use mosaic_resolver::RepositoryRef;

use crate::commands::Command;
use crate::tracing::{LogLevel, TracingFormat};

#[derive(Parser, Debug)]
#[command(name = "mosaic")]
#[command(about = "Resolve mosaic configs into enriched project records")]
#[command(long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(
        short = 'l',
        long,
        global = true,
        help = "Set logging level",
        default_value = "warn",
        value_enum
    )]
    pub level: LogLevel,

    #[arg(
        long,
        global = true,
        help = "Log output format",
        default_value = "compact",
        value_enum
    )]
    pub log_format: TracingFormat,

    #[arg(long, global = true, help = "Pretty-print JSON output")]
    pub pretty: bool,

    #[command(flatten)]
    pub settings: SettingsArgs,
}

/// Engine settings. Flags win over the `MOSAIC_*` environment read by
/// [`Settings::from_env`].
#[derive(Args, Debug)]
pub struct SettingsArgs {
    #[arg(
        long,
        global = true,
        help = "Owner whose {owner}/{owner} repository holds external configs [env: MOSAIC_HOME_OWNER]"
    )]
    pub home_owner: Option<String>,

    #[arg(long, global = true, hide = true)]
    pub github_token: Option<String>,

    #[arg(long, global = true, help = "GitHub API base URL [env: MOSAIC_GITHUB_API_URL]")]
    pub github_api_url: Option<String>,

    #[arg(long, global = true, help = "npm registry base URL [env: MOSAIC_NPM_REGISTRY_URL]")]
    pub npm_registry_url: Option<String>,

    #[arg(long, global = true, help = "npm downloads API base URL [env: MOSAIC_NPM_DOWNLOADS_URL]")]
    pub npm_downloads_url: Option<String>,

    #[arg(long, global = true, help = "Base URL of readme links [env: MOSAIC_SITE_URL]")]
    pub site_url: Option<String>,

    #[arg(
        long = "timeout",
        global = true,
        help = "Per-request timeout in seconds [env: MOSAIC_REQUEST_TIMEOUT_SECS]"
    )]
    pub timeout_secs: Option<u64>,

    #[arg(
        long,
        global = true,
        help = "Repositories resolved concurrently per batch [env: MOSAIC_MAX_BATCH_SIZE]"
    )]
    pub max_batch_size: Option<usize>,
}

impl SettingsArgs {
    /// Build engine settings from the environment, then apply the flags.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for malformed environment values or
    /// settings that fail validation.
    pub fn into_settings(self) -> Result<Settings> {
        let mut settings = Settings::from_env()?;

        if let Some(owner) = self.home_owner {
            settings.home_owner = owner;
        }
        if let Some(token) = self.github_token {
            settings = settings.with_github_token(token);
        }
        if let Some(url) = self.github_api_url {
            settings = settings.with_github_api_url(url);
        }
        if let Some(url) = self.npm_registry_url {
            settings = settings.with_npm_registry_url(url);
        }
        if let Some(url) = self.npm_downloads_url {
            settings = settings.with_npm_downloads_url(url);
        }
        if let Some(url) = self.site_url {
            settings = settings.with_site_url(url);
        }
        if let Some(secs) = self.timeout_secs {
            settings = settings.with_request_timeout(Duration::from_secs(secs));
        }
        if let Some(size) = self.max_batch_size {
            settings = settings.with_max_batch_size(size);
        }

        settings.validate()?;
        Ok(settings)
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(about = "Resolve the projects of a repository")]
    Resolve {
        #[arg(value_name = "OWNER/NAME")]
        repository: RepositoryRef,
    },
    #[command(about = "Locate and validate the mosaic config of a repository")]
    Config {
        #[arg(value_name = "OWNER/NAME")]
        repository: RepositoryRef,
    },
    #[command(about = "Resolve several repositories")]
    Batch {
        #[arg(value_name = "OWNER/NAME")]
        repositories: Vec<RepositoryRef>,
        #[arg(long, help = "Also resolve every repository in the home registry")]
        registry: bool,
    },
    #[command(about = "List the repositories registered in the home registry")]
    Registry,
}

impl From<Commands> for Command {
    fn from(cmd: Commands) -> Self {
        match cmd {
            Commands::Resolve { repository } => Self::Resolve { repository },
            Commands::Config { repository } => Self::Config { repository },
            Commands::Batch {
                repositories,
                registry,
            } => Self::Batch {
                repositories,
                registry,
            },
            Commands::Registry => Self::Registry,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mosaic_core::Error;
    use mosaic_core::settings::{DEFAULT_GITHUB_API_URL, DEFAULT_HOME_OWNER};

    const CLEAN_ENV: [(&str, Option<&str>); 9] = [
        ("MOSAIC_HOME_OWNER", None),
        ("GITHUB_TOKEN", None),
        ("GH_TOKEN", None),
        ("MOSAIC_GITHUB_API_URL", None),
        ("MOSAIC_NPM_REGISTRY_URL", None),
        ("MOSAIC_NPM_DOWNLOADS_URL", None),
        ("MOSAIC_SITE_URL", None),
        ("MOSAIC_REQUEST_TIMEOUT_SECS", None),
        ("MOSAIC_MAX_BATCH_SIZE", None),
    ];

    #[test]
    fn test_cli_default_values() {
        temp_env::with_vars(CLEAN_ENV, || {
            let cli = Cli::try_parse_from(["mosaic", "registry"]).unwrap();

            assert_eq!(cli.level, LogLevel::Warn);
            assert_eq!(cli.log_format, TracingFormat::Compact);
            assert!(!cli.pretty);
            assert!(matches!(cli.command, Commands::Registry));

            let settings = cli.settings.into_settings().unwrap();
            assert_eq!(settings.home_owner, DEFAULT_HOME_OWNER);
            assert_eq!(settings.github_api_url, DEFAULT_GITHUB_API_URL);
            assert_eq!(settings.request_timeout, Duration::from_secs(30));
            assert_eq!(settings.max_batch_size, 10);
            assert!(settings.github_token.is_none());
        });
    }

    #[test]
    fn test_cli_log_level_parsing() {
        let cli = Cli::try_parse_from(["mosaic", "--level", "debug", "registry"]).unwrap();
        assert_eq!(cli.level, LogLevel::Debug);

        let cli = Cli::try_parse_from(["mosaic", "registry", "-l", "error"]).unwrap();
        assert_eq!(cli.level, LogLevel::Error);

        let cli = Cli::try_parse_from(["mosaic", "--log-format", "json", "registry"]).unwrap();
        assert_eq!(cli.log_format, TracingFormat::Json);
    }

    #[test]
    fn test_invalid_log_level() {
        let result = Cli::try_parse_from(["mosaic", "--level", "invalid", "registry"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_subcommand() {
        let result = Cli::try_parse_from(["mosaic"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_resolve_parses_repository() {
        let cli = Cli::try_parse_from(["mosaic", "resolve", "vercel/next.js", "--pretty"]).unwrap();
        assert!(cli.pretty);
        match cli.command {
            Commands::Resolve { repository } => {
                assert_eq!(repository, RepositoryRef::new("vercel", "next.js"));
            }
            other => panic!("Expected Resolve command, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_repository_is_rejected() {
        let result = Cli::try_parse_from(["mosaic", "config", "next.js"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_batch_command_conversion() {
        let cli = Cli::try_parse_from(["mosaic", "batch", "a/b", "c/d", "--registry"]).unwrap();
        let command: Command = cli.command.into();
        assert_eq!(
            command,
            Command::Batch {
                repositories: vec![RepositoryRef::new("a", "b"), RepositoryRef::new("c", "d")],
                registry: true,
            }
        );
    }

    #[test]
    fn test_settings_from_env() {
        temp_env::with_vars(
            [
                ("MOSAIC_HOME_OWNER", Some("octo")),
                ("GITHUB_TOKEN", None),
                ("GH_TOKEN", Some("gh-token")),
                ("MOSAIC_SITE_URL", Some("https://example.dev")),
                ("MOSAIC_REQUEST_TIMEOUT_SECS", Some("5")),
                ("MOSAIC_MAX_BATCH_SIZE", Some("3")),
            ],
            || {
                let cli = Cli::try_parse_from(["mosaic", "registry"]).unwrap();
                let settings = cli.settings.into_settings().unwrap();
                assert_eq!(settings.home_owner, "octo");
                assert_eq!(settings.site_url, "https://example.dev");
                assert_eq!(settings.request_timeout, Duration::from_secs(5));
                assert_eq!(settings.max_batch_size, 3);
                assert!(settings.github_token.is_some());
            },
        );
    }

    #[test]
    fn test_flags_override_env() {
        temp_env::with_vars(
            [
                ("MOSAIC_HOME_OWNER", Some("octo")),
                ("MOSAIC_MAX_BATCH_SIZE", Some("3")),
            ],
            || {
                let cli = Cli::try_parse_from([
                    "mosaic",
                    "--home-owner",
                    "luxass",
                    "--max-batch-size",
                    "7",
                    "registry",
                ])
                .unwrap();
                let settings = cli.settings.into_settings().unwrap();
                assert_eq!(settings.home_owner, "luxass");
                assert_eq!(settings.max_batch_size, 7);
            },
        );
    }

    #[test]
    fn test_zero_batch_size_is_rejected() {
        temp_env::with_vars(CLEAN_ENV, || {
            let cli =
                Cli::try_parse_from(["mosaic", "--max-batch-size", "0", "batch", "a/b"]).unwrap();
            let err = cli.settings.into_settings().unwrap_err();
            assert!(matches!(err, Error::Configuration(_)));
        });

        temp_env::with_var("MOSAIC_MAX_BATCH_SIZE", Some("0"), || {
            let cli = Cli::try_parse_from(["mosaic", "registry"]).unwrap();
            assert!(cli.settings.into_settings().is_err());
        });
    }

    #[test]
    fn test_malformed_env_is_reported() {
        temp_env::with_var("MOSAIC_REQUEST_TIMEOUT_SECS", Some("soon"), || {
            let cli = Cli::try_parse_from(["mosaic", "registry"]).unwrap();
            let err = cli.settings.into_settings().unwrap_err();
            assert!(matches!(err, Error::Configuration(_)));
        });
    }
}
