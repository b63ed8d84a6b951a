//! `mosaic` resolves mosaic configs from the command line.
//!
//! Results are printed to stdout as JSON; logs go to stderr.

mod cli;
mod commands;
mod tracing;

use std::io::Write;

use ::tracing::Instrument;
use clap::Parser;
use miette::IntoDiagnostic;
use mosaic_core::Settings;
use mosaic_resolver::Resolver;

use crate::cli::Cli;
use crate::commands::Command;
use crate::tracing::TracingConfig;

#[tokio::main]
async fn main() -> miette::Result<()> {
    let cli = Cli::parse();

    crate::tracing::init_tracing(TracingConfig {
        format: cli.log_format,
        level: cli.level.into(),
        ..TracingConfig::default()
    })?;

    let pretty = cli.pretty;
    let command: Command = cli.command.into();
    let span = crate::tracing::command_span(command.name());

    let settings = cli.settings.into_settings()?;
    let output = run(settings, command, pretty)
        .instrument(span)
        .await?;

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{output}").into_diagnostic()?;
    Ok(())
}

async fn run(settings: Settings, command: Command, pretty: bool) -> mosaic_core::Result<String> {
    let resolver = Resolver::new(settings)?;
    commands::execute(&resolver, command, pretty).await
}
