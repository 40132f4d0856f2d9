//! Match command - show which provider handles a URL.

use anyhow::Result;
use clap::Args;
use mediaembed_store::SettingsStore;
use serde::Serialize;
use tracing::info;

use super::build_registry;
use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, ExitCode, OutputFormat};

/// Arguments for the match command.
#[derive(Args)]
pub struct MatchArgs {
    /// Resource URL.
    pub url: String,
}

#[derive(Serialize)]
struct MatchOutput<'a> {
    url: &'a str,
    provider: Option<&'a str>,
}

/// Runs the match command.
pub async fn run(args: &MatchArgs, cli: &Cli, store: &SettingsStore) -> Result<ExitCode> {
    let registry = build_registry(&store.get().await)?;
    let provider = registry.select(&args.url);
    info!(url = %args.url, provider = ?provider.map(|p| p.name()), "Matched URL");

    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);
            match provider {
                Some(p) => println!("{}", formatter.format_provider_line(p)),
                None if !cli.quiet => eprintln!("No provider matches {}", args.url),
                None => {}
            }
        }
        OutputFormat::Json => {
            let output = MatchOutput {
                url: &args.url,
                provider: provider.map(|p| p.name()),
            };
            println!("{}", JsonFormatter::new(cli.pretty).format(&output)?);
        }
    }

    Ok(if provider.is_some() {
        ExitCode::Success
    } else {
        ExitCode::NoProvider
    })
}
