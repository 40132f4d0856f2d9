//! Fetch command - fetch a descriptor and store it.

use anyhow::{Result, anyhow};
use clap::Args;
use mediaembed_core::{EmbedProvider, FetchParams, PARAM_MAX_HEIGHT, PARAM_MAX_WIDTH};
use mediaembed_fetch::{DescriptorFetcher, FetchContext};
use mediaembed_providers::ProviderRegistry;
use mediaembed_store::{RecordStore, SettingsStore};
use tracing::{info, warn};

use super::{build_registry, open_records};
use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, ExitCode, OutputFormat};

/// Arguments for the fetch command.
#[derive(Args)]
pub struct FetchArgs {
    /// Resource URL.
    pub url: String,

    /// Use this provider instead of matching the URL.
    #[arg(long, short)]
    pub provider: Option<String>,

    /// Maximum embed width requested from the provider.
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub max_width: Option<u32>,

    /// Maximum embed height requested from the provider.
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub max_height: Option<u32>,

    /// Print the record without storing it.
    #[arg(long)]
    pub no_store: bool,
}

impl FetchArgs {
    fn params(&self) -> FetchParams {
        let mut params = FetchParams::for_url(&self.url);
        if let Some(width) = self.max_width {
            params.insert(PARAM_MAX_WIDTH, width.to_string());
        }
        if let Some(height) = self.max_height {
            params.insert(PARAM_MAX_HEIGHT, height.to_string());
        }
        params
    }
}

/// Picks the provider named on the command line, or the first match.
pub fn resolve_provider<'a>(
    registry: &'a ProviderRegistry,
    name: Option<&str>,
    url: &str,
) -> Result<Option<&'a dyn EmbedProvider>> {
    match name {
        Some(name) => registry
            .get(name)
            .map(Some)
            .ok_or_else(|| anyhow!("Unknown provider: {name}")),
        None => Ok(registry.select(url)),
    }
}

/// Runs the fetch command.
pub async fn run(args: &FetchArgs, cli: &Cli, store: &SettingsStore) -> Result<ExitCode> {
    let settings = store.get().await;
    let registry = build_registry(&settings)?;

    let Some(provider) = resolve_provider(&registry, args.provider.as_deref(), &args.url)? else {
        if !cli.quiet {
            eprintln!("No provider matches {}", args.url);
        }
        return Ok(ExitCode::NoProvider);
    };

    let ctx = FetchContext::with_settings(settings.http.fetch_settings())?;
    let fetcher = DescriptorFetcher::from_context(&ctx);
    let outcome = fetcher.execute(provider, &args.params()).await;
    info!(
        provider = %provider.name(),
        failed = outcome.record.failed,
        duration = ?outcome.duration,
        "Fetch finished"
    );

    if args.no_store {
        warn!("Record not stored (--no-store)");
    } else {
        let records = open_records(&settings).await?;
        records.put(&args.url, outcome.record.clone()).await?;
    }

    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);
            println!("{}", formatter.format_record(&outcome.record, outcome.error.as_ref()));
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format_outcome(&outcome)?);
        }
    }

    Ok(if outcome.record.failed {
        ExitCode::FetchFailed
    } else {
        ExitCode::Success
    })
}
