//! Render command - embed markup from a stored record.

use anyhow::{Context, Result};
use clap::Args;
use mediaembed_core::{EmbedOptions, EmbedRenderer, Location};
use mediaembed_store::{EmbedSettings, RecordStore, SettingsStore, StoreError};
use serde::Serialize;
use tracing::{debug, warn};

use super::{build_registry, open_records};
use crate::output::JsonFormatter;
use crate::{Cli, ExitCode, OutputFormat};

/// Arguments for the render command.
#[derive(Args)]
pub struct RenderArgs {
    /// Resource URL the record was stored under.
    pub url: String,

    /// Where the embed is shown (main or sidebar).
    #[arg(long, short, default_value = "main")]
    pub location: Location,

    /// Width (defaults to settings).
    #[arg(long)]
    pub width: Option<u32>,

    /// Height (defaults to settings).
    #[arg(long)]
    pub height: Option<u32>,

    /// Sidebar width (defaults to settings).
    #[arg(long)]
    pub width_side: Option<u32>,

    /// Sidebar height (defaults to settings).
    #[arg(long)]
    pub height_side: Option<u32>,
}

impl RenderArgs {
    /// Builds placement options, command-line values first.
    pub fn options(&self, defaults: &EmbedSettings) -> EmbedOptions {
        EmbedSettings {
            width: self.width.unwrap_or(defaults.width),
            height: self.height.unwrap_or(defaults.height),
            width_side: self.width_side.or(defaults.width_side),
            height_side: self.height_side.or(defaults.height_side),
        }
        .options(self.location)
    }
}

#[derive(Serialize)]
struct RenderOutput<'a> {
    url: &'a str,
    provider: &'a str,
    location: Location,
    width: u32,
    height: u32,
    markup: &'a str,
}

/// Runs the render command.
pub async fn run(args: &RenderArgs, cli: &Cli, store: &SettingsStore) -> Result<ExitCode> {
    let settings = store.get().await;
    let records = open_records(&settings).await?;

    let record = records
        .get(&args.url)
        .await?
        .ok_or_else(|| StoreError::NotFound(args.url.clone()))
        .context("Run `mediaembed fetch` first")?;

    let registry = build_registry(&settings)?;
    let renderer = match registry.get(&record.provider) {
        Some(provider) => EmbedRenderer::for_provider(provider),
        None => {
            warn!(provider = %record.provider, "Provider no longer registered, using default embed node");
            EmbedRenderer::new()
        }
    };

    let options = args.options(&settings.embed);
    debug!(?options, "Rendering");

    let markup = match renderer.render(&record, &options) {
        Ok(markup) => markup,
        Err(e) => {
            if !cli.quiet {
                eprintln!("Cannot render {}: {e}", args.url);
            }
            return Ok(ExitCode::RenderFailed);
        }
    };

    match cli.format {
        OutputFormat::Text => println!("{markup}"),
        OutputFormat::Json => {
            let output = RenderOutput {
                url: &args.url,
                provider: &record.provider,
                location: options.location,
                width: options.effective_width(),
                height: options.effective_height(),
                markup: &markup,
            };
            println!("{}", JsonFormatter::new(cli.pretty).format(&output)?);
        }
    }

    Ok(ExitCode::Success)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(location: Location) -> RenderArgs {
        RenderArgs {
            url: "https://vimeo.com/1".to_string(),
            location,
            width: None,
            height: Some(400),
            width_side: None,
            height_side: None,
        }
    }

    #[test]
    fn test_options_fall_back_to_settings() {
        let defaults = EmbedSettings::default();
        let options = args(Location::Main).options(&defaults);
        assert_eq!(options.width, defaults.width);
        assert_eq!(options.height, 400);
        assert_eq!(options.width_side, defaults.width_side);
    }

    #[test]
    fn test_sidebar_uses_side_defaults() {
        let defaults = EmbedSettings {
            width: 640,
            height: 360,
            width_side: Some(300),
            height_side: None,
        };
        let options = args(Location::Sidebar).options(&defaults);
        assert_eq!(options.effective_width(), 300);
        assert_eq!(options.effective_height(), 400);
    }
}
