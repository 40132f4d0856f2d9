// Lint configuration for this crate
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! `MediaEmbed` CLI - oEmbed lookups from the command line.
//!
//! # Examples
//!
//! ```bash
//! # List providers
//! mediaembed providers
//!
//! # Which provider handles a URL?
//! mediaembed match https://youtu.be/dQw4w9WgXcQ
//!
//! # Fetch and store the descriptor
//! mediaembed fetch https://vimeo.com/76979871 --max-width 640
//!
//! # Render the stored record for the sidebar
//! mediaembed render https://vimeo.com/76979871 --location sidebar --width-side 300
//!
//! # JSON output
//! mediaembed --format json --pretty fetch https://vimeo.com/76979871
//! ```

mod commands;
mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use mediaembed_store::{LogLevel, SettingsStore};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use commands::{config, fetch, matching, providers, render};

// ============================================================================
// CLI Definition
// ============================================================================

/// `MediaEmbed` CLI - fetch and render oEmbed descriptors.
#[derive(Parser)]
#[command(name = "mediaembed")]
#[command(about = "Fetch, store and render oEmbed descriptors")]
#[command(long_about = r#"
MediaEmbed selects an oEmbed provider for a resource URL, fetches its
descriptor, stores it, and renders embed markup from the stored copy.

Built-in providers:
  • Vimeo (vimeo.com)
  • YouTube (youtube.com, youtu.be)
  • Flickr (flickr.com, flic.kr)
  • Dailymotion (dailymotion.com, dai.ly)
  • SoundCloud (soundcloud.com, snd.sc)

More providers can be declared under "custom_providers" in settings.

Examples:
  mediaembed match https://youtu.be/x          # Which provider?
  mediaembed fetch https://vimeo.com/1         # Fetch and store
  mediaembed render https://vimeo.com/1        # Markup for the main area
  mediaembed config show                       # Current settings
"#)]
#[command(version)]
#[command(author = "MediaEmbed Contributors")]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (text or json).
    #[arg(long, short = 'f', default_value = "text", global = true)]
    pub format: OutputFormat,

    /// Pretty-print JSON output.
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Settings file to use instead of the default.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output (show debug info).
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Quiet mode (minimal output).
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

/// CLI commands.
#[derive(Subcommand)]
pub enum Commands {
    /// List available providers.
    #[command(visible_alias = "p")]
    Providers,

    /// Show which provider handles a URL.
    #[command(visible_alias = "m")]
    Match(matching::MatchArgs),

    /// Fetch a descriptor and store it.
    Fetch(fetch::FetchArgs),

    /// Render embed markup from a stored record.
    #[command(visible_alias = "r")]
    Render(render::RenderArgs),

    /// Manage configuration.
    Config(config::ConfigArgs),
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable text with colors.
    #[default]
    Text,
    /// JSON output for scripting.
    Json,
}

/// CLI exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success.
    Success = 0,
    /// General error.
    Error = 1,
    /// No provider handles the URL.
    NoProvider = 2,
    /// The fetch produced a failed record.
    FetchFailed = 3,
    /// The stored record could not be rendered.
    RenderFailed = 4,
}

// ============================================================================
// Logging Setup
// ============================================================================

fn setup_logging(verbose: bool, quiet: bool, level: LogLevel) {
    if quiet {
        return;
    }

    let filter = if verbose {
        EnvFilter::new("mediaembed=debug,info")
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(format!("mediaembed={level}")))
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let store = match &cli.config {
        Some(path) => SettingsStore::load(path.clone()).await,
        None => SettingsStore::load_default().await,
    };
    let level = match &store {
        Ok(store) => store.get().await.log_level,
        Err(_) => LogLevel::default(),
    };
    setup_logging(cli.verbose, cli.quiet, level);

    let result = match store {
        Ok(store) => run(&cli, &store).await,
        Err(e) => Err(e.into()),
    };

    match result {
        Ok(ExitCode::Success) => Ok(()),
        Ok(code) => std::process::exit(code as i32),
        Err(e) => {
            if !cli.quiet {
                eprintln!("Error: {e:#}");
            }
            std::process::exit(ExitCode::Error as i32);
        }
    }
}

async fn run(cli: &Cli, store: &SettingsStore) -> Result<ExitCode> {
    match &cli.command {
        Commands::Providers => providers::run(cli, store).await,
        Commands::Match(args) => matching::run(args, cli, store).await,
        Commands::Fetch(args) => fetch::run(args, cli, store).await,
        Commands::Render(args) => render::run(args, cli, store).await,
        Commands::Config(args) => config::run(args, cli, store).await,
    }
}
