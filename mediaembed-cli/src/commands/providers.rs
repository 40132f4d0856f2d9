//! Providers command - list available providers.

use anyhow::Result;
use mediaembed_store::SettingsStore;
use tracing::info;

use super::build_registry;
use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, ExitCode, OutputFormat};

/// Runs the providers command.
pub async fn run(cli: &Cli, store: &SettingsStore) -> Result<ExitCode> {
    let settings = store.get().await;
    let registry = build_registry(&settings)?;
    info!(count = registry.len(), "Listing providers");

    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);

            println!("{}", formatter.format_providers_header());
            println!("{}", "─".repeat(70));
            for provider in registry.iter() {
                println!("{}", formatter.format_provider_line(provider));
            }

            println!();
            println!(
                "Total: {} providers ({} custom)",
                registry.len(),
                settings.custom_providers.len()
            );
            if cli.verbose {
                println!();
                println!("Image URL patterns:");
                for pattern in registry.image_url_patterns() {
                    println!("  {pattern}");
                }
            }
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format_providers(&registry)?);
        }
    }

    Ok(ExitCode::Success)
}
