//! Config command - manage configuration.

use anyhow::Result;
use clap::{Args, Subcommand};
use mediaembed_core::{DescriptorFormat, Domains, ProviderConfig};
use mediaembed_store::{Settings, SettingsStore, default_config_dir, default_records_path};
use tracing::info;

use super::build_registry;
use crate::output::JsonFormatter;
use crate::{Cli, ExitCode, OutputFormat};

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Config subcommands.
#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration.
    Show,

    /// Show configuration paths.
    Path,

    /// Re-enable a built-in provider.
    Enable {
        /// Provider name.
        provider: String,
    },

    /// Disable a built-in provider.
    Disable {
        /// Provider name.
        provider: String,
    },

    /// Add or replace a custom provider.
    AddProvider(AddProviderArgs),

    /// Remove a custom provider.
    RemoveProvider {
        /// Provider name.
        name: String,
    },

    /// Reset to defaults.
    Reset,
}

/// Arguments for `config add-provider`.
#[derive(Args)]
pub struct AddProviderArgs {
    /// Provider name.
    pub name: String,

    /// oEmbed endpoint URL.
    #[arg(long)]
    pub endpoint: String,

    /// Domain fragment (repeatable).
    #[arg(long = "domain", required = true)]
    pub domains: Vec<String>,

    /// Response format (xml or json).
    #[arg(long, default_value = "xml")]
    pub format: DescriptorFormat,

    /// Field holding the resource id.
    #[arg(long)]
    pub id_tag: Option<String>,
}

impl AddProviderArgs {
    fn to_config(&self) -> Result<ProviderConfig> {
        let domains = match self.domains.as_slice() {
            [single] => Domains::one(single.clone()),
            many => Domains::many(many.iter().cloned())?,
        };
        let mut config = ProviderConfig::new(self.name.clone(), domains, self.endpoint.clone());
        config.format = self.format;
        config.id_tag.clone_from(&self.id_tag);
        Ok(config)
    }
}

/// Runs the config command.
pub async fn run(args: &ConfigArgs, cli: &Cli, store: &SettingsStore) -> Result<ExitCode> {
    match &args.action {
        ConfigAction::Show => show_config(cli, store).await?,
        ConfigAction::Path => show_paths(cli, store).await?,
        ConfigAction::Enable { provider } => set_disabled(store, provider, false).await?,
        ConfigAction::Disable { provider } => set_disabled(store, provider, true).await?,
        ConfigAction::AddProvider(add) => add_provider(store, add).await?,
        ConfigAction::RemoveProvider { name } => remove_provider(store, name).await?,
        ConfigAction::Reset => reset_config(store).await?,
    }
    Ok(ExitCode::Success)
}

async fn show_config(cli: &Cli, store: &SettingsStore) -> Result<()> {
    let settings = store.get().await;

    match cli.format {
        OutputFormat::Text => {
            println!("MediaEmbed Configuration");
            println!("{}", "─".repeat(40));
            println!();
            println!(
                "Embed size:      {}x{}",
                settings.embed.width, settings.embed.height
            );
            println!(
                "Sidebar size:    {}x{}",
                settings.embed.width_side.unwrap_or(settings.embed.width),
                settings.embed.height_side.unwrap_or(settings.embed.height)
            );
            println!("HTTP timeout:    {}s", settings.http.timeout_secs);
            if let Some(domains) = &settings.http.allowed_domains {
                println!("Allowed domains: {}", domains.join(", "));
            }
            println!("Log level:       {}", settings.log_level);
            println!();
            println!("Providers:");
            for provider in build_registry(&settings)?.iter() {
                println!("  • {} ({})", provider.name(), provider.domains());
            }
            if !settings.disabled_providers.is_empty() {
                println!("Disabled: {}", settings.disabled_providers.join(", "));
            }
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format(&settings)?);
        }
    }

    Ok(())
}

async fn show_paths(cli: &Cli, store: &SettingsStore) -> Result<()> {
    let config_dir = default_config_dir();
    let records = store
        .get()
        .await
        .records_path
        .unwrap_or_else(default_records_path);

    match cli.format {
        OutputFormat::Text => {
            println!("Configuration Paths");
            println!("{}", "─".repeat(40));
            println!();
            println!("Config dir:    {}", config_dir.display());
            println!("Settings file: {}", store.path().display());
            println!("Records file:  {}", records.display());
        }
        OutputFormat::Json => {
            let paths = serde_json::json!({
                "config_dir": config_dir.display().to_string(),
                "settings_file": store.path().display().to_string(),
                "records_file": records.display().to_string(),
            });
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format(&paths)?);
        }
    }

    Ok(())
}

async fn set_disabled(store: &SettingsStore, name: &str, disabled: bool) -> Result<()> {
    let settings = store.get().await;
    let known = build_registry(&Settings {
        disabled_providers: Vec::new(),
        ..settings
    })?;
    let provider = known
        .get(name)
        .ok_or_else(|| anyhow::anyhow!("Unknown provider: {name}"))?;
    let provider_name = provider.name().to_string();

    store.set_provider_disabled(&provider_name, disabled).await;
    store.save().await?;

    let verb = if disabled { "Disabled" } else { "Enabled" };
    info!(provider = %provider_name, disabled, "Provider toggled");
    println!("{verb}: {provider_name}");
    Ok(())
}

async fn add_provider(store: &SettingsStore, args: &AddProviderArgs) -> Result<()> {
    let config = args.to_config()?;
    // Validate against the full registry before saving.
    let mut settings = store.get().await;
    settings
        .custom_providers
        .retain(|p| !p.name.eq_ignore_ascii_case(&config.name));
    settings.custom_providers.push(config.clone());
    build_registry(&settings)?;

    store.upsert_custom_provider(config).await?;
    store.save().await?;

    info!(provider = %args.name, "Custom provider saved");
    println!("Added: {}", args.name);
    Ok(())
}

async fn remove_provider(store: &SettingsStore, name: &str) -> Result<()> {
    let before = store.get().await.custom_providers.len();
    store
        .update(|s| {
            s.custom_providers
                .retain(|p| !p.name.eq_ignore_ascii_case(name));
        })
        .await;
    if store.get().await.custom_providers.len() == before {
        anyhow::bail!("No custom provider named {name}");
    }
    store.save().await?;

    println!("Removed: {name}");
    Ok(())
}

async fn reset_config(store: &SettingsStore) -> Result<()> {
    store.update(|s| *s = Settings::default()).await;
    store.save().await?;

    info!("Configuration reset to defaults");
    println!("Configuration reset to defaults.");
    Ok(())
}
