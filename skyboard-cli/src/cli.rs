use anyhow::{Context, anyhow};
use clap::{Parser, Subcommand};
use inquire::{Confirm, Password, PasswordDisplayMode, Select, Text};
use skyboard_core::{
    Config, Dashboard, DisplayState, ProviderId, Variant, dashboard::QUICK_CITIES,
};

use crate::surface::TerminalSurface;

const OTHER_CITY: &str = "Other...";

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skyboard", version, about = "Weather dashboard with news or music")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the API key for a provider.
    Configure {
        /// Provider short name: "openweather" or "newsapi".
        provider: String,
    },

    /// Choose the dashboard variant used by `show`.
    Variant {
        /// One of "news", "offline", "music".
        variant: String,
    },

    /// Show the dashboard for a city.
    Show {
        /// City name. Omit to pick from the quick-select list.
        city: Option<String>,

        /// Override the configured variant for this run.
        #[arg(long)]
        variant: Option<String>,

        /// Route news through a running `skyboard-proxy` at this URL.
        #[arg(long)]
        proxy: Option<String>,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure { provider } => configure(&provider),
            Command::Variant { variant } => {
                let variant = Variant::try_from(variant.as_str())?;
                let mut config = Config::load()?;
                config.set_variant(variant);
                config.save()?;
                println!("Dashboard variant set to '{variant}'.");
                Ok(())
            }
            Command::Show {
                city,
                variant,
                proxy,
            } => show(city, variant, proxy).await,
        }
    }
}

fn configure(provider: &str) -> anyhow::Result<()> {
    let id = ProviderId::try_from(provider)?;
    let mut config = Config::load()?;

    if let Some(question) = replace_question(&config, id) {
        let replace = Confirm::new(&question)
            .with_default(false)
            .prompt()
            .context("Failed to read confirmation")?;
        if !replace {
            println!("Kept the existing API key for '{id}'.");
            return Ok(());
        }
    }

    let api_key = Password::new(&format!("{} API key:", id.display_name()))
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    let api_key = api_key.trim();
    if api_key.is_empty() {
        return Err(anyhow!("API key must not be empty."));
    }

    config.upsert_provider_api_key(id, api_key.to_string());
    config.save()?;
    println!("Saved API key for '{id}'.");
    Ok(())
}

/// Confirmation to ask before overwriting a stored key, if there is one.
fn replace_question(config: &Config, id: ProviderId) -> Option<String> {
    config
        .is_provider_configured(id)
        .then(|| format!("{} already has an API key. Replace it?", id.display_name()))
}

async fn show(
    city: Option<String>,
    variant: Option<String>,
    proxy: Option<String>,
) -> anyhow::Result<()> {
    let mut config = Config::load()?;
    if proxy.is_some() {
        config.news.proxy_url = proxy;
    }
    let variant = match variant {
        Some(v) => Variant::try_from(v.as_str())?,
        None => config.variant()?,
    };

    let surface = TerminalSurface::new(std::io::stdout(), section_title(variant));
    let mut dashboard = Dashboard::from_config(variant, &config, surface)?;

    match city {
        Some(city) => {
            dashboard.set_query(city);
            dashboard.handle_search().await;
        }
        None => {
            let picked = pick_city()?;
            match picked {
                Pick::Shortcut(city) => dashboard.quick_select(city).await,
                Pick::Typed(city) => {
                    dashboard.set_query(city);
                    dashboard.handle_search().await;
                }
            }
        }
    }

    match &dashboard.ui().display {
        DisplayState::Error(message) => Err(anyhow!("{message}")),
        _ => Ok(()),
    }
}

fn section_title(variant: Variant) -> &'static str {
    match variant {
        Variant::News | Variant::Offline => "Latest news",
        Variant::Music => "Music for this weather",
    }
}

enum Pick {
    Shortcut(&'static str),
    Typed(String),
}

fn pick_city() -> anyhow::Result<Pick> {
    let mut options: Vec<&str> = QUICK_CITIES.to_vec();
    options.push(OTHER_CITY);

    let choice = Select::new("City:", options)
        .prompt()
        .context("Failed to read city selection")?;

    if choice == OTHER_CITY {
        let typed = Text::new("City name:")
            .prompt()
            .context("Failed to read city name")?;
        return Ok(Pick::Typed(typed));
    }

    Ok(Pick::Shortcut(choice))
}
