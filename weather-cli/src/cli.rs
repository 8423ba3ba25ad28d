use anyhow::{Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand};
use inquire::{Password, PasswordDisplayMode, Text};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::print::print_report;
use weather_core::{
    Config, OpenWeatherFetcher, config::DEFAULT_BASE_URL, current_weather, render_weather,
};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(
    name = "weather",
    version,
    disable_version_flag = true,
    about = "Current weather for a city, in your terminal"
)]
pub struct Cli {
    /// Print version.
    #[arg(short = 'v', long = "version", action = clap::ArgAction::Version)]
    #[allow(dead_code)]
    version: Option<bool>,

    /// Use this config file instead of the platform default.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show current weather for a city.
    City {
        /// City name, e.g. "London" or "New York".
        city: String,
    },

    /// Store the API key (and optionally the API base URL).
    Configure {
        /// Save this key without prompting.
        #[arg(long)]
        api_key: Option<String>,

        /// Override the API base URL.
        #[arg(long)]
        base_url: Option<String>,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Command::City { city } => {
                let config = load_config(self.config.as_deref())?;
                let settings = config.resolve()?;
                debug!(base_url = %settings.base_url, "settings resolved");

                let fetcher = OpenWeatherFetcher::new(settings.timeout)?;
                let reading = current_weather(&fetcher, &settings, &city).await?;

                print_report(&render_weather(&reading, &Local::now()));
            }
            Command::Configure { api_key, base_url } => {
                let mut config = load_config(self.config.as_deref())?;
                let interactive = api_key.is_none();

                let api_key = match api_key {
                    Some(key) => key,
                    None => Password::new("API key:")
                        .with_display_mode(PasswordDisplayMode::Masked)
                        .without_confirmation()
                        .prompt()
                        .context("Failed to read API key")?,
                };
                config.set_api_key(&api_key)?;

                if let Some(base_url) = base_url {
                    config.base_url = Some(base_url);
                } else if interactive {
                    let default =
                        config.base_url.clone().unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
                    let entered = Text::new("API base URL:")
                        .with_default(&default)
                        .prompt()
                        .context("Failed to read base URL")?;
                    config.base_url = Some(entered);
                }

                // Catch a bad base URL now rather than on the next lookup.
                config.resolve_with(None)?;

                let path = match self.config {
                    Some(path) => {
                        config.save_to(&path)?;
                        path
                    }
                    None => config.save()?,
                };
                println!("Configuration saved to {}", path.display());
            }
        }

        Ok(())
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}
