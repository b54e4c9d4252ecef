use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use inquire::{Password, PasswordDisplayMode};
use skycast_core::{Config, Error, WeatherService};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skycast", version, about = "Current weather and daily forecast for a place")]
pub struct Cli {
    /// Log progress to stderr (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key in the config file.
    Configure,

    /// Show current weather and the daily forecast for a place.
    Show {
        /// Free-text place name, e.g. "Tampere, Finland".
        place: String,

        /// Also list every forecast step for this date (YYYY-MM-DD).
        #[arg(long)]
        day: Option<NaiveDate>,

        /// Print the report as JSON instead of text.
        #[arg(long)]
        json: bool,

        /// API key for this run only; takes precedence over env and config file.
        #[arg(long)]
        api_key: Option<String>,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show {
                place,
                day,
                json,
                api_key,
            } => show(&place, day, json, api_key).await,
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut cfg = Config::load()?;

    let key = Password::new("OpenWeather API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    let key = key.trim();
    if key.is_empty() {
        anyhow::bail!("API key must not be empty");
    }

    cfg.set_api_key(key.to_string());
    cfg.save()?;

    println!("Saved API key to {}", Config::config_file_path()?.display());
    Ok(())
}

async fn show(
    place: &str,
    day: Option<NaiveDate>,
    json: bool,
    api_key: Option<String>,
) -> anyhow::Result<()> {
    let mut cfg = Config::from_env()?;
    if let Some(key) = api_key {
        cfg.set_api_key(key);
    }

    tracing::debug!(
        geocode = %cfg.endpoints.geocode_url,
        timeout_secs = cfg.timeout_secs,
        "configuration loaded"
    );
    let service = WeatherService::from_config(&cfg)?;

    let report = match service.refresh(place).await {
        Ok(report) => report,
        Err(Error::NotFound { place }) => {
            anyhow::bail!("Coordinates not found for location: {place}")
        }
        Err(e) => return Err(e).context("Could not fetch weather"),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print!("{}", render::current(&report.place, &report.current));
    println!();
    print!("{}", render::daily(&report.daily));

    if let Some(date) = day {
        println!();
        print!("{}", render::hourly(date, &report.entries_for(date)));
    }

    Ok(())
}
