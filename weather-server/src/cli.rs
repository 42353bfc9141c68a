use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{Password, PasswordDisplayMode, Select, Text};
use tracing::{error, info};
use weather_core::{Config, Units, WeatherService, provider_from_config};

use crate::http;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "City weather lookup service")]
pub struct Cli {
    /// Config file to use instead of the platform default.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Serve the city form endpoint over HTTP.
    Serve {
        /// Address to listen on; defaults to `listen_addr` from the config.
        #[arg(long)]
        listen: Option<String>,
    },

    /// Look up one city and print the JSON response.
    Show {
        /// City name, e.g. "Budapest".
        city: String,
    },

    /// Interactively set the API key and lookup defaults.
    Configure,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let path = match self.config {
            Some(path) => path,
            None => Config::config_file_path()?,
        };

        match self.command {
            Command::Serve { listen } => {
                let config = Config::load_from(&path)?.with_env_overrides()?;
                let addr = listen.unwrap_or_else(|| config.listen_addr.clone());
                let service = build_service(config)?;
                serve(service, &addr).await
            }
            Command::Show { city } => {
                let config = Config::load_from(&path)?.with_env_overrides()?;
                let service = build_service(config)?;
                let envelope = service.respond(Some(&city)).await;
                println!("{}", serde_json::to_string_pretty(&envelope)?);
                Ok(())
            }
            Command::Configure => configure(&path),
        }
    }
}

fn build_service(config: Config) -> anyhow::Result<WeatherService> {
    let provider = provider_from_config(&config)?;
    Ok(WeatherService::new(config, provider))
}

async fn serve(service: WeatherService, addr: &str) -> anyhow::Result<()> {
    let cfg = service.config();
    info!(
        country = %cfg.country_code,
        language = %cfg.language,
        units = %cfg.units,
        "weather service configured"
    );

    let app = http::router(Arc::new(service));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")
}

async fn shutdown_signal() {
    wait_for_shutdown(tokio::signal::ctrl_c()).await
}

/// Resolves when `signal` fires. Without a signal handler the server runs until killed.
async fn wait_for_shutdown<F>(signal: F)
where
    F: Future<Output = std::io::Result<()>>,
{
    match signal.await {
        Ok(()) => info!("shutting down"),
        Err(err) => {
            error!(error = %err, "failed to install Ctrl-C handler");
            std::future::pending::<()>().await;
        }
    }
}

fn configure(path: &Path) -> anyhow::Result<()> {
    let mut config = Config::load_from(path)?;

    let api_key = Password::new("OpenWeather API key:")
        .without_confirmation()
        .with_display_mode(PasswordDisplayMode::Masked)
        .with_help_message("Get one at https://openweathermap.org/api")
        .prompt()?;
    if !api_key.trim().is_empty() {
        config.api_key = Some(api_key.trim().to_string());
    }

    let country_code = Text::new("Default country code:")
        .with_default(&config.country_code)
        .prompt()?;
    let language = Text::new("Response language:")
        .with_default(&config.language)
        .prompt()?;

    let current = Units::all()
        .iter()
        .position(|u| *u == config.units)
        .unwrap_or(0);
    let units = Select::new("Measurement units:", Units::all().to_vec())
        .with_starting_cursor(current)
        .prompt()?;

    config.country_code = country_code;
    config.language = language;
    config.units = units;

    config.save_to(path)?;
    println!("Configuration saved to {}", path.display());
    Ok(())
}
