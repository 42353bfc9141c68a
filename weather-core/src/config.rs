use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use crate::model::{Locale, Units, WeatherQuery};

pub const ENV_API_KEY: &str = "OPENWEATHER_API_KEY";
pub const ENV_COUNTRY_CODE: &str = "WEATHER_COUNTRY_CODE";
pub const ENV_LANGUAGE: &str = "WEATHER_LANGUAGE";
pub const ENV_UNITS: &str = "WEATHER_UNITS";

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// country_code = "hu"
/// language = "en"
/// units = "imperial"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// OpenWeather API key. Never logged.
    pub api_key: Option<String>,
    pub country_code: String,
    pub language: String,
    pub units: Units,
    /// Upper bound for the outbound request, in seconds.
    pub timeout_secs: u64,
    pub api_base_url: String,
    pub map_base_url: String,
    /// Path prefix for the `<key>.png` condition icons.
    pub icon_path: String,
    pub listen_addr: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            country_code: "hu".to_string(),
            language: "hu".to_string(),
            units: Units::Metric,
            timeout_secs: 5,
            api_base_url: "https://api.openweathermap.org/data/2.5".to_string(),
            map_base_url: "https://openweathermap.org".to_string(),
            icon_path: "images/weather".to_string(),
            listen_addr: "127.0.0.1:8080".to_string(),
        }
    }
}

impl Config {
    /// Load config from the default location, or return defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, return defaults.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to `path`, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-lookup", "weather")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Apply `OPENWEATHER_API_KEY` and `WEATHER_*` overrides from the process environment.
    pub fn with_env_overrides(self) -> Result<Self> {
        self.with_overrides(|name| std::env::var(name).ok())
    }

    /// Apply overrides from an arbitrary variable lookup. Empty values are ignored.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(key) = get(ENV_API_KEY) {
            self.api_key = Some(key);
        }
        if let Some(country) = get(ENV_COUNTRY_CODE) {
            self.country_code = country;
        }
        if let Some(language) = get(ENV_LANGUAGE) {
            self.language = language;
        }
        if let Some(units) = get(ENV_UNITS) {
            self.units = units
                .parse()
                .with_context(|| format!("Invalid value in {ENV_UNITS}"))?;
        }

        Ok(self)
    }

    /// Returns the API key, or an error explaining how to set one.
    pub fn require_api_key(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                anyhow!(
                    "No OpenWeather API key configured.\n\
                     Hint: run `weather configure` or set {ENV_API_KEY}."
                )
            })
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn locale(&self) -> Locale {
        Locale::from_language(&self.language)
    }

    /// Build the provider query for an already validated city name.
    pub fn query_for(&self, city_name: String) -> WeatherQuery {
        WeatherQuery {
            city_name,
            country_code: self.country_code.clone(),
            language: self.language.clone(),
            units: self.units,
        }
    }
}
