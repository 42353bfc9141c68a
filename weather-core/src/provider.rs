use crate::{
    Config, WeatherQuery, error::WeatherError,
    provider::openweather::{OpenWeatherProvider, OwCurrentResponse},
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

/// Source of current-conditions payloads.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// One request for the current weather at `query`; never retried.
    async fn current_weather(&self, query: &WeatherQuery)
    -> Result<OwCurrentResponse, WeatherError>;
}

/// Construct the OpenWeather provider from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let api_key = config.require_api_key()?;

    let provider = OpenWeatherProvider::new(
        api_key.to_owned(),
        config.api_base_url.clone(),
        config.timeout(),
    )?;

    Ok(Box::new(provider))
}
