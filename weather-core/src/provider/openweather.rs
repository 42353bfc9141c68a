use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

use crate::{error::WeatherError, model::WeatherQuery};

use super::WeatherProvider;

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String, base_url: String, timeout: Duration) -> anyhow::Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    fn query_params(&self, query: &WeatherQuery) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("q", query.location()),
            ("appid", self.api_key.clone()),
            ("lang", query.language.clone()),
        ];
        if let Some(units) = query.units.query_value() {
            params.push(("units", units.to_string()));
        }
        params
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn current_weather(
        &self,
        query: &WeatherQuery,
    ) -> Result<OwCurrentResponse, WeatherError> {
        let url = format!("{}/weather", self.base_url);
        debug!(
            city = %query.city_name,
            country = %query.country_code,
            "requesting current weather"
        );

        let res = self
            .http
            .get(&url)
            .query(&self.query_params(query))
            .send()
            .await
            .map_err(|e| {
                let reason = transport_reason(e);
                warn!(%reason, "OpenWeather request failed");
                WeatherError::UpstreamUnavailable(reason)
            })?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|e| WeatherError::UpstreamUnavailable(transport_reason(e)))?;

        if !status.is_success() {
            warn!(status = status.as_u16(), "OpenWeather rejected the request");
            return Err(WeatherError::UpstreamRejected {
                status: status.as_u16(),
                message: rejection_message(&body),
            });
        }

        serde_json::from_str(&body).map_err(|e| WeatherError::MalformedResponse(e.to_string()))
    }
}

/// Raw `/weather` payload. Every field is optional; absent ones stay unset in the report.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct OwCurrentResponse {
    pub name: Option<String>,
    pub dt: Option<i64>,
    /// Seconds east of UTC for the observed city.
    pub timezone: Option<i32>,
    pub coord: Option<OwCoord>,
    #[serde(default)]
    pub weather: Vec<OwWeather>,
    pub main: Option<OwMain>,
    pub wind: Option<OwWind>,
    pub rain: Option<OwRain>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct OwCoord {
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct OwWeather {
    pub id: Option<u16>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct OwMain {
    pub temp: Option<f64>,
    pub humidity: Option<u8>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct OwWind {
    pub speed: Option<f64>,
    pub deg: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct OwRain {
    #[serde(rename = "1h")]
    pub one_hour: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OwErrorBody {
    message: String,
}

fn transport_reason(err: reqwest::Error) -> String {
    if err.is_timeout() {
        "request timed out".to_string()
    } else if err.is_connect() {
        "could not connect".to_string()
    } else {
        // strip the URL, it carries the API key
        err.without_url().to_string()
    }
}

fn rejection_message(body: &str) -> String {
    serde_json::from_str::<OwErrorBody>(body)
        .map(|b| truncate_body(&b.message))
        .unwrap_or_else(|_| truncate_body(body))
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &body[..end])
    } else {
        body.to_string()
    }
}
