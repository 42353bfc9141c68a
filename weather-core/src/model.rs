use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::error::WeatherError;

/// Measurement system requested from the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    #[default]
    Metric,
    Imperial,
    /// Kelvin; the provider default, sent without a `units` parameter.
    Standard,
}

impl Units {
    pub fn as_str(&self) -> &'static str {
        match self {
            Units::Metric => "metric",
            Units::Imperial => "imperial",
            Units::Standard => "standard",
        }
    }

    /// Value of the `units` query parameter, if one is sent at all.
    pub fn query_value(&self) -> Option<&'static str> {
        match self {
            Units::Standard => None,
            other => Some(other.as_str()),
        }
    }

    pub fn temperature_symbol(&self) -> &'static str {
        match self {
            Units::Metric => "°C",
            Units::Imperial => "°F",
            Units::Standard => "K",
        }
    }

    pub const fn all() -> &'static [Units] {
        &[Units::Metric, Units::Imperial, Units::Standard]
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Units {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "metric" => Ok(Units::Metric),
            "imperial" => Ok(Units::Imperial),
            "standard" => Ok(Units::Standard),
            _ => Err(anyhow::anyhow!(
                "Unknown units '{value}'. Supported units: metric, imperial, standard."
            )),
        }
    }
}

/// Display language for labels that are rendered locally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Locale {
    Hungarian,
    English,
}

impl Locale {
    pub fn from_language(language: &str) -> Self {
        if language.trim().eq_ignore_ascii_case("hu") {
            Locale::Hungarian
        } else {
            Locale::English
        }
    }
}

/// One validated lookup, built from the form input and the configured defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherQuery {
    pub city_name: String,
    pub country_code: String,
    pub language: String,
    pub units: Units,
}

impl WeatherQuery {
    /// The `q` parameter: `<city>,<country>`.
    pub fn location(&self) -> String {
        format!("{},{}", self.city_name, self.country_code)
    }
}

/// Display-ready view of one current-weather observation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherReport {
    pub city_name: String,
    pub observed_at_local_time: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub map_link: Option<String>,
    pub description: Option<String>,
    pub icon_key: &'static str,
    pub condition_code: Option<u16>,
    pub temperature: Option<f64>,
    pub units: Units,
    pub humidity_pct: Option<u8>,
    pub wind_speed_kmh: Option<f64>,
    pub wind_direction_label: Option<&'static str>,
    pub precipitation_mm_1h: f64,
}

/// JSON body returned to the form: exactly one side is non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherEnvelope {
    pub weather_data: String,
    pub error_message: String,
}

impl WeatherEnvelope {
    pub fn success(html: String) -> Self {
        Self {
            weather_data: html,
            error_message: String::new(),
        }
    }

    pub fn failure(error: &WeatherError) -> Self {
        Self {
            weather_data: String::new(),
            error_message: error.to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.error_message.is_empty()
    }
}
