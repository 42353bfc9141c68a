use chrono::{DateTime, FixedOffset, Offset, Utc};

use crate::{
    Config,
    model::{Locale, Units, WeatherReport},
    provider::openweather::OwCurrentResponse,
};

pub mod compass;
pub mod icon;

pub use compass::compass_label;
pub use icon::icon_key;

const MS_TO_KMH: f64 = 3.6;
const MPH_TO_KMH: f64 = 1.609344;

/// Turns raw provider payloads into [`WeatherReport`]s. Pure and stateless.
#[derive(Debug, Clone)]
pub struct ReportMapper {
    units: Units,
    locale: Locale,
    map_base_url: String,
}

impl ReportMapper {
    pub fn new(units: Units, locale: Locale, map_base_url: impl Into<String>) -> Self {
        Self {
            units,
            locale,
            map_base_url: map_base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.units, config.locale(), config.map_base_url.clone())
    }

    pub fn map(&self, city_name: &str, payload: &OwCurrentResponse) -> WeatherReport {
        let latitude = payload.coord.as_ref().and_then(|c| c.lat);
        let longitude = payload.coord.as_ref().and_then(|c| c.lon);
        let map_link = match (latitude, longitude) {
            (Some(lat), Some(lon)) => Some(format!(
                "{}/weathermap?zoom=12&lat={lat}&lon={lon}",
                self.map_base_url
            )),
            _ => None,
        };

        let condition = payload.weather.first();
        let condition_code = condition.and_then(|w| w.id);
        let description = condition
            .and_then(|w| w.description.clone())
            .filter(|d| !d.is_empty());

        let main = payload.main.as_ref();
        let wind = payload.wind.as_ref();

        WeatherReport {
            city_name: city_name.to_string(),
            observed_at_local_time: payload.dt.and_then(|dt| local_time(dt, payload.timezone)),
            latitude,
            longitude,
            map_link,
            description,
            icon_key: condition_code.map(icon_key).unwrap_or(""),
            condition_code,
            temperature: main.and_then(|m| m.temp),
            units: self.units,
            humidity_pct: main.and_then(|m| m.humidity),
            wind_speed_kmh: wind
                .and_then(|w| w.speed)
                .map(|speed| self.to_kmh(speed)),
            wind_direction_label: wind
                .and_then(|w| w.deg)
                .filter(|deg| deg.is_finite())
                .map(|deg| compass_label(deg, self.locale)),
            precipitation_mm_1h: payload
                .rain
                .as_ref()
                .and_then(|r| r.one_hour)
                .unwrap_or(0.0),
        }
    }

    /// Provider wind speed is m/s, except mph for imperial units.
    fn to_kmh(&self, speed: f64) -> f64 {
        match self.units {
            Units::Imperial => speed * MPH_TO_KMH,
            Units::Metric | Units::Standard => speed * MS_TO_KMH,
        }
    }
}

/// `HH:MM` in the observed city's offset, falling back to UTC.
fn local_time(timestamp: i64, offset_secs: Option<i32>) -> Option<String> {
    let utc = DateTime::<Utc>::from_timestamp(timestamp, 0)?;
    let offset = offset_secs
        .and_then(FixedOffset::east_opt)
        .unwrap_or_else(|| Utc.fix());
    Some(utc.with_timezone(&offset).format("%H:%M").to_string())
}
