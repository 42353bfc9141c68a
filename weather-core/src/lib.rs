//! Core library for the weather lookup service.
//!
//! This crate defines:
//! - Configuration handling (file + environment overrides)
//! - City name validation
//! - The OpenWeather client behind the [`WeatherProvider`] trait
//! - Mapping of raw payloads into [`WeatherReport`]s, and HTML rendering
//! - [`WeatherService`], the pipeline tying these together
//!
//! It is used by `weather-server`, but can also be reused by other binaries or services.

pub mod config;
pub mod error;
pub mod mapper;
pub mod model;
pub mod present;
pub mod provider;
pub mod service;
pub mod validate;

pub use config::Config;
pub use error::WeatherError;
pub use model::{Locale, Units, WeatherEnvelope, WeatherQuery, WeatherReport};
pub use provider::{WeatherProvider, provider_from_config};
pub use service::WeatherService;
