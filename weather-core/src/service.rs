use tracing::{info, warn};

use crate::{
    Config,
    error::WeatherError,
    mapper::ReportMapper,
    model::{WeatherEnvelope, WeatherReport},
    present::Presenter,
    provider::WeatherProvider,
    validate::validate_city,
};

/// The lookup pipeline: validate, fetch, map, render.
///
/// Built once from a [`Config`] and shared read-only between requests.
#[derive(Debug)]
pub struct WeatherService {
    config: Config,
    provider: Box<dyn WeatherProvider>,
    mapper: ReportMapper,
    presenter: Presenter,
}

impl WeatherService {
    pub fn new(config: Config, provider: Box<dyn WeatherProvider>) -> Self {
        let mapper = ReportMapper::from_config(&config);
        let presenter = Presenter::from_config(&config);
        Self {
            config,
            provider,
            mapper,
            presenter,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Validate `raw_city`, query the provider once and map the payload.
    pub async fn lookup(&self, raw_city: &str) -> Result<WeatherReport, WeatherError> {
        self.run(raw_city).await.inspect_err(|err| {
            if err.is_upstream() {
                warn!(city = raw_city, error = %err, "weather lookup failed");
            } else {
                warn!(input_len = raw_city.len(), "rejected city name");
            }
        })
    }

    async fn run(&self, raw_city: &str) -> Result<WeatherReport, WeatherError> {
        let city = validate_city(raw_city)?;
        let query = self.config.query_for(city);
        let payload = self.provider.current_weather(&query).await?;

        let report = self.mapper.map(&query.city_name, &payload);
        info!(
            city = %report.city_name,
            condition = ?report.condition_code,
            "weather lookup succeeded"
        );
        Ok(report)
    }

    /// Full request cycle for one form submission. `None` means the `city` field was missing.
    pub async fn respond(&self, raw_city: Option<&str>) -> WeatherEnvelope {
        let result = match raw_city {
            Some(raw) => self.lookup(raw).await,
            None => Err(WeatherError::InvalidInput),
        };

        match result {
            Ok(report) => WeatherEnvelope::success(self.presenter.render(&report)),
            Err(err) => WeatherEnvelope::failure(&err),
        }
    }
}
