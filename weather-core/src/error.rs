use thiserror::Error;

/// Failures a single lookup can end in.
///
/// Every variant is recoverable: the service turns it into the
/// `errorMessage` of the response envelope instead of failing the process.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WeatherError {
    /// Empty city name or one with characters outside the allowed set.
    #[error("Invalid city name. Use letters and spaces only.")]
    InvalidInput,

    /// The provider could not be reached at all (DNS, connect, timeout).
    #[error("Weather service is unreachable: {0}")]
    UpstreamUnavailable(String),

    /// The provider answered with a non-success status.
    #[error(
        "Weather request failed with status {status}. Check the city name and API key. {message}"
    )]
    UpstreamRejected { status: u16, message: String },

    /// Success status, but the body is not a current-weather payload.
    #[error("Weather service returned an unreadable response: {0}")]
    MalformedResponse(String),
}

impl WeatherError {
    pub fn is_upstream(&self) -> bool {
        !matches!(self, WeatherError::InvalidInput)
    }
}
