use async_trait::async_trait;
use std::fmt::Debug;

use crate::{Config, Observation, RequestDescriptor, error::ProviderError};

pub mod openweather;

pub use openweather::OpenWeatherClient;

/// Fetches the current observation for a [`RequestDescriptor`].
///
/// Implementations never retry; a failure is returned to the caller as is.
#[async_trait]
pub trait WeatherClient: Send + Sync + Debug {
    async fn fetch(&self, request: &RequestDescriptor) -> Result<Observation, ProviderError>;
}

/// Construct the OpenWeather client from config, using `api_key_override` (e.g.
/// the `OPENWEATHER_API_KEY` environment variable) before the configured key.
pub fn client_from_config(
    config: &Config,
    api_key_override: Option<String>,
) -> anyhow::Result<Box<dyn WeatherClient>> {
    let api_key = config.resolve_api_key(api_key_override)?;
    Ok(Box::new(OpenWeatherClient::new(api_key)))
}
