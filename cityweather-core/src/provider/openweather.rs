use async_trait::async_trait;
use reqwest::{Client, StatusCode};

use crate::{Observation, RequestDescriptor, error::ProviderError};

use super::WeatherClient;

/// Client for OpenWeather's current-weather endpoint.
#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    api_key: String,
    http: Client,
}

impl OpenWeatherClient {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            http: Client::new(),
        }
    }
}

#[async_trait]
impl WeatherClient for OpenWeatherClient {
    async fn fetch(&self, request: &RequestDescriptor) -> Result<Observation, ProviderError> {
        let [location, units] = request.query_pairs();

        let res = self
            .http
            .get(&request.endpoint)
            .query(&[location, units, ("appid", self.api_key.as_str())])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            tracing::warn!(%status, location = %request.location, "OpenWeather request failed");
            return Err(match status {
                StatusCode::UNAUTHORIZED => ProviderError::Unauthorized,
                StatusCode::NOT_FOUND => ProviderError::NotFound {
                    location: request.location.clone(),
                },
                _ => ProviderError::Status {
                    status,
                    body: truncate_body(&body),
                },
            });
        }

        let observation: Observation = serde_json::from_str(&body)?;

        if observation.weather.is_empty() {
            return Err(ProviderError::EmptyConditions {
                location: observation.name,
            });
        }

        Ok(observation)
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None => body.to_string(),
    }
}
