use crate::{
    error::{Error, Result},
    model::UnitSystem,
};

/// OpenWeather current-weather endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://api.openweathermap.org/data/2.5/weather";

/// A weather query, independent of transport and credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestDescriptor {
    pub endpoint: String,
    pub location: String,
    pub units: UnitSystem,
}

impl RequestDescriptor {
    /// Points the descriptor at a different endpoint (e.g. a proxy or a test server).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn query_pairs(&self) -> [(&'static str, &str); 2] {
        [("q", self.location.as_str()), ("units", self.units.as_str())]
    }
}

/// Builds a request for the location spelled by `tokens`, joined with single spaces.
///
/// Tokens that are empty or whitespace-only are skipped; if nothing remains the
/// input is rejected with [`Error::QueryInput`].
pub fn build_query<S: AsRef<str>>(tokens: &[S], imperial: bool) -> Result<RequestDescriptor> {
    let words: Vec<&str> = tokens
        .iter()
        .map(|t| t.as_ref().trim())
        .filter(|t| !t.is_empty())
        .collect();

    if words.is_empty() {
        return Err(Error::QueryInput);
    }

    let descriptor = RequestDescriptor {
        endpoint: DEFAULT_ENDPOINT.to_string(),
        location: words.join(" "),
        units: UnitSystem::from_imperial_flag(imperial),
    };

    tracing::debug!(
        location = %descriptor.location,
        units = %descriptor.units,
        "built weather query"
    );

    Ok(descriptor)
}
