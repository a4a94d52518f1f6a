use std::{io, path::PathBuf};

use reqwest::StatusCode;

/// Failures reported by a [`crate::WeatherClient`].
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("Failed to reach the weather provider: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Weather provider rejected the API key (401 Unauthorized)")]
    Unauthorized,

    #[error("Location '{location}' was not found by the weather provider")]
    NotFound { location: String },

    #[error("Weather provider request failed with status {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("Failed to parse weather provider response: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Weather provider returned no condition entries for '{location}'")]
    EmptyConditions { location: String },
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("No location given; enter at least one word of a city name")]
    QueryInput,

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error("Saved city list at {} is corrupt", path.display())]
    StorageCorrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to read saved city list at {}", path.display())]
    StorageUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write city list to {}", path.display())]
    StorageWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Observation for '{city}' has no weather condition")]
    MissingCondition { city: String },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
