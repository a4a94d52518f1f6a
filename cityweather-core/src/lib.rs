//! Core library for the `cityweather` CLI.
//!
//! This crate defines:
//! - The tracked-city list and its JSON persistence
//! - Classification of provider condition codes into display categories
//! - Query construction and the weather provider abstraction
//! - Summary-line formatting and configuration handling
//!
//! It is used by `cityweather-cli`, but any presentation layer can drive it: load a
//! [`CityStore`], call `add`/`remove`, and re-render with [`format_line`].

pub mod classify;
pub mod config;
pub mod error;
pub mod format;
pub mod model;
pub mod provider;
pub mod query;
pub mod store;

pub use classify::{Category, classify};
pub use config::Config;
pub use error::{Error, ProviderError, Result};
pub use format::{format_details, format_line};
pub use model::{CityRecord, Condition, Observation, Readings, TrackedCities, UnitSystem};
pub use provider::{OpenWeatherClient, WeatherClient};
pub use query::{RequestDescriptor, build_query};
pub use store::{CityStore, JsonFileStorage, Storage};
