use std::{
    collections::HashSet,
    fs, io,
    path::{Path, PathBuf},
};

use anyhow::anyhow;
use directories::ProjectDirs;

use crate::{
    error::{Error, Result},
    model::{CityRecord, Observation, TrackedCities, UnitSystem},
};

/// File name of the persisted city list.
pub const STORAGE_FILE: &str = "weather_cities.json";

/// Durable whole-snapshot storage for [`TrackedCities`].
pub trait Storage {
    /// Returns `Ok(None)` when nothing has been persisted yet.
    fn read(&self) -> Result<Option<TrackedCities>>;

    /// Replaces the persisted snapshot with `cities`.
    fn write(&self, cities: &TrackedCities) -> Result<()>;
}

/// Stores the city list as pretty-printed JSON in a single file.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Storage at the platform data directory, e.g.
    /// `~/.local/share/cityweather/weather_cities.json`.
    pub fn at_default_location() -> anyhow::Result<Self> {
        Ok(Self::new(Self::default_path()?))
    }

    pub fn default_path() -> anyhow::Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "cityweather", "cityweather")
            .ok_or_else(|| anyhow!("Could not determine platform data directory"))?;

        Ok(dirs.data_dir().join(STORAGE_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Storage for JsonFileStorage {
    fn read(&self) -> Result<Option<TrackedCities>> {
        let contents = match fs::read(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "no saved city list");
                return Ok(None);
            }
            Err(source) => {
                return Err(Error::StorageUnreadable {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        let cities: TrackedCities =
            serde_json::from_slice(&contents).map_err(|source| Error::StorageCorrupt {
                path: self.path.clone(),
                source,
            })?;

        tracing::debug!(path = %self.path.display(), count = cities.len(), "loaded city list");
        Ok(Some(cities))
    }

    fn write(&self, cities: &TrackedCities) -> Result<()> {
        let write_err = |source| Error::StorageWrite {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(write_err)?;
        }

        let json =
            serde_json::to_string_pretty(cities).map_err(|e| write_err(io::Error::other(e)))?;
        fs::write(&self.path, json).map_err(write_err)?;

        tracing::debug!(path = %self.path.display(), count = cities.len(), "saved city list");
        Ok(())
    }
}

/// Owner of the tracked-city collection.
///
/// The full snapshot is flushed to the [`Storage`] after every mutation. There is
/// no locking: concurrent processes sharing one file get last-writer-wins.
#[derive(Debug)]
pub struct CityStore<S> {
    storage: S,
    cities: TrackedCities,
}

impl<S: Storage> CityStore<S> {
    /// Loads persisted cities, or starts empty if nothing was saved.
    ///
    /// A corrupt file is an error rather than an empty list, so a bad read never
    /// leads to the user's saved cities being overwritten.
    pub fn load(storage: S) -> Result<Self> {
        let cities = storage.read()?.unwrap_or_default();
        Ok(Self { storage, cities })
    }

    pub fn cities(&self) -> &TrackedCities {
        &self.cities
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Writes the full current snapshot. On failure the in-memory list is kept.
    pub fn save(&self) -> Result<()> {
        self.storage.write(&self.cities)
    }

    /// Adds a city for `observation` unless one with the same canonical name is
    /// already tracked; an existing entry is never refreshed.
    ///
    /// Returns `true` if the list changed (and was saved).
    pub fn add(&mut self, observation: Observation, unit_system: UnitSystem) -> Result<bool> {
        let record = CityRecord::new(observation, unit_system);
        let name = record.name.clone();

        if !self.cities.insert_if_absent(record) {
            tracing::info!(city = %name, "city already tracked, leaving list unchanged");
            return Ok(false);
        }

        tracing::info!(city = %name, units = %unit_system, "tracking new city");
        self.save()?;
        Ok(true)
    }

    /// Removes every city whose name is in `names`. Saves only when something was
    /// removed. Returns the number of removed cities.
    pub fn remove(&mut self, names: &HashSet<String>) -> Result<usize> {
        if names.is_empty() {
            return Ok(0);
        }

        let removed = self.cities.retain(|city| !names.contains(&city.name));
        if removed == 0 {
            return Ok(0);
        }

        tracing::info!(removed, remaining = self.cities.len(), "removed cities");
        self.save()?;
        Ok(removed)
    }
}
