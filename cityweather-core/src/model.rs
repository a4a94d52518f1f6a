use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, de};

use crate::error::{Error, Result};

/// Unit system a city was added with. Fixed for the lifetime of the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    #[default]
    Metric,
    Imperial,
}

impl UnitSystem {
    pub fn from_imperial_flag(imperial: bool) -> Self {
        if imperial { Self::Imperial } else { Self::Metric }
    }

    /// Token understood by the provider's `units` parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Metric => "metric",
            Self::Imperial => "imperial",
        }
    }

    pub fn temperature_letter(&self) -> char {
        match self {
            Self::Metric => 'C',
            Self::Imperial => 'F',
        }
    }

    pub fn speed_unit(&self) -> &'static str {
        match self {
            Self::Metric => "m/s",
            Self::Imperial => "mph",
        }
    }
}

impl std::fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of the provider's `weather` array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub id: i64,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Readings {
    pub temp: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feels_like: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub humidity: Option<u8>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wind {
    pub speed: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Sys {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

/// A current-weather observation, shaped like the provider's payload so it can be
/// stored as received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Canonical location name as normalized by the provider.
    pub name: String,
    pub weather: Vec<Condition>,
    pub main: Readings,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wind: Option<Wind>,
    /// Observation time, unix seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dt: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sys: Option<Sys>,
}

impl Observation {
    /// The first condition entry, which is the one displayed.
    pub fn primary_condition(&self) -> Result<&Condition> {
        self.weather.first().ok_or_else(|| Error::MissingCondition {
            city: self.name.clone(),
        })
    }

    pub fn observed_at(&self) -> Option<DateTime<Utc>> {
        self.dt.and_then(|ts| DateTime::from_timestamp(ts, 0))
    }
}

/// A tracked city paired with its most recent observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityRecord {
    pub name: String,
    pub unit_system: UnitSystem,
    pub observation: Observation,
}

impl CityRecord {
    pub fn new(observation: Observation, unit_system: UnitSystem) -> Self {
        Self {
            name: observation.name.clone(),
            unit_system,
            observation,
        }
    }
}

/// Ordered collection of tracked cities. Names are unique; insertion order is
/// display order.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct TrackedCities(Vec<CityRecord>);

impl<'de> Deserialize<'de> for TrackedCities {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let records = Vec::<CityRecord>::deserialize(deserializer)?;

        let mut seen = HashSet::with_capacity(records.len());
        for record in &records {
            if !seen.insert(record.name.as_str()) {
                return Err(de::Error::custom(format!("duplicate city name '{}'", record.name)));
            }
        }

        Ok(Self(records))
    }
}

impl TrackedCities {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|city| city.name == name)
    }

    pub fn get(&self, name: &str) -> Option<&CityRecord> {
        self.0.iter().find(|city| city.name == name)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CityRecord> {
        self.0.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|city| city.name.as_str())
    }

    /// Appends `record` unless a city with the same name is already tracked.
    pub(crate) fn insert_if_absent(&mut self, record: CityRecord) -> bool {
        if self.contains(&record.name) {
            return false;
        }
        self.0.push(record);
        true
    }

    pub(crate) fn retain(&mut self, keep: impl FnMut(&CityRecord) -> bool) -> usize {
        let before = self.0.len();
        self.0.retain(keep);
        before - self.0.len()
    }
}

impl<'a> IntoIterator for &'a TrackedCities {
    type Item = &'a CityRecord;
    type IntoIter = std::slice::Iter<'a, CityRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_system_tokens_and_letters() {
        assert_eq!(UnitSystem::from_imperial_flag(true), UnitSystem::Imperial);
        assert_eq!(UnitSystem::from_imperial_flag(false), UnitSystem::Metric);
        assert_eq!(UnitSystem::Imperial.as_str(), "imperial");
        assert_eq!(UnitSystem::Metric.temperature_letter(), 'C');
        assert_eq!(UnitSystem::Imperial.temperature_letter(), 'F');
    }

    #[test]
    fn parses_provider_payload_ignoring_unknown_fields() {
        let json = r#"{
            "coord": {"lon": 2.35, "lat": 48.85},
            "weather": [{"id": 800, "main": "Clear", "description": "clear sky", "icon": "01d"}],
            "main": {"temp": 18, "feels_like": 17.2, "humidity": 60, "pressure": 1012},
            "wind": {"speed": 3.1, "deg": 200},
            "dt": 1700000000,
            "sys": {"country": "FR", "sunrise": 1699945000},
            "name": "Paris",
            "cod": 200
        }"#;

        let obs: Observation = serde_json::from_str(json).expect("payload should parse");
        assert_eq!(obs.name, "Paris");
        assert_eq!(obs.main.temp, 18.0);
        assert_eq!(obs.main.humidity, Some(60));
        assert_eq!(obs.primary_condition().unwrap().id, 800);
        assert_eq!(obs.sys.unwrap().country.as_deref(), Some("FR"));
    }

    #[test]
    fn primary_condition_fails_fast_when_missing() {
        let mut obs = fixtures::observation("Oslo", 600, "snow", -3.0);
        obs.weather.clear();

        let err = obs.primary_condition().unwrap_err();
        assert!(matches!(err, Error::MissingCondition { ref city } if city == "Oslo"));
    }

    #[test]
    fn observed_at_converts_unix_seconds() {
        let mut obs = fixtures::observation("Oslo", 600, "snow", -3.0);
        assert!(obs.observed_at().is_none());

        obs.dt = Some(0);
        assert_eq!(obs.observed_at().unwrap().timestamp(), 0);
    }

    #[test]
    fn insert_if_absent_keeps_first_record() {
        let mut cities = TrackedCities::new();
        let first = CityRecord::new(
            fixtures::observation("Rome", 800, "clear sky", 25.0),
            UnitSystem::Metric,
        );
        let second = CityRecord::new(
            fixtures::observation("Rome", 500, "light rain", 12.0),
            UnitSystem::Imperial,
        );

        assert!(cities.insert_if_absent(first.clone()));
        assert!(!cities.insert_if_absent(second));
        assert_eq!(cities.len(), 1);
        assert_eq!(cities.get("Rome"), Some(&first));
    }

    #[test]
    fn names_match_case_sensitively() {
        let mut cities = TrackedCities::new();
        let rome = fixtures::observation("Rome", 800, "clear sky", 25.0);
        cities.insert_if_absent(CityRecord::new(rome, UnitSystem::Metric));

        assert!(cities.contains("Rome"));
        assert!(!cities.contains("rome"));
    }

    #[test]
    fn deserialize_rejects_duplicate_names() {
        let rome = CityRecord::new(
            fixtures::observation("Rome", 800, "clear sky", 25.0),
            UnitSystem::Metric,
        );
        let json = serde_json::to_string(&[&rome, &rome]).unwrap();

        let err = serde_json::from_str::<TrackedCities>(&json).unwrap_err();
        assert!(err.to_string().contains("duplicate city name 'Rome'"));
    }

    #[test]
    fn deserialize_keeps_order_of_distinct_names() {
        let mut cities = TrackedCities::new();
        for name in ["Rome", "rome", "Milan"] {
            let obs = fixtures::observation(name, 800, "clear sky", 25.0);
            cities.insert_if_absent(CityRecord::new(obs, UnitSystem::Metric));
        }

        let json = serde_json::to_string(&cities).unwrap();
        let parsed: TrackedCities = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, cities);
    }
}
