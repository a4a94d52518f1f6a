use crate::{classify::classify, error::Result, model::CityRecord};

/// Renders the summary line for one city, e.g. `☼ Paris: Clear sky (18°C)`.
pub fn format_line(record: &CityRecord) -> Result<String> {
    let condition = record.observation.primary_condition()?;
    let (symbol, _) = classify(condition.id);

    Ok(format!(
        "{symbol} {name}: {description} ({temp}°{unit})",
        name = record.name,
        description = capitalize_first(&condition.description),
        temp = record.observation.main.temp,
        unit = record.unit_system.temperature_letter(),
    ))
}

/// Secondary line with the readings that are present in the observation.
pub fn format_details(record: &CityRecord) -> String {
    let obs = &record.observation;
    let units = record.unit_system;
    let mut parts = Vec::new();

    if let Some(feels_like) = obs.main.feels_like {
        parts.push(format!("feels like {feels_like}°{}", units.temperature_letter()));
    }
    if let Some(humidity) = obs.main.humidity {
        parts.push(format!("humidity {humidity}%"));
    }
    if let Some(wind) = &obs.wind {
        parts.push(format!("wind {} {}", wind.speed, units.speed_unit()));
    }
    if let Some(at) = obs.observed_at() {
        parts.push(format!("observed {}", at.format("%Y-%m-%d %H:%M UTC")));
    }

    parts.join(", ")
}

/// Uppercases the first character and leaves the rest as is.
fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::Error,
        model::{UnitSystem, Wind, fixtures::observation},
    };

    #[test]
    fn paris_clear_metric() {
        let paris = observation("Paris", 800, "clear sky", 18.0);
        let record = CityRecord::new(paris, UnitSystem::Metric);
        assert_eq!(format_line(&record).unwrap(), "☼ Paris: Clear sky (18°C)");
    }

    #[test]
    fn imperial_uses_fahrenheit_and_keeps_fraction() {
        let boston = observation("Boston", 502, "heavy intensity rain", 41.5);
        let record = CityRecord::new(boston, UnitSystem::Imperial);
        assert_eq!(format_line(&record).unwrap(), "💦 Boston: Heavy intensity rain (41.5°F)");
    }

    #[test]
    fn only_first_letter_changes() {
        assert_eq!(capitalize_first("light SNOW"), "Light SNOW");
        assert_eq!(capitalize_first("ébullition"), "Ébullition");
        assert_eq!(capitalize_first(""), "");
    }

    #[test]
    fn unknown_code_gets_fallback_symbol() {
        let nowhere = observation("Nowhere", 450, "odd weather", 0.0);
        let record = CityRecord::new(nowhere, UnitSystem::Metric);
        assert_eq!(format_line(&record).unwrap(), "🌈 Nowhere: Odd weather (0°C)");
    }

    #[test]
    fn missing_condition_fails() {
        let mut obs = observation("Paris", 800, "clear sky", 18.0);
        obs.weather.clear();
        let record = CityRecord::new(obs, UnitSystem::Metric);

        assert!(matches!(format_line(&record), Err(Error::MissingCondition { .. })));
    }

    #[test]
    fn details_list_present_readings() {
        let mut obs = observation("Denver", 801, "few clouds", 60.0);
        obs.main.humidity = Some(30);
        obs.wind = Some(Wind { speed: 8.5 });
        obs.dt = Some(1_700_000_000);
        let record = CityRecord::new(obs, UnitSystem::Imperial);

        assert_eq!(
            format_details(&record),
            "humidity 30%, wind 8.5 mph, observed 2023-11-14 22:13 UTC"
        );
    }

    #[test]
    fn details_empty_without_extras() {
        let paris = observation("Paris", 800, "clear sky", 18.0);
        let record = CityRecord::new(paris, UnitSystem::Metric);
        assert_eq!(format_details(&record), "");
    }
}
