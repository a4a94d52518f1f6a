use std::collections::HashSet;

use anyhow::Context;
use cityweather_core::{
    CityStore, Config, JsonFileStorage, TrackedCities, UnitSystem, build_query, classify,
    config::API_KEY_ENV, format_details, format_line, provider::client_from_config,
};
use clap::{Parser, Subcommand};
use inquire::{Confirm, InquireError, MultiSelect, Password};

use crate::style;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "cityweather", version, about = "Track the weather in your favourite cities")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the tracked cities with their last fetched weather.
    List {
        /// Also show feels-like, humidity, wind and observation time.
        #[arg(long)]
        details: bool,

        /// Print without ANSI colors.
        #[arg(long)]
        no_color: bool,
    },

    /// Fetch the weather for a city and start tracking it.
    Add {
        /// City name, e.g. `New York` or `London,GB`.
        #[arg(required = true, num_args = 1..)]
        city: Vec<String>,

        /// Use imperial units (°F).
        #[arg(long, conflicts_with = "metric")]
        imperial: bool,

        /// Use metric units (°C), overriding the configured default.
        #[arg(long)]
        metric: bool,
    },

    /// Stop tracking cities. Without names, pick them interactively.
    Remove {
        /// Exact city names as shown by `list`.
        names: Vec<String>,
    },

    /// Configure the OpenWeather API key and default units.
    Configure,

    /// Print the locations of the config file and the saved city list.
    Path,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        tracing::debug!(command = ?self.command, "running command");
        let config = Config::load()?;

        match self.command {
            Command::List { details, no_color } => {
                let store = open_store(&config)?;
                print_cities(store.cities(), details, !no_color)?;
            }
            Command::Add {
                city,
                imperial,
                metric,
            } => {
                let units = match (imperial, metric) {
                    (true, _) => UnitSystem::Imperial,
                    (_, true) => UnitSystem::Metric,
                    _ => config.default_units(),
                };

                let request = build_query(city.as_slice(), units == UnitSystem::Imperial)?;
                let mut store = open_store(&config)?;
                let client = client_from_config(&config, std::env::var(API_KEY_ENV).ok())?;

                let observation = client.fetch(&request).await.with_context(|| {
                    format!("Could not fetch weather for '{}'", request.location)
                })?;

                let name = observation.name.clone();
                if !store.add(observation, units)? {
                    println!("{name} is already tracked; remove it first to refresh.");
                }
                print_cities(store.cities(), false, true)?;
            }
            Command::Remove { names } => {
                let mut store = open_store(&config)?;

                let selected: HashSet<String> = if names.is_empty() {
                    match select_cities(store.cities())? {
                        Some(selected) => selected,
                        None => return Ok(()),
                    }
                } else {
                    names.into_iter().collect()
                };

                let removed = store.remove(&selected)?;
                if removed == 0 && !selected.is_empty() {
                    println!("No tracked city matched.");
                }
                print_cities(store.cities(), false, true)?;
            }
            Command::Configure => configure(config)?,
            Command::Path => {
                println!("config: {}", Config::config_file_path()?.display());
                println!("cities: {}", config.storage()?.path().display());
            }
        }

        Ok(())
    }
}

fn open_store(config: &Config) -> anyhow::Result<CityStore<JsonFileStorage>> {
    let storage = config.storage()?;
    let store = CityStore::load(storage)?;
    Ok(store)
}

fn print_cities(cities: &TrackedCities, details: bool, color: bool) -> anyhow::Result<()> {
    if cities.is_empty() {
        println!("No cities tracked yet. Add one with `cityweather add <city>`.");
        return Ok(());
    }

    for record in cities {
        let line = format_line(record)?;
        let (_, category) = classify(record.observation.primary_condition()?.id);

        if color {
            println!("{}", style::paint(&line, category));
        } else {
            println!("{line}");
        }

        if details {
            let extra = format_details(record);
            if !extra.is_empty() {
                println!("    {extra}");
            }
        }
    }

    Ok(())
}

/// Returns `None` if the user cancelled the prompt.
fn select_cities(cities: &TrackedCities) -> anyhow::Result<Option<HashSet<String>>> {
    if cities.is_empty() {
        println!("No cities tracked yet.");
        return Ok(None);
    }

    let options: Vec<String> = cities.names().map(str::to_owned).collect();
    match MultiSelect::new("Select cities to remove:", options).prompt() {
        Ok(selected) => Ok(Some(selected.into_iter().collect())),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

fn configure(mut config: Config) -> anyhow::Result<()> {
    let api_key = Password::new("OpenWeather API key:")
        .without_confirmation()
        .with_help_message("Get one at https://home.openweathermap.org/api_keys")
        .prompt()?;

    if !api_key.trim().is_empty() {
        config.set_api_key(api_key.trim().to_string());
    }

    config.imperial = Confirm::new("Use imperial units (°F) by default?")
        .with_default(config.imperial)
        .prompt()?;

    config.save()?;
    println!("Saved configuration to {}", Config::config_file_path()?.display());

    Ok(())
}
