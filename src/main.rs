//! SkyCast: current weather, forecasts and saved favorite cities in the terminal.

mod app;
mod render;

use anyhow::Result;
use chrono::Local;
use clap::{Parser, Subcommand};
use skycast_core::{AppError, Config, TemperatureUnit};
use skycast_weather::DAILY_FORECAST_DAYS;

use crate::app::App;

#[derive(Parser)]
#[command(name = "skycast", about = "Weather for the cities you care about", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Current weather for a city; remembered in recent searches
    Search { city: String },

    /// Current weather plus the next days at midday
    Forecast {
        /// Defaults to ui.default_city from the config file
        city: Option<String>,
    },

    /// Current weather at a coordinate
    #[command(allow_negative_numbers = true)]
    Coords { lat: f64, lon: f64 },

    /// Cities matching a name
    Find { query: String },

    /// Saved favorite cities
    Favorites {
        #[command(subcommand)]
        action: Option<FavoritesAction>,
    },

    /// Show or change the temperature unit
    Unit {
        #[command(subcommand)]
        action: Option<UnitAction>,
    },

    /// Recent searches, newest first
    Recent,

    /// Show the config file location and check its contents
    Config,
}

#[derive(Subcommand)]
enum FavoritesAction {
    /// List stored favorites
    List,
    /// Fetch a city and save it as a favorite
    Add { city: String },
    /// Remove a favorite by city id
    Remove { id: i64 },
    /// Fetch fresh weather for every favorite
    Refresh,
}

#[derive(Subcommand)]
enum UnitAction {
    /// Switch between Celsius and Fahrenheit
    Toggle,
    /// Use a specific unit (c, f, celsius, fahrenheit, metric, imperial)
    Set { unit: TemperatureUnit },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    skycast_core::init()?;

    let cli = Cli::parse();

    // Must work even when the config file fails validation
    if let Command::Config = cli.command {
        return show_config();
    }

    if let Err(e) = start(cli.command).await {
        tracing::debug!(error = ?e, "Command failed");
        // Display carries the provider's reason; the hint is generic
        eprintln!("Error: {}", e);
        eprintln!("{}", e.user_message());
        std::process::exit(1);
    }

    Ok(())
}

async fn start(command: Command) -> Result<(), AppError> {
    let (config, _) = Config::load_validated().map_err(AppError::from_anyhow)?;
    let mut app = App::new(config)?;
    run(&mut app, command).await
}

async fn run(app: &mut App, command: Command) -> Result<(), AppError> {
    let unit = app.unit();

    match command {
        Command::Search { city } => {
            let weather = app.search(&city).await?;
            print!("{}", render::weather_card(&weather, unit));
        }
        Command::Forecast { city } => {
            let city = city.unwrap_or_else(|| app.config().ui.default_city.clone());
            let (current, forecast) = app.forecast(&city).await?;
            print!("{}", render::weather_card(&current, unit));
            println!();
            println!("{}-day forecast", DAILY_FORECAST_DAYS);
            for entry in forecast.daily() {
                println!("  {}", render::forecast_card(entry, unit, &Local));
            }
        }
        Command::Coords { lat, lon } => {
            let weather = app.weather_at(lat, lon).await?;
            print!("{}", render::weather_card(&weather, unit));
        }
        Command::Find { query } => {
            let matches = app.find(&query).await?;
            if matches.is_empty() {
                println!("No cities match \"{}\"", query.trim());
            }
            for weather in &matches {
                println!("{}", render::match_row(weather, unit));
            }
        }
        Command::Favorites { action } => match action.unwrap_or(FavoritesAction::List) {
            FavoritesAction::List => {
                let favorites = app.prefs().favorites();
                if favorites.is_empty() {
                    println!("No favorites yet. Add one with `skycast favorites add <city>`.");
                }
                for city in favorites {
                    println!("{}", render::favorite_row(city, unit));
                }
            }
            FavoritesAction::Add { city } => {
                let (weather, added) = app.add_favorite(&city).await?;
                if added {
                    println!("Added {} ({}) to favorites", weather.name, weather.id);
                } else {
                    println!("{} is already a favorite", weather.name);
                }
            }
            FavoritesAction::Remove { id } => {
                if app.remove_favorite(id) {
                    println!("Removed {} from favorites", id);
                } else {
                    println!("No favorite with id {}", id);
                }
            }
            FavoritesAction::Refresh => {
                for weather in app.refresh_favorites().await? {
                    print!("{}", render::weather_card(&weather, unit));
                    println!();
                }
            }
        },
        Command::Unit { action } => {
            let unit = match action {
                None => unit,
                Some(UnitAction::Toggle) => app.toggle_unit(),
                Some(UnitAction::Set { unit: wanted }) => {
                    if wanted != unit {
                        app.toggle_unit();
                    }
                    wanted
                }
            };
            println!("Temperature unit: {}", unit);
        }
        Command::Recent => {
            let searches = app.prefs().recent_searches();
            if searches.is_empty() {
                println!("No recent searches");
            }
            for (i, city) in searches.iter().enumerate() {
                println!("{}. {}", i + 1, city);
            }
        }
        Command::Config => show_config().map_err(AppError::from_anyhow)?,
    }

    Ok(())
}

fn show_config() -> Result<()> {
    let path = Config::config_path()?;
    let config = Config::load()?;
    let validation = config.validate();

    println!("Config file: {}", path.display());
    println!("Data dir:    {}", config.storage.data_dir.display());
    println!("Backend:     {:?}", config.storage.backend);
    println!(
        "API key:     {}",
        if skycast_weather::is_api_key_configured(Some(&config.weather.api_key)) {
            "set"
        } else {
            "missing"
        }
    );

    for warning in &validation.warnings {
        println!("warning: {}", warning);
    }
    if !validation.is_valid() {
        anyhow::bail!("{}", validation.error_summary());
    }
    Ok(())
}
