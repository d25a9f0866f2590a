use std::sync::Arc;

use anyhow::anyhow;
use skycast_core::{
    AppError, Config, NetworkError, StorageBackend, StorageConfig, TemperatureUnit,
};
use skycast_prefs::{
    FavoriteCity, FileStore, KeyValueStore, MemoryStore, PreferenceStore, SqliteStore,
};
use skycast_weather::{CurrentWeather, ForecastResponse, WeatherClient};

const PREFS_DIR: &str = "prefs";
const PREFS_DB: &str = "prefs.db";

/// Application state and the single preference store for this process
pub struct App {
    config: Config,
    prefs: PreferenceStore,
    client: WeatherClient,
}

impl App {
    /// Create the application from `config`, opening the configured storage backend
    pub fn new(config: Config) -> Result<Self, AppError> {
        let store = open_store(&config.storage);
        Self::with_store(config, store)
    }

    /// Create the application over an already-open store
    pub fn with_store(config: Config, store: Arc<dyn KeyValueStore>) -> Result<Self, AppError> {
        let client = WeatherClient::new(&config.weather)?;
        if !client.is_configured() {
            tracing::warn!(
                "Weather API key is not configured. Set WEATHER_API_KEY or weather.api_key in the config file"
            );
        }

        let prefs = PreferenceStore::open(store);
        tracing::info!("SkyCast initialized");

        Ok(Self {
            config,
            prefs,
            client,
        })
    }

    /// Get reference to application config
    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn prefs(&self) -> &PreferenceStore {
        &self.prefs
    }

    pub fn unit(&self) -> TemperatureUnit {
        self.prefs.unit()
    }

    pub fn toggle_unit(&mut self) -> TemperatureUnit {
        self.prefs.toggle_unit()
    }

    /// Look up a city and remember the query once the lookup succeeds.
    pub async fn search(&mut self, query: &str) -> Result<CurrentWeather, AppError> {
        let query = non_empty(query)?;
        let weather = self.client.current_weather(query).await?;
        self.prefs.add_to_recent_searches(query);
        Ok(weather)
    }

    /// Current conditions and the 5-day forecast, fetched together.
    pub async fn forecast(&self, city: &str) -> Result<(CurrentWeather, ForecastResponse), AppError> {
        let city = non_empty(city)?;
        let (current, forecast) =
            tokio::try_join!(self.client.current_weather(city), self.client.forecast(city))?;
        Ok((current, forecast))
    }

    pub async fn weather_at(&self, lat: f64, lon: f64) -> Result<CurrentWeather, AppError> {
        Ok(self.client.weather_by_coords(lat, lon).await?)
    }

    pub async fn find(&self, query: &str) -> Result<Vec<CurrentWeather>, AppError> {
        let query = non_empty(query)?;
        Ok(self.client.search_cities(query).await?)
    }

    /// Fetch `city` and store the provider's record, unmodified, as a favorite snapshot.
    ///
    /// Returns the decoded weather and whether it was newly added.
    pub async fn add_favorite(&mut self, city: &str) -> Result<(CurrentWeather, bool), AppError> {
        let city = non_empty(city)?;
        let raw = self.client.current_weather_raw(city).await?;
        let weather: CurrentWeather = serde_json::from_value(raw.clone())
            .map_err(|e| AppError::Network(NetworkError::InvalidResponse(e.to_string())))?;
        let favorite = FavoriteCity::from_snapshot(&raw)
            .map_err(|e| AppError::Network(NetworkError::InvalidResponse(e.to_string())))?;
        let added = self.prefs.add_to_favorites(favorite);
        Ok((weather, added))
    }

    pub fn remove_favorite(&mut self, city_id: i64) -> bool {
        self.prefs.remove_from_favorites(city_id)
    }

    /// Re-fetch every favorite by name. Stored snapshots are left unchanged.
    ///
    /// The first failure aborts the refresh.
    pub async fn refresh_favorites(&self) -> Result<Vec<CurrentWeather>, AppError> {
        let names = self.prefs.favorite_names();
        tracing::info!("Refreshing {} favorites", names.len());

        let mut fresh = Vec::with_capacity(names.len());
        for name in names {
            fresh.push(self.client.current_weather(name).await?);
        }
        Ok(fresh)
    }
}

fn non_empty(query: &str) -> Result<&str, AppError> {
    let query = query.trim();
    if query.is_empty() {
        return Err(AppError::Other(anyhow!("Please enter a city name")));
    }
    Ok(query)
}

/// Open the configured backend, falling back to session-only storage.
fn open_store(config: &StorageConfig) -> Arc<dyn KeyValueStore> {
    let opened: Result<Arc<dyn KeyValueStore>, skycast_prefs::StorageError> = match config.backend
    {
        StorageBackend::File => Ok(Arc::new(FileStore::new(config.data_dir.join(PREFS_DIR)))),
        StorageBackend::Sqlite => SqliteStore::open(config.data_dir.join(PREFS_DB))
            .map(|store| Arc::new(store) as Arc<dyn KeyValueStore>),
    };

    match opened {
        Ok(store) => {
            tracing::debug!(backend = ?config.backend, dir = %config.data_dir.display(), "Preference storage opened");
            store
        }
        Err(e) => {
            let err = AppError::from(e);
            tracing::warn!("{}. {}", err, err.user_message());
            Arc::new(MemoryStore::new())
        }
    }
}
