use std::path::PathBuf;

use crate::geo::Coordinate;

pub const DEFAULT_RADIUS_MILES: f64 = 25.0;
pub const DEFAULT_LOCATION_TIMEOUT_MS: u64 = 30_000;
pub const DEFAULT_LOCATION_MAX_CACHED_AGE_MS: u64 = 300_000;
/// Lower Manhattan. Used whenever the device location cannot be resolved.
pub const DEFAULT_FALLBACK_LOCATION: Coordinate = Coordinate::new(40.7128, -74.0060);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    pub charities_path: PathBuf,
    pub catalog_url: Option<String>,
    pub geolocation_url: Option<String>,
    pub default_radius_miles: f64,
    pub location_timeout_ms: u64,
    pub location_max_cached_age_ms: u64,
    pub location_high_accuracy: bool,
    pub fallback_location: Coordinate,
    pub http_timeout_secs: u64,
    pub user_agent: String,
    pub maps_api_key: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            env: Environment::Development,
            log_level: "info".to_string(),
            charities_path: PathBuf::from("./config/charities.yaml"),
            catalog_url: None,
            geolocation_url: None,
            default_radius_miles: DEFAULT_RADIUS_MILES,
            location_timeout_ms: DEFAULT_LOCATION_TIMEOUT_MS,
            location_max_cached_age_ms: DEFAULT_LOCATION_MAX_CACHED_AGE_MS,
            location_high_accuracy: true,
            fallback_location: DEFAULT_FALLBACK_LOCATION,
            http_timeout_secs: 30,
            user_agent: "larder/0.1 (charity-locator)".to_string(),
            maps_api_key: None,
        }
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("charities_path", &self.charities_path)
            .field("catalog_url", &self.catalog_url)
            .field("geolocation_url", &self.geolocation_url)
            .field("default_radius_miles", &self.default_radius_miles)
            .field("location_timeout_ms", &self.location_timeout_ms)
            .field(
                "location_max_cached_age_ms",
                &self.location_max_cached_age_ms,
            )
            .field("location_high_accuracy", &self.location_high_accuracy)
            .field("fallback_location", &self.fallback_location)
            .field("http_timeout_secs", &self.http_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field(
                "maps_api_key",
                &self.maps_api_key.as_ref().map(|_| "[redacted]"),
            )
            .finish()
    }
}
