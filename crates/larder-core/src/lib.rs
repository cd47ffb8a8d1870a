//! Domain types, distance math, and configuration shared by the larder crates.

pub mod app_config;
pub mod charities;
pub mod config;
pub mod geo;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use charities::{
    load_charities, parse_charities, CharitiesFile, Charity, FoodCategory, OperatingHours,
};
pub use config::{load_app_config, load_app_config_from_env};
pub use geo::{distance_miles, format_miles, Coordinate, EARTH_RADIUS_MILES};

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid coordinate ({lat}, {lng}): latitude must be within [-90, 90] and longitude within [-180, 180]")]
    InvalidCoordinate { lat: f64, lng: f64 },

    #[error("unknown food category: {0}")]
    UnknownFoodCategory(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read charities file {path}: {source}")]
    CharitiesFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse charities file: {0}")]
    CharitiesFileParse(#[from] serde_yaml::Error),

    #[error("charities validation failed: {0}")]
    Validation(String),
}
