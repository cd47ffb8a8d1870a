use crate::app_config::{
    AppConfig, Environment, DEFAULT_FALLBACK_LOCATION, DEFAULT_LOCATION_MAX_CACHED_AGE_MS,
    DEFAULT_LOCATION_TIMEOUT_MS, DEFAULT_RADIUS_MILES,
};
use crate::geo::Coordinate;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is set to an invalid value.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is set to an invalid value.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every variable is optional; unset variables fall back to the documented
/// defaults on [`AppConfig::default`].
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let parse_u64 = |var: &str, default: u64| -> Result<u64, ConfigError> {
        match lookup(var) {
            Ok(raw) => raw.trim().parse::<u64>().map_err(|e| invalid(var, e.to_string())),
            Err(_) => Ok(default),
        }
    };

    let parse_f64 = |var: &str, default: f64| -> Result<f64, ConfigError> {
        match lookup(var) {
            Ok(raw) => raw.trim().parse::<f64>().map_err(|e| invalid(var, e.to_string())),
            Err(_) => Ok(default),
        }
    };

    let parse_bool = |var: &str, default: bool| -> Result<bool, ConfigError> {
        match lookup(var) {
            Ok(raw) => parse_flag(&raw).ok_or_else(|| {
                invalid(var, format!("expected true/false/1/0, got '{raw}'"))
            }),
            Err(_) => Ok(default),
        }
    };

    let defaults = AppConfig::default();

    let env = parse_environment(&or_default("LARDER_ENV", "development"));
    let log_level = or_default("LARDER_LOG_LEVEL", &defaults.log_level);
    let charities_path = PathBuf::from(or_default(
        "LARDER_CHARITIES_PATH",
        "./config/charities.yaml",
    ));
    let catalog_url = optional("LARDER_CATALOG_URL");
    let geolocation_url = optional("LARDER_GEOLOCATION_URL");

    let default_radius_miles = parse_f64("LARDER_DEFAULT_RADIUS_MILES", DEFAULT_RADIUS_MILES)?;
    if !default_radius_miles.is_finite() || default_radius_miles <= 0.0 {
        return Err(invalid(
            "LARDER_DEFAULT_RADIUS_MILES",
            format!("radius must be a finite positive number, got {default_radius_miles}"),
        ));
    }

    let location_timeout_ms = parse_u64("LARDER_LOCATION_TIMEOUT_MS", DEFAULT_LOCATION_TIMEOUT_MS)?;
    let location_max_cached_age_ms = parse_u64(
        "LARDER_LOCATION_MAX_CACHED_AGE_MS",
        DEFAULT_LOCATION_MAX_CACHED_AGE_MS,
    )?;
    let location_high_accuracy = parse_bool("LARDER_LOCATION_HIGH_ACCURACY", true)?;

    let fallback_lat = parse_f64("LARDER_FALLBACK_LAT", DEFAULT_FALLBACK_LOCATION.lat)?;
    if !fallback_lat.is_finite() || !(-90.0..=90.0).contains(&fallback_lat) {
        return Err(invalid(
            "LARDER_FALLBACK_LAT",
            format!("latitude must be within [-90, 90], got {fallback_lat}"),
        ));
    }
    let fallback_lng = parse_f64("LARDER_FALLBACK_LNG", DEFAULT_FALLBACK_LOCATION.lng)?;
    if !fallback_lng.is_finite() || !(-180.0..=180.0).contains(&fallback_lng) {
        return Err(invalid(
            "LARDER_FALLBACK_LNG",
            format!("longitude must be within [-180, 180], got {fallback_lng}"),
        ));
    }
    let fallback_location = Coordinate::new(fallback_lat, fallback_lng);

    let http_timeout_secs = parse_u64("LARDER_HTTP_TIMEOUT_SECS", defaults.http_timeout_secs)?;
    let user_agent = or_default("LARDER_USER_AGENT", &defaults.user_agent);
    let maps_api_key = optional("LARDER_MAPS_API_KEY");

    Ok(AppConfig {
        env,
        log_level,
        charities_path,
        catalog_url,
        geolocation_url,
        default_radius_miles,
        location_timeout_ms,
        location_max_cached_age_ms,
        location_high_accuracy,
        fallback_location,
        http_timeout_secs,
        user_agent,
        maps_api_key,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
