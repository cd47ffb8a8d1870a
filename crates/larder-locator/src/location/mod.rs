//! Best-effort resolution of the user's current position.
//!
//! [`LocationProvider::resolve_current_location`] always completes: a missing
//! capability, a denied permission, a platform error, or a slow fix all come
//! back as [`LocationOutcome::Unavailable`] so the caller can substitute a
//! fallback origin instead of failing the whole search.

mod http;

use std::time::Duration;

use larder_core::app_config::{DEFAULT_LOCATION_MAX_CACHED_AGE_MS, DEFAULT_LOCATION_TIMEOUT_MS};
use larder_core::{AppConfig, Coordinate};
use thiserror::Error;

pub use http::HttpGeolocator;

/// Options handed to the platform on every position request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionOptions {
    /// Give up and report [`Unavailable::Timeout`] after this long.
    pub timeout: Duration,
    /// A previously obtained fix no older than this may be reused.
    pub maximum_age: Duration,
    /// Prefer GPS-grade precision over coarse network positioning.
    pub high_accuracy: bool,
}

impl Default for PositionOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(DEFAULT_LOCATION_TIMEOUT_MS),
            maximum_age: Duration::from_millis(DEFAULT_LOCATION_MAX_CACHED_AGE_MS),
            high_accuracy: true,
        }
    }
}

impl PositionOptions {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            timeout: Duration::from_millis(config.location_timeout_ms),
            maximum_age: Duration::from_millis(config.location_max_cached_age_ms),
            high_accuracy: config.location_high_accuracy,
        }
    }

    fn timeout_ms(&self) -> u64 {
        u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX)
    }
}

/// Why no position could be produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Unavailable {
    #[error("no location capability on this platform")]
    Unsupported,

    #[error("location permission denied")]
    PermissionDenied,

    #[error("position unavailable: {0}")]
    PositionUnavailable(String),

    #[error("no position fix within {timeout_ms} ms")]
    Timeout { timeout_ms: u64 },
}

/// Platform location capability.
#[async_trait::async_trait]
pub trait Geolocator: Send + Sync {
    /// Request a single position fix.
    ///
    /// Implementations need not enforce `options.timeout` themselves; the
    /// provider bounds the wait.
    async fn current_position(&self, options: &PositionOptions)
        -> Result<Coordinate, Unavailable>;
}

/// Result of one resolution attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum LocationOutcome {
    Resolved(Coordinate),
    Unavailable(Unavailable),
}

impl LocationOutcome {
    #[must_use]
    pub fn coordinate(&self) -> Option<Coordinate> {
        match self {
            LocationOutcome::Resolved(coordinate) => Some(*coordinate),
            LocationOutcome::Unavailable(_) => None,
        }
    }

    /// The resolved position, or `fallback` when none was available.
    #[must_use]
    pub fn or_fallback(&self, fallback: Coordinate) -> Coordinate {
        self.coordinate().unwrap_or(fallback)
    }

    #[must_use]
    pub fn is_resolved(&self) -> bool {
        matches!(self, LocationOutcome::Resolved(_))
    }
}

pub struct LocationProvider {
    geolocator: Option<Box<dyn Geolocator>>,
    options: PositionOptions,
}

impl LocationProvider {
    #[must_use]
    pub fn new(geolocator: Option<Box<dyn Geolocator>>, options: PositionOptions) -> Self {
        Self {
            geolocator,
            options,
        }
    }

    /// A provider on a platform with no location capability at all.
    #[must_use]
    pub fn unsupported(options: PositionOptions) -> Self {
        Self::new(None, options)
    }

    #[must_use]
    pub fn options(&self) -> &PositionOptions {
        &self.options
    }

    /// Make one attempt to obtain the current position.
    ///
    /// The platform request races a timer of `options.timeout`. Dropping the
    /// returned future abandons the pending request. No retries are made.
    pub async fn resolve_current_location(&self) -> LocationOutcome {
        let Some(geolocator) = self.geolocator.as_deref() else {
            tracing::warn!("location capability unavailable; caller should fall back");
            return LocationOutcome::Unavailable(Unavailable::Unsupported);
        };

        let request = geolocator.current_position(&self.options);
        let reason = match tokio::time::timeout(self.options.timeout, request).await {
            Ok(Ok(coordinate)) if coordinate.is_valid() => {
                tracing::debug!(%coordinate, "resolved current location");
                return LocationOutcome::Resolved(coordinate);
            }
            Ok(Ok(coordinate)) => Unavailable::PositionUnavailable(format!(
                "platform returned out-of-range position ({}, {})",
                coordinate.lat, coordinate.lng
            )),
            Ok(Err(reason)) => reason,
            Err(_elapsed) => Unavailable::Timeout {
                timeout_ms: self.options.timeout_ms(),
            },
        };

        tracing::warn!(%reason, "could not resolve current location");
        LocationOutcome::Unavailable(reason)
    }
}

#[cfg(test)]
#[path = "location_test.rs"]
mod tests;
