use std::sync::Mutex;
use std::time::{Duration, Instant};

use larder_core::Coordinate;
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use super::{Geolocator, PositionOptions, Unavailable};

#[derive(Deserialize)]
struct PositionPayload {
    #[serde(alias = "latitude")]
    lat: f64,
    #[serde(alias = "longitude", alias = "lon")]
    lng: f64,
}

#[derive(Clone, Copy)]
struct CachedFix {
    coordinate: Coordinate,
    obtained_at: Instant,
}

/// Geolocation over HTTP, e.g. an IP-geolocation service or a device bridge.
///
/// Keeps the most recent fix and serves it again while it is younger than
/// [`PositionOptions::maximum_age`]. When `high_accuracy` is requested the
/// query carries `accuracy=high`.
pub struct HttpGeolocator {
    client: Client,
    url: String,
    last_fix: Mutex<Option<CachedFix>>,
}

impl HttpGeolocator {
    /// # Errors
    ///
    /// Returns an error if the underlying `reqwest::Client` cannot be
    /// constructed.
    pub fn new(url: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, reqwest::Error> {
        let client = crate::http::build_client(timeout_secs, user_agent)?;
        Ok(Self {
            client,
            url: url.to_owned(),
            last_fix: Mutex::new(None),
        })
    }

    fn cached_fix(&self, maximum_age: Duration) -> Option<Coordinate> {
        let fix = (*self.last_fix.lock().ok()?)?;
        (fix.obtained_at.elapsed() <= maximum_age).then_some(fix.coordinate)
    }

    fn remember(&self, coordinate: Coordinate) {
        if let Ok(mut guard) = self.last_fix.lock() {
            *guard = Some(CachedFix {
                coordinate,
                obtained_at: Instant::now(),
            });
        }
    }
}

#[async_trait::async_trait]
impl Geolocator for HttpGeolocator {
    async fn current_position(
        &self,
        options: &PositionOptions,
    ) -> Result<Coordinate, Unavailable> {
        if let Some(coordinate) = self.cached_fix(options.maximum_age) {
            tracing::debug!(%coordinate, "reusing cached position fix");
            return Ok(coordinate);
        }

        let mut request = self.client.get(&self.url);
        if options.high_accuracy {
            request = request.query(&[("accuracy", "high")]);
        }

        let response = request
            .send()
            .await
            .map_err(|e| Unavailable::PositionUnavailable(e.to_string()))?;

        match response.status() {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                return Err(Unavailable::PermissionDenied);
            }
            status if !status.is_success() => {
                return Err(Unavailable::PositionUnavailable(format!(
                    "unexpected HTTP status {} from {}",
                    status.as_u16(),
                    self.url
                )));
            }
            _ => {}
        }

        let payload: PositionPayload = response
            .json()
            .await
            .map_err(|e| Unavailable::PositionUnavailable(format!("malformed position: {e}")))?;

        let coordinate = Coordinate::new(payload.lat, payload.lng);
        // Only in-range fixes are cached, so a bad reading does not stick.
        if !coordinate.is_valid() {
            return Err(Unavailable::PositionUnavailable(format!(
                "endpoint returned out-of-range position ({}, {})",
                coordinate.lat, coordinate.lng
            )));
        }
        self.remember(coordinate);
        Ok(coordinate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geolocator_with_fix_aged(age: Duration) -> HttpGeolocator {
        let geolocator = HttpGeolocator::new("http://127.0.0.1:9/position", 1, "larder-test")
            .expect("client construction should not fail");
        let obtained_at = Instant::now()
            .checked_sub(age)
            .expect("monotonic clock should reach back this far");
        *geolocator.last_fix.lock().unwrap() = Some(CachedFix {
            coordinate: Coordinate::new(5.0, 6.0),
            obtained_at,
        });
        geolocator
    }

    #[test]
    fn cached_fix_served_while_no_older_than_maximum_age() {
        let geolocator = geolocator_with_fix_aged(Duration::from_secs(10));
        assert_eq!(
            geolocator.cached_fix(Duration::from_secs(60)),
            Some(Coordinate::new(5.0, 6.0))
        );
    }

    #[test]
    fn cached_fix_dropped_once_older_than_maximum_age() {
        let geolocator = geolocator_with_fix_aged(Duration::from_secs(10));
        assert_eq!(geolocator.cached_fix(Duration::from_secs(5)), None);
        assert_eq!(geolocator.cached_fix(Duration::ZERO), None);
    }

    #[test]
    fn empty_cache_serves_nothing() {
        let geolocator = HttpGeolocator::new("http://127.0.0.1:9/position", 1, "larder-test")
            .expect("client construction should not fail");
        assert_eq!(geolocator.cached_fix(Duration::from_secs(300)), None);
    }
}
