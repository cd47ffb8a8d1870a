//! Coordinates and great-circle distance.
//!
//! Distances use the haversine formula on a spherical Earth. Good enough to
//! rank nearby charities; not suitable for navigation.

use serde::{Deserialize, Serialize};

use crate::CoreError;

/// Mean Earth radius in miles used by [`distance_miles`].
pub const EARTH_RADIUS_MILES: f64 = 3959.0;

/// A WGS-84 latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// `true` when both components are finite and inside the WGS-84 range.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }

    /// Returns the coordinate unchanged if it is in range.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidCoordinate`] for out-of-range or non-finite
    /// components. The value is never clamped.
    pub fn validate(self) -> Result<Self, CoreError> {
        if self.is_valid() {
            Ok(self)
        } else {
            Err(CoreError::InvalidCoordinate {
                lat: self.lat,
                lng: self.lng,
            })
        }
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.4},{:.4}", self.lat, self.lng)
    }
}

/// Great-circle distance between `a` and `b` in miles.
#[must_use]
pub fn distance_miles(a: Coordinate, b: Coordinate) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();

    let h = (d_lat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
    // Rounding can push near-antipodal inputs just past 1.
    let h = h.min(1.0);

    2.0 * EARTH_RADIUS_MILES * h.sqrt().atan2((1.0 - h).sqrt())
}

/// Render a distance the way listings show it, e.g. `"3.2 mi"`.
#[must_use]
pub fn format_miles(miles: f64) -> String {
    format!("{miles:.1} mi")
}
