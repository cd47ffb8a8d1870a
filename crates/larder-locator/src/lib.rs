//! Nearby-charity discovery.
//!
//! [`LocationProvider`] resolves where the user is (or says why it cannot),
//! and [`CharityLocator`] ranks a [`CharityCatalog`] by great-circle distance
//! from that point.

pub mod catalog;
pub mod error;
mod http;
pub mod links;
pub mod location;
pub mod ranking;

pub use catalog::{CharityCatalog, FileCatalog, HttpCatalog, StaticCatalog};
pub use error::{CatalogError, LocatorError};
pub use links::{directions_url, map_embed_url, DEFAULT_MAP_ZOOM};
pub use location::{
    Geolocator, HttpGeolocator, LocationOutcome, LocationProvider, PositionOptions, Unavailable,
};
pub use ranking::{
    rank_by_distance, validate_radius, CharityLocator, RankedCharity, SearchRequest,
};

pub use larder_core::{distance_miles, Charity, Coordinate, FoodCategory};
