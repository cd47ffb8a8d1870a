//! Distance ranking of charity candidates.

use std::sync::Arc;

use larder_core::app_config::DEFAULT_RADIUS_MILES;
use larder_core::{distance_miles, Charity, Coordinate, FoodCategory};
use serde::Serialize;

use crate::catalog::CharityCatalog;
use crate::error::LocatorError;

/// A charity annotated with its distance from the search origin.
///
/// The distance belongs to one search only, so it lives here rather than on
/// the catalog record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedCharity {
    #[serde(flatten)]
    pub charity: Charity,
    #[serde(rename = "distance")]
    pub distance_miles: f64,
}

/// A validated nearby search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    origin: Coordinate,
    radius_miles: f64,
    accepts: Option<FoodCategory>,
    pickup_only: bool,
}

impl SearchRequest {
    /// # Errors
    ///
    /// Returns [`LocatorError::InvalidOrigin`] for an out-of-range origin and
    /// [`LocatorError::InvalidRadius`] for a radius that is not a finite
    /// positive number.
    pub fn new(origin: Coordinate, radius_miles: f64) -> Result<Self, LocatorError> {
        let origin = origin.validate().map_err(LocatorError::InvalidOrigin)?;
        let radius_miles = validate_radius(radius_miles)?;
        Ok(Self {
            origin,
            radius_miles,
            accepts: None,
            pickup_only: false,
        })
    }

    /// # Errors
    ///
    /// Returns [`LocatorError::InvalidOrigin`] for an out-of-range origin.
    pub fn with_default_radius(origin: Coordinate) -> Result<Self, LocatorError> {
        Self::new(origin, DEFAULT_RADIUS_MILES)
    }

    /// Keep only charities that take donations of `category`.
    #[must_use]
    pub fn accepting(mut self, category: FoodCategory) -> Self {
        self.accepts = Some(category);
        self
    }

    /// Keep only charities that offer pickup.
    #[must_use]
    pub fn pickup_only(mut self) -> Self {
        self.pickup_only = true;
        self
    }

    #[must_use]
    pub fn origin(&self) -> Coordinate {
        self.origin
    }

    #[must_use]
    pub fn radius_miles(&self) -> f64 {
        self.radius_miles
    }

    fn admits(&self, charity: &Charity) -> bool {
        self.accepts.is_none_or(|category| charity.accepts(category))
            && (!self.pickup_only || charity.pickup_available)
    }
}

/// Returns `radius_miles` unchanged when it is a finite positive number.
///
/// # Errors
///
/// Returns [`LocatorError::InvalidRadius`] otherwise.
pub fn validate_radius(radius_miles: f64) -> Result<f64, LocatorError> {
    if radius_miles.is_finite() && radius_miles > 0.0 {
        Ok(radius_miles)
    } else {
        Err(LocatorError::InvalidRadius(radius_miles))
    }
}

/// Rank `candidates` by distance from `origin`, keeping those within
/// `radius_miles` (inclusive).
///
/// Candidates without coordinates are treated as infinitely far away and are
/// always dropped. Equal distances keep their catalog order.
#[must_use]
pub fn rank_by_distance(
    origin: Coordinate,
    candidates: Vec<Charity>,
    radius_miles: f64,
) -> Vec<RankedCharity> {
    let mut ranked: Vec<RankedCharity> = candidates
        .into_iter()
        .filter_map(|charity| {
            let distance = charity
                .coordinates
                .map_or(f64::INFINITY, |at| distance_miles(origin, at));
            (distance <= radius_miles).then_some(RankedCharity {
                charity,
                distance_miles: distance,
            })
        })
        .collect();

    // `sort_by` is stable, which keeps ties in catalog order.
    ranked.sort_by(|a, b| a.distance_miles.total_cmp(&b.distance_miles));
    ranked
}

/// Finds charities near a point using an injected catalog.
#[derive(Clone)]
pub struct CharityLocator {
    catalog: Arc<dyn CharityCatalog>,
    default_radius_miles: f64,
}

impl CharityLocator {
    #[must_use]
    pub fn new(catalog: impl CharityCatalog + 'static) -> Self {
        Self::from_shared(Arc::new(catalog))
    }

    #[must_use]
    pub fn from_shared(catalog: Arc<dyn CharityCatalog>) -> Self {
        Self {
            catalog,
            default_radius_miles: DEFAULT_RADIUS_MILES,
        }
    }

    /// Radius used by [`CharityLocator::find_nearby_default`]. Validated when a
    /// search runs, not here.
    #[must_use]
    pub fn with_default_radius(mut self, radius_miles: f64) -> Self {
        self.default_radius_miles = radius_miles;
        self
    }

    #[must_use]
    pub fn default_radius_miles(&self) -> f64 {
        self.default_radius_miles
    }

    /// Charities within `radius_miles` of `origin`, nearest first.
    ///
    /// # Errors
    ///
    /// Returns an input error before touching the catalog when `origin` or
    /// `radius_miles` is invalid, and [`LocatorError::CatalogUnavailable`]
    /// when the catalog cannot be listed.
    pub async fn find_nearby(
        &self,
        origin: Coordinate,
        radius_miles: f64,
    ) -> Result<Vec<RankedCharity>, LocatorError> {
        self.search(&SearchRequest::new(origin, radius_miles)?).await
    }

    /// [`CharityLocator::find_nearby`] with the configured default radius.
    ///
    /// # Errors
    ///
    /// Same as [`CharityLocator::find_nearby`].
    pub async fn find_nearby_default(
        &self,
        origin: Coordinate,
    ) -> Result<Vec<RankedCharity>, LocatorError> {
        self.find_nearby(origin, self.default_radius_miles).await
    }

    /// Run a prepared search.
    ///
    /// # Errors
    ///
    /// Returns [`LocatorError::CatalogUnavailable`] when the catalog cannot be
    /// listed.
    pub async fn search(&self, request: &SearchRequest) -> Result<Vec<RankedCharity>, LocatorError> {
        let candidates = self.catalog.list_charities().await?;
        let candidate_count = candidates.len();

        let eligible: Vec<Charity> = candidates
            .into_iter()
            .filter(|charity| request.admits(charity))
            .collect();
        let ranked = rank_by_distance(request.origin, eligible, request.radius_miles);

        tracing::debug!(
            origin = %request.origin,
            radius_miles = request.radius_miles,
            candidates = candidate_count,
            matched = ranked.len(),
            "ranked nearby charities"
        );
        Ok(ranked)
    }
}

#[cfg(test)]
#[path = "ranking_test.rs"]
mod tests;
