//! Charity catalog collaborators.
//!
//! A catalog only lists charities. Distance, filtering, and ordering happen
//! in [`crate::ranking`], so any source can be swapped in without touching the
//! ranking rules.

mod http;

use std::path::PathBuf;

use larder_core::{Charity, ConfigError, Coordinate, FoodCategory, OperatingHours};

use crate::error::CatalogError;

pub use http::HttpCatalog;

/// Source of candidate charities for a nearby search.
#[async_trait::async_trait]
pub trait CharityCatalog: Send + Sync {
    /// List every charity the source knows about, in catalog order.
    ///
    /// An empty list is a valid answer; failing to reach the source is not.
    async fn list_charities(&self) -> Result<Vec<Charity>, CatalogError>;
}

/// In-memory catalog.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    charities: Vec<Charity>,
}

impl StaticCatalog {
    #[must_use]
    pub fn new(charities: Vec<Charity>) -> Self {
        Self { charities }
    }

    /// Three Manhattan food charities used for demos and offline runs.
    #[must_use]
    pub fn demo() -> Self {
        Self::new(vec![
            demo_charity(
                "1",
                "City Food Bank",
                "Serving families in need for over 20 years",
                "123 Community St, Downtown",
                Coordinate::new(40.7128, -74.0060),
                vec![
                    FoodCategory::Vegetables,
                    FoodCategory::Fruits,
                    FoodCategory::Grains,
                    FoodCategory::Pantry,
                ],
                true,
                weekly_hours("9:00 AM - 5:00 PM", "10:00 AM - 2:00 PM", "Closed"),
            ),
            demo_charity(
                "2",
                "Helping Hands Shelter",
                "Providing meals and shelter to the homeless community",
                "456 Hope Ave, Midtown",
                Coordinate::new(40.7589, -73.9851),
                vec![
                    FoodCategory::Meat,
                    FoodCategory::Vegetables,
                    FoodCategory::Fruits,
                    FoodCategory::Dairy,
                ],
                false,
                weekly_hours("8:00 AM - 6:00 PM", "9:00 AM - 4:00 PM", "9:00 AM - 4:00 PM"),
            ),
            demo_charity(
                "3",
                "Senior Center Kitchen",
                "Daily meals for senior citizens in our community",
                "789 Elder Way, Uptown",
                Coordinate::new(40.7831, -73.9712),
                vec![
                    FoodCategory::Vegetables,
                    FoodCategory::Fruits,
                    FoodCategory::Meat,
                    FoodCategory::Dairy,
                    FoodCategory::Grains,
                ],
                true,
                weekly_hours("7:00 AM - 3:00 PM", "Closed", "Closed"),
            ),
        ])
    }

    #[must_use]
    pub fn charities(&self) -> &[Charity] {
        &self.charities
    }
}

#[async_trait::async_trait]
impl CharityCatalog for StaticCatalog {
    async fn list_charities(&self) -> Result<Vec<Charity>, CatalogError> {
        Ok(self.charities.clone())
    }
}

/// Catalog backed by a YAML (or JSON) document on disk.
///
/// The file is re-read on every call so edits show up without a restart.
#[derive(Debug, Clone)]
pub struct FileCatalog {
    path: PathBuf,
}

impl FileCatalog {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait::async_trait]
impl CharityCatalog for FileCatalog {
    async fn list_charities(&self) -> Result<Vec<Charity>, CatalogError> {
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| ConfigError::CharitiesFileIo {
                path: self.path.display().to_string(),
                source: e,
            })?;
        let file = larder_core::parse_charities(&content)?;

        tracing::debug!(
            path = %self.path.display(),
            count = file.charities.len(),
            "loaded charity catalog file"
        );
        Ok(file.charities)
    }
}

#[allow(clippy::too_many_arguments)]
fn demo_charity(
    id: &str,
    name: &str,
    description: &str,
    address: &str,
    coordinates: Coordinate,
    accepted_items: Vec<FoodCategory>,
    pickup_available: bool,
    operating_hours: OperatingHours,
) -> Charity {
    Charity {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        address: address.to_string(),
        phone: None,
        email: None,
        website: None,
        coordinates: Some(coordinates),
        accepted_items,
        pickup_available,
        operating_hours: Some(operating_hours),
    }
}

fn weekly_hours(weekdays: &str, saturday: &str, sunday: &str) -> OperatingHours {
    let weekday = || Some(weekdays.to_string());
    OperatingHours {
        monday: weekday(),
        tuesday: weekday(),
        wednesday: weekday(),
        thursday: weekday(),
        friday: weekday(),
        saturday: Some(saturday.to_string()),
        sunday: Some(sunday.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn demo_catalog_lists_three_charities_in_order() {
        let charities = StaticCatalog::demo().list_charities().await.unwrap();
        let names: Vec<&str> = charities.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(
            names,
            ["City Food Bank", "Helping Hands Shelter", "Senior Center Kitchen"]
        );
        assert!(charities.iter().all(|c| c.coordinates.is_some()));
    }

    #[tokio::test]
    async fn empty_static_catalog_is_not_an_error() {
        let charities = StaticCatalog::default().list_charities().await.unwrap();
        assert!(charities.is_empty());
    }

    #[tokio::test]
    async fn file_catalog_surfaces_missing_file() {
        let catalog = FileCatalog::new("/nonexistent/larder/charities.yaml");
        let err = catalog.list_charities().await.unwrap_err();
        assert!(matches!(
            err,
            CatalogError::Document(ConfigError::CharitiesFileIo { .. })
        ));
    }

    #[tokio::test]
    async fn file_catalog_reads_yaml_document() {
        let path =
            std::env::temp_dir().join(format!("larder-file-catalog-{}.yaml", std::process::id()));
        std::fs::write(
            &path,
            "charities:\n  - id: a\n    name: Pantry A\n    address: 1 Elm St\n",
        )
        .unwrap();

        let charities = FileCatalog::new(&path).list_charities().await.unwrap();
        assert_eq!(charities.len(), 1);
        assert_eq!(charities[0].name, "Pantry A");
        std::fs::remove_file(&path).ok();
    }
}
