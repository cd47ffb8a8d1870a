use std::collections::HashSet;
use std::path::Path;
use std::str::FromStr;

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::geo::Coordinate;
use crate::{ConfigError, CoreError};

/// Food categories a charity may accept. Closed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FoodCategory {
    Vegetables,
    Fruits,
    Dairy,
    Meat,
    Seafood,
    Grains,
    Pantry,
    Frozen,
    Beverages,
    Snacks,
}

impl FoodCategory {
    pub const ALL: [FoodCategory; 10] = [
        FoodCategory::Vegetables,
        FoodCategory::Fruits,
        FoodCategory::Dairy,
        FoodCategory::Meat,
        FoodCategory::Seafood,
        FoodCategory::Grains,
        FoodCategory::Pantry,
        FoodCategory::Frozen,
        FoodCategory::Beverages,
        FoodCategory::Snacks,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            FoodCategory::Vegetables => "vegetables",
            FoodCategory::Fruits => "fruits",
            FoodCategory::Dairy => "dairy",
            FoodCategory::Meat => "meat",
            FoodCategory::Seafood => "seafood",
            FoodCategory::Grains => "grains",
            FoodCategory::Pantry => "pantry",
            FoodCategory::Frozen => "frozen",
            FoodCategory::Beverages => "beverages",
            FoodCategory::Snacks => "snacks",
        }
    }
}

impl std::fmt::Display for FoodCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FoodCategory {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == wanted)
            .ok_or_else(|| CoreError::UnknownFoodCategory(s.to_string()))
    }
}

/// Free-text opening hours, one optional entry per weekday.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperatingHours {
    pub monday: Option<String>,
    pub tuesday: Option<String>,
    pub wednesday: Option<String>,
    pub thursday: Option<String>,
    pub friday: Option<String>,
    pub saturday: Option<String>,
    pub sunday: Option<String>,
}

impl OperatingHours {
    #[must_use]
    pub fn for_day(&self, day: Weekday) -> Option<&str> {
        let entry = match day {
            Weekday::Mon => &self.monday,
            Weekday::Tue => &self.tuesday,
            Weekday::Wed => &self.wednesday,
            Weekday::Thu => &self.thursday,
            Weekday::Fri => &self.friday,
            Weekday::Sat => &self.saturday,
            Weekday::Sun => &self.sunday,
        };
        entry.as_deref()
    }
}

/// A donation recipient as supplied by a charity catalog.
///
/// The address is opaque text. A charity without `coordinates` can be listed
/// but never ranked by distance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Charity {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinate>,
    #[serde(default)]
    pub accepted_items: Vec<FoodCategory>,
    #[serde(default)]
    pub pickup_available: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operating_hours: Option<OperatingHours>,
}

impl Charity {
    #[must_use]
    pub fn accepts(&self, category: FoodCategory) -> bool {
        self.accepted_items.contains(&category)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CharitiesFile {
    #[serde(default)]
    pub charities: Vec<Charity>,
}

impl CharitiesFile {
    /// Check catalog rules: non-empty ids and names, unique ids, in-range
    /// coordinates where present.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] describing the first violation.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_charities(self)
    }
}

/// Load and validate a charity catalog from a YAML (or JSON) file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_charities(path: &Path) -> Result<CharitiesFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::CharitiesFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_charities(&content)
}

/// Parse and validate a charity catalog document.
///
/// # Errors
///
/// Returns [`ConfigError::CharitiesFileParse`] for malformed documents and
/// [`ConfigError::Validation`] for records that break catalog rules.
pub fn parse_charities(content: &str) -> Result<CharitiesFile, ConfigError> {
    let file: CharitiesFile = serde_yaml::from_str(content)?;
    file.validate()?;
    Ok(file)
}

fn validate_charities(file: &CharitiesFile) -> Result<(), ConfigError> {
    let mut seen_ids = HashSet::new();

    for charity in &file.charities {
        if charity.id.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "charity '{}' has an empty id",
                charity.name
            )));
        }

        if charity.name.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "charity '{}' has an empty name",
                charity.id
            )));
        }

        if !seen_ids.insert(charity.id.as_str()) {
            return Err(ConfigError::Validation(format!(
                "duplicate charity id: '{}'",
                charity.id
            )));
        }

        if let Some(coords) = charity.coordinates {
            if !coords.is_valid() {
                return Err(ConfigError::Validation(format!(
                    "charity '{}' has out-of-range coordinates ({}, {})",
                    charity.id, coords.lat, coords.lng
                )));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "charities_test.rs"]
mod tests;
