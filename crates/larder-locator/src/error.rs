use larder_core::{ConfigError, CoreError};
use thiserror::Error;

/// Failures while retrieving the candidate charity set.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    HttpStatus { status: u16, url: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The catalog document could not be read, parsed, or validated.
    #[error(transparent)]
    Document(#[from] ConfigError),
}

/// Failures from a nearby-charity search.
///
/// Input errors are reported before the catalog is consulted, so a caller can
/// always tell "nothing nearby" (an empty `Ok`) apart from "search not run".
#[derive(Debug, Error)]
pub enum LocatorError {
    #[error("invalid origin: {0}")]
    InvalidOrigin(#[source] CoreError),

    #[error("invalid search radius {0}: must be a finite positive number of miles")]
    InvalidRadius(f64),

    #[error("charity catalog unavailable: {0}")]
    CatalogUnavailable(#[from] CatalogError),
}

impl LocatorError {
    /// `true` for caller mistakes (bad origin or radius).
    #[must_use]
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            LocatorError::InvalidOrigin(_) | LocatorError::InvalidRadius(_)
        )
    }
}
