//! Wires configured collaborators for the command handlers.

use std::sync::Arc;

use larder_core::AppConfig;
use larder_locator::{
    CharityCatalog, FileCatalog, Geolocator, HttpCatalog, HttpGeolocator, LocationProvider,
    PositionOptions, StaticCatalog,
};

/// Pick the catalog source: demo data, a remote URL, or the catalog file.
pub(crate) fn catalog(config: &AppConfig, demo: bool) -> anyhow::Result<Arc<dyn CharityCatalog>> {
    if demo {
        return Ok(Arc::new(StaticCatalog::demo()));
    }

    if let Some(url) = config.catalog_url.as_deref() {
        tracing::debug!(url, "using remote charity catalog");
        let catalog = HttpCatalog::new(url, config.http_timeout_secs, &config.user_agent)
            .map_err(|e| anyhow::anyhow!("failed to build catalog client: {e}"))?;
        return Ok(Arc::new(catalog));
    }

    tracing::debug!(path = %config.charities_path.display(), "using charity catalog file");
    Ok(Arc::new(FileCatalog::new(&config.charities_path)))
}

/// Location provider backed by `LARDER_GEOLOCATION_URL`, or one with no
/// capability when that is unset.
pub(crate) fn location_provider(config: &AppConfig) -> anyhow::Result<LocationProvider> {
    let options = PositionOptions::from_app_config(config);
    let geolocator: Option<Box<dyn Geolocator>> = match config.geolocation_url.as_deref() {
        Some(url) => Some(Box::new(
            HttpGeolocator::new(url, config.http_timeout_secs, &config.user_agent)
                .map_err(|e| anyhow::anyhow!("failed to build geolocation client: {e}"))?,
        )),
        None => None,
    };
    Ok(LocationProvider::new(geolocator, options))
}
