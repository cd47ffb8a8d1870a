use larder_core::{AppConfig, Coordinate};
use larder_locator::{map_embed_url, LocationOutcome, DEFAULT_MAP_ZOOM};

use crate::setup;

/// Resolve the user's position, substituting the configured fallback when the
/// platform cannot provide one.
pub(crate) async fn resolve_origin(
    config: &AppConfig,
) -> anyhow::Result<(Coordinate, LocationOutcome)> {
    let provider = setup::location_provider(config)?;
    let outcome = provider.resolve_current_location().await;
    let origin = outcome.or_fallback(config.fallback_location);

    if let LocationOutcome::Unavailable(reason) = &outcome {
        tracing::warn!(
            %reason,
            fallback = %config.fallback_location,
            "using fallback location"
        );
    }

    Ok((origin, outcome))
}

pub(crate) async fn run_locate(config: &AppConfig, map: bool) -> anyhow::Result<()> {
    let (origin, outcome) = resolve_origin(config).await?;

    match &outcome {
        LocationOutcome::Resolved(_) => println!("location: {origin}"),
        LocationOutcome::Unavailable(reason) => {
            println!("location unavailable ({reason}); using fallback {origin}");
        }
    }

    if map {
        match config.maps_api_key.as_deref() {
            Some(key) => println!("map: {}", map_embed_url(key, origin, DEFAULT_MAP_ZOOM)),
            None => eprintln!("warning: --map needs LARDER_MAPS_API_KEY to be set"),
        }
    }

    Ok(())
}
