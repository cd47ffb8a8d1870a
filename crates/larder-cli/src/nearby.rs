//! `larder nearby`: rank charities around an origin.

use std::fmt::Write as _;

use chrono::{Datelike, Weekday};
use larder_core::{format_miles, AppConfig, Coordinate, FoodCategory};
use larder_locator::{validate_radius, CharityLocator, RankedCharity, SearchRequest};

use crate::{locate, setup};

/// Accepted categories shown before collapsing into "+N more".
const SHOWN_CATEGORIES: usize = 4;

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct NearbyArgs {
    pub origin: Option<Coordinate>,
    pub radius_miles: Option<f64>,
    pub accepts: Option<FoodCategory>,
    pub pickup_only: bool,
    pub demo: bool,
    pub json: bool,
}

/// # Errors
///
/// Returns an error for an invalid origin or radius, or when the catalog
/// cannot be reached. An empty result is not an error.
pub(crate) async fn run_nearby(config: &AppConfig, args: &NearbyArgs) -> anyhow::Result<()> {
    // Reject a bad radius before waiting on a location fix.
    let radius_miles =
        validate_radius(args.radius_miles.unwrap_or(config.default_radius_miles))?;
    let origin = match args.origin {
        Some(origin) => origin,
        None => locate::resolve_origin(config).await?.0,
    };

    let mut request = SearchRequest::new(origin, radius_miles)?;
    if let Some(category) = args.accepts {
        request = request.accepting(category);
    }
    if args.pickup_only {
        request = request.pickup_only();
    }

    let locator = CharityLocator::from_shared(setup::catalog(config, args.demo)?);
    let ranked = locator.search(&request).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&ranked)?);
    } else {
        let today = chrono::Local::now().weekday();
        print!("{}", render_ranked(&ranked, origin, radius_miles, today));
    }

    Ok(())
}

fn render_ranked(
    ranked: &[RankedCharity],
    origin: Coordinate,
    radius_miles: f64,
    today: Weekday,
) -> String {
    let mut out = String::new();
    if ranked.is_empty() {
        let _ = writeln!(
            out,
            "no charities within {} of {origin}",
            format_miles(radius_miles)
        );
        return out;
    }

    let _ = writeln!(
        out,
        "{} charities within {} of {origin}:",
        ranked.len(),
        format_miles(radius_miles)
    );
    for (rank, entry) in ranked.iter().enumerate() {
        let charity = &entry.charity;
        let _ = writeln!(
            out,
            "{:>3}. {} ({})",
            rank + 1,
            charity.name,
            format_miles(entry.distance_miles)
        );
        let _ = writeln!(out, "     {}", charity.address);

        if !charity.accepted_items.is_empty() {
            let shown: Vec<String> = charity
                .accepted_items
                .iter()
                .take(SHOWN_CATEGORIES)
                .map(ToString::to_string)
                .collect();
            let hidden = charity.accepted_items.len().saturating_sub(SHOWN_CATEGORIES);
            let more = if hidden > 0 {
                format!(" +{hidden} more")
            } else {
                String::new()
            };
            let _ = writeln!(out, "     accepts: {}{more}", shown.join(", "));
        }
        if charity.pickup_available {
            let _ = writeln!(out, "     pickup available");
        }
        if let Some(hours) = charity
            .operating_hours
            .as_ref()
            .and_then(|h| h.for_day(today))
        {
            let _ = writeln!(out, "     today: {hours}");
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use larder_locator::{CharityCatalog, StaticCatalog};

    use super::*;

    const NEW_YORK: Coordinate = Coordinate::new(40.7128, -74.0060);

    async fn demo_ranked() -> Vec<RankedCharity> {
        let charities = StaticCatalog::demo().list_charities().await.unwrap();
        larder_locator::rank_by_distance(NEW_YORK, charities, 10.0)
    }

    #[tokio::test]
    async fn renders_rank_distance_and_details() {
        let text = render_ranked(&demo_ranked().await, NEW_YORK, 10.0, Weekday::Sat);

        assert!(text.starts_with("3 charities within 10.0 mi of 40.7128,-74.0060:"), "{text}");
        assert!(text.contains("  1. City Food Bank (0.0 mi)"), "{text}");
        assert!(text.contains("  2. Helping Hands Shelter (3.4 mi)"), "{text}");
        assert!(text.contains("today: 10:00 AM - 2:00 PM"), "{text}");
    }

    #[tokio::test]
    async fn collapses_long_category_lists() {
        let text = render_ranked(&demo_ranked().await, NEW_YORK, 10.0, Weekday::Mon);
        assert!(
            text.contains("accepts: vegetables, fruits, meat, dairy +1 more"),
            "{text}"
        );
    }

    #[tokio::test]
    async fn bad_radius_fails_before_location_is_resolved() {
        // Accepts connections but never answers, so a location request would hang.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let config = AppConfig {
            geolocation_url: Some(format!("http://{}/position", listener.local_addr().unwrap())),
            location_timeout_ms: 30_000,
            ..AppConfig::default()
        };
        let args = NearbyArgs {
            origin: None,
            radius_miles: Some(-5.0),
            accepts: None,
            pickup_only: false,
            demo: true,
            json: false,
        };

        let result = tokio::time::timeout(
            std::time::Duration::from_secs(2),
            run_nearby(&config, &args),
        )
        .await
        .expect("radius should be rejected without waiting on location");
        let err = result.unwrap_err();
        assert!(
            matches!(
                err.downcast_ref::<larder_locator::LocatorError>(),
                Some(larder_locator::LocatorError::InvalidRadius(r)) if (*r + 5.0).abs() < f64::EPSILON
            ),
            "{err:?}"
        );
    }

    #[test]
    fn empty_result_says_so() {
        let text = render_ranked(&[], NEW_YORK, 2.5, Weekday::Mon);
        assert_eq!(text, "no charities within 2.5 mi of 40.7128,-74.0060\n");
    }
}
