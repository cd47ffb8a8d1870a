//! Integration tests for `HttpGeolocator` using wiremock HTTP mocks.

use std::time::Duration;

use larder_locator::{
    Coordinate, Geolocator, HttpGeolocator, LocationOutcome, LocationProvider, PositionOptions,
    Unavailable,
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_geolocator(server: &MockServer) -> HttpGeolocator {
    HttpGeolocator::new(&format!("{}/position", server.uri()), 5, "larder-test")
        .expect("client construction should not fail")
}

fn options(maximum_age: Duration) -> PositionOptions {
    PositionOptions {
        timeout: Duration::from_secs(5),
        maximum_age,
        high_accuracy: false,
    }
}

#[tokio::test]
async fn reads_lat_lng_payload() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/position"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "lat": 40.7589, "lng": -73.9851 })),
        )
        .mount(&server)
        .await;

    let fix = test_geolocator(&server)
        .current_position(&options(Duration::ZERO))
        .await
        .unwrap();
    assert_eq!(fix, Coordinate::new(40.7589, -73.9851));
}

#[tokio::test]
async fn accepts_ip_geolocation_field_names() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/position"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "success",
            "lat": 34.0522,
            "lon": -118.2437,
            "city": "Los Angeles"
        })))
        .mount(&server)
        .await;

    let fix = test_geolocator(&server)
        .current_position(&options(Duration::ZERO))
        .await
        .unwrap();
    assert_eq!(fix, Coordinate::new(34.0522, -118.2437));
}

#[tokio::test]
async fn high_accuracy_is_forwarded_as_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/position"))
        .and(query_param("accuracy", "high"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "latitude": 1.0, "longitude": 2.0 })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let opts = PositionOptions {
        high_accuracy: true,
        ..options(Duration::ZERO)
    };
    let fix = test_geolocator(&server).current_position(&opts).await.unwrap();
    assert_eq!(fix, Coordinate::new(1.0, 2.0));
}

#[tokio::test]
async fn forbidden_maps_to_permission_denied() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/position"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let err = test_geolocator(&server)
        .current_position(&options(Duration::ZERO))
        .await
        .unwrap_err();
    assert_eq!(err, Unavailable::PermissionDenied);
}

#[tokio::test]
async fn server_error_maps_to_position_unavailable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/position"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let err = test_geolocator(&server)
        .current_position(&options(Duration::ZERO))
        .await
        .unwrap_err();
    assert!(matches!(err, Unavailable::PositionUnavailable(_)), "{err:?}");
}

#[tokio::test]
async fn recent_fix_is_reused_within_maximum_age() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/position"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "lat": 5.0, "lng": 6.0 })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let geolocator = test_geolocator(&server);
    let opts = options(Duration::from_secs(300));
    let first = geolocator.current_position(&opts).await.unwrap();
    let second = geolocator.current_position(&opts).await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn zero_maximum_age_always_requests_fresh_fix() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/position"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "lat": 5.0, "lng": 6.0 })),
        )
        .expect(2)
        .mount(&server)
        .await;

    let geolocator = test_geolocator(&server);
    let opts = options(Duration::ZERO);
    geolocator.current_position(&opts).await.unwrap();
    geolocator.current_position(&opts).await.unwrap();
}

#[tokio::test]
async fn slow_endpoint_is_cut_off_by_provider_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/position"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "lat": 5.0, "lng": 6.0 }))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let provider = LocationProvider::new(
        Some(Box::new(test_geolocator(&server))),
        PositionOptions {
            timeout: Duration::from_millis(100),
            maximum_age: Duration::ZERO,
            high_accuracy: false,
        },
    );

    let outcome = provider.resolve_current_location().await;
    assert_eq!(
        outcome,
        LocationOutcome::Unavailable(Unavailable::Timeout { timeout_ms: 100 })
    );
}

#[tokio::test]
async fn out_of_range_fix_is_not_cached() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/position"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "lat": 200.0, "lng": 0.0 })),
        )
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/position"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "lat": 40.0, "lng": -73.0 })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let provider = LocationProvider::new(
        Some(Box::new(test_geolocator(&server))),
        options(Duration::from_secs(300)),
    );

    let first = provider.resolve_current_location().await;
    assert!(
        matches!(
            first,
            LocationOutcome::Unavailable(Unavailable::PositionUnavailable(_))
        ),
        "{first:?}"
    );

    let second = provider.resolve_current_location().await;
    assert_eq!(second, LocationOutcome::Resolved(Coordinate::new(40.0, -73.0)));
}
