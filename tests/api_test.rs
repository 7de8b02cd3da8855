mod common;

use axum::body::Body;
use axum::http::{header::CONTENT_TYPE, Method, Request, StatusCode};
use axum::Router;
use common::{country, place, places_envelope, spawn_upstream, FakeUpstream, Reply};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;
use travelsrv::api::{router, AppState};
use travelsrv::clients::{CountriesClient, OpenTripMapClient};
use travelsrv::query::{QueryClient, TravelQueries};
use travelsrv::services::country::CountryService;
use travelsrv::services::place::PlaceService;
use travelsrv::services::preferences::PreferenceStore;

struct TestApp {
    app: Router,
    countries: FakeUpstream,
    places: FakeUpstream,
}

async fn spawn_app() -> TestApp {
    let countries = spawn_upstream(|request| match request.path.as_str() {
        "/all" => Reply::json(json!([
            country("Spain", "ESP", Some("Madrid"), "Europe"),
            country("Peru", "PER", Some("Lima"), "Americas"),
        ])),
        "/region/europe" => Reply::json(json!([country("Spain", "ESP", Some("Madrid"), "Europe")])),
        _ => Reply::status(StatusCode::NOT_FOUND),
    })
    .await;
    let places = spawn_upstream(|request| match request.path.as_str() {
        "/radius" => Reply::json(places_envelope(vec![place("N1", "Park Güell", 41.41, 2.15)])),
        "/autosuggest" => Reply::json(json!([{ "xid": "N1" }])),
        _ => Reply::status(StatusCode::INTERNAL_SERVER_ERROR),
    })
    .await;

    let timeout = Duration::from_secs(5);
    let queries = TravelQueries::new(
        QueryClient::default(),
        Arc::new(CountryService::new(
            CountriesClient::new(&countries.base_url, timeout).unwrap(),
        )),
        Arc::new(PlaceService::new(
            OpenTripMapClient::new(&places.base_url, timeout, "test-key").unwrap(),
        )),
    );

    let app = router(AppState {
        queries,
        preferences: PreferenceStore::in_memory().unwrap(),
    });

    TestApp {
        app,
        countries,
        places,
    }
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::GET, uri, None).await
}

async fn post(app: &Router, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    send(app, Method::POST, uri, body).await
}

#[tokio::test]
async fn test_health() {
    let test = spawn_app().await;
    let (status, body) = get(&test.app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_destinations_are_cached_per_key() {
    let test = spawn_app().await;

    let (status, body) = get(&test.app, "/destinations/popular").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["fetched"], true);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"][0]["name"], "Madrid");

    get(&test.app, "/destinations/popular").await;
    let (_, body) = get(&test.app, "/countries").await;
    assert_eq!(body["data"].as_array().unwrap().len(), 2);

    let (_, body) = get(&test.app, "/destinations/region/europe").await;
    assert_eq!(body["data"][0]["id"], "ESP");

    assert_eq!(test.countries.request_count(), 3);
}

#[tokio::test]
async fn test_disabled_queries_answer_not_fetched() {
    let test = spawn_app().await;

    let (status, body) = get(&test.app, "/places/search?q=ro").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["fetched"], false);
    assert!(body["data"].is_null());

    let (_, body) = get(&test.app, "/places/nearby").await;
    assert_eq!(body["fetched"], false);

    let (_, body) = get(&test.app, "/cities/Barcelona/attractions?lat=41.3851").await;
    assert_eq!(body["fetched"], false);

    assert_eq!(test.places.request_count(), 0);
}

#[tokio::test]
async fn test_places_endpoints() {
    let test = spawn_app().await;

    let (_, body) = get(&test.app, "/places/search?q=barce").await;
    assert_eq!(body["data"][0]["xid"], "N1");

    let (_, body) = get(&test.app, "/places/nearby?lat=41.3851&lon=2.1734&radius=2000").await;
    assert_eq!(body["data"][0]["name"], "Park Güell");

    let (_, body) = get(
        &test.app,
        "/cities/Barcelona/attractions?lat=41.3851&lon=2.1734",
    )
    .await;
    assert_eq!(body["data"][0]["city"], "Barcelona");

    let requests = test.places.requests();
    assert_eq!(requests[1].param("radius"), Some("2000"));
    assert_eq!(requests[2].param("radius"), Some("15000"));
}

#[tokio::test]
async fn test_upstream_failure_maps_to_bad_gateway() {
    let test = spawn_app().await;

    let (status, body) = get(&test.app, "/places/N404").await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().contains("500"));
    // One attempt plus one retry.
    assert_eq!(test.places.request_count(), 2);
}

#[tokio::test]
async fn test_search_text_is_not_trimmed() {
    let test = spawn_app().await;

    let (status, body) = get(&test.app, "/places/search?q=%20ro").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["fetched"], true);
    assert_eq!(test.places.requests()[0].param("name"), Some(" ro"));
}

#[tokio::test]
async fn test_path_parameters_stay_in_one_upstream_segment() {
    let test = spawn_app().await;

    let (status, _) = get(&test.app, "/places/..%2Fbbox%3Flon_min%3D1").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);

    let requests = test.places.requests();
    assert_eq!(requests[0].path, "/xid/..%2Fbbox%3Flon_min=1");
    assert_eq!(requests[0].param("lon_min"), None);
    assert!(requests.iter().all(|r| r.path.starts_with("/xid/")));

    let (status, _) = get(&test.app, "/countries/region/..%2Fall").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(test.countries.requests()[0].path, "/region/..%2Fall");
}

#[tokio::test]
async fn test_preference_flow() {
    let test = spawn_app().await;
    let app = &test.app;

    let (status, body) = post(
        app,
        "/preferences/auth/login",
        Some(json!({ "token": "t-1", "userId": "u-1" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["userId"], "u-1");

    let (_, body) = post(app, "/preferences/auth/logout", None).await;
    assert!(body["data"]["token"].is_null());

    let (_, body) = post(
        app,
        "/preferences/onboarding/permissions",
        Some(json!({ "kind": "location", "granted": true })),
    )
    .await;
    assert_eq!(body["data"]["permissionsGranted"]["location"], true);

    let (_, body) = post(app, "/preferences/onboarding/complete", None).await;
    assert_eq!(body["data"]["isCompleted"], true);

    let (_, body) = post(app, "/preferences/settings/theme/toggle", None).await;
    assert_eq!(body["data"]["mode"], "light");

    let (_, body) = post(
        app,
        "/preferences/settings/theme",
        Some(json!({ "mode": "dark" })),
    )
    .await;
    assert_eq!(body["data"]["isDark"], true);

    let (_, body) = post(
        app,
        "/preferences/settings",
        Some(json!({ "language": "fr", "notifications": false })),
    )
    .await;
    assert_eq!(body["data"]["language"], "fr");
    assert_eq!(body["data"]["locationServices"], true);

    let (_, body) = post(app, "/preferences/favorites/JPN/toggle", None).await;
    assert_eq!(body["data"]["isFavorite"], true);
    let (_, body) = get(app, "/preferences/favorites").await;
    assert_eq!(body["data"]["destinationIds"], json!(["JPN"]));

    let (_, body) = post(app, "/preferences/onboarding/reset", None).await;
    assert_eq!(body["data"]["isCompleted"], false);
}
