mod common;

use std::sync::Arc;

use axum_test::TestServer;
use clicktag::domain::entities::LinkStatus;
use clicktag::routes::app_router;
use common::InMemoryLinkStore;
use regex::Regex;

fn server(state: clicktag::state::AppState) -> TestServer {
    TestServer::new(app_router(state, false)).unwrap()
}

#[tokio::test]
async fn test_redirect_appends_click_id() {
    let (state, store) = common::create_test_state();
    store.seed_link(1, "ninecasino", "https://partner.example/go");
    store.seed_software(1, "smartico").await;

    let response = server(state).get("/ninecasino").await;

    assert_eq!(response.status_code(), 302);

    let location = response.header("location");
    let location = location.to_str().unwrap();
    let pattern = Regex::new(r"^https://partner\.example/go\?afp=[0-9a-z]{13}$").unwrap();
    assert!(
        pattern.is_match(location),
        "unexpected location '{}'",
        location
    );
}

#[tokio::test]
async fn test_redirect_fresh_id_per_click() {
    let (state, store) = common::create_test_state();
    store.seed_link(1, "ninecasino", "https://partner.example/go");
    store.seed_software(1, "smartico").await;

    let server = server(state);
    let first = server.get("/ninecasino").await;
    let second = server.get("/ninecasino").await;

    assert_ne!(first.header("location"), second.header("location"));
}

#[tokio::test]
async fn test_redirect_separator_with_existing_query() {
    let (state, store) = common::create_test_state();
    store.seed_link(1, "promo", "https://partner.example/go?campaign=7");
    store.seed_software(1, "affise").await;

    let response = server(state).get("/promo").await;

    assert_eq!(response.status_code(), 302);
    let location = response.header("location");
    let location = location.to_str().unwrap();
    assert!(location.starts_with("https://partner.example/go?campaign=7&sub1="));
}

#[tokio::test]
async fn test_unknown_path_falls_through() {
    let (state, _store) = common::create_test_state();

    let response = server(state).get("/unknown-path").await;

    assert_eq!(response.status_code(), 404);
    assert!(response.maybe_header("location").is_none());
}

#[tokio::test]
async fn test_excluded_paths_fall_through() {
    let (state, store) = common::create_test_state();
    // Even a seeded link cannot shadow an excluded path.
    store.seed_link(1, "favicon.ico", "https://example.com");

    let server = server(state);
    for path in ["/favicon.ico", "/feed", "/wp-login", "/assets/app.js"] {
        let response = server.get(path).await;
        assert_eq!(response.status_code(), 404, "path {} was not excluded", path);
    }
}

#[tokio::test]
async fn test_disabled_link_falls_through() {
    let (state, store) = common::create_test_state();
    store.seed_link_with(
        1,
        "paused",
        "https://example.com",
        LinkStatus::Disabled,
        None,
    );
    store.seed_software(1, "smartico").await;

    let response = server(state).get("/paused").await;
    assert_eq!(response.status_code(), 404);
}

#[tokio::test]
async fn test_link_without_software_falls_through() {
    let (state, store) = common::create_test_state();
    store.seed_link(1, "plain", "https://example.com");

    let response = server(state).get("/plain").await;
    assert_eq!(response.status_code(), 404);
}

#[tokio::test]
async fn test_unknown_software_key_falls_through() {
    let (state, store) = common::create_test_state();
    store.seed_link(1, "promo", "https://example.com");
    store.seed_software(1, "not-in-the-map").await;

    let response = server(state).get("/promo").await;
    assert_eq!(response.status_code(), 404);
}

#[tokio::test]
async fn test_content_metadata_fallback() {
    let (state, store) = common::create_test_state();
    store.seed_link_with(
        1,
        "promo",
        "https://partner.example/landing",
        LinkStatus::Enabled,
        Some(99),
    );
    store.seed_software(99, "referon").await;

    let response = server(state).get("/promo").await;

    assert_eq!(response.status_code(), 302);
    let location = response.header("location");
    let location = location.to_str().unwrap();
    assert!(location.starts_with("https://partner.example/landing?clickid="));
}

#[tokio::test]
async fn test_storage_failure_is_absorbed() {
    let (state, _store) =
        common::create_test_state_with(Arc::new(InMemoryLinkStore::missing_table()));

    let response = server(state).get("/ninecasino").await;
    assert_eq!(response.status_code(), 404);
}

#[tokio::test]
async fn test_health_is_not_intercepted() {
    let (state, _store) = common::create_test_state();

    let response = server(state).get("/health").await;

    assert_eq!(response.status_code(), 200);
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["checks"]["database"]["status"], "ok");
}

#[tokio::test]
async fn test_health_degraded_when_table_missing() {
    let (state, _store) =
        common::create_test_state_with(Arc::new(InMemoryLinkStore::missing_table()));

    let response = server(state).get("/health").await;

    assert_eq!(response.status_code(), 503);
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "degraded");
}
