mod common;

use axum::{Router, middleware};
use axum_test::TestServer;
use clicktag::api::middleware::auth;
use clicktag::api::routes::protected_routes;
use clicktag::state::AppState;
use serde_json::json;

fn api_server(state: AppState) -> TestServer {
    let api = protected_routes()
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));
    let app = Router::new().nest("/api", api).with_state(state);
    TestServer::new(app).unwrap()
}

#[tokio::test]
async fn test_requires_bearer_token() {
    let (state, _store) = common::create_test_state();

    let response = api_server(state).get("/api/software").await;
    assert_eq!(response.status_code(), 401);
}

#[tokio::test]
async fn test_rejects_wrong_token() {
    let (state, _store) = common::create_test_state();

    let response = api_server(state)
        .get("/api/software")
        .authorization_bearer("wrong-token")
        .await;
    assert_eq!(response.status_code(), 401);
}

#[tokio::test]
async fn test_software_map_listing() {
    let (state, _store) = common::create_test_state();

    let response = api_server(state)
        .get("/api/software")
        .authorization_bearer(common::TEST_TOKEN)
        .await;

    assert_eq!(response.status_code(), 200);
    let body: serde_json::Value = response.json();
    let entries = body["software"].as_array().unwrap();
    assert!(!entries.is_empty());

    let smartico = entries
        .iter()
        .find(|e| e["key"] == "smartico")
        .expect("smartico entry present");
    assert_eq!(smartico["param"], "afp");
    assert_eq!(smartico["template"], "afp={clickid}");
}

#[tokio::test]
async fn test_get_selection_missing_link() {
    let (state, _store) = common::create_test_state();

    let response = api_server(state)
        .get("/api/links/7/software")
        .authorization_bearer(common::TEST_TOKEN)
        .await;
    assert_eq!(response.status_code(), 404);
}

#[tokio::test]
async fn test_set_and_get_selection() {
    let (state, store) = common::create_test_state();
    store.seed_link(7, "ninecasino", "https://partner.example/go");

    let server = api_server(state);

    let response = server
        .put("/api/links/7/software")
        .authorization_bearer(common::TEST_TOKEN)
        .json(&json!({ "software": "smartico" }))
        .await;
    assert_eq!(response.status_code(), 204);

    let response = server
        .get("/api/links/7/software")
        .authorization_bearer(common::TEST_TOKEN)
        .await;
    assert_eq!(response.status_code(), 200);

    let body: serde_json::Value = response.json();
    assert_eq!(body["link_id"], 7);
    assert_eq!(body["slug"], "ninecasino");
    assert_eq!(body["software"], "smartico");
    assert_eq!(body["template"], "afp={clickid}");
}

#[tokio::test]
async fn test_set_selection_unknown_key() {
    let (state, store) = common::create_test_state();
    store.seed_link(7, "ninecasino", "https://partner.example/go");

    let response = api_server(state)
        .put("/api/links/7/software")
        .authorization_bearer(common::TEST_TOKEN)
        .json(&json!({ "software": "definitely-not-mapped" }))
        .await;
    assert_eq!(response.status_code(), 400);
}

#[tokio::test]
async fn test_set_selection_malformed_key() {
    let (state, store) = common::create_test_state();
    store.seed_link(7, "ninecasino", "https://partner.example/go");

    let response = api_server(state)
        .put("/api/links/7/software")
        .authorization_bearer(common::TEST_TOKEN)
        .json(&json!({ "software": "Not Valid!" }))
        .await;
    assert_eq!(response.status_code(), 400);
}

#[tokio::test]
async fn test_clear_selection() {
    let (state, store) = common::create_test_state();
    store.seed_link(7, "ninecasino", "https://partner.example/go");
    store.seed_software(7, "smartico").await;

    let server = api_server(state);

    let response = server
        .delete("/api/links/7/software")
        .authorization_bearer(common::TEST_TOKEN)
        .await;
    assert_eq!(response.status_code(), 204);

    let response = server
        .get("/api/links/7/software")
        .authorization_bearer(common::TEST_TOKEN)
        .await;
    let body: serde_json::Value = response.json();
    assert!(body["software"].is_null());
}

#[tokio::test]
async fn test_log_tail_without_configured_file() {
    let (state, _store) = common::create_test_state();

    let response = api_server(state)
        .get("/api/log/tail")
        .authorization_bearer(common::TEST_TOKEN)
        .await;
    assert_eq!(response.status_code(), 404);
}
