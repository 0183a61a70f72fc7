use super::AppRouter;
use crate::{
    abstract_trait::product::repository::DynProductRepository,
    repository::memory::{Failure, InMemoryConnector},
    state::AppState,
};
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode, header},
};
use serde_json::{Value, json};
use shared::{
    abstract_trait::DynStoreConnector,
    config::{Config, ConnectionState, DeployMode},
};
use std::{path::PathBuf, sync::Arc};
use tower::ServiceExt;

fn config(deploy_mode: DeployMode, static_dir: Option<PathBuf>) -> Config {
    let mut config = Config::from_lookup(|_| None).unwrap();
    config.deploy_mode = deploy_mode;
    config.static_dir = static_dir;
    config
}

fn app(config: Config) -> (Router, Arc<AppState>, Arc<InMemoryConnector>) {
    let connector = InMemoryConnector::new();
    let dyn_connector: DynStoreConnector<DynProductRepository> = connector.clone();
    let state = Arc::new(AppState::with_connector(config, dyn_connector));
    (AppRouter::build(state.clone()), state, connector)
}

async fn connected_app() -> (Router, Arc<AppState>, Arc<InMemoryConnector>) {
    let (router, state, connector) = app(config(DeployMode::Server, None));
    state.connection.acquire().await.unwrap();
    (router, state, connector)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn send_raw(router: &Router, req: Request<Body>) -> (StatusCode, Vec<u8>) {
    let res = router.clone().oneshot(req).await.unwrap();
    let status = res.status();
    let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
    (status, bytes.to_vec())
}

async fn send(router: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let (status, bytes) = send_raw(router, req).await;
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn names(body: &Value) -> Vec<&str> {
    body.as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect()
}

#[tokio::test]
async fn preflight_is_answered_without_touching_the_store() {
    let (router, _, connector) = app(config(DeployMode::Serverless, None));

    let req = Request::builder()
        .method(Method::OPTIONS)
        .uri("/products")
        .header(header::ORIGIN, "http://localhost:5173")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(Body::empty())
        .unwrap();

    let res = router.oneshot(req).await.unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        res.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*"
    );
    let methods = res.headers()[header::ACCESS_CONTROL_ALLOW_METHODS]
        .to_str()
        .unwrap()
        .to_string();
    assert!(methods.contains("POST"));
    assert!(methods.contains("DELETE"));
    assert_eq!(connector.calls(), 0);
}

#[tokio::test]
async fn bare_options_gets_cors_headers() {
    let (router, _, connector) = app(config(DeployMode::Serverless, None));

    let req = Request::builder()
        .method(Method::OPTIONS)
        .uri("/products")
        .body(Body::empty())
        .unwrap();

    let res = router.oneshot(req).await.unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    assert!(
        res.headers()
            .contains_key(header::ACCESS_CONTROL_ALLOW_METHODS)
    );
    assert_eq!(connector.calls(), 0);
}

#[tokio::test]
async fn products_need_a_live_connection() {
    let (router, _, _) = app(config(DeployMode::Server, None));

    let (status, body) = send(&router, get("/products")).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body, json!({ "error": "Database not connected" }));

    let (status, _) = send(&router, post_json("/products", r#"{"name":"Aspirin"}"#)).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn creates_a_single_product() {
    let (router, _, connector) = connected_app().await;

    let (status, body) = send(
        &router,
        post_json(
            "/products",
            r#"{"name":"Aspirin","price":5,"inStock":true,"sku":"ignored"}"#,
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    let created = &body.as_array().unwrap()[0];
    assert_eq!(created["name"], "Aspirin");
    assert_eq!(created["price"], 5.0);
    assert_eq!(created["inStock"], true);
    assert_eq!(created["_id"].as_str().unwrap().len(), 24);
    assert!(created["createdAt"].as_str().unwrap().ends_with('Z'));
    assert!(created.get("sku").is_none());
    assert_eq!(connector.repository.len(), 1);
}

#[tokio::test]
async fn creates_many_in_order_and_lists_newest_first() {
    let (router, _, _) = connected_app().await;

    let (status, body) = send(
        &router,
        post_json("/products", r#"[{"name":"Aspirin"},{"name":"Ibuprofen"}]"#),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(names(&body), ["Aspirin", "Ibuprofen"]);

    let (status, _) = send(&router, post_json("/products", r#"{"name":"Paracetamol"}"#)).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(&router, get("/products")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(&body), ["Paracetamol", "Ibuprofen", "Aspirin"]);
}

#[tokio::test]
async fn empty_array_creates_nothing() {
    let (router, _, connector) = connected_app().await;

    let (status, body) = send(&router, post_json("/products", "[]")).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!([]));
    assert_eq!(connector.repository.len(), 0);
}

#[tokio::test]
async fn malformed_payload_is_a_bad_request() {
    let (router, _, connector) = connected_app().await;

    let (status, body) = send(&router, post_json("/products", "{not json")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Failed to create products");
    assert!(body["details"].is_string());

    let (status, body) = send(&router, post_json("/products", "42")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Failed to create products");

    assert_eq!(connector.repository.len(), 0);
}

#[tokio::test]
async fn store_failures_map_to_error_bodies() {
    let (router, state, connector) = connected_app().await;

    connector.repository.fail_next(Failure::Custom);
    let (status, body) = send(&router, get("/products")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Failed to load products" }));

    connector.repository.fail_next(Failure::Custom);
    let (status, body) = send(&router, post_json("/products", r#"{"name":"Aspirin"}"#)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Failed to create products");
    assert_eq!(state.connection.current_state(), ConnectionState::Connected);

    connector.repository.fail_next(Failure::Unavailable);
    let (status, body) = send(&router, get("/products")).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["error"], "Database not connected");
    assert_eq!(
        state.connection.current_state(),
        ConnectionState::Disconnected
    );
}

#[tokio::test]
async fn on_demand_mode_connects_per_request_and_recovers() {
    let (router, state, connector) = app(config(DeployMode::Serverless, None));
    connector.refuse_connections(true);

    let (status, body) = send(&router, get("/products")).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["error"], "Database connection failed");
    assert!(body["details"].as_str().unwrap().contains("connection refused"));
    assert_eq!(
        state.connection.current_state(),
        ConnectionState::Disconnected
    );

    connector.refuse_connections(false);

    let (status, body) = send(&router, get("/products")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    let (status, _) = send(&router, get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(connector.calls(), 2);
}

#[tokio::test]
async fn status_routes_answer_while_the_store_is_down_on_demand() {
    let (router, _, connector) = app(config(DeployMode::Serverless, None));
    connector.refuse_connections(true);

    let (status, body) = send(&router, get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "ok": true, "dbState": "disconnected", "dbName": null })
    );

    let (status, body) = send(&router, get("/")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["dbState"], 0);

    let (status, body) = send(&router, get("/nope")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Not found" }));

    assert_eq!(connector.calls(), 0);
}

#[tokio::test]
async fn on_demand_requests_share_one_connect() {
    let (router, _, connector) = app(config(DeployMode::Serverless, None));

    let requests = (0..8).map(|_| send(&router, get("/products")));
    let results = futures::future::join_all(requests).await;

    assert!(results.iter().all(|(status, _)| *status == StatusCode::OK));
    assert_eq!(connector.calls(), 1);
}

#[tokio::test]
async fn health_reports_state_name_and_database() {
    let (router, state, _) = app(config(DeployMode::Server, None));

    let (status, body) = send(&router, get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "ok": true, "dbState": "disconnected", "dbName": null })
    );

    state.connection.acquire().await.unwrap();

    let (_, body) = send(&router, get("/health")).await;
    assert_eq!(
        body,
        json!({ "ok": true, "dbState": "connected", "dbName": "pharmacy" })
    );
}

#[tokio::test]
async fn root_reports_numeric_state() {
    let (router, state, _) = app(config(DeployMode::Server, None));

    let (_, body) = send(&router, get("/")).await;
    assert_eq!(body["dbState"], 0);

    state.connection.acquire().await.unwrap();

    let (status, body) = send(&router, get("/")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "ok": true, "message": "product-catalog API is running", "dbState": 1 })
    );
}

#[tokio::test]
async fn unknown_routes_are_not_found_without_a_bundle() {
    let (router, _, _) = app(config(DeployMode::Server, None));

    let (status, body) = send(&router, get("/nope")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Not found" }));
}

#[tokio::test]
async fn serves_the_bundle_with_index_fallback() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("index.html"), "<h1>catalog</h1>").unwrap();
    std::fs::write(dir.path().join("app.js"), "console.log('catalog')").unwrap();

    let (router, _, _) = app(config(DeployMode::Server, Some(dir.path().to_path_buf())));

    let (status, body) = send_raw(&router, get("/app.js")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"console.log('catalog')");

    let (status, body) = send_raw(&router, get("/cart/checkout")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"<h1>catalog</h1>");

    let (status, _) = send(&router, get("/products")).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn serves_the_openapi_document() {
    let (router, _, _) = app(config(DeployMode::Server, None));

    let (status, body) = send(&router, get("/api-docs/openapi.json")).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/products"]["get"].is_object());
    assert!(body["paths"]["/products"]["post"].is_object());
    assert!(body["paths"]["/health"]["get"].is_object());
}
