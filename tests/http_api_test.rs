mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use common::TestApp;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

async fn test_router() -> (TestApp, Router) {
    let app = TestApp::new().await;
    let router = Router::new()
        .nest("/api/v1", loomtrack_api::api_v1_routes())
        .with_state(app.state.clone());
    (app, router)
}

fn authed(method: &str, uri: &str, user_id: i32, role: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("x-user-id", user_id.to_string())
        .header("x-user-role", role)
        .header("content-type", "application/json");

    match body {
        Some(value) => builder.body(Body::from(value.to_string())).unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn create_and_fetch_loom_over_http() {
    let (app, router) = test_router().await;
    app.seed_user(1, "owner", "owner").await;

    let response = router
        .clone()
        .oneshot(authed(
            "POST",
            "/api/v1/looms",
            1,
            "owner",
            Some(json!({
                "loom_no": 12,
                "loom_type": "Handloom",
                "num_sarees": 5
            })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let payload = body_json(response).await;
    assert_eq!(payload["success"], json!(true));
    let loom_id = payload["data"]["id"].as_i64().unwrap();
    assert_eq!(payload["data"]["remaining_sarees"], json!(5));

    let response = router
        .clone()
        .oneshot(authed(
            "GET",
            &format!("/api/v1/looms/{}", loom_id),
            1,
            "owner",
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let payload = body_json(response).await;
    assert_eq!(payload["data"]["loom_no"], json!(12));
    assert_eq!(payload["data"]["loom_type"], json!("Handloom"));
}

#[tokio::test]
async fn missing_identity_headers_are_unauthorized() {
    let (_app, router) = test_router().await;

    let request = Request::builder()
        .method("GET")
        .uri("/api/v1/looms")
        .body(Body::empty())
        .unwrap();
    let response = router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn unknown_role_is_forbidden() {
    let (app, router) = test_router().await;
    app.seed_user(1, "owner", "owner").await;

    let response = router
        .clone()
        .oneshot(authed("GET", "/api/v1/looms", 1, "superuser", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let payload = body_json(response).await;
    assert_eq!(
        payload["message"],
        json!("Authorization error: invalid role, contact admin")
    );
}

#[tokio::test]
async fn invalid_loom_type_is_a_bad_request() {
    let (app, router) = test_router().await;
    app.seed_user(1, "owner", "owner").await;

    let response = router
        .clone()
        .oneshot(authed(
            "POST",
            "/api/v1/looms",
            1,
            "owner",
            Some(json!({
                "loom_no": 1,
                "loom_type": "handloom",
                "num_sarees": 5
            })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn malformed_payment_date_is_a_bad_request() {
    let (app, router) = test_router().await;
    app.seed_user(1, "owner", "owner").await;

    let response = router
        .clone()
        .oneshot(authed(
            "GET",
            "/api/v1/payments/by-date/not-a-date",
            1,
            "owner",
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn notifications_endpoint_is_open_and_empty_by_default() {
    let (_app, router) = test_router().await;

    let request = Request::builder()
        .method("GET")
        .uri("/api/v1/notifications")
        .body(Body::empty())
        .unwrap();
    let response = router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let payload = body_json(response).await;
    assert_eq!(payload["data"]["count"], json!(0));
    assert_eq!(payload["data"]["notifications"], json!([]));
}

#[tokio::test]
async fn health_endpoint_reports_database_status() {
    let (_app, router) = test_router().await;

    let request = Request::builder()
        .method("GET")
        .uri("/api/v1/health")
        .body(Body::empty())
        .unwrap();
    let response = router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let payload = body_json(response).await;
    assert_eq!(payload["data"]["checks"]["database"], json!("healthy"));
}
