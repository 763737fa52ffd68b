use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use chub_kernel::server::router::system_router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

async fn get(uri: &str) -> (StatusCode, axum::http::HeaderMap, Value) {
    let (router, _api) = system_router::<()>().split_for_parts();
    let response = router
        .oneshot(Request::builder().uri(uri).body(Body::empty()).expect("request"))
        .await
        .expect("response");

    let status = response.status();
    let headers = response.headers().clone();
    let bytes = response.into_body().collect().await.expect("body").to_bytes();
    (status, headers, serde_json::from_slice(&bytes).expect("json body"))
}

#[tokio::test]
async fn ping_returns_pong() {
    let (status, _, body) = get("/ping").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::json!({ "message": "pong" }));
}

#[tokio::test]
async fn health_is_not_cached() {
    let (status, headers, body) = get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "up");
    assert!(body["uptime"].is_u64());
    assert_eq!(headers[header::PRAGMA], "no-cache");
}

#[test]
fn routes_are_documented() {
    let (_router, api) = system_router::<()>().split_for_parts();
    assert!(api.paths.paths.contains_key("/ping"));
    assert!(api.paths.paths.contains_key("/health"));
}
